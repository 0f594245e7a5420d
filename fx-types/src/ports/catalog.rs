//! Catalog source port.

use std::sync::Arc;

use crate::domain::PairCatalog;
use crate::error::CatalogError;

/// Port trait for whatever publishes the list of quotable pairs.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync + 'static {
    /// Fetches and parses the current catalog.
    async fn fetch_catalog(&self) -> Result<PairCatalog, CatalogError>;
}

#[async_trait::async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    async fn fetch_catalog(&self) -> Result<PairCatalog, CatalogError> {
        (**self).fetch_catalog().await
    }
}
