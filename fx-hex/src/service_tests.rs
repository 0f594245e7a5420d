//! ExchangeService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use fx_types::{
        AppError, CatalogError, CatalogSource, ConvertCurrencyRequest, CurrencyPair,
        ExchangeHistoryRequest, ExchangeLastDaysRequest, ExchangeQuote, ExchangeRateRequest,
        PairCatalog, RateProvider, UpstreamError,
    };

    use crate::ExchangeService;
    use crate::service::{HISTORY_NOT_FOUND, NO_COMBINATIONS, RATE_NOT_FOUND};

    /// How the mock upstream should fail, if at all.
    #[derive(Debug, Clone, Copy)]
    pub enum Failure {
        NotFound,
        Status(u16),
        Transport,
        Contract,
    }

    impl Failure {
        fn to_error(self) -> UpstreamError {
            match self {
                Failure::NotFound => UpstreamError::NotFound,
                Failure::Status(code) => UpstreamError::Status(code),
                Failure::Transport => UpstreamError::Transport("connection refused".into()),
                Failure::Contract => UpstreamError::Contract("missing key `USDBRL`".into()),
            }
        }
    }

    /// In-memory rate provider that records every outbound call.
    pub struct MockRates {
        bid: f64,
        history: Value,
        failure: Option<Failure>,
        calls: Mutex<Vec<String>>,
    }

    impl MockRates {
        pub fn new(bid: f64) -> Self {
            Self {
                bid,
                history: json!([{ "bid": "5.0", "timestamp": "1704067200" }]),
                failure: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(failure: Failure) -> Self {
            Self {
                failure: Some(failure),
                ..Self::new(0.0)
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<(), UpstreamError> {
            self.calls.lock().unwrap().push(call);
            match self.failure {
                Some(failure) => Err(failure.to_error()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl RateProvider for MockRates {
        async fn last_quote(&self, pair: &CurrencyPair) -> Result<ExchangeQuote, UpstreamError> {
            self.record(format!("last/{}", pair.key()))?;
            Ok(ExchangeQuote {
                bid: self.bid,
                create_date: "2024-01-01 12:00:00".into(),
            })
        }

        async fn daily_range(
            &self,
            pair: &CurrencyPair,
            start_date: &str,
            end_date: &str,
        ) -> Result<Value, UpstreamError> {
            self.record(format!("daily/{}/?{}-{}", pair.key(), start_date, end_date))?;
            Ok(self.history.clone())
        }

        async fn daily_last_days(
            &self,
            pair: &CurrencyPair,
            days: i64,
        ) -> Result<Value, UpstreamError> {
            self.record(format!("daily/{}/{}", pair.key(), days))?;
            Ok(self.history.clone())
        }
    }

    /// Catalog source serving a fixed catalog, or failing.
    pub struct MockCatalog {
        catalog: Option<PairCatalog>,
    }

    impl MockCatalog {
        pub fn with_pairs(pairs: &[(&str, &str)]) -> Self {
            Self {
                catalog: Some(pairs.iter().copied().collect()),
            }
        }

        pub fn unreachable() -> Self {
            Self { catalog: None }
        }
    }

    #[async_trait]
    impl CatalogSource for MockCatalog {
        async fn fetch_catalog(&self) -> Result<PairCatalog, CatalogError> {
            self.catalog
                .clone()
                .ok_or_else(|| CatalogError::Transport("dns error".into()))
        }
    }

    fn service(rates: MockRates) -> ExchangeService<MockRates, MockCatalog> {
        ExchangeService::new(
            rates,
            MockCatalog::with_pairs(&[("USD-BRL", "Dólar Americano/Real Brasileiro")]),
        )
    }

    fn rate_request() -> ExchangeRateRequest {
        ExchangeRateRequest {
            base_currency: "USD".parse().unwrap(),
            target_currency: "BRL".parse().unwrap(),
        }
    }

    fn history_request(start: &str, end: &str) -> ExchangeHistoryRequest {
        ExchangeHistoryRequest {
            base_currency: "USD".parse().unwrap(),
            target_currency: "BRL".parse().unwrap(),
            start_date: start.to_string().try_into().unwrap(),
            end_date: end.to_string().try_into().unwrap(),
        }
    }

    fn last_days_request(days: i64) -> ExchangeLastDaysRequest {
        ExchangeLastDaysRequest {
            base_currency: "USD".parse().unwrap(),
            target_currency: "BRL".parse().unwrap(),
            days,
        }
    }

    fn convert_request(amount: f64) -> ConvertCurrencyRequest {
        ConvertCurrencyRequest {
            base_currency: "USD".parse().unwrap(),
            target_currency: "BRL".parse().unwrap(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_valid_combinations_lists_catalog() {
        let service = service(MockRates::new(5.0));

        let response = service.valid_combinations().await.unwrap();

        assert_eq!(response.valid_combinations.len(), 1);
        assert_eq!(
            response.valid_combinations["USD-BRL"],
            "Dólar Americano/Real Brasileiro"
        );
    }

    #[tokio::test]
    async fn test_valid_combinations_empty_is_not_found() {
        let service = ExchangeService::new(MockRates::new(5.0), MockCatalog::with_pairs(&[]));

        let result = service.valid_combinations().await;

        assert!(matches!(result, Err(AppError::NotFound(ref m)) if m == NO_COMBINATIONS));
    }

    #[tokio::test]
    async fn test_valid_combinations_transport_failure_is_internal() {
        let service = ExchangeService::new(MockRates::new(5.0), MockCatalog::unreachable());

        let result = service.valid_combinations().await;

        assert!(matches!(result, Err(AppError::Internal(ref m)) if m.starts_with("Request error:")));
    }

    #[tokio::test]
    async fn test_exchange_rate_reshapes_quote() {
        let service = service(MockRates::new(5.4321));

        let response = service.exchange_rate(rate_request()).await.unwrap();

        assert_eq!(response.base_currency.as_str(), "USD");
        assert_eq!(response.target_currency.as_str(), "BRL");
        assert_eq!(response.exchange_rate, 5.4321);
        assert_eq!(response.timestamp, "2024-01-01 12:00:00");
        assert_eq!(service.rates().calls(), vec!["last/USD-BRL"]);
    }

    #[tokio::test]
    async fn test_exchange_rate_not_found() {
        let service = service(MockRates::failing(Failure::NotFound));

        let result = service.exchange_rate(rate_request()).await;

        assert!(matches!(result, Err(AppError::NotFound(ref m)) if m == RATE_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_exchange_rate_contract_violation_is_internal() {
        let service = service(MockRates::failing(Failure::Contract));

        let result = service.exchange_rate(rate_request()).await;

        assert!(matches!(result, Err(AppError::Internal(ref m)) if m.starts_with("Unexpected error:")));
    }

    #[tokio::test]
    async fn test_history_reformats_dates() {
        let service = service(MockRates::new(5.0));

        let response = service
            .exchange_history(history_request("01012024", "31012024"))
            .await
            .unwrap();

        assert_eq!(response.start_date, "20240101");
        assert_eq!(response.end_date, "20240131");
        assert_eq!(response.history, json!([{ "bid": "5.0", "timestamp": "1704067200" }]));
        assert_eq!(
            service.rates().calls(),
            vec!["daily/USD-BRL/?20240101-20240131"]
        );
    }

    #[tokio::test]
    async fn test_history_invalid_calendar_date_never_calls_upstream() {
        let service = service(MockRates::new(5.0));

        let result = service
            .exchange_history(history_request("99992024", "31012024"))
            .await;

        assert!(
            matches!(result, Err(AppError::BadRequest(ref m)) if m == "Dates must be in the format DDMMYYYY.")
        );
        assert!(service.rates().calls().is_empty());
    }

    #[tokio::test]
    async fn test_history_not_found() {
        let service = service(MockRates::failing(Failure::NotFound));

        let result = service
            .exchange_history(history_request("01012024", "02012024"))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(ref m)) if m == HISTORY_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_last_days_forwards_days() {
        let service = service(MockRates::new(5.0));

        let response = service.exchange_last_days(last_days_request(1)).await.unwrap();

        assert_eq!(response.days, 1);
        assert_eq!(service.rates().calls(), vec!["daily/USD-BRL/1"]);
    }

    #[tokio::test]
    async fn test_last_days_rejects_non_positive() {
        let service = service(MockRates::new(5.0));

        let result = service.exchange_last_days(last_days_request(0)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.rates().calls().is_empty());
    }

    #[tokio::test]
    async fn test_last_days_upstream_status_is_internal() {
        let service = service(MockRates::failing(Failure::Status(502)));

        let result = service.exchange_last_days(last_days_request(3)).await;

        assert!(matches!(result, Err(AppError::Internal(ref m)) if m.contains("502")));
    }

    #[tokio::test]
    async fn test_convert_multiplies_by_bid() {
        let service = service(MockRates::new(5.0));

        let response = service.convert_currency(convert_request(100.0)).await.unwrap();

        assert_eq!(response.amount, 100.0);
        assert_eq!(response.exchange_rate, 5.0);
        assert_eq!(response.converted_amount, 500.0);
    }

    #[tokio::test]
    async fn test_convert_rejects_non_positive_amount() {
        let service = service(MockRates::new(5.0));

        let result = service.convert_currency(convert_request(-10.0)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(service.rates().calls().is_empty());
    }

    #[tokio::test]
    async fn test_convert_transport_failure_is_internal() {
        let service = service(MockRates::failing(Failure::Transport));

        let result = service.convert_currency(convert_request(1.0)).await;

        assert!(
            matches!(result, Err(AppError::Internal(ref m)) if m == "Request error: connection refused")
        );
    }
}
