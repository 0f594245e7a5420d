//! FX CLI
//!
//! Command-line interface for the exchange-rate façade.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use fx_client::FxClient;
use fx_types::{
    ConvertCurrencyRequest, CurrencyCode, DateDigits, ExchangeHistoryRequest,
    ExchangeLastDaysRequest, ExchangeRateRequest,
};

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Exchange-rate API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the exchange-rate API
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// List the currency pairs the provider quotes
    Combinations,
    /// Latest exchange rate for a pair
    Rate(PairArgs),
    /// Daily history between two dates (DDMMYYYY)
    History {
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long)]
        start: DateDigits,
        #[arg(long)]
        end: DateDigits,
    },
    /// Daily history for the last N days
    LastDays {
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long)]
        days: i64,
    },
    /// Convert an amount at the latest rate
    Convert {
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long)]
        amount: f64,
    },
}

#[derive(Args)]
struct PairArgs {
    /// Base currency, e.g. USD
    #[arg(long, value_parser = parse_currency)]
    base: CurrencyCode,
    /// Target currency, e.g. BRL
    #[arg(long, value_parser = parse_currency)]
    target: CurrencyCode,
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.to_uppercase()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid currency code: {}. Expected three letters", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxClient::new(cli.api_url);

    match cli.command {
        Commands::Health => {
            if client.health().await? {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Combinations => {
            let combinations = client.valid_combinations().await?;
            println!("{}", serde_json::to_string_pretty(&combinations)?);
        }

        Commands::Rate(pair) => {
            let rate = client
                .exchange_rate(&ExchangeRateRequest {
                    base_currency: pair.base,
                    target_currency: pair.target,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&rate)?);
        }

        Commands::History { pair, start, end } => {
            let history = client
                .exchange_history(&ExchangeHistoryRequest {
                    base_currency: pair.base,
                    target_currency: pair.target,
                    start_date: start,
                    end_date: end,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }

        Commands::LastDays { pair, days } => {
            let history = client
                .exchange_last_days(&ExchangeLastDaysRequest {
                    base_currency: pair.base,
                    target_currency: pair.target,
                    days,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }

        Commands::Convert { pair, amount } => {
            let converted = client
                .convert_currency(&ConvertCurrencyRequest {
                    base_currency: pair.base,
                    target_currency: pair.target,
                    amount,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&converted)?);
        }
    }

    Ok(())
}
