//! Currency Converter CLI
//!
//! One-shot conversions, rate listings and an interactive widget session.

mod repl;

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use converter_hex::convert_once;
use converter_types::{CurrencyCode, CurrencyInfo, RateProvider};
use rates_client::{DEFAULT_BASE_URL, ProviderKind, build_provider};

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter CLI", long_about = None)]
struct Cli {
    /// Base URL of the exchange rate API
    #[arg(long, global = true, env = "RATES_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Use built-in reference rates instead of the live API
    #[arg(long, global = true)]
    offline: bool,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "RATES_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert
        amount: String,
        #[arg(long, default_value = "USD")]
        from: String,
        #[arg(long, default_value = "EUR")]
        to: String,
    },
    /// Show current rates for a base currency
    Rates {
        /// Base currency
        #[arg(default_value = "USD")]
        base: String,
    },
    /// List the supported currencies
    Currencies,
    /// Start an interactive converter session
    Interactive,
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse().map_err(|e| {
        anyhow::anyhow!(
            "{}. Supported: {}",
            e,
            CurrencyCode::all()
                .iter()
                .map(|c| c.code())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let kind = if cli.offline {
        ProviderKind::Reference
    } else {
        ProviderKind::Live
    };
    let provider = build_provider(kind, &cli.api_url, cli.timeout_secs.map(Duration::from_secs))?;

    match cli.command {
        Commands::Convert { amount, from, to } => {
            let from = parse_currency(&from)?;
            let to = parse_currency(&to)?;
            let resp = convert_once(provider.as_ref(), &amount, from, to).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&resp)?);
            } else {
                println!("{}", resp.display);
            }
        }

        Commands::Rates { base } => {
            let base = parse_currency(&base)?;
            let table = provider.latest(base).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                match table.date {
                    Some(date) => println!("1 {} ({})", base, date),
                    None => println!("1 {}", base),
                }
                for (code, rate) in table.catalogue_rates() {
                    println!("  {} {}  {:.6}", code.flag(), code, rate);
                }
            }
        }

        Commands::Currencies => {
            if cli.json {
                let currencies: Vec<CurrencyInfo> =
                    CurrencyCode::all().iter().map(|&c| c.into()).collect();
                println!("{}", serde_json::to_string_pretty(&currencies)?);
            } else {
                for c in CurrencyCode::all() {
                    println!("{} {} - {} ({})", c.flag(), c.code(), c.name(), c.symbol());
                }
            }
        }

        Commands::Interactive => repl::run(provider).await?,
    }

    Ok(())
}
