use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use poe_query_gen::config::AppConfig;
use poe_query_gen::data::TradeDataLoader;
use poe_query_gen::matcher::rules::supported_uniques;
use poe_query_gen::models::Realm;
use poe_query_gen::parser::ItemParser;
use poe_query_gen::{ConverterError, PoeConverter, Result};

#[derive(Parser, Debug)]
#[command(
    name = "poe-query-gen",
    version,
    about = "Build a trade site search from copied item text"
)]
struct Cli {
    /// File with the copied item text (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// League to search in
    #[arg(short, long)]
    league: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Realm::Pc)]
    realm: Realm,

    /// Stat catalog JSON (trade data/stats format)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// League list JSON (trade data/leagues format)
    #[arg(long)]
    leagues: Option<PathBuf>,

    /// Print the query object instead of the URL
    #[arg(long)]
    json: bool,

    /// Print the parsed item and stop
    #[arg(long)]
    parse_only: bool,

    /// Download the catalog and league list again
    #[arg(long)]
    refresh: bool,

    /// List uniques with per-item stat rules
    #[arg(long)]
    supported: bool,
}

async fn read_item_text(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.supported {
        println!("Unique Items (by name)");
        println!("Cluster Jewels");
        for name in supported_uniques() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = AppConfig::from_env()
        .with_catalog_path(cli.catalog.clone())
        .with_leagues_path(cli.leagues.clone())
        .with_league(cli.league.clone())
        .with_realm(cli.realm)
        .with_refresh(cli.refresh);

    let item_text = read_item_text(cli.input.as_ref()).await?;

    if cli.parse_only {
        let item = ItemParser::parse_item(&item_text);
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    let loader = TradeDataLoader::new();
    let catalog = loader
        .initialize_catalog(&config.catalog_path, config.refresh)
        .await?;
    let converter = PoeConverter::new(&catalog);

    if cli.json {
        let query = converter.convert_to_query(&item_text)?;
        println!("{}", serde_json::to_string_pretty(&query)?);
        return Ok(());
    }

    match loader
        .initialize_leagues(&config.leagues_path, config.refresh)
        .await
    {
        Ok(leagues) if !leagues.contains(config.realm, &config.league) => {
            return Err(ConverterError::ValidationError(format!(
                "Unknown league '{}' for realm {:?}",
                config.league, config.realm
            )));
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "league list unavailable, skipping league check"),
    }

    let url = converter.convert_to_trade_url(&item_text, &config.league)?;
    println!("{}", url);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error during conversion: {}", e);
            ExitCode::FAILURE
        }
    }
}
