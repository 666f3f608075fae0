mod args;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use shopseed_catalog::CatalogFeed;
use shopseed_infra::{
    InMemoryInventorySink, InventorySeeder, InventorySink, PostgresInventorySink, SeedReport,
    SeederConfig,
};

use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be loaded before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    shopseed_observability::init_with(cli.log_format.into());
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config = cli.apply(SeederConfig::from_env());

    match run(&cli, &config).await {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "seeding failed");
            eprintln!("Inventory seeding failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: &SeederConfig) -> anyhow::Result<SeedReport> {
    let feed = CatalogFeed::load(&config.data_dir)
        .with_context(|| format!("loading catalog from {}", config.data_dir.display()))?;
    let items = feed.seed_items();
    tracing::info!(items = items.len(), "catalog loaded");

    if cli.in_memory(config) {
        tracing::info!("no database selected; rows are kept in memory");
        let seeder = InventorySeeder::new(InMemoryInventorySink::new(), config.failure_policy);
        let report = seeder.seed(&items).await?;
        for row in seeder.sink().list().await? {
            println!("{}", serde_json::to_string(&row)?);
        }
        return Ok(report);
    }

    tracing::info!(
        db_target = config.database_target().unwrap_or_default(),
        "connecting to inventory database"
    );
    let sink = PostgresInventorySink::connect(config)
        .await
        .context("connecting to inventory database")?;
    let report = InventorySeeder::new(sink, config.failure_policy)
        .seed(&items)
        .await?;
    Ok(report)
}

fn print_summary(report: &SeedReport) {
    println!(
        "Inventory: {} products seeded, {} variant SKUs created",
        report.products_seeded, report.variant_skus_created
    );
    println!(
        "  rows written: {}, rows cleared: {}",
        report.rows_written, report.rows_cleared
    );
    if !report.is_clean() {
        println!("  skipped {} record(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!("    {}: {}", skipped.sku, skipped.reason);
        }
    }
}
