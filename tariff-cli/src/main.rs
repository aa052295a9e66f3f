use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tariff_cli::{logging, report, Cli, Command};
use tariff_store::{seed, Config, Dataset, InMemoryStore};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    logging::init(&config.logging, cli.verbose);

    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.path));

    match cli.command {
        Command::Calculate(args) => {
            tracing::info!("Loading dataset from {}", data_path.display());
            let store = InMemoryStore::new(Dataset::load(&data_path)?);

            let calculation = tariff_cli::calculate(&store, &args, Utc::now()).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&calculation.quote)?);
            } else {
                print!("{}", report::render(&calculation));
            }
        }
        Command::Seed(args) => {
            let mut rng = match args.seed {
                Some(value) => StdRng::seed_from_u64(value),
                None => StdRng::from_entropy(),
            };
            let dataset = seed::generate(&mut rng, &config.seed, Utc::now());

            let output = args.output.unwrap_or(data_path);
            dataset.save(&output)?;
            println!(
                "Wrote {} products, {} venues and {} members to {}",
                dataset.products.len(),
                dataset.venues.len(),
                dataset.members.len(),
                output.display()
            );
        }
    }

    Ok(())
}
