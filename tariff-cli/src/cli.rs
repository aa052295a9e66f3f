use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "tariff")]
#[command(about = "Find the best price for a product, venue and member combination")]
pub struct Cli {
    /// Dataset file, overriding `data.path` from the configuration
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate the best price. Entities not given by ID are picked at random.
    Calculate(CalculateArgs),
    /// Generate a random demo dataset
    Seed(SeedArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct CalculateArgs {
    /// ID of the product to calculate a price for
    #[arg(long)]
    pub product: Option<Uuid>,

    /// ID of the venue to calculate a price for
    #[arg(long)]
    pub venue: Option<Uuid>,

    /// ID of the member to calculate a price for
    #[arg(long)]
    pub member: Option<Uuid>,

    #[arg(long, help = "Print the quote as JSON")]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SeedArgs {
    /// Where to write the dataset; defaults to the configured data path
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// RNG seed for a reproducible dataset
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_calculate_with_ids() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "tariff",
            "calculate",
            "--product",
            &id.to_string(),
            "--data",
            "fixtures.json",
        ])
        .unwrap();

        assert_eq!(cli.data, Some(PathBuf::from("fixtures.json")));
        match cli.command {
            Command::Calculate(args) => {
                assert_eq!(args.product, Some(id));
                assert!(args.venue.is_none());
                assert!(args.member.is_none());
                assert!(!args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_id() {
        assert!(Cli::try_parse_from(["tariff", "calculate", "--venue", "12"]).is_err());
    }

    #[test]
    fn test_parses_seed() {
        let cli = Cli::try_parse_from(["tariff", "-v", "seed", "--seed", "9"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Seed(SeedArgs { seed: Some(9), .. })));
    }
}
