use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartfarm", version, about = "Farm monitoring and crop guide TUI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config, database and crop catalog
    Check,
    /// Filter the crop catalog and print the matches
    Crops(CropsArgs),
}

#[derive(Args, Debug, Default)]
pub struct CropsArgs {
    /// Case-insensitive substring of the crop's name or any local name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Season id (rabi, kharif, zaid)
    #[arg(long)]
    pub season: Option<String>,

    /// State id (e.g. punjab, uttar-pradesh)
    #[arg(long)]
    pub state: Option<String>,

    /// Language code for display names (en, hi, mr, ...)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Print matches as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_crops_filters() {
        let cli = Cli::try_parse_from([
            "smartfarm",
            "-vv",
            "crops",
            "--search",
            "whe",
            "--season",
            "rabi",
            "--lang",
            "hi",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Commands::Crops(args)) = cli.command else {
            panic!("expected crops subcommand");
        };
        assert_eq!(args.search.as_deref(), Some("whe"));
        assert_eq!(args.season.as_deref(), Some("rabi"));
        assert!(args.state.is_none());
        assert!(args.json);
    }

    #[test]
    fn no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["smartfarm", "--data-dir", "/tmp/sf"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/sf")));
    }
}
