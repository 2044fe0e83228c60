//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect indexer definitions and rank release search results.
#[derive(Parser, Debug)]
#[command(name = "mydia-discovery")]
#[command(author, version, about)]
pub struct Args {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true, env = "MYDIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after the command finishes
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify release titles into quality attributes
    Classify {
        /// Release titles
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Parse and validate a single definition file
    Check {
        file: PathBuf,
    },

    /// Load every definition in a directory
    Load {
        /// Definitions directory (defaults to `definitions.dir` from config)
        dir: Option<PathBuf>,
    },

    /// Filter, score and rank search results read from a JSON array
    Rank {
        /// JSON file with search results, or `-` for stdin
        results: PathBuf,

        /// Search query used for title relevance
        #[arg(short, long)]
        query: Option<String>,

        /// Minimum seeders (overrides config)
        #[arg(long)]
        min_seeders: Option<u32>,

        /// Preferred resolutions, most preferred first (overrides config)
        #[arg(long = "prefer", value_delimiter = ',')]
        prefer: Vec<String>,

        /// Blocked title tags (added to config)
        #[arg(long = "block", value_delimiter = ',')]
        block: Vec<String>,

        /// Keep rejected results and show why they were rejected
        #[arg(long, conflicts_with = "best")]
        explain: bool,

        /// Print only the best result
        #[arg(long)]
        best: bool,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Classify { .. } => "classify",
            Self::Check { .. } => "check",
            Self::Load { .. } => "load",
            Self::Rank { .. } => "rank",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_classify_requires_titles() {
        let result = Args::try_parse_from(["mydia-discovery", "classify"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["mydia-discovery", "classify", "A.1080p", "B.720p"]).unwrap();
        match args.command {
            Command::Classify { titles } => assert_eq!(titles, vec!["A.1080p", "B.720p"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rank_flags() {
        let args = Args::try_parse_from([
            "mydia-discovery",
            "rank",
            "results.json",
            "--query",
            "the matrix",
            "--min-seeders",
            "3",
            "--prefer",
            "2160p,1080p",
            "--block",
            "cam",
            "--best",
            "--metrics",
        ])
        .unwrap();

        assert!(args.metrics);
        match args.command {
            Command::Rank {
                results,
                query,
                min_seeders,
                prefer,
                block,
                explain,
                best,
            } => {
                assert_eq!(results, PathBuf::from("results.json"));
                assert_eq!(query.as_deref(), Some("the matrix"));
                assert_eq!(min_seeders, Some(3));
                assert_eq!(prefer, vec!["2160p", "1080p"]);
                assert_eq!(block, vec!["cam"]);
                assert!(!explain);
                assert!(best);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_explain_conflicts_with_best() {
        let result =
            Args::try_parse_from(["mydia-discovery", "rank", "r.json", "--explain", "--best"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_cli_global_config_flag() {
        let args =
            Args::try_parse_from(["mydia-discovery", "load", "--config", "mydia.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("mydia.toml")));
        assert_eq!(args.command.name(), "load");
    }
}
