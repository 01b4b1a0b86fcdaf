pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::converter::Variant;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use self::toml_config::Chain;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "numerals", version)]
#[command(about = "Unary numeral conversion through substitution pipelines")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, help = "Rule chain to use (overrides the config file)")]
    pub chain: Option<Chain>,

    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert decimals to numerals
    Convert {
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<i64>,
        #[arg(long, value_enum, default_value_t = Variant::Piped)]
        variant: Variant,
    },
    /// Run the oracle table against converter variants
    Suite {
        /// Variants to run (all when omitted)
        #[arg(long = "variant", value_enum)]
        variants: Vec<Variant>,
        #[arg(long, help = "Exit with a non-zero code when a case fails")]
        fail_on_error: bool,
    },
    /// Check that all variants agree on 0..=UPTO
    Equivalence {
        #[arg(long)]
        upto: Option<i64>,
    },
}
