pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::cli::{ConsoleReporter, JsonReporter, MemoryReporter};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::converter::{convert, ComposedConverter, ImperativeConverter, PipedConverter, Variant};
pub use crate::core::harness::{check_equivalence, TestSuite};
pub use crate::domain::model::{RuleSet, SubstitutionRule, SuiteReport, TestCase, TestResult};
pub use crate::domain::ports::{Converter, Reporter};
pub use crate::utils::error::{NumeralError, Result};
