use crate::core::{RuleSet, SubstitutionRule, TestCase};
use crate::utils::error::{NumeralError, Result};
use crate::utils::validation::{validate_range, validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest decimal accepted from configuration; the unary expansion is linear in it.
pub const MAX_INPUT: i64 = 1_000_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub suite: SuiteConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// I, V, X, L
    #[default]
    Standard,
    /// I, V, X, L, C, D, M
    Full,
    /// Rules listed under `[[rules.custom]]`
    #[cfg_attr(feature = "cli", value(skip))]
    Custom,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub chain: Chain,
    pub custom: Option<Vec<SubstitutionRule>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Appended after the built-in oracle table.
    #[serde(default)]
    pub cases: Vec<TestCase>,
    pub equivalence_upto: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportingConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub fail_on_error: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path).map_err(NumeralError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NumeralError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NumeralError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn rule_set(&self) -> Result<RuleSet> {
        match self.rules.chain {
            Chain::Standard => Ok(RuleSet::standard()),
            Chain::Full => Ok(RuleSet::full()),
            Chain::Custom => {
                let rules = validate_required_field("rules.custom", &self.rules.custom)?;
                RuleSet::new(rules.clone())
            }
        }
    }

    pub fn equivalence_upto(&self) -> i64 {
        self.suite.equivalence_upto.unwrap_or(50)
    }

    pub fn validate_config(&self) -> Result<()> {
        self.rule_set()?;

        if self.rules.custom.is_some() && self.rules.chain != Chain::Custom {
            tracing::warn!(
                "[[rules.custom]] is ignored because rules.chain is {:?}",
                self.rules.chain
            );
        }

        for case in &self.suite.cases {
            validate_range("suite.cases.input", case.input, 0, MAX_INPUT)?;
        }

        validate_range("suite.equivalence_upto", self.equivalence_upto(), 0, MAX_INPUT)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
