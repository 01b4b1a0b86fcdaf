use crate::core::transform::{replace, Transform};
use crate::utils::error::{NumeralError, Result};
use crate::utils::validation::validate_symbol_run;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A global `(pattern, replacement)` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub pattern: String,
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Replaces every non-overlapping occurrence of the pattern, scanning left to right.
    pub fn apply(&self, numeral: &str) -> String {
        numeral.replace(&self.pattern, &self.replacement)
    }

    /// The rule partially applied: a reusable one-argument string transform.
    pub fn transform(&self) -> Transform {
        replace(&self.pattern, &self.replacement)
    }
}

/// Ordered rule chain, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    base_symbol: char,
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    /// `I` up to `L`: the chain the oracle table exercises.
    pub fn standard() -> Self {
        Self {
            base_symbol: 'I',
            rules: vec![
                SubstitutionRule::new("IIIII", "V"),
                SubstitutionRule::new("VV", "X"),
                SubstitutionRule::new("XXXXX", "L"),
            ],
        }
    }

    /// `I` up to `M`.
    pub fn full() -> Self {
        let mut rule_set = Self::standard();
        rule_set.rules.extend([
            SubstitutionRule::new("LL", "C"),
            SubstitutionRule::new("CCCCC", "D"),
            SubstitutionRule::new("DD", "M"),
        ]);
        rule_set
    }

    /// Builds a custom chain. Each pattern must be a run of the symbol the
    /// previous rule produced, and each replacement a single new symbol.
    pub fn new(rules: Vec<SubstitutionRule>) -> Result<Self> {
        if rules.is_empty() {
            return Err(NumeralError::InvalidRuleError {
                index: 0,
                reason: "a rule set needs at least one rule".to_string(),
            });
        }

        let mut base_symbol = None;
        let mut previous: Option<char> = None;
        let mut seen = Vec::with_capacity(rules.len() + 1);

        for (index, rule) in rules.iter().enumerate() {
            let invalid = |reason: String| NumeralError::InvalidRuleError { index, reason };

            let symbol = validate_symbol_run("pattern", &rule.pattern)
                .map_err(|e| invalid(e.to_string()))?;
            let produced = validate_symbol_run("replacement", &rule.replacement)
                .map_err(|e| invalid(e.to_string()))?;

            if rule.replacement.chars().count() != 1 {
                return Err(invalid(format!(
                    "replacement '{}' must be a single symbol",
                    rule.replacement
                )));
            }
            if rule.pattern.chars().count() < 2 {
                return Err(invalid(format!(
                    "pattern '{}' must collapse at least two symbols",
                    rule.pattern
                )));
            }
            if let Some(expected) = previous {
                if symbol != expected {
                    return Err(invalid(format!(
                        "pattern '{}' must be a run of '{}', the previous replacement",
                        rule.pattern, expected
                    )));
                }
            } else {
                base_symbol = Some(symbol);
                seen.push(symbol);
            }
            if seen.contains(&produced) {
                return Err(invalid(format!(
                    "replacement '{}' is already used lower in the chain",
                    produced
                )));
            }

            seen.push(produced);
            previous = Some(produced);
        }

        let base_symbol = base_symbol.ok_or_else(|| NumeralError::InvalidRuleError {
            index: 0,
            reason: "a rule set needs at least one rule".to_string(),
        })?;

        tracing::debug!("Built rule set with {} rules, base symbol '{}'", rules.len(), base_symbol);

        Ok(Self { base_symbol, rules })
    }

    pub fn base_symbol(&self) -> char {
        self.base_symbol
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The curried form of every rule, in application order.
    pub fn transforms(&self) -> Vec<Transform> {
        self.rules.iter().map(SubstitutionRule::transform).collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: i64,
    pub expected: String,
}

impl TestCase {
    pub fn new(input: i64, expected: impl Into<String>) -> Self {
        Self {
            input,
            expected: expected.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub variant: String,
    pub input: i64,
    pub expected: String,
    pub actual: Option<String>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSummary {
    pub variant: String,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub results: Vec<TestResult>,
}

impl SuiteReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Failed cases only change the exit code when `fail_on_error` is set.
    pub fn exit_code(&self, fail_on_error: bool) -> i32 {
        if fail_on_error && !self.all_passed() {
            1
        } else {
            0
        }
    }

    /// Pass/fail counts per variant, in the order variants ran.
    pub fn variant_summaries(&self) -> Vec<VariantSummary> {
        let mut summaries: Vec<VariantSummary> = Vec::new();
        for result in &self.results {
            let index = match summaries.iter().position(|s| s.variant == result.variant) {
                Some(index) => index,
                None => {
                    summaries.push(VariantSummary {
                        variant: result.variant.clone(),
                        passed: 0,
                        failed: 0,
                    });
                    summaries.len() - 1
                }
            };
            let summary = &mut summaries[index];
            if result.passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
        }
        summaries
    }
}

impl Default for SuiteReport {
    fn default() -> Self {
        Self::new()
    }
}
