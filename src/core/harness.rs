use crate::domain::model::{SuiteReport, TestCase, TestResult};
use crate::domain::ports::{Converter, Reporter};
use crate::utils::error::{NumeralError, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Decimal → expected numeral, in run order.
pub const ORACLE: [(i64, &str); 11] = [
    (0, ""),
    (1, "I"),
    (2, "II"),
    (3, "III"),
    (4, "IIII"),
    (5, "V"),
    (6, "VI"),
    (7, "VII"),
    (8, "VIII"),
    (9, "VIIII"),
    (10, "X"),
];

#[derive(Debug, Clone)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn oracle() -> Self {
        Self {
            cases: ORACLE
                .iter()
                .map(|(input, expected)| TestCase::new(*input, *expected))
                .collect(),
        }
    }

    pub fn with_cases(mut self, cases: impl IntoIterator<Item = TestCase>) -> Self {
        self.cases.extend(cases);
        self
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Runs every case against every variant. A variant that errors or
    /// panics fails that one case; the rest of the suite still runs.
    pub fn run(&self, variants: &[&dyn Converter], reporter: &mut dyn Reporter) -> Result<SuiteReport> {
        let mut report = SuiteReport::new();

        for variant in variants {
            tracing::debug!("Running {} cases against {}", self.cases.len(), variant.name());

            for case in &self.cases {
                let result = execute_case(*variant, case);
                if !result.passed {
                    tracing::debug!(
                        "{} failed on {}: expected {:?}, got {:?}",
                        result.variant,
                        result.input,
                        result.expected,
                        result.actual
                    );
                }
                reporter.report(&result)?;
                report.results.push(result);
            }
        }

        reporter.finish(&report)?;
        Ok(report)
    }
}

impl Default for TestSuite {
    fn default() -> Self {
        Self::oracle()
    }
}

/// Panics are caught, but the process panic hook still runs first; callers
/// that want a clean report install their own hook around [`TestSuite::run`].
fn execute_case(variant: &dyn Converter, case: &TestCase) -> TestResult {
    let outcome = catch_unwind(AssertUnwindSafe(|| variant.convert(case.input)));

    let (actual, error) = match outcome {
        Ok(Ok(actual)) => (Some(actual), None),
        Ok(Err(e)) => (None, Some(e.to_string())),
        Err(panic) => (None, Some(panic_message(panic.as_ref()))),
    };

    TestResult {
        variant: variant.name().to_string(),
        input: case.input,
        expected: case.expected.clone(),
        passed: actual.as_deref() == Some(case.expected.as_str()),
        actual,
        error,
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked".to_string()
    }
}

/// Checks that every variant returns the same numeral for each input in
/// `0..=upto`. Returns how many inputs were compared.
pub fn check_equivalence(variants: &[&dyn Converter], upto: i64) -> Result<usize> {
    let Some((first, rest)) = variants.split_first() else {
        return Ok(0);
    };

    let mut compared = 0;
    for input in 0..=upto {
        let reference = first.convert(input)?;
        for other in rest {
            let output = other.convert(input)?;
            if output != reference {
                return Err(NumeralError::VariantMismatch {
                    input,
                    left: first.name().to_string(),
                    left_output: reference,
                    right: other.name().to_string(),
                    right_output: output,
                });
            }
        }
        compared += 1;
    }

    tracing::debug!("{} variants agree on {} inputs", variants.len(), compared);
    Ok(compared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::MemoryReporter;
    use crate::core::converter::Variant;
    use crate::domain::model::RuleSet;

    struct StubConverter {
        name: &'static str,
        fail_on: i64,
        panic: bool,
    }

    impl Converter for StubConverter {
        fn name(&self) -> &str {
            self.name
        }

        fn convert(&self, decimal: i64) -> Result<String> {
            if decimal == self.fail_on {
                if self.panic {
                    panic!("stub refused {}", decimal);
                }
                return Err(NumeralError::InvalidInput { value: decimal });
            }
            crate::core::converter::convert(decimal)
        }
    }

    #[test]
    fn test_oracle_table() {
        let suite = TestSuite::oracle();
        assert_eq!(suite.cases().len(), 11);
        assert_eq!(suite.cases()[0], TestCase::new(0, ""));
        assert_eq!(suite.cases()[10], TestCase::new(10, "X"));
    }

    #[test]
    fn test_all_variants_pass_oracle() {
        let rules = RuleSet::standard();
        let converters: Vec<_> = Variant::ALL.iter().map(|v| v.build(&rules)).collect();
        let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();

        let mut reporter = MemoryReporter::default();
        let report = TestSuite::oracle().run(&variants, &mut reporter).unwrap();

        assert_eq!(report.results.len(), 33);
        assert!(report.all_passed());
        assert_eq!(reporter.results.len(), 33);
        assert!(reporter.finished);
    }

    #[test]
    fn test_results_ordered_by_variant_then_case() {
        let rules = RuleSet::standard();
        let piped = Variant::Piped.build(&rules);
        let composed = Variant::Composed.build(&rules);
        let variants: Vec<&dyn Converter> = vec![piped.as_ref(), composed.as_ref()];

        let mut reporter = MemoryReporter::default();
        let report = TestSuite::oracle().run(&variants, &mut reporter).unwrap();

        let order: Vec<(String, i64)> = report
            .results
            .iter()
            .map(|r| (r.variant.clone(), r.input))
            .collect();
        let expected: Vec<(String, i64)> = ["piped", "composed"]
            .iter()
            .flat_map(|v| (0..=10).map(move |i| (v.to_string(), i)))
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_error_and_panic_are_isolated() {
        let erroring = StubConverter { name: "erroring", fail_on: 3, panic: false };
        let panicking = StubConverter { name: "panicking", fail_on: 7, panic: true };
        let imperative = Variant::Imperative.build(&RuleSet::standard());
        let variants: [&dyn Converter; 3] = [&erroring, &panicking, imperative.as_ref()];

        let mut reporter = MemoryReporter::default();
        let report = TestSuite::oracle().run(&variants, &mut reporter).unwrap();

        assert_eq!(report.results.len(), 33);
        assert_eq!(report.failed_count(), 2);

        let failed: Vec<_> = report.results.iter().filter(|r| !r.passed).collect();
        assert_eq!((failed[0].variant.as_str(), failed[0].input), ("erroring", 3));
        assert!(failed[0].error.as_deref().unwrap().contains("Invalid input"));
        assert_eq!((failed[1].variant.as_str(), failed[1].input), ("panicking", 7));
        assert!(failed[1].error.as_deref().unwrap().contains("stub refused 7"));
        assert!(failed.iter().all(|r| r.actual.is_none()));

        let summaries = report.variant_summaries();
        assert_eq!(summaries[2].passed, 11);
    }

    #[test]
    fn test_wrong_output_fails_case() {
        let rules = RuleSet::standard();
        let converter = Variant::Imperative.build(&rules);
        let suite = TestSuite::oracle().with_cases([TestCase::new(4, "IV")]);

        let mut reporter = MemoryReporter::default();
        let report = suite.run(&[converter.as_ref()], &mut reporter).unwrap();

        let last = report.results.last().unwrap();
        assert!(!last.passed);
        assert_eq!(last.actual.as_deref(), Some("IIII"));
        assert_eq!(last.error, None);
    }

    #[test]
    fn test_check_equivalence() {
        let rules = RuleSet::standard();
        let converters: Vec<_> = Variant::ALL.iter().map(|v| v.build(&rules)).collect();
        let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();

        assert_eq!(check_equivalence(&variants, 50).unwrap(), 51);
        assert_eq!(check_equivalence(&[], 50).unwrap(), 0);
    }

    #[test]
    fn test_check_equivalence_reports_divergence() {
        let standard = Variant::Piped.build(&RuleSet::standard());
        let full = Variant::Piped.build(&RuleSet::full());

        let err = check_equivalence(&[standard.as_ref(), full.as_ref()], 150).unwrap_err();
        match err {
            NumeralError::VariantMismatch { input, left_output, right_output, .. } => {
                assert_eq!(input, 100);
                assert_eq!(left_output, "LL");
                assert_eq!(right_output, "C");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
