use crate::domain::model::{SuiteReport, TestResult};
use crate::utils::error::Result;

/// One way of turning a decimal into its numeral string.
pub trait Converter: Send + Sync {
    fn name(&self) -> &str;
    fn convert(&self, decimal: i64) -> Result<String>;
}

/// Receives suite results in (variant, case) order.
pub trait Reporter {
    fn report(&mut self, result: &TestResult) -> Result<()>;

    fn finish(&mut self, _report: &SuiteReport) -> Result<()> {
        Ok(())
    }
}
