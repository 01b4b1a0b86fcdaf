pub mod converter;
pub mod harness;
pub mod transform;

pub use crate::domain::model::{RuleSet, SubstitutionRule, SuiteReport, TestCase, TestResult};
pub use crate::domain::ports::{Converter, Reporter};
pub use crate::utils::error::Result;
