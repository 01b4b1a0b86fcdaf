use crate::core::{Reporter, SuiteReport, TestResult};
use crate::utils::error::Result;
use std::io::{self, Stdout, Write};

/// One human-readable line per result, then a per-variant summary.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write = Stdout> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn format_result(result: &TestResult) -> String {
    let status = if result.passed { "✅ OK" } else { "❌ NOK" };
    let mut line = format!(
        "[{}] {} ({} === {})",
        result.variant, status, result.input, result.expected
    );
    if !result.passed {
        match (&result.actual, &result.error) {
            (_, Some(error)) => line.push_str(&format!(" error: {}", error)),
            (Some(actual), None) => line.push_str(&format!(" got: {}", actual)),
            (None, None) => {}
        }
    }
    line
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, result: &TestResult) -> Result<()> {
        writeln!(self.out, "{}", format_result(result))?;
        Ok(())
    }

    fn finish(&mut self, report: &SuiteReport) -> Result<()> {
        for summary in report.variant_summaries() {
            writeln!(
                self.out,
                "{}: {} passed, {} failed",
                summary.variant, summary.passed, summary.failed
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Collects results and writes the whole report as one JSON document.
#[derive(Debug)]
pub struct JsonReporter<W: Write = Stdout> {
    out: W,
}

impl JsonReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, _result: &TestResult) -> Result<()> {
        Ok(())
    }

    fn finish(&mut self, report: &SuiteReport) -> Result<()> {
        let document = serde_json::json!({
            "ok": report.all_passed(),
            "started_at": report.started_at,
            "passed": report.passed_count(),
            "failed": report.failed_count(),
            "variants": report.variant_summaries(),
            "results": report.results,
        });
        serde_json::to_writer_pretty(&mut self.out, &document)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub results: Vec<TestResult>,
    pub finished: bool,
}

impl Reporter for MemoryReporter {
    fn report(&mut self, result: &TestResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }

    fn finish(&mut self, _report: &SuiteReport) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
