use numeral_pipeline::config::toml_config::OutputFormat;
use numeral_pipeline::utils::validation::Validate;
use numeral_pipeline::{
    check_equivalence, ConsoleReporter, Converter, JsonReporter, RuleSet, TestSuite, TomlConfig,
    Variant,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn converters(rules: &RuleSet) -> Vec<Box<dyn Converter>> {
    Variant::ALL.iter().map(|v| v.build(rules)).collect()
}

#[test]
fn test_oracle_suite_prints_every_case() {
    let rules = RuleSet::standard();
    let converters = converters(&rules);
    let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();

    let mut reporter = ConsoleReporter::new(Vec::new());
    let report = TestSuite::oracle().run(&variants, &mut reporter).unwrap();
    assert!(report.all_passed());

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    // 3 variants x 11 cases, then one summary line per variant.
    assert_eq!(lines.len(), 36);
    assert_eq!(lines[0], "[imperative] ✅ OK (0 === )");
    assert_eq!(lines[9], "[imperative] ✅ OK (9 === VIIII)");
    assert_eq!(lines[11], "[composed] ✅ OK (0 === )");
    assert_eq!(lines[32], "[piped] ✅ OK (10 === X)");
    assert_eq!(lines[33], "imperative: 11 passed, 0 failed");
    assert_eq!(lines[35], "piped: 11 passed, 0 failed");
}

#[test]
fn test_config_file_drives_suite() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(
            br#"
[rules]
chain = "full"

[[suite.cases]]
input = 50
expected = "L"

[[suite.cases]]
input = 1666
expected = "MDCLXVI"

[reporting]
format = "json"
"#,
        )
        .unwrap();

    let config = TomlConfig::from_file(temp_file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.reporting.format, OutputFormat::Json);

    let rules = config.rule_set().unwrap();
    let converters = converters(&rules);
    let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();
    let suite = TestSuite::oracle().with_cases(config.suite.cases.clone());

    let mut reporter = JsonReporter::new(Vec::new());
    let report = suite.run(&variants, &mut reporter).unwrap();
    assert_eq!(report.results.len(), 39);
    assert!(report.all_passed());

    let document: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
    assert_eq!(document["ok"], serde_json::Value::Bool(true));
    assert_eq!(document["passed"], 39);
    assert_eq!(document["results"].as_array().unwrap().len(), 39);
}

#[test]
fn test_standard_chain_fails_full_chain_cases() {
    let rules = RuleSet::standard();
    let converters = converters(&rules);
    let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();
    let suite = TestSuite::oracle().with_cases([numeral_pipeline::TestCase::new(100, "C")]);

    let mut reporter = ConsoleReporter::new(Vec::new());
    let report = suite.run(&variants, &mut reporter).unwrap();

    assert_eq!(report.failed_count(), 3);
    let output = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(output.contains("[composed] ❌ NOK (100 === C) got: LL"));
}

#[test]
fn test_variants_equivalent_over_range() {
    for rules in [RuleSet::standard(), RuleSet::full()] {
        let converters = converters(&rules);
        let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();
        assert_eq!(check_equivalence(&variants, 1500).unwrap(), 1501);
    }
}

#[test]
fn test_free_convert() {
    assert_eq!(numeral_pipeline::convert(0).unwrap(), "");
    assert_eq!(numeral_pipeline::convert(10).unwrap(), "X");
    assert!(numeral_pipeline::convert(-5).is_err());
}
