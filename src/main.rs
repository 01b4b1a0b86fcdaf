use anyhow::Context;
use clap::Parser;
use numeral_pipeline::config::toml_config::{OutputFormat, MAX_INPUT};
use numeral_pipeline::utils::error::ErrorSeverity;
use numeral_pipeline::utils::{logger, validation::{validate_range, Validate}};
use numeral_pipeline::{
    check_equivalence, CliConfig, Command, ConsoleReporter, Converter, JsonReporter, NumeralError,
    Reporter, RuleSet, TestSuite, TomlConfig, Variant,
};
use serde::Serialize;

#[derive(Serialize)]
struct Conversion<'a> {
    variant: &'a str,
    input: i64,
    numeral: String,
}

fn main() {
    let cli = CliConfig::parse();

    if cli.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let Some(numeral_error) = e.downcast_ref::<NumeralError>() else {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            };

            tracing::error!("❌ {:#}", e);
            tracing::debug!("💡 Suggestion: {}", numeral_error.recovery_suggestion());
            eprintln!("❌ {}", numeral_error.user_friendly_message());
            eprintln!("💡 {}", numeral_error.recovery_suggestion());

            let exit_code = match numeral_error.severity() {
                ErrorSeverity::Low => 2,      // bad input
                ErrorSeverity::High => 1,     // bad configuration
                ErrorSeverity::Critical => 3, // converters disagree or I/O failed
            };
            std::process::exit(exit_code);
        }
    }
}

fn load_config(cli: &CliConfig) -> anyhow::Result<TomlConfig> {
    let mut config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("loading config file '{}'", path.display()))?,
        None => TomlConfig::default(),
    };

    if let Some(chain) = cli.chain {
        config.rules.chain = chain;
        tracing::debug!("🔧 Rule chain overridden to: {:?}", chain);
    }
    if cli.json {
        config.reporting.format = OutputFormat::Json;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: CliConfig) -> anyhow::Result<i32> {
    let mut config = load_config(&cli)?;
    let rules = config.rule_set()?;
    tracing::debug!("Using {} substitution rules", rules.len());

    match cli.command {
        Command::Convert { numbers, variant } => {
            let converter = variant.build(&rules);
            let mut conversions = Vec::with_capacity(numbers.len());
            for input in numbers {
                validate_range("input", input, i64::MIN, MAX_INPUT)?;
                conversions.push(Conversion {
                    variant: converter.name(),
                    input,
                    numeral: converter.convert(input)?,
                });
            }

            if config.reporting.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&conversions)?);
            } else {
                for conversion in &conversions {
                    println!("{} => {}", conversion.input, conversion.numeral);
                }
            }
            Ok(0)
        }
        Command::Suite { variants, fail_on_error } => {
            config.reporting.fail_on_error |= fail_on_error;
            run_suite(&config, &rules, &variants)
        }
        Command::Equivalence { upto } => {
            let upto = upto.unwrap_or_else(|| config.equivalence_upto());
            validate_range("upto", upto, 0, MAX_INPUT)?;

            let converters = build_all(&rules, &Variant::ALL);
            let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();
            let compared = check_equivalence(&variants, upto)?;

            if config.reporting.format == OutputFormat::Json {
                let document = serde_json::json!({
                    "ok": true,
                    "variants": Variant::ALL,
                    "upto": upto,
                    "compared": compared,
                });
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                println!(
                    "✅ {} variants agree on 0..={} ({} inputs)",
                    variants.len(),
                    upto,
                    compared
                );
            }
            Ok(0)
        }
    }
}

fn build_all(rules: &RuleSet, variants: &[Variant]) -> Vec<Box<dyn Converter>> {
    variants.iter().map(|v| v.build(rules)).collect()
}

fn run_suite(config: &TomlConfig, rules: &RuleSet, selected: &[Variant]) -> anyhow::Result<i32> {
    let selected = if selected.is_empty() { &Variant::ALL[..] } else { selected };
    let converters = build_all(rules, selected);
    let variants: Vec<&dyn Converter> = converters.iter().map(|c| c.as_ref()).collect();

    let suite = TestSuite::oracle().with_cases(config.suite.cases.iter().cloned());
    tracing::info!(
        "Running {} cases against {} variant(s)",
        suite.cases().len(),
        variants.len()
    );

    let mut reporter: Box<dyn Reporter> = match config.reporting.format {
        OutputFormat::Text => Box::new(ConsoleReporter::stdout()),
        OutputFormat::Json => Box::new(JsonReporter::stdout()),
    };

    // A panicking variant is recorded as a failed case; keep the default hook
    // from interleaving its message with the report lines.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!("Variant panicked: {}", info);
    }));
    let outcome = suite.run(&variants, reporter.as_mut());
    std::panic::set_hook(default_hook);
    let report = outcome?;

    if report.all_passed() {
        tracing::info!("✅ All {} cases passed", report.results.len());
    } else {
        tracing::warn!(
            "❌ {} of {} cases failed",
            report.failed_count(),
            report.results.len()
        );
    }
    Ok(report.exit_code(config.reporting.fail_on_error))
}
