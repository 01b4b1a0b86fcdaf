use crate::core::transform::{compose, compose_all, pipe, pipe_all, replicate, Transform};
use crate::domain::model::RuleSet;
use crate::domain::ports::Converter;
use crate::utils::error::{NumeralError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

type Pipeline = Box<dyn Fn(usize) -> String + Send + Sync>;

fn unary_length(decimal: i64) -> Result<usize> {
    if decimal < 0 {
        return Err(NumeralError::InvalidInput { value: decimal });
    }
    usize::try_from(decimal).map_err(|_| NumeralError::InputTooLarge { value: decimal })
}

/// Converts with the standard rule chain.
pub fn convert(decimal: i64) -> Result<String> {
    PipedConverter::new(&RuleSet::standard()).convert(decimal)
}

/// Step-by-step statements: expand, then run each rule transform in turn.
pub struct ImperativeConverter {
    base_symbol: char,
    steps: Vec<Transform>,
}

impl ImperativeConverter {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            base_symbol: rules.base_symbol(),
            steps: rules.transforms(),
        }
    }
}

impl Converter for ImperativeConverter {
    fn name(&self) -> &str {
        Variant::Imperative.name()
    }

    fn convert(&self, decimal: i64) -> Result<String> {
        let how_many = unary_length(decimal)?;

        let replicate_base = replicate(self.base_symbol);
        let mut numeral = replicate_base(how_many);
        for step in &self.steps {
            numeral = step(numeral);
        }

        Ok(numeral)
    }
}

/// One function built by right-to-left composition; steps are listed last
/// to first, the way nested calls read.
pub struct ComposedConverter {
    pipeline: Pipeline,
}

impl ComposedConverter {
    pub fn new(rules: &RuleSet) -> Self {
        let mut steps = rules.transforms();
        steps.reverse();
        let reduce = compose_all(steps);

        Self {
            pipeline: Box::new(compose(
                move |numeral: String| reduce(numeral),
                replicate(rules.base_symbol()),
            )),
        }
    }
}

impl Converter for ComposedConverter {
    fn name(&self) -> &str {
        Variant::Composed.name()
    }

    fn convert(&self, decimal: i64) -> Result<String> {
        let how_many = unary_length(decimal)?;
        Ok((self.pipeline)(how_many))
    }
}

/// One function built by left-to-right piping; steps are listed in the
/// order they run.
pub struct PipedConverter {
    pipeline: Pipeline,
}

impl PipedConverter {
    pub fn new(rules: &RuleSet) -> Self {
        let reduce = pipe_all(rules.transforms());

        Self {
            pipeline: Box::new(pipe(
                replicate(rules.base_symbol()),
                move |numeral: String| reduce(numeral),
            )),
        }
    }
}

impl Converter for PipedConverter {
    fn name(&self) -> &str {
        Variant::Piped.name()
    }

    fn convert(&self, decimal: i64) -> Result<String> {
        let how_many = unary_length(decimal)?;
        Ok((self.pipeline)(how_many))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Imperative,
    Composed,
    Piped,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Imperative, Variant::Composed, Variant::Piped];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Imperative => "imperative",
            Variant::Composed => "composed",
            Variant::Piped => "piped",
        }
    }

    pub fn build(&self, rules: &RuleSet) -> Box<dyn Converter> {
        match self {
            Variant::Imperative => Box::new(ImperativeConverter::new(rules)),
            Variant::Composed => Box::new(ComposedConverter::new(rules)),
            Variant::Piped => Box::new(PipedConverter::new(rules)),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
