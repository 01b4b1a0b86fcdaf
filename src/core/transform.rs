//! Function-value building blocks for numeral pipelines.
//!
//! A rule is held as a curried transformer: [`replace`] takes the pattern and
//! replacement up front and hands back a one-argument string transform that
//! can be named, stored and chained. [`compose`] chains right to left (the
//! last function runs first, like nested calls); [`pipe`] chains left to right.

use std::sync::Arc;

/// A reusable unary step over the numeral string.
pub type Transform = Arc<dyn Fn(String) -> String + Send + Sync>;

/// Curried global replace: `replace(pattern, replacement)(numeral)`.
pub fn replace(pattern: &str, replacement: &str) -> Transform {
    let pattern = pattern.to_string();
    let replacement = replacement.to_string();
    Arc::new(move |numeral: String| {
        if numeral.contains(pattern.as_str()) {
            numeral.replace(pattern.as_str(), &replacement)
        } else {
            numeral
        }
    })
}

/// Expansion step: `how_many` copies of `symbol`.
pub fn replicate(symbol: char) -> impl Fn(usize) -> String + Clone + Send + Sync {
    move |how_many| symbol.to_string().repeat(how_many)
}

/// `compose(f, g)(x) == f(g(x))`
pub fn compose<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C + Send + Sync
where
    F: Fn(B) -> C + Send + Sync,
    G: Fn(A) -> B + Send + Sync,
{
    move |x| f(g(x))
}

/// `pipe(f, g)(x) == g(f(x))`
pub fn pipe<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C + Send + Sync
where
    F: Fn(A) -> B + Send + Sync,
    G: Fn(B) -> C + Send + Sync,
{
    move |x| g(f(x))
}

/// Folds transforms from last to first.
pub fn compose_all(transforms: Vec<Transform>) -> Transform {
    Arc::new(move |input| transforms.iter().rev().fold(input, |acc, step| step(acc)))
}

/// Folds transforms from first to last.
pub fn pipe_all(transforms: Vec<Transform>) -> Transform {
    Arc::new(move |input| transforms.iter().fold(input, |acc, step| step(acc)))
}
