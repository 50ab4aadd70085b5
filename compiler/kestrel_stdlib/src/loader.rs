//! Populating a root scope with the standard library.

use std::f64::consts::PI;

use kestrel_eval::{Coercion, Env, EvalError, Value};

use crate::output::SharedOutput;
use crate::primitives;

/// Coercions scripts can name, e.g. as parameter types in `define`.
fn coercions() -> Vec<(&'static str, Coercion)> {
    vec![
        ("value", Coercion::Value),
        ("anything", Coercion::Anything),
        ("text", Coercion::Text),
        ("number", Coercion::Number),
        ("whole_number", Coercion::WholeNumber),
        ("boolean", Coercion::Boolean),
        ("list", Coercion::list(Coercion::Value)),
        ("expression", Coercion::Is),
        ("lazy", Coercion::lazy(Coercion::Anything)),
        ("optional", Coercion::optional(Coercion::Value)),
        ("no_result", Coercion::NoResult),
        ("type", Coercion::Type),
        ("parameter", Coercion::Parameter),
    ]
}

fn constants() -> Vec<(&'static str, Value)> {
    vec![
        ("nothing", Value::Nothing),
        ("true", Value::boolean(true)),
        ("false", Value::boolean(false)),
        ("pi", Value::number(PI)),
    ]
}

/// Add every library binding to `env`, read-only.
///
/// Fails only if a name is already taken, which means the library itself
/// registers a name twice or `env` was loaded before.
#[tracing::instrument(level = "debug", skip_all)]
pub fn load(env: &Env, output: &SharedOutput) -> Result<(), EvalError> {
    let coercions = coercions()
        .into_iter()
        .map(|(name, coercion)| (name, Value::from(coercion)));
    let bindings = constants()
        .into_iter()
        .chain(coercions)
        .chain(primitives::all(output));

    let mut count = 0_usize;
    for (name, value) in bindings {
        env.add(name, value)?;
        count += 1;
    }
    tracing::debug!(count, "standard library loaded");
    Ok(())
}
