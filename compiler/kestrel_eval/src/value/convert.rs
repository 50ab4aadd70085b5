//! The conversion entry points every value answers.
//!
//! Coercions call into these; expression kinds call back into coercions.
//! Data kinds answer directly, expression kinds evaluate first and then ask
//! the result, and `nothing` refuses everything with a null coercion.

use crate::bridge::Bridge;
use crate::coercion::Coercion;
use crate::environment::Env;
use crate::errors::{coercion_error, null_coercion, EvalError, EvalResult};
use crate::heap::Heap;

use super::Value;

impl Value {
    /// Canonical form: data unchanged, expressions evaluated, handlers bound
    /// to `env`. List items are converted by `coercion` as well, so a
    /// `nothing` item fails a non-nullable request.
    pub fn to_any(&self, env: &Env, coercion: &Coercion) -> EvalResult {
        match self {
            Value::Nothing => Err(null_coercion(coercion)),
            Value::Text(_) | Value::Coercion(_) | Value::Bound(_) => Ok(self.clone()),
            Value::List(items) => {
                let items = items
                    .iter()
                    .map(|item| coercion.coerce(item, env))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|cause| coercion_error(self, coercion).with_cause(cause))?;
                Ok(Value::list(items))
            }
            Value::Handler(_) | Value::Primitive(_) => match self.callable() {
                Some(callable) => Ok(Value::bound(callable, env.clone())),
                None => Err(coercion_error(self, coercion)),
            },
            Value::Identifier(_) | Value::Command(_) | Value::Block(_) | Value::Thunk(_) => {
                self.evaluate(env, coercion)?.to_any(env, coercion)
            }
        }
    }

    /// Text form. Lists never demote, whatever their length.
    pub fn to_text(&self, env: &Env, coercion: &Coercion) -> Result<Heap<String>, EvalError> {
        match self {
            Value::Nothing => Err(null_coercion(coercion)),
            Value::Text(text) => Ok(text.clone()),
            Value::Identifier(_) | Value::Command(_) | Value::Block(_) | Value::Thunk(_) => {
                self.evaluate(env, coercion)?.to_text(env, coercion)
            }
            Value::List(_)
            | Value::Coercion(_)
            | Value::Handler(_)
            | Value::Primitive(_)
            | Value::Bound(_) => Err(coercion_error(self, coercion)),
        }
    }

    /// List form with each item converted by `element`.
    ///
    /// Anything that is not a list is promoted to a one-item list.
    pub fn to_list(
        &self,
        env: &Env,
        coercion: &Coercion,
        element: &Coercion,
    ) -> Result<Vec<Value>, EvalError> {
        match self {
            Value::Nothing => Err(null_coercion(coercion)),
            Value::List(items) => items
                .iter()
                .map(|item| element.coerce(item, env))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|cause| coercion_error(self, coercion).with_cause(cause)),
            Value::Identifier(_) | Value::Command(_) | Value::Block(_) | Value::Thunk(_) => {
                // The evaluated result has already been through `coercion`.
                match self.evaluate(env, coercion)? {
                    Value::List(items) => Ok(items.to_vec()),
                    other => other.to_list(env, coercion, element),
                }
            }
            _ => Ok(vec![element.coerce(self, env)?]),
        }
    }

    /// Host-native collection, each item unboxed by `element`.
    ///
    /// Same shape rules as [`Value::to_list`].
    pub fn to_array<B: Bridge>(
        &self,
        env: &Env,
        coercion: &Coercion,
        element: &B,
    ) -> Result<Vec<B::Native>, EvalError> {
        match self {
            Value::Nothing => Err(null_coercion(coercion)),
            Value::List(items) => items
                .iter()
                .map(|item| element.unbox(item, env))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|cause| coercion_error(self, coercion).with_cause(cause)),
            Value::Identifier(_) | Value::Command(_) | Value::Block(_) | Value::Thunk(_) => {
                self.evaluate(env, coercion)?.to_array(env, coercion, element)
            }
            _ => Ok(vec![element.unbox(self, env)?]),
        }
    }
}
