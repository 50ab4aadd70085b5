//! Coercions: type descriptors that validate and convert values.
//!
//! A coercion is itself a value, so handler interfaces, parameters and
//! library bindings can all carry them around. Applying one is double
//! dispatch: [`Coercion::coerce`] picks the value entry point it needs
//! (`to_any`, `to_text`, `to_list`) and the value decides how to answer,
//! evaluating itself first when it is an expression.

use std::fmt;

use crate::bridge::{AsParameter, Bridge};
use crate::environment::Env;
use crate::errors::{coercion_error, EvalResult};
use crate::heap::Heap;
use crate::value::Value;

/// A type descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum Coercion {
    /// Any value except `nothing`.
    Value,
    /// Any value; `nothing` passes through.
    Anything,
    Text,
    /// Text that parses as a finite number. The result stays textual.
    Number,
    /// Text that parses as a 64-bit integer. The result stays textual.
    WholeNumber,
    /// Empty text is false, any other text is true.
    Boolean,
    /// A list whose items are converted by the element coercion.
    List(Heap<Coercion>),
    /// The value itself, unevaluated.
    Is,
    /// Defer conversion by the inner coercion into a thunk.
    Lazy(Heap<Coercion>),
    /// The inner coercion, with `nothing` replaced by a default.
    Default(Heap<Coercion>, Heap<Value>),
    /// The inner coercion, letting `nothing` through.
    Optional(Heap<Coercion>),
    /// Evaluate for effect, then yield `nothing`.
    NoResult,
    /// The value must itself be a coercion.
    Type,
    /// A handler parameter: a name, or a `[name, coercion]` pair.
    Parameter,
}

impl Coercion {
    pub fn list(element: Coercion) -> Self {
        Coercion::List(Heap::new(element))
    }

    pub fn lazy(target: Coercion) -> Self {
        Coercion::Lazy(Heap::new(target))
    }

    pub fn default(inner: Coercion, value: Value) -> Self {
        Coercion::Default(Heap::new(inner), Heap::new(value))
    }

    pub fn optional(inner: Coercion) -> Self {
        Coercion::Optional(Heap::new(inner))
    }

    /// Convert `value` as seen from `env`.
    pub fn coerce(&self, value: &Value, env: &Env) -> EvalResult {
        match self {
            Coercion::Value => value.to_any(env, self),
            Coercion::Anything => match value.to_any(env, self) {
                Err(error) if error.is_null_coercion() => Ok(Value::Nothing),
                result => result,
            },
            Coercion::Text => value.to_text(env, self).map(Value::Text),
            Coercion::Number => {
                let text = value.to_text(env, self)?;
                match parse_number(&text) {
                    Some(_) => Ok(Value::Text(text)),
                    None => Err(coercion_error(&Value::Text(text), self)),
                }
            }
            Coercion::WholeNumber => {
                let text = value.to_text(env, self)?;
                match parse_whole_number(&text) {
                    Some(_) => Ok(Value::Text(text)),
                    None => Err(coercion_error(&Value::Text(text), self)),
                }
            }
            Coercion::Boolean => {
                let text = value.to_text(env, self)?;
                Ok(Value::boolean(parse_boolean(&text)))
            }
            Coercion::List(element) => value.to_list(env, self, element).map(Value::list),
            Coercion::Is => Ok(value.clone()),
            Coercion::Lazy(target) => Ok(Value::thunk(
                value.clone(),
                env.clone(),
                Coercion::clone(target),
            )),
            Coercion::Default(inner, default) => match inner.coerce(value, env) {
                Err(error) if error.is_null_coercion() => Ok(Value::clone(default)),
                result => result,
            },
            Coercion::Optional(inner) => match inner.coerce(value, env) {
                Err(error) if error.is_null_coercion() => Ok(Value::Nothing),
                result => result,
            },
            Coercion::NoResult => {
                Coercion::Anything.coerce(value, env)?;
                Ok(Value::Nothing)
            }
            Coercion::Type => match value.to_any(env, self)? {
                coercion @ Value::Coercion(_) => Ok(coercion),
                other => Err(coercion_error(&other, self)),
            },
            Coercion::Parameter => {
                let parameter = AsParameter.unbox(value, env)?;
                AsParameter.box_native(parameter, env)
            }
        }
    }
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coercion::Value => f.write_str("value"),
            Coercion::Anything => f.write_str("anything"),
            Coercion::Text => f.write_str("text"),
            Coercion::Number => f.write_str("number"),
            Coercion::WholeNumber => f.write_str("whole number"),
            Coercion::Boolean => f.write_str("boolean"),
            Coercion::List(element) => write!(f, "list of {element}"),
            Coercion::Is => f.write_str("expression"),
            Coercion::Lazy(target) => write!(f, "lazy {target}"),
            Coercion::Default(inner, value) => write!(f, "{inner} (default {value})"),
            Coercion::Optional(inner) => write!(f, "optional {inner}"),
            Coercion::NoResult => f.write_str("no result"),
            Coercion::Type => f.write_str("type"),
            Coercion::Parameter => f.write_str("parameter"),
        }
    }
}

// Shared by the coercions above and the bridges, so both paths accept
// exactly the same inputs.

/// Finite decimal number, surrounding whitespace ignored.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

pub(crate) fn parse_whole_number(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

pub(crate) fn parse_boolean(text: &str) -> bool {
    !text.is_empty()
}
