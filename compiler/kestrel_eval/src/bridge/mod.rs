//! Bridging coercions for host-native calls.
//!
//! A [`Bridge`] pairs a [`Coercion`] with a fixed Rust representation. Primitive
//! handlers unbox their arguments through bridges and box their result back,
//! so a host function sees plain `f64`s and `String`s while the language sees
//! the same validation it would get from the plain coercion.

use crate::coercion::{parse_boolean, parse_number, parse_whole_number, Coercion};
use crate::environment::Env;
use crate::errors::{coercion_error, EvalError, EvalResult};
use crate::handler::Parameter;
use crate::value::Value;

/// A coercion with a host-native representation.
pub trait Bridge {
    /// The Rust type values are unboxed into.
    type Native;

    /// The plain coercion this bridge enforces.
    fn coercion(&self) -> Coercion;

    /// Convert a language value into its native form.
    fn unbox(&self, value: &Value, env: &Env) -> Result<Self::Native, EvalError>;

    /// Convert a native result back into a language value.
    fn box_native(&self, native: Self::Native, env: &Env) -> EvalResult;
}

/// Any value except `nothing`, evaluated.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsValue;

impl Bridge for AsValue {
    type Native = Value;

    fn coercion(&self) -> Coercion {
        Coercion::Value
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<Value, EvalError> {
        Coercion::Value.coerce(value, env)
    }

    fn box_native(&self, native: Value, env: &Env) -> EvalResult {
        Coercion::Value.coerce(&native, env)
    }
}

/// Any value including `nothing`, evaluated.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsAnything;

impl Bridge for AsAnything {
    type Native = Value;

    fn coercion(&self) -> Coercion {
        Coercion::Anything
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<Value, EvalError> {
        Coercion::Anything.coerce(value, env)
    }

    fn box_native(&self, native: Value, _env: &Env) -> EvalResult {
        Ok(native)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AsText;

impl Bridge for AsText {
    type Native = String;

    fn coercion(&self) -> Coercion {
        Coercion::Text
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<String, EvalError> {
        Ok(value.to_text(env, &Coercion::Text)?.to_string())
    }

    fn box_native(&self, native: String, _env: &Env) -> EvalResult {
        Ok(Value::text(native))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AsNumber;

impl Bridge for AsNumber {
    type Native = f64;

    fn coercion(&self) -> Coercion {
        Coercion::Number
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<f64, EvalError> {
        let text = value.to_text(env, &Coercion::Number)?;
        parse_number(&text).ok_or_else(|| coercion_error(&Value::Text(text), &Coercion::Number))
    }

    fn box_native(&self, native: f64, _env: &Env) -> EvalResult {
        if native.is_finite() {
            Ok(Value::number(native))
        } else {
            Err(coercion_error(&Value::number(native), &Coercion::Number))
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AsWholeNumber;

impl Bridge for AsWholeNumber {
    type Native = i64;

    fn coercion(&self) -> Coercion {
        Coercion::WholeNumber
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<i64, EvalError> {
        let text = value.to_text(env, &Coercion::WholeNumber)?;
        parse_whole_number(&text)
            .ok_or_else(|| coercion_error(&Value::Text(text), &Coercion::WholeNumber))
    }

    fn box_native(&self, native: i64, _env: &Env) -> EvalResult {
        Ok(Value::text(native.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AsBoolean;

impl Bridge for AsBoolean {
    type Native = bool;

    fn coercion(&self) -> Coercion {
        Coercion::Boolean
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<bool, EvalError> {
        Ok(parse_boolean(&value.to_text(env, &Coercion::Boolean)?))
    }

    fn box_native(&self, native: bool, _env: &Env) -> EvalResult {
        Ok(Value::boolean(native))
    }
}

/// A list unboxed into a `Vec` of the element's native type.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsArray<B> {
    pub element: B,
}

impl<B: Bridge> AsArray<B> {
    pub fn new(element: B) -> Self {
        AsArray { element }
    }
}

impl<B: Bridge> Bridge for AsArray<B> {
    type Native = Vec<B::Native>;

    fn coercion(&self) -> Coercion {
        Coercion::list(self.element.coercion())
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<Self::Native, EvalError> {
        value.to_array(env, &self.coercion(), &self.element)
    }

    fn box_native(&self, native: Self::Native, env: &Env) -> EvalResult {
        let items = native
            .into_iter()
            .map(|item| self.element.box_native(item, env))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::list(items))
    }
}

/// `nothing` unboxes to `None` instead of failing.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsOptional<B> {
    pub inner: B,
}

impl<B: Bridge> AsOptional<B> {
    pub fn new(inner: B) -> Self {
        AsOptional { inner }
    }
}

impl<B: Bridge> Bridge for AsOptional<B> {
    type Native = Option<B::Native>;

    fn coercion(&self) -> Coercion {
        Coercion::optional(self.inner.coercion())
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<Self::Native, EvalError> {
        match self.inner.unbox(value, env) {
            Ok(native) => Ok(Some(native)),
            Err(error) if error.is_null_coercion() => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn box_native(&self, native: Self::Native, env: &Env) -> EvalResult {
        match native {
            Some(native) => self.inner.box_native(native, env),
            None => Ok(Value::Nothing),
        }
    }
}

/// `nothing` is replaced by `default`, which is unboxed like any argument.
#[derive(Clone, Debug)]
pub struct AsDefault<B> {
    pub inner: B,
    pub default: Value,
}

impl<B: Bridge> AsDefault<B> {
    pub fn new(inner: B, default: Value) -> Self {
        AsDefault { inner, default }
    }
}

impl<B: Bridge> Bridge for AsDefault<B> {
    type Native = B::Native;

    fn coercion(&self) -> Coercion {
        Coercion::default(self.inner.coercion(), self.default.clone())
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<B::Native, EvalError> {
        match self.inner.unbox(value, env) {
            Err(error) if error.is_null_coercion() => self.inner.unbox(&self.default, env),
            result => result,
        }
    }

    fn box_native(&self, native: B::Native, env: &Env) -> EvalResult {
        self.inner.box_native(native, env)
    }
}

/// Defers the argument as a thunk to be forced by the host function.
#[derive(Clone, Debug)]
pub struct AsLazy {
    pub target: Coercion,
}

impl AsLazy {
    pub fn new(target: Coercion) -> Self {
        AsLazy { target }
    }
}

impl Bridge for AsLazy {
    type Native = Value;

    fn coercion(&self) -> Coercion {
        Coercion::lazy(self.target.clone())
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<Value, EvalError> {
        self.coercion().coerce(value, env)
    }

    fn box_native(&self, native: Value, _env: &Env) -> EvalResult {
        Ok(native)
    }
}

/// The raw, unevaluated argument.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsIs;

impl Bridge for AsIs {
    type Native = Value;

    fn coercion(&self) -> Coercion {
        Coercion::Is
    }

    fn unbox(&self, value: &Value, _env: &Env) -> Result<Value, EvalError> {
        Ok(value.clone())
    }

    fn box_native(&self, native: Value, _env: &Env) -> EvalResult {
        Ok(native)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AsCoercion;

impl Bridge for AsCoercion {
    type Native = Coercion;

    fn coercion(&self) -> Coercion {
        Coercion::Type
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<Coercion, EvalError> {
        match Coercion::Type.coerce(value, env)? {
            Value::Coercion(coercion) => Ok(coercion),
            other => Err(coercion_error(&other, &Coercion::Type)),
        }
    }

    fn box_native(&self, native: Coercion, _env: &Env) -> EvalResult {
        Ok(Value::Coercion(native))
    }
}

/// A parameter record, written as `name` or `[name, coercion]`.
///
/// A bare name declares a parameter of coercion `value`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsParameter;

impl Bridge for AsParameter {
    type Native = Parameter;

    fn coercion(&self) -> Coercion {
        Coercion::Parameter
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<Parameter, EvalError> {
        let evaluated = Coercion::Value.coerce(value, env)?;
        match &evaluated {
            Value::Text(name) => Ok(Parameter::new(name.as_str(), Coercion::Value)),
            Value::List(items) => match items.as_slice() {
                [Value::Text(name), Value::Coercion(coercion)] => {
                    Ok(Parameter::new(name.as_str(), coercion.clone()))
                }
                _ => Err(coercion_error(&evaluated, &Coercion::Parameter)),
            },
            _ => Err(coercion_error(&evaluated, &Coercion::Parameter)),
        }
    }

    fn box_native(&self, native: Parameter, _env: &Env) -> EvalResult {
        Ok(match native.coercion {
            Coercion::Value => Value::text(native.name),
            coercion => Value::list(vec![Value::text(native.name), Value::Coercion(coercion)]),
        })
    }
}

/// Evaluates the argument for effect and hands the host function `()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsNoResult;

impl Bridge for AsNoResult {
    type Native = ();

    fn coercion(&self) -> Coercion {
        Coercion::NoResult
    }

    fn unbox(&self, value: &Value, env: &Env) -> Result<(), EvalError> {
        Coercion::NoResult.coerce(value, env)?;
        Ok(())
    }

    fn box_native(&self, (): (), _env: &Env) -> EvalResult {
        Ok(Value::Nothing)
    }
}
