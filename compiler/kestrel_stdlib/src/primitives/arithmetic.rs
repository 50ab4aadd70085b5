//! `add`, `subtract`, `multiply`, `divide`.

use kestrel_eval::bridge::{AsNumber, Bridge};
use kestrel_eval::errors::primitive_failed;
use kestrel_eval::{EvalError, Parameter, Value};

use super::primitive;

type Operator = fn(f64, f64) -> Result<f64, EvalError>;

fn binary(name: &'static str, operator: Operator) -> (&'static str, Value) {
    let parameters = vec![
        Parameter::new("a", AsNumber.coercion()),
        Parameter::new("b", AsNumber.coercion()),
    ];
    let handler = primitive(name, parameters, AsNumber.coercion(), move |call| {
        let a = call.argument(0, &AsNumber)?;
        let b = call.argument(1, &AsNumber)?;
        call.result(&AsNumber, operator(a, b)?)
    });
    (name, handler)
}

fn divide(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(primitive_failed("can't divide by zero"));
    }
    Ok(a / b)
}

pub(super) fn primitives() -> Vec<(&'static str, Value)> {
    vec![
        binary("add", |a, b| Ok(a + b)),
        binary("subtract", |a, b| Ok(a - b)),
        binary("multiply", |a, b| Ok(a * b)),
        binary("divide", divide),
    ]
}
