//! Fixtures shared by the unit tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::bridge::{AsAnything, AsNumber};
use crate::{
    CallableInterface, Coercion, Env, EvalResult, Handler, HandlerKind, Parameter,
    PrimitiveHandler, Value,
};

pub fn text(text: &str) -> Value {
    Value::text(text)
}

pub fn ident(name: &str) -> Value {
    Value::identifier(name)
}

pub fn cmd(name: &str, arguments: Vec<Value>) -> Value {
    Value::command(name, arguments)
}

/// Binary number primitive, e.g. `add(a, b)`.
pub fn arithmetic(name: &str, op: fn(f64, f64) -> f64) -> Value {
    let interface = CallableInterface::new(
        name,
        vec![
            Parameter::new("a", Coercion::Number),
            Parameter::new("b", Coercion::Number),
        ],
        Coercion::Number,
    );
    Value::primitive(PrimitiveHandler::new(
        interface,
        HandlerKind::Command,
        move |call| {
            let a = call.argument(0, &AsNumber)?;
            let b = call.argument(1, &AsNumber)?;
            call.result(&AsNumber, op(a, b))
        },
    ))
}

/// A root scope holding `add` and `subtract`.
pub fn arithmetic_env() -> Env {
    let env = Env::new();
    add(&env, "add", arithmetic("add", |a, b| a + b));
    add(&env, "subtract", arithmetic("subtract", |a, b| a - b));
    env
}

/// `add` that cannot fail in a fixture.
pub fn add(env: &Env, name: &str, value: Value) {
    assert!(env.add(name, value).is_ok(), "duplicate fixture `{name}`");
}

/// A primitive `tick()` counting its calls and returning the new count.
pub fn counter(name: &str) -> (Value, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    let interface = CallableInterface::new(name, vec![], Coercion::Text);
    let value = Value::primitive(PrimitiveHandler::new(
        interface,
        HandlerKind::Command,
        move |_call| {
            seen.set(seen.get() + 1);
            Ok(Value::text(seen.get().to_string()))
        },
    ));
    (value, count)
}

/// A primitive returning its single argument unchanged.
pub fn identity(name: &str) -> Value {
    let interface = CallableInterface::new(
        name,
        vec![Parameter::new("value", Coercion::Anything)],
        Coercion::Anything,
    );
    Value::primitive(PrimitiveHandler::new(
        interface,
        HandlerKind::Command,
        |call| call.argument(0, &AsAnything),
    ))
}

pub fn handler(name: &str, parameters: Vec<Parameter>, returns: Coercion, body: Value) -> Value {
    Value::handler(Handler::new(
        CallableInterface::new(name, parameters, returns),
        body,
        HandlerKind::Command,
    ))
}

pub fn eval(value: &Value, env: &Env) -> EvalResult {
    Coercion::Value.coerce(value, env)
}
