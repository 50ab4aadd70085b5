//! Host-implemented handlers.
//!
//! Each primitive declares its interface from the same bridges it unboxes
//! with, so the signature shown to scripts is the contract enforced.

mod arithmetic;
mod control;
mod scope;
mod text;

use kestrel_eval::{
    CallableInterface, Coercion, EvalResult, HandlerKind, Parameter, PrimitiveCall,
    PrimitiveHandler, Value,
};

use crate::output::SharedOutput;

fn primitive(
    name: &str,
    parameters: Vec<Parameter>,
    returns: Coercion,
    function: impl Fn(&PrimitiveCall<'_>) -> EvalResult + 'static,
) -> Value {
    Value::primitive(PrimitiveHandler::new(
        CallableInterface::new(name, parameters, returns),
        HandlerKind::Command,
        function,
    ))
}

/// Every primitive, keyed by the name it is registered under.
pub(crate) fn all(output: &SharedOutput) -> Vec<(&'static str, Value)> {
    let mut primitives = Vec::new();
    primitives.extend(arithmetic::primitives());
    primitives.extend(text::primitives());
    primitives.extend(scope::primitives());
    primitives.extend(control::primitives(output));
    primitives
}
