//! `store` and `define`: the handlers that write to the caller's scope.

use kestrel_eval::bridge::{
    AsAnything, AsArray, AsBoolean, AsCoercion, AsDefault, AsIs, AsParameter, AsText, Bridge,
};
use kestrel_eval::{
    CallableInterface, Coercion, EvalResult, Handler, HandlerKind, Mutability, Parameter,
    PrimitiveCall, Value,
};

use super::primitive;

/// `store(name, value, read_only = true)`
///
/// Assigns through [`kestrel_eval::Env::set`] in the caller's scope, so an
/// existing writable binding is updated where it lives.
fn store() -> Value {
    let read_only = AsDefault::new(AsBoolean, Value::boolean(true));
    let parameters = vec![
        Parameter::new("name", AsText.coercion()),
        Parameter::new("value", AsAnything.coercion()),
        Parameter::new("read_only", read_only.coercion()),
    ];
    primitive("store", parameters, Coercion::Anything, move |call| {
        let name = call.argument(0, &AsText)?;
        let value = call.argument(1, &AsAnything)?;
        let mutability = Mutability::from_read_only(call.argument(2, &read_only)?);
        tracing::debug!(%name, ?mutability, "store");
        call.caller_env().set(&name, value.clone(), mutability)?;
        Ok(value)
    })
}

struct DefineArguments {
    parameters: AsDefault<AsArray<AsParameter>>,
    returns: AsDefault<AsCoercion>,
    event: AsDefault<AsBoolean>,
}

impl DefineArguments {
    fn new() -> Self {
        DefineArguments {
            parameters: AsDefault::new(AsArray::new(AsParameter), Value::list(Vec::new())),
            returns: AsDefault::new(AsCoercion, Value::from(Coercion::Anything)),
            event: AsDefault::new(AsBoolean, Value::boolean(false)),
        }
    }

    fn interface(&self) -> Vec<Parameter> {
        vec![
            Parameter::new("name", AsText.coercion()),
            Parameter::new("parameters", self.parameters.coercion()),
            Parameter::new("returns", self.returns.coercion()),
            Parameter::new("body", AsIs.coercion()),
            Parameter::new("event", self.event.coercion()),
        ]
    }

    fn run(&self, call: &PrimitiveCall<'_>) -> EvalResult {
        let name = call.argument(0, &AsText)?;
        let parameters = call.argument(1, &self.parameters)?;
        let returns = call.argument(2, &self.returns)?;
        let body = call.argument(3, &AsIs)?;
        let kind = if call.argument(4, &self.event)? {
            HandlerKind::Event
        } else {
            HandlerKind::Command
        };

        let interface = CallableInterface::new(name.as_str(), parameters, returns);
        tracing::debug!(%interface, ?kind, "define");
        let handler = Value::handler(Handler::new(interface, body, kind));
        call.caller_env().add(&name, handler.clone())?;
        // Results are boxed in the library scope, so bind to the caller first.
        Coercion::Value.coerce(&handler, call.caller_env())
    }
}

/// `define(name, parameters = [], returns = anything, body, event = false)`
///
/// Binds a new read-only handler in the caller's scope; that scope becomes
/// the handler's defining scope.
fn define() -> Value {
    let arguments = DefineArguments::new();
    let parameters = arguments.interface();
    primitive("define", parameters, Coercion::Value, move |call| arguments.run(call))
}

pub(super) fn primitives() -> Vec<(&'static str, Value)> {
    vec![("store", store()), ("define", define())]
}
