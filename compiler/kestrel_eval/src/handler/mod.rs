//! Callables and the calling convention.
//!
//! Every call runs the same pipeline:
//!
//! 1. create a child of the handler's defining scope;
//! 2. coerce each argument by its parameter's coercion, in the caller's
//!    scope, binding the result in the child (missing arguments are `nothing`);
//! 3. reject surplus arguments unless the handler is an event handler;
//! 4. evaluate the body in the child, coerced to the declared return
//!    (a primitive's native result is boxed in the handler's scope);
//! 5. coerce the result again to whatever the caller asked for.
//!
//! Failures in steps 1-4 are wrapped in `HandlerFailed` naming the handler and
//! the command; step 5 failures belong to the caller and propagate as is.
//! Bindings written before a failure stay written.

use std::fmt;

use crate::bridge::Bridge;
use crate::coercion::Coercion;
use crate::environment::Env;
use crate::errors::{bad_argument, handler_failed, unrecognized_argument, EvalError, EvalResult};
use crate::heap::Heap;
use crate::value::{Command, Value};

/// A declared parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub coercion: Coercion,
}

impl Parameter {
    pub fn new(name: impl Into<String>, coercion: Coercion) -> Self {
        Parameter {
            name: name.into(),
            coercion,
        }
    }
}

/// Name, parameters and return coercion of a callable.
#[derive(Clone, Debug, PartialEq)]
pub struct CallableInterface {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub returns: Coercion,
}

impl CallableInterface {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>, returns: Coercion) -> Self {
        CallableInterface {
            name: name.into(),
            parameters,
            returns,
        }
    }

    fn parameter_name(&self, index: usize) -> &str {
        self.parameters
            .get(index)
            .map_or("?", |parameter| parameter.name.as_str())
    }
}

impl fmt::Display for CallableInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", parameter.name, parameter.coercion)?;
        }
        write!(f, ") -> {}", self.returns)
    }
}

/// How a handler treats arguments beyond its parameter list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandlerKind {
    /// Surplus arguments are an error.
    #[default]
    Command,
    /// Surplus arguments are ignored.
    Event,
}

impl HandlerKind {
    fn check_surplus(self, interface: &CallableInterface, command: &Command) -> Result<(), EvalError> {
        let expected = interface.parameters.len();
        let got = command.arguments().len();
        if self == HandlerKind::Command && got > expected {
            return Err(unrecognized_argument(&interface.name, expected, got));
        }
        Ok(())
    }
}

/// A handler defined in the language, with a syntax-tree body.
pub struct Handler {
    interface: CallableInterface,
    body: Value,
    kind: HandlerKind,
}

impl Handler {
    pub fn new(interface: CallableInterface, body: Value, kind: HandlerKind) -> Self {
        Handler {
            interface,
            body,
            kind,
        }
    }

    pub fn interface(&self) -> &CallableInterface {
        &self.interface
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    #[tracing::instrument(level = "debug", skip_all, fields(handler = %self.interface.name))]
    fn call(
        &self,
        command: &Command,
        caller: &Env,
        handler_env: &Env,
        coercion: &Coercion,
    ) -> EvalResult {
        let result = self
            .run(command, caller, handler_env)
            .map_err(|cause| handler_failed(&self.interface.name, command).with_cause(cause))?;
        coercion.coerce(&result, caller)
    }

    fn run(&self, command: &Command, caller: &Env, handler_env: &Env) -> EvalResult {
        let scope = handler_env.child();
        let arguments = command.arguments();
        let nothing = Value::Nothing;
        for (index, parameter) in self.interface.parameters.iter().enumerate() {
            let argument = arguments.get(index).unwrap_or(&nothing);
            let value = parameter.coercion.coerce(argument, caller)?;
            scope.bind(&parameter.name, value);
        }
        self.kind.check_surplus(&self.interface, command)?;
        self.interface.returns.coerce(&self.body, &scope)
    }
}

/// Host function behind a [`PrimitiveHandler`].
pub type PrimitiveFn = Box<dyn Fn(&PrimitiveCall<'_>) -> EvalResult>;

/// A handler implemented in Rust.
pub struct PrimitiveHandler {
    interface: CallableInterface,
    kind: HandlerKind,
    function: PrimitiveFn,
}

impl PrimitiveHandler {
    pub fn new(
        interface: CallableInterface,
        kind: HandlerKind,
        function: impl Fn(&PrimitiveCall<'_>) -> EvalResult + 'static,
    ) -> Self {
        PrimitiveHandler {
            interface,
            kind,
            function: Box::new(function),
        }
    }

    pub fn interface(&self) -> &CallableInterface {
        &self.interface
    }

    #[tracing::instrument(level = "debug", skip_all, fields(primitive = %self.interface.name))]
    fn call(
        &self,
        command: &Command,
        caller: &Env,
        handler_env: &Env,
        coercion: &Coercion,
    ) -> EvalResult {
        let result = self
            .run(command, caller, handler_env)
            .map_err(|cause| handler_failed(&self.interface.name, command).with_cause(cause))?;
        coercion.coerce(&result, caller)
    }

    fn run(&self, command: &Command, caller: &Env, handler_env: &Env) -> EvalResult {
        // Arguments are unboxed lazily by the host function, so arity is
        // checked up front.
        self.kind.check_surplus(&self.interface, command)?;
        let call = PrimitiveCall {
            interface: &self.interface,
            command,
            caller,
            handler_env,
        };
        let result = (self.function)(&call)?;
        self.interface.returns.coerce(&result, handler_env)
    }
}

/// What a host function sees of the command invoking it.
pub struct PrimitiveCall<'a> {
    interface: &'a CallableInterface,
    command: &'a Command,
    caller: &'a Env,
    handler_env: &'a Env,
}

impl PrimitiveCall<'_> {
    /// Unbox argument `index` (or `nothing` if absent) through `bridge`.
    ///
    /// Failures are reported as a bad argument caused by the unboxing error.
    pub fn argument<B: Bridge>(&self, index: usize, bridge: &B) -> Result<B::Native, EvalError> {
        let nothing = Value::Nothing;
        let argument = self.command.arguments().get(index).unwrap_or(&nothing);
        bridge.unbox(argument, self.caller).map_err(|cause| {
            bad_argument(
                &self.interface.name,
                self.interface.parameter_name(index),
                index,
            )
            .with_cause(cause)
        })
    }

    /// Box a native result through `bridge`, in the handler's scope.
    pub fn result<B: Bridge>(&self, bridge: &B, native: B::Native) -> EvalResult {
        bridge.box_native(native, self.handler_env)
    }

    pub fn command(&self) -> &Command {
        self.command
    }

    /// The scope the command was evaluated in.
    pub fn caller_env(&self) -> &Env {
        self.caller
    }

    /// The scope the handler was found in.
    pub fn handler_env(&self) -> &Env {
        self.handler_env
    }
}

/// A callable together with the scope it was retrieved from.
pub struct BoundHandler {
    callable: Callable,
    env: Env,
}

impl BoundHandler {
    pub fn new(callable: Callable, env: Env) -> Self {
        BoundHandler { callable, env }
    }

    pub fn interface(&self) -> &CallableInterface {
        self.callable.interface()
    }

    pub fn env(&self) -> &Env {
        &self.env
    }
}

/// Any of the three callable kinds.
#[derive(Clone)]
pub enum Callable {
    Native(Heap<Handler>),
    Primitive(Heap<PrimitiveHandler>),
    Bound(Heap<BoundHandler>),
}

impl Callable {
    pub fn interface(&self) -> &CallableInterface {
        match self {
            Callable::Native(handler) => handler.interface(),
            Callable::Primitive(handler) => handler.interface(),
            Callable::Bound(bound) => bound.interface(),
        }
    }

    /// Run the calling convention for `command`.
    ///
    /// `caller` is where arguments are evaluated, `handler_env` where the
    /// callable was found. A bound handler ignores `handler_env` in favour of
    /// the scope it captured.
    pub fn call(
        &self,
        command: &Command,
        caller: &Env,
        handler_env: &Env,
        coercion: &Coercion,
    ) -> EvalResult {
        match self {
            Callable::Native(handler) => handler.call(command, caller, handler_env, coercion),
            Callable::Primitive(handler) => handler.call(command, caller, handler_env, coercion),
            Callable::Bound(bound) => bound.callable.call(command, caller, &bound.env, coercion),
        }
    }
}
