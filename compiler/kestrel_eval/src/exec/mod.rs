//! Evaluation of expression values.
//!
//! Identifiers, commands, blocks and thunks have no fixed form of their own;
//! asked for a conversion they evaluate and pass the requested coercion on.

use crate::coercion::Coercion;
use crate::environment::Env;
use crate::errors::{handler_not_found, value_not_found, EvalResult};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Block, Command, Identifier, Thunk, Value};

impl Value {
    /// Evaluate an expression value under `coercion`.
    ///
    /// Non-expression values come back unchanged.
    pub(crate) fn evaluate(&self, env: &Env, coercion: &Coercion) -> EvalResult {
        match self {
            Value::Identifier(identifier) => identifier.evaluate(env, coercion),
            Value::Command(command) => command.evaluate(env, coercion),
            Value::Block(block) => block.evaluate(env, coercion),
            Value::Thunk(thunk) => thunk.force(env, coercion),
            _ => Ok(self.clone()),
        }
    }
}

impl Identifier {
    /// Coerce the bound value within the frame that binds it.
    ///
    /// Resolving in the defining frame rather than `env` is what makes a
    /// handler read through a closure see its own scope.
    fn evaluate(&self, env: &Env, coercion: &Coercion) -> EvalResult {
        let (slot, scope) = env
            .find(self.key())
            .ok_or_else(|| value_not_found(&self.name))?;
        coercion.coerce(&slot.value, &scope)
    }
}

impl Command {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(command = %self.name, arguments = self.arguments().len())
    )]
    fn evaluate(&self, env: &Env, coercion: &Coercion) -> EvalResult {
        ensure_sufficient_stack(|| {
            let (slot, handler_env) = env
                .find(self.key())
                .ok_or_else(|| handler_not_found(&self.name))?;
            let callable = slot
                .value
                .callable()
                .ok_or_else(|| handler_not_found(&self.name))?;
            callable.call(self, env, &handler_env, coercion)
        })
    }
}

impl Block {
    fn evaluate(&self, env: &Env, coercion: &Coercion) -> EvalResult {
        let mut result = Value::Nothing;
        for expression in &self.body {
            result = Coercion::Anything.coerce(expression, env)?;
        }
        coercion.coerce(&result, env)
    }
}

impl Thunk {
    /// Apply the stored coercion in the stored scope, then `coercion` here.
    fn force(&self, env: &Env, coercion: &Coercion) -> EvalResult {
        tracing::trace!(value = %self.value, stored = %self.coercion, requested = %coercion, "forcing thunk");
        let forced = self.coercion.coerce(&self.value, &self.env)?;
        coercion.coerce(&forced, env)
    }
}
