//! `Runtime`: a root scope with the library loaded, plus a global scope for
//! scripts.

use kestrel_eval::{Coercion, Env, EvalError, EvalResult, Value};

use crate::loader::load;
use crate::output::{stdout_output, SharedOutput};

/// Builder for [`Runtime`].
///
/// Defaults: output to stdout, standard library loaded, no extra bindings.
pub struct RuntimeBuilder {
    output: Option<SharedOutput>,
    stdlib: bool,
    bindings: Vec<(String, Value)>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        RuntimeBuilder {
            output: None,
            stdlib: true,
            bindings: Vec::new(),
        }
    }

    /// Send `show` output to `output`.
    #[must_use]
    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = Some(output);
        self
    }

    /// Whether to load the standard library into the root scope.
    #[must_use]
    pub fn stdlib(mut self, enabled: bool) -> Self {
        self.stdlib = enabled;
        self
    }

    /// Add a read-only root binding, e.g. an embedder's own primitive.
    #[must_use]
    pub fn binding(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.push((name.into(), value));
        self
    }

    /// Fails if a binding collides with the library or another binding.
    pub fn build(self) -> Result<Runtime, EvalError> {
        let output = self.output.unwrap_or_else(stdout_output);
        let root = Env::new();
        if self.stdlib {
            load(&root, &output)?;
        }
        for (name, value) in self.bindings {
            root.add(&name, value)?;
        }
        Ok(Runtime {
            globals: root.child(),
            root,
            output,
        })
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded evaluation context.
///
/// Scripts run in `globals`, a child of the read-only root, so their `store`s
/// never land among library bindings.
pub struct Runtime {
    root: Env,
    globals: Env,
    output: SharedOutput,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn root(&self) -> &Env {
        &self.root
    }

    pub fn globals(&self) -> &Env {
        &self.globals
    }

    pub fn output(&self) -> &SharedOutput {
        &self.output
    }

    /// Evaluate `value` in the global scope; `nothing` is an acceptable result.
    pub fn eval(&self, value: &Value) -> EvalResult {
        self.eval_as(value, &Coercion::Anything)
    }

    /// Evaluate `value` in the global scope under `coercion`.
    pub fn eval_as(&self, value: &Value, coercion: &Coercion) -> EvalResult {
        tracing::debug!(%value, %coercion, "eval");
        let result = coercion.coerce(value, &self.globals);
        if let Err(error) = &result {
            tracing::debug!(%error, "eval failed");
        }
        result
    }

    /// Run a sequence of top-level expressions, returning the last result.
    pub fn run(&self, script: Vec<Value>) -> EvalResult {
        self.eval(&Value::block(script))
    }
}
