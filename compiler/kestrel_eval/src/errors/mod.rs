//! Evaluation errors.
//!
//! Every failure the evaluator can raise is an [`EvalError`]: a kind plus an
//! optional chained cause. Handler calls wrap whatever went wrong inside them,
//! so the outermost error reads as a trail from the failing command down to
//! the root cause.
//!
//! Constructors are free functions marked `#[cold]`; the error path should
//! never be inlined into the hot evaluation loop.

use std::fmt;

use crate::coercion::Coercion;
use crate::value::{Command, Value};

/// Result of evaluating or coercing a value.
pub type EvalResult = Result<Value, EvalError>;

/// What went wrong.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    /// A value could not be converted by a coercion.
    Coercion { value: Value, coercion: Coercion },
    /// `nothing` reached a coercion that does not accept it.
    ///
    /// Only `Default` and `Optional` coercions recover from this kind.
    NullCoercion { coercion: Coercion },
    /// No binding with this name exists anywhere in the scope chain.
    ValueNotFound { name: String },
    /// The write targets a read-only binding.
    ReadOnlyValue { name: String },
    /// A command named something that is missing or not callable.
    HandlerNotFound { name: String },
    /// A handler failed while binding arguments or running its body.
    HandlerFailed { handler: String, command: String },
    /// A primitive handler could not unbox one of its arguments.
    BadArgument {
        handler: String,
        parameter: String,
        index: usize,
    },
    /// A command handler received more arguments than it declares.
    UnrecognizedArgument {
        handler: String,
        expected: usize,
        got: usize,
    },
    /// A host function reported a failure of its own.
    Primitive { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::Coercion { value, coercion } => {
                write!(f, "can't coerce {value} to {coercion}")
            }
            EvalErrorKind::NullCoercion { coercion } => {
                write!(f, "can't coerce nothing to {coercion}")
            }
            EvalErrorKind::ValueNotFound { name } => write!(f, "can't find a value named `{name}`"),
            EvalErrorKind::ReadOnlyValue { name } => {
                write!(f, "can't replace read-only value `{name}`")
            }
            EvalErrorKind::HandlerNotFound { name } => {
                write!(f, "can't find a handler named `{name}`")
            }
            EvalErrorKind::HandlerFailed { handler, command } => {
                write!(f, "handler `{handler}` failed on {command}")
            }
            EvalErrorKind::BadArgument {
                handler,
                parameter,
                index,
            } => write!(
                f,
                "handler `{handler}` got a bad value for `{parameter}` (argument {index})"
            ),
            EvalErrorKind::UnrecognizedArgument {
                handler,
                expected,
                got,
            } => write!(
                f,
                "handler `{handler}` takes {expected} argument(s) but was given {got}"
            ),
            EvalErrorKind::Primitive { message } => f.write_str(message),
        }
    }
}

/// An evaluation failure with its chain of causes.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// The failure at this level.
    pub kind: EvalErrorKind,
    cause: Option<Box<EvalError>>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, cause: None }
    }

    /// Attach the error this one was raised in response to.
    #[must_use]
    pub fn with_cause(mut self, cause: EvalError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// The directly wrapped error, if any.
    pub fn cause(&self) -> Option<&EvalError> {
        self.cause.as_deref()
    }

    /// This error followed by each of its causes, outermost first.
    pub fn chain(&self) -> impl Iterator<Item = &EvalError> {
        std::iter::successors(Some(self), |error| error.cause())
    }

    /// The innermost error of the chain.
    pub fn root_cause(&self) -> &EvalError {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Whether this error (not its causes) is a null coercion.
    ///
    /// Recovery looks at the outermost kind only: a `nothing` buried inside a
    /// failed handler call or a list element is not recoverable from outside.
    #[inline]
    pub fn is_null_coercion(&self) -> bool {
        matches!(self.kind, EvalErrorKind::NullCoercion { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for cause in self.chain().skip(1) {
            write!(f, "\n↳ {}", cause.kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

#[cold]
pub fn coercion_error(value: &Value, coercion: &Coercion) -> EvalError {
    EvalError::new(EvalErrorKind::Coercion {
        value: value.clone(),
        coercion: coercion.clone(),
    })
}

#[cold]
pub fn null_coercion(coercion: &Coercion) -> EvalError {
    EvalError::new(EvalErrorKind::NullCoercion {
        coercion: coercion.clone(),
    })
}

#[cold]
pub fn value_not_found(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::ValueNotFound {
        name: name.to_owned(),
    })
}

#[cold]
pub fn read_only_value(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::ReadOnlyValue {
        name: name.to_owned(),
    })
}

#[cold]
pub fn handler_not_found(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::HandlerNotFound {
        name: name.to_owned(),
    })
}

#[cold]
pub fn handler_failed(handler: &str, command: &Command) -> EvalError {
    EvalError::new(EvalErrorKind::HandlerFailed {
        handler: handler.to_owned(),
        command: command.to_string(),
    })
}

#[cold]
pub fn bad_argument(handler: &str, parameter: &str, index: usize) -> EvalError {
    EvalError::new(EvalErrorKind::BadArgument {
        handler: handler.to_owned(),
        parameter: parameter.to_owned(),
        index,
    })
}

#[cold]
pub fn unrecognized_argument(handler: &str, expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::UnrecognizedArgument {
        handler: handler.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn primitive_failed(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Primitive {
        message: message.into(),
    })
}

#[cfg(test)]
mod tests;
