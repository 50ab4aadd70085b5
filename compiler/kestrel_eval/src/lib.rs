//! Kestrel Eval - the coercion-driven evaluator core.
//!
//! Type checking, value conversion and host-function boxing are one
//! mechanism here: a [`Coercion`]. Evaluating anything means asking a value
//! to convert itself by some coercion, and expression values (identifiers,
//! commands, blocks, thunks) answer by evaluating.
//!
//! # Architecture
//!
//! - [`Value`]: the closed set of runtime values and their conversion entry points
//! - [`Coercion`]: type descriptors, themselves values
//! - [`Bridge`]: coercions with a native Rust representation, for primitives
//! - [`Env`]: shared lexical scopes with per-binding mutability
//! - [`Callable`]: language handlers, primitive handlers and closures, all
//!   called through one convention
//! - [`EvalError`]: chained errors; handler calls wrap their failures

pub mod bridge;
mod coercion;
mod environment;
pub mod errors;
mod exec;
mod handler;
mod heap;
pub mod stack;
mod value;

#[cfg(test)]
mod test_helpers;

pub use bridge::Bridge;
pub use coercion::Coercion;
pub use environment::{Env, Mutability, Slot};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use handler::{
    BoundHandler, Callable, CallableInterface, Handler, HandlerKind, Parameter, PrimitiveCall,
    PrimitiveFn, PrimitiveHandler,
};
pub use heap::Heap;
pub use value::{name_key, Block, Command, Identifier, Thunk, Value, FALSE_TEXT, TRUE_TEXT};
