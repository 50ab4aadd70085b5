//! Runtime values.
//!
//! `Value` is the closed set of things evaluation can produce or consume:
//! plain data (`nothing`, text, lists), the syntax-tree nodes a parser builds
//! (identifiers, commands, blocks), suspended conversions (thunks), coercions
//! and the three callable kinds.
//!
//! Values never change in place. Heap payloads are shared through [`Heap`],
//! so cloning a value is cheap regardless of its size.

mod convert;

use std::fmt;

use crate::coercion::Coercion;
use crate::environment::Env;
use crate::handler::{BoundHandler, Callable, Handler, PrimitiveHandler};
use crate::heap::Heap;

/// Canonical "true" text.
pub const TRUE_TEXT: &str = "ok";
/// Canonical "false" text.
pub const FALSE_TEXT: &str = "";

/// Fold a name to the key used for scope lookup.
///
/// Names are case-insensitive: `addOne` and `ADDONE` refer to one binding.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// The absence sentinel.
    Nothing,
    Text(Heap<String>),
    List(Heap<Vec<Value>>),
    Identifier(Heap<Identifier>),
    Command(Heap<Command>),
    Block(Heap<Block>),
    Thunk(Heap<Thunk>),
    Coercion(Coercion),
    Handler(Heap<Handler>),
    Primitive(Heap<PrimitiveHandler>),
    Bound(Heap<BoundHandler>),
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(Heap::new(text.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Text holding the shortest representation that parses back to `number`.
    pub fn number(number: f64) -> Self {
        Value::text(number.to_string())
    }

    pub fn boolean(flag: bool) -> Self {
        Value::text(if flag { TRUE_TEXT } else { FALSE_TEXT })
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Value::Identifier(Heap::new(Identifier::new(name)))
    }

    pub fn command(name: impl Into<String>, arguments: Vec<Value>) -> Self {
        Value::Command(Heap::new(Command::new(name, arguments)))
    }

    pub fn block(body: Vec<Value>) -> Self {
        Value::Block(Heap::new(Block { body }))
    }

    pub fn thunk(value: Value, env: Env, coercion: Coercion) -> Self {
        Value::Thunk(Heap::new(Thunk {
            value,
            env,
            coercion,
        }))
    }

    pub fn handler(handler: Handler) -> Self {
        Value::Handler(Heap::new(handler))
    }

    pub fn primitive(handler: PrimitiveHandler) -> Self {
        Value::Primitive(Heap::new(handler))
    }

    /// Pair a callable with the environment it was retrieved from.
    pub fn bound(callable: Callable, env: Env) -> Self {
        Value::Bound(Heap::new(BoundHandler::new(callable, env)))
    }

    #[inline]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// The text payload, for text values only.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The callable behind a handler value, if this is one.
    pub fn callable(&self) -> Option<Callable> {
        match self {
            Value::Handler(handler) => Some(Callable::Native(handler.clone())),
            Value::Primitive(handler) => Some(Callable::Primitive(handler.clone())),
            Value::Bound(bound) => Some(Callable::Bound(bound.clone())),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nothing => "nothing",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Identifier(_) => "identifier",
            Value::Command(_) => "command",
            Value::Block(_) => "block",
            Value::Thunk(_) => "thunk",
            Value::Coercion(_) => "coercion",
            Value::Handler(_) => "handler",
            Value::Primitive(_) => "primitive handler",
            Value::Bound(_) => "bound handler",
        }
    }

    /// User-facing rendering: text without quotes, everything else as written.
    pub fn display_value(&self) -> String {
        match self {
            Value::Text(text) => text.to_string(),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::display_value).collect();
                format!("[{}]", parts.join(", "))
            }
            other => other.to_string(),
        }
    }
}

impl From<Coercion> for Value {
    fn from(coercion: Coercion) -> Self {
        Value::Coercion(coercion)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Identifier(a), Value::Identifier(b)) => a.key == b.key,
            (Value::Command(a), Value::Command(b)) => {
                a.key == b.key && a.arguments == b.arguments
            }
            (Value::Block(a), Value::Block(b)) => a.body == b.body,
            (Value::Coercion(a), Value::Coercion(b)) => a == b,
            // Anything carrying an environment compares by identity.
            (Value::Thunk(a), Value::Thunk(b)) => Heap::ptr_eq(a, b),
            (Value::Handler(a), Value::Handler(b)) => Heap::ptr_eq(a, b),
            (Value::Primitive(a), Value::Primitive(b)) => Heap::ptr_eq(a, b),
            (Value::Bound(a), Value::Bound(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => f.write_str("nothing"),
            Value::Text(text) => write!(f, "{:?}", text.as_str()),
            Value::List(items) => {
                f.write_str("[")?;
                write_separated(f, items)?;
                f.write_str("]")
            }
            Value::Identifier(identifier) => f.write_str(&identifier.name),
            Value::Command(command) => write!(f, "{command}"),
            Value::Block(block) => {
                f.write_str("{")?;
                for (index, item) in block.body.iter().enumerate() {
                    let separator = if index == 0 { " " } else { "; " };
                    write!(f, "{separator}{item}")?;
                }
                f.write_str(" }")
            }
            Value::Thunk(thunk) => write!(f, "lazy({} as {})", thunk.value, thunk.coercion),
            Value::Coercion(coercion) => write!(f, "{coercion}"),
            Value::Handler(handler) => write!(f, "handler {}", handler.interface()),
            Value::Primitive(handler) => write!(f, "primitive {}", handler.interface()),
            Value::Bound(bound) => write!(f, "bound {}", bound.interface()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "Text({:?})", text.as_str()),
            Value::List(items) => f.debug_tuple("List").field(&**items).finish(),
            other => write!(f, "{}({other})", variant_name(other)),
        }
    }
}

fn variant_name(value: &Value) -> &'static str {
    match value {
        Value::Nothing => "Nothing",
        Value::Text(_) => "Text",
        Value::List(_) => "List",
        Value::Identifier(_) => "Identifier",
        Value::Command(_) => "Command",
        Value::Block(_) => "Block",
        Value::Thunk(_) => "Thunk",
        Value::Coercion(_) => "Coercion",
        Value::Handler(_) => "Handler",
        Value::Primitive(_) => "Primitive",
        Value::Bound(_) => "Bound",
    }
}

fn write_separated(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A name reference, resolved through the scope chain when evaluated.
#[derive(Clone, Debug)]
pub struct Identifier {
    pub name: String,
    key: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = name_key(&name);
        Identifier { name, key }
    }

    /// Case-folded lookup key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// A call of a named handler with unevaluated arguments.
#[derive(Clone, Debug)]
pub struct Command {
    pub name: String,
    key: String,
    arguments: Vec<Value>,
}

impl Command {
    pub fn new(name: impl Into<String>, arguments: Vec<Value>) -> Self {
        let name = name.into();
        let key = name_key(&name);
        Command {
            name,
            key,
            arguments,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_separated(f, &self.arguments)?;
        f.write_str(")")
    }
}

/// A sequence of expressions; the last one's result is the block's result.
#[derive(Clone, Debug)]
pub struct Block {
    pub body: Vec<Value>,
}

/// A suspended conversion of `value` by `coercion` within `env`.
///
/// Forcing is not memoized: every force re-runs the stored coercion.
pub struct Thunk {
    pub value: Value,
    pub env: Env,
    pub coercion: Coercion,
}

#[cfg(test)]
mod tests;
