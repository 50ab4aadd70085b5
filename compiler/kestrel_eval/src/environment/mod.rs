//! Lexical scopes.
//!
//! An [`Env`] is a handle to one frame of bindings plus a link to its parent.
//! Frames are shared: every handler invocation, closure and thunk created in a
//! scope keeps that scope alive, and a write through any handle is visible
//! through all of them.
//!
//! Mutability is per binding. Library bindings are read-only and cannot be
//! reassigned or masked; `store` bindings default to read-only as well but may
//! be created writable.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::errors::{read_only_value, value_not_found, EvalError};
use crate::value::{name_key, Value};

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    Writable,
    ReadOnly,
}

impl Mutability {
    #[inline]
    pub fn is_read_only(self) -> bool {
        matches!(self, Mutability::ReadOnly)
    }

    /// `ReadOnly` when `read_only` is set.
    #[inline]
    pub fn from_read_only(read_only: bool) -> Self {
        if read_only {
            Mutability::ReadOnly
        } else {
            Mutability::Writable
        }
    }
}

/// A binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub mutability: Mutability,
    pub value: Value,
}

struct Frame {
    slots: FxHashMap<String, Slot>,
    parent: Option<Env>,
}

/// Shared handle to a scope frame.
#[derive(Clone)]
#[repr(transparent)]
pub struct Env(Rc<RefCell<Frame>>);

impl Env {
    /// A new root scope.
    pub fn new() -> Self {
        Env::with_parent(None)
    }

    fn with_parent(parent: Option<Env>) -> Self {
        Env(Rc::new(RefCell::new(Frame {
            slots: FxHashMap::default(),
            parent,
        })))
    }

    /// A new empty scope whose lookups fall back to `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Env::with_parent(Some(self.clone()))
    }

    pub fn parent(&self) -> Option<Env> {
        self.0.borrow().parent.clone()
    }

    /// Whether both handles refer to the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of frames above this one.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// This frame followed by each enclosing frame up to the root.
    fn ancestors(&self) -> impl Iterator<Item = Env> {
        std::iter::successors(Some(self.clone()), Env::parent)
    }

    fn lookup_local(&self, key: &str) -> Option<Slot> {
        self.0.borrow().slots.get(key).cloned()
    }

    /// The nearest binding of `name` and the frame that holds it.
    pub fn find(&self, name: &str) -> Option<(Slot, Env)> {
        let key = name_key(name);
        self.ancestors()
            .find_map(|frame| frame.lookup_local(&key).map(|slot| (slot, frame)))
    }

    /// The value of the nearest binding of `name`.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        self.find(name)
            .map(|(slot, _)| slot.value)
            .ok_or_else(|| value_not_found(name))
    }

    /// Whether some frame in the chain binds `key` read-only.
    fn read_only_in_chain(&self, key: &str) -> bool {
        self.ancestors().any(|frame| {
            frame
                .lookup_local(key)
                .is_some_and(|slot| slot.mutability.is_read_only())
        })
    }

    /// Assign `name`.
    ///
    /// The nearest binding is replaced in the frame that holds it; otherwise a
    /// new binding is created here. Fails, changing nothing, when the nearest
    /// binding is read-only. A shadowed read-only binding further out is not
    /// consulted, and `set` never creates a binding that masks one.
    pub fn set(&self, name: &str, value: Value, mutability: Mutability) -> Result<(), EvalError> {
        let target = match self.find(name) {
            Some((slot, _)) if slot.mutability.is_read_only() => {
                return Err(read_only_value(name));
            }
            Some((_, frame)) => frame,
            None => self.clone(),
        };
        tracing::trace!(name, depth = target.depth(), "set");
        let key = name_key(name);
        target.insert(key, Slot { mutability, value });
        Ok(())
    }

    /// Register a permanent, read-only binding in this frame.
    ///
    /// Used by library loaders. Fails when this frame already binds `name`, or
    /// when an enclosing frame binds it read-only: read-only bindings cannot be
    /// masked through either `add` or `set`.
    pub fn add(&self, name: &str, value: Value) -> Result<(), EvalError> {
        let key = name_key(name);
        if self.lookup_local(&key).is_some() || self.read_only_in_chain(&key) {
            return Err(read_only_value(name));
        }
        self.insert(
            key,
            Slot {
                mutability: Mutability::ReadOnly,
                value,
            },
        );
        Ok(())
    }

    /// Bind a handler parameter in this (fresh) frame.
    ///
    /// Parameters are declarations, not assignments, so they may shadow any
    /// outer binding.
    pub(crate) fn bind(&self, name: &str, value: Value) {
        self.insert(
            name_key(name),
            Slot {
                mutability: Mutability::Writable,
                value,
            },
        );
    }

    fn insert(&self, key: String, slot: Slot) {
        self.0.borrow_mut().slots.insert(key, slot);
    }

    /// Names bound in this frame, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().slots.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl Default for Env {
    fn default() -> Self {
        Env::new()
    }
}

impl fmt::Debug for Env {
    // Frames can be reachable from their own bindings (closures), so only
    // the local names are shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("depth", &self.depth())
            .field("names", &self.local_names())
            .finish()
    }
}
