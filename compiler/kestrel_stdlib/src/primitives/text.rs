//! Text handlers.

use kestrel_eval::bridge::{AsBoolean, AsText, Bridge};
use kestrel_eval::{Parameter, Value};

use super::primitive;

fn text_pair() -> Vec<Parameter> {
    vec![
        Parameter::new("a", AsText.coercion()),
        Parameter::new("b", AsText.coercion()),
    ]
}

pub(super) fn primitives() -> Vec<(&'static str, Value)> {
    let join = primitive("join", text_pair(), AsText.coercion(), |call| {
        let mut joined = call.argument(0, &AsText)?;
        joined.push_str(&call.argument(1, &AsText)?);
        call.result(&AsText, joined)
    });
    let is_equal = primitive("is_equal", text_pair(), AsBoolean.coercion(), |call| {
        let a = call.argument(0, &AsText)?;
        let b = call.argument(1, &AsText)?;
        call.result(&AsBoolean, a == b)
    });
    vec![("join", join), ("is_equal", is_equal)]
}
