//! `if` and `show`.

use kestrel_eval::bridge::{AsAnything, AsBoolean, AsLazy, Bridge};
use kestrel_eval::{Coercion, Parameter, Value};

use super::primitive;
use crate::output::SharedOutput;

/// `if(test, action)`: `action` is only evaluated when `test` is true.
fn if_then() -> Value {
    let deferred = AsLazy::new(Coercion::Anything);
    let parameters = vec![
        Parameter::new("test", AsBoolean.coercion()),
        Parameter::new("action", deferred.coercion()),
    ];
    primitive("if", parameters, Coercion::Anything, move |call| {
        let test = call.argument(0, &AsBoolean)?;
        let action = call.argument(1, &deferred)?;
        if test {
            Coercion::Anything.coerce(&action, call.caller_env())
        } else {
            Ok(Value::Nothing)
        }
    })
}

fn show(output: &SharedOutput) -> Value {
    let output = SharedOutput::clone(output);
    let parameters = vec![Parameter::new("value", AsAnything.coercion())];
    primitive("show", parameters, Coercion::NoResult, move |call| {
        let value = call.argument(0, &AsAnything)?;
        output.write_line(&value.display_value());
        Ok(Value::Nothing)
    })
}

pub(super) fn primitives(output: &SharedOutput) -> Vec<(&'static str, Value)> {
    vec![("if", if_then()), ("show", show(output))]
}
