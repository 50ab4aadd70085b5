use pretty_assertions::assert_eq;

use super::*;
use crate::errors::{EvalError, EvalErrorKind};
use crate::test_helpers::{arithmetic, cmd, ident, text};

#[test]
fn test_display_quotes_text_but_display_value_does_not() {
    let list = Value::list(vec![text("a b"), Value::Nothing]);

    assert_eq!(list.to_string(), r#"["a b", nothing]"#);
    assert_eq!(list.display_value(), "[a b, nothing]");
    assert_eq!(text("plain").display_value(), "plain");
}

#[test]
fn test_display_of_expressions() {
    let block = Value::block(vec![
        cmd("add", vec![text("1"), ident("n")]),
        ident("n"),
    ]);

    assert_eq!(block.to_string(), r#"{ add("1", n); n }"#);
    assert_eq!(Value::block(vec![]).to_string(), "{ }");
}

#[test]
fn test_number_uses_shortest_text() {
    assert_eq!(Value::number(4.0), text("4"));
    assert_eq!(Value::number(-3.0), text("-3"));
    assert_eq!(Value::number(3.1), text("3.1"));
}

#[test]
fn test_boolean_texts() {
    assert_eq!(Value::boolean(true).as_text(), Some(TRUE_TEXT));
    assert_eq!(Value::boolean(false).as_text(), Some(FALSE_TEXT));
}

#[test]
fn test_names_are_case_insensitive() {
    assert_eq!(ident("addOne"), ident("ADDONE"));
    assert_eq!(
        Value::command("Show", vec![text("x")]),
        Value::command("show", vec![text("x")])
    );
    assert_eq!(name_key("AddOne"), "addone");
}

#[test]
fn test_callables_compare_by_identity() {
    let add = arithmetic("add", |a, b| a + b);
    let other = arithmetic("add", |a, b| a + b);

    assert_eq!(add, add.clone());
    assert_ne!(add, other);
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Nothing.type_name(), "nothing");
    assert_eq!(Value::from(Coercion::Text).type_name(), "coercion");
    assert_eq!(arithmetic("add", |a, b| a + b).type_name(), "primitive handler");
}

#[test]
fn test_nothing_refuses_every_entry_point() {
    let env = Env::new();
    let coercion = Coercion::Text;
    let nothing = Value::Nothing;

    let errors = [
        nothing.to_any(&env, &coercion).map(|_| ()),
        nothing.to_text(&env, &coercion).map(|_| ()),
        nothing.to_list(&env, &coercion, &Coercion::Value).map(|_| ()),
        nothing
            .to_array(&env, &coercion, &crate::bridge::AsText)
            .map(|_| ()),
    ];
    for error in errors {
        assert!(matches!(
            error.map_err(|e| e.kind),
            Err(EvalErrorKind::NullCoercion { .. })
        ));
    }
}

#[test]
fn test_lists_never_demote_to_text() {
    let env = Env::new();

    for items in [vec![text("only")], vec![text("a"), text("b")], vec![]] {
        let list = Value::list(items);
        assert!(matches!(
            list.to_text(&env, &Coercion::Text).map_err(|e| e.kind),
            Err(EvalErrorKind::Coercion { .. })
        ));
    }
}

#[test]
fn test_to_any_converts_list_items_by_the_same_coercion() {
    let env = Env::new();
    let holey = Value::list(vec![text("a"), Value::Nothing]);

    let error = holey.to_any(&env, &Coercion::Value).unwrap_err();
    assert!(matches!(error.kind, EvalErrorKind::Coercion { .. }));
    assert!(error.cause().is_some_and(EvalError::is_null_coercion));

    assert_eq!(holey.to_any(&env, &Coercion::Anything), Ok(holey.clone()));
}

#[test]
fn test_to_any_binds_handlers_to_env() {
    let env = Env::new();
    let add = arithmetic("add", |a, b| a + b);

    let Ok(Value::Bound(bound)) = add.to_any(&env, &Coercion::Value) else {
        panic!("expected a bound handler");
    };
    assert!(bound.env().ptr_eq(&env));
    assert_eq!(bound.interface().name, "add");
}

#[test]
fn test_coercion_cannot_become_text() {
    let env = Env::new();
    let error = Value::from(Coercion::Text)
        .to_text(&env, &Coercion::Text)
        .map(|_| ());

    assert!(matches!(
        error.map_err(|e| e.kind),
        Err(EvalErrorKind::Coercion { .. })
    ));
}
