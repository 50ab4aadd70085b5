use std::error::Error as _;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_display_renders_whole_chain() {
    let error = handler_failed("addOne", &Command::new("addOne", vec![Value::Nothing]))
        .with_cause(null_coercion(&Coercion::Text));

    assert_eq!(
        error.to_string(),
        "handler `addOne` failed on addOne(nothing)\n↳ can't coerce nothing to text"
    );
}

#[test]
fn test_root_cause_walks_to_innermost() {
    let error = handler_failed("outer", &Command::new("outer", vec![]))
        .with_cause(
            handler_failed("inner", &Command::new("inner", vec![]))
                .with_cause(value_not_found("x")),
        );

    assert_eq!(error.chain().count(), 3);
    assert_eq!(
        error.root_cause().kind,
        EvalErrorKind::ValueNotFound {
            name: "x".to_owned()
        }
    );
}

#[test]
fn test_null_coercion_checks_outer_kind_only() {
    let bare = null_coercion(&Coercion::Value);
    assert!(bare.is_null_coercion());

    let wrapped = coercion_error(&Value::list(vec![]), &Coercion::Value).with_cause(bare);
    assert!(!wrapped.is_null_coercion());
    assert!(wrapped.root_cause().is_null_coercion());
}

#[test]
fn test_source_exposes_cause() {
    let error = bad_argument("add", "a", 0).with_cause(primitive_failed("boom"));

    let source = error.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("boom"));
    assert!(primitive_failed("leaf").source().is_none());
}

#[test]
fn test_unrecognized_argument_message() {
    assert_eq!(
        unrecognized_argument("show", 1, 3).to_string(),
        "handler `show` takes 1 argument(s) but was given 3"
    );
}
