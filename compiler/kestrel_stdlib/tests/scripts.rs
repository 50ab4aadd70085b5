//! End-to-end scripts against a runtime with the standard library loaded.

use kestrel_eval::{Coercion, EvalErrorKind, Value};
use kestrel_stdlib::{buffer_output, init_tracing, Runtime};
use pretty_assertions::assert_eq;

fn text(text: &str) -> Value {
    Value::text(text)
}

fn ident(name: &str) -> Value {
    Value::identifier(name)
}

fn cmd(name: &str, arguments: Vec<Value>) -> Value {
    Value::command(name, arguments)
}

fn list(items: Vec<Value>) -> Value {
    Value::list(items)
}

fn runtime() -> Runtime {
    init_tracing();
    Runtime::builder().output(buffer_output()).build().unwrap()
}

/// `define(name, [[param, coercion]...], returns, body)`
fn define(name: &str, parameters: Vec<(&str, &str)>, returns: &str, body: Value) -> Value {
    let parameters = parameters
        .into_iter()
        .map(|(name, coercion)| list(vec![text(name), ident(coercion)]))
        .collect();
    cmd(
        "define",
        vec![text(name), list(parameters), ident(returns), body],
    )
}

#[test]
fn test_add_one() {
    let runtime = runtime();
    runtime
        .eval(&define(
            "addOne",
            vec![("n", "text")],
            "text",
            cmd("add", vec![text("1"), ident("n")]),
        ))
        .unwrap();

    assert_eq!(runtime.eval(&cmd("addOne", vec![text("3")])), Ok(text("4")));

    let error = runtime
        .eval(&cmd("addone", vec![ident("nothing")]))
        .unwrap_err();
    assert!(matches!(
        &error.kind,
        EvalErrorKind::HandlerFailed { handler, .. } if handler == "addOne"
    ));
    assert!(error.cause().is_some_and(|cause| cause.is_null_coercion()));
}

#[test]
fn test_list_with_default_items() {
    let runtime = runtime();
    let greeting = Coercion::list(Coercion::default(Coercion::Text, text("stranger")));

    assert_eq!(
        runtime.eval_as(&list(vec![text("Hello"), ident("nothing")]), &greeting),
        Ok(list(vec![text("Hello"), text("stranger")]))
    );
}

#[test]
fn test_nested_arithmetic() {
    let runtime = runtime();
    let tree = cmd(
        "subtract",
        vec![cmd("add", vec![text("1"), text("2")]), text("6")],
    );

    assert_eq!(runtime.eval(&tree), Ok(text("-3")));
    assert_eq!(
        runtime.eval(&cmd("divide", vec![text("1"), text("4")])),
        Ok(text("0.25"))
    );
}

#[test]
fn test_divide_by_zero_reports_chain() {
    let runtime = runtime();

    let error = runtime
        .eval(&cmd("divide", vec![text("1"), text("0")]))
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "handler `divide` failed on divide(\"1\", \"0\")\n↳ can't divide by zero"
    );
}

#[test]
fn test_store_in_nested_handler_updates_outer_binding() {
    let runtime = runtime();
    runtime
        .run(vec![
            cmd("store", vec![text("count"), text("1"), ident("false")]),
            define(
                "bump",
                vec![],
                "anything",
                cmd(
                    "store",
                    vec![
                        text("count"),
                        cmd("add", vec![ident("count"), text("1")]),
                        ident("false"),
                    ],
                ),
            ),
            cmd("bump", vec![]),
            cmd("bump", vec![]),
        ])
        .unwrap();

    assert_eq!(runtime.eval(&ident("count")), Ok(text("3")));
}

#[test]
fn test_store_defaults_to_read_only() {
    let runtime = runtime();
    runtime
        .eval(&cmd("store", vec![text("answer"), text("42")]))
        .unwrap();

    let error = runtime
        .eval(&cmd("store", vec![text("answer"), text("43")]))
        .unwrap_err();
    assert_eq!(
        error.root_cause().kind,
        EvalErrorKind::ReadOnlyValue {
            name: "answer".to_owned()
        }
    );
    assert_eq!(runtime.eval(&ident("answer")), Ok(text("42")));
}

#[test]
fn test_store_updates_parameter_shadowing_library_name() {
    let runtime = runtime();
    runtime
        .eval(&define(
            "shout",
            vec![("text", "text")],
            "text",
            Value::block(vec![
                cmd(
                    "store",
                    vec![
                        text("text"),
                        cmd("join", vec![ident("text"), text("!")]),
                        ident("false"),
                    ],
                ),
                ident("text"),
            ]),
        ))
        .unwrap();

    assert_eq!(runtime.eval(&cmd("shout", vec![text("hey")])), Ok(text("hey!")));
    assert_eq!(
        runtime.eval(&ident("text")),
        Ok(Value::from(Coercion::Text))
    );
}

#[test]
fn test_library_names_cannot_be_reassigned() {
    let runtime = runtime();

    for name in ["pi", "show", "text"] {
        let result = runtime.eval(&cmd("store", vec![text(name), text("0"), ident("false")]));
        assert!(result.is_err(), "{name}");
    }
    let redefine = define("add", vec![], "anything", text("no"));
    assert!(runtime.eval(&redefine).is_err());
}

#[test]
fn test_stored_handler_keeps_its_scope() {
    let runtime = runtime();
    let make = define(
        "make",
        vec![("suffix", "text")],
        "anything",
        Value::block(vec![
            define(
                "inner",
                vec![("word", "text")],
                "text",
                cmd("join", vec![ident("word"), ident("suffix")]),
            ),
            cmd("store", vec![text("shout"), ident("inner"), ident("false")]),
        ]),
    );
    runtime
        .run(vec![
            cmd("store", vec![text("shout"), ident("nothing"), ident("false")]),
            make,
            cmd("make", vec![text("?")]),
            cmd("store", vec![text("suffix"), text(".")]),
        ])
        .unwrap();

    // `shout` is called from the global scope, where `suffix` is ".", but it
    // resolves `suffix` in the scope `inner` was defined in.
    assert_eq!(
        runtime.eval(&cmd("shout", vec![text("hey")])),
        Ok(text("hey?"))
    );
    assert!(runtime.eval(&cmd("inner", vec![text("hey")])).is_err());
}

#[test]
fn test_show_writes_display_value() {
    let runtime = runtime();
    runtime
        .run(vec![
            cmd("show", vec![text("hello")]),
            cmd("show", vec![list(vec![text("a"), cmd("add", vec![text("2"), text("2")])])]),
            cmd("show", vec![ident("nothing")]),
        ])
        .unwrap();

    assert_eq!(runtime.output().captured(), "hello\n[a, 4]\nnothing\n");
}

#[test]
fn test_if_only_evaluates_action_when_true() {
    let runtime = runtime();
    runtime
        .run(vec![
            cmd("if", vec![ident("false"), cmd("show", vec![text("skipped")])]),
            cmd(
                "if",
                vec![
                    cmd("is_equal", vec![text("a"), text("a")]),
                    cmd("show", vec![text("shown")]),
                ],
            ),
        ])
        .unwrap();

    assert_eq!(runtime.output().captured(), "shown\n");
}

#[test]
fn test_event_handlers_ignore_surplus_arguments() {
    let runtime = runtime();
    runtime
        .run(vec![
            cmd(
                "define",
                vec![
                    text("on_click"),
                    list(vec![text("x")]),
                    ident("anything"),
                    ident("x"),
                    ident("true"),
                ],
            ),
            define("strict", vec![("x", "value")], "anything", ident("x")),
        ])
        .unwrap();

    assert_eq!(
        runtime.eval(&cmd("on_click", vec![text("1"), text("2")])),
        Ok(text("1"))
    );
    let error = runtime
        .eval(&cmd("strict", vec![text("1"), text("2")]))
        .unwrap_err();
    assert!(matches!(
        error.cause().map(|cause| &cause.kind),
        Some(EvalErrorKind::UnrecognizedArgument { expected: 1, got: 2, .. })
    ));
}

#[test]
fn test_lazy_parameter_in_defined_handler() {
    let runtime = runtime();
    runtime
        .run(vec![
            define(
                "unless",
                vec![("test", "boolean"), ("action", "lazy")],
                "anything",
                cmd(
                    "if",
                    vec![cmd("is_equal", vec![ident("test"), ident("false")]), ident("action")],
                ),
            ),
            cmd("unless", vec![ident("true"), cmd("show", vec![text("no")])]),
            cmd("unless", vec![ident("false"), cmd("show", vec![text("yes")])]),
        ])
        .unwrap();

    assert_eq!(runtime.output().captured(), "yes\n");
}

#[test]
fn test_number_text_round_trip() {
    let runtime = runtime();

    assert_eq!(runtime.eval_as(&text("3.1"), &Coercion::Number), Ok(text("3.1")));
    assert!(runtime.eval_as(&text("foo"), &Coercion::Number).is_err());
    assert_eq!(
        runtime.eval(&cmd("multiply", vec![text("3.1"), text("1")])),
        Ok(text("3.1"))
    );
}
