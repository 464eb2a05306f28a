use crate::examples::operations::{operations_parser, OpValue};

fn op(name: &str, args: Vec<OpValue>) -> OpValue {
    OpValue::Operation {
        name: name.to_string(),
        args,
    }
}

fn text(value: &str) -> OpValue {
    OpValue::Text(value.to_string())
}

#[test]
fn a_single_call_builds_an_operation() {
    let mut parser = operations_parser().unwrap();
    assert!(parser.parse("e(x,y)").unwrap());
    assert_eq!(
        parser.return_value(),
        Some(&op("e", vec![text("x"), text("y")]))
    );
}

#[test]
fn nested_calls_build_nested_operations() {
    let mut parser = operations_parser().unwrap();
    assert!(parser.parse("a(e(0,1),e(x,y),e(0,0))").unwrap());

    let expected = op(
        "a",
        vec![
            op("e", vec![text("0"), text("1")]),
            op("e", vec![text("x"), text("y")]),
            op("e", vec![text("0"), text("0")]),
        ],
    );
    assert_eq!(parser.return_value(), Some(&expected));
}

#[test]
fn argument_lists_may_mix_calls_and_items() {
    let mut parser = operations_parser().unwrap();
    assert!(parser.parse("o(x,e(0,1),z)").unwrap());
    assert_eq!(
        parser.return_value(),
        Some(&op(
            "o",
            vec![text("x"), op("e", vec![text("0"), text("1")]), text("z")]
        ))
    );
}

#[test]
fn malformed_calls_are_rejected() {
    let mut parser = operations_parser().unwrap();
    assert_eq!(parser.parse("a(").unwrap(), false);
    assert_eq!(parser.parse("a()").unwrap(), false);
    assert_eq!(parser.parse("e(x,)").unwrap(), false);
    assert_eq!(parser.parse("e(x,y))").unwrap(), false);
}
