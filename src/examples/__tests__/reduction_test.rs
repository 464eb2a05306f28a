//! Semantic reduction straight into `serde_json::Value`.
use crate::grammar::{Grammar, Production, Reduce, Symbol};
use crate::{CharStream, RecursiveDescentParser, ReduceError, ValueImpl};
use serde_json::{json, Value};
use std::rc::Rc;

impl ValueImpl for Value {
    fn lexeme(lexeme: &str) -> Self {
        Value::String(lexeme.to_string())
    }
}

/// ```text
/// list  : '[' items ']'
/// items : digit ',' items | digit
/// ```
fn list_parser() -> RecursiveDescentParser<Value> {
    let mut grammar = Grammar::new();
    let list = grammar.non_terminal("list").unwrap();
    let items = grammar.non_terminal("items").unwrap();

    grammar
        .define(
            list,
            vec![Production::seq(vec![
                Symbol::terminal("["),
                items.into(),
                Symbol::terminal("]"),
            ])
            .reduce(Reduce::with_args(
                |mut args| {
                    args.pop().ok_or_else(|| {
                        ReduceError::new("A list reduction received no operand.".to_string())
                    })
                },
                vec![1],
            ))],
        )
        .unwrap();

    grammar
        .define(
            items,
            vec![
                Production::seq(vec![
                    Symbol::terminal("digit"),
                    Symbol::terminal(","),
                    items.into(),
                ])
                .reduce(Reduce::with_args(
                    |mut args| {
                        let rest = args.pop();
                        let first = args.pop();
                        match (first, rest) {
                            (Some(first), Some(Value::Array(mut tail))) => {
                                tail.insert(0, first);
                                Ok(Value::Array(tail))
                            }
                            other => Err(ReduceError::new(format!(
                                "Unexpected item operands {:?}.",
                                other
                            ))),
                        }
                    },
                    vec![0, 2],
                )),
                Production::single(Symbol::terminal("digit"))
                    .reduce(Reduce::new(|args| Ok(Value::Array(args)))),
            ],
        )
        .unwrap();

    let lexer = CharStream::new("[],", "digit").with_admissible_characters("[],0123456789");
    RecursiveDescentParser::new(Rc::new(grammar), Rc::new(lexer)).unwrap()
}

#[test]
fn a_bracket_list_reduces_to_a_json_array() {
    let mut parser = list_parser();
    assert!(parser.parse("[1,2,3]").unwrap());
    assert_eq!(parser.return_value(), Some(&json!(["1", "2", "3"])));
}

#[test]
fn a_singleton_list_reduces_to_a_one_element_array() {
    let mut parser = list_parser();
    assert!(parser.parse("[7]").unwrap());
    assert_eq!(parser.return_value(), Some(&json!(["7"])));
}

#[test]
fn an_unterminated_list_is_rejected() {
    let mut parser = list_parser();
    assert_eq!(parser.parse("[1,2").unwrap(), false);
}
