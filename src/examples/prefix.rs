//! Prefix arithmetic: `stmt -> '+' stmt stmt | '-' stmt stmt | digit`, reduced to a
//! signed integer.
use crate::grammar::{Grammar, Production, Reduce, Symbol};
use crate::{CharStream, GrammarError, RecursiveDescentParser, ReduceError, ValueImpl};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixValue {
    Text(String),
    Number(i64),
}

impl ValueImpl for PrefixValue {
    fn lexeme(lexeme: &str) -> Self {
        PrefixValue::Text(lexeme.to_string())
    }
}

fn operand(value: &PrefixValue) -> Result<i64, ReduceError> {
    match value {
        PrefixValue::Number(number) => Ok(*number),
        PrefixValue::Text(text) => Err(ReduceError::new(format!(
            "Expected a number operand, found '{}'.",
            text
        ))),
    }
}

fn digit(args: Vec<PrefixValue>) -> Result<PrefixValue, ReduceError> {
    match args.into_iter().next() {
        Some(PrefixValue::Text(text)) => text
            .parse()
            .map(PrefixValue::Number)
            .map_err(|err| ReduceError::new(format!("'{}' is not a digit: {}.", text, err))),
        other => Err(ReduceError::new(format!(
            "Expected a digit lexeme, found {:?}.",
            other
        ))),
    }
}

pub fn prefix_parser() -> Result<RecursiveDescentParser<PrefixValue>, GrammarError> {
    let mut grammar = Grammar::new();
    let stmt = grammar.non_terminal("stmt")?;
    grammar.define(
        stmt,
        vec![
            Production::seq(vec![Symbol::terminal("+"), stmt.into(), stmt.into()]).reduce(
                Reduce::with_args(
                    |args| Ok(PrefixValue::Number(operand(&args[0])? + operand(&args[1])?)),
                    vec![1, 2],
                ),
            ),
            Production::seq(vec![Symbol::terminal("-"), stmt.into(), stmt.into()]).reduce(
                Reduce::with_args(
                    |args| Ok(PrefixValue::Number(operand(&args[0])? - operand(&args[1])?)),
                    vec![1, 2],
                ),
            ),
            Production::single(Symbol::terminal("digit")).reduce(Reduce::new(digit)),
        ],
    )?;

    let lexer = CharStream::new("+-", "digit").with_admissible_characters("+-0123456789");
    RecursiveDescentParser::new(Rc::new(grammar), Rc::new(lexer))
}
