//! Nested call expressions like `a(e(0,1),e(x,y))`, reduced to a structured
//! operation value.
use crate::grammar::{Grammar, Production, Reduce, Symbol};
use crate::{CharStream, GrammarError, RecursiveDescentParser, ReduceError, ValueImpl};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpValue {
    Text(String),
    Args(Vec<OpValue>),
    Operation { name: String, args: Vec<OpValue> },
}

impl ValueImpl for OpValue {
    fn lexeme(lexeme: &str) -> Self {
        OpValue::Text(lexeme.to_string())
    }
}

/// `build_op(name, arguments)`: wrap an argument list under an operation name.
fn build_op(args: Vec<OpValue>) -> Result<OpValue, ReduceError> {
    let mut args = args.into_iter();
    let name = match args.next() {
        Some(OpValue::Text(name)) => name,
        other => {
            return Err(ReduceError::new(format!(
                "Expected an operation name, found {:?}.",
                other
            )))
        }
    };
    let arguments = match args.next() {
        Some(OpValue::Args(list)) => list,
        Some(single) => vec![single],
        None => Vec::new(),
    };
    Ok(OpValue::Operation {
        name,
        args: arguments,
    })
}

/// `build_args(first, rest)`: prepend an argument to the already collected tail.
fn build_args(args: Vec<OpValue>) -> Result<OpValue, ReduceError> {
    let mut args = args.into_iter();
    let first = args.next().ok_or_else(|| {
        ReduceError::new("An argument-list reduction received no operands.".to_string())
    })?;
    let rest = args.next();
    let list = match rest {
        Some(OpValue::Args(mut tail)) => {
            tail.insert(0, first);
            tail
        }
        Some(single) => vec![first, single],
        None => vec![first],
    };
    Ok(OpValue::Args(list))
}

/// ```text
/// stmt  : 'a' '(' args ')' | 'o' '(' args ')' | 'e' '(' args ')'
/// args  : stmt ',' args | stmt | item ',' args | item
/// item  : var | digit
/// digit : '0' | '1'
/// var   : 'x' | 'y' | 'z'
/// ```
pub fn operations_parser() -> Result<RecursiveDescentParser<OpValue>, GrammarError> {
    let mut grammar = Grammar::new();
    let stmt = grammar.non_terminal("stmt")?;
    let args = grammar.non_terminal("args")?;
    let item = grammar.non_terminal("item")?;
    let digit = grammar.non_terminal("digit")?;
    let var = grammar.non_terminal("var")?;

    let call = |name: &'static str| {
        Production::seq(vec![
            Symbol::terminal(name),
            Symbol::terminal("("),
            args.into(),
            Symbol::terminal(")"),
        ])
        .reduce(Reduce::with_args(build_op, vec![0, 2]))
    };
    grammar.define(stmt, vec![call("a"), call("o"), call("e")])?;

    grammar.define(
        args,
        vec![
            Production::seq(vec![stmt.into(), Symbol::terminal(","), args.into()])
                .reduce(Reduce::with_args(build_args, vec![0, 2])),
            Production::single(stmt.into()),
            Production::seq(vec![item.into(), Symbol::terminal(","), args.into()])
                .reduce(Reduce::with_args(build_args, vec![0, 2])),
            Production::single(item.into()),
        ],
    )?;

    grammar.define(
        item,
        vec![
            Production::single(var.into()),
            Production::single(digit.into()),
        ],
    )?;

    grammar.define(
        digit,
        vec![
            Production::single(Symbol::terminal("0")),
            Production::single(Symbol::terminal("1")),
        ],
    )?;

    grammar.define(
        var,
        vec![
            Production::single(Symbol::terminal("x")),
            Production::single(Symbol::terminal("y")),
            Production::single(Symbol::terminal("z")),
        ],
    )?;

    let lexer = CharStream::new("aoe,xyz01()", "char");
    RecursiveDescentParser::new(Rc::new(grammar), Rc::new(lexer))
}
