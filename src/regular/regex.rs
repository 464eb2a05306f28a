//! The regular expression surface: a pattern grammar parsed by the crate's own
//! backtracking parser, whose reducers assemble an [Nfa] bottom-up.
//!
//! The pattern alphabet is any literal character plus the operators `( ) * + ? |`;
//! `\c` passes `c` through as a literal. Matching is whole-string acceptance.
use crate::grammar::{Grammar, Production, Reduce, Symbol};
use crate::regular::{Dfa, Nfa};
use crate::{AutomatonError, CharStream, GrammarError, RecursiveDescentParser, ReduceError, ValueImpl};
use std::rc::Rc;

#[derive(Debug, Clone)]
/// The reduction value of the pattern grammar: a consumed literal, or an assembled
/// automaton.
pub enum RegexValue {
    Lexeme(String),
    Automaton(Nfa),
}

impl ValueImpl for RegexValue {
    fn lexeme(lexeme: &str) -> Self {
        RegexValue::Lexeme(lexeme.to_string())
    }
}

fn automaton(value: RegexValue) -> Result<Nfa, ReduceError> {
    match value {
        RegexValue::Automaton(nfa) => Ok(nfa),
        RegexValue::Lexeme(lexeme) => Err(ReduceError::new(format!(
            "Expected an automaton operand, found literal '{}'.",
            lexeme
        ))),
    }
}

fn automatons(args: Vec<RegexValue>) -> Result<Vec<Nfa>, ReduceError> {
    let mut operands = Vec::with_capacity(args.len());
    for value in args {
        operands.push(automaton(value)?);
    }
    Ok(operands)
}

/// The pattern grammar, highest-priority alternatives first:
///
/// ```text
/// UNION  : CONCAT '|' UNION | CONCAT
/// CONCAT : STAR CONCAT | STAR
/// STAR   : ITEM '*' | ITEM '?' | ITEM '+' | ITEM
/// ITEM   : '(' UNION ')' | char
/// ```
fn pattern_grammar() -> Result<Grammar<RegexValue>, GrammarError> {
    let mut grammar = Grammar::new();
    let union = grammar.non_terminal("UNION")?;
    let concat = grammar.non_terminal("CONCAT")?;
    let star = grammar.non_terminal("STAR")?;
    let item = grammar.non_terminal("ITEM")?;

    grammar.define(
        union,
        vec![
            Production::seq(vec![concat.into(), Symbol::terminal("|"), union.into()]).reduce(
                Reduce::with_args(
                    |args| Ok(RegexValue::Automaton(Nfa::union(automatons(args)?))),
                    vec![0, 2],
                ),
            ),
            Production::single(concat.into()),
        ],
    )?;

    grammar.define(
        concat,
        vec![
            Production::seq(vec![star.into(), concat.into()]).reduce(Reduce::new(|args| {
                Ok(RegexValue::Automaton(Nfa::concat(automatons(args)?)))
            })),
            Production::single(star.into()),
        ],
    )?;

    grammar.define(
        star,
        vec![
            Production::seq(vec![item.into(), Symbol::terminal("*")]).reduce(Reduce::with_args(
                |mut args| Ok(RegexValue::Automaton(Nfa::star(automaton(args.remove(0))?))),
                vec![0],
            )),
            Production::seq(vec![item.into(), Symbol::terminal("?")]).reduce(Reduce::with_args(
                |mut args| {
                    Ok(RegexValue::Automaton(Nfa::optional(automaton(
                        args.remove(0),
                    )?)))
                },
                vec![0],
            )),
            Production::seq(vec![item.into(), Symbol::terminal("+")]).reduce(Reduce::with_args(
                |mut args| Ok(RegexValue::Automaton(Nfa::plus(automaton(args.remove(0))?))),
                vec![0],
            )),
            Production::single(item.into()),
        ],
    )?;

    grammar.define(
        item,
        vec![
            Production::seq(vec![
                Symbol::terminal("("),
                union.into(),
                Symbol::terminal(")"),
            ])
            .reduce(Reduce::with_args(
                |mut args| {
                    args.pop().ok_or_else(|| {
                        ReduceError::new("A group reduction received no operand.".to_string())
                    })
                },
                vec![1],
            )),
            Production::single(Symbol::terminal("char")).reduce(Reduce::new(|args| {
                match args.into_iter().next() {
                    Some(RegexValue::Lexeme(lexeme)) => {
                        let mut characters = lexeme.chars();
                        match (characters.next(), characters.next()) {
                            (Some(character), None) => {
                                Ok(RegexValue::Automaton(Nfa::char(character)))
                            }
                            _ => Err(ReduceError::new(format!(
                                "Expected a single literal character, found '{}'.",
                                lexeme
                            ))),
                        }
                    }
                    _ => Err(ReduceError::new(
                        "A character reduction received no literal.".to_string(),
                    )),
                }
            })),
        ],
    )?;

    Ok(grammar)
}

fn pattern_parser() -> Result<RecursiveDescentParser<RegexValue>, GrammarError> {
    let grammar = pattern_grammar()?;
    let lexer = CharStream::new("()*|?+", "char");
    RecursiveDescentParser::new(Rc::new(grammar), Rc::new(lexer))
}

/// Compile a pattern into its non-deterministic automaton.
pub fn compile_nfa(pattern: &str) -> Result<Nfa, AutomatonError> {
    let mut parser = pattern_parser()?;
    let matched = parser.parse(pattern)?;
    if !matched {
        return Err(AutomatonError::new(format!(
            "'{}' is not a valid pattern.",
            pattern
        )));
    }
    match parser.return_value() {
        Some(RegexValue::Automaton(nfa)) => Ok(nfa.clone()),
        _ => Err(AutomatonError::new(format!(
            "Pattern '{}' did not reduce to an automaton.",
            pattern
        ))),
    }
}

/// Compile a pattern into a deterministic automaton.
pub fn compile(pattern: &str) -> Result<Dfa, AutomatonError> {
    Ok(Dfa::new(&compile_nfa(pattern)?))
}

/// Compile a pattern and test a string for whole-string acceptance.
///
/// For repeated matching, [compile] once and call [Dfa::is_match] directly.
pub fn is_match(pattern: &str, input: &str) -> Result<bool, AutomatonError> {
    Ok(compile(pattern)?.is_match(input))
}
