use crate::grammar::{Grammar, Production, ProductionId, Symbol};
use crate::{CharStream, RecursiveDescentParser, ValueImpl};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Text(String);

impl ValueImpl for Text {
    fn lexeme(lexeme: &str) -> Self {
        Text(lexeme.to_string())
    }
}

#[test]
fn duplicate_non_terminal_name_is_rejected() {
    let mut grammar: Grammar<Text> = Grammar::new();
    grammar.non_terminal("stmt").unwrap();
    let err = grammar.non_terminal("stmt").unwrap_err();
    assert!(format!("{}", err).contains("already declared"));
}

#[test]
fn alternatives_bind_exactly_once() {
    let mut grammar: Grammar<Text> = Grammar::new();
    let stmt = grammar.non_terminal("stmt").unwrap();
    grammar
        .define(stmt, vec![Production::single(Symbol::terminal("a"))])
        .unwrap();
    let err = grammar
        .define(stmt, vec![Production::single(Symbol::terminal("b"))])
        .unwrap_err();
    assert!(format!("{}", err).contains("already set"));
}

#[test]
fn binding_sets_the_head_back_reference() {
    let mut grammar: Grammar<Text> = Grammar::new();
    let stmt = grammar.non_terminal("stmt").unwrap();
    grammar
        .define(
            stmt,
            vec![
                Production::single(Symbol::terminal("a")),
                Production::seq(vec![Symbol::terminal("b"), stmt.into()]),
            ],
        )
        .unwrap();
    for production in grammar.alternatives(stmt) {
        assert_eq!(production.head(), Some(stmt));
    }
}

#[test]
fn first_declared_non_terminal_is_the_start_symbol() {
    let mut grammar: Grammar<Text> = Grammar::new();
    let stmt = grammar.non_terminal("stmt").unwrap();
    let args = grammar.non_terminal("args").unwrap();
    assert_eq!(grammar.start(), Some(stmt));
    assert_eq!(grammar.get("args"), Some(args));
    assert_eq!(grammar.name_of(args), "args");
}

#[test]
fn grammar_display_lists_alternatives_in_order() {
    let mut grammar: Grammar<Text> = Grammar::new();
    let stmt = grammar.non_terminal("stmt").unwrap();
    grammar
        .define(
            stmt,
            vec![
                Production::seq(vec![Symbol::terminal("+"), stmt.into(), stmt.into()]),
                Production::single(Symbol::terminal("digit")),
            ],
        )
        .unwrap();
    let text = format!("{}", grammar);
    assert!(text.contains("stmt"));
    assert!(text.contains(": '+' stmt stmt"));
    assert!(text.contains("| 'digit'"));
}

#[test]
fn production_string_renders_head_and_body() {
    let mut grammar: Grammar<Text> = Grammar::new();
    let stmt = grammar.non_terminal("stmt").unwrap();
    grammar
        .define(
            stmt,
            vec![Production::seq(vec![
                Symbol::terminal("+"),
                stmt.into(),
                stmt.into(),
            ])],
        )
        .unwrap();
    let id = ProductionId {
        head: stmt,
        alternative: 0,
    };
    assert_eq!(grammar.production_string(id), "stmt -> '+' stmt stmt");
}

#[test]
fn dangling_non_terminal_fails_at_parse_time() {
    let mut grammar: Grammar<Text> = Grammar::new();
    let stmt = grammar.non_terminal("stmt").unwrap();
    let dangling = grammar.non_terminal("dangling").unwrap();
    grammar
        .define(
            stmt,
            vec![Production::seq(vec![
                Symbol::terminal("a"),
                dangling.into(),
            ])],
        )
        .unwrap();

    let lexer = CharStream::new("", "a");
    let mut parser = RecursiveDescentParser::new(Rc::new(grammar), Rc::new(lexer)).unwrap();
    assert_eq!(parser.parse("aa").unwrap(), false);
}
