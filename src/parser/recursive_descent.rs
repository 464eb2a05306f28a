use crate::grammar::{Grammar, NonTerminalId, ProductionId, Symbol};
use crate::parser::ParseTree;
use crate::{
    GrammarError, ITokenizer, Log, ParseError, RecursiveDescentParser, Token, ValueImpl,
};
use once_cell::unsync::OnceCell;
use std::rc::Rc;

const INDENT: &str = "  ";

impl<V: ValueImpl> RecursiveDescentParser<V> {
    /// Create a parser from a grammar and a tokenizer.
    ///
    /// The grammar needs a start symbol, i.e. at least one declared non-terminal.
    pub fn new(
        grammar: Rc<Grammar<V>>,
        lexer: Rc<dyn ITokenizer>,
    ) -> Result<Self, GrammarError> {
        if grammar.is_empty() {
            return Err(GrammarError::new(
                "InitializationError",
                "A grammar needs at least one non-terminal to be parsed.",
            ));
        }
        Ok(Self {
            grammar,
            lexer,
            debugger: OnceCell::new(),
            tokens: Vec::new(),
            lookahead: None,
            stack: Vec::new(),
            parse_tree: None,
            return_value: None,
        })
    }

    /// Set a log label to trace the parser based on the level of [Log].
    ///
    /// At [Verbose](Log::Verbose) order every tried production is echoed to standard
    /// output together with its outcome.
    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Debugger {} is already set for this parser.", err))
    }

    pub fn grammar(&self) -> &Grammar<V> {
        &self.grammar
    }

    /// The tree of the last successful [parse](RecursiveDescentParser::parse) call.
    pub fn parse_tree(&self) -> Option<&ParseTree> {
        self.parse_tree.as_ref()
    }

    /// The reduction value of the last successful [parse](RecursiveDescentParser::parse)
    /// call.
    pub fn return_value(&self) -> Option<&V> {
        self.return_value.as_ref()
    }

    /// Parse an input string.
    ///
    /// The string is tokenized, then matched against the start symbol with ordered-choice
    /// backtracking. The result is `Ok(true)` iff the match succeeded and every token was
    /// consumed; a plain syntax failure is `Ok(false)`. Lexer and reduction failures
    /// surface as errors.
    pub fn parse(&mut self, input: &str) -> Result<bool, ParseError> {
        let tokens = self.lexer.tokenize(input)?;
        self.reset(tokens);

        let debugger = self.debugger.get().copied().unwrap_or(Log::None);
        let (matched, lookahead, stack) = {
            let mut matcher = Matcher {
                grammar: &self.grammar,
                tokens: &self.tokens,
                lookahead: self.lookahead,
                stack: Vec::new(),
                debugger,
            };
            let matched = matcher.scan();
            (matched, matcher.lookahead, matcher.stack)
        };
        self.lookahead = lookahead;
        self.stack = stack;

        if debugger.order() >= Log::Success(()).order() {
            println!(
                "[{}; Parse {}]",
                debugger,
                if matched { "succeeded" } else { "failed" }
            );
        }

        if !matched {
            return Ok(false);
        }

        let parse_tree = ParseTree::build(&self.tokens, &self.stack, &self.grammar);
        let return_value = parse_tree.reduce(&self.grammar)?;
        self.parse_tree = Some(parse_tree);
        self.return_value = Some(return_value);
        Ok(true)
    }

    fn reset(&mut self, tokens: Vec<Token>) {
        self.lookahead = if tokens.is_empty() { None } else { Some(0) };
        self.tokens = tokens;
        self.stack = Vec::new();
        self.parse_tree = None;
        self.return_value = None;
    }
}

/// One scan over a token vector. The lookahead is the index of the next token to match,
/// or `None` past the end; the stack records every tentatively committed production and
/// is truncated back when an alternative fails.
struct Matcher<'scan, V: ValueImpl> {
    grammar: &'scan Grammar<V>,
    tokens: &'scan [Token],
    lookahead: Option<usize>,
    stack: Vec<ProductionId>,
    debugger: Log<&'static str>,
}

impl<V: ValueImpl> Matcher<'_, V> {
    fn scan(&mut self) -> bool {
        let start = match self.grammar.start() {
            Some(id) => id,
            None => return false,
        };
        let matched = self.match_non_terminal(start, 0);
        matched && self.lookahead.is_none()
    }

    fn match_symbol(&mut self, symbol: &Symbol, level: usize) -> bool {
        match symbol {
            Symbol::Terminal(name) => self.match_terminal(name),
            Symbol::NonTerminal(id) => self.match_non_terminal(*id, level),
            Symbol::Epsilon => true,
        }
    }

    fn match_non_terminal(&mut self, id: NonTerminalId, level: usize) -> bool {
        let save = self.stack.len();
        for alternative in 0..self.grammar.alternatives(id).len() {
            let production = ProductionId {
                head: id,
                alternative,
            };
            self.stack.push(production);
            if self.match_production(production, level) {
                return true;
            }
            self.stack.truncate(save);
        }
        false
    }

    fn match_production(&mut self, id: ProductionId, level: usize) -> bool {
        self.echo_production(id, level);
        let save = self.lookahead;
        for element in self.grammar.production(id).elements() {
            if !self.match_symbol(element, level + 1) {
                self.lookahead = save;
                self.echo("Failed!", level);
                return false;
            }
        }
        self.echo("Succeeded!", level);
        true
    }

    fn match_terminal(&mut self, name: &str) -> bool {
        match self.lookahead {
            Some(index) if self.tokens[index].category == name => {
                self.advance_lookahead();
                true
            }
            _ => false,
        }
    }

    /// Advance past the matched token, to the past-end sentinel when the vector is
    /// exhausted.
    fn advance_lookahead(&mut self) {
        if let Some(index) = self.lookahead {
            let advanced = index + 1;
            self.lookahead = if advanced >= self.tokens.len() {
                None
            } else {
                Some(advanced)
            };
        }
    }

    fn echo(&self, message: &str, level: usize) {
        if self.debugger.order() >= Log::Verbose(()).order() {
            println!("{}{}", INDENT.repeat(level), message);
        }
    }

    fn echo_production(&self, id: ProductionId, level: usize) {
        if self.debugger.order() >= Log::Verbose(()).order() {
            println!(
                "{}Trying: {}",
                INDENT.repeat(level),
                self.grammar.production_string(id)
            );
        }
    }
}
