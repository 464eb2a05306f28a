use crate::{AutomatonError, GrammarError, LexerError, ParseError, ReduceError};
use std::fmt::{Display, Formatter};

impl GrammarError {
    pub fn new(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            message: message.into(),
        }
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GrammarError: {}-{}", self.what, self.message)
    }
}

impl LexerError {
    pub fn new(pointer: usize, message: String) -> Self {
        Self { pointer, message }
    }
}

impl Display for LexerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LexerError: {} at offset {}.", self.message, self.pointer)
    }
}

impl ReduceError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl Display for ReduceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReduceError: {}", self.message)
    }
}

impl AutomatonError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl Display for AutomatonError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AutomatonError: {}", self.message)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lexer(err) => write!(f, "{}", err),
            ParseError::Reduce(err) => write!(f, "{}", err),
        }
    }
}

impl From<LexerError> for ParseError {
    fn from(err: LexerError) -> Self {
        ParseError::Lexer(err)
    }
}

impl From<ReduceError> for ParseError {
    fn from(err: ReduceError) -> Self {
        ParseError::Reduce(err)
    }
}

impl From<GrammarError> for AutomatonError {
    fn from(err: GrammarError) -> Self {
        AutomatonError::new(format!("{}", err))
    }
}

impl From<ParseError> for AutomatonError {
    fn from(err: ParseError) -> Self {
        AutomatonError::new(format!("{}", err))
    }
}
