//! The grammar algebra: symbols, productions with optional reduction descriptors,
//! and the arena of non-terminals they are bound into.
//!
//! A [Grammar] is built in two steps the way a recursive grammar demands:
//! [non_terminal](Grammar::non_terminal) declares a name and hands back an index into the
//! arena, so productions can refer to a non-terminal before it has a body;
//! [define](Grammar::define) then binds the ordered alternatives exactly once.
//! Declaration order of the alternatives is the parser's priority order, and the first
//! declared non-terminal is the start symbol.
mod builder;

#[cfg(test)]
mod __tests__;

use crate::{GrammarError, ReduceError, ValueImpl};
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter, Write};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
/// An index of a declared non-terminal in the [Grammar] arena.
pub struct NonTerminalId(pub(crate) usize);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
/// An index of one production: the owning non-terminal plus its alternative position.
pub struct ProductionId {
    pub(crate) head: NonTerminalId,
    pub(crate) alternative: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An element of a production body.
///
/// `Epsilon` always succeeds without consuming a token and is not represented in the
/// parse tree.
pub enum Symbol {
    Terminal(&'static str),
    NonTerminal(NonTerminalId),
    Epsilon,
}

/// A reduction descriptor: a semantic function over the child values of a production,
/// with an optional ordered selection of child indices to pass.
pub struct Reduce<V> {
    func: Rc<dyn Fn(Vec<V>) -> Result<V, ReduceError>>,
    args: Option<Vec<usize>>,
}

/// An ordered sequence of symbols with an optional [Reduce] descriptor.
///
/// The back-reference to the owning non-terminal is set when the production is bound
/// with [Grammar::define]; it stays `None` before.
pub struct Production<V> {
    head: Option<NonTerminalId>,
    elements: Vec<Symbol>,
    reduce: Option<Reduce<V>>,
}

/// A named group of alternative productions, bound at most once.
pub struct NonTerminal<V> {
    name: &'static str,
    alternatives: OnceCell<Vec<Production<V>>>,
}

/// An ordered arena of non-terminals with a name lookup map.
pub struct Grammar<V> {
    non_terminals: Vec<NonTerminal<V>>,
    names: HashMap<&'static str, NonTerminalId>,
}

impl Symbol {
    /// A terminal matching any token whose category equals `name`.
    pub fn terminal(name: &'static str) -> Self {
        Symbol::Terminal(name)
    }
}

impl From<NonTerminalId> for Symbol {
    fn from(id: NonTerminalId) -> Self {
        Symbol::NonTerminal(id)
    }
}

impl<V> Debug for Reduce<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reduce").field("args", &self.args).finish()
    }
}

impl<V> Clone for Reduce<V> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
            args: self.args.clone(),
        }
    }
}

impl<V> Production<V> {
    pub fn head(&self) -> Option<NonTerminalId> {
        self.head
    }

    pub fn elements(&self) -> &[Symbol] {
        &self.elements
    }

    pub(crate) fn reduce_descriptor(&self) -> Option<&Reduce<V>> {
        self.reduce.as_ref()
    }
}

impl<V: ValueImpl> Grammar<V> {
    pub fn new() -> Self {
        Self {
            non_terminals: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Declare a non-terminal and return its arena index.
    ///
    /// The first declared non-terminal is the start symbol. Names are unique; declaring
    /// a name twice is a construction error.
    pub fn non_terminal(&mut self, name: &'static str) -> Result<NonTerminalId, GrammarError> {
        if self.names.contains_key(name) {
            return Err(GrammarError::new(
                "DuplicateName",
                format!("Non-terminal '{}' is already declared.", name),
            ));
        }
        let id = NonTerminalId(self.non_terminals.len());
        self.non_terminals.push(NonTerminal {
            name,
            alternatives: OnceCell::new(),
        });
        self.names.insert(name, id);
        Ok(id)
    }

    /// Bind the ordered alternatives of a declared non-terminal.
    ///
    /// Every production's head is set to `id`. Binding is one-shot; a second call for
    /// the same non-terminal is a construction error.
    pub fn define(
        &self,
        id: NonTerminalId,
        mut alternatives: Vec<Production<V>>,
    ) -> Result<(), GrammarError> {
        let non_terminal = self.non_terminals.get(id.0).ok_or_else(|| {
            GrammarError::new(
                "UnknownNonTerminal",
                format!("Non-terminal #{} is not declared in this grammar.", id.0),
            )
        })?;
        for production in alternatives.iter_mut() {
            production.head = Some(id);
        }
        non_terminal.alternatives.set(alternatives).map_err(|_| {
            GrammarError::new(
                "AlreadyDefined",
                format!(
                    "Alternatives are already set for '{}'.",
                    non_terminal.name
                ),
            )
        })
    }

    /// The start symbol: the first declared non-terminal.
    pub fn start(&self) -> Option<NonTerminalId> {
        if self.non_terminals.is_empty() {
            None
        } else {
            Some(NonTerminalId(0))
        }
    }

    pub fn len(&self) -> usize {
        self.non_terminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.non_terminals.is_empty()
    }

    /// Look a non-terminal up by name.
    pub fn get(&self, name: &str) -> Option<NonTerminalId> {
        self.names.get(name).copied()
    }

    pub fn name_of(&self, id: NonTerminalId) -> &'static str {
        self.non_terminals[id.0].name
    }

    /// The bound alternatives of a non-terminal, in priority order.
    ///
    /// A declared but never defined non-terminal has no alternatives and therefore
    /// fails every match at parse time.
    pub fn alternatives(&self, id: NonTerminalId) -> &[Production<V>] {
        self.non_terminals[id.0]
            .alternatives
            .get()
            .map_or(&[], |alternatives| alternatives.as_slice())
    }

    pub fn production(&self, id: ProductionId) -> &Production<V> {
        &self.alternatives(id.head)[id.alternative]
    }

    /// Render one production as `head -> body`, for traces and error messages.
    pub fn production_string(&self, id: ProductionId) -> String {
        let mut body = String::new();
        for (index, element) in self.production(id).elements().iter().enumerate() {
            if index != 0 {
                body.push(' ');
            }
            self.write_symbol(&mut body, element);
        }
        format!("{} -> {}", self.name_of(id.head), body)
    }

    fn write_symbol(&self, writer: &mut String, symbol: &Symbol) {
        match symbol {
            Symbol::Terminal(name) => {
                let _ = write!(writer, "'{}'", name);
            }
            Symbol::NonTerminal(id) => writer.push_str(self.name_of(*id)),
            Symbol::Epsilon => writer.push('ε'),
        }
    }
}

impl<V: ValueImpl> Display for Grammar<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, non_terminal) in self.non_terminals.iter().enumerate() {
            writeln!(f, "{}", non_terminal.name)?;
            let alternatives = self.alternatives(NonTerminalId(index));
            for (alternative, production) in alternatives.iter().enumerate() {
                let mut body = String::new();
                for (position, element) in production.elements().iter().enumerate() {
                    if position != 0 {
                        body.push(' ');
                    }
                    self.write_symbol(&mut body, element);
                }
                if alternative == 0 {
                    writeln!(f, "{:>6} {}", ":", body)?;
                } else {
                    writeln!(f, "{:>6} {}", "|", body)?;
                }
            }
            writeln!(f, "{:>6}", ";")?;
        }
        Ok(())
    }
}
