//! The regular-language engine: defaulted lookup tables, Thompson-style NFA
//! combinators with memoized ε-closures, a subset-construction DFA, and the
//! regular expression surface in [regex].
mod dfa;
mod nfa;
pub mod regex;
mod table;


use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// A set of NFA states, identified by their row indices.
pub type StateSet = BTreeSet<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A column key of a transition table.
///
/// `Epsilon` is the reserved ε-transition column. `Dot` is reserved for wildcard
/// semantics but carries none in this engine; the subset construction treats it as an
/// opaque input symbol. Character columns order ascending after the reserved keys.
pub enum Input {
    Epsilon,
    Dot,
    Char(char),
}

/// The missing-key policy of a table row: either a concrete value or a zero-argument
/// constructor invoked fresh on every lookup.
pub enum CellDefault<V> {
    Constant(V),
    Factory(Rc<dyn Fn() -> V>),
}

#[derive(Debug, Clone, PartialEq)]
/// A table row behaving as a defaulted map from [Input] to a cell value.
pub struct TableRow<V> {
    data: BTreeMap<Input, V>,
    default: CellDefault<V>,
}

#[derive(Debug, Clone, PartialEq)]
/// An ordered sequence of rows sharing one default; the lookup structure behind [Nfa].
pub struct Table<V> {
    rows: Vec<TableRow<V>>,
    default: CellDefault<V>,
}

#[derive(Debug, Clone, PartialEq)]
/// A non-deterministic finite automaton with ε-transitions.
///
/// States are the row indices of the transition table; state `0` is initial and the
/// last row is the single accepting state. The ε-closure of every state is computed
/// once at construction.
pub struct Nfa {
    table: Table<StateSet>,
    epsilon_closures: Vec<StateSet>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A deterministic finite automaton built from an [Nfa] by subset construction.
///
/// State `0` is initial; a missing transition rejects.
pub struct Dfa {
    table: BTreeMap<usize, BTreeMap<Input, usize>>,
    finals: BTreeSet<usize>,
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Epsilon => write!(f, "'e"),
            Input::Dot => write!(f, "dot"),
            Input::Char(character) => write!(f, "{}", character),
        }
    }
}
