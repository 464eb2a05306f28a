use crate::regular::{Dfa, Input, Nfa, StateSet};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

impl Dfa {
    /// Determinize an [Nfa] by subset construction.
    ///
    /// DFA state `0` is the ε-closure of the NFA's initial state. Input symbols are
    /// explored in ascending order, so state numbering is deterministic for a given
    /// automaton.
    pub fn new(nfa: &Nfa) -> Self {
        let (table, finals) = Self::translate(nfa);
        Self { table, finals }
    }

    fn translate(nfa: &Nfa) -> (BTreeMap<usize, BTreeMap<Input, usize>>, BTreeSet<usize>) {
        let mut table = BTreeMap::from([(0, BTreeMap::new())]);
        let mut finals = BTreeSet::new();

        let initial = nfa.epsilon_closure(&StateSet::from([0]));
        let mut registered = BTreeMap::from([(initial.clone(), 0)]);
        let mut stack = vec![initial];

        while let Some(states) = stack.pop() {
            let index = registered[&states];
            let mut row = BTreeMap::new();

            for on in nfa.input_characters(&states) {
                let next = nfa.transition(&states, on);
                let next_index = match registered.get(&next) {
                    Some(existing) => *existing,
                    None => {
                        let fresh = registered.len();
                        registered.insert(next.clone(), fresh);
                        stack.push(next);
                        fresh
                    }
                };
                row.insert(on, next_index);
            }

            if nfa.is_final(&states) {
                finals.insert(index);
            }
            table.insert(index, row);
        }

        (table, finals)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &BTreeMap<usize, BTreeMap<Input, usize>> {
        &self.table
    }

    pub fn finals(&self) -> &BTreeSet<usize> {
        &self.finals
    }

    pub fn is_final(&self, state: usize) -> bool {
        self.finals.contains(&state)
    }

    /// Whole-string acceptance; a missing transition rejects.
    pub fn is_match(&self, input: &str) -> bool {
        let mut state = 0;
        for character in input.chars() {
            match self
                .table
                .get(&state)
                .and_then(|row| row.get(&Input::Char(character)))
            {
                Some(next) => state = *next,
                None => return false,
            }
        }
        self.is_final(state)
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (state, row) in &self.table {
            write!(f, "{}:", state)?;
            for (on, next) in row {
                write!(f, " {} -> {}", on, next)?;
            }
            writeln!(f)?;
        }
        write!(f, "accepting: {:?}", self.finals)
    }
}
