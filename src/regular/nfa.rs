use crate::regular::{CellDefault, Input, Nfa, StateSet, Table, TableRow};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

fn set_default() -> CellDefault<StateSet> {
    CellDefault::Factory(Rc::new(StateSet::new))
}

impl Nfa {
    /// Wrap a transition table and memoize the ε-closure of every state.
    pub fn new(table: Table<StateSet>) -> Self {
        let epsilon_closures = (0..table.len())
            .map(|state| find_epsilon_closure(&table, state))
            .collect();
        Self {
            table,
            epsilon_closures,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &Table<StateSet> {
        &self.table
    }

    /// The single accepting state: the last row of the table.
    pub fn final_state(&self) -> usize {
        self.table.final_index()
    }

    /// An automaton accepting only the empty string.
    pub fn epsilon() -> Self {
        Nfa::new(Table::new(
            vec![
                TableRow::from_cells(
                    vec![(Input::Epsilon, StateSet::from([1]))],
                    set_default(),
                ),
                TableRow::new(set_default()),
            ],
            set_default(),
        ))
    }

    /// An automaton accepting only the single character `character`.
    pub fn char(character: char) -> Self {
        Nfa::new(Table::new(
            vec![
                TableRow::from_cells(
                    vec![(Input::Char(character), StateSet::from([1]))],
                    set_default(),
                ),
                TableRow::new(set_default()),
            ],
            set_default(),
        ))
    }

    /// Concatenate transition tables row-wise, rebasing every state in every cell by
    /// the offset of its table. Returns the combined table and the offsets at which
    /// the original tables begin; the default of the result is the first table's.
    fn concat_tables(tables: Vec<Table<StateSet>>) -> (Table<StateSet>, Vec<usize>) {
        let default = tables[0].default_cell().clone();

        let mut offsets = Vec::with_capacity(tables.len());
        let mut total = 0;
        for table in &tables {
            offsets.push(total);
            total += table.len();
        }

        let mut rows = Vec::with_capacity(total);
        for (table, offset) in tables.into_iter().zip(&offsets) {
            let shifted = table.map(|states| states.iter().map(|state| state + offset).collect());
            rows.extend(shifted.into_rows());
        }

        (Table::new(rows, default), offsets)
    }

    /// The concatenation of automatons: each final state is ε-linked to the initial
    /// state of the following automaton.
    pub fn concat(nfas: Vec<Nfa>) -> Self {
        assert!(!nfas.is_empty(), "concat needs at least one automaton");
        let (mut table, offsets) =
            Self::concat_tables(nfas.into_iter().map(|nfa| nfa.table).collect());
        for offset in offsets.iter().skip(1) {
            table
                .row_mut(offset - 1)
                .set(Input::Epsilon, StateSet::from([*offset]));
        }
        Nfa::new(table)
    }

    /// The union of automatons: a fresh initial state ε-branches to every operand and
    /// every operand's final state ε-links to a fresh final state.
    pub fn union(nfas: Vec<Nfa>) -> Self {
        assert!(!nfas.is_empty(), "union needs at least one automaton");
        let mut tables = Vec::with_capacity(nfas.len() + 2);
        tables.push(Table::with_empty_row(set_default()));
        tables.extend(nfas.into_iter().map(|nfa| nfa.table));
        tables.push(Table::with_empty_row(set_default()));

        let (mut table, offsets) = Self::concat_tables(tables);
        let final_index = table.final_index();

        table.row_mut(0).set(
            Input::Epsilon,
            offsets[1..offsets.len() - 1].iter().copied().collect(),
        );
        for offset in &offsets[2..] {
            table
                .row_mut(offset - 1)
                .set(Input::Epsilon, StateSet::from([final_index]));
        }
        Nfa::new(table)
    }

    /// The Kleene star of an automaton.
    pub fn star(nfa: Nfa) -> Self {
        let tables = vec![
            Table::with_empty_row(set_default()),
            nfa.table,
            Table::with_empty_row(set_default()),
        ];
        let (mut table, _) = Self::concat_tables(tables);
        let final_index = table.final_index();

        table
            .row_mut(0)
            .set(Input::Epsilon, StateSet::from([1, final_index]));
        table
            .row_mut(final_index - 1)
            .set(Input::Epsilon, StateSet::from([0, final_index]));
        Nfa::new(table)
    }

    /// Zero or one occurrence: the union with the empty-string automaton.
    pub fn optional(nfa: Nfa) -> Self {
        Self::union(vec![nfa, Self::epsilon()])
    }

    /// One or more occurrences: the automaton followed by its star.
    pub fn plus(nfa: Nfa) -> Self {
        let star = Self::star(nfa.clone());
        Self::concat(vec![nfa, star])
    }

    /// The memoized ε-closure of one state; always contains the state itself.
    pub fn closure_of(&self, state: usize) -> &StateSet {
        &self.epsilon_closures[state]
    }

    /// The ε-closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::new();
        for state in states {
            closure.extend(self.epsilon_closures[*state].iter().copied());
        }
        closure
    }

    /// The input symbols leaving a set of states: the union of their columns minus
    /// the ε column.
    pub fn input_characters(&self, states: &StateSet) -> BTreeSet<Input> {
        states
            .iter()
            .flat_map(|state| self.table.row(*state).columns())
            .filter(|column| *column != Input::Epsilon)
            .collect()
    }

    pub fn is_final(&self, states: &StateSet) -> bool {
        states.contains(&self.final_state())
    }

    /// Step a set of states on one input symbol: close, transition, close again.
    pub fn transition(&self, states: &StateSet, on: Input) -> StateSet {
        let start = self.epsilon_closure(states);
        let mut end = StateSet::new();
        for state in &start {
            end.extend(self.table.row(*state).get(on));
        }
        self.epsilon_closure(&end)
    }

    /// Whole-string acceptance.
    pub fn is_match(&self, input: &str) -> bool {
        let mut states = self.epsilon_closure(&StateSet::from([0]));
        for character in input.chars() {
            states = self.transition(&states, Input::Char(character));
            if states.is_empty() {
                return false;
            }
        }
        self.is_final(&states)
    }
}

fn find_epsilon_closure(table: &Table<StateSet>, state: usize) -> StateSet {
    let mut closure = StateSet::new();
    let mut stack = vec![state];
    while let Some(current) = stack.pop() {
        if closure.insert(current) {
            for next in table.row(current).get(Input::Epsilon) {
                if !closure.contains(&next) {
                    stack.push(next);
                }
            }
        }
    }
    closure
}

impl Display for Nfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table)
    }
}
