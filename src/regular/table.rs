use crate::regular::{CellDefault, Input, Table, TableRow};
use std::collections::BTreeSet;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

impl<V: Clone> CellDefault<V> {
    /// Materialize the default: clone the constant, or call the factory.
    pub fn value(&self) -> V {
        match self {
            CellDefault::Constant(value) => value.clone(),
            CellDefault::Factory(factory) => factory(),
        }
    }
}

impl<V> Debug for CellDefault<V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellDefault::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            CellDefault::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

impl<V> Clone for CellDefault<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        match self {
            CellDefault::Constant(value) => CellDefault::Constant(value.clone()),
            CellDefault::Factory(factory) => CellDefault::Factory(Rc::clone(factory)),
        }
    }
}

/// Constants compare by value, factories by identity; a constant never equals a factory.
impl<V: PartialEq> PartialEq for CellDefault<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellDefault::Constant(a), CellDefault::Constant(b)) => a == b,
            (CellDefault::Factory(a), CellDefault::Factory(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<V: Clone> TableRow<V> {
    /// Create a row with no columns.
    pub fn new(default: CellDefault<V>) -> Self {
        Self {
            data: Default::default(),
            default,
        }
    }

    /// Create a row from a sequence of column cells.
    pub fn from_cells(cells: Vec<(Input, V)>, default: CellDefault<V>) -> Self {
        Self {
            data: cells.into_iter().collect(),
            default,
        }
    }

    /// Get the value for a column; a missing column yields the default, constructed
    /// fresh if the default is a factory.
    pub fn get(&self, key: Input) -> V {
        self.data
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default.value())
    }

    pub fn set(&mut self, key: Input, value: V) {
        self.data.insert(key, value);
    }

    /// The columns present in the row, sorted.
    pub fn columns(&self) -> Vec<Input> {
        self.data.keys().copied().collect()
    }

    /// Apply a function to every present value; the default is preserved.
    pub fn map(&self, func: impl Fn(&V) -> V) -> TableRow<V> {
        TableRow {
            data: self
                .data
                .iter()
                .map(|(key, value)| (*key, func(value)))
                .collect(),
            default: self.default.clone(),
        }
    }

    fn with_default(self, default: CellDefault<V>) -> TableRow<V> {
        TableRow {
            data: self.data,
            default,
        }
    }
}

impl<V: Clone> Table<V> {
    /// Create a table from a sequence of rows; every row is normalized to share the
    /// table's default.
    pub fn new(rows: Vec<TableRow<V>>, default: CellDefault<V>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.with_default(default.clone()))
            .collect();
        Self { rows, default }
    }

    /// Create a table with one row that has no columns.
    pub fn with_empty_row(default: CellDefault<V>) -> Self {
        Self::new(vec![TableRow::new(default.clone())], default)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &TableRow<V> {
        &self.rows[index]
    }

    pub fn row_mut(&mut self, index: usize) -> &mut TableRow<V> {
        &mut self.rows[index]
    }

    pub fn rows(&self) -> &[TableRow<V>] {
        &self.rows
    }

    pub(crate) fn into_rows(self) -> Vec<TableRow<V>> {
        self.rows
    }

    pub fn default_cell(&self) -> &CellDefault<V> {
        &self.default
    }

    /// The sorted union of the columns of all rows.
    pub fn columns(&self) -> Vec<Input> {
        let set: BTreeSet<Input> = self
            .rows
            .iter()
            .flat_map(|row| row.columns())
            .collect();
        set.into_iter().collect()
    }

    /// The index of the last row.
    pub fn final_index(&self) -> usize {
        self.len() - 1
    }

    /// Apply a function pointwise; defaults are preserved.
    pub fn map(&self, func: impl Fn(&V) -> V) -> Table<V> {
        Table {
            rows: self.rows.iter().map(|row| row.map(&func)).collect(),
            default: self.default.clone(),
        }
    }
}

impl<V: Clone + Debug> Display for Table<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let columns = self.columns();

        // Width of the index column, then of every value column.
        let index_width = if self.len() <= 1 {
            1
        } else {
            (self.len() - 1).to_string().len()
        };
        let mut widths = vec![index_width];
        for column in &columns {
            let mut width = column.to_string().len();
            for row in &self.rows {
                width = width.max(format!("{:?}", row.get(*column)).len());
            }
            widths.push(width);
        }

        let write_line = |f: &mut Formatter<'_>, cells: &[String]| -> std::fmt::Result {
            write!(f, "|")?;
            for (cell, width) in cells.iter().zip(&widths) {
                write!(f, " {:>width$} |", cell, width = *width)?;
            }
            Ok(())
        };

        let mut header = vec![String::new()];
        header.extend(columns.iter().map(|column| column.to_string()));
        write_line(f, &header)?;
        writeln!(f)?;

        write!(f, "|")?;
        for (index, width) in widths.iter().enumerate() {
            if index != 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", "-".repeat(width + 2))?;
        }
        write!(f, "|")?;

        for (index, row) in self.rows.iter().enumerate() {
            writeln!(f)?;
            let mut cells = vec![index.to_string()];
            cells.extend(columns.iter().map(|column| format!("{:?}", row.get(*column))));
            write_line(f, &cells)?;
        }
        Ok(())
    }
}
