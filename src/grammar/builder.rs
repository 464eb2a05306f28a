use crate::grammar::{Production, Reduce, Symbol};
use crate::ReduceError;
use std::rc::Rc;

impl<V> Production<V> {
    /// Create a production from an ordered sequence of symbols.
    pub fn seq(elements: Vec<Symbol>) -> Self {
        Self {
            head: None,
            elements,
            reduce: None,
        }
    }

    /// Create a production of a single symbol.
    pub fn single(symbol: Symbol) -> Self {
        Self::seq(vec![symbol])
    }

    /// Append a symbol to the production body.
    pub fn then(mut self, symbol: Symbol) -> Self {
        self.elements.push(symbol);
        self
    }

    /// Attach a reduction descriptor, replacing any previous one.
    pub fn reduce(mut self, reduce: Reduce<V>) -> Self {
        self.reduce = Some(reduce);
        self
    }
}

impl<V> Reduce<V> {
    /// A reduction called with the values of all the production's children, in order.
    pub fn new(func: impl Fn(Vec<V>) -> Result<V, ReduceError> + 'static) -> Self {
        Self {
            func: Rc::new(func),
            args: None,
        }
    }

    /// A reduction called with the child values selected by `args`, in that order.
    ///
    /// Indices may repeat; an index outside the child range is a reduction error at
    /// parse time.
    pub fn with_args(
        func: impl Fn(Vec<V>) -> Result<V, ReduceError> + 'static,
        args: Vec<usize>,
    ) -> Self {
        Self {
            func: Rc::new(func),
            args: Some(args),
        }
    }

    pub(crate) fn call(&self, values: Vec<V>) -> Result<V, ReduceError>
    where
        V: Clone,
    {
        let selected = match &self.args {
            Some(indices) => {
                let mut picked = Vec::with_capacity(indices.len());
                for index in indices {
                    let value = values.get(*index).cloned().ok_or_else(|| {
                        ReduceError::new(format!(
                            "Reduction argument index {} is out of range for {} child values.",
                            index,
                            values.len()
                        ))
                    })?;
                    picked.push(value);
                }
                picked
            }
            None => values,
        };
        (self.func)(selected)
    }
}
