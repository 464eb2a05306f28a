use crate::grammar::{Grammar, ProductionId, Symbol};
use crate::parser::{Leaf, ParseTree, TreeChild, TreeNode};
use crate::{ReduceError, Token, ValueImpl};
use ptree::TreeItem;
use std::borrow::Cow;

impl Leaf {
    fn new(terminal: &'static str) -> Self {
        Self {
            terminal,
            token: None,
        }
    }

    pub fn lexeme(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.lexeme.as_str())
    }
}

impl TreeNode {
    pub fn head_name(&self) -> &'static str {
        self.head
    }
}

impl ParseTree {
    /// Reify the production stack of a successful scan into a tree and attach the
    /// consumed tokens to its leaves, in input order.
    pub(crate) fn build<V: ValueImpl>(
        tokens: &[Token],
        productions: &[ProductionId],
        grammar: &Grammar<V>,
    ) -> Self {
        let mut cursor = 0;
        let mut root = build_node(&mut cursor, productions, grammar);
        debug_assert_eq!(cursor, productions.len());

        let mut stream = tokens.iter();
        attach_tokens(&mut root, &mut stream);
        debug_assert!(stream.next().is_none());

        ParseTree { root }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// The leaves of the tree in pre-order, i.e. in input-token order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = Vec::new();
        collect_leaves(&self.root, &mut leaves);
        leaves
    }

    /// The lexemes of the attached tokens in input order.
    pub fn lexemes(&self) -> Vec<&str> {
        self.leaves().iter().filter_map(|leaf| leaf.lexeme()).collect()
    }

    /// Fold the tree bottom-up into a value.
    ///
    /// A leaf yields its token's lexeme; a node applies its production's reduction
    /// descriptor, or the default reduction (identity on exactly one child value)
    /// when no descriptor is attached.
    pub fn reduce<V: ValueImpl>(&self, grammar: &Grammar<V>) -> Result<V, ReduceError> {
        reduce_node(&self.root, grammar)
    }

    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(&TreeChild::Node(self.root.clone()))
    }
}

fn build_node<V: ValueImpl>(
    cursor: &mut usize,
    productions: &[ProductionId],
    grammar: &Grammar<V>,
) -> TreeNode {
    let production = productions[*cursor];
    *cursor += 1;

    let mut children = Vec::new();
    for element in grammar.production(production).elements() {
        match element {
            Symbol::Terminal(name) => children.push(TreeChild::Leaf(Leaf::new(name))),
            Symbol::NonTerminal(_) => {
                children.push(TreeChild::Node(build_node(cursor, productions, grammar)))
            }
            Symbol::Epsilon => {}
        }
    }

    TreeNode {
        production,
        head: grammar.name_of(production.head),
        children,
    }
}

fn attach_tokens(node: &mut TreeNode, stream: &mut std::slice::Iter<Token>) {
    for child in node.children.iter_mut() {
        match child {
            TreeChild::Leaf(leaf) => leaf.token = stream.next().cloned(),
            TreeChild::Node(child_node) => attach_tokens(child_node, stream),
        }
    }
}

fn collect_leaves<'tree>(node: &'tree TreeNode, leaves: &mut Vec<&'tree Leaf>) {
    for child in &node.children {
        match child {
            TreeChild::Leaf(leaf) => leaves.push(leaf),
            TreeChild::Node(child_node) => collect_leaves(child_node, leaves),
        }
    }
}

fn reduce_node<V: ValueImpl>(node: &TreeNode, grammar: &Grammar<V>) -> Result<V, ReduceError> {
    let mut values = Vec::with_capacity(node.children.len());
    for child in &node.children {
        let value = match child {
            TreeChild::Leaf(leaf) => match &leaf.token {
                Some(token) => V::lexeme(&token.lexeme),
                None => {
                    return Err(ReduceError::new(format!(
                        "No token attached to leaf '{}'.",
                        leaf.terminal
                    )))
                }
            },
            TreeChild::Node(child_node) => reduce_node(child_node, grammar)?,
        };
        values.push(value);
    }

    match grammar.production(node.production).reduce_descriptor() {
        Some(reduce) => reduce.call(values),
        None if values.len() == 1 => Ok(values.remove(0)),
        None => Err(ReduceError::new(format!(
            "Production '{}' has {} child values and no reducer; the default reduction takes exactly one.",
            grammar.production_string(node.production),
            values.len()
        ))),
    }
}

impl TreeItem for TreeChild {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            TreeChild::Leaf(leaf) => match &leaf.token {
                Some(token) => write!(f, "Leaf('{}')", token.lexeme),
                None => write!(f, "Leaf('{}')", leaf.terminal),
            },
            TreeChild::Node(node) => write!(f, "Node('{}')", node.head),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            TreeChild::Leaf(_) => Cow::from(Vec::new()),
            TreeChild::Node(node) => Cow::from(&node.children),
        }
    }
}
