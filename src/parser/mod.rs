//! The parser half of the toolkit: the backtracking matcher, the parse tree it
//! records, and the bottom-up semantic reduction over the tree.
mod parse_tree;
mod recursive_descent;

use crate::grammar::ProductionId;
use crate::Token;

#[derive(Debug, Clone)]
/// A matched terminal position; the token is attached after the tree skeleton is built.
pub struct Leaf {
    pub terminal: &'static str,
    pub token: Option<Token>,
}

#[derive(Debug, Clone)]
/// A matched non-terminal: the production that matched and its ordered children.
pub struct TreeNode {
    pub production: ProductionId,
    pub(crate) head: &'static str,
    pub children: Vec<TreeChild>,
}

#[derive(Debug, Clone)]
/// An element of the parse tree.
pub enum TreeChild {
    Leaf(Leaf),
    Node(TreeNode),
}

#[derive(Debug, Clone)]
/// The concrete tree of matched productions; leaves correspond one-to-one to the
/// consumed tokens, in input order.
pub struct ParseTree {
    root: TreeNode,
}
