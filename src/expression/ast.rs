//! Syntax tree for computed-column expressions.

use super::function::{ComputedFunction, Operator};
use super::token::Span;

/// A node of the syntax tree. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// A reference to a data column, e.g. `"Sales"`.
    Column { name: String, span: Span },

    /// `left operator right`, optionally renamed with `AS`.
    BinaryOp {
        operator: Operator,
        left: Box<SyntaxNode>,
        right: Box<SyntaxNode>,
        alias: Option<String>,
    },

    /// `function(args...)`, optionally renamed with `AS`.
    Function {
        function: ComputedFunction,
        args: Vec<SyntaxNode>,
        alias: Option<String>,
    },

    /// A parenthesized sub-expression. Transparent to the config builder.
    Paren { inner: Box<SyntaxNode> },
}

impl SyntaxNode {
    pub fn column(name: impl Into<String>, span: Span) -> Self {
        SyntaxNode::Column {
            name: name.into(),
            span,
        }
    }

    pub fn binary(operator: Operator, left: SyntaxNode, right: SyntaxNode) -> Self {
        SyntaxNode::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            alias: None,
        }
    }

    pub fn function(function: ComputedFunction, args: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Function {
            function,
            args,
            alias: None,
        }
    }

    pub fn paren(inner: SyntaxNode) -> Self {
        SyntaxNode::Paren {
            inner: Box::new(inner),
        }
    }

    /// Strip any enclosing parentheses.
    pub fn unwrap_parens(&self) -> &SyntaxNode {
        let mut node = self;
        while let SyntaxNode::Paren { inner } = node {
            node = &**inner;
        }
        node
    }

    /// The node's alias, looking through parentheses.
    pub fn alias(&self) -> Option<&str> {
        match self.unwrap_parens() {
            SyntaxNode::BinaryOp { alias, .. } | SyntaxNode::Function { alias, .. } => {
                alias.as_deref()
            }
            _ => None,
        }
    }

    /// Whether this node (after parentheses) is a plain column reference.
    pub fn is_column(&self) -> bool {
        matches!(self.unwrap_parens(), SyntaxNode::Column { .. })
    }

    /// Nesting depth of the tree; a lone column has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            SyntaxNode::Column { .. } => 1,
            SyntaxNode::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
            SyntaxNode::Function { args, .. } => {
                1 + args.iter().map(SyntaxNode::depth).max().unwrap_or(0)
            }
            SyntaxNode::Paren { inner } => 1 + inner.depth(),
        }
    }
}
