use std::fmt;

use crate::id_gen::{Category, IdGen};

/// Label carried by every pseudo-node.
pub const PSEUDO_LABEL: &str = ":";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    TopDown,
    LeftRight,
}

impl Direction {
    pub fn token(self) -> &'static str {
        match self {
            Direction::TopDown => "TD",
            Direction::LeftRight => "LR",
        }
    }
}

/// Identifier of a declared node. Only a [`NodeRegistry`] can mint one, so
/// every id that shows up in an edge has a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    pub id: NodeId,
    pub label: String,
}

/// One mention of a node in diagram text: the first mention declares it,
/// later ones only reference it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Decl(&'a NodeDecl),
    Ref(&'a NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphContent {
    /// A lone node with no edges.
    Atomic(NodeDecl),
    /// Non-empty edge list plus every node the edges mention.
    Compound {
        nodes: Vec<NodeDecl>,
        edges: Vec<Edge>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub direction: Direction,
    pub content: GraphContent,
}

impl Graph {
    pub fn edges(&self) -> &[Edge] {
        match &self.content {
            GraphContent::Atomic(_) => &[],
            GraphContent::Compound { edges, .. } => edges,
        }
    }

    pub fn nodes(&self) -> &[NodeDecl] {
        match &self.content {
            GraphContent::Atomic(decl) => std::slice::from_ref(decl),
            GraphContent::Compound { nodes, .. } => nodes,
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&NodeDecl> {
        self.nodes().iter().find(|n| &n.id == id)
    }
}

/// Mints identifiers and records each node's label exactly once.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    ids: IdGen,
    nodes: Vec<NodeDecl>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, category: Category, label: String) -> NodeId {
        let id = NodeId(self.ids.next(category));
        self.nodes.push(NodeDecl {
            id: id.clone(),
            label,
        });
        id
    }

    pub fn declare_pseudo(&mut self, category: Category) -> NodeId {
        debug_assert!(category.is_pseudo(), "{category} is not a pseudo-node category");
        self.declare(category, PSEUDO_LABEL.to_string())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<NodeDecl> {
        self.nodes
    }
}
