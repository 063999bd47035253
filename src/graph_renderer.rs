use std::collections::{HashMap, HashSet};

use crate::graph_ast::*;

/// Label prefixes rendered inside double quotes. Matched on the leading
/// characters of the label, not on the whole label.
const QUOTED_LABEL_PREFIXES: &[&str] = &[
    "NumExp", "StrExp", "PrimOp", "VarRef", "string", "boolean", "VarDecl", "BoolExp", "number",
];

/// Tracks which ids have been printed so the first mention declares the node.
struct Mentions<'g> {
    decls: HashMap<&'g NodeId, &'g NodeDecl>,
    seen: HashSet<&'g NodeId>,
}

impl<'g> Mentions<'g> {
    fn new(nodes: &'g [NodeDecl]) -> Self {
        Self {
            decls: nodes.iter().map(|n| (&n.id, n)).collect(),
            seen: HashSet::new(),
        }
    }

    fn mention(&mut self, id: &'g NodeId) -> Node<'g> {
        match self.decls.get(id) {
            Some(&decl) if self.seen.insert(id) => Node::Decl(decl),
            _ => Node::Ref(id),
        }
    }
}

pub fn render(graph: &Graph) -> String {
    let header = format!("graph {}\n", graph.direction.token());
    match &graph.content {
        GraphContent::Atomic(decl) => format!("{header}{}{}", decl.id, decl.label),
        GraphContent::Compound { nodes, edges } => {
            let mut mentions = Mentions::new(nodes);
            let lines: Vec<String> = edges
                .iter()
                .map(|edge| {
                    let from = render_node(mentions.mention(&edge.from));
                    let to = render_node(mentions.mention(&edge.to));
                    format!("{from} -->{}{to}", render_edge_label(edge.label.as_deref()))
                })
                .collect();
            format!("{header}{}", lines.join("\n"))
        }
    }
}

pub fn render_node(node: Node<'_>) -> String {
    match node {
        Node::Decl(decl) => format!("{}[{}]", decl.id, quote_label(&decl.label)),
        Node::Ref(id) => id.to_string(),
    }
}

fn quote_label(label: &str) -> String {
    if QUOTED_LABEL_PREFIXES.iter().any(|p| label.starts_with(p)) {
        format!("\"{label}\"")
    } else {
        label.to_string()
    }
}

fn render_edge_label(label: Option<&str>) -> String {
    match label {
        Some(text) => format!("|{text}| "),
        None => " ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_gen::Category;
    use pretty_assertions::assert_eq;

    #[test]
    fn quote_label_allow_list() {
        assert_eq!(quote_label("NumExp(5)"), "\"NumExp(5)\"");
        assert_eq!(quote_label("VarDecl(x)"), "\"VarDecl(x)\"");
        assert_eq!(quote_label("number(1)"), "\"number(1)\"");
        assert_eq!(quote_label("IfExp"), "IfExp");
        assert_eq!(quote_label(":"), ":");
        assert_eq!(quote_label("SymbolSExp"), "SymbolSExp");
    }

    #[test]
    fn quote_label_matches_prefix_only() {
        assert_eq!(quote_label("stringly"), "\"stringly\"");
        assert_eq!(quote_label("VarRefX"), "\"VarRefX\"");
        assert_eq!(quote_label("xNumExp"), "xNumExp");
    }

    #[test]
    fn edge_label_rendering() {
        assert_eq!(render_edge_label(Some("val")), "|val| ");
        assert_eq!(render_edge_label(None), " ");
    }

    #[test]
    fn render_atomic_graph() {
        let mut registry = NodeRegistry::new();
        let id = registry.declare(Category::NumExp, "NumExp(5)".to_string());
        let graph = Graph {
            direction: Direction::TopDown,
            content: GraphContent::Atomic(NodeDecl {
                id,
                label: "NumExp(5)".to_string(),
            }),
        };
        assert_eq!(render(&graph), "graph TD\nNumExp_1NumExp(5)");
    }

    #[test]
    fn render_declares_on_first_mention_only() {
        let mut registry = NodeRegistry::new();
        let app = registry.declare(Category::AppExp, "AppExp".to_string());
        let rator = registry.declare(Category::PrimOp, "PrimOp(+)".to_string());
        let rands = registry.declare_pseudo(Category::Rands);
        let one = registry.declare(Category::NumExp, "NumExp(1)".to_string());
        let edge = |from: &NodeId, to: &NodeId, label: Option<&str>| Edge {
            from: from.clone(),
            to: to.clone(),
            label: label.map(str::to_string),
        };
        let edges = vec![
            edge(&app, &rator, Some("rator")),
            edge(&app, &rands, Some("rands")),
            edge(&rands, &one, None),
        ];
        let graph = Graph {
            direction: Direction::LeftRight,
            content: GraphContent::Compound {
                nodes: registry.into_nodes(),
                edges,
            },
        };
        assert_eq!(
            render(&graph),
            "graph LR\n\
             AppExp_1[AppExp] -->|rator| PrimOp_1[\"PrimOp(+)\"]\n\
             AppExp_1 -->|rands| Rands_1[:]\n\
             Rands_1 --> NumExp_1[\"NumExp(1)\"]"
        );
    }

    #[test]
    fn render_self_loop_references_second_end() {
        let mut registry = NodeRegistry::new();
        let a = registry.declare(Category::Body, ":".to_string());
        let graph = Graph {
            direction: Direction::TopDown,
            content: GraphContent::Compound {
                nodes: registry.into_nodes(),
                edges: vec![Edge {
                    from: a.clone(),
                    to: a,
                    label: None,
                }],
            },
        };
        assert_eq!(render(&graph), "graph TD\nBody_1[:] --> Body_1");
    }
}
