use tracing::{debug, trace};

use crate::graph_ast::*;
use crate::id_gen::Category;
use crate::l4_ast::*;

/// One structural field of an AST value, as seen by the mapper.
pub enum Field<'a> {
    /// A single child, connected directly with the role label.
    One(&'static str, &'a dyn Mappable),
    /// An ordered list, grouped under a pseudo-node of the given category.
    Many(&'static str, Category, Vec<&'a dyn Mappable>),
    /// A terminal node that has no AST value of its own (a name used as data).
    Leaf(&'static str, Category, String),
}

/// Anything that becomes a node in the diagram.
pub trait Mappable {
    fn category(&self) -> Category;
    fn label(&self) -> String;
    /// Fields in emission order. Leaves have none.
    fn fields(&self) -> Vec<Field<'_>>;
}

pub fn map_to_graph(parsed: &Parsed) -> Graph {
    map_to_graph_with_direction(parsed, Direction::TopDown)
}

pub fn map_to_graph_with_direction(parsed: &Parsed, direction: Direction) -> Graph {
    let mut registry = NodeRegistry::new();
    let root = declare(&mut registry, parsed);
    let edges = map_edges(&mut registry, &root, parsed);
    debug!(
        root = %root,
        nodes = registry.len(),
        edges = edges.len(),
        "mapped AST to graph"
    );

    let content = if edges.is_empty() {
        GraphContent::Atomic(NodeDecl {
            id: root,
            label: parsed.label(),
        })
    } else {
        GraphContent::Compound {
            nodes: registry.into_nodes(),
            edges,
        }
    };
    Graph { direction, content }
}

pub fn declare(registry: &mut NodeRegistry, value: &dyn Mappable) -> NodeId {
    registry.declare(value.category(), value.label())
}

/// Wires up the children of `value`, whose node `node` is already declared.
///
/// Edges come out as: the node's own field edges, then the fan-out edges of
/// every pseudo-node, then each child's subtree in field order. Identifiers
/// are minted in the same order.
pub fn map_edges(registry: &mut NodeRegistry, node: &NodeId, value: &dyn Mappable) -> Vec<Edge> {
    trace!(node = %node, category = %value.category(), "mapping children");
    let mut edges: Vec<Edge> = Vec::new();
    let mut fan_out: Vec<Edge> = Vec::new();
    let mut children: Vec<(NodeId, &dyn Mappable)> = Vec::new();

    for field in value.fields() {
        match field {
            Field::One(role, child) => {
                let id = declare(registry, child);
                edges.push(labeled(node, &id, role));
                children.push((id, child));
            }
            Field::Many(role, pseudo, items) => {
                let group = registry.declare_pseudo(pseudo);
                edges.push(labeled(node, &group, role));
                for item in items {
                    let id = declare(registry, item);
                    fan_out.push(Edge {
                        from: group.clone(),
                        to: id.clone(),
                        label: None,
                    });
                    children.push((id, item));
                }
            }
            Field::Leaf(role, category, label) => {
                let id = registry.declare(category, label);
                edges.push(labeled(node, &id, role));
            }
        }
    }

    edges.extend(fan_out);
    for (id, child) in children {
        edges.extend(map_edges(registry, &id, child));
    }
    edges
}

fn labeled(from: &NodeId, to: &NodeId, role: &str) -> Edge {
    Edge {
        from: from.clone(),
        to: to.clone(),
        label: Some(role.to_string()),
    }
}

fn many<T: Mappable>(items: &[T]) -> Vec<&dyn Mappable> {
    items.iter().map(|item| item as &dyn Mappable).collect()
}

impl Mappable for Parsed {
    fn category(&self) -> Category {
        match self {
            Parsed::Program(p) => p.category(),
            Parsed::Exp(e) => e.category(),
        }
    }

    fn label(&self) -> String {
        match self {
            Parsed::Program(p) => p.label(),
            Parsed::Exp(e) => e.label(),
        }
    }

    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            Parsed::Program(p) => p.fields(),
            Parsed::Exp(e) => e.fields(),
        }
    }
}

impl Mappable for Program {
    fn category(&self) -> Category {
        Category::Program
    }

    fn label(&self) -> String {
        "Program".to_string()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::Many("exps", Category::Exps, many(&self.exps))]
    }
}

impl Mappable for Exp {
    fn category(&self) -> Category {
        match self {
            Exp::Define(_) => Category::DefineExp,
            Exp::CExp(c) => c.category(),
        }
    }

    fn label(&self) -> String {
        match self {
            Exp::Define(_) => "DefineExp".to_string(),
            Exp::CExp(c) => c.label(),
        }
    }

    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            Exp::Define(def) => vec![Field::One("var", &def.var), Field::One("val", &def.val)],
            Exp::CExp(c) => c.fields(),
        }
    }
}

impl Mappable for CExp {
    fn category(&self) -> Category {
        match self {
            CExp::Num(_) => Category::NumExp,
            CExp::Bool(_) => Category::BoolExp,
            CExp::Str(_) => Category::StrExp,
            CExp::PrimOp(_) => Category::PrimOp,
            CExp::VarRef(_) => Category::VarRef,
            CExp::Proc(_) => Category::ProcExp,
            CExp::If(_) => Category::IfExp,
            CExp::App(_) => Category::AppExp,
            CExp::Let(l) => match l.kind {
                LetKind::Let => Category::LetExp,
                LetKind::Letrec => Category::LetRecExp,
            },
            CExp::Lit(_) => Category::LitExp,
            CExp::Set(_) => Category::SetExp,
        }
    }

    fn label(&self) -> String {
        match self {
            CExp::Num(n) => format!("NumExp({n})"),
            CExp::Bool(b) => format!("BoolExp({})", bool_literal(*b)),
            CExp::Str(s) => format!("StrExp({s})"),
            CExp::PrimOp(op) => format!("PrimOp({op})"),
            CExp::VarRef(var) => format!("VarRef({var})"),
            other => other.category().to_string(),
        }
    }

    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            CExp::Num(_) | CExp::Bool(_) | CExp::Str(_) | CExp::PrimOp(_) | CExp::VarRef(_) => {
                Vec::new()
            }
            CExp::Proc(proc) => vec![
                Field::Many("args", Category::Params, many(&proc.args)),
                Field::Many("body", Category::Body, many(&proc.body)),
            ],
            CExp::If(if_exp) => vec![
                Field::One("test", &*if_exp.test),
                Field::One("then", &*if_exp.then),
                Field::One("alt", &*if_exp.alt),
            ],
            CExp::App(app) => vec![
                Field::One("rator", &*app.rator),
                Field::Many("rands", Category::Rands, many(&app.rands)),
            ],
            CExp::Let(let_exp) => vec![
                Field::Many("bindings", Category::Bindings, many(&let_exp.bindings)),
                Field::Many("body", Category::Body, many(&let_exp.body)),
            ],
            CExp::Lit(val) => vec![Field::One("val", val)],
            CExp::Set(set) => vec![
                Field::Leaf("var", Category::VarRef, format!("VarRef({})", set.var)),
                Field::One("val", &*set.val),
            ],
        }
    }
}

impl Mappable for VarDecl {
    fn category(&self) -> Category {
        Category::VarDecl
    }

    fn label(&self) -> String {
        format!("VarDecl({})", self.var)
    }

    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }
}

impl Mappable for Binding {
    fn category(&self) -> Category {
        Category::Binding
    }

    fn label(&self) -> String {
        "Binding".to_string()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::One("var", &self.var), Field::One("val", &self.val)]
    }
}

impl Mappable for SExpValue {
    fn category(&self) -> Category {
        match self {
            SExpValue::Empty => Category::EmptySExp,
            SExpValue::Symbol(_) => Category::SymbolSExp,
            SExpValue::Compound(..) => Category::CompoundSExp,
            SExpValue::Number(_) => Category::Number,
            SExpValue::Boolean(_) => Category::Boolean,
            SExpValue::Str(_) => Category::String,
        }
    }

    fn label(&self) -> String {
        match self {
            SExpValue::Number(n) => format!("number({n})"),
            SExpValue::Boolean(b) => format!("boolean({})", bool_literal(*b)),
            SExpValue::Str(s) => format!("string({s})"),
            other => other.category().to_string(),
        }
    }

    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            SExpValue::Symbol(name) => {
                vec![Field::Leaf("val", Category::String, format!("string({name})"))]
            }
            SExpValue::Compound(car, cdr) => {
                vec![Field::One("val1", &**car), Field::One("val2", &**cdr)]
            }
            SExpValue::Empty | SExpValue::Number(_) | SExpValue::Boolean(_) | SExpValue::Str(_) => {
                Vec::new()
            }
        }
    }
}
