//! AST types for the L4 language.

/// Either top-level shape the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Program(Program),
    Exp(Exp),
}

/// `(L4 <exp>+)`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub exps: Vec<Exp>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Exp {
    Define(DefineExp),
    CExp(CExp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefineExp {
    pub var: VarDecl,
    pub val: CExp,
}

/// Compound (non-define) expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum CExp {
    Num(f64),
    Bool(bool),
    Str(String),
    PrimOp(String),
    VarRef(String),
    Proc(ProcExp),
    If(IfExp),
    App(AppExp),
    /// `let` and `letrec` share a shape; `kind` only changes the display name.
    Let(LetExp),
    Lit(SExpValue),
    Set(SetExp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub var: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcExp {
    pub args: Vec<VarDecl>,
    pub body: Vec<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExp {
    pub test: Box<CExp>,
    pub then: Box<CExp>,
    pub alt: Box<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppExp {
    pub rator: Box<CExp>,
    pub rands: Vec<CExp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetKind {
    Let,
    Letrec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetExp {
    pub kind: LetKind,
    pub bindings: Vec<Binding>,
    pub body: Vec<CExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub var: VarDecl,
    pub val: CExp,
}

/// `(set! <var> <cexp>)`; the target is a reference, not a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SetExp {
    pub var: String,
    pub val: Box<CExp>,
}

/// Quoted literal data.
#[derive(Debug, Clone, PartialEq)]
pub enum SExpValue {
    Empty,
    Symbol(String),
    Compound(Box<SExpValue>, Box<SExpValue>),
    Number(f64),
    Boolean(bool),
    Str(String),
}

impl SExpValue {
    /// Builds a chain of pairs ending in `tail`.
    pub fn list(items: Vec<SExpValue>, tail: SExpValue) -> Self {
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| SExpValue::Compound(Box::new(item), Box::new(acc)))
    }
}

pub const PRIMITIVE_OPS: &[&str] = &[
    "+", "-", "*", "/", ">", "<", "=", "not", "and", "or", "eq?", "string=?", "cons", "car",
    "cdr", "list", "pair?", "list?", "number?", "boolean?", "symbol?", "string?", "display",
    "newline",
];

pub const SPECIAL_FORMS: &[&str] = &[
    "L4", "define", "lambda", "if", "let", "letrec", "set!", "quote",
];

pub fn is_primitive_op(s: &str) -> bool {
    PRIMITIVE_OPS.contains(&s)
}

pub fn is_special_form(s: &str) -> bool {
    SPECIAL_FORMS.contains(&s)
}

/// L4 spelling of a boolean.
pub fn bool_literal(b: bool) -> &'static str {
    if b { "#t" } else { "#f" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_builds_nested_pairs() {
        let value = SExpValue::list(
            vec![SExpValue::Number(1.0), SExpValue::Number(2.0)],
            SExpValue::Empty,
        );
        assert_eq!(
            value,
            SExpValue::Compound(
                Box::new(SExpValue::Number(1.0)),
                Box::new(SExpValue::Compound(
                    Box::new(SExpValue::Number(2.0)),
                    Box::new(SExpValue::Empty),
                )),
            )
        );
    }

    #[test]
    fn list_of_nothing_is_tail() {
        assert_eq!(SExpValue::list(vec![], SExpValue::Empty), SExpValue::Empty);
    }

    #[test]
    fn primitive_and_special_sets_are_disjoint() {
        for op in PRIMITIVE_OPS {
            assert!(!is_special_form(op), "{op} is both");
        }
    }
}
