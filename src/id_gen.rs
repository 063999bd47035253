use std::collections::HashMap;
use std::fmt;

/// Syntactic category of a diagram node. Doubles as the identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Program,
    DefineExp,
    VarDecl,
    NumExp,
    BoolExp,
    StrExp,
    ProcExp,
    IfExp,
    LetExp,
    LetRecExp,
    LitExp,
    AppExp,
    SetExp,
    PrimOp,
    Binding,
    VarRef,
    Number,
    Boolean,
    String,
    EmptySExp,
    SymbolSExp,
    CompoundSExp,
    // Pseudo-nodes grouping list-valued fields.
    Exps,
    Params,
    Body,
    Rands,
    Bindings,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Program => "Program",
            Category::DefineExp => "DefineExp",
            Category::VarDecl => "VarDecl",
            Category::NumExp => "NumExp",
            Category::BoolExp => "BoolExp",
            Category::StrExp => "StrExp",
            Category::ProcExp => "ProcExp",
            Category::IfExp => "IfExp",
            Category::LetExp => "LetExp",
            Category::LetRecExp => "LetRecExp",
            Category::LitExp => "LitExp",
            Category::AppExp => "AppExp",
            Category::SetExp => "SetExp",
            Category::PrimOp => "PrimOp",
            Category::Binding => "Binding",
            Category::VarRef => "VarRef",
            Category::Number => "number",
            Category::Boolean => "boolean",
            Category::String => "string",
            Category::EmptySExp => "EmptySExp",
            Category::SymbolSExp => "SymbolSExp",
            Category::CompoundSExp => "CompoundSExp",
            Category::Exps => "Exps",
            Category::Params => "Params",
            Category::Body => "Body",
            Category::Rands => "Rands",
            Category::Bindings => "Bindings",
        }
    }

    pub fn is_pseudo(self) -> bool {
        matches!(
            self,
            Category::Exps | Category::Params | Category::Body | Category::Rands | Category::Bindings
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category counters for one mapping run.
#[derive(Debug, Default)]
pub struct IdGen {
    counters: HashMap<Category, u32>,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `{category}_{n}`, with `n` starting at 1 for each category.
    pub fn next(&mut self, category: Category) -> String {
        let count = self.counters.entry(category).or_insert(0);
        *count += 1;
        format!("{category}_{count}")
    }
}
