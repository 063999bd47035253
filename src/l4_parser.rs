use crate::l4_ast::*;
use crate::sexp::Sexp;

/// True when the datum is a list headed by the `L4` program keyword.
pub fn is_program_header(sexp: &Sexp) -> bool {
    match sexp {
        Sexp::List(items) | Sexp::Dotted(items, _) => {
            items.first().and_then(Sexp::as_token) == Some("L4")
        }
        _ => false,
    }
}

pub fn parse_program(sexp: &Sexp) -> Result<Program, String> {
    let items = match sexp {
        Sexp::List(items) if is_program_header(sexp) => items,
        _ => return Err("program must have the form (L4 <exp>+)".to_string()),
    };
    let body = &items[1..];
    if body.is_empty() {
        return Err("unexpected empty program".to_string());
    }
    let exps = body.iter().map(parse_exp).collect::<Result<Vec<_>, _>>()?;
    Ok(Program { exps })
}

pub fn parse_exp(sexp: &Sexp) -> Result<Exp, String> {
    if let Sexp::List(items) = sexp {
        if items.first().and_then(Sexp::as_token) == Some("define") {
            return parse_define(&items[1..]).map(Exp::Define);
        }
    }
    parse_cexp(sexp).map(Exp::CExp)
}

fn parse_define(operands: &[Sexp]) -> Result<DefineExp, String> {
    match operands {
        [var, val] => Ok(DefineExp {
            var: parse_var_decl(var)?,
            val: parse_cexp(val)?,
        }),
        _ => Err(format!(
            "define expects a variable and a value, got {} operands",
            operands.len()
        )),
    }
}

pub fn parse_cexp(sexp: &Sexp) -> Result<CExp, String> {
    match sexp {
        Sexp::Token(token) => parse_atomic(token),
        Sexp::Str(s) => Ok(CExp::Str(s.clone())),
        Sexp::Dotted(..) => Err("dotted pair is not an expression".to_string()),
        Sexp::List(items) => match items.split_first() {
            None => Err("empty application".to_string()),
            Some((head, rest)) => parse_compound(head, rest),
        },
    }
}

fn parse_atomic(token: &str) -> Result<CExp, String> {
    if let Some(n) = parse_number(token) {
        return Ok(CExp::Num(n));
    }
    if let Some(b) = parse_bool(token) {
        return Ok(CExp::Bool(b));
    }
    if is_primitive_op(token) {
        return Ok(CExp::PrimOp(token.to_string()));
    }
    check_identifier(token)?;
    Ok(CExp::VarRef(token.to_string()))
}

fn parse_compound(head: &Sexp, rest: &[Sexp]) -> Result<CExp, String> {
    match head.as_token() {
        Some("quote") => match rest {
            [datum] => Ok(CExp::Lit(parse_datum(datum))),
            _ => Err("quote expects exactly one datum".to_string()),
        },
        Some("lambda") => parse_proc(rest).map(CExp::Proc),
        Some("if") => match rest {
            [test, then, alt] => Ok(CExp::If(IfExp {
                test: Box::new(parse_cexp(test)?),
                then: Box::new(parse_cexp(then)?),
                alt: Box::new(parse_cexp(alt)?),
            })),
            _ => Err(format!("if expects 3 operands, got {}", rest.len())),
        },
        Some("let") => parse_let(LetKind::Let, rest).map(CExp::Let),
        Some("letrec") => parse_let(LetKind::Letrec, rest).map(CExp::Let),
        Some("set!") => match rest {
            [var, val] => {
                let name = var
                    .as_token()
                    .ok_or_else(|| "set! target must be a variable".to_string())?;
                check_identifier(name)?;
                Ok(CExp::Set(SetExp {
                    var: name.to_string(),
                    val: Box::new(parse_cexp(val)?),
                }))
            }
            _ => Err(format!("set! expects 2 operands, got {}", rest.len())),
        },
        Some("define") => Err("define is only allowed at top level".to_string()),
        Some("L4") => Err("nested L4 program".to_string()),
        _ => Ok(CExp::App(AppExp {
            rator: Box::new(parse_cexp(head)?),
            rands: rest.iter().map(parse_cexp).collect::<Result<Vec<_>, _>>()?,
        })),
    }
}

fn parse_proc(rest: &[Sexp]) -> Result<ProcExp, String> {
    let (params, body) = match rest {
        [Sexp::List(params), body @ ..] if !body.is_empty() => (params, body),
        _ => return Err("lambda expects a parameter list and a non-empty body".to_string()),
    };
    Ok(ProcExp {
        args: params.iter().map(parse_var_decl).collect::<Result<Vec<_>, _>>()?,
        body: parse_body(body)?,
    })
}

fn parse_let(kind: LetKind, rest: &[Sexp]) -> Result<LetExp, String> {
    let (bindings, body) = match rest {
        [Sexp::List(bindings), body @ ..] if !body.is_empty() => (bindings, body),
        _ => return Err("let expects a binding list and a non-empty body".to_string()),
    };
    Ok(LetExp {
        kind,
        bindings: bindings.iter().map(parse_binding).collect::<Result<Vec<_>, _>>()?,
        body: parse_body(body)?,
    })
}

fn parse_binding(sexp: &Sexp) -> Result<Binding, String> {
    match sexp {
        Sexp::List(pair) => match pair.as_slice() {
            [var, val] => Ok(Binding {
                var: parse_var_decl(var)?,
                val: parse_cexp(val)?,
            }),
            _ => Err("binding must have the form (<var> <cexp>)".to_string()),
        },
        _ => Err("binding must have the form (<var> <cexp>)".to_string()),
    }
}

fn parse_body(body: &[Sexp]) -> Result<Vec<CExp>, String> {
    body.iter().map(parse_cexp).collect()
}

fn parse_var_decl(sexp: &Sexp) -> Result<VarDecl, String> {
    let name = sexp
        .as_token()
        .ok_or_else(|| "expected a variable name".to_string())?;
    if is_primitive_op(name) {
        return Err(format!("cannot bind primitive operator `{name}`"));
    }
    check_identifier(name)?;
    Ok(VarDecl {
        var: name.to_string(),
    })
}

fn check_identifier(name: &str) -> Result<(), String> {
    if is_special_form(name) {
        return Err(format!("`{name}` is a reserved keyword"));
    }
    if name.starts_with('#') || name == "." || parse_number(name).is_some() {
        return Err(format!("`{name}` is not a valid identifier"));
    }
    Ok(())
}

fn parse_datum(sexp: &Sexp) -> SExpValue {
    match sexp {
        Sexp::Token(token) => parse_number(token)
            .map(SExpValue::Number)
            .or_else(|| parse_bool(token).map(SExpValue::Boolean))
            .unwrap_or_else(|| SExpValue::Symbol(token.clone())),
        Sexp::Str(s) => SExpValue::Str(s.clone()),
        Sexp::List(items) => SExpValue::list(items.iter().map(parse_datum).collect(), SExpValue::Empty),
        Sexp::Dotted(items, tail) => {
            SExpValue::list(items.iter().map(parse_datum).collect(), parse_datum(tail))
        }
    }
}

fn parse_number(token: &str) -> Option<f64> {
    if !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_bool(token: &str) -> Option<bool> {
    match token {
        "#t" => Some(true),
        "#f" => Some(false),
        _ => None,
    }
}
