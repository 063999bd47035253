use winnow::prelude::*;
use winnow::ascii::{multispace0, till_line_ending};
use winnow::combinator::alt;
use winnow::token::{any, take_while};

/// A datum as read from source text, before any L4 interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum Sexp {
    /// Any bare token: numbers, `#t`, symbols, operators.
    Token(String),
    Str(String),
    List(Vec<Sexp>),
    /// `(a b . c)`: the proper prefix and the tail after the dot.
    Dotted(Vec<Sexp>, Box<Sexp>),
}

impl Sexp {
    pub fn token(s: &str) -> Self {
        Sexp::Token(s.to_string())
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Sexp::Token(t) => Some(t),
            _ => None,
        }
    }
}

/// Reads exactly one datum; anything but whitespace or comments after it is an error.
pub fn parse_sexp(input: &str) -> Result<Sexp, String> {
    let mut input = input;
    document(&mut input).map_err(|_| {
        let context = input.lines().next().unwrap_or("").trim();
        if context.is_empty() {
            "syntax error in s-expression: unexpected end of input".to_string()
        } else {
            format!("syntax error in s-expression: unexpected `{context}`")
        }
    })
}

fn document(input: &mut &str) -> winnow::Result<Sexp> {
    let value = datum.parse_next(input)?;
    skip_ws(input)?;
    if !input.is_empty() {
        return Err(winnow::error::ParserError::from_input(input));
    }
    Ok(value)
}

fn skip_ws(input: &mut &str) -> winnow::Result<()> {
    loop {
        multispace0.parse_next(input)?;
        if input.starts_with(';') {
            till_line_ending.parse_next(input)?;
        } else {
            return Ok(());
        }
    }
}

fn datum(input: &mut &str) -> winnow::Result<Sexp> {
    skip_ws(input)?;
    alt((
        list,
        quoted,
        string_lit.map(Sexp::Str),
        token.map(Sexp::token),
    ))
    .parse_next(input)
}

fn token<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, '(' | ')' | '"' | '\'' | ';')
    })
    .parse_next(input)
}

fn quoted(input: &mut &str) -> winnow::Result<Sexp> {
    "'".parse_next(input)?;
    let inner = datum.parse_next(input)?;
    Ok(Sexp::List(vec![Sexp::token("quote"), inner]))
}

fn string_lit(input: &mut &str) -> winnow::Result<String> {
    "\"".parse_next(input)?;
    let mut text = String::new();
    loop {
        let c: char = any.parse_next(input)?;
        match c {
            '"' => return Ok(text),
            '\\' => {
                let escaped: char = any.parse_next(input)?;
                text.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            }
            c => text.push(c),
        }
    }
}

fn list(input: &mut &str) -> winnow::Result<Sexp> {
    "(".parse_next(input)?;
    let mut items: Vec<Sexp> = Vec::new();
    loop {
        skip_ws(input)?;
        if input.starts_with(')') {
            ")".parse_next(input)?;
            return Ok(Sexp::List(items));
        }
        let item = datum.parse_next(input)?;
        if item.as_token() == Some(".") {
            if items.is_empty() {
                return Err(winnow::error::ParserError::from_input(input));
            }
            let tail = datum.parse_next(input)?;
            skip_ws(input)?;
            ")".parse_next(input)?;
            return Ok(Sexp::Dotted(items, Box::new(tail)));
        }
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(items: &[Sexp]) -> Sexp {
        Sexp::List(items.to_vec())
    }

    #[test]
    fn parse_single_token() {
        assert_eq!(parse_sexp("42").unwrap(), Sexp::token("42"));
        assert_eq!(parse_sexp("  string=?  ").unwrap(), Sexp::token("string=?"));
    }

    #[test]
    fn parse_nested_list() {
        let parsed = parse_sexp("(+ 1 (f x))").unwrap();
        assert_eq!(
            parsed,
            list(&[
                Sexp::token("+"),
                Sexp::token("1"),
                list(&[Sexp::token("f"), Sexp::token("x")]),
            ])
        );
    }

    #[test]
    fn parse_empty_list() {
        assert_eq!(parse_sexp("()").unwrap(), list(&[]));
    }

    #[test]
    fn parse_string_with_escapes() {
        assert_eq!(
            parse_sexp(r#""a \"b\" c""#).unwrap(),
            Sexp::Str("a \"b\" c".to_string())
        );
    }

    #[test]
    fn parse_quote_sugar() {
        assert_eq!(
            parse_sexp("'(a b)").unwrap(),
            list(&[
                Sexp::token("quote"),
                list(&[Sexp::token("a"), Sexp::token("b")]),
            ])
        );
    }

    #[test]
    fn parse_dotted_pair() {
        assert_eq!(
            parse_sexp("(1 . 2)").unwrap(),
            Sexp::Dotted(vec![Sexp::token("1")], Box::new(Sexp::token("2")))
        );
    }

    #[test]
    fn parse_skips_comments() {
        let parsed = parse_sexp("; header\n(f ; inline\n x)\n; trailing").unwrap();
        assert_eq!(parsed, list(&[Sexp::token("f"), Sexp::token("x")]));
    }

    #[test]
    fn parse_rejects_unbalanced() {
        assert!(parse_sexp("(f x").is_err());
        assert!(parse_sexp(")").is_err());
    }

    #[test]
    fn parse_rejects_trailing_datum() {
        let err = parse_sexp("1 2").unwrap_err();
        assert!(err.contains("unexpected `2`"), "got: {err}");
    }

    #[test]
    fn parse_rejects_empty_input() {
        let err = parse_sexp("   ").unwrap_err();
        assert!(err.contains("end of input"), "got: {err}");
    }

    #[test]
    fn parse_rejects_leading_dot() {
        assert!(parse_sexp("(. a)").is_err());
    }
}
