pub mod graph_ast;
pub mod graph_mapper;
pub mod graph_renderer;
pub mod id_gen;
pub mod l4_ast;
pub mod l4_parser;
pub mod sexp;

use tracing::debug;

use crate::graph_ast::Direction;
use crate::l4_ast::Parsed;

/// Returned for every input that is neither a program nor an expression.
pub const SYNTAX_ERROR: &str = "wrong syntax";

/// Renders L4 source (a whole program or a single expression) as a Mermaid graph.
pub fn render(input: &str) -> Result<String, String> {
    render_with_options(input, Direction::TopDown)
}

pub fn render_with_options(input: &str, direction: Direction) -> Result<String, String> {
    let parsed = parse_source(input)?;
    let graph = graph_mapper::map_to_graph_with_direction(&parsed, direction);
    Ok(graph_renderer::render(&graph))
}

/// Classifies the input as a program or a single expression.
///
/// Input headed by `(L4 ...` is only ever tried as a program; a program that
/// fails to parse is not retried as an expression.
pub fn parse_source(input: &str) -> Result<Parsed, String> {
    if input.trim().is_empty() {
        debug!("empty input");
        return Err(SYNTAX_ERROR.to_string());
    }
    let sexp = sexp::parse_sexp(input).map_err(syntax_error)?;
    if l4_parser::is_program_header(&sexp) {
        debug!("parsing as program");
        l4_parser::parse_program(&sexp)
            .map(Parsed::Program)
            .map_err(syntax_error)
    } else {
        debug!("parsing as expression");
        l4_parser::parse_exp(&sexp)
            .map(Parsed::Exp)
            .map_err(syntax_error)
    }
}

fn syntax_error(detail: String) -> String {
    debug!(%detail, "rejected source");
    SYNTAX_ERROR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_program_works() {
        let output = render("(L4 (define x 5))").unwrap();
        assert!(output.starts_with("graph TD\nProgram_1[Program] -->|exps| Exps_1[:]"));
    }

    #[test]
    fn render_expression_works() {
        let output = render("(+ 1 2)").unwrap();
        assert!(output.contains("AppExp_1[AppExp]"));
    }

    #[test]
    fn render_empty_input_returns_error() {
        assert_eq!(render("").unwrap_err(), SYNTAX_ERROR);
        assert_eq!(render("  \n ").unwrap_err(), SYNTAX_ERROR);
    }

    #[test]
    fn render_malformed_program_is_not_retried_as_expression() {
        assert_eq!(render("(L4)").unwrap_err(), SYNTAX_ERROR);
        assert_eq!(render("(L4 (if 1 2))").unwrap_err(), SYNTAX_ERROR);
    }

    #[test]
    fn render_unreadable_input_returns_error() {
        assert_eq!(render("(+ 1").unwrap_err(), SYNTAX_ERROR);
        assert_eq!(render("(lambda x)").unwrap_err(), SYNTAX_ERROR);
    }

    #[test]
    fn parse_source_classifies() {
        assert!(matches!(parse_source("(L4 1)"), Ok(Parsed::Program(_))));
        assert!(matches!(parse_source("(define x 1)"), Ok(Parsed::Exp(_))));
        assert!(matches!(parse_source("x"), Ok(Parsed::Exp(_))));
    }

    #[test]
    fn render_with_left_right_direction() {
        let output = render_with_options("(f)", Direction::LeftRight).unwrap();
        assert!(output.starts_with("graph LR\n"));
    }
}
