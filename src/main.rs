use std::io::Read;

use clap::{Parser, ValueEnum};
use l4_mermaid::graph_ast::Direction;
use tracing::Level;

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    #[value(name = "TD")]
    Td,
    #[value(name = "LR")]
    Lr,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Td => Direction::TopDown,
            DirectionArg::Lr => Direction::LeftRight,
        }
    }
}

#[derive(Parser)]
#[command(name = "l4-mermaid", about = "Render the AST of an L4 program as a Mermaid graph")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Diagram direction
    #[arg(long, short = 'd', value_enum, default_value = "TD")]
    direction: DirectionArg,

    /// Log pipeline decisions to stderr (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    match l4_mermaid::render_with_options(&input, cli.direction.into()) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}
