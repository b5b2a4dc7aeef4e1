//! Cyntax CLI
//!
//! Command-line front end: tokenize and parse a source file (or stdin) and
//! print the resulting syntax tree.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use cyntax::render::{self, DEFAULT_WIDTH};
use cyntax::{CyntaxResult, Diagnostic, Tokenizer, DEFAULT_SOURCE_NAME, VERSION};

struct Options {
    show_tokens: bool,
    dump: bool,
    expand: bool,
    width: usize,
    path: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            show_tokens: false,
            dump: false,
            expand: false,
            width: DEFAULT_WIDTH,
            path: None,
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args[1..]) {
        Ok(Some(options)) => options,
        Ok(None) => return,
        Err(message) => {
            eprintln!("{}", message);
            print_usage();
            process::exit(1);
        }
    };

    let (source, source_name) = match read_source(options.path.as_deref()) {
        Ok(input) => input,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };

    if let Err(e) = run(&source, &source_name, &options) {
        eprintln!("{}", Diagnostic::with_source(&e, &source));
        process::exit(1);
    }
}

/// `Ok(None)` when the arguments only asked for help or the version
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tokens" | "-t" => options.show_tokens = true,
            "--dump" | "-d" => options.dump = true,
            "--expand" | "-e" => options.expand = true,
            "--width" | "-w" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("Missing value for {}", arg))?;
                options.width = value
                    .parse()
                    .map_err(|_| format!("Invalid width '{}'", value))?;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("cyntax {}", VERSION);
                return Ok(None);
            }
            _ if arg.starts_with('-') => return Err(format!("Unknown flag: {}", arg)),
            _ if options.path.is_some() => return Err(format!("Unexpected argument: {}", arg)),
            _ => options.path = Some(arg.clone()),
        }
    }

    Ok(Some(options))
}

fn print_usage() {
    eprintln!("Usage: cyntax [OPTIONS] [file]");
    eprintln!("       cyntax --help");
}

fn print_help() {
    println!("cyntax v{} - tokenizer and parser front end", VERSION);
    println!();
    println!("USAGE:");
    println!("    cyntax [OPTIONS] [file]");
    println!();
    println!("OPTIONS:");
    println!("    -t, --tokens     Show tokenization output before parsing");
    println!("    -d, --dump       Print the syntax tree's debug structure");
    println!("    -e, --expand     List imported symbols in the tree");
    println!("    -w, --width N    Maximum tree line width (default {})", DEFAULT_WIDTH);
    println!("    -V, --version    Show version");
    println!("    -h, --help       Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    cyntax main.cyn            Print the syntax tree of a file");
    println!("    cyntax --tokens main.cyn   Show tokens, then the tree");
    println!("    echo '1 + 2;' | cyntax     Read the program from stdin");
}

/// Contents and display name of the input
fn read_source(path: Option<&str>) -> Result<(String, String), String> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read file '{}': {}", path, e))?;
            Ok((source, path.to_string()))
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok((source, DEFAULT_SOURCE_NAME.to_string()))
        }
    }
}

fn run(source: &str, source_name: &str, options: &Options) -> CyntaxResult<()> {
    if options.show_tokens {
        show_tokens(source, source_name)?;
    }

    let program = cyntax::parse(source, source_name)?;

    if options.dump {
        println!("{:#?}", program);
    } else if options.expand {
        print!("{}", render::render_expanded(&program, options.width));
    } else {
        print!("{}", render::render(&program, options.width));
    }

    Ok(())
}

fn show_tokens(source: &str, source_name: &str) -> CyntaxResult<()> {
    let tokens = Tokenizer::new(source, source_name).tokenize()?;

    println!("Tokens for '{}':", source_name);
    println!("{}", "=".repeat(60));

    for (i, token) in tokens.iter().enumerate() {
        println!(
            "{:4}: {:>4}:{:<4} {:20} | {:?}",
            i,
            token.line,
            token.column,
            token.describe(),
            token.value
        );
    }

    println!("{}", "=".repeat(60));
    println!("Total tokens: {}", tokens.len());

    Ok(())
}
