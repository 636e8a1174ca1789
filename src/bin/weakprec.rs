//! Command-line interface for weakprec
//! This binary runs sources through the lexer and the weak precedence parser and prints one
//! stage of the result.
//!
//! Usage:
//!   weakprec process `<path>` `<format>` [--grammar `<yaml>`]  - Process a file and output to stdout
//!   weakprec `<path>` `<format>`                            - Same as process (default command)
//!   weakprec table [--grammar `<yaml>`] [--json]            - Print the action table
//!   weakprec formats                                      - List all available formats
//!
//! Set `RUST_LOG=debug` (or `trace`) to see table construction and parser steps.

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::{fmt, EnvFilter};
use weakprec::weakprec::grammar::GrammarConfig;
use weakprec::weakprec::processor::{
    available_formats, process_file, process_source, ProcessingError, ProcessingSpec,
};
use weakprec::weakprec::Frontend;

fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .long("grammar")
        .short('g')
        .help("YAML grammar to use instead of the bundled program grammar")
        .value_name("YAML")
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("weakprec")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A lexer and weak precedence parser for a small imperative language")
        .subcommand_required(false)
        .arg_required_else_help(true)
        // Default command args
        .arg(
            Arg::new("path")
                .help("Path to the source file to process")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .help("Output format (e.g., tokens-simple, tree-treeviz)")
                .index(2),
        )
        .arg(grammar_arg())
        // Subcommands
        .subcommand(
            Command::new("process")
                .about("Process a file and output to stdout (default command)")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file to process")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .help("Output format (e.g., tokens-simple, tree-treeviz)")
                        .required(true)
                        .index(2),
                )
                .arg(grammar_arg()),
        )
        .subcommand(
            Command::new("table")
                .about("Print the action table of a grammar")
                .arg(grammar_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the table as JSON instead of a grid")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("formats").about("List all available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("process", process_matches)) => {
            let path = required(process_matches, "path");
            let format_str = required(process_matches, "format");
            handle_process_command(process_matches, path, format_str);
        }
        Some(("table", table_matches)) => {
            let format_str = if table_matches.get_flag("json") {
                "table-json"
            } else {
                "table-simple"
            };
            // The table does not depend on any source
            handle_source_free_command(table_matches, format_str);
        }
        Some(("formats", _)) => {
            handle_formats_command();
        }
        None => {
            let path = matches.get_one::<String>("path");
            let format = matches.get_one::<String>("format");

            match (path, format) {
                (Some(p), Some(f)) => handle_process_command(&matches, p, f),
                _ => {
                    eprintln!("Error: both <path> and <format> are required");
                    std::process::exit(1);
                }
            }
        }
        Some((other, _)) => {
            eprintln!("Error: unknown command {}", other);
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Error: missing <{}>", name);
            std::process::exit(1);
        }
    }
}

/// Load the frontend for `--grammar`, or the bundled program grammar.
fn load_frontend(matches: &ArgMatches) -> Result<Frontend, ProcessingError> {
    let frontend = match matches.get_one::<String>("grammar") {
        Some(path) => Frontend::new(&GrammarConfig::from_file(path)?)?,
        None => Frontend::program()?,
    };
    Ok(frontend)
}

/// Handle the process command
fn handle_process_command(matches: &ArgMatches, path: &str, format_str: &str) {
    let result = ProcessingSpec::from_string(format_str).and_then(|spec| {
        let frontend = load_frontend(matches)?;
        process_file(&frontend, path, &spec)
    });

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(
                e,
                ProcessingError::InvalidFormat(_)
                    | ProcessingError::InvalidStage(_)
                    | ProcessingError::InvalidFormatType(_)
            ) {
                eprintln!("\nAvailable formats:");
                for format in available_formats() {
                    eprintln!("  {}", format);
                }
            }
            std::process::exit(1);
        }
    }
}

fn handle_source_free_command(matches: &ArgMatches, format_str: &str) {
    let result = ProcessingSpec::from_string(format_str).and_then(|spec| {
        let frontend = load_frontend(matches)?;
        process_source(&frontend, "", &spec)
    });

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available formats:");
    for format in available_formats() {
        println!("  {}", format);
    }
}
