//! Command-line interface for julia-indent
//! This binary reindents Julia files and dumps what the engine sees in them.
//!
//! Usage:
//!   jlindent indent `<path>` [--write | --check] [--indent-unit `<n>`]  - Reindent a file
//!   jlindent classify `<path>` [--format json|yaml] [--escapes]       - Dump the spans
//!   jlindent tokens `<path>` [--format json|yaml]                     - Dump the tokens
//!   jlindent defun `<path>` --offset `<n>` [--count `<n>`] [--end] [--prefer-end]
//!                                                                     - Print a definition boundary
//!
//! Settings come from the built-in defaults, then `jlindent.toml` in the current directory
//! when present, then `--config`, then command-line flags.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use julia_indent::{
    classify, escapes, find_defun_end, find_defun_start, tokens, Indenter, IndentError,
    JlindentConfig, Loader,
};
use serde::Serialize;
use std::fs;
use std::path::Path;

const LOCAL_CONFIG: &str = "jlindent.toml";

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let code = match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    std::process::exit(code);
}

fn cli() -> Command {
    let path = Arg::new("path")
        .help("Path to the Julia file")
        .required(true)
        .index(1);
    let format = Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format")
        .value_parser(["json", "yaml"])
        .default_value("json");

    Command::new("jlindent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Indent and navigate Julia source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults and ./jlindent.toml")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("indent")
                .about("Reindent a file and print the result")
                .arg(path.clone())
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .help("Rewrite the file in place")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("check"),
                )
                .arg(
                    Arg::new("check")
                        .long("check")
                        .help("Exit with status 2 when the file is not indented")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("indent-unit")
                        .long("indent-unit")
                        .help("Columns per nesting level")
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("classify")
                .about("Dump the code, string and comment spans of a file")
                .arg(path.clone())
                .arg(format.clone())
                .arg(
                    Arg::new("escapes")
                        .long("escapes")
                        .help("Dump the escape sequences inside literals instead")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the structural tokens of a file")
                .arg(path.clone())
                .arg(format),
        )
        .subcommand(
            Command::new("defun")
                .about("Print the start (or end) offset of a definition around a position")
                .arg(path)
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .help("Byte offset to start from")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .help("Definitions to move over; negative moves forward")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(isize))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .help("Print the end of the enclosing definition instead")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("prefer-end")
                        .long("prefer-end")
                        .help("Count a position just past a definition as inside it")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn run(matches: &ArgMatches) -> Result<i32, IndentError> {
    match matches.subcommand() {
        Some(("indent", sub)) => handle_indent_command(sub),
        Some(("classify", sub)) => {
            let source = read_source(path_arg(sub))?;
            let spans = classify(&source);
            if sub.get_flag("escapes") {
                print_dump(&escapes(&source, &spans), format_arg(sub))?;
            } else {
                print_dump(&spans, format_arg(sub))?;
            }
            Ok(0)
        }
        Some(("tokens", sub)) => {
            let source = read_source(path_arg(sub))?;
            let spans = classify(&source);
            let scanned: Vec<_> = tokens(&source, &spans).collect();
            print_dump(&scanned, format_arg(sub))?;
            Ok(0)
        }
        Some(("defun", sub)) => handle_defun_command(sub),
        _ => unreachable!(),
    }
}

fn load_config(
    matches: &ArgMatches,
    indent_unit: Option<u32>,
) -> Result<JlindentConfig, IndentError> {
    let mut loader = Loader::default().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        tracing::info!(path = path.as_str(), "layering configuration file");
        loader = loader.with_file(path);
    }
    if let Some(unit) = indent_unit {
        loader = loader.set_override("indent.unit", i64::from(unit))?;
    }
    loader.build()
}

/// Handle the indent command
fn handle_indent_command(sub: &ArgMatches) -> Result<i32, IndentError> {
    let path = path_arg(sub);
    let config = load_config(sub, sub.get_one::<u32>("indent-unit").copied())?;
    tracing::debug!(unit = config.indent_unit(), path, "indenting");

    let source = read_source(path)?;
    let indented = Indenter::new(config).reindent(&source);

    if sub.get_flag("check") {
        if indented == source {
            return Ok(0);
        }
        eprintln!("{}: not indented", path);
        return Ok(2);
    }
    if sub.get_flag("write") {
        if indented != source {
            fs::write(path, &indented).map_err(|e| IndentError::io(path, e))?;
        }
        return Ok(0);
    }
    print!("{}", indented);
    Ok(0)
}

/// Handle the defun command
fn handle_defun_command(sub: &ArgMatches) -> Result<i32, IndentError> {
    let source = read_source(path_arg(sub))?;
    let offset = sub.get_one::<usize>("offset").copied().unwrap_or(0);
    let count = sub.get_one::<isize>("count").copied().unwrap_or(1);

    let position = if sub.get_flag("end") {
        find_defun_end(&source, offset)
    } else {
        find_defun_start(&source, offset, count, sub.get_flag("prefer-end"))
    };
    println!("{}", position);
    Ok(0)
}

fn path_arg(sub: &ArgMatches) -> &str {
    sub.get_one::<String>("path").map(String::as_str).unwrap_or_default()
}

fn format_arg(sub: &ArgMatches) -> &str {
    sub.get_one::<String>("format").map(String::as_str).unwrap_or("json")
}

fn read_source(path: &str) -> Result<String, IndentError> {
    fs::read_to_string(Path::new(path)).map_err(|e| IndentError::io(path, e))
}

fn print_dump<T: Serialize + ?Sized>(value: &T, format: &str) -> Result<(), IndentError> {
    let rendered = match format {
        "yaml" => serde_yaml::to_string(value)?,
        _ => serde_json::to_string_pretty(value)? + "\n",
    };
    print!("{}", rendered);
    Ok(())
}
