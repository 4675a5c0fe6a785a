//! Command-line interface for geocoder-abbreviations
//!
//! Usage:
//!   abbrev compile [LANG] [--singletons] [--advanced] [--format `<format>`]  - Compile token tables
//!   abbrev tokenize `<text>` [--format `<format>`]                            - Tokenize an address
//!   abbrev languages                                                      - List available languages
//!   abbrev check [LANG]                                                   - Validate advanced tables
//!   abbrev list-formats                                                   - List output formats
//!
//! `abbrev.toml` in the working directory is read when present. `--config <file>`
//! layers another TOML file over it and `--tokens-dir <dir>` reads tables from a
//! directory instead of the bundled ones.

use clap::{Arg, ArgAction, ArgMatches, Command};
use config::ConfigError;
use geocoder_abbreviations::compiling::{CompileOptions, Compiler};
use geocoder_abbreviations::formats::FormatRegistry;
use geocoder_abbreviations::settings::{AbbrevConfig, Loader};
use geocoder_abbreviations::sources::{BundledSource, DirectorySource, TokenSource};
use geocoder_abbreviations::tokenize;
use geocoder_abbreviations::validation::audit;
use serde::Serialize;
use std::collections::BTreeMap;
use std::process;

fn main() {
    init_tracing();

    let format_arg = || {
        Arg::new("format")
            .long("format")
            .short('f')
            .help("Output format (e.g., 'json', 'json-compact', 'yaml')")
    };

    let matches = Command::new("abbrev")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize addresses and compile geocoder abbreviation tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the default configuration"),
        )
        .arg(
            Arg::new("tokens-dir")
                .long("tokens-dir")
                .global(true)
                .help("Directory of <code>.json token tables to use instead of the bundled ones"),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile one language's table, or all of them")
                .arg(
                    Arg::new("lang")
                        .help("Two-letter language code; omit for every language")
                        .index(1),
                )
                .arg(
                    Arg::new("singletons")
                        .long("singletons")
                        .help("Keep groups with a single token")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("advanced")
                        .long("advanced")
                        .help("Output advanced groups instead of merged flat groups")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("sequential")
                        .long("sequential")
                        .help("Compile languages one after another")
                        .action(ArgAction::SetTrue),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("tokenize")
                .about("Split an address into tokens and separators")
                .arg(
                    Arg::new("text")
                        .help("Address text to tokenize")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg()),
        )
        .subcommand(Command::new("languages").about("List languages with a token table"))
        .subcommand(
            Command::new("check")
                .about("Check advanced tables for schema and boundary problems")
                .arg(
                    Arg::new("lang")
                        .help("Two-letter language code; omit for every language")
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });
    let source = make_source(&config);

    match matches.subcommand() {
        Some(("compile", compile_matches)) => {
            let lang = compile_matches.get_one::<String>("lang");
            handle_compile_command(lang.map(String::as_str), &config, source);
        }
        Some(("tokenize", tokenize_matches)) => {
            let text = tokenize_matches.get_one::<String>("text").unwrap();
            handle_tokenize_command(text, &config);
        }
        Some(("languages", _)) => handle_languages_command(source),
        Some(("check", check_matches)) => {
            let lang = check_matches.get_one::<String>("lang");
            handle_check_command(lang.map(String::as_str), source);
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

/// Enable with `RUST_LOG=geocoder_abbreviations=debug`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Defaults, then `./abbrev.toml`, then `--config`, then command-line flags.
fn load_config(matches: &ArgMatches) -> Result<AbbrevConfig, ConfigError> {
    let sub = matches.subcommand().map(|(_, m)| m);
    let string_arg = |id: &str| {
        sub.and_then(|m| m.try_get_one::<String>(id).ok().flatten())
            .or_else(|| matches.try_get_one::<String>(id).ok().flatten())
    };
    let flag = |id: &str| {
        sub.and_then(|m| m.try_get_one::<bool>(id).ok().flatten())
            .copied()
            .unwrap_or(false)
    };

    let mut loader = Loader::new();
    if let Ok(cwd) = std::env::current_dir() {
        loader = loader.with_project_file(cwd);
    }
    if let Some(path) = string_arg("config") {
        loader = loader.with_file(path);
    }
    if let Some(dir) = string_arg("tokens-dir") {
        loader = loader.set_override("source.tokens_dir", dir.as_str())?;
    }
    if let Some(format) = string_arg("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if flag("singletons") {
        loader = loader.set_override("compile.include_singletons", true)?;
    }
    if flag("advanced") {
        loader = loader.set_override("compile.advanced", true)?;
    }
    if flag("sequential") {
        loader = loader.set_override("compile.parallel", false)?;
    }
    loader.build()
}

fn make_source(config: &AbbrevConfig) -> Box<dyn TokenSource> {
    match config.source.tokens_dir() {
        Some(dir) => Box::new(DirectorySource::new(dir)),
        None => Box::new(BundledSource::new()),
    }
}

fn print_formatted<T: Serialize>(item: &T, format: &str) {
    let registry = FormatRegistry::with_defaults();
    let output = registry.serialize(item, format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Available formats: {}", registry.list_formats().join(", "));
        process::exit(1);
    });
    println!("{}", output.trim_end());
}

/// Handle the compile command
fn handle_compile_command(lang: Option<&str>, config: &AbbrevConfig, source: Box<dyn TokenSource>) {
    let compiler = Compiler::with_source(source).with_options(config.compile);
    let compiled = compiler.compile(lang).unwrap_or_else(|e| {
        eprintln!("Compile error: {}", e);
        process::exit(1);
    });
    print_formatted(&compiled, &config.output.format);
}

/// Handle the tokenize command
fn handle_tokenize_command(text: &str, config: &AbbrevConfig) {
    print_formatted(&tokenize(text), &config.output.format);
}

/// Handle the languages command
fn handle_languages_command(source: Box<dyn TokenSource>) {
    let codes = source.language_codes().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    for code in codes {
        println!("{}", code);
    }
}

/// Handle the check command
///
/// Without a language every table is checked, the global rules included.
fn handle_check_command(lang: Option<&str>, source: Box<dyn TokenSource>) {
    let compiler = Compiler::with_source(source).with_options(CompileOptions {
        include_singletons: true,
        advanced: true,
        parallel: false,
    });
    let tables = match lang {
        Some(code) => compiler
            .compile_language(code)
            .map(|table| BTreeMap::from([(code.to_string(), table)])),
        None => compiler.compile_all(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Compile error: {}", e);
        process::exit(1);
    });

    let mut problems = 0;
    for (name, table) in &tables {
        for finding in audit(table) {
            println!("{}: {}", name, finding);
            problems += 1;
        }
    }

    if problems > 0 {
        eprintln!("{} problem(s) found", problems);
        process::exit(1);
    }
    println!("{} table(s) checked, no problems found", tables.len());
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for (name, description) in FormatRegistry::with_defaults().describe() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
