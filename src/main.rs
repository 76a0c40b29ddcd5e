//! Tempile CLI
//!
//! Usage:
//!   tempile [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --source-dir <DIR>  Directory include paths resolve against
//!   -c, --config <FILE>     Compile configuration (TOML format)
//!   --no-resolve            Stop after building the AST
//!   --sequential-ids        Deterministic include context ids
//!   -d, --debug             Log resolution steps to stderr (RUST_LOG also works)
//!   -h, --help              Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use tempile::{ast, compile, CompileConfig, IdStrategy};

#[derive(Parser)]
#[command(name = "tempile")]
#[command(about = "Parse and compose markup templates")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Directory include paths resolve against
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Compile configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after building the AST
    #[arg(long)]
    no_resolve: bool,

    /// Number include context ids ctx0, ctx1, ...
    #[arg(long)]
    sequential_ids: bool,

    /// Log resolution steps to stderr
    #[arg(short, long)]
    debug: bool,
}

fn log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still overrides the level picked here
    env_logger::Builder::new()
        .filter_level(log_level(cli.debug))
        .parse_default_env()
        .format_timestamp(None)
        .init();

    // Load config
    let mut config = match &cli.config {
        Some(path) => match CompileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => CompileConfig::default(),
    };
    if let Some(dir) = &cli.source_dir {
        config = config.with_source_dir(dir);
    }
    if cli.no_resolve {
        config = config.with_resolve(false);
    }
    if cli.sequential_ids {
        config = config.with_ids(IdStrategy::Sequential);
    }

    // Read input
    let (source, file_name) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match compile(&source, &file_name, &config) {
        Ok(root) => print!("{}", ast::dump(&root.children)),
        Err(e) => {
            // The error may point into an included file rather than the input
            let report = if e.file_name() == file_name {
                e.format(&source)
            } else {
                match fs::read_to_string(e.file_name()) {
                    Ok(text) => e.format(&text),
                    Err(_) => e.to_string(),
                }
            };
            eprintln!("{}", report);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_raises_log_level() {
        let cli = Cli::parse_from(["tempile", "--debug", "page.html"]);
        assert_eq!(log_level(cli.debug), LevelFilter::Debug);

        let cli = Cli::parse_from(["tempile", "page.html"]);
        assert_eq!(log_level(cli.debug), LevelFilter::Warn);
    }
}
