use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::{ArgAction, Parser, Subcommand};
use scriptc::{
    ast::ast::Program,
    display_error,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::registry::{Registry, RegistryError},
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scriptc", about = "Tokenize and type check scripts")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the tokens of a source file
    Tokens {
        file: PathBuf,
        /// Keep comments and whitespace, and turn unrecognised text into error tokens
        #[arg(long)]
        edit: bool,
        /// Print the tokens as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// JSON file describing the built-in objects, properties and functions
        #[arg(long)]
        registry: Option<PathBuf>,
    },
    /// Parse and type check a source file
    Check {
        file: PathBuf,
        #[arg(long)]
        registry: Option<PathBuf>,
    },
    /// Print the typed syntax tree of a source file as JSON
    Ast {
        file: PathBuf,
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Already rendered against the source by `display_error`.
    #[error("{0}")]
    Source(Error),
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "warn",
        1 => "scriptc=debug",
        _ => "scriptc=trace",
    }
}

fn read_source(file: &Path) -> Result<String, CliError> {
    fs::read_to_string(file).map_err(|source| CliError::Io {
        path: file.to_path_buf(),
        source,
    })
}

fn load_registry(path: Option<&Path>) -> Result<Registry, CliError> {
    match path {
        Some(path) => Ok(Registry::load(path)?),
        None => Ok(Registry::new()),
    }
}

/// Renders a source error and wraps it for the exit path.
fn source_error(error: Error, source: &str, file: &Path) -> CliError {
    display_error(&error, source, &file.to_string_lossy());
    CliError::Source(error)
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Tokens {
            file,
            edit,
            json,
            registry,
        } => {
            let registry = load_registry(registry.as_deref())?;
            let source = read_source(&file)?;

            let start = Instant::now();
            let stream = tokenize(&source, edit, &registry)
                .map_err(|error| source_error(error, &source, &file))?;
            info!("Tokenized in {:?}", start.elapsed());

            if json {
                println!("{}", serde_json::to_string_pretty(&stream.tokens)?);
            } else {
                for token in stream.tokens.iter() {
                    token.debug();
                }
                println!("{} tokens, {} lines", stream.tokens.len(), stream.lines);
            }
        }
        Command::Check { file, registry } => {
            let program = check_file(&file, registry.as_deref())?;
            println!(
                "{}: ok ({} statements)",
                file.to_string_lossy(),
                program.len()
            );
        }
        Command::Ast { file, registry } => {
            let program = check_file(&file, registry.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&program)?);
        }
    }

    Ok(())
}

fn check_file(file: &Path, registry: Option<&Path>) -> Result<Program, CliError> {
    let registry = load_registry(registry)?;
    let source = read_source(file)?;

    let start = Instant::now();
    let stream =
        tokenize(&source, false, &registry).map_err(|error| source_error(error, &source, file))?;
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let program =
        parse(stream.tokens, &registry).map_err(|error| source_error(error, &source, file))?;
    info!("Parsed in {:?}", parse_start.elapsed());
    info!("Total time: {:?}", start.elapsed());

    Ok(program)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Source(error)) => {
            debug!(kind = %error.kind(), "source rejected");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_defaults() {
        assert_eq!(directive_for_verbosity(0), "warn");
        assert_eq!(directive_for_verbosity(1), "scriptc=debug");
        assert_eq!(directive_for_verbosity(5), "scriptc=trace");
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["scriptc", "-vv", "tokens", "main.src", "--edit"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Tokens { edit: true, json: false, .. }));

        let cli =
            Cli::try_parse_from(["scriptc", "check", "main.src", "--registry", "host.json"])
                .unwrap();
        match cli.command {
            Command::Check { file, registry } => {
                assert_eq!(file, PathBuf::from("main.src"));
                assert_eq!(registry, Some(PathBuf::from("host.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn missing_registry_is_reported() {
        let result = load_registry(Some(Path::new("does/not/exist.json")));
        assert!(matches!(result, Err(CliError::Registry(_))));
    }
}
