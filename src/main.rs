use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rox::ast_printer::AstPrinter;
use rox::interpreter::Interpreter;
use rox::parser::Parser;
use rox::scanner::{scan_all, Scanner};
use rox::session::{Session, EXIT_RUNTIME_ERROR, EXIT_STATIC_ERROR};

/// Exit status for invalid command‑line usage.
const EXIT_USAGE: i32 = 64;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print tokens as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file as a single expression and prints its AST
    Parse {
        filename: PathBuf,

        /// Print the AST as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },

    /// Starts an interactive prompt
    Repl,
}

/// Reads a UTF‑8 script through a read‑only memory map.
fn read_source(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).with_context(|| format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat file {:?}", filename))?
        .len();
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the mapping is read-only and copied out before it is dropped.
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map file {:?}", filename))?;
    let source = std::str::from_utf8(&mmap)
        .with_context(|| format!("File {:?} is not valid UTF-8", filename))?
        .to_owned();

    info!("Read {} bytes from {:?}", len, filename);

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // overridable with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(filename: &Path, json: bool) -> Result<()> {
    let source = read_source(filename)?;
    let mut tokenized = true;

    for result in Scanner::new(source.as_bytes()) {
        match result {
            Ok(token) if json => println!("{}", serde_json::to_string(&token)?),
            Ok(token) => println!("{}", token),
            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if !tokenized {
        debug!("Tokenization failed, exiting with code {}", EXIT_STATIC_ERROR);
        std::process::exit(EXIT_STATIC_ERROR);
    }

    Ok(())
}

fn parse(filename: &Path, json: bool) -> Result<()> {
    let source = read_source(filename)?;
    let (tokens, lex_errors) = scan_all(source.as_bytes());

    let parsed = Parser::new(&tokens).parse_expression();
    let errors: Vec<_> = match parsed {
        Ok(expr) if lex_errors.is_empty() => {
            if json {
                println!("{}", serde_json::to_string_pretty(&expr)?);
            } else {
                println!("{}", AstPrinter::print(&expr));
            }
            return Ok(());
        }
        Ok(_) => lex_errors,
        Err(errors) => lex_errors.into_iter().chain(errors).collect(),
    };

    for e in errors {
        eprintln!("{}", e);
    }
    std::process::exit(EXIT_STATIC_ERROR);
}

fn evaluate(filename: &Path) -> Result<()> {
    let source = read_source(filename)?;
    let (tokens, lex_errors) = scan_all(source.as_bytes());

    let expr = match Parser::new(&tokens).parse_expression() {
        Ok(expr) if lex_errors.is_empty() => expr,
        parsed => {
            let parse_errors = parsed.err().unwrap_or_default();
            for e in lex_errors.iter().chain(parse_errors.iter()) {
                eprintln!("{}", e);
            }
            std::process::exit(EXIT_STATIC_ERROR);
        }
    };

    let mut interpreter = Interpreter::new();
    match interpreter.evaluate_expression(&expr) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_RUNTIME_ERROR);
        }
    }

    Ok(())
}

fn run(filename: &Path) -> Result<()> {
    let source = read_source(filename)?;
    let mut session = Session::new();

    session.run(&source).context("Failed to run script")?;

    if let Some(code) = session.exit_code() {
        debug!("Script failed, exiting with code {}", code);
        std::process::exit(code);
    }

    info!("Program executed successfully");
    Ok(())
}

fn repl() -> Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        session.run(&line)?;
        session.reset_error();
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(), // --help / --version
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_USAGE);
        }
    };

    if args.log {
        init_logger()?;
    } else {
        Builder::new().filter_level(log::LevelFilter::Off).init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => tokenize(&filename, json),
        Commands::Parse { filename, json } => parse(&filename, json),
        Commands::Evaluate { filename } => evaluate(&filename),
        Commands::Run { filename } => run(&filename),
        Commands::Repl => repl(),
    }
}
