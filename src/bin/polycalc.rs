use std::{fs, io, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;
use log::{LevelFilter, info};

use polycalc::{
    Operation, ParseOptions, PolycalcError, Repl, SessionEnd, parse_polynomial_with,
    repl::{EditorSource, ScriptSource},
};

#[derive(Parser)]
#[command(author, version, about = "Polynomial calculator with exact integer arithmetic")]
struct Args {
    /// Largest exponent accepted in a polynomial
    #[arg(long, global = true, default_value_t = ParseOptions::DEFAULT_MAX_DEGREE)]
    max_degree: u32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive calculator session
    Repl,
    /// Replay a file of calculator input, one answer per line
    Run { script: PathBuf },
    /// Apply one operation (+, -, *, D) and print the result
    Eval {
        #[arg(allow_hyphen_values = true)]
        left: String,
        #[arg(allow_hyphen_values = true)]
        op: String,
        #[arg(allow_hyphen_values = true)]
        right: Option<String>,
    },
    /// Print the coefficient vector and canonical form of a polynomial
    Parse { expr: String },
}

fn main() -> Result<ExitCode, PolycalcError> {
    let args = Args::parse();
    init_logging(args.verbose);
    info!("polycalc v{} starting", env!("CARGO_PKG_VERSION"));

    let options = ParseOptions::default().with_max_degree(args.max_degree);
    match args.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let mut repl = Repl::new(EditorSource::new()?, io::stdout()).with_options(options);
            match repl.run()? {
                SessionEnd::Quit => Ok(ExitCode::SUCCESS),
                SessionEnd::EndOfInput => Ok(ExitCode::FAILURE),
            }
        }
        Command::Run { script } => {
            let text = fs::read_to_string(&script)?;
            let mut repl =
                Repl::new(ScriptSource::from_text(&text), io::stdout()).with_options(options);
            repl.run()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Eval { left, op, right } => eval(&left, &op, right.as_deref(), &options),
        Command::Parse { expr } => {
            let poly = parse_polynomial_with(&expr, &options)?;
            println!("{:?}", poly.coefficients());
            println!("{poly}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn eval(
    left: &str,
    op: &str,
    right: Option<&str>,
    options: &ParseOptions,
) -> Result<ExitCode, PolycalcError> {
    let operation = match op.parse::<Operation>() {
        Ok(operation) => operation,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    if operation.is_unary() && right.is_some() {
        eprintln!("error: operation `{operation}` takes a single polynomial");
        return Ok(ExitCode::FAILURE);
    }
    let left = parse_polynomial_with(left, options)?;
    let right = right
        .map(|text| parse_polynomial_with(text, options))
        .transpose()?;
    match operation.apply(&left, right.as_ref()) {
        Some(result) => {
            println!("{result}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("error: operation `{operation}` needs a second polynomial");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    let level = match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}
