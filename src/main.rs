use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use sprig_lang::cli::{self, CliError, Coercion, EvalOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sprig")]
#[command(about = "Sprig - an expression language for templating and data binding")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum CoerceArg {
    Bool,
    Int,
    Number,
    String,
    List,
    Map,
}

impl From<CoerceArg> for Coercion {
    fn from(arg: CoerceArg) -> Coercion {
        match arg {
            CoerceArg::Bool => Coercion::Bool,
            CoerceArg::Int => Coercion::Int,
            CoerceArg::Number => Coercion::Number,
            CoerceArg::String => Coercion::String,
            CoerceArg::List => Coercion::List,
            CoerceArg::Map => Coercion::Map,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against a JSON context
    Eval {
        /// The expression to evaluate
        expr: String,

        /// JSON context object (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Coerce the result instead of failing on evaluation errors
        #[arg(long = "as", value_enum)]
        coerce: Option<CoerceArg>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Render template text containing {{ expr }} regions
    Template {
        /// The template text
        text: String,

        /// JSON context object (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// List the context names an expression depends on
    Deps {
        /// The expression to inspect
        expr: String,
    },

    /// Parse and describe an iteration header like "item in items"
    Iteration {
        /// The iteration header
        header: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expr,
            input,
            coerce,
            pretty,
        } => run_eval(expr, input, coerce, pretty),
        Commands::Template { text, input } => {
            stdin_fallback(input).and_then(|input| cli::execute_template(&text, input.as_deref()))
        }
        Commands::Deps { expr } => cli::execute_deps(&expr),
        Commands::Iteration { header } => cli::execute_iteration(&header),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Uses piped stdin as the JSON context when --input is absent.
fn stdin_fallback(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_eval(
    expr: String,
    input: Option<String>,
    coerce: Option<CoerceArg>,
    pretty: bool,
) -> Result<String, CliError> {
    let input = stdin_fallback(input)?;
    let options = EvalOptions {
        expr,
        input,
        coerce: coerce.map(Coercion::from),
        pretty,
    };
    cli::execute_eval(&options)
}
