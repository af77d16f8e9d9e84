//! tinyforth - interactive interpreter for a small Forth dialect
//!
//! Usage:
//!   tinyforth                      # Interactive session
//!   tinyforth --config words.toml  # Seed composite words from a file
//!   tinyforth < script.fs          # Run a script (must end with `bye`)
//!   tinyforth --words              # List the dictionary and exit
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser as ClapParser;
use tinyforth_runtime::{
    BufReadSource, Builtin, Config, ConfigError, Interpreter, SessionError, SplitMode, session,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod editor;

use editor::EditorSource;

#[derive(ClapParser, Debug)]
#[command(name = "tinyforth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive interpreter for a small Forth dialect", long_about = None)]
struct Args {
    /// TOML configuration file (interpreter settings and composite words)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Deepest allowed nesting of composite word expansion
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// How lines are split into tokens: "space" or "whitespace"
    #[arg(long, value_name = "MODE")]
    split: Option<SplitMode>,

    /// Don't print the startup banner
    #[arg(short, long)]
    quiet: bool,

    /// Don't load or save line history
    #[arg(long)]
    no_history: bool,

    /// Print the dictionary and exit
    #[arg(long)]
    words: bool,
}

fn main() {
    init_logging();
    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut interpreter = Interpreter::from_config(&config);

    if args.words {
        print!("{}", dictionary_listing(&interpreter));
        return;
    }

    if !args.quiet {
        print!("{}", banner());
    }

    if let Err(e) = run_session(&args, &mut interpreter, &config.interpreter.prompt) {
        error!("{}", e);
        process::exit(1);
    }
    info!("session ended");
}

/// Install the stderr subscriber; `RUST_LOG` overrides the default level
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load the config file (or the embedded default) and apply CLI overrides
fn resolve_config(args: &Args) -> Result<Config, ConfigError> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            Config::load(path)?
        }
        None => Config::embedded()?,
    };
    if let Some(max_depth) = args.max_depth {
        config.interpreter.max_depth = max_depth;
    }
    if let Some(split) = args.split {
        config.interpreter.split = split;
    }
    config.validate()?;
    Ok(config)
}

fn banner() -> String {
    format!(
        "tinyforth version {}\nType \"bye\" to exit\n\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Native words with their stack effects, then composite words
fn dictionary_listing(interpreter: &Interpreter) -> String {
    let mut out = String::from("Native words:\n");
    for builtin in Builtin::ALL {
        out.push_str(&format!(
            "  {:<8} {}\n",
            builtin.name(),
            builtin.stack_effect()
        ));
    }
    let composites = interpreter.dictionary().composites();
    if !composites.is_empty() {
        out.push_str("Composite words:\n");
        for word in composites {
            out.push_str(&format!("  {:<8} {}\n", word.name(), word.body()));
        }
    }
    out
}

/// Read from the terminal when there is one, otherwise from piped stdin
fn run_session(
    args: &Args,
    interpreter: &mut Interpreter,
    prompt: &str,
) -> Result<(), SessionError> {
    let mut out = io::stdout();
    out.flush()?;

    if io::stdin().is_terminal() {
        let history = if args.no_history {
            None
        } else {
            editor::history_file()
        };
        let mut source = EditorSource::new(history)?;
        let result = session::run(interpreter, &mut source, &mut out, prompt);
        source.save_history();
        result
    } else {
        let mut source = BufReadSource::new(io::stdin().lock());
        session::run(interpreter, &mut source, &mut out, prompt)
    }
}
