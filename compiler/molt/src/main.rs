use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use molt::{explain_source, run_source, SourceError};
use molt_lexer::{tokenize, TokenType};
use molt_parser::{parse_source, render_snippet};
use molt_runtime::{Interpreter, RunConfig};

#[derive(Debug, Parser)]
#[command(
    name = "molt",
    version,
    about = "Run and explain programs written in mathematical notation",
    long_about = "molt evaluates definitions written the way they appear on paper:\n\
        set-builder notation, piecewise functions, finite sets and arithmetic.\n\n\
        EXAMPLES:\n\
        \n  molt run defs.molt                  Run a file and print its results\n\
        \n  molt run --explain defs.molt        Follow each result with its expression\n\
        \n  molt explain defs.molt              Read each statement back in words\n\
        \n  molt repl                           Start an interactive session\n\
        \n  echo 'eval 1 + 2' | molt run        Run code from stdin"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a molt source file
    #[command(
        about = "Run a molt source file and print its results",
        long_about = "Parses and runs a molt source file, printing the result of every\n\
            `eval` and `check` statement.\n\n\
            Reads from stdin if no file is given."
    )]
    Run(RunArgs),

    /// Describe each statement in words
    #[command(about = "Describe each statement of a molt source file in words")]
    Explain(ExplainArgs),

    /// Start an interactive Read-Eval-Print Loop
    #[command(
        about = "Start an interactive REPL session",
        long_about = "Start an interactive Read-Eval-Print Loop. Definitions persist\n\
            between lines, and input with an open `{` or `(` continues on the next line.\n\n\
            Commands:\n\
            \n  :help         Show available REPL commands\n\
            \n  :vars         List the session's bindings\n\
            \n  :load <file>  Run a file in the session\n\
            \n  :quit         Exit the REPL (also :q, :exit)"
    )]
    Repl,
}

#[derive(Debug, Args, Clone, Default)]
struct RunArgs {
    /// Input molt source file (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Follow every printed result with the expression that produced it
    #[arg(long)]
    explain: bool,
}

#[derive(Debug, Args, Clone)]
struct ExplainArgs {
    /// Input molt source file (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Debug)]
struct ReplSession {
    buffer: String,
    interpreter: Interpreter,
}

impl ReplSession {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            interpreter: Interpreter::new(RunConfig::default()),
        }
    }

    fn prompt(&self) -> &'static str {
        if self.buffer.is_empty() {
            "molt> "
        } else {
            "....> "
        }
    }

    /// Input is complete once every `{` and `(` it opens is closed.
    fn is_complete_input(s: &str) -> bool {
        let mut depth: i32 = 0;
        for token in tokenize(s) {
            match token.token_type {
                TokenType::LeftBrace | TokenType::LeftParen => depth += 1,
                TokenType::RightBrace | TokenType::RightParen => depth -= 1,
                _ => {}
            }
        }
        depth <= 0
    }

    fn handle_command(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed == ":help" {
            return (
                vec![
                    "commands: :help, :quit, :load <file>, :vars".to_string(),
                    "note: leave a `{` or `(` open to continue on the next line".to_string(),
                ],
                false,
            );
        }

        if trimmed == ":q" || trimmed == ":quit" || trimmed == ":exit" {
            return (Vec::new(), true);
        }

        if let Some(rest) = trimmed.strip_prefix(":load") {
            let path_s = rest.trim();
            if path_s.is_empty() {
                return (vec!["error: usage: :load <file>".to_string()], false);
            }
            let p = Path::new(path_s);
            let text = match fs::read_to_string(p) {
                Ok(t) => t,
                Err(e) => {
                    return (
                        vec![format!("error: failed to read '{}': {e}", p.display())],
                        false,
                    )
                }
            };
            (self.submit_source(&text), false)
        } else if trimmed == ":vars" {
            let vars = self.interpreter.variables();
            let names = vars.names();
            if names.is_empty() {
                return (vec!["(no session bindings)".to_string()], false);
            }
            let lines = names
                .into_iter()
                .filter_map(|name| vars.get(&name).map(|value| format!("{name} = {value}")))
                .collect();
            (lines, false)
        } else {
            (vec![format!("error: unknown command '{trimmed}'")], false)
        }
    }

    /// Returns the lines to print, whether to exit, and whether the input
    /// was submitted.
    fn handle_line(&mut self, line: &str) -> (Vec<String>, bool, bool) {
        let trimmed = line.trim();
        if self.buffer.is_empty() && trimmed.starts_with(':') {
            let (out, exit) = self.handle_command(trimmed);
            return (out, exit, true);
        }

        if trimmed.is_empty() {
            return (Vec::new(), false, false);
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');
        if Self::is_complete_input(&self.buffer) {
            let code = std::mem::take(&mut self.buffer);
            return (self.submit_source(&code), false, true);
        }
        (Vec::new(), false, false)
    }

    /// Runs `src` against the session. Bindings made before an error stay.
    fn submit_source(&mut self, src: &str) -> Vec<String> {
        let program = match parse_source(src) {
            Ok(p) => p,
            Err(err) => return vec![render_snippet(&err, src)],
        };
        let mut out = Vec::new();
        for statement in &program.statements {
            match self.interpreter.execute(statement) {
                Ok(Some(line)) => out.push(line),
                Ok(None) => {}
                Err(e) => {
                    out.push(format!("runtime error: {e}"));
                    break;
                }
            }
        }
        out
    }
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for_verbosity(verbose))
        .parse_default_env()
        .try_init();
}

/// Prints `lines`, or renders `err` to stderr. Returns the exit code.
fn report(result: Result<Vec<String>, SourceError>, source: &str) -> i32 {
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            0
        }
        Err(err) => {
            eprintln!("{}", err.render(source));
            1
        }
    }
}

fn run_file(args: &RunArgs) -> i32 {
    let source = match read_source_from_input(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let config = RunConfig {
        explain: args.explain,
    };
    report(run_source(&source, config), &source)
}

fn run_explain(args: &ExplainArgs) -> i32 {
    let source = match read_source_from_input(&args.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    report(explain_source(&source), &source)
}

fn run_repl() -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new();
    loop {
        let prompt = session.prompt();
        match rl.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit, _committed) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => {
                session.buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => {
                return 0;
            }
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

/// `molt file.molt --explain` is shorthand for `molt run file.molt --explain`.
fn normalize_cli_args(args: Vec<OsString>) -> Vec<OsString> {
    if args.len() <= 1 {
        return args;
    }

    let first = args[1].to_string_lossy();
    let is_known_subcommand = matches!(
        first.as_ref(),
        "run" | "explain" | "repl" | "help" | "--help" | "-h" | "--version" | "-V"
    );
    let is_global_flag = first.starts_with("-v") || first == "--verbose";
    if is_known_subcommand || is_global_flag {
        return args;
    }

    let mut out: Vec<OsString> = Vec::with_capacity(args.len() + 1);
    let mut iter = args.into_iter();
    out.extend(iter.next());
    out.push(OsString::from("run"));
    out.extend(iter);
    out
}

fn normalized_cli_args() -> Vec<OsString> {
    normalize_cli_args(std::env::args_os().collect())
}

fn run_cli() -> i32 {
    let cli = Cli::parse_from(normalized_cli_args());
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => {
            let rc = run_file(&args);
            log::info!("run completed with exit code {rc}");
            rc
        }
        Command::Explain(args) => run_explain(&args),
        Command::Repl => run_repl(),
    }
}

fn main() {
    std::process::exit(run_cli());
}
