mod debug_report;

use std::io::{self, BufRead, IsTerminal};
use std::process::ExitCode;
use std::sync::Once;
use typelit::{Options, classify_verbose_with};

static TRACING_INIT: Once = Once::new();

fn main() -> ExitCode {
    init_tracing();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let opts = Options { strict: config.strict };
    let palette = debug_report::Palette::new(config.color);
    let mut failed = false;

    for token in &config.tokens {
        let res = classify_verbose_with(token, &opts);
        let report = debug_report::Report::new(&res, config.resolve, config.haystack.as_deref());
        failed |= report.failed();
        debug_report::print_report(&report, &palette);
    }

    if failed { ExitCode::from(1) } else { ExitCode::SUCCESS }
}

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`, only if it is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

struct CliConfig {
    tokens: Vec<String>,
    strict: bool,
    resolve: bool,
    haystack: Option<String>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut strict = false;
    let mut resolve = false;
    let mut haystack: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("typelit {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--strict" => strict = true,
            "--resolve" => resolve = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--match" | "-m" => {
                let value = args.next().ok_or_else(|| "error: --match expects a value".to_string())?;
                set_haystack(&mut haystack, value)?;
            }
            "--" => {
                tokens.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--match=") => {
                set_haystack(&mut haystack, arg.trim_start_matches("--match=").to_string())?;
            }
            _ if arg.starts_with('-') && arg.len() > 1 && !looks_numeric(&arg) => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => tokens.push(arg),
        }
    }

    // Matching a haystack needs a compiled regex.
    if haystack.is_some() {
        resolve = true;
    }

    if tokens.is_empty() {
        tokens = read_stdin_tokens()?;
    }

    if tokens.is_empty() {
        return Err(format!("error: no tokens provided\n\n{}", help_text()));
    }

    Ok(CliConfig { tokens, strict, resolve, haystack, color })
}

fn set_haystack(haystack: &mut Option<String>, value: String) -> Result<(), String> {
    if haystack.is_some() {
        return Err("error: --match provided multiple times".to_string());
    }
    *haystack = Some(value);
    Ok(())
}

/// Negative numbers are tokens, not options.
fn looks_numeric(arg: &str) -> bool {
    arg[1..].starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// One token per line; blank lines are skipped.
fn read_stdin_tokens() -> Result<Vec<String>, String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.map_err(|err| format!("error: failed to read stdin: {err}"))?;
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            tokens.push(line.to_string());
        }
    }
    Ok(tokens)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "typelit {version}

Classify command tokens as typed literals.

Usage:
  typelit [OPTIONS] [--] <token...>
  typelit [OPTIONS] < tokens.txt

Each argument is classified as one token. Without arguments, tokens are read
from stdin, one per line.

Options:
  --strict                   Reject tokens that match no literal rule.
  --resolve                  Resolve each value (compiles regex literals).
  -m, --match <text>         Print the leftmost-longest match of resolved regexes in <text>.
                             Implies --resolve.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter, e.g. RUST_LOG=typelit=trace.

Exit codes:
  0  Success.
  1  A token failed to classify or resolve.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
