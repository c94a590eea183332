use typelit::{AttemptOutcome, ClassifyResultVerbose, ResolutionError, ResolvedValue, TypedValue};

pub use ansi::Palette;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Everything printed for one token: the verbose classification plus the
/// optional resolution and haystack match.
pub struct Report<'a> {
    res: &'a ClassifyResultVerbose,
    resolution: Option<Result<ResolvedValue, ResolutionError>>,
    haystack: Option<&'a str>,
}

impl<'a> Report<'a> {
    pub fn new(res: &'a ClassifyResultVerbose, resolve: bool, haystack: Option<&'a str>) -> Self {
        let resolution = match &res.result {
            Ok(value) if resolve => Some(value.resolve()),
            _ => None,
        };
        Self { res, resolution, haystack }
    }

    pub fn failed(&self) -> bool {
        self.res.result.is_err() || matches!(self.resolution, Some(Err(_)))
    }
}

pub fn print_report(report: &Report<'_>, palette: &Palette) {
    let res = report.res;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Token: {:?}", res.token), ansi::CYAN)));
    println!("  {} {}", palette.dim("shape:"), palette.paint(format!("{:?}", res.details.shape), ansi::YELLOW));

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    print_attempts(res, palette);

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    match &res.result {
        Ok(value) => print_value(value, palette),
        Err(err) => {
            println!("  {} {}", palette.paint("✗", ansi::RED), palette.paint(err.to_string(), ansi::RED));
            if res.details.fell_back {
                println!("\n{}", palette.dim("  Tip: quote the token or drop --strict to accept it as a string"));
            }
        }
    }

    if let Some(resolution) = &report.resolution {
        println!("\n{}", palette.paint("━━━ Resolution ━━━", ansi::GRAY));
        print_resolution(resolution, report.haystack, palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", res.details.total), ansi::GREEN));
}

fn print_attempts(res: &ClassifyResultVerbose, palette: &Palette) {
    for attempt in &res.details.attempts {
        let outcome = match attempt.outcome {
            AttemptOutcome::Matched => palette.paint("✓ matched", ansi::GREEN),
            AttemptOutcome::NoMatch => palette.dim("✗ no match"),
            AttemptOutcome::Skipped => palette.dim("· skipped (shape)"),
        };
        println!(
            "  {} {}  {}",
            palette.paint(format!("{:<14}", attempt.rule), ansi::BLUE),
            outcome,
            palette.dim(format!("{:?}", attempt.duration))
        );
    }
    if res.details.fell_back {
        println!("  {} {}", palette.paint(format!("{:<14}", "fallback"), ansi::BLUE), palette.paint("✓", ansi::YELLOW));
    }
}

fn print_value(value: &TypedValue, palette: &Palette) {
    println!(
        "  {} {} {} {}",
        palette.dim("kind:"),
        palette.bold(palette.paint(value.kind().name(), ansi::GREEN)),
        palette.dim("│ rendered:"),
        palette.paint(value.render(), ansi::CYAN)
    );
    if let Some(quote) = value.quote() {
        let flavor = quote.as_char().map_or_else(|| "none".to_string(), |c| c.to_string());
        println!("  {} {}", palette.dim("quote:"), palette.paint(flavor, ansi::YELLOW));
    }
}

fn print_resolution(resolution: &Result<ResolvedValue, ResolutionError>, haystack: Option<&str>, palette: &Palette) {
    match resolution {
        Ok(ResolvedValue::Regex(re)) => {
            println!("  {} {}", palette.paint("✓", ansi::GREEN), palette.dim(format!("compiled POSIX regex {:?}", re.as_str())));
            if let Some(text) = haystack {
                match re.find(text) {
                    Some(m) => println!(
                        "  {} {} {}",
                        palette.dim("match:"),
                        palette.bold(palette.paint(m.as_str(), ansi::GREEN)),
                        palette.paint(format!("span {}..{}", m.start(), m.end()), ansi::YELLOW)
                    ),
                    None => println!("  {} {}", palette.dim("match:"), palette.dim("none")),
                }
            }
        }
        Ok(other) => {
            println!("  {} {}", palette.paint("✓", ansi::GREEN), palette.dim(format!("{other:?}")));
            if haystack.is_some() {
                println!("  {} {}", palette.dim("match:"), palette.dim("n/a (not a regex)"));
            }
        }
        Err(err) => println!("  {} {}", palette.paint("✗", ansi::RED), palette.paint(err.to_string(), ansi::RED)),
    }
}
