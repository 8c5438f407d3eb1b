mod config;
mod test_runner;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::warn;

use reprintf::{CompiledTemplate, Error};

#[derive(Parser)]
#[command(
    name = "reprintf",
    version,
    about = "Re-render printf-formatted messages through a translation template"
)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate one message produced by TEMPLATE
    Translate(TranslateArgs),

    /// Print the typed values a message was formatted with
    Extract(ExtractArgs),

    /// Translate messages through a catalog of templates
    Catalog(CatalogArgs),

    /// Run .case.toml files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct TranslateArgs {
    /// printf-style template the message was produced from
    template: String,

    /// Already formatted message
    message: String,

    /// printf-style translation to render the values into
    translation: String,
}

#[derive(clap::Args)]
struct ExtractArgs {
    template: String,
    message: String,
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Catalog file (defaults to ./reprintf.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit with status 1 if any message matched no entry
    #[arg(long)]
    strict: bool,

    /// Messages to translate. Read line by line from stdin when omitted.
    messages: Vec<String>,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .case.toml file or a directory containing them
    path: String,

    /// Run only cases in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let code = match cli.command {
        Command::Translate(args) => do_translate(args, color_choice),
        Command::Extract(args) => do_extract(args, color_choice),
        Command::Catalog(args) => do_catalog(args),
        Command::Test(args) => {
            let path = Path::new(&args.path);
            if args.list_categories {
                test_runner::list_categories(path);
                0
            } else {
                test_runner::run_tests(path, cli.no_color, &args.category)
            }
        }
    };
    process::exit(code);
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8, no_color: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(!no_color)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn do_translate(args: TranslateArgs, color_choice: ColorChoice) -> i32 {
    let result = CompiledTemplate::new(&args.template)
        .and_then(|template| template.translate(&args.message, &args.translation));
    match result {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(error) => {
            emit_error(&error, &args.message, color_choice);
            1
        }
    }
}

fn do_extract(args: ExtractArgs, color_choice: ColorChoice) -> i32 {
    let result = CompiledTemplate::new(&args.template)
        .and_then(|template| template.extract(&args.message));
    match result {
        Ok(values) => {
            for (index, value) in values.iter().enumerate() {
                println!("{index}: {} = {value}", value.type_name());
            }
            0
        }
        Err(error) => {
            emit_error(&error, &args.message, color_choice);
            1
        }
    }
}

fn do_catalog(args: CatalogArgs) -> i32 {
    let catalog = match config::load_catalog(args.config.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    let mut unmatched = 0usize;
    let mut translate_one = |message: &str| match catalog.translate(message) {
        Some(output) => println!("{output}"),
        None => {
            unmatched += 1;
            warn!(%message, "no catalog entry matches, printing unchanged");
            println!("{message}");
        }
    };

    if args.messages.is_empty() {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => translate_one(&line),
                Err(e) => {
                    eprintln!("error: cannot read stdin: {e}");
                    return 1;
                }
            }
        }
    } else {
        for message in &args.messages {
            translate_one(message);
        }
    }

    if args.strict && unmatched > 0 { 1 } else { 0 }
}

/// Render `error` against the message text.
fn emit_error(error: &Error, message: &str, color_choice: ColorChoice) {
    let mut files = SimpleFiles::new();
    let file_id = files.add("<message>".to_string(), message.to_string());
    let diagnostic: Diagnostic<usize> = error.to_diagnostic(file_id);

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    if term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic).is_err() {
        eprintln!("error: {error}");
    }
}
