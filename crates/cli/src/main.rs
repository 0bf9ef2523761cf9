use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::run::run;
use crate::serve::serve;

mod log;
mod report;
mod run;
mod serve;

/// Terminal front-end and development server for textlens
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print extra information to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// When to use colored output
    #[arg(long, global = true, value_enum, default_value_t = When::Auto)]
    color: When,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Edit the text from the terminal, every line read from stdin is a new value
    #[command(visible_alias = "r")]
    Run(Run),

    /// Start a local development server for a built web demo
    #[command(visible_alias = "s")]
    Serve(Serve),
}

#[derive(Debug, Args)]
struct Run {
    /// Text to start with
    #[arg(long, default_value = textlens::state::DEFAULT_TEXT)]
    text: String,

    /// Print a JSON snapshot per change instead of the rendered views
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct Serve {
    /// Directory with the built demo
    #[arg(long, default_value = "dist")]
    dist: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum When {
    Auto,
    Always,
    Never,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        log::enable_verbose_output();
    }

    let color = match cli.color {
        When::Auto => io::stdout().is_terminal() && io::stderr().is_terminal(),
        When::Always => true,
        When::Never => false,
    };
    if color {
        log::enable_color_output();
    }

    let res = match &cli.command {
        Command::Run(r) => run(r),
        Command::Serve(s) => serve(s),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        // Reader went away, eg. piped into `head`
        Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
