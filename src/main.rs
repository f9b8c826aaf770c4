//! Main entry point for the huffpress CLI app.

use huffpress::cli;
use huffpress::pipeline;
use huffpress::progress::{Callbacks, LogLevel};
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    if let Err(e) = run_app() {
        if e.downcast_ref::<clap::Error>().is_none() {
            eprintln!("Error: {}", e);
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::run()?;

    let mut callbacks = Callbacks::new();
    callbacks.set_logger(|level, message| match level {
        LogLevel::Info => info!("{message}"),
        LogLevel::Error => error!("{message}"),
    });
    let operation = if args.compress { "compress" } else { "decompress" };
    callbacks.set_progress_callback(cli_progress_bar(operation));

    if args.compress {
        pipeline::compress_path(&args.input, &args.output, &callbacks)?;
    } else {
        pipeline::decompress_path(&args.input, &args.output, &callbacks)?;
    }
    Ok(())
}

/// Progress bar rendered in place on stderr, so stdout stays clean.
fn cli_progress_bar(operation: &'static str) -> impl Fn(f32) + Send + Sync + 'static {
    move |percent| {
        let width = 40usize;
        let filled = (((percent / 100.0) * width as f32) as usize).min(width);
        eprint!(
            "\r[{}] [{}{}] {:5.1}%",
            operation.to_uppercase(),
            "█".repeat(filled),
            "░".repeat(width - filled),
            percent
        );
        io::stderr().flush().ok();
        if percent >= 100.0 {
            eprintln!();
        }
    }
}
