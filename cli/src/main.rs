use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use minewager_core::{GameSession, RngSource};

use app::{App, Reply};
use command::Command;

mod app;
mod command;
mod config;
mod render;

/// Stake coins on a minefield, open safe cells to grow the bet, cash out before a mine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with session settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print every view as a JSON line
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    overrides: config::Overrides,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    // stdout carries the board
    tracing_subscriber::fmt()
        .with_max_level(verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = config::load(args.config.as_deref(), &args.overrides)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let mut app = App::new(GameSession::new(config, RngSource::seeded(seed))?);
    let mut out = io::stdout().lock();
    let mut lines = io::stdin().lock().lines();

    show(&app.view(), args.json, &mut out)?;
    if !args.json {
        writeln!(out, "Type \"help\" for commands.")?;
    }

    loop {
        if !args.json {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                render::write_message(&format!("{err:#}"), args.json, &mut out)?;
                continue;
            }
        };

        match app.handle(command) {
            Ok(Reply::View(view)) => show(&view, args.json, &mut out)?,
            Ok(Reply::Note(note)) => render::write_message(&note, args.json, &mut out)?,
            Ok(Reply::Quit) => break,
            Err(err) => render::write_message(&err.to_string(), args.json, &mut out)?,
        }
    }

    log::debug!("Leaving with {:.2} coins", app.view().coins);
    Ok(())
}

fn show(view: &minewager_core::SessionView, json: bool, out: &mut impl Write) -> io::Result<()> {
    if json {
        render::write_json(view, out)
    } else {
        render::write_text(view, out)
    }
}
