use clap::Parser;
use env_logger::Env;
use log::{debug, error};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

mod cli;
mod liboboeru;

use crate::cli::{Keyboard, Session};

#[derive(Parser, Debug)]
#[command(name = "覚える (Oboeru)")]
#[command(version, about, long_about = None)]
struct Args {
    /// Deck file to load before the first command.
    #[arg(long = "import_from", value_name = "FILE")]
    import_from: Option<PathBuf>,
    /// Deck file to write when the session ends with `exit`.
    #[arg(long = "export_to", value_name = "FILE")]
    export_to: Option<PathBuf>,
    #[arg(short, long, default_value = "error")]
    log_level: String,
    /// How many times a duplicate term or definition may be re-entered.
    #[arg(long, default_value = "10")]
    retry_limit: usize,
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("cannot read input: {0}")]
    Input(String),
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();
    if args.no_color {
        colored::control::set_override(false);
    }
    debug!("[Setup] {:?}", args);

    let mut session = Session::new(Keyboard::new(io::stdin().lock()), io::stdout(), args.retry_limit);
    if let Some(path) = args.export_to {
        session.set_export_target(path);
    }
    if let Some(path) = args.import_from {
        session.import_deck(Some(path))?;
    }

    session.run().inspect_err(|err| error!("[Session] {}", err))?;
    debug!(
        "[Session] Finished with {} cards and {} transcript lines",
        session.deck().len(),
        session.transcript().lines().len()
    );
    Ok(())
}
