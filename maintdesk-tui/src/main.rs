//! maintdesk terminal console
//!
//! Elm-style layering, one directory per layer:
//!
//! - `model/`: application state; one tab per entity
//! - `message/`: what a key press means
//! - `update/`: applies messages to the model
//! - `view/`: rendering
//! - `event/`: terminal input to messages
//! - `backend/`: keyring session and effect execution
//!
//! Every tab owns a `MasterDetailPage`. The effects it returns run on the
//! tokio runtime; the main loop drains their completions back into the page
//! between frames, so the UI thread never blocks on the network.

mod app;
mod backend;
mod cli;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{Context, Result, ensure};
use clap::Parser;

use maintdesk_core::ServiceContext;

use backend::KeyringSession;
use cli::{Cli, Command};
use util::{init_logging, init_terminal, restore_terminal};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging()?;

    match cli.command {
        Some(Command::Login) => return login(),
        Some(Command::Logout) => {
            KeyringSession::sign_out()?;
            println!("Signed out.");
            return Ok(());
        }
        None => {}
    }

    let config = cli.load_config()?;
    let session = Arc::new(KeyringSession::load());
    let ctx = ServiceContext::new(config, session).context("building services")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("maintdesk-worker")
        .build()
        .context("starting async runtime")?;

    log::info!("maintdesk starting against {}", ctx.config.base_url);

    let mut terminal = init_terminal()?;
    let mut app = model::App::new(&ctx, runtime.handle());

    let result = app::run(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    restore_terminal(&mut terminal)?;

    runtime.shutdown_background();
    result
}

/// `maintdesk login`: read a token from stdin and keep it in the keyring.
fn login() -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("reading token from stdin")?;
    let token = input.trim();
    ensure!(!token.is_empty(), "no token on stdin");
    KeyringSession::store(token)?;
    println!("Token stored in the system keyring.");
    Ok(())
}
