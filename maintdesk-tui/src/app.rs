//! Main loop
//!
//! Each pass: drain finished effects and advance timers, draw, then wait up
//! to 100 ms for input and apply the resulting message.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::event;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        update::tick(app, Instant::now());

        terminal.draw(|frame| view::render(app, frame))?;

        if app.should_quit {
            break;
        }

        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            let msg = event::handle_event(&event, app);
            update::update(app, msg);
        }
    }

    log::info!("maintdesk exiting");
    Ok(())
}
