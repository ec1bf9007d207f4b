//! Forward tab intents to the active tab

use crate::message::TabMessage;
use crate::model::{App, FocusPanel};

pub fn update(app: &mut App, msg: TabMessage) {
    let Some(tab) = app.active_tab_mut() else {
        return;
    };
    tab.dispatch(msg);

    match msg {
        // The form is where these intents continue
        TabMessage::Edit | TabMessage::New => app.focus = FocusPanel::Form,
        _ => {}
    }
}
