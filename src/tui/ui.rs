//! Frame composition.
//!
//! `draw_ui` lays out the whole screen from the current `App` snapshot:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ title bar                    │ 1 row
//! ├──────────────────────────────┤
//! │ landing screen  OR           │
//! │ message list                 │ remaining rows
//! ├──────────────────────────────┤
//! │ offered plans (in-session,   │ 0..n rows
//! │ only when non-empty)         │
//! ├──────────────────────────────┤
//! │ input box                    │ 3 rows
//! └──────────────────────────────┘
//! ```
//!
//! Drawing never mutates the `App`; the same state always produces the
//! same frame (modulo the scroll offset the user controls).

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::{App, Phase};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Landing, MessageList, PlanStrip, TitleBar};

/// Input box hint per phase.
pub fn input_placeholder(app: &App) -> &'static str {
    match app.phase {
        Phase::Unstarted => "Phone number",
        Phase::Processing => "Assistant is thinking...",
        Phase::AwaitingUser => "Type your message...",
        Phase::Complete => "Conversation complete",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let plans_height = if app.phase == Phase::Unstarted {
        0
    } else {
        PlanStrip::height(&app.conversation.offered_plans)
    };
    let [title_area, body_area, plans_area, input_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(plans_height),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    TitleBar::new(app.conversation.stage.as_deref(), &app.status_message)
        .render(frame, title_area);

    if app.phase == Phase::Unstarted {
        Landing::new(app.error.as_deref()).render(frame, body_area);
    } else {
        MessageList::new(&mut tui.message_list, &app.conversation).render(frame, body_area);
        if plans_height > 0 {
            PlanStrip::new(&app.conversation.offered_plans).render(frame, plans_area);
        }
    }

    tui.input_box.disabled = !app.input_enabled();
    tui.input_box.placeholder = input_placeholder(app).to_string();
    tui.input_box.render(frame, input_area);
}
