//! # Actions
//!
//! Everything that can happen in parley becomes an `Action`.
//! User submits a phone number? That's `Action::StartSession`.
//! The backend answers? That's `Action::SessionStarted(state)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller should
//! perform. No I/O happens here, which is what makes the whole session
//! state machine unit-testable.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! The `Processing` phase is the single concurrency-control point: while a
//! request is in flight, every start/send action falls through to
//! `Effect::None`, so a second request can never be spawned.

use log::{info, warn};

use crate::api::ConversationState;
use crate::core::state::{App, Phase};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user submitted a phone number from the landing screen.
    StartSession(String),
    /// The user submitted a chat message.
    SendMessage(String),
    /// `/init` succeeded; carries the initial state with the session id.
    SessionStarted(ConversationState),
    /// `/chat` succeeded; carries the full replacement state.
    ResponseReceived(ConversationState),
    /// `/init` failed (transport, network, or server error).
    InitFailed(String),
    /// `/chat` failed; the session survives.
    SendFailed(String),
    Quit,
}

/// I/O the event loop must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Spawn the `/init` request.
    SpawnInit { phone: String },
    /// Spawn the `/chat` request.
    SpawnSend {
        session_id: String,
        user_input: String,
    },
    Quit,
}

/// Decide the phase for a freshly received server snapshot.
///
/// `is_complete` wins over `awaiting_user`. A snapshot with neither flag set
/// would leave the literal transition table stuck in Processing; fall back to
/// AwaitingUser so a misbehaving server cannot wedge the UI.
fn phase_for(state: &ConversationState) -> Phase {
    if state.is_complete {
        Phase::Complete
    } else {
        Phase::AwaitingUser
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::StartSession(phone) => {
            if app.phase != Phase::Unstarted {
                return Effect::None;
            }
            if phone.trim().is_empty() {
                // Validation: prompt synchronously, no request.
                app.status_message = String::from("Enter a phone number to start");
                return Effect::None;
            }
            app.phone = phone.clone();
            app.error = None;
            app.phase = Phase::Processing;
            app.status_message = String::from("Starting session...");
            Effect::SpawnInit { phone }
        }

        Action::SendMessage(text) => {
            if app.phase != Phase::AwaitingUser || !app.conversation.accepts_input() {
                return Effect::None;
            }
            if text.trim().is_empty() {
                return Effect::None;
            }
            let Some(session_id) = app.session_id.clone() else {
                // Should not happen: AwaitingUser implies an initiated session.
                warn!("send attempted without a session id");
                return Effect::None;
            };
            app.phase = Phase::Processing;
            app.status_message = String::from("Waiting for reply...");
            Effect::SpawnSend {
                session_id,
                user_input: text,
            }
        }

        Action::SessionStarted(state) => {
            if app.phase != Phase::Processing {
                return Effect::None;
            }
            info!(
                "session started: id={}, {} messages",
                state.session_id,
                state.messages.len()
            );
            app.session_id = Some(state.session_id.clone());
            app.phase = phase_for(&state);
            app.conversation = state;
            app.error = None;
            app.status_message = match app.conversation.stage.as_deref() {
                Some(stage) => format!("Stage: {stage}"),
                None => String::new(),
            };
            Effect::None
        }

        Action::ResponseReceived(mut state) => {
            if app.phase != Phase::Processing {
                return Effect::None;
            }
            // The chat endpoint omits session_id; keep the one from init.
            if state.session_id.is_empty() {
                if let Some(id) = &app.session_id {
                    state.session_id = id.clone();
                }
            }
            app.phase = phase_for(&state);
            app.conversation = state;
            app.status_message = match (app.phase, app.conversation.stage.as_deref()) {
                (Phase::Complete, _) => String::from("Conversation complete"),
                (_, Some(stage)) => format!("Stage: {stage}"),
                _ => String::new(),
            };
            Effect::None
        }

        Action::InitFailed(msg) => {
            if app.phase != Phase::Processing {
                return Effect::None;
            }
            warn!("session initiation failed: {msg}");
            // Back to square one; the user retries by re-submitting a phone.
            app.phase = Phase::Unstarted;
            app.session_id = None;
            app.error = Some(msg);
            app.status_message = String::from("Failed to start session");
            Effect::None
        }

        Action::SendFailed(msg) => {
            if app.phase != Phase::Processing {
                return Effect::None;
            }
            warn!("send failed: {msg}");
            // The conversation state is untouched; the user resends.
            app.phase = Phase::AwaitingUser;
            app.status_message = String::from("Send failed - try again");
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
