//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw: while a request is in flight it
//! polls every ~80ms so the "thinking" status stays fresh; otherwise it
//! sleeps up to 500ms and only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{SessionApi, SessionClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Phase};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn SessionApi> = Arc::new(SessionClient::new(config.base_url.clone()));
    let mut app = App::new(api);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background request tasks
    let (tx, rx) = mpsc::channel();

    let mut needs_redraw = true; // Force first frame

    loop {
        if app.is_loading() {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short while a request is in flight, long when idle
        let timeout = if app.is_loading() {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C and Esc always quit; an in-flight request is simply dropped
            if matches!(event, TuiEvent::ForceQuit | TuiEvent::Escape) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Scroll events always go to the message list
            if matches!(
                event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.message_list.handle_event(&event);
                continue;
            }

            // Everything else belongs to the input box. While disabled it
            // swallows events without mutating the buffer.
            tui.input_box.disabled = !app.input_enabled();
            if let Some(input_event) = tui.input_box.handle_event(&event) {
                match input_event {
                    InputEvent::Submit(text) => {
                        let action = match app.phase {
                            Phase::Unstarted => Action::StartSession(text),
                            _ => Action::SendMessage(text),
                        };
                        let effect = update(&mut app, action);
                        execute_effect(effect, &app, &tx, &mut should_quit);
                    }
                    InputEvent::ContentChanged => {}
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle completions/failures from background request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            execute_effect(effect, &app, &tx, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

fn execute_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>, should_quit: &mut bool) {
    match effect {
        Effect::None => {}
        Effect::Quit => *should_quit = true,
        Effect::SpawnInit { phone } => spawn_initiate(app.api.clone(), phone, tx.clone()),
        Effect::SpawnSend {
            session_id,
            user_input,
        } => spawn_send(app.api.clone(), session_id, user_input, tx.clone()),
    }
}

fn spawn_initiate(api: Arc<dyn SessionApi>, phone: String, tx: mpsc::Sender<Action>) {
    info!("Spawning session initiation request");
    tokio::spawn(async move {
        let action = match api.initiate(&phone).await {
            Ok(state) => Action::SessionStarted(state),
            Err(e) => Action::InitFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver init result: receiver dropped");
        }
    });
}

fn spawn_send(
    api: Arc<dyn SessionApi>,
    session_id: String,
    user_input: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning chat request for session {session_id}");
    tokio::spawn(async move {
        let action = match api.send_message(&session_id, &user_input).await {
            Ok(state) => Action::ResponseReceived(state),
            Err(e) => Action::SendFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat result: receiver dropped");
        }
    });
}
