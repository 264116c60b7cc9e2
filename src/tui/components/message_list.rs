//! # MessageList Component
//!
//! Scrollable view of conversation history.
//!
//! ## Responsibilities
//!
//! - Display one bubble per message, in server order
//! - Show a placeholder while the conversation is empty
//! - Append the completion banner once the server reports `is_complete`
//! - Manage scrolling (stick-to-bottom, clamping)
//! - Cache per-message heights so the scroll canvas can be sized without
//!   rendering first
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the conversation
//! snapshot (props). Since `Component::render` takes `&mut self`, the state
//! (layout cache, scroll offset) can be mutated during the render pass.
//!
//! Rendering is a pure function of the snapshot: messages are never
//! reordered, deduplicated, or merged, and drawing the same snapshot twice
//! produces the same buffer.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::ConversationState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{CompletionBanner, MessageBubble};
use crate::tui::event::TuiEvent;

/// Placeholder shown while the message list is empty.
pub const EMPTY_PLACEHOLDER: &str = "Start a conversation...";

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self
            .layout
            .total_height()
            .saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self
            .layout
            .total_height()
            .saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub conversation: &'a ConversationState,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut MessageListState, conversation: &'a ConversationState) -> Self {
        Self {
            state,
            conversation,
        }
    }

    fn render_placeholder(frame: &mut Frame, area: Rect) {
        let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
        // Vertically centered single line
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y.min(area.y + area.height.saturating_sub(1)), area.width, 1);
        frame.render_widget(placeholder, line_area);
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let messages = &self.conversation.messages;

        if messages.is_empty() {
            Self::render_placeholder(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.heights.truncate(reusable.min(layout.heights.len()));
        for message in messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageBubble::calculate_height(message, content_width));
        }
        layout.update_metadata(messages.len(), content_width);
        layout.banner_height = if self.conversation.is_complete {
            CompletionBanner::HEIGHT
        } else {
            0
        };

        let total_height = self.state.layout.total_height();

        // 2. Clamp scroll so we never overscroll past content
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // 3. Render all bubbles into a ScrollView, in server order
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, message) in messages.iter().enumerate() {
            let height = self.state.layout.heights[i];
            let bubble_rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBubble::new(message), bubble_rect);
            y_offset += height;
        }

        // 4. Completion banner after all messages
        if self.conversation.is_complete {
            let banner_rect = Rect::new(0, y_offset, content_width, CompletionBanner::HEIGHT);
            scroll_view.render_widget(CompletionBanner, banner_rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `MessageListState` rather than `MessageList`:
/// event handling needs the persistent scroll state, and `MessageList` is
/// recreated each frame with fresh props.
impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally; nothing bubbles up

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Cached layout measurements. Messages are immutable once received, so a
/// cached height stays valid until the width changes or the conversation is
/// replaced with a shorter one (new session).
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub banner_height: u16,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            banner_height: 0,
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached heights can be reused for the given message count
    /// and width. Width change or a shrunk list (state replaced by a new
    /// session) invalidates everything.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || self.heights.is_empty() {
            return 0;
        }
        if message_count < self.message_count {
            return 0;
        }
        self.message_count
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    /// Content height including the completion banner, if shown.
    pub fn total_height(&self) -> u16 {
        self.heights.iter().sum::<u16>() + self.banner_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Message;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn conversation(messages: Vec<Message>, is_complete: bool) -> ConversationState {
        ConversationState {
            session_id: "abc".to_string(),
            messages,
            awaiting_user: !is_complete,
            is_complete,
            ..Default::default()
        }
    }

    fn draw(conversation: &ConversationState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = MessageListState::new();
        terminal
            .draw(|f| {
                let mut list = MessageList::new(&mut state, conversation);
                list.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_conversation_shows_placeholder() {
        let text = draw(&conversation(vec![], false), 60, 20);
        assert!(text.contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn test_messages_render_in_server_order() {
        let convo = conversation(
            vec![
                Message::assistant("Hello"),
                Message::user("I can pay $50/month"),
            ],
            false,
        );
        let text = draw(&convo, 60, 20);
        let hello = text.find("Hello").expect("assistant message rendered");
        let offer = text
            .find("I can pay $50/month")
            .expect("user message rendered");
        assert!(hello < offer, "render order must match server order");
        assert!(!text.contains(CompletionBanner::TEXT));
    }

    #[test]
    fn test_complete_conversation_appends_banner() {
        let convo = conversation(
            vec![Message::assistant("Deal accepted")],
            true,
        );
        let text = draw(&convo, 60, 20);
        let message = text.find("Deal accepted").unwrap();
        let banner = text.find(CompletionBanner::TEXT).unwrap();
        assert!(message < banner, "banner comes after all messages");
    }

    /// Rendering the same ConversationState twice produces the same output.
    #[test]
    fn test_rendering_is_idempotent() {
        let convo = conversation(
            vec![
                Message::assistant("Hello"),
                Message::user("Hi"),
                Message::assistant("How can I help?"),
            ],
            false,
        );
        assert_eq!(draw(&convo, 50, 15), draw(&convo, 50, 15));
    }

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3; 5];
        cache.update_metadata(5, 80);

        // Same width, same count -> all reusable
        assert_eq!(cache.reusable_count(5, 80), 5);
        // New message appended -> old heights still valid
        assert_eq!(cache.reusable_count(6, 80), 5);
        // Width changed -> nothing reusable
        assert_eq!(cache.reusable_count(5, 40), 0);
        // Conversation replaced with a shorter one -> nothing reusable
        assert_eq!(cache.reusable_count(2, 80), 0);
    }

    #[test]
    fn test_total_height_includes_banner() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![3, 4];
        assert_eq!(cache.total_height(), 7);
        cache.banner_height = CompletionBanner::HEIGHT;
        assert_eq!(cache.total_height(), 7 + CompletionBanner::HEIGHT);
    }

    #[test]
    fn test_scroll_up_unpins_from_bottom() {
        let mut state = MessageListState::new();
        assert!(state.stick_to_bottom);
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_down_repins_at_bottom() {
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        state.layout.heights = vec![2, 2];
        state.viewport_height = 10; // everything fits -> offset 0 is bottom
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }
}
