use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::api::{Message, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless widget that renders one chat bubble with role-based styling.
///
/// `MessageBubble` is a transient component: created fresh each frame with
/// the message it renders, no internal state. User messages are cyan,
/// assistant messages green — matching the two roles the backend emits.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height
/// using `textwrap` with options that match Ratatui's `Paragraph` wrapping.
/// The parent `MessageList` uses this to lay out the scroll canvas without
/// rendering first.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    ///
    /// The wrapping options must match the Ratatui default for `Paragraph`
    /// to keep a 1:1 mapping between calculated and actual height.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn role_label(role: Role) -> &'static str {
        match role {
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }

    fn role_style(role: Role) -> Style {
        match role {
            Role::User => Style::default().fg(Color::Cyan),
            Role::Assistant => Style::default().fg(Color::Green),
        }
    }
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Self::role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(Self::role_label(self.message.role))
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(self.message.content.trim())
            .style(style)
            .wrap(Wrap { trim: true });
        paragraph.render(inner_area, buf);
    }
}

/// Terminal-outcome banner appended after all messages once the server
/// reports `is_complete`.
#[derive(Clone, Copy)]
pub struct CompletionBanner;

impl CompletionBanner {
    pub const HEIGHT: u16 = 3;
    pub const TEXT: &'static str = "Conversation complete";
}

impl Widget for CompletionBanner {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let paragraph = Paragraph::new(Self::TEXT)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(ratatui::widgets::BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Green)),
            );
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let msg = Message::user("");
        assert_eq!(MessageBubble::calculate_height(&msg, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_whitespace_only_treated_as_empty() {
        let msg = Message::user("   \n\t  ");
        assert_eq!(MessageBubble::calculate_height(&msg, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let msg = Message::user("Hello world");
        assert_eq!(MessageBubble::calculate_height(&msg, 0), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let msg = Message::assistant("Hello");
        assert_eq!(
            MessageBubble::calculate_height(&msg, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let msg = Message::user("Hello world");
        // 11 chars, width 9 -> content_width 5 -> "Hello" | "world"
        assert_eq!(MessageBubble::calculate_height(&msg, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        let msg = Message::user("abcdefghij");
        // 10 chars, width 8 -> content_width 4 -> "abcd" | "efgh" | "ij"
        assert_eq!(MessageBubble::calculate_height(&msg, 8), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn role_styles_are_distinct() {
        assert_eq!(MessageBubble::role_style(Role::User).fg, Some(Color::Cyan));
        assert_eq!(
            MessageBubble::role_style(Role::Assistant).fg,
            Some(Color::Green)
        );
    }

    #[test]
    fn role_labels() {
        assert_eq!(MessageBubble::role_label(Role::User), "you");
        assert_eq!(MessageBubble::role_label(Role::Assistant), "assistant");
    }

    #[test]
    fn completion_banner_renders_text() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(CompletionBanner, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains(CompletionBanner::TEXT));
    }
}
