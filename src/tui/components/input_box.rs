//! # InputBox Component
//!
//! Single-line text entry with cursor movement and horizontal scrolling.
//!
//! The same component serves both entry fields: the phone number on the
//! landing screen and the chat message box during a session. The parent
//! decides what a submitted string means.
//!
//! While the session is processing, the parent stops routing events here.
//! The buffer is kept as-is so nothing typed is lost, only deferred.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the input box.
pub enum InputEvent {
    /// Enter was pressed with non-whitespace content; carries the raw
    /// (untrimmed) buffer. The buffer is cleared.
    Submit(String),
    /// The buffer or cursor changed; the parent should redraw.
    ContentChanged,
}

/// Stateful single-line input field.
pub struct InputBox {
    /// Current contents of the field
    buffer: String,
    /// Cursor position as a byte offset into `buffer`.
    /// Always lies on a char boundary.
    cursor: usize,
    /// Leftmost visible column (display width), for horizontal scrolling
    scroll_offset: u16,
    /// When true, events are ignored and the field renders dimmed
    pub disabled: bool,
    /// Hint text shown while the buffer is empty
    pub placeholder: String,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll_offset: 0,
            disabled: false,
            placeholder: String::new(),
        }
    }

    pub fn content(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Byte offset of the char boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Byte offset of the char boundary after the cursor.
    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn insert_str(&mut self, s: &str) {
        // Paste can carry newlines; a single-line field flattens them.
        for c in s.chars() {
            if c == '\n' || c == '\r' {
                self.insert_char(' ');
            } else if !c.is_control() {
                self.insert_char(c);
            }
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            let next = self.next_boundary();
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    /// Display width of the buffer up to the cursor.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Keep the cursor visible inside a viewport of `visible_width` columns.
    fn adjust_scroll(&mut self, visible_width: u16) {
        let col = self.cursor_column();
        if col < self.scroll_offset {
            self.scroll_offset = col;
        } else if visible_width > 0 && col >= self.scroll_offset + visible_width {
            self.scroll_offset = col - visible_width + 1;
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.insert_char(*c);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(data) => {
                self.insert_str(data);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                self.backspace();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                self.delete();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit => {
                if self.is_empty() {
                    // Whitespace-only submission is a no-op
                    return None;
                }
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(std::mem::take(&mut self.buffer)))
            }
            _ => None,
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Blue)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible_width = inner.width;
        self.adjust_scroll(visible_width);

        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let style = if self.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(Span::styled(self.buffer.clone(), style))
        };

        let paragraph = Paragraph::new(line).scroll((0, self.scroll_offset));
        frame.render_widget(paragraph, inner);

        if !self.disabled {
            let col = self.cursor_column().saturating_sub(self.scroll_offset);
            frame.set_cursor_position((
                inner.x + col.min(visible_width.saturating_sub(1)),
                inner.y,
            ));
        }
    }
}
