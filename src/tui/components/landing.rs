//! Pre-session landing screen.
//!
//! Shown while no session exists: a heading, a prompt for the phone number,
//! and the last init error (if any). The phone input field itself is the
//! shared `InputBox`, rendered by the parent below this screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const HEADING: &str = "ABC Finance";
const SUBHEADING: &str = "Payment assistance";
const PROMPT: &str = "Enter your phone number and press Enter to begin.";

pub struct Landing<'a> {
    /// Error from the last failed session start, if any
    pub error: Option<&'a str>,
}

impl<'a> Landing<'a> {
    pub fn new(error: Option<&'a str>) -> Self {
        Self { error }
    }
}

impl<'a> Component for Landing<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [block] = Layout::vertical([Constraint::Length(6)])
            .flex(Flex::Center)
            .areas(area);
        let [heading, subheading, _, prompt, _, error] =
            Layout::vertical([Constraint::Length(1); 6]).areas(block);

        frame.render_widget(
            Paragraph::new(HEADING)
                .style(
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center),
            heading,
        );
        frame.render_widget(
            Paragraph::new(SUBHEADING)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            subheading,
        );
        frame.render_widget(
            Paragraph::new(PROMPT).alignment(Alignment::Center),
            prompt,
        );
        if let Some(msg) = self.error {
            frame.render_widget(
                Paragraph::new(msg)
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center),
                error,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(error: Option<&str>) -> String {
        let backend = TestBackend::new(70, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Landing::new(error).render(f, f.area()))
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
    fn renders_heading_and_prompt() {
        let text = draw(None);
        assert!(text.contains(HEADING));
        assert!(text.contains("phone number"));
    }

    #[test]
    fn renders_error_when_present() {
        let text = draw(Some("network error: connection refused"));
        assert!(text.contains("connection refused"));
    }
}
