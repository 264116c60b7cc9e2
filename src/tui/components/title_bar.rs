//! One-line header: app name, current negotiation stage, status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct TitleBar<'a> {
    /// Stage reported by the server, when in a session
    pub stage: Option<&'a str>,
    /// Transient status line (last outcome, hints)
    pub status: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(stage: Option<&'a str>, status: &'a str) -> Self {
        Self { stage, status }
    }
}

impl<'a> Component for TitleBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " parley ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];
        if let Some(stage) = self.stage {
            spans.push(Span::styled(
                format!("stage: {stage}"),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            self.status,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
