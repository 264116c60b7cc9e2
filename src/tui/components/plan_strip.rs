//! Display-only strip listing the payment plans the server has offered.
//!
//! Plans are informational: the user responds to them in free text, there
//! is no selection mechanic. Hidden entirely while the list is empty.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::api::PaymentPlan;
use crate::tui::component::Component;

pub struct PlanStrip<'a> {
    pub plans: &'a [PaymentPlan],
}

impl<'a> PlanStrip<'a> {
    pub fn new(plans: &'a [PaymentPlan]) -> Self {
        Self { plans }
    }

    /// Rows needed to show all plans, or 0 when there are none.
    pub fn height(plans: &[PaymentPlan]) -> u16 {
        if plans.is_empty() {
            0
        } else {
            plans.len() as u16 + 2 // + borders
        }
    }
}

impl<'a> Component for PlanStrip<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .plans
            .iter()
            .map(|plan| {
                let mut spans = vec![Span::styled(
                    plan.name.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )];
                if !plan.description.is_empty() {
                    spans.push(Span::raw(": "));
                    spans.push(Span::raw(plan.description.clone()));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::bordered()
                .title("offered plans")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM)),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn height_is_zero_without_plans() {
        assert_eq!(PlanStrip::height(&[]), 0);
    }

    #[test]
    fn height_counts_plans_plus_borders() {
        let plans = vec![
            PaymentPlan {
                name: "Standard".to_string(),
                description: "12 monthly payments".to_string(),
            },
            PaymentPlan {
                name: "Extended".to_string(),
                description: String::new(),
            },
        ];
        assert_eq!(PlanStrip::height(&plans), 4);
    }

    #[test]
    fn renders_name_and_description() {
        let plans = vec![PaymentPlan {
            name: "Standard".to_string(),
            description: "12 monthly payments".to_string(),
        }];
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| PlanStrip::new(&plans).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Standard"));
        assert!(text.contains("12 monthly payments"));
    }
}
