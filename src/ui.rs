use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};
use wpm::{layout::WINDOW_ROWS, session::Classification};

use crate::App;

pub const HORIZONTAL_MARGIN: u16 = 5;

const TITLE: &str = "wpm";
const CONTENT_HEIGHT: u16 = WINDOW_ROWS as u16 + 6;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

fn class_style(class: Classification) -> Style {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    match class {
        Classification::Correct => Style::default().fg(Color::Rgb(0x27, 0xd8, 0xc4)),
        Classification::Incorrect => Style::default()
            .patch(bold_style)
            .fg(Color::Rgb(0xd8, 0x27, 0x3b)),
        Classification::Cursor => Style::default()
            .fg(Color::Gray)
            .bg(Color::Rgb(0x6c, 0x27, 0xd8)),
        Classification::Untyped => Style::default().fg(Color::DarkGray),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC);

        let view = self.drill.current_view(self.display_width());
        let padding = area.height.saturating_sub(CONTENT_HEIGHT) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(1), // title
                Constraint::Length(1),
                Constraint::Length(WINDOW_ROWS as u16), // text window
                Constraint::Length(1),
                Constraint::Length(1), // wpm
                Constraint::Length(1),
                Constraint::Length(1), // legend
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Span::styled(TITLE, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let lines: Vec<Line> = view
            .rows
            .iter()
            .map(|row| {
                Line::from(
                    row.spans
                        .iter()
                        .map(|span| Span::styled(span.text.clone(), class_style(span.class)))
                        .collect::<Vec<Span>>(),
                )
            })
            .collect();
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(format!("WPM: {}", view.wpm), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);

        let legend = if view.complete {
            format!(
                "done: {}/{} words clean   (←) retry / (→) new / (esc)ape",
                view.finished_words, view.total_words
            )
        } else if self.drill.has_started() {
            String::from("(←) restart / (→) new text / (esc)ape")
        } else {
            String::from("start typing   (→) new text / (esc)ape")
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}
