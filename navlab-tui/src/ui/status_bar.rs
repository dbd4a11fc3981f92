//! Bottom status bar — key hints, scale mode, last message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " q:Quit ?:Help e:Dates c:Cursor m:Marker s:Scale !:History",
        theme::muted(),
    ));

    if app.interaction.cursor_enabled {
        spans.push(Span::styled(" [cursor]", theme::accent()));
    }
    if !app.interaction.digit_buffer.is_empty() {
        spans.push(Span::styled(
            format!(" [{}_]", app.interaction.digit_buffer),
            theme::warning(),
        ));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
