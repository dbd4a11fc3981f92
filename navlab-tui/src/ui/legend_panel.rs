//! Legend: one row per fund, in load order. Clicking a row toggles the line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Funds ")
        .title_style(theme::panel_title(false));

    let selected = app.interaction.selected;
    let series = app.ctx.dataset().series.series();
    let lines: Vec<Line> = app
        .ctx
        .visibility()
        .iter()
        .zip(series)
        .enumerate()
        .map(|(i, ((label, visible), s))| {
            let swatch = if visible {
                Style::default().fg(theme::series_color(&s.color))
            } else {
                theme::muted()
            };
            let mut text = if visible {
                Style::default().fg(theme::TEXT_PRIMARY)
            } else {
                theme::muted().add_modifier(Modifier::CROSSED_OUT)
            };
            if selected == Some(i) {
                text = text.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            Line::from(vec![
                Span::styled(format!("{:02} ", i + 1), theme::muted()),
                Span::styled("━━ ", swatch),
                Span::styled(label.to_string(), text),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Label of the legend row at a screen row, if any.
pub fn label_at_row<'a>(app: &'a AppState, inner: Rect, row: u16) -> Option<&'a str> {
    if row < inner.y || row >= inner.bottom() {
        return None;
    }
    let index = usize::from(row - inner.y);
    app.ctx.dataset().labels().get(index).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::app;

    #[test]
    fn rows_map_to_labels() {
        let app = app();
        let inner = Rect::new(91, 1, 28, 10);
        assert_eq!(label_at_row(&app, inner, 1), Some("Alpha"));
        assert_eq!(label_at_row(&app, inner, 2), Some("Beta"));
        assert_eq!(label_at_row(&app, inner, 3), None);
        assert_eq!(label_at_row(&app, inner, 0), None);
    }
}
