//! Date controls: one gauge row per controlling date.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph};

use navlab_core::domain::format_date;
use navlab_core::view::DateControl;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Dates [↑↓]select [←→]±1d [Shift]±30d [e]dit ")
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (first, last) = app.ctx.view().bounds();
    let span = (last - first).num_days().max(1) as f64;
    let window = app.ctx.window();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 3])
        .split(inner);

    for (control, row) in DateControl::ALL.into_iter().zip(rows.iter()) {
        let focused = control == app.focused_control;
        let date = window.get(control);
        let ratio = ((date - first).num_days() as f64 / span).clamp(0.0, 1.0);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(22),
                Constraint::Min(10),
                Constraint::Length(12),
            ])
            .split(*row);

        let name_style = if focused {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        let marker = if focused { "▶ " } else { "  " };
        f.render_widget(
            Paragraph::new(Span::styled(format!("{marker}{}", control.name()), name_style)),
            cols[0],
        );

        let gauge = LineGauge::default()
            .filled_style(if focused { theme::accent() } else { theme::muted() })
            .unfilled_style(theme::muted().add_modifier(Modifier::DIM))
            .label("")
            .ratio(ratio);
        f.render_widget(gauge, cols[1]);

        f.render_widget(
            Paragraph::new(Span::styled(format!(" {}", format_date(date)), name_style)),
            cols[2],
        );
    }
}
