//! Overlay widgets — help, message history, date entry.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, DateEntry, StatusLevel};
use crate::theme;
use crate::ui::centered_rect;

const HELP_KEYS: [(&str, &str); 12] = [
    ("↑/↓  k/j", "focus a date control"),
    ("←/→", "move the focused date by one day"),
    ("Shift ←/→", "move the focused date by 30 days"),
    ("e", "type all three dates"),
    ("NN", "two digits select a fund by number"),
    ("c", "toggle the cursor probe"),
    ("m", "add a marker in the middle of the window"),
    ("drag", "move a marker with the left mouse button"),
    ("click legend", "show or hide a fund"),
    ("s", "switch linear / log scale"),
    ("!", "message history"),
    ("q", "quit"),
];

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys [Esc]close ")
        .title_style(theme::accent_bold());

    let mut text = vec![Line::from("")];
    text.extend(HELP_KEYS.iter().map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("  {key:<14}"), theme::accent_bold()),
            Span::styled(*what, theme::muted()),
        ])
    }));
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "  Values are rebased to 100 at the anchor date (grey line).",
        theme::muted(),
    )));

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Newest-first list of posted messages.
pub fn render_message_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(
            " Messages ({}) [Esc]close [j/k]scroll ",
            app.message_history.len()
        ))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.message_history.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No messages yet.", theme::muted())),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = app
        .message_history
        .iter()
        .enumerate()
        .skip(app.history_scroll)
        .take(inner.height as usize)
        .map(|(i, record)| {
            let level_style = match record.level {
                StatusLevel::Info => theme::accent(),
                StatusLevel::Warning => theme::warning(),
                StatusLevel::Error => theme::negative(),
            };
            let text_style = if i == app.history_scroll {
                level_style.add_modifier(Modifier::BOLD)
            } else {
                theme::muted()
            };
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", record.timestamp.format("%H:%M:%S")),
                    theme::muted(),
                ),
                Span::styled(format!("[{}] ", record.level.label()), level_style),
                Span::styled(record.message.as_str(), text_style),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_date_entry(f: &mut Frame, area: Rect, entry: &DateEntry) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Dates (dd-mm-yyyy) [Tab]next [Enter]apply [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut text = vec![Line::from("")];
    for (i, (label, value)) in DateEntry::LABELS.iter().zip(&entry.fields).enumerate() {
        let focused = i == entry.focus;
        let style = if focused {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        let mut spans = vec![
            Span::styled(if focused { "> " } else { "  " }, theme::accent()),
            Span::styled(format!("{label:<10} "), style),
            Span::styled(value.as_str(), style),
        ];
        if focused {
            spans.push(Span::styled("_", theme::accent()));
        }
        text.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(text), inner);
}
