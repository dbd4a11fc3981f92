//! Terminal input → core events. Overlays consume keys first; everything
//! the chart reacts to goes through the core event table.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use navlab_core::domain::date_to_num;
use navlab_core::session::{Event, Pointer};

use crate::app::{AppState, Overlay};
use crate::ui::{self, legend_panel};

const SMALL_STEP_DAYS: f64 = 1.0;
const LARGE_STEP_DAYS: f64 = 30.0;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Windows reports both press and release.
    if key.kind != KeyEventKind::Press {
        return;
    }

    match &app.overlay {
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                app.set_overlay(Overlay::None);
            }
            return;
        }
        Overlay::MessageHistory => {
            handle_history_overlay(app, key);
            return;
        }
        Overlay::DateEntry(_) => {
            handle_date_entry(app, key);
            return;
        }
        Overlay::None => {}
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.set_overlay(Overlay::Help),
        KeyCode::Char('!') => {
            app.history_scroll = 0;
            app.set_overlay(Overlay::MessageHistory);
        }
        KeyCode::Char('e') => app.open_date_entry(),
        KeyCode::Char('m') => app.dispatch(Event::AddMarker),
        KeyCode::Char('s') => app.dispatch(Event::ToggleScale),
        KeyCode::Char(c) if c.is_ascii_digit() || c == 'c' => app.dispatch(Event::Key(c)),
        KeyCode::Up | KeyCode::Char('k') => {
            app.focused_control = app.focused_control.prev();
            app.ctx.bridge_mut().mark_dirty();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.focused_control = app.focused_control.next();
            app.ctx.bridge_mut().mark_dirty();
        }
        KeyCode::Left => step_slider(app, -step_for(key.modifiers)),
        KeyCode::Right => step_slider(app, step_for(key.modifiers)),
        _ => {}
    }
}

fn step_for(modifiers: KeyModifiers) -> f64 {
    if modifiers.contains(KeyModifiers::SHIFT) {
        LARGE_STEP_DAYS
    } else {
        SMALL_STEP_DAYS
    }
}

fn step_slider(app: &mut AppState, days: f64) {
    let control = app.focused_control;
    let current = date_to_num(app.ctx.window().get(control));
    app.dispatch(Event::SliderChanged {
        control,
        value: current + days,
    });
}

fn handle_history_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('!') => {
            app.set_overlay(Overlay::None);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.history_scroll + 1 < app.message_history.len() {
                app.history_scroll += 1;
                app.ctx.bridge_mut().mark_dirty();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.history_scroll = app.history_scroll.saturating_sub(1);
            app.ctx.bridge_mut().mark_dirty();
        }
        _ => {}
    }
}

fn handle_date_entry(app: &mut AppState, key: KeyEvent) {
    let Overlay::DateEntry(entry) = &mut app.overlay else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.set_overlay(Overlay::None);
            return;
        }
        KeyCode::Enter => {
            let event = entry.to_event();
            app.set_overlay(Overlay::None);
            app.dispatch(event);
            return;
        }
        KeyCode::Tab | KeyCode::Down => entry.next_field(),
        KeyCode::BackTab | KeyCode::Up => entry.prev_field(),
        KeyCode::Backspace => {
            entry.focused_mut().pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            let field = entry.focused_mut();
            if field.len() < 10 {
                field.push(c);
            }
        }
        _ => return,
    }
    app.ctx.bridge_mut().mark_dirty();
}

pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.overlay != Overlay::None {
        return;
    }
    let Some(geometry) = ui::plot_geometry(app) else {
        return;
    };
    let (column, row) = (mouse.column, mouse.row);
    let inside = geometry.contains(column, row);

    match mouse.kind {
        MouseEventKind::Moved => {
            if inside {
                if let Some(x) = geometry.x_at_column(column) {
                    app.pointer_in_plot = true;
                    app.dispatch(Event::PointerMoved(Pointer {
                        x,
                        px_per_day: geometry.px_per_day(),
                    }));
                }
            } else if app.pointer_in_plot {
                app.pointer_in_plot = false;
                app.dispatch(Event::PointerLeft);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            // A drag keeps tracking past the plot edge; the core clamps the date.
            let area = geometry.area;
            let clamped = column.clamp(area.x, area.right().saturating_sub(1));
            if let Some(x) = geometry.x_at_column(clamped) {
                app.dispatch(Event::PointerMoved(Pointer {
                    x,
                    px_per_day: geometry.px_per_day(),
                }));
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if inside {
                if let Some(x) = geometry.x_at_column(column) {
                    app.dispatch(Event::PointerPressed(Pointer {
                        x,
                        px_per_day: geometry.px_per_day(),
                    }));
                }
                return;
            }
            let inner = ui::layout(app.screen).legend_inner;
            if column >= inner.x && column < inner.right() {
                if let Some(label) = legend_panel::label_at_row(app, inner, row) {
                    let label = label.to_string();
                    app.dispatch(Event::LegendClicked { label });
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.dispatch(Event::PointerReleased),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{app, d};
    use navlab_core::view::DateControl;
    use ratatui::layout::Rect;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(app: &mut AppState, kind: MouseEventKind, column: u16, row: u16) {
        handle_mouse(
            app,
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    fn sized_app() -> AppState {
        let mut app = app();
        app.screen = Rect::new(0, 0, 120, 40);
        app
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn arrows_move_the_focused_date() {
        let mut app = app();
        assert_eq!(app.focused_control, DateControl::Anchor);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.ctx.window().norm, d("2020-01-02"));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.focused_control, DateControl::Min);
        handle_key(&mut app, KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        let w = app.ctx.window();
        assert_eq!(w.min, d("2020-01-30"));
        assert_eq!(w.norm, d("2020-01-30"));
        assert_eq!(w.max, d("2020-01-31"));
    }

    #[test]
    fn digits_reach_the_core() {
        let mut app = app();
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.interaction.selected, Some(1));
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_str()),
            Some("Invalid fund ID: 99")
        );
    }

    #[test]
    fn date_entry_edits_and_submits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        assert!(matches!(app.overlay, Overlay::DateEntry(_)));

        // Overlay swallows global keys.
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "10-01-2020".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.ctx.window().norm, d("2020-01-10"));
    }

    #[test]
    fn date_entry_escape_discards() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.ctx.window().min, d("2020-01-01"));
    }

    #[test]
    fn cursor_follows_pointer_and_clears_on_leave() {
        let mut app = sized_app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Char('1'));

        let plot = ui::layout(app.screen).plot;
        mouse(&mut app, MouseEventKind::Moved, plot.x + 5, plot.y + 2);
        assert!(app.pointer_in_plot);
        assert!(app.frame().cursor.is_some());
        assert!(app
            .status_message
            .as_ref()
            .is_some_and(|(m, _)| m.starts_with("Fund: Alpha, Date: ")));

        mouse(&mut app, MouseEventKind::Moved, 0, 0);
        assert!(!app.pointer_in_plot);
        assert!(app.frame().cursor.is_none());
    }

    #[test]
    fn legend_click_toggles_visibility() {
        let mut app = sized_app();
        let inner = ui::layout(app.screen).legend_inner;
        mouse(
            &mut app,
            MouseEventKind::Down(MouseButton::Left),
            inner.x + 2,
            inner.y + 1,
        );
        assert!(!app.ctx.visibility().is_visible(1));
        assert!(app.ctx.visibility().is_visible(0));
    }

    #[test]
    fn marker_drags_with_the_mouse() {
        let mut app = sized_app();
        press(&mut app, KeyCode::Char('m'));
        let marker = app.ctx.markers().get(0).unwrap().clone();
        assert_eq!(marker.date, d("2020-01-16"));

        let geometry = ui::plot_geometry(&app).unwrap();
        let column = geometry.column_at_x(marker.x()).unwrap();
        let row = geometry.area.y + 1;
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), column, row);
        // Far past the right edge: clamped to the window.
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 500, row);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 500, row);

        let moved = app.ctx.markers().get(0).unwrap();
        assert!(moved.date > d("2020-01-28"));
        assert!(moved.date <= d("2020-01-31"));
    }

    #[test]
    fn scale_key_switches_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.frame().scale.name(), "log");
    }
}
