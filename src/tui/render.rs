//! Drawing of [`AppState`].

use crate::app::{AppState, Popup, SettingsField, SettingsForm};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

const TITLE: &str = "Daily Motivation";
const POPUP_WIDTH: u16 = 50;
const SETTINGS_HEIGHT: u16 = 10;

/// Draw the whole window.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let [title, quote, message, controls, status] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(5),
        Constraint::Min(7),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(TITLE.bold())).alignment(Alignment::Center),
        title,
    );

    let quote_text = state.quote.as_deref().unwrap_or("No quote yet.");
    frame.render_widget(
        Paragraph::new(quote_text)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" Quote of the Day ")),
        quote,
    );

    let message_text = state.message.as_deref().unwrap_or("No message yet.");
    frame.render_widget(
        Paragraph::new(message_text)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(format!(" Message for {} ", state.session.user_name))),
        message,
    );

    frame.render_widget(
        Paragraph::new(controls_line()).alignment(Alignment::Center),
        controls,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(state.status.as_str()),
            Span::raw(format!("  ·  refreshes {}", state.refresh_schedule)).dim(),
        ])),
        status,
    );

    if let Some(form) = &state.settings {
        draw_settings(frame, form);
    }
    if let Some(popup) = &state.popup {
        draw_popup(frame, popup);
    }
}

fn controls_line() -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in [("r", "refresh"), ("p", "ping"), ("s", "settings"), ("q", "quit")] {
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(key.bold());
        spans.push(Span::raw(format!(" {label}")).dim());
    }
    Line::from(spans)
}

fn draw_popup(frame: &mut Frame, popup: &Popup) {
    let body_lines = u16::try_from(popup.body.lines().count()).unwrap_or(u16::MAX);
    let height = body_lines.saturating_add(4);
    let area = centered(frame.area(), POPUP_WIDTH, height);
    frame.render_widget(Clear, area);
    let mut text = Text::from(popup.body.as_str());
    text.push_line(Line::default());
    text.push_line("press any key".dim());
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(format!(" {} ", popup.title))),
        area,
    );
}

fn draw_settings(frame: &mut Frame, form: &SettingsForm) {
    let area = centered(frame.area(), POPUP_WIDTH, SETTINGS_HEIGHT);
    frame.render_widget(Clear, area);

    let field = |label: &'static str, value: &str, which: SettingsField| {
        let focused = form.focus == which;
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().bold()
        } else {
            Style::default()
        };
        vec![
            Line::from(format!("{marker}{label}")),
            Line::from(Span::styled(format!("  {value}"), style)),
        ]
    };

    let mut lines = field("Your Name:", &form.name, SettingsField::Name);
    lines.extend(field(
        "Backend URL:",
        &form.backend_url,
        SettingsField::BackendUrl,
    ));
    lines.push(Line::default());
    match &form.error {
        Some(err) => lines.push(Line::from(err.clone().red())),
        None => lines.push(Line::from("Enter save · Tab switch · Esc cancel".dim())),
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" Settings ")),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, cell, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(row);
    cell
}
