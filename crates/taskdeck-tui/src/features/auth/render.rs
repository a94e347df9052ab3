//! Auth feature view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{AuthField, AuthMode};
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame, area: Rect) {
    let popup_width = 52.min(area.width);
    let popup_height = 13.min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    let title = match app.auth.mode {
        AuthMode::Login => " Sign in ",
        AuthMode::Register => " Create account ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::new();
    if app.auth.mode == AuthMode::Register {
        lines.push(field_line(
            "Name",
            &app.auth.name,
            app.auth.focus == AuthField::Name,
            false,
        ));
        lines.push(Line::default());
    }
    lines.push(field_line(
        "Email",
        &app.auth.email,
        app.auth.focus == AuthField::Email,
        false,
    ));
    lines.push(Line::default());
    lines.push(field_line(
        "Password",
        &app.auth.password,
        app.auth.focus == AuthField::Password,
        true,
    ));
    lines.push(Line::default());

    if app.tasks.login.is_running() || app.tasks.register.is_running() {
        lines.push(Line::from(Span::styled(
            "Authenticating...",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = &app.session.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::default());
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "enter submit · tab next field · ←/→ switch mode · ctrl-c quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_line(label: &str, value: &str, focused: bool, mask: bool) -> Line<'static> {
    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{marker}{label:<9}"), style),
        Span::raw(shown),
        Span::styled(if focused { "_" } else { "" }, Style::default().fg(Color::Cyan)),
    ])
}
