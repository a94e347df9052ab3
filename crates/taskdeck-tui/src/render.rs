//! Top-level view: chrome plus the per-route screen.
//!
//! Pure function of [`AppState`]; no mutation happens during a draw.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{assign, auth, dashboard, home};
use crate::notices::NoticeLevel;
use crate::routes::Route;
use crate::state::AppState;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_title_bar(app, frame, chunks[0]);

    match app.route {
        Route::Auth => auth::render::render(app, frame, chunks[1]),
        Route::Home => home::render::render(app, frame, chunks[1]),
        Route::Dashboard => dashboard::render::render(app, frame, chunks[1]),
        Route::Assign => assign::render::render(app, frame, chunks[1]),
    }

    render_status_strip(app, frame, chunks[2]);
}

fn render_title_bar(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " taskdeck ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if app.session.is_authenticated() {
        for (idx, route) in [Route::Home, Route::Dashboard, Route::Assign]
            .into_iter()
            .enumerate()
        {
            let style = if app.route == route {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!("  {} {}", idx + 1, route.title()),
                style,
            ));
        }
        if let Some(user) = &app.session.user {
            spans.push(Span::styled(
                format!("  ({})", user.name),
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else {
        spans.push(Span::styled(
            format!("  {}", app.route.title()),
            Style::default().fg(Color::Cyan),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_strip(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    if app.tasks.is_any_running() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {spinner} "),
            Style::default().fg(Color::Cyan),
        ));
    } else {
        spans.push(Span::raw("   "));
    }

    if let Some(notice) = app.notices.latest() {
        let style = match notice.level {
            NoticeLevel::Info => Style::default().fg(Color::White),
            NoticeLevel::Success => Style::default().fg(Color::Green),
            NoticeLevel::Error => Style::default().fg(Color::Red),
        };
        spans.push(Span::styled(notice.text.clone(), style));
    } else {
        let hint = match app.route {
            Route::Auth => "enter submit · tab next field · ctrl-c quit",
            Route::Home => {
                "a add · e edit · space toggle · d delete · r refresh · 1/2/3 screens · q quit"
            }
            Route::Dashboard => "h/l column · space toggle · r refresh · 1/2/3 screens · q quit",
            Route::Assign => "tab pane · enter pick/assign · r refresh · 1/2/3 screens · q quit",
        };
        spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
