// UI module for rendering the TUI.
// Contains the tab bar, page header, per-tab content, and status bar.

mod list;
mod pages;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::cache::Source;
use crate::content::{self, Hero};
use crate::telemetry::Level;
use crate::theme::Palette;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = app.theme.palette();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Length(3), // Page header
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Footer links
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, &palette, chunks[0]);

    match page_hero(app.active_tab) {
        Some(hero) => draw_header(frame, hero, &palette, chunks[1]),
        None => {
            let block = Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.muted));
            frame.render_widget(block, chunks[1]);
        }
    }

    draw_content(frame, app, &palette, chunks[2]);
    draw_footer(frame, &palette, chunks[3]);
    draw_status_bar(frame, app, &palette, chunks[4]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame, &palette);
    }
}

fn page_hero(tab: Tab) -> Option<&'static Hero> {
    match tab {
        Tab::Home => Some(&content::HOME_HERO),
        Tab::Projects => Some(&content::PROJECTS_HERO),
        Tab::Skills => Some(&content::SKILLS_HERO),
        Tab::Contact => Some(&content::CONTACT_HERO),
        Tab::Console => None,
    }
}

fn draw_header(frame: &mut Frame, hero: &Hero, palette: &Palette, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            hero.title,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hero.subtitle, Style::default().fg(palette.muted))),
    ];
    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.muted)),
    );
    frame.render_widget(header, area);
}

/// Draw the main content area based on active tab.
fn draw_content(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    match app.active_tab {
        Tab::Home => pages::draw_home(frame, palette, area),
        Tab::Projects => list::render_projects(frame, &mut app.projects, palette, area),
        Tab::Skills => pages::draw_skills(frame, palette, area),
        Tab::Contact => pages::draw_contact(frame, &app.contact, palette, area),
        Tab::Console => draw_console_tab(frame, app, palette, area),
    }
}

/// Draw the Console tab with logged messages.
fn draw_console_tab(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Console ");

    if app.console.messages.is_empty() {
        let text = Paragraph::new("No messages")
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    // Newest first
    let items: Vec<ListItem> = app
        .console
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let (icon, color) = match msg.level {
                Level::Error => ("x", palette.error),
                Level::Warn => ("!", Color::Yellow),
                Level::Info => ("i", palette.accent),
            };

            let time = list::format_relative_time(&msg.timestamp);

            let mut spans = vec![
                Span::styled(format!("{} ", icon), Style::default().fg(color)),
                Span::styled(time, Style::default().fg(palette.muted)),
                Span::raw(" "),
            ];
            if let Some(reason) = msg.reason {
                spans.push(Span::styled(
                    format!("[{}] ", reason.code()),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(msg.message.clone(), Style::default().fg(color)));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut app.console.list_state);
}

/// Draw the footer with validated social links.
fn draw_footer(frame: &mut Frame, palette: &Palette, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, link) in content::footer_links().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(palette.muted)));
        }
        spans.push(Span::styled(link.label, Style::default().fg(palette.accent)));
        spans.push(Span::styled(
            format!(" {}", link.url),
            Style::default().fg(palette.muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.active_tab {
        Tab::Contact if app.contact.editing => vec![
            ("Tab", "Next field"),
            ("^S", "Send"),
            ("Esc", "Stop editing"),
        ],
        Tab::Contact => vec![("↵", "Edit"), ("↑↓", "Field"), ("^S", "Send")],
        Tab::Projects => vec![("↑↓", "Navigate"), ("s", "Sort"), ("r", "Refresh")],
        Tab::Console => vec![("↑↓", "Navigate")],
        Tab::Home | Tab::Skills => Vec::new(),
    }
}

/// Draw the status bar with keybinding hints, data source, and rate limit.
fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut hints = Vec::new();
    for (key, label) in key_hints(app)
        .into_iter()
        .chain([("Tab", "Switch"), ("t", "Theme"), ("?", "Help"), ("q", "Quit")])
    {
        hints.push(Span::raw(format!(" {} ", key)));
        hints.push(Span::styled(
            format!("{} ", label),
            Style::default().fg(palette.muted),
        ));
    }

    if app.active_tab == Tab::Projects {
        let source = match app.projects.source() {
            Some(Source::Cache) => Some(("cached", palette.muted)),
            Some(Source::Remote) => Some(("live", palette.success)),
            Some(Source::Fallback) => Some(("offline sample", Color::Yellow)),
            None => None,
        };
        if let Some((label, color)) = source {
            hints.push(Span::styled(format!(" [{}]", label), Style::default().fg(color)));
        }
    }

    // Only meaningful once a response carried the headers
    if let Some(rate) = app.rate_limit.as_ref().filter(|rate| rate.limit > 0) {
        let rate_color = if rate.remaining < 10 {
            palette.error
        } else if rate.remaining < 30 {
            Color::Yellow
        } else {
            palette.muted
        };
        hints.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    let popup_width = 52;
    let popup_height = 19;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(
        popup_x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(palette.accent);
    let entries = [
        ("  Tab / S-Tab   ", "Switch tabs"),
        ("  1-5           ", "Jump to tab"),
        ("  ↑/↓ or j/k    ", "Navigate list / form fields"),
        ("  s             ", "Cycle project sort"),
        ("  r             ", "Refresh projects (skip cache)"),
        ("  Enter / i     ", "Edit contact form"),
        ("  Ctrl+S        ", "Send contact form"),
        ("  Esc           ", "Stop editing / close help"),
        ("  t             ", "Toggle light/dark theme"),
        ("  ?             ", "Show/hide this help"),
        ("  q             ", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    help_text.extend(entries.iter().map(|(key, action)| {
        Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)])
    }));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(palette.muted)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(palette.muted)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(palette.muted)),
    ]));

    let help_paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(key_style)
            .title(" Help ")
            .title_style(key_style.add_modifier(Modifier::BOLD)),
    );

    frame.render_widget(help_paragraph, popup_area);
}
