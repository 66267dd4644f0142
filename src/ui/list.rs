// Project list rendering.
// Styled, selectable list with loading and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::projects::Project;
use crate::state::{LoadingState, ProjectsTabState};
use crate::theme::Palette;

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    format_relative_time_at(dt, Utc::now())
}

fn format_relative_time_at(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, palette: &Palette, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.muted));
    frame.render_widget(text, area);
}

fn project_item<'a>(project: &'a Project, palette: &Palette) -> ListItem<'a> {
    let mut title = vec![
        Span::styled(
            project.name.as_str(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ★ {}", project.stars), Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  {}", project.added_date.format("%Y-%m-%d")),
            Style::default().fg(palette.muted),
        ),
    ];
    if project.live_link.is_some() {
        title.push(Span::styled("  [live]", Style::default().fg(palette.success)));
    }

    let mut lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("  {}", project.description),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            format!("  {}", project.github_link),
            Style::default().fg(palette.accent),
        )),
    ];
    if let Some(live) = &project.live_link {
        lines.push(Line::from(Span::styled(
            format!("  {}", live),
            Style::default().fg(palette.success),
        )));
    }
    ListItem::new(lines)
}

/// Render the projects list for the current sort mode.
pub fn render_projects(
    frame: &mut Frame,
    state: &mut ProjectsTabState,
    palette: &Palette,
    area: Rect,
) {
    match &state.loaded {
        LoadingState::Idle => render_empty(frame, area, palette, "Projects not loaded yet"),
        LoadingState::Loading => render_loading(frame, area, "Loading projects"),
        LoadingState::Loaded(_) => {
            let projects = state.visible();
            if projects.is_empty() {
                render_empty(frame, area, palette, "No projects match the featured list");
                return;
            }

            let items: Vec<ListItem> = projects
                .iter()
                .map(|project| project_item(project, palette))
                .collect();

            let title = format!(
                " Projects ({}) sorted by {} ",
                projects.len(),
                state.sort.label()
            );
            let list_widget = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(
                    Style::default()
                        .bg(palette.highlight_bg)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            frame.render_stateful_widget(list_widget, area, &mut state.list_state);
        }
    }
}
