// Tab bar rendering with badge support for Console tab.
// Highlights the active page and shows the unread warning/error count.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::theme::Palette;

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let unread = app.console.unread;

    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let title = if *tab == Tab::Console && unread > 0 {
                format!("{} {} ({})", i + 1, tab.title(), unread)
            } else {
                format!("{} {}", i + 1, tab.title())
            };

            let style = if *tab == app.active_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if *tab == Tab::Console && app.console.error_burst {
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD)
            } else if *tab == Tab::Console && unread > 0 {
                Style::default().fg(palette.error)
            } else {
                Style::default().fg(palette.text)
            };

            Line::from(Span::styled(title, style))
        })
        .collect();

    let selected_index = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.muted))
                .title(" folio ")
                .title_style(
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
