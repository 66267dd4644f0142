// Static pages and the contact form.
// Home intro, skill groups, and the form with its inline notice.

use ratatui::{prelude::*, widgets::*};

use crate::content::{INTRO, SKILLS};
use crate::state::{ContactTabState, Field, Notice};
use crate::theme::Palette;

pub fn draw_home(frame: &mut Frame, palette: &Palette, area: Rect) {
    let mut lines = Vec::new();
    for (i, paragraph) in INTRO.iter().enumerate() {
        let style = if i == 0 {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        lines.push(Line::from(Span::styled(*paragraph, style)));
        lines.push(Line::from(""));
    }

    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" About "));
    frame.render_widget(text, area);
}

pub fn draw_skills(frame: &mut Frame, palette: &Palette, area: Rect) {
    let items: Vec<ListItem> = SKILLS
        .iter()
        .map(|group| {
            let mut tags = Vec::with_capacity(group.items.len() * 2);
            for item in group.items {
                tags.push(Span::styled(
                    format!("[{}]", item),
                    Style::default().fg(palette.accent),
                ));
                tags.push(Span::raw(" "));
            }
            ListItem::new(vec![
                Line::from(Span::styled(
                    group.title,
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(tags),
                Line::from(""),
            ])
        })
        .collect();

    let list_widget =
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Skills "));
    frame.render_widget(list_widget, area);
}

fn draw_field(
    frame: &mut Frame,
    state: &ContactTabState,
    field: Field,
    palette: &Palette,
    area: Rect,
) {
    let focused = state.focus == field;
    let border = if focused && state.editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };

    let value = state.value(field);
    let mut lines: Vec<Line> = if value.is_empty() {
        vec![Line::from(Span::styled(
            field.placeholder(),
            Style::default().fg(palette.muted),
        ))]
    } else {
        value.split('\n').map(Line::raw).collect()
    };
    if focused && state.editing {
        let cursor = Span::styled("█", Style::default().fg(Color::Yellow));
        if value.is_empty() {
            lines = vec![Line::from(cursor)];
        } else if let Some(last) = lines.last_mut() {
            last.push_span(cursor);
        }
    }

    // Keep the cursor line visible in the message box
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", field.label())),
        );
    frame.render_widget(widget, area);
}

pub fn draw_contact(frame: &mut Frame, state: &ContactTabState, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Min(4),    // Message
            Constraint::Length(1), // Notice
        ])
        .split(area);

    draw_field(frame, state, Field::Name, palette, chunks[0]);
    draw_field(frame, state, Field::Email, palette, chunks[1]);
    draw_field(frame, state, Field::Message, palette, chunks[2]);

    let notice = if state.sending {
        Line::from(Span::styled(" Sending...", Style::default().fg(Color::Yellow)))
    } else {
        match &state.notice {
            Some(Notice::Error(message)) => Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(palette.error),
            )),
            Some(Notice::Success(message)) => Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(palette.success),
            )),
            None => Line::from(""),
        }
    };
    frame.render_widget(Paragraph::new(notice), chunks[3]);
}
