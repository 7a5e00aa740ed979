use crate::sim::snapshot::RenderSnapshot;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    let sections = Layout::vertical([Constraint::Min(5), Constraint::Length(9)]).split(area);

    let message_lines: Vec<Line> = snapshot
        .message_lines
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    let message = Paragraph::new(message_lines)
        .block(Block::default().title("Studio").borders(Borders::ALL));
    frame.render_widget(message, sections[0]);

    if !snapshot.genre_options.is_empty() {
        let items: Vec<ListItem> = snapshot
            .genre_options
            .iter()
            .map(|option| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{}: ", option.number),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(option.genre, Style::default().fg(Color::LightGreen)),
                ]))
            })
            .collect();
        let block = Block::default().title("Genres").borders(Borders::ALL);
        frame.render_widget(List::new(items).block(block), sections[1]);
        return;
    }

    let block = Block::default().title("Project").borders(Borders::ALL);

    let text = match &snapshot.development {
        Some(dev) => Line::from(Span::styled(
            dev.summary(),
            Style::default().fg(Color::Cyan),
        )),
        None if snapshot.sales.is_some() => Line::from("Tracking sales..."),
        None => Line::from("No project underway."),
    };
    frame.render_widget(Paragraph::new(text).block(block), sections[1]);
}
