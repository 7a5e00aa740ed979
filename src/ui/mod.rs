use crate::sim::snapshot::RenderSnapshot;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub mod competitors_view;
pub mod sales_view;
pub mod studio_view;

pub fn render(frame: &mut Frame, snapshot: &RenderSnapshot) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(size);

    render_header(frame, layout[0], snapshot);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(38),
            Constraint::Percentage(34),
            Constraint::Percentage(28),
        ])
        .split(layout[1]);

    studio_view::render(frame, columns[0], snapshot);
    sales_view::render(frame, columns[1], snapshot);
    competitors_view::render(frame, columns[2], snapshot);

    render_prompt(frame, layout[2], snapshot);
    render_footer(frame, layout[3]);
}

fn render_header(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    let stats = &snapshot.stats;
    let lines = vec![Line::from(vec![
        Span::styled(
            "Game Dev Simulation",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  •  Money: "),
        Span::styled(format!("{}", stats.money), Style::default().fg(Color::Yellow)),
        Span::raw("  •  Days: "),
        Span::styled(format!("{}", stats.days), Style::default().fg(Color::Yellow)),
        Span::raw("  •  Fans: "),
        Span::styled(format!("{}", stats.fans), Style::default().fg(Color::Yellow)),
        Span::raw("  •  Hot Genre: "),
        Span::styled(stats.hot_genre, Style::default().fg(Color::LightRed)),
    ])];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    let line = Line::from(vec![
        Span::styled(snapshot.prompt.clone(), Style::default().fg(Color::Green)),
        Span::styled(snapshot.input.clone(), Style::default().fg(Color::White)),
        Span::styled("|", Style::default().fg(Color::Green)),
    ]);
    let prompt = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(prompt, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let instructions = Paragraph::new(Line::from(vec![
        Span::raw("Commands: "),
        Span::styled("develop small|medium|big", Style::default().fg(Color::Yellow)),
        Span::raw("  •  "),
        Span::styled("status", Style::default().fg(Color::Yellow)),
        Span::raw("  •  "),
        Span::styled("help", Style::default().fg(Color::Yellow)),
        Span::raw("  •  "),
        Span::styled("quit", Style::default().fg(Color::Yellow)),
        Span::raw("  •  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" exit"),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(instructions, area);
}
