use crate::sim::snapshot::{RenderSnapshot, SalesGraph};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    let Some(sales) = &snapshot.sales else {
        let idle = Paragraph::new("No sales to track yet.")
            .block(Block::default().title("Sales").borders(Borders::ALL));
        frame.render_widget(idle, area);
        return;
    };

    let sections = Layout::vertical([Constraint::Min(6), Constraint::Length(4)]).split(area);
    render_chart(frame, sections[0], sales);

    let mut lines = vec![Line::from(format!(
        "Sales time left: {}s  •  Peak buyers: {}",
        sales.time_left_secs, sales.peak
    ))];
    if let Some(event) = sales.event {
        lines.push(Line::from(Span::styled(
            event,
            Style::default().fg(Color::LightYellow),
        )));
    }
    let footer = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, sections[1]);
}

fn render_chart(frame: &mut Frame, area: Rect, sales: &SalesGraph) {
    let points = chart_points(&sales.history);
    let (low, high) = y_bounds(sales);
    let steps = sales.history.len().saturating_sub(1).max(1) as f64;

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(sales.title())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(Axis::default().bounds([0.0, steps]))
        .y_axis(
            Axis::default()
                .bounds([low as f64, high as f64])
                .labels(vec![
                    Span::raw(low.to_string()),
                    Span::raw(high.to_string()),
                ]),
        );
    frame.render_widget(chart, area);
}

fn chart_points(history: &[i64]) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .map(|(i, buyers)| (i as f64, *buyers as f64))
        .collect()
}

// a flat history still needs a non-empty axis
fn y_bounds(sales: &SalesGraph) -> (i64, i64) {
    if sales.max == sales.min {
        (sales.min, sales.max + 1)
    } else {
        (sales.min, sales.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(history: Vec<i64>) -> SalesGraph {
        let min = history.iter().copied().min().unwrap_or_default();
        let max = history.iter().copied().max().unwrap_or_default();
        SalesGraph {
            name: "Pong".to_string(),
            genre: "Casual",
            price: 10,
            history,
            min,
            max,
            peak: 0,
            time_left_secs: 60,
            event: None,
        }
    }

    #[test]
    fn flat_history_widens_the_axis() {
        assert_eq!(y_bounds(&graph(vec![-100])), (-100, -99));
        assert_eq!(y_bounds(&graph(vec![-100, 20])), (-100, 20));
    }

    #[test]
    fn points_are_indexed_by_tick() {
        assert_eq!(
            chart_points(&[-100, -60]),
            vec![(0.0, -100.0), (1.0, -60.0)]
        );
        assert_eq!(graph(vec![-1]).title(), "Sales for 'Pong' @ $10 [Casual]");
    }
}
