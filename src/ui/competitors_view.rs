use crate::sim::competitors::CompetitorResult;
use crate::sim::snapshot::RenderSnapshot;
use ratatui::layout::Rect;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, snapshot: &RenderSnapshot) {
    let mut items: Vec<ListItem> = snapshot.competitors.iter().map(competitor_item).collect();

    if items.is_empty() {
        items.push(ListItem::new(Line::from(vec![Span::raw(
            "No rival releases right now.",
        )])));
    }

    let list = List::new(items).block(
        Block::default()
            .title("NPC Competitors")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(list, area);
}

fn competitor_item(rival: &CompetitorResult) -> ListItem<'static> {
    let info = Line::from(Span::styled(
        format!("{} - '{}'", rival.studio, rival.game),
        Style::default().fg(Color::LightBlue),
    ));
    let stats = Line::from(Span::styled(
        format!(
            "{} | ${} | Buyers: {} | Profit: ${}",
            rival.genre, rival.price, rival.buyers, rival.profit
        ),
        Style::default().fg(Color::LightGreen),
    ));
    ListItem::new(vec![info, stats, Line::from("")])
}
