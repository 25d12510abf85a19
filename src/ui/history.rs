use crate::app::state::{AppState, HistoryFilter};
use crate::flow::quote;
use crate::ui::theme::Theme;
use crate::ui::{layout, money, panel, status_style};
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Tabs};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = layout::rows(area, &[3, area.height.saturating_sub(3)]);

    let titles: Vec<Line> = HistoryFilter::ALL
        .iter()
        .map(|f| Line::from(format!(" {} ", f.label())))
        .collect();
    let selected = HistoryFilter::ALL
        .iter()
        .position(|f| *f == state.history_filter)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(panel(" Transaction History ", true))
        .select(selected)
        .style(Theme::muted())
        .highlight_style(Theme::selected());
    frame.render_widget(tabs, rows[0]);

    let txs = state.filtered_history();
    let items: Vec<ListItem> = if txs.is_empty() {
        vec![ListItem::new(Span::styled(" Nothing here yet", Theme::muted()))]
    } else {
        txs.iter()
            .map(|tx| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw(format!(" {} ", tx.country_flag)),
                        Span::styled(format!("{:<20}", tx.recipient), Theme::title()),
                        Span::styled(format!("{:>16}", money(&tx.sent_currency, tx.sent_amount)), Theme::amount()),
                    ]),
                    Line::from(vec![
                        Span::styled(format!("    {}  ", tx.date.format("%b %d, %Y")), Theme::muted()),
                        Span::styled(format!("{:<10}", tx.status.label()), status_style(tx.status)),
                        Span::styled(
                            format!(
                                "{} {}  #{}",
                                quote::format_amount(tx.received_amount),
                                tx.received_currency,
                                tx.id
                            ),
                            Theme::muted(),
                        ),
                    ]),
                ])
            })
            .collect()
    };
    frame.render_widget(List::new(items).block(panel("", false)), rows[1]);
}
