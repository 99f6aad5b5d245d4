// ============================================================================
// Chart - Graphique 7 jours du coin sélectionné
// ============================================================================
// Affiche la série sparkline 7 jours en pleine page (ratatui Chart). Ouvert
// avec Entrée depuis le tableau, fermé avec Échap.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::market::{format_currency, format_percent, trade_link};
use crate::models::CoinRecord;

/// Dessine la vue graphique pour le coin sélectionné
pub fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let coin = match app.selected_coin() {
        Some(coin) => coin,
        None => {
            render_no_data(frame, area, "Aucun coin sélectionné");
            return;
        }
    };

    if coin.sparkline_in_7d.price.is_empty() {
        let msg = format!("Pas de série 7 jours pour {}", coin.name);
        render_no_data(frame, area, &msg);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Titre
            Constraint::Min(0),    // Graphique
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec();

    render_chart_header(frame, app, &coin, chunks[0]);
    render_chart_graph(frame, app, &coin, chunks[1]);
    render_chart_footer(frame, &coin, chunks[2]);
}

/// Dessine le titre avec les infos du coin
fn render_chart_header(frame: &mut Frame, app: &App, coin: &CoinRecord, area: Rect) {
    let change = coin.change_24h();
    let change_color = if coin.is_positive() { Color::Green } else { Color::Red };

    let title_line = Line::from(vec![
        Span::styled(
            format!("{} ({})", coin.name, coin.symbol_upper()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format_currency(coin.current_price, app.currency.symbol(), false),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(format_percent(change), Style::default().fg(change_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Évolution sur 7 jours ");

    let paragraph = Paragraph::new(vec![title_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le graphique ligne de la série 7 jours
fn render_chart_graph(frame: &mut Frame, app: &App, coin: &CoinRecord, area: Rect) {
    let prices = &coin.sparkline_in_7d.price;

    let points: Vec<(f64, f64)> = prices
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as f64, p))
        .collect();

    let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    // Marge verticale pour que la courbe ne colle pas aux bords
    let pad = ((max - min) * 0.05).max(max.abs() * 0.001);
    let (y_min, y_max) = (min - pad, max + pad);

    let line_color = if coin.is_positive() { Color::Green } else { Color::Red };
    let datasets = vec![Dataset::default()
        .name(coin.symbol_upper())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(line_color))
        .data(&points)];

    let sym = app.currency.symbol();
    let y_labels = vec![
        Span::raw(format_currency(min, sym, false)),
        Span::raw(format_currency((min + max) / 2.0, sym, false)),
        Span::raw(format_currency(max, sym, false)),
    ];
    let x_labels = vec![
        Span::raw("-7j"),
        Span::raw("-3.5j"),
        Span::raw("maintenant"),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (points.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Dessine le footer avec le lien de trading et le retour
fn render_chart_footer(frame: &mut Frame, coin: &CoinRecord, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = Line::from(vec![
        Span::styled("Trade: ", Style::default().fg(Color::Gray)),
        Span::styled(
            trade_link(&coin.symbol),
            Style::default().fg(Color::Blue),
        ),
        Span::raw("   "),
        Span::styled("[Esc]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" Retour"),
    ]);

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Message de repli quand il n'y a rien à tracer
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Graphique ");

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Esc]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Retour"),
        ]),
    ])
    .block(block)
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
