// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine le dashboard complet : header avec stats globales et sentiment,
// rangée de cartes agrégées, tableau filtrable avec sparklines, footer avec
// les raccourcis. Tout est lu depuis App ; aucun état propre au rendu.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Screen, MOCK_BTC_DOMINANCE};
use crate::market::{self, format_currency, format_percent};
use crate::models::{CoinRecord, FilterMode};
use crate::ui::chart;

/// Glyphes de la sparkline texte, du plus bas au plus haut
const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Largeur en caractères de la cellule sparkline du tableau
const SPARK_CELL_WIDTH: usize = 14;

/// Dessine l'interface complète (routage par écran)
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Dashboard => render_dashboard(frame, app),
        Screen::ChartView => chart::render_chart(frame, app, frame.size()),
    }
}

/// Dessine le dashboard (header, cartes, tableau, footer)
fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header : stats globales
            Constraint::Length(7), // Cartes agrégées
            Constraint::Min(0),    // Tableau
            Constraint::Length(3), // Footer : raccourcis
        ])
        .split(frame.size())
        .to_vec();

    render_header(frame, app, chunks[0]);
    render_cards(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

// ============================================================================
// Header : stats globales et sentiment
// ============================================================================

/// Dessine le header avec les stats dérivées du batch
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.demo_mode {
        " Coinboard — DÉMO "
    } else {
        " Coinboard "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_alignment(Alignment::Center);

    let sym = app.currency.symbol();

    // Ligne 1 : totaux dérivés du batch + dominance BTC (approximation)
    let stats_line = Line::from(vec![
        Span::raw(" MCap: "),
        Span::styled(
            format_currency(app.global_market_cap(), sym, true),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Vol 24h: "),
        Span::styled(
            format_currency(app.global_volume(), sym, true),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Dom. BTC: "),
        Span::styled(
            format!("~{:.1}%", MOCK_BTC_DOMINANCE),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("   Devise: "),
        Span::styled(
            app.currency.code().to_uppercase(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);

    // Ligne 2 : sentiment + horodatage du dernier refresh
    let mut info_spans = vec![Span::raw(" Sentiment: ")];
    match &app.sentiment {
        Some(s) => {
            let color = if s.is_greedy() { Color::Green } else { Color::Red };
            info_spans.push(Span::styled(
                format!("{} ({})", s.value, s.classification),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        }
        None => info_spans.push(Span::styled("—", Style::default().fg(Color::Gray))),
    }

    if let Some(ts) = app.last_refresh {
        info_spans.push(Span::raw("   Maj: "));
        info_spans.push(Span::styled(
            ts.format("%H:%M:%S").to_string(),
            Style::default().fg(Color::Gray),
        ));
    }
    info_spans.push(Span::raw(format!(
        "   Prochain refresh: {}s",
        app.seconds_until_refresh()
    )));

    let paragraph = Paragraph::new(vec![stats_line, Line::from(info_spans)]).block(block);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Cartes agrégées
// ============================================================================

/// Dessine la rangée de cartes (3 visibles, scroll avec h/l)
fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let lists = app.card_lists();
    let cards = lists.cards();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area)
        .to_vec();

    for (slot, column) in columns.iter().enumerate() {
        let idx = (app.card_offset + slot) % cards.len();
        let (card_title, subtitle, coins) = cards[idx];
        render_card(frame, app, *column, card_title, subtitle, coins);
    }
}

/// Dessine une carte : titre, sous-titre, jusqu'à 3 coins
fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    subtitle: &str,
    coins: &[CoinRecord],
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title));

    let mut lines = vec![Line::from(Span::styled(
        subtitle,
        Style::default().fg(Color::Gray),
    ))];

    if coins.is_empty() {
        lines.push(Line::from(Span::styled(
            "—",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for coin in coins {
        let change = coin.change_24h();
        let change_color = if coin.is_positive() { Color::Green } else { Color::Red };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<12}", truncate(&coin.name, 12)),
                Style::default().fg(Color::White),
            ),
            Span::raw(format!(
                " {:>10}",
                format_currency(coin.current_price, app.currency.symbol(), false)
            )),
            Span::styled(
                format!(" {:>8}", format_percent(change)),
                Style::default().fg(change_color),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tableau des coins
// ============================================================================

/// Dessine le tableau filtré avec la barre de filtres en titre
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(filter_bar(app));

    let view = app.table_view();

    // États vides : trois messages distincts selon la cause
    if view.is_empty() {
        let message = if app.has_no_data() {
            "Aucune donnée chargée — en attente de l'API..."
        } else if app.active_filter == FilterMode::Watchlist {
            "Aucun favori pour l'instant. Touche [f] pour étoiler un coin."
        } else {
            "Aucun coin ne correspond à ce filtre."
        };

        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
        ])
        .block(block)
        .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Coin"),
        Cell::from("Prix"),
        Cell::from("24h"),
        Cell::from("Volume"),
        Cell::from("MCap"),
        Cell::from("7 jours"),
        Cell::from("★"),
    ])
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let sym = app.currency.symbol();
    let rows: Vec<Row> = view
        .iter()
        .enumerate()
        .map(|(index, coin)| {
            let change_color = if coin.is_positive() { Color::Green } else { Color::Red };
            let starred = app.watchlist.contains(&coin.id);

            let rank = coin
                .market_cap_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "—".to_string());

            let mut row = Row::new(vec![
                Cell::from(rank).style(Style::default().fg(Color::DarkGray)),
                Cell::from(format!(
                    "{} ({})",
                    truncate(&coin.name, 16),
                    coin.symbol_upper()
                )),
                Cell::from(format_currency(coin.current_price, sym, false)),
                Cell::from(format_percent(coin.change_24h()))
                    .style(Style::default().fg(change_color)),
                Cell::from(format_currency(coin.total_volume, sym, true)),
                Cell::from(format_currency(coin.market_cap, sym, true)),
                Cell::from(spark_cell(&coin.sparkline_in_7d.price, SPARK_CELL_WIDTH))
                    .style(Style::default().fg(change_color)),
                Cell::from(if starred { "★" } else { " " })
                    .style(Style::default().fg(Color::Yellow)),
            ]);

            if index == app.selected_index {
                row = row.style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::REVERSED),
                );
            }

            row
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(24),
            Constraint::Length(14),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(SPARK_CELL_WIDTH as u16 + 1),
            Constraint::Length(2),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

/// Construit la barre de filtres affichée en titre du tableau
fn filter_bar(app: &App) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, mode) in FilterMode::all_modes().iter().enumerate() {
        let style = if *mode == app.active_filter {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("[{}] {}", i + 1, mode.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

// ============================================================================
// Footer : raccourcis et confirmations
// ============================================================================

/// Dessine le footer (raccourcis, confirmation de quit, avis de démo)
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let content = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            format!("⚠  {}", notice),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("[1-6]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Filtre  "),
            Span::styled("[↑↓/jk]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Naviguer  "),
            Span::styled("[←→/hl]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Cartes  "),
            Span::styled("[f]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Favori  "),
            Span::styled("[c]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Devise  "),
            Span::styled("[r]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Refresh  "),
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Graphique  "),
            Span::styled("[q]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Quitter"),
        ])
    };

    let paragraph = Paragraph::new(vec![content])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Helpers
// ============================================================================

/// Sparkline texte : échantillonne la série et mappe chaque point sur un
/// glyphe de hauteur
///
/// Réutilise la normalisation du cœur (hauteur = nombre de glyphes − 1) ;
/// l'axe y normalisé pointe vers le bas, d'où l'inversion avant indexation.
fn spark_cell(prices: &[f64], width: usize) -> String {
    if prices.is_empty() || width == 0 {
        return String::new();
    }

    // Échantillonne au plus `width` points, régulièrement espacés
    let stride = (prices.len() as f64 / width as f64).max(1.0);
    let sampled: Vec<f64> = (0..width.min(prices.len()))
        .map(|i| prices[((i as f64 * stride) as usize).min(prices.len() - 1)])
        .collect();

    let max_idx = (SPARK_GLYPHS.len() - 1) as f64;
    market::normalize_points(&sampled, width as f64, max_idx)
        .into_iter()
        .map(|(_, y)| {
            let idx = (max_idx - y).round().clamp(0.0, max_idx) as usize;
            SPARK_GLYPHS[idx]
        })
        .collect()
}

/// Tronque une chaîne avec ellipse
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spark_cell_width_and_extremes() {
        let prices: Vec<f64> = (0..168).map(|i| i as f64).collect();
        let cell = spark_cell(&prices, 12);

        assert_eq!(cell.chars().count(), 12);
        // Série croissante : premier glyphe au plus bas, dernier au plus haut
        assert_eq!(cell.chars().next(), Some('▁'));
        assert_eq!(cell.chars().last(), Some('█'));
    }

    #[test]
    fn test_spark_cell_flat_series_mid_glyph() {
        let cell = spark_cell(&[5.0; 30], 10);
        // Série plate : tous les glyphes identiques, à mi-hauteur
        let glyphs: Vec<char> = cell.chars().collect();
        assert!(glyphs.iter().all(|&g| g == glyphs[0]));
        assert!(glyphs[0] == '▄' || glyphs[0] == '▅');
    }

    #[test]
    fn test_spark_cell_empty() {
        assert_eq!(spark_cell(&[], 12), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Bitcoin", 12), "Bitcoin");
        assert_eq!(truncate("Internet Computer", 12), "Internet Co…");
    }
}
