// ============================================================================
// Chart - Rendu du graphique ligne
// ============================================================================
// Affiche la ChartSeries dérivée (labels + valeurs) avec ratatui
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher (nom + couleur = BRENT_STYLE)
// 3. Axis : labels de dates sur X, prix sur Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::models::{ChartSeries, SeriesStyle, BRENT_STYLE};

/// Dessine le graphique de la série (ou un message si elle est vide)
pub fn render_chart(frame: &mut Frame, series: &ChartSeries, area: Rect) {
    let points = series.points();

    // La série vide est un cas normal (fetch échoué, plage inversée, etc.)
    let (min_price, max_price) = match series.value_bounds() {
        Some(bounds) => bounds,
        None => {
            render_no_data(frame, area, "Aucun point à afficher");
            return;
        }
    };

    let (y_min, y_max) = y_bounds(min_price, max_price);

    let datasets = vec![Dataset::default()
        .name(BRENT_STYLE.name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(line_color(&BRENT_STYLE)))
        .data(&points)];

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let x_axis = Axis::default()
        .title("Date")
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(x_labels(series).into_iter().map(Span::raw).collect());

    let y_axis = Axis::default()
        .title("Prix ($)")
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("${:.0}", y_min)),
            Span::raw(format!("${:.0}", (y_min + y_max) / 2.0)),
            Span::raw(format!("${:.0}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} - {} points ", BRENT_STYLE.name, series.len())),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Bornes de l'axe Y : marge de 5% (au moins 1.0 si tous les prix sont égaux)
///
/// Pas de plancher à 0 : une valeur négative reste sur l'axe.
pub fn y_bounds(min_price: f64, max_price: f64) -> (f64, f64) {
    let margin = ((max_price - min_price) * 0.05).max(1.0);
    (min_price - margin, max_price + margin)
}

/// Couleur ratatui de la ligne
pub fn line_color(style: &SeriesStyle) -> Color {
    let (r, g, b) = style.line_rgb;
    Color::Rgb(r, g, b)
}

/// Labels de l'axe X : premier, milieu et dernier label de la série
///
/// ratatui répartit les labels uniformément sur l'axe, on en garde 3
/// pour qu'ils restent lisibles.
pub fn x_labels(series: &ChartSeries) -> Vec<String> {
    let labels = &series.labels;
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        2 => vec![labels[0].clone(), labels[1].clone()],
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

/// Affiche un message quand il n'y a pas de données à afficher
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} ", BRENT_STYLE.name));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
