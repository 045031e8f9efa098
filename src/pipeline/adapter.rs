// ============================================================================
// ChartSeriesAdapter
// ============================================================================
// Fonction pure : TimeSeries -> ChartSeries (labels de date + valeurs)
//
// CONCEPT : Labels "locale"
// - Format court en-US sans zéros : "1/5/2023"
// - Calculé en UTC, comme le timestamp normalisé
// ============================================================================

use chrono::{DateTime, Utc};

use crate::models::{ChartSeries, TimeSeries};

/// Format chrono des labels de l'axe X (%-m : mois sans zéro initial)
pub const DATE_LABEL_FORMAT: &str = "%-m/%-d/%Y";

/// Formate un timestamp en label de date
pub fn format_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DATE_LABEL_FORMAT).to_string()
}

/// Convertit la série filtrée en série pour le graphique
///
/// Totale : une série vide donne des labels/valeurs vides.
pub fn to_chart_series(series: &TimeSeries) -> ChartSeries {
    // CONCEPT RUST : unzip()
    // - Un seul passage, deux Vec alignés par construction
    let (labels, values) = series
        .iter()
        .map(|p| (format_label(&p.timestamp), p.value))
        .unzip();

    ChartSeries { labels, values }
}
