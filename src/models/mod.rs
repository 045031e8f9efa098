// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod chart_series;    // Série prête pour le graphique
pub mod data_point;      // Point (timestamp, valeur) + enregistrement brut
pub mod range_selection; // Bornes début/fin de l'utilisateur
pub mod time_series;     // Série ordonnée de points

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use brentdash::models::time_series::TimeSeries;
// On peut faire : use brentdash::models::TimeSeries;
pub use chart_series::{ChartSeries, SeriesStyle, BRENT_STYLE};
pub use data_point::{parse_date, DataPoint, RawPricePoint};
pub use range_selection::RangeSelection;
pub use time_series::{SeriesSummary, TimeSeries};
