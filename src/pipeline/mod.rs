// ============================================================================
// Module : pipeline
// ============================================================================
// Chaîne de transformation fetch -> série -> filtre -> graphique
//
// 1. store   : chargement tout-ou-rien de la série brute
// 2. filter  : sélection par plage de dates (fonction pure)
// 3. adapter : conversion en labels/valeurs pour le graphique (fonction pure)
// ============================================================================

pub mod adapter;
pub mod filter;
pub mod store;

pub use adapter::{format_label, to_chart_series};
pub use filter::apply;
pub use store::TimeSeriesStore;
