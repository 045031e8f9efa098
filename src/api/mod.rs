// ============================================================================
// Module : api
// ============================================================================
// Client de la source de données (endpoint HTTP ou fichier JSON local)
// ============================================================================

pub mod source;  // Fetch de l'historique des prix

// Re-export des fonctions principales
pub use source::{fetch_price_history, fetch_source, load_price_file};
