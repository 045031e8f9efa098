// ============================================================================
// Module : error
// ============================================================================
// Taxonomie des erreurs de la librairie
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] implémente std::error::Error automatiquement
// - #[error("...")] génère l'implémentation de Display
// - Le binaire (main.rs) reste sur anyhow pour le contexte
//
// Le filtrage et l'adaptation vers le graphique n'ont AUCUNE variante ici :
// ce sont des fonctions totales.
// ============================================================================

use thiserror::Error;

/// Erreurs remontées par le chargement des données
#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    /// Échec réseau/transport (connexion, statut HTTP, corps illisible)
    #[error("Échec de récupération des données : {0}")]
    Fetch(String),

    /// Lecture impossible d'un fichier de données local
    #[error("Lecture du fichier {path} impossible : {reason}")]
    Io { path: String, reason: String },

    /// Une date source n'est pas parsable : tout le lot est rejeté
    #[error("Date invalide à l'index {index} : {value:?}")]
    MalformedDate { index: usize, value: String },

    /// Un prix non fini (NaN, infini) : tout le lot est rejeté
    #[error("Prix invalide à l'index {index} : {value}")]
    InvalidPrice { index: usize, value: f64 },

    /// Inspection demandée sur une série vide
    #[error("La série est vide")]
    EmptySeries,
}

impl DashboardError {
    /// Vrai pour les erreurs de transport (le graphique reste sur la série précédente)
    pub fn is_fetch(&self) -> bool {
        matches!(self, DashboardError::Fetch(_) | DashboardError::Io { .. })
    }
}

// CONCEPT RUST : From trait
// - Permet d'utiliser ? directement sur les erreurs reqwest
impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Fetch(err.to_string())
    }
}
