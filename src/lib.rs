// ============================================================================
// BrentDash - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;      // Source de données (HTTP ou fichier JSON)
pub mod app;      // État de l'application
pub mod config;   // Configuration
pub mod error;    // Erreurs typées
pub mod models;   // Structures de données
pub mod pipeline; // Store -> filtre -> série du graphique
pub mod ui;       // Interface utilisateur

pub use error::DashboardError;
