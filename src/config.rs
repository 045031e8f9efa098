// ============================================================================
// Configuration
// ============================================================================
// Paramètres de l'application, avec valeurs par défaut
//
// Un seul argument positionnel optionnel : la source des données
// (URL http(s) ou chemin vers un fichier JSON local).
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Endpoint par défaut du backend de données
pub const DEFAULT_SOURCE: &str = "http://127.0.0.1:5000/api/data";

/// Configuration du dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// URL ou chemin de fichier de la source de données
    pub source: String,

    /// Répertoire des fichiers de logs
    pub log_dir: PathBuf,

    /// Intervalle de poll des événements clavier
    pub tick_rate: Duration,

    /// Timeout des requêtes HTTP
    pub request_timeout: Duration,
}

impl DashboardConfig {
    /// Construit la configuration depuis les arguments (sans le nom du binaire)
    ///
    /// CONCEPT RUST : impl Iterator en paramètre
    /// - Accepte std::env::args().skip(1) comme un Vec en test
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Some(source) = args.next().filter(|s| !s.trim().is_empty()) {
            config.source = source;
        }
        config
    }

    /// Vrai si la source est une URL HTTP(S), sinon c'est un fichier local
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            log_dir: default_log_dir(),
            tick_rate: Duration::from_millis(250),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Répertoire de logs : <data_local_dir>/brentdash/logs, sinon ./logs
///
/// - Linux : ~/.local/share/brentdash/logs
/// - macOS : ~/Library/Application Support/brentdash/logs
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("brentdash").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert!(config.is_remote());
        assert_eq!(config.tick_rate, Duration::from_millis(250));
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_source_override() {
        let config = DashboardConfig::from_args(vec!["data/brent.json".to_string()].into_iter());
        assert_eq!(config.source, "data/brent.json");
        assert!(!config.is_remote());
    }

    #[test]
    fn test_blank_argument_ignored() {
        let config = DashboardConfig::from_args(vec!["  ".to_string()].into_iter());
        assert_eq!(config.source, DEFAULT_SOURCE);
    }
}
