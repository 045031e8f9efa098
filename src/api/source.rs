// ============================================================================
// DataSource : historique des prix
// ============================================================================
// Récupère le tableau JSON [{ "date": "...", "price": 80.0 }, ...]
//
// CONCEPTS RUST :
// 1. async/await : le fetch tourne dans le worker thread (voir main.rs)
// 2. Result<T, DashboardError> : erreurs typées, pas de retry
// 3. Serde : désérialisation directe vers Vec<RawPricePoint>
// ============================================================================

use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info, instrument};

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::RawPricePoint;

/// Récupère les enregistrements depuis la source configurée (HTTP ou fichier)
pub async fn fetch_source(config: &DashboardConfig) -> Result<Vec<RawPricePoint>, DashboardError> {
    if config.is_remote() {
        fetch_price_history(&config.source, config.request_timeout).await
    } else {
        load_price_file(&config.source).await
    }
}

/// GET HTTP sur l'endpoint de données
///
/// CONCEPT RUST : #[instrument]
/// - Ajoute un span avec l'URL à tous les logs de la fonction
#[instrument(skip(timeout))]
pub async fn fetch_price_history(
    url: &str,
    timeout: Duration,
) -> Result<Vec<RawPricePoint>, DashboardError> {
    debug!("Creating HTTP client");
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()?;

    debug!("Sending HTTP request");
    let response = client.get(url).send().await?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    // Vérifie que la réponse est un succès HTTP (200-299)
    if !status.is_success() {
        error!(status = %status, "Data source returned error status");
        return Err(DashboardError::Fetch(format!("HTTP {}", status)));
    }

    let records: Vec<RawPricePoint> = response.json().await?;

    info!(records = records.len(), "Fetched price history");
    Ok(records)
}

/// Lit le même format JSON depuis un fichier local
#[instrument(skip(path), fields(file = %path.as_ref().display()))]
pub async fn load_price_file(path: impl AsRef<Path>) -> Result<Vec<RawPricePoint>, DashboardError> {
    let path = path.as_ref();

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DashboardError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let records: Vec<RawPricePoint> = serde_json::from_str(&content)
        .map_err(|e| DashboardError::Fetch(format!("JSON invalide : {}", e)))?;

    info!(records = records.len(), "Loaded price file");
    Ok(records)
}

// ============================================================================
// Tests unitaires
// ============================================================================
