// ============================================================================
// Structure : TimeSeriesStore
// ============================================================================
// Détient la série complète issue du dernier fetch réussi
//
// CONCEPTS RUST :
// 1. Tout-ou-rien : la nouvelle série est construite à part, puis swappée
// 2. Result + ? : la première erreur interrompt le chargement
// 3. &mut self : seul le propriétaire (App) peut recharger
// ============================================================================

use tracing::{debug, info, warn};

use crate::error::DashboardError;
use crate::models::{parse_date, DataPoint, RawPricePoint, TimeSeries};

/// Store de la série temporelle (remplacée en bloc à chaque chargement)
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesStore {
    series: TimeSeries,
    loaded: bool,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Série actuellement détenue (vide avant le premier chargement)
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Vrai après au moins un chargement réussi
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Charge un lot brut et remplace la série existante
    ///
    /// Si un seul enregistrement est invalide (date non parsable, prix non
    /// fini), le lot entier est rejeté et la série précédente reste en place.
    pub fn load(&mut self, raw: &[RawPricePoint]) -> Result<&TimeSeries, DashboardError> {
        debug!(records = raw.len(), "Loading raw price records");

        let series = build_series(raw).map_err(|e| {
            warn!(error = %e, "Rejected price batch, keeping previous series");
            e
        })?;

        match series.summary() {
            Ok(summary) => {
                info!(
                    points = summary.count,
                    first = %summary.first.date_naive(),
                    last = %summary.last.date_naive(),
                    min = summary.min,
                    max = summary.max,
                    mean = summary.mean,
                    "Time series loaded"
                );
                if summary.duplicate_timestamps > 0 {
                    warn!(duplicates = summary.duplicate_timestamps, "Duplicate timestamps in series");
                }
            }
            Err(_) => info!("Time series loaded (empty)"),
        }

        // CONCEPT RUST : Ownership
        // - L'ancienne série est drop ici, la nouvelle prend sa place
        self.series = series;
        self.loaded = true;
        Ok(&self.series)
    }
}

/// Valide chaque enregistrement et construit la série dans l'ordre d'arrivée
///
/// CONCEPT RUST : collect() sur des Result
/// - Iterator<Item = Result<T, E>> -> Result<Vec<T>, E>
/// - S'arrête à la première erreur
fn build_series(raw: &[RawPricePoint]) -> Result<TimeSeries, DashboardError> {
    raw.iter()
        .enumerate()
        .map(|(index, record)| {
            let timestamp = parse_date(&record.date).ok_or_else(|| DashboardError::MalformedDate {
                index,
                value: record.date.clone(),
            })?;

            if !record.price.is_finite() {
                return Err(DashboardError::InvalidPrice {
                    index,
                    value: record.price,
                });
            }

            Ok(DataPoint::new(timestamp, record.price))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RawPricePoint> {
        vec![
            RawPricePoint::new("2023-01-01", 80.0),
            RawPricePoint::new("2023-01-05", 82.0),
            RawPricePoint::new("2023-01-10", 79.0),
        ]
    }

    #[test]
    fn test_load_keeps_arrival_order() {
        let mut store = TimeSeriesStore::new();
        let raw = vec![
            RawPricePoint::new("2023-01-10", 79.0),
            RawPricePoint::new("2023-01-01", 80.0),
        ];
        let series = store.load(&raw).unwrap();
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![79.0, 80.0]);
        assert!(store.is_loaded());
    }

    #[test]
    fn test_load_replaces_wholesale() {
        let mut store = TimeSeriesStore::new();
        store.load(&sample()).unwrap();
        assert_eq!(store.series().len(), 3);

        store.load(&[RawPricePoint::new("2024-06-01", 90.0)]).unwrap();
        assert_eq!(store.series().len(), 1);
        assert_eq!(store.series().points()[0].value, 90.0);
    }

    #[test]
    fn test_malformed_date_rejects_batch() {
        let mut store = TimeSeriesStore::new();
        store.load(&sample()).unwrap();

        let err = store
            .load(&[RawPricePoint::new("not-a-date", 10.0)])
            .unwrap_err();
        assert_eq!(
            err,
            DashboardError::MalformedDate {
                index: 0,
                value: "not-a-date".to_string()
            }
        );

        // La série précédente est conservée
        assert_eq!(store.series().len(), 3);
    }

    #[test]
    fn test_bad_record_in_middle_reports_index() {
        let mut store = TimeSeriesStore::new();
        let mut raw = sample();
        raw.insert(1, RawPricePoint::new("2023-13-45", 81.0));

        let err = store.load(&raw).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedDate { index: 1, .. }));
        assert!(store.series().is_empty());
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_non_finite_price_rejects_batch() {
        let mut store = TimeSeriesStore::new();
        let raw = vec![
            RawPricePoint::new("2023-01-01", 80.0),
            RawPricePoint::new("2023-01-02", f64::NAN),
        ];
        let err = store.load(&raw).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidPrice { index: 1, .. }));
    }

    #[test]
    fn test_load_empty_batch() {
        let mut store = TimeSeriesStore::new();
        store.load(&sample()).unwrap();
        let series = store.load(&[]).unwrap();
        assert!(series.is_empty());
    }
}
