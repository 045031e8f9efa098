// ============================================================================
// Structure : TimeSeries
// ============================================================================
// Séquence ordonnée de DataPoint, dans l'ordre d'arrivée de la source
//
// IMPORTANT : la série n'est PAS supposée triée
// - first/last du résumé sont calculés (min/max chronologique)
// - aucun code ne doit faire de recherche dichotomique dessus
// ============================================================================

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::models::DataPoint;

/// Série temporelle (ordre d'arrivée conservé)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    points: Vec<DataPoint>,
}

/// Résumé statistique d'une série (inspection après chargement)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    /// Nombre de points
    pub count: usize,

    /// Timestamp le plus ancien
    pub first: DateTime<Utc>,

    /// Timestamp le plus récent
    pub last: DateTime<Utc>,

    /// Valeur minimale
    pub min: f64,

    /// Valeur maximale
    pub max: f64,

    /// Moyenne des valeurs
    pub mean: f64,

    /// Nombre de points dont le timestamp apparaît déjà plus tôt dans la série
    pub duplicate_timestamps: usize,
}

impl TimeSeries {
    /// Crée une série vide
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Crée une série à partir de points déjà validés
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Accès en lecture aux points
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    /// Valeur minimale (None si vide)
    ///
    /// CONCEPT RUST : f64::min dans un fold
    /// - Les valeurs sont finies (invariant), pas besoin de partial_cmp
    pub fn min_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::min)
    }

    /// Valeur maximale (None si vide)
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    /// Inspecte la série : taille, bornes, statistiques, doublons
    pub fn summary(&self) -> Result<SeriesSummary, DashboardError> {
        let head = self.points.first().ok_or(DashboardError::EmptySeries)?;

        let mut first = head.timestamp;
        let mut last = head.timestamp;
        let mut min = head.value;
        let mut max = head.value;
        let mut sum = 0.0;
        let mut seen = HashSet::with_capacity(self.points.len());
        let mut duplicate_timestamps = 0;

        for point in &self.points {
            first = first.min(point.timestamp);
            last = last.max(point.timestamp);
            min = min.min(point.value);
            max = max.max(point.value);
            sum += point.value;

            // insert() retourne false si la clé était déjà présente
            if !seen.insert(point.timestamp_millis()) {
                duplicate_timestamps += 1;
            }
        }

        Ok(SeriesSummary {
            count: self.points.len(),
            first,
            last,
            min,
            max,
            mean: sum / self.points.len() as f64,
            duplicate_timestamps,
        })
    }
}

// CONCEPT RUST : IntoIterator pour &TimeSeries
// - Permet d'écrire `for point in &series { ... }`
impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<DataPoint> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
