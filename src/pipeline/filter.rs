// ============================================================================
// RangeFilter
// ============================================================================
// Fonction pure : (TimeSeries, RangeSelection) -> TimeSeries filtrée
//
// Politique "les deux bornes ou rien" :
// - start ET end posés : garde start <= timestamp <= end (bornes incluses)
// - une seule borne (ou aucune) : série complète, sans filtre
// - end < start : prédicat insatisfiable, résultat vide (pas une erreur)
//
// L'ordre d'entrée est conservé, aucun tri, aucune déduplication.
// ============================================================================

use crate::models::{RangeSelection, TimeSeries};

/// Applique la sélection de plage à la série
pub fn apply(series: &TimeSeries, selection: &RangeSelection) -> TimeSeries {
    match selection.bounds() {
        Some((start, end)) => series
            .iter()
            .filter(|p| start <= p.timestamp && p.timestamp <= end)
            .copied()
            .collect(),
        None => series.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::models::DataPoint;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap()
    }

    fn series(days: &[(u32, f64)]) -> TimeSeries {
        days.iter().map(|&(d, v)| DataPoint::new(day(d), v)).collect()
    }

    fn selection(start: Option<u32>, end: Option<u32>) -> RangeSelection {
        RangeSelection {
            start: start.map(day),
            end: end.map(day),
        }
    }

    /// Quelques séries de test, dont une non triée et une avec doublons
    fn fixtures() -> Vec<TimeSeries> {
        vec![
            TimeSeries::new(),
            series(&[(1, 80.0), (5, 82.0), (10, 79.0)]),
            series(&[(10, 79.0), (1, 80.0), (5, 82.0), (3, 81.0)]),
            series(&[(4, 1.0), (4, 2.0), (4, 3.0), (9, 4.0)]),
        ]
    }

    #[test]
    fn test_no_bounds_is_identity() {
        for s in fixtures() {
            assert_eq!(apply(&s, &RangeSelection::new()), s);
        }
    }

    #[test]
    fn test_single_bound_is_unfiltered() {
        for s in fixtures() {
            assert_eq!(apply(&s, &selection(Some(2), None)), s);
            assert_eq!(apply(&s, &selection(None, Some(8))), s);
        }
    }

    #[test]
    fn test_inverted_bounds_give_empty() {
        for s in fixtures() {
            assert!(apply(&s, &selection(Some(8), Some(2))).is_empty());
        }
    }

    #[test]
    fn test_bounded_result_is_exact_and_ordered() {
        for s in fixtures() {
            for (start, end) in [(1, 10), (2, 8), (4, 4), (3, 5), (11, 20)] {
                let sel = selection(Some(start), Some(end));
                let result = apply(&s, &sel);

                // Ce qu'on attend : le sous-ensemble exact, dans l'ordre d'origine
                let expected: Vec<DataPoint> = s
                    .iter()
                    .filter(|p| p.timestamp >= day(start) && p.timestamp <= day(end))
                    .copied()
                    .collect();

                assert_eq!(result.points(), expected.as_slice());
                assert!(result
                    .iter()
                    .all(|p| day(start) <= p.timestamp && p.timestamp <= day(end)));
            }
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let s = series(&[(1, 80.0), (5, 82.0), (10, 79.0)]);
        let result = apply(&s, &selection(Some(1), Some(10)));
        assert_eq!(result.len(), 3);

        let sel = RangeSelection {
            start: Some(day(1) + Duration::milliseconds(1)),
            end: Some(day(10) - Duration::milliseconds(1)),
        };
        assert_eq!(apply(&s, &sel).len(), 1);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let s = series(&[(4, 1.0), (4, 2.0), (4, 3.0), (9, 4.0)]);
        let result = apply(&s, &selection(Some(4), Some(4)));
        let values: Vec<f64> = result.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_concrete_scenario() {
        let s = series(&[(1, 80.0), (5, 82.0), (10, 79.0)]);
        let result = apply(&s, &selection(Some(2), Some(8)));
        assert_eq!(result.points(), &[DataPoint::new(day(5), 82.0)]);

        let result = apply(&s, &selection(None, Some(8)));
        assert_eq!(result.len(), 3);
    }
}
