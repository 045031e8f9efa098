// ============================================================================
// Structure : RangeSelection
// ============================================================================
// Bornes début/fin choisies par l'utilisateur, chacune optionnelle
//
// CONCEPT RUST : Option<T> plutôt qu'une valeur sentinelle
// - None : pas de borne
// - Some(ts) : borne posée (même si ts == epoch 0)
// Aucune validation start <= end : une plage inversée est un état légal.
// ============================================================================

use chrono::{DateTime, Utc};

/// Plage de dates sélectionnée
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeSelection {
    /// Borne de début (incluse)
    pub start: Option<DateTime<Utc>>,

    /// Borne de fin (incluse)
    pub end: Option<DateTime<Utc>>,
}

impl RangeSelection {
    /// Sélection vide (aucune borne)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, start: Option<DateTime<Utc>>) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Option<DateTime<Utc>>) {
        self.end = end;
    }

    /// Efface les deux bornes (action explicite de l'utilisateur)
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Retourne (start, end) uniquement si les DEUX bornes sont posées
    ///
    /// CONCEPT RUST : Pattern matching sur un tuple d'Option
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Vrai si les deux bornes sont posées et que end < start
    pub fn is_inverted(&self) -> bool {
        self.bounds().is_some_and(|(start, end)| end < start)
    }
}
