// ============================================================================
// Structure : ChartSeries
// ============================================================================
// Série prête pour le graphique : labels texte + valeurs, alignés par index
//
// Toujours dérivée (jamais stockée de manière persistante) :
// voir pipeline::adapter::to_chart_series
// ============================================================================

/// Métadonnées de présentation de la série (constantes, non dérivées)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    /// Nom affiché dans la légende
    pub name: &'static str,

    /// Couleur de la ligne (r, g, b)
    pub line_rgb: (u8, u8, u8),

    /// Remplissage sous la courbe
    pub fill: bool,
}

/// Style de la courbe du prix du Brent
pub const BRENT_STYLE: SeriesStyle = SeriesStyle {
    name: "Brent Oil Price",
    line_rgb: (75, 192, 192),
    fill: false,
};

/// Labels et valeurs positionnellement alignés : labels[i] <-> values[i]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Points (x, y) pour ratatui : x = position dans la série
    ///
    /// CONCEPT RUST : Iterator chaining
    /// - enumerate() donne l'index, map() construit le tuple
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    /// Bornes (min, max) des valeurs
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let first = *self.values.first()?;
        Some(
            self.values
                .iter()
                .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }
}
