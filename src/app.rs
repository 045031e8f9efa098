// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global du dashboard
//
// CONCEPTS RUST :
// 1. State Management : un seul propriétaire pour le store et la sélection
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Dérivation explicite : la série filtrée et la série du graphique sont
//    recalculées dans les setters, jamais ailleurs
//
// PATTERN : "Application State"
// - L'UI lit depuis App
// - Toutes les modifications passent par les méthodes de App
// - recompute() est appelé après chaque changement du store ou de la sélection
// ============================================================================

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::error::DashboardError;
use crate::models::{parse_date, ChartSeries, RangeSelection, RawPricePoint, SeriesSummary, TimeSeries};
use crate::pipeline::{self, TimeSeriesStore};

// ============================================================================
// Enums : écran et champ de date
// ============================================================================

/// Borne de la plage en cours d'édition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Start,
    End,
}

impl RangeField {
    /// Prompt affiché en mode saisie
    pub fn prompt(&self) -> &'static str {
        match self {
            RangeField::Start => "Date de début : ",
            RangeField::End => "Date de fin : ",
        }
    }
}

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : graphique + plage
    Chart,

    /// Saisie d'une borne (Enter valide, ESC annule)
    InputMode(RangeField),
}

/// Niveau du message de statut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Message affiché dans le footer (diagnostic hors graphique)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Avertissement affiché tant que end < start
const INVERTED_RANGE_MESSAGE: &str = "La date de fin précède la date de début : aucun point";

/// État principal du dashboard
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Two-step quit : première pression de 'q' -> confirmation
    pub confirm_quit: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Buffer de saisie pour le mode Input
    pub input_buffer: String,

    /// Fetch en cours (worker thread)
    pub is_loading: bool,

    /// Dernier message de statut
    pub status: Option<StatusMessage>,

    /// Source affichée dans le header (URL ou fichier)
    pub source: String,

    store: TimeSeriesStore,
    selection: RangeSelection,

    // Dérivés : jamais modifiés directement
    filtered: TimeSeries,
    chart: ChartSeries,
}

impl App {
    /// Crée une instance avec un store vide et aucune borne
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            running: true,
            confirm_quit: false,
            current_screen: Screen::Chart,
            input_buffer: String::new(),
            is_loading: false,
            status: None,
            source: source.into(),
            store: TimeSeriesStore::new(),
            selection: RangeSelection::new(),
            filtered: TimeSeries::new(),
            chart: ChartSeries::new(),
        }
    }

    // ========================================================================
    // Accès en lecture
    // ========================================================================

    /// Série complète du dernier chargement réussi
    pub fn series(&self) -> &TimeSeries {
        self.store.series()
    }

    pub fn selection(&self) -> &RangeSelection {
        &self.selection
    }

    /// Série après application de la plage
    pub fn filtered(&self) -> &TimeSeries {
        &self.filtered
    }

    /// Série prête pour le graphique
    pub fn chart(&self) -> &ChartSeries {
        &self.chart
    }

    /// Résumé de la série filtrée (None si vide)
    pub fn filtered_summary(&self) -> Option<SeriesSummary> {
        self.filtered.summary().ok()
    }

    // ========================================================================
    // Entrées qui déclenchent un recalcul
    // ========================================================================

    /// Setter de la borne de début (None efface la borne)
    pub fn set_start(&mut self, start: Option<DateTime<Utc>>) {
        debug!(?start, "Range start changed");
        self.selection.set_start(start);
        self.recompute();
    }

    /// Setter de la borne de fin (None efface la borne)
    pub fn set_end(&mut self, end: Option<DateTime<Utc>>) {
        debug!(?end, "Range end changed");
        self.selection.set_end(end);
        self.recompute();
    }

    /// Efface les deux bornes
    pub fn clear_range(&mut self) {
        info!("Range cleared");
        self.selection.clear();
        self.recompute();
    }

    /// Applique le résultat d'un fetch (succès ou erreur)
    ///
    /// - Ok : chargement tout-ou-rien dans le store
    /// - Err : diagnostic, la série précédente reste affichée
    pub fn apply_fetch(&mut self, result: Result<Vec<RawPricePoint>, DashboardError>) {
        self.stop_loading();

        let records = match result {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Fetch failed");
                self.status = Some(StatusMessage::new(StatusLevel::Error, e.to_string()));
                return;
            }
        };

        match self.store.load(&records) {
            Ok(series) => {
                let count = series.len();
                self.status = Some(StatusMessage::new(
                    StatusLevel::Info,
                    format!("{} points chargés", count),
                ));
            }
            Err(e) => {
                // Le store n'a pas changé : rien à recalculer
                error!(error = %e, "Rejected price batch");
                self.status = Some(StatusMessage::new(StatusLevel::Error, e.to_string()));
                return;
            }
        }

        self.recompute();
    }

    /// Recalcule la série filtrée puis la série du graphique
    ///
    /// Idempotent : ne dépend que du store et de la sélection courants.
    fn recompute(&mut self) {
        self.filtered = pipeline::apply(self.store.series(), &self.selection);
        self.chart = pipeline::to_chart_series(&self.filtered);

        debug!(
            total = self.store.series().len(),
            filtered = self.filtered.len(),
            "Recomputed chart series"
        );

        if self.selection.is_inverted() {
            warn!("Range end is before range start");
            self.status = Some(StatusMessage::new(
                StatusLevel::Warning,
                INVERTED_RANGE_MESSAGE,
            ));
        } else if self.status.as_ref().is_some_and(|s| s.text == INVERTED_RANGE_MESSAGE) {
            // La plage n'est plus inversée : l'avertissement est périmé
            self.status = None;
        }
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Démarre l'indicateur de chargement
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.status = Some(StatusMessage::new(
            StatusLevel::Info,
            format!("Chargement depuis {}...", self.source),
        ));
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode saisie pour une borne, pré-rempli avec la valeur actuelle
    pub fn start_input(&mut self, field: RangeField) {
        let current = match field {
            RangeField::Start => self.selection.start,
            RangeField::End => self.selection.end,
        };
        self.input_buffer = current
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        self.current_screen = Screen::InputMode(field);
    }

    /// Annule la saisie et retourne au graphique
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Chart;
        self.input_buffer.clear();
    }

    /// Valide la saisie : buffer vide -> borne effacée, date invalide -> erreur
    ///
    /// Retourne true si la borne a été mise à jour.
    pub fn submit_input(&mut self) -> bool {
        let field = match self.current_screen {
            Screen::InputMode(field) => field,
            Screen::Chart => return false,
        };

        let text = std::mem::take(&mut self.input_buffer);
        self.current_screen = Screen::Chart;

        let value = if text.trim().is_empty() {
            None
        } else {
            match parse_date(&text) {
                Some(ts) => Some(ts),
                None => {
                    warn!(input = %text, "Invalid date typed by user");
                    self.status = Some(StatusMessage::new(
                        StatusLevel::Error,
                        format!("Date invalide : {}", text.trim()),
                    ));
                    return false;
                }
            }
        };

        self.status = None;
        match field {
            RangeField::Start => self.set_start(value),
            RangeField::End => self.set_end(value),
        }
        true
    }

    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn is_in_input_mode(&self) -> bool {
        matches!(self.current_screen, Screen::InputMode(_))
    }

    pub fn is_on_chart(&self) -> bool {
        self.current_screen == Screen::Chart
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap()
    }

    fn sample() -> Vec<RawPricePoint> {
        vec![
            RawPricePoint::new("2023-01-01", 80.0),
            RawPricePoint::new("2023-01-05", 82.0),
            RawPricePoint::new("2023-01-10", 79.0),
        ]
    }

    fn loaded_app() -> App {
        let mut app = App::new("test");
        app.apply_fetch(Ok(sample()));
        app
    }

    #[test]
    fn test_app_creation() {
        let app = App::new("http://localhost/api/data");
        assert!(app.is_running());
        assert!(app.chart().is_empty());
        assert_eq!(app.selection(), &RangeSelection::new());
    }

    #[test]
    fn test_fetch_populates_unfiltered_chart() {
        let app = loaded_app();
        assert_eq!(app.filtered().len(), 3);
        assert_eq!(app.chart().labels, vec!["1/1/2023", "1/5/2023", "1/10/2023"]);
        assert_eq!(app.chart().values, vec![80.0, 82.0, 79.0]);
    }

    #[test]
    fn test_bounded_range_scenario() {
        let mut app = loaded_app();
        app.set_start(Some(day(2)));
        // Une seule borne : pas de filtre
        assert_eq!(app.chart().len(), 3);

        app.set_end(Some(day(8)));
        assert_eq!(app.filtered().points()[0].timestamp, day(5));
        assert_eq!(app.chart().labels, vec!["1/5/2023".to_string()]);
        assert_eq!(app.chart().values, vec![82.0]);
    }

    #[test]
    fn test_end_only_scenario() {
        let mut app = loaded_app();
        app.set_end(Some(day(8)));
        assert_eq!(app.filtered(), app.series());
    }

    #[test]
    fn test_inverted_range_is_empty_with_warning() {
        let mut app = loaded_app();
        app.set_start(Some(day(8)));
        app.set_end(Some(day(2)));
        assert!(app.chart().is_empty());
        assert_eq!(app.status.as_ref().map(|s| s.level), Some(StatusLevel::Warning));
    }

    #[test]
    fn test_inverted_warning_cleared_when_range_fixed() {
        let mut app = App::new("test");
        app.apply_fetch(Ok(vec![RawPricePoint::new("2023-01-05", 82.0)]));
        app.set_start(Some(day(8)));
        app.set_end(Some(day(2)));
        assert_eq!(app.status.as_ref().map(|s| s.level), Some(StatusLevel::Warning));

        app.clear_range();
        assert_eq!(app.chart().len(), 1);
        assert_eq!(app.status, None);

        // Même chose en corrigeant une seule borne
        app.set_start(Some(day(8)));
        app.set_end(Some(day(2)));
        app.set_end(Some(day(10)));
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_other_status_survives_recompute() {
        let mut app = loaded_app();
        app.set_start(Some(day(2)));
        assert_eq!(app.status.as_ref().map(|s| s.level), Some(StatusLevel::Info));
    }

    #[test]
    fn test_clear_range_restores_full_series() {
        let mut app = loaded_app();
        app.set_start(Some(day(2)));
        app.set_end(Some(day(8)));
        app.clear_range();
        assert_eq!(app.chart().len(), 3);
    }

    #[test]
    fn test_malformed_batch_keeps_previous_series() {
        let mut app = loaded_app();
        app.set_start(Some(day(2)));
        app.set_end(Some(day(8)));

        app.apply_fetch(Ok(vec![RawPricePoint::new("not-a-date", 10.0)]));
        assert_eq!(app.series().len(), 3);
        assert_eq!(app.chart().values, vec![82.0]);
        assert_eq!(app.status.as_ref().map(|s| s.level), Some(StatusLevel::Error));
    }

    #[test]
    fn test_fetch_error_before_first_load_gives_empty_chart() {
        let mut app = App::new("test");
        app.start_loading();
        app.apply_fetch(Err(DashboardError::Fetch("connection refused".to_string())));
        assert!(!app.is_loading);
        assert!(app.chart().is_empty());
        assert_eq!(app.status.as_ref().map(|s| s.level), Some(StatusLevel::Error));
    }

    #[test]
    fn test_refetch_reapplies_current_selection() {
        let mut app = loaded_app();
        app.set_start(Some(day(2)));
        app.set_end(Some(day(8)));

        app.apply_fetch(Ok(vec![
            RawPricePoint::new("2023-01-03", 90.0),
            RawPricePoint::new("2023-01-04", 91.0),
            RawPricePoint::new("2023-01-09", 92.0),
        ]));
        assert_eq!(app.chart().values, vec![90.0, 91.0]);
    }

    #[test]
    fn test_input_mode_sets_bound() {
        let mut app = loaded_app();
        app.start_input(RangeField::Start);
        assert!(app.is_in_input_mode());
        for c in "2023-01-02".chars() {
            app.append_char(c);
        }
        assert!(app.submit_input());
        assert!(app.is_on_chart());
        assert_eq!(app.selection().start, Some(day(2)));
    }

    #[test]
    fn test_input_mode_prefills_and_clears() {
        let mut app = loaded_app();
        app.set_end(Some(day(8)));
        app.start_input(RangeField::End);
        assert_eq!(app.input_buffer, "2023-01-08");

        app.input_buffer.clear();
        assert!(app.submit_input());
        assert_eq!(app.selection().end, None);
    }

    #[test]
    fn test_input_mode_rejects_invalid_date() {
        let mut app = loaded_app();
        app.start_input(RangeField::Start);
        app.input_buffer = "32/13/2023".to_string();
        assert!(!app.submit_input());
        assert_eq!(app.selection().start, None);
        assert_eq!(app.status.as_ref().map(|s| s.level), Some(StatusLevel::Error));
    }

    #[test]
    fn test_cancel_input() {
        let mut app = loaded_app();
        app.start_input(RangeField::End);
        app.append_char('2');
        app.backspace();
        app.append_char('x');
        app.cancel_input();
        assert!(app.is_on_chart());
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.selection().end, None);
    }

    #[test]
    fn test_filtered_summary() {
        let app = loaded_app();
        let summary = app.filtered_summary().unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.max, 82.0);
        assert!(App::new("empty").filtered_summary().is_none());
    }
}
