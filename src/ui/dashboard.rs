// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI : header (plage + stats), graphique, footer
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. Style : couleurs et attributs de texte
// ============================================================================

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Screen, StatusLevel};
use crate::pipeline::format_label;
use crate::ui::chart;

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    chart::render_chart(frame, app.chart(), chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header : plage + stats
            Constraint::Min(0),    // Graphique
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Texte d'une borne : date ou "—" si absente
fn bound_text(bound: Option<DateTime<Utc>>) -> String {
    bound.map(|ts| format_label(&ts)).unwrap_or_else(|| "—".to_string())
}

/// Description de la plage, avec la politique "les deux bornes ou rien"
pub fn range_description(app: &App) -> String {
    let selection = app.selection();
    let state = if selection.bounds().is_some() {
        "filtre actif"
    } else {
        "sans filtre"
    };
    format!(
        "Début : {}   Fin : {}   ({})",
        bound_text(selection.start),
        bound_text(selection.end),
        state
    )
}

/// Dessine le header : source, plage et statistiques de la série affichée
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Brent Oil Price Dashboard ")
        .title_alignment(Alignment::Center);

    let stats = match app.filtered_summary() {
        Some(summary) => format!(
            "{} / {} points   min ${:.2}   max ${:.2}   moy ${:.2}",
            summary.count,
            app.series().len(),
            summary.min,
            summary.max,
            summary.mean
        ),
        None => format!("0 / {} points", app.series().len()),
    };

    let text = vec![
        Line::from(vec![
            Span::styled(range_description(app), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(stats, Style::default().fg(Color::Gray)),
            Span::raw("   "),
            Span::styled(app.source.as_str(), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le footer : saisie, confirmation de quit, statut ou aide
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let line = match app.current_screen {
        Screen::InputMode(field) => Line::from(vec![
            Span::styled(field.prompt(), key_style),
            Span::raw(app.input_buffer.as_str()),
            Span::styled("█", Style::default().fg(Color::White)),
            Span::styled("   [Enter] Valider (vide = effacer)  [ESC] Annuler", Style::default().fg(Color::Gray)),
        ]),
        Screen::Chart if app.is_awaiting_quit_confirmation() => Line::from(Span::styled(
            "Appuyez encore sur [q] pour quitter",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Screen::Chart => {
            let mut spans = vec![
                Span::styled("[s]", key_style),
                Span::raw(" Début  "),
                Span::styled("[e]", key_style),
                Span::raw(" Fin  "),
                Span::styled("[c]", key_style),
                Span::raw(" Effacer  "),
                Span::styled("[r]", key_style),
                Span::raw(" Recharger  "),
                Span::styled("[q]", key_style),
                Span::raw(" Quitter"),
            ];
            if let Some(status) = &app.status {
                let color = match status.level {
                    StatusLevel::Info => Color::Green,
                    StatusLevel::Warning => Color::Yellow,
                    StatusLevel::Error => Color::Red,
                };
                spans.push(Span::raw("   "));
                spans.push(Span::styled(status.text.as_str(), Style::default().fg(color)));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_range_description() {
        let mut app = App::new("test");
        assert_eq!(range_description(&app), "Début : —   Fin : —   (sans filtre)");

        app.set_start(Some(Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap()));
        assert_eq!(range_description(&app), "Début : 1/2/2023   Fin : —   (sans filtre)");

        app.set_end(Some(Utc.with_ymd_and_hms(2023, 1, 8, 0, 0, 0).unwrap()));
        assert_eq!(range_description(&app), "Début : 1/2/2023   Fin : 1/8/2023   (filtre actif)");
    }
}
