// ============================================================================
// BrentDash - Dashboard du prix du Brent
// ============================================================================
// Programme TUI : graphique ligne du prix, bornable par date de début/fin
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Worker thread : le fetch async tourne sur son propre runtime tokio
// 4. Channels : le résultat du fetch revient à l'event loop, seul
//    propriétaire de App (pas de Mutex)
// ============================================================================

use std::io;
use std::sync::mpsc;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use brentdash::api::fetch_source;
use brentdash::app::{App, RangeField};
use brentdash::config::DashboardConfig;
use brentdash::models::RawPricePoint;
use brentdash::ui::{events::EventHandler, render, Event};
use brentdash::DashboardError;

// ============================================================================
// Commandes et résultats du worker thread
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Récupérer la série depuis la source configurée
    FetchSeries,
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Fin d'un fetch (succès ou erreur, appliqué tel quel par App)
    SeriesFetched(Result<Vec<RawPricePoint>, DashboardError>),
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/brentdash/logs/brentdash.log.*
/// RUST_LOG=brentdash=trace cargo run
/// ```
fn init_logging(config: &DashboardConfig) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = &config.log_dir;
    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "brentdash.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Distingue UI et worker
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brentdash=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = DashboardConfig::from_args(std::env::args().skip(1));

    // Si le logging échoue, on continue sans
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(source = %config.source, "BrentDash starting up");

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(config.clone(), command_rx, result_tx);

    let mut app = App::new(config.source.clone());

    // Premier fetch : le graphique reste vide jusqu'au résultat
    app.start_loading();
    command_tx
        .send(AppCommand::FetchSeries)
        .context("Worker thread indisponible")?;

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new(config.tick_rate);

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Thread + runtime async dédié
// - Reçoit des AppCommand, renvoie des AppResult
// - Ne touche jamais à App : un seul propriétaire (l'event loop)
// ============================================================================

fn spawn_background_worker(
    config: DashboardConfig,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = %e, "Failed to create tokio runtime");
                let _ = result_tx.send(AppResult::SeriesFetched(Err(DashboardError::Fetch(
                    format!("runtime async indisponible : {}", e),
                ))));
                return;
            }
        };

        // CONCEPT : Command processing loop
        // - recv() bloque jusqu'à la prochaine commande
        // - Err : le channel est fermé (l'UI a quitté)
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");
            match command {
                AppCommand::FetchSeries => {
                    let result = runtime.block_on(fetch_source(&config));
                    if result_tx.send(AppResult::SeriesFetched(result)).is_err() {
                        break;
                    }
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Résultats du worker
//   1. Render
//   2. Input
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    while app.is_running() {
        // CONCEPT : Non-blocking receive avec try_recv
        match result_rx.try_recv() {
            Ok(AppResult::SeriesFetched(result)) => app.apply_fetch(result),
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                if app.is_loading {
                    error!("Worker thread disconnected!");
                    app.apply_fetch(Err(DashboardError::Fetch("worker arrêté".to_string())));
                }
            }
        }

        terminal.draw(|frame| render(frame, &*app))?;

        match events.next() {
            Ok(event) => handle_event(app, event, command_tx),
            Err(e) => debug!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
fn handle_event(app: &mut App, event: Event, command_tx: &mpsc::Sender<AppCommand>) {
    use brentdash::ui::events::{
        get_date_char_from_event, is_backspace_event, is_clear_event, is_edit_end_event,
        is_edit_start_event, is_enter_event, is_escape_event, is_quit_event, is_refresh_event,
    };

    // ========================================
    // Input Mode : la saisie capture toutes les touches
    // ========================================
    if app.is_in_input_mode() {
        if is_escape_event(&event) {
            debug!("User cancelled date input");
            app.cancel_input();
        } else if is_enter_event(&event) {
            if app.submit_input() {
                info!(selection = ?app.selection(), "User updated range");
            }
        } else if is_backspace_event(&event) {
            app.backspace();
        } else if let Some(c) = get_date_char_from_event(&event) {
            app.append_char(c);
        }
        return;
    }

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_edit_start_event(&event) => {
            app.cancel_quit();
            app.start_input(RangeField::Start);
        }

        Event::Key(_) if is_edit_end_event(&event) => {
            app.cancel_quit();
            app.start_input(RangeField::End);
        }

        Event::Key(_) if is_clear_event(&event) => {
            app.cancel_quit();
            app.clear_range();
        }

        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            if app.is_loading {
                debug!("Fetch already in progress, ignoring refresh");
            } else {
                info!("User requested refresh");
                app.start_loading();
                if command_tx.send(AppCommand::FetchSeries).is_err() {
                    app.apply_fetch(Err(DashboardError::Fetch("worker arrêté".to_string())));
                }
            }
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation de quit
            app.cancel_quit();
        }

        Event::Tick => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
