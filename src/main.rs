// ============================================================================
// Coinboard - Dashboard crypto dans le terminal
// ============================================================================
// Polle l'API CoinGecko toutes les 60 secondes, dérive les cartes agrégées
// et le tableau filtrable, et persiste les favoris localement.
//
// Architecture : l'event loop TUI reste synchrone ; un worker thread possède
// son propre runtime tokio et exécute les fetchs. Les deux communiquent via
// des channels mpsc (commandes dans un sens, résultats dans l'autre).
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use coinboard::api::{fetch_market_batch, fetch_sentiment, mock_batch, MarketError, Sentiment};
use coinboard::app::App;
use coinboard::models::{CoinRecord, Currency};
use coinboard::storage::Watchlist;
use coinboard::ui::{events::EventHandler, render};

// ============================================================================
// Commandes et résultats du worker
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Recharger le batch marché dans la devise donnée
    RefreshMarket { currency: Currency },

    /// Récupérer l'indicateur de sentiment (best-effort)
    FetchSentiment,
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Batch marché chargé avec succès
    BatchLoaded {
        currency: Currency,
        coins: Vec<CoinRecord>,
    },

    /// Échec du fetch marché (la politique de repli est décidée côté UI,
    /// qui sait si un batch a déjà été chargé)
    BatchFailed {
        currency: Currency,
        error: MarketError,
    },

    /// Sentiment récupéré (les échecs sont absorbés dans le worker)
    SentimentLoaded { sentiment: Sentiment },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent plus une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne.
// ============================================================================

/// Initialise le logging vers fichier
///
/// Logs sous <data_dir>/coinboard/logs/ (repli sur ./logs). Niveau contrôlé
/// par RUST_LOG (défaut : debug pour coinboard, info pour les dépendances).
///
/// ```bash
/// tail -f ~/.local/share/coinboard/logs/coinboard.log
/// RUST_LOG=coinboard=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_dir()
        .map(|d| d.join("coinboard").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "coinboard.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coinboard=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée
// ============================================================================

fn main() -> Result<()> {
    // Logging d'abord : si l'init échoue on continue quand même, sans logs
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: logging indisponible : {}", e);
    });

    info!("Coinboard démarre");

    // La watchlist est lue une seule fois ici ; ensuite la copie mémoire
    // fait référence et chaque toggle flushe sur disque
    let watchlist = Watchlist::load();
    info!(favorites = watchlist.len(), "Watchlist chargée");

    let mut terminal = setup_terminal()?;

    let app = Arc::new(Mutex::new(App::new(watchlist)));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Lancement du worker thread");
    spawn_background_worker(command_rx, result_tx);

    // Premier chargement : batch marché + sentiment
    {
        let mut app_lock = app.lock().unwrap();
        app_lock.start_fetch();
        let _ = command_tx.send(AppCommand::RefreshMarket {
            currency: app_lock.currency,
        });
        let _ = command_tx.send(AppCommand::FetchSentiment);
    }

    let events = EventHandler::new();

    info!("Démarrage de l'event loop");
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    debug!("Restauration du terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Sortie normale"),
        Err(e) => error!(error = ?e, "Sortie en erreur"),
    }

    result
}

// ============================================================================
// Background worker
// ============================================================================
// Thread séparé avec son runtime tokio : les fetchs bloquent le worker,
// jamais l'UI.
// ============================================================================

/// Worker thread qui exécute les fetchs API
fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) {
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        loop {
            match command_rx.recv() {
                Ok(command) => {
                    debug!(?command, "Commande reçue par le worker");

                    match command {
                        AppCommand::RefreshMarket { currency } => {
                            let result =
                                runtime.block_on(async { fetch_market_batch(currency).await });

                            match result {
                                Ok(coins) => {
                                    info!(count = coins.len(), "Batch marché chargé");
                                    let _ = result_tx.send(AppResult::BatchLoaded { currency, coins });
                                }
                                Err(e) => {
                                    error!(error = %e, "Échec du fetch marché");
                                    let _ = result_tx.send(AppResult::BatchFailed { currency, error: e });
                                }
                            }
                        }

                        AppCommand::FetchSentiment => {
                            // Best-effort : l'échec est absorbé ici, jamais
                            // remonté à l'utilisateur
                            match runtime.block_on(async { fetch_sentiment().await }) {
                                Ok(sentiment) => {
                                    let _ = result_tx.send(AppResult::SentimentLoaded { sentiment });
                                }
                                Err(e) => {
                                    warn!(error = %e, "Sentiment indisponible, on continue sans");
                                }
                            }
                        }
                    }
                }
                Err(_) => {
                    info!("Worker thread terminé (channel fermé)");
                    break;
                }
            }
        }
    });
}

// ============================================================================
// Event loop principal
// ============================================================================
// Pattern classique : résultats → rendu → input → tick. Le tick décrémente
// le compte à rebours de 60 s et déclenche le refresh auto.
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        {
            let app_lock = app.lock().unwrap();
            if !app_lock.is_running() {
                break;
            }
        }

        // 0. RÉSULTATS : draine tout ce que le worker a produit
        while let Ok(result) = result_rx.try_recv() {
            let mut app_lock = app.lock().unwrap();
            apply_result(&mut app_lock, result);
        }

        // 1. RENDER
        {
            let app_clone = app.clone();
            terminal.draw(|frame| {
                let app_lock = app_clone.lock().unwrap();
                render(frame, &app_lock);
            })?;
        }

        // 2. INPUT
        if let Ok(event) = events.next() {
            let mut app_lock = app.lock().unwrap();
            handle_event(&mut app_lock, event, &command_tx);
        }

        // 3. TICK : rafraîchissement auto toutes les 60 s, sauf si un fetch
        // est déjà en vol (garde de réentrance)
        {
            let mut app_lock = app.lock().unwrap();
            if app_lock.tick() {
                info!("Tick de rafraîchissement auto");
                app_lock.start_fetch();
                let _ = command_tx.send(AppCommand::RefreshMarket {
                    currency: app_lock.currency,
                });
            }
        }
    }

    Ok(())
}

/// Applique un résultat du worker à l'état
///
/// Un résultat taggé d'une devise qui ne correspond plus à la sélection
/// courante est écarté : le batch est remplacé en bloc, le dernier arrivé
/// dans la bonne devise gagne.
fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::BatchLoaded { currency, coins } => {
            if currency != app.currency {
                warn!(
                    got = currency.code(),
                    want = app.currency.code(),
                    "Batch écarté (devise changée entre-temps)"
                );
                return;
            }
            app.apply_batch(coins);
        }

        AppResult::BatchFailed { currency, error } => {
            if currency != app.currency {
                debug!("Échec d'un fetch périmé, ignoré");
                return;
            }

            if app.has_no_data() {
                // Tout premier chargement : batch synthétique + avis
                warn!(error = %error, "Premier fetch en échec, passage en démo");
                app.apply_demo_batch(mock_batch());
            } else {
                // Batch périmé conservé, le cycle est simplement sauté
                warn!(error = %error, "Fetch en échec, batch précédent conservé");
                app.keep_stale_batch();
            }
        }

        AppResult::SentimentLoaded { sentiment } => {
            app.sentiment = Some(sentiment);
        }
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement clavier et met à jour l'état
fn handle_event(app: &mut App, event: coinboard::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use coinboard::ui::events::{
        filter_from_event, is_cards_left_event, is_cards_right_event, is_currency_event,
        is_down_event, is_enter_event, is_escape_event, is_favorite_event, is_quit_event,
        is_refresh_event, is_up_event, Event,
    };

    // L'avis de démo est one-shot : n'importe quelle touche le dissipe
    if matches!(event, Event::Key(_)) {
        let _ = app.take_notice();
    }

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            // Two-step quit : première pression demande confirmation
            if app.is_awaiting_quit_confirmation() {
                info!("Quit confirmé");
                app.quit();
            } else {
                app.request_quit();
            }
        }

        // Échap : retour au dashboard depuis le graphique
        Event::Key(_) if is_escape_event(&event) && app.is_on_chart() => {
            app.cancel_quit();
            app.show_dashboard();
        }

        // Entrée : graphique 7 jours du coin sélectionné
        Event::Key(_) if is_enter_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            if let Some(coin) = app.selected_coin() {
                info!(coin = %coin.id, "Ouverture du graphique");
            }
            app.show_chart();
        }

        // Navigation dans le tableau
        Event::Key(_) if is_up_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.navigate_down();
        }

        // Scroll horizontal des cartes
        Event::Key(_) if is_cards_left_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.scroll_cards_left();
        }
        Event::Key(_) if is_cards_right_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.scroll_cards_right();
        }

        // 'f' : basculer le favori de la ligne sélectionnée
        Event::Key(_) if is_favorite_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            if let Some(member) = app.toggle_selected_favorite() {
                debug!(member, "Favori togglé");
            }
        }

        // 'c' : devise suivante, puis re-fetch dans la nouvelle devise
        Event::Key(_) if is_currency_event(&event) => {
            app.cancel_quit();
            let currency = app.cycle_currency();
            info!(currency = currency.code(), "Changement de devise");
            app.start_fetch();
            let _ = command_tx.send(AppCommand::RefreshMarket { currency });
        }

        // 'r' : rafraîchissement manuel (sauf fetch déjà en vol)
        Event::Key(_) if is_refresh_event(&event) => {
            app.cancel_quit();
            if app.is_fetching {
                debug!("Refresh manuel ignoré, fetch déjà en vol");
            } else {
                info!("Refresh manuel");
                app.start_fetch();
                let _ = command_tx.send(AppCommand::RefreshMarket {
                    currency: app.currency,
                });
            }
        }

        // 1..=6 : changement de filtre
        Event::Key(_) if filter_from_event(&event).is_some() && app.is_on_dashboard() => {
            if let Some(mode) = filter_from_event(&event) {
                debug!(filter = mode.label(), "Changement de filtre");
                app.set_filter(mode);
            }
        }

        Event::Key(_) => {
            // Toute autre touche annule la confirmation de quit
            app.cancel_quit();
        }

        Event::Tick => {
            // Le compte à rebours est géré dans la boucle run()
        }
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// Raw mode + alternate screen. Toujours restaurer avant de quitter, même en
// cas d'erreur.
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
