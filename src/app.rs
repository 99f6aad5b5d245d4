// ============================================================================
// Structure : App
// ============================================================================
// État global du dashboard. Tous les composants UI lisent depuis App, toutes
// les mutations passent par ses méthodes : pas d'état ambiant.
//
// Le batch de coins est remplacé en bloc à chaque rafraîchissement (jamais de
// fusion partielle) ; la watchlist est la seule autre ressource mutable.
// ============================================================================

use chrono::{DateTime, Local};

use crate::api::Sentiment;
use crate::market::{self, CardLists};
use crate::models::{CoinRecord, Currency, FilterMode};
use crate::storage::Watchlist;

/// Nombre de cartes du dashboard
pub const CARD_COUNT: usize = 4;

/// Ticks de l'event loop entre deux rafraîchissements auto
/// (poll de 250 ms × 240 = 60 secondes)
pub const TICKS_PER_REFRESH: u32 = 240;

/// Dominance BTC affichée dans le header
///
/// Valeur mockée : l'endpoint /global est lourd et souvent rate-limité sur
/// l'API gratuite. Affichée comme approximation, pas comme donnée live.
pub const MOCK_BTC_DOMINANCE: f64 = 54.2;

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : cartes + tableau filtrable
    Dashboard,

    /// Graphique 7 jours du coin sélectionné
    ChartView,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Devise de cotation courante
    pub currency: Currency,

    /// Mode de filtre actif pour le tableau
    pub active_filter: FilterMode,

    /// Batch de coins courant (remplacé en bloc à chaque fetch)
    pub coins: Vec<CoinRecord>,

    /// Favoris persistés
    pub watchlist: Watchlist,

    /// Indicateur de sentiment (None tant que le fetch n'a pas abouti)
    pub sentiment: Option<Sentiment>,

    /// Indique que le batch affiché est synthétique (API indisponible au
    /// premier chargement)
    pub demo_mode: bool,

    /// Avis one-shot affiché à l'utilisateur lors du passage en démo
    pub notice: Option<String>,

    /// Ligne sélectionnée dans la vue filtrée du tableau
    pub selected_index: usize,

    /// Première carte visible (scroll horizontal des cartes)
    pub card_offset: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Two-step quit : première pression de 'q' attend confirmation
    pub confirm_quit: bool,

    /// Garde de réentrance : un fetch est en vol, on saute les ticks de
    /// rafraîchissement tant qu'il n'est pas résolu
    pub is_fetching: bool,

    /// Horodatage du dernier batch appliqué
    pub last_refresh: Option<DateTime<Local>>,

    /// Compte à rebours du prochain rafraîchissement auto
    ticks_until_refresh: u32,
}

impl App {
    /// Crée l'état initial avec la watchlist chargée depuis le disque
    pub fn new(watchlist: Watchlist) -> Self {
        Self {
            running: true,
            currency: Currency::default(),
            active_filter: FilterMode::default(),
            coins: Vec::new(),
            watchlist,
            sentiment: None,
            demo_mode: false,
            notice: None,
            selected_index: 0,
            card_offset: 0,
            current_screen: Screen::Dashboard,
            confirm_quit: false,
            is_fetching: false,
            last_refresh: None,
            ticks_until_refresh: TICKS_PER_REFRESH,
        }
    }

    // ========================================================================
    // Cycle de rafraîchissement
    // ========================================================================

    /// Tick de l'event loop ; retourne true quand un rafraîchissement auto
    /// doit partir
    ///
    /// Garde de réentrance : si un fetch est déjà en vol, le tick est sauté
    /// et le compte à rebours repart (pas de cycles imbriqués).
    pub fn tick(&mut self) -> bool {
        self.ticks_until_refresh = self.ticks_until_refresh.saturating_sub(1);
        if self.ticks_until_refresh > 0 {
            return false;
        }

        self.ticks_until_refresh = TICKS_PER_REFRESH;
        !self.is_fetching
    }

    /// Secondes restantes avant le prochain rafraîchissement auto
    pub fn seconds_until_refresh(&self) -> u32 {
        self.ticks_until_refresh / 4
    }

    /// Marque un fetch comme parti (garde de réentrance)
    pub fn start_fetch(&mut self) {
        self.is_fetching = true;
    }

    /// Applique un batch fraîchement fetché
    ///
    /// Remplacement en bloc. Un résultat arrivé après un changement de
    /// devise est écarté par l'appelant (comparaison de devise) : ici on ne
    /// fait que remplacer et réajuster la sélection.
    pub fn apply_batch(&mut self, coins: Vec<CoinRecord>) {
        self.coins = coins;
        self.is_fetching = false;
        self.demo_mode = false;
        self.last_refresh = Some(Local::now());
        self.clamp_selection();
    }

    /// Bascule sur le batch synthétique après échec du premier chargement
    pub fn apply_demo_batch(&mut self, coins: Vec<CoinRecord>) {
        self.coins = coins;
        self.is_fetching = false;
        self.demo_mode = true;
        self.last_refresh = Some(Local::now());
        self.notice = Some("API indisponible — données de démo affichées".to_string());
        self.clamp_selection();
    }

    /// Un fetch a échoué alors qu'un batch existe déjà : on garde le batch
    /// périmé tel quel (stale-but-consistent), le cycle est simplement sauté
    pub fn keep_stale_batch(&mut self) {
        self.is_fetching = false;
    }

    /// Vérifie si aucun batch n'a jamais été chargé
    pub fn has_no_data(&self) -> bool {
        self.coins.is_empty()
    }

    // ========================================================================
    // Vues dérivées (cœur de transformation)
    // ========================================================================

    /// Vue filtrée/triée du tableau selon le mode actif
    pub fn table_view(&self) -> Vec<CoinRecord> {
        market::apply_filter(&self.coins, self.active_filter, &self.watchlist)
    }

    /// Les quatre listes de cartes dérivées du batch
    pub fn card_lists(&self) -> CardLists {
        market::build_card_lists(&self.coins)
    }

    /// Capitalisation totale des coins du batch (stat du header)
    pub fn global_market_cap(&self) -> f64 {
        self.coins.iter().map(|c| c.market_cap).sum()
    }

    /// Volume 24h total des coins du batch (stat du header)
    pub fn global_volume(&self) -> f64 {
        self.coins.iter().map(|c| c.total_volume).sum()
    }

    /// Coin actuellement sélectionné dans la vue filtrée
    pub fn selected_coin(&self) -> Option<CoinRecord> {
        self.table_view().into_iter().nth(self.selected_index)
    }

    // ========================================================================
    // Interactions utilisateur
    // ========================================================================

    /// Change le mode de filtre et remet la sélection en haut du tableau
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.active_filter = mode;
        self.selected_index = 0;
        self.confirm_quit = false;
    }

    /// Passe à la devise suivante ; l'appelant déclenche le re-fetch
    pub fn cycle_currency(&mut self) -> Currency {
        self.currency = self.currency.next();
        self.currency
    }

    /// Bascule le favori de la ligne sélectionnée ; retourne le nouvel état
    pub fn toggle_selected_favorite(&mut self) -> Option<bool> {
        let coin = self.selected_coin()?;
        let member = self.watchlist.toggle(&coin.id);

        // Sur l'onglet Favoris, retirer un coin raccourcit la vue :
        // la sélection doit rester dans les bornes
        if self.active_filter == FilterMode::Watchlist {
            self.clamp_selection();
        }
        Some(member)
    }

    /// Navigue vers le haut dans le tableau
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Navigue vers le bas dans le tableau
    pub fn navigate_down(&mut self) {
        let max_index = self.table_view().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Fait défiler les cartes vers la gauche
    pub fn scroll_cards_left(&mut self) {
        self.card_offset = self.card_offset.saturating_sub(1);
    }

    /// Fait défiler les cartes vers la droite
    pub fn scroll_cards_right(&mut self) {
        self.card_offset = (self.card_offset + 1).min(CARD_COUNT - 1);
    }

    /// Consomme l'avis one-shot (affiché une seule fois)
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    // ========================================================================
    // Écrans et sortie
    // ========================================================================

    /// Affiche le graphique 7 jours du coin sélectionné
    pub fn show_chart(&mut self) {
        if self.selected_coin().is_some() {
            self.current_screen = Screen::ChartView;
        }
    }

    /// Retourne au dashboard
    pub fn show_dashboard(&mut self) {
        self.current_screen = Screen::Dashboard;
    }

    /// Vérifie si on est sur le dashboard
    pub fn is_on_dashboard(&self) -> bool {
        self.current_screen == Screen::Dashboard
    }

    /// Vérifie si on est sur la vue graphique
    pub fn is_on_chart(&self) -> bool {
        self.current_screen == Screen::ChartView
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Demande la confirmation de quitter (première pression de 'q')
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Ramène la sélection dans les bornes de la vue filtrée courante
    fn clamp_selection(&mut self) {
        let len = self.table_view().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock_batch;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let wl = Watchlist::load_from(dir.path().join("watchlist.json"));
        (App::new(wl), dir)
    }

    #[test]
    fn test_initial_state() {
        let (app, _dir) = test_app();
        assert!(app.is_running());
        assert!(app.has_no_data());
        assert_eq!(app.currency, Currency::Usd);
        assert_eq!(app.active_filter, FilterMode::All);
    }

    #[test]
    fn test_apply_batch_replaces_wholesale() {
        let (mut app, _dir) = test_app();
        app.apply_batch(mock_batch());
        let first_len = app.coins.len();
        assert!(first_len > 0);
        assert!(app.last_refresh.is_some());

        // Deuxième batch : remplacement, pas de fusion
        app.apply_batch(mock_batch());
        assert_eq!(app.coins.len(), first_len);
        assert!(!app.demo_mode);
    }

    #[test]
    fn test_demo_batch_sets_notice_once() {
        let (mut app, _dir) = test_app();
        app.apply_demo_batch(mock_batch());

        assert!(app.demo_mode);
        assert!(!app.has_no_data());
        assert!(app.take_notice().is_some());
        assert!(app.take_notice().is_none()); // one-shot
    }

    #[test]
    fn test_tick_counts_down_to_refresh() {
        let (mut app, _dir) = test_app();
        for _ in 0..TICKS_PER_REFRESH - 1 {
            assert!(!app.tick());
        }
        assert!(app.tick());
        // Le compteur repart
        assert!(!app.tick());
    }

    #[test]
    fn test_tick_skipped_while_fetch_in_flight() {
        let (mut app, _dir) = test_app();
        app.start_fetch();
        for _ in 0..TICKS_PER_REFRESH {
            assert!(!app.tick());
        }
    }

    #[test]
    fn test_cycle_currency() {
        let (mut app, _dir) = test_app();
        assert_eq!(app.cycle_currency(), Currency::Eur);
        assert_eq!(app.cycle_currency(), Currency::Gbp);
        assert_eq!(app.cycle_currency(), Currency::Usd);
    }

    #[test]
    fn test_set_filter_resets_selection() {
        let (mut app, _dir) = test_app();
        app.apply_batch(mock_batch());
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        app.set_filter(FilterMode::Gainers);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_toggle_favorite_on_watchlist_tab_clamps_selection() {
        let (mut app, _dir) = test_app();
        app.apply_batch(mock_batch());

        // Deux favoris, on se place sur le second dans l'onglet Favoris
        let first = app.coins[0].id.clone();
        let second = app.coins[1].id.clone();
        app.watchlist.toggle(&first);
        app.watchlist.toggle(&second);
        app.set_filter(FilterMode::Watchlist);
        app.navigate_down();
        assert_eq!(app.selected_index, 1);

        // Retirer le favori sélectionné raccourcit la vue
        let member = app.toggle_selected_favorite();
        assert_eq!(member, Some(false));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_navigation_clamped_to_filtered_view() {
        let (mut app, _dir) = test_app();
        app.apply_batch(mock_batch());
        app.set_filter(FilterMode::Watchlist); // vue vide

        app.navigate_down();
        assert_eq!(app.selected_index, 0);
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_card_scroll_clamped() {
        let (mut app, _dir) = test_app();
        app.scroll_cards_left();
        assert_eq!(app.card_offset, 0);

        for _ in 0..10 {
            app.scroll_cards_right();
        }
        assert_eq!(app.card_offset, CARD_COUNT - 1);
    }

    #[test]
    fn test_chart_requires_selection() {
        let (mut app, _dir) = test_app();
        app.show_chart(); // pas de données : reste sur le dashboard
        assert!(app.is_on_dashboard());

        app.apply_batch(mock_batch());
        app.show_chart();
        assert!(app.is_on_chart());

        app.show_dashboard();
        assert!(app.is_on_dashboard());
    }

    #[test]
    fn test_two_step_quit() {
        let (mut app, _dir) = test_app();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_global_stats_sum_the_batch() {
        let (mut app, _dir) = test_app();
        app.apply_batch(mock_batch());

        let expected_cap: f64 = app.coins.iter().map(|c| c.market_cap).sum();
        assert_eq!(app.global_market_cap(), expected_cap);
        assert!(app.global_volume() > 0.0);
    }
}
