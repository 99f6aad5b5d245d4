// ============================================================================
// Gestion des événements
// ============================================================================
// Poll clavier crossterm avec timeout : chaque timeout produit un Tick, ce
// qui cadence à la fois le rendu et le compte à rebours de rafraîchissement.
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::models::FilterMode;

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (rendu + compte à rebours du refresh)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler;

impl EventHandler {
    /// Crée un nouveau gestionnaire d'événements
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant, timeout 250 ms)
    ///
    /// Le timeout fixe la granularité du tick : 4 ticks par seconde, ce que
    /// le compte à rebours de App suppose.
    pub fn next(&self) -> Result<Event> {
        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                CrosstermEvent::Key(key) => {
                    // Certains OS envoient Press ET Release : on ne garde
                    // que Press pour éviter les doublons
                    if key.kind == KeyEventKind::Press {
                        Ok(Event::Key(key))
                    } else {
                        Ok(Event::Tick)
                    }
                }
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : identifier les touches
// ============================================================================

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Vérifie si l'événement est Échap
pub fn is_escape_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Esc)
    } else {
        false
    }
}

/// Vérifie si l'événement est Entrée (ouvrir le graphique)
pub fn is_enter_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Enter)
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'h' ou flèche gauche (scroll cartes)
pub fn is_cards_left_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Left | KeyCode::Char('h'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'l' ou flèche droite (scroll cartes)
pub fn is_cards_right_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Right | KeyCode::Char('l'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'c' (changer de devise)
pub fn is_currency_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'r' (rafraîchissement manuel)
pub fn is_refresh_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'f' (basculer le favori sélectionné)
pub fn is_favorite_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('f') | KeyCode::Char('F'))
    } else {
        false
    }
}

/// Extrait le mode de filtre d'une touche chiffre (1..=6)
pub fn filter_from_event(event: &Event) -> Option<FilterMode> {
    if let Event::Key(key) = event {
        if let KeyCode::Char(c) = key.code {
            return FilterMode::from_digit(c);
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key('q')));
        assert!(is_quit_event(&key('Q')));
        assert!(!is_quit_event(&key('a')));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_filter_from_event() {
        assert_eq!(filter_from_event(&key('2')), Some(FilterMode::Gainers));
        assert_eq!(filter_from_event(&key('6')), Some(FilterMode::Watchlist));
        assert_eq!(filter_from_event(&key('9')), None);
        assert_eq!(filter_from_event(&Event::Tick), None);
    }

    #[test]
    fn test_navigation_events() {
        assert!(is_up_event(&key('k')));
        assert!(is_down_event(&key('j')));
        assert!(is_cards_left_event(&key('h')));
        assert!(is_cards_right_event(&key('l')));
    }
}
