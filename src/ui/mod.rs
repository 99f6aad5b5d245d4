// ============================================================================
// Module : ui
// ============================================================================
// Interface utilisateur terminal (ratatui). Couche de présentation pure :
// consomme les vues dérivées de App, ne calcule rien elle-même.
// ============================================================================

pub mod chart;     // Graphique 7 jours plein écran
pub mod dashboard; // Header, cartes, tableau, footer
pub mod events;    // Poll clavier et helpers de touches

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
