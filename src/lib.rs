// ============================================================================
// Coinboard - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;     // Clients CoinGecko / sentiment + données de démo
pub mod app;     // État de l'application
pub mod market;  // Cœur de transformation (cartes, filtres, sparklines)
pub mod models;  // Structures de données
pub mod storage; // Persistance de la watchlist
pub mod ui;      // Interface utilisateur
