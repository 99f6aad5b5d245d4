// ============================================================================
// Module : storage
// ============================================================================
// Persistance locale (fichier watchlist sous le répertoire data utilisateur)
// ============================================================================

pub mod watchlist; // Favoris persistés en JSON

pub use watchlist::Watchlist;
