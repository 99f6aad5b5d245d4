// ============================================================================
// Module : models
// ============================================================================
// Structures de données de l'application (batch marché, devise, filtres)
// ============================================================================

pub mod coin;     // CoinRecord : une crypto du batch CoinGecko
pub mod currency; // Devise de cotation (usd/eur/gbp)
pub mod filter;   // Mode de filtre actif + liste DeFi

// Re-export des structures principales pour simplifier les imports
pub use coin::{CoinRecord, Sparkline7d};
pub use currency::Currency;
pub use filter::{is_defi_symbol, FilterMode, DEFI_TOKENS};
