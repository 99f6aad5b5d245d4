// ============================================================================
// Module : api
// ============================================================================
// Adaptateurs vers les sources de données externes (CoinGecko pour le
// marché, alternative.me pour le sentiment) et le générateur de démo.
// ============================================================================

pub mod coingecko; // Batch marché top 50
pub mod error;     // Taxonomie des erreurs de fetch
pub mod mock;      // Batch synthétique de secours
pub mod sentiment; // Indicateur Fear & Greed

// Re-export des fonctions principales
pub use coingecko::{fetch_market_batch, FETCH_LIMIT};
pub use error::MarketError;
pub use mock::mock_batch;
pub use sentiment::{fetch_sentiment, Sentiment};
