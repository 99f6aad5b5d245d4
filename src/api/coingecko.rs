// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Récupère le batch marché depuis l'API publique CoinGecko (pas de clé pour
// les endpoints de base, mais rate limits agressifs : le statut 429 a sa
// propre variante d'erreur pour que l'appelant sache quoi afficher).
// ============================================================================

use tracing::{debug, error, info, instrument};

use crate::api::error::MarketError;
use crate::models::{CoinRecord, Currency};

/// Base de l'API CoinGecko v3
const API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Nombre de coins demandés par batch (top N par capitalisation)
pub const FETCH_LIMIT: usize = 50;

/// Récupère le top 50 par capitalisation dans la devise demandée
///
/// La requête inclut la série sparkline 7 jours et la variation 24h. La
/// réponse est un tableau JSON de coins désérialisé directement en
/// `Vec<CoinRecord>` (les noms de champs matchent).
///
/// # Erreurs
/// - `RateLimited` si CoinGecko répond 429
/// - `SourceUnavailable` pour tout autre échec (transport, statut, parsing)
#[instrument]
pub async fn fetch_market_batch(currency: Currency) -> Result<Vec<CoinRecord>, MarketError> {
    let url = build_markets_url(currency, FETCH_LIMIT);
    debug!(url = %url, "URL marchés CoinGecko construite");

    // User-Agent explicite : l'API rejette certains clients anonymes
    let client = reqwest::Client::builder()
        .user_agent("coinboard/0.1")
        .build()
        .map_err(|e| MarketError::SourceUnavailable(e.to_string()))?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| MarketError::SourceUnavailable(e.to_string()))?;

    let status = response.status();
    debug!(status = %status, "Réponse CoinGecko reçue");

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        error!("CoinGecko rate limit atteint");
        return Err(MarketError::RateLimited);
    }
    if !status.is_success() {
        error!(status = %status, "CoinGecko a retourné une erreur");
        return Err(MarketError::SourceUnavailable(format!("HTTP {}", status)));
    }

    let coins: Vec<CoinRecord> = response
        .json()
        .await
        .map_err(|e| MarketError::SourceUnavailable(format!("parsing JSON : {}", e)))?;

    info!(count = coins.len(), currency = currency.code(), "Batch marché récupéré");
    Ok(coins)
}

/// Construit l'URL de l'endpoint /coins/markets
///
/// Tri par capitalisation décroissante côté API : le batch arrive pré-trié,
/// ce que l'agrégateur exploite pour la carte Market Leaders.
fn build_markets_url(currency: Currency, per_page: usize) -> String {
    format!(
        "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=24h",
        API_BASE,
        currency.code(),
        per_page
    )
}

// ============================================================================
// Tests unitaires
// ============================================================================
