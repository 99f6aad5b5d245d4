// ============================================================================
// API Client : Fear & Greed
// ============================================================================
// Indicateur de sentiment global (alternative.me). Strictement best-effort :
// l'appelant logge et absorbe l'erreur, le dashboard fonctionne sans.
// ============================================================================

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::api::error::MarketError;

/// Endpoint Fear & Greed Index
const FNG_URL: &str = "https://api.alternative.me/fng/";

/// Indicateur de sentiment du marché
#[derive(Debug, Clone)]
pub struct Sentiment {
    /// Index 0–100 (0 = peur extrême, 100 = avidité extrême)
    pub value: u8,

    /// Classification textuelle (ex: "Greed", "Extreme Fear")
    pub classification: String,
}

impl Sentiment {
    /// Vérifie si le marché penche côté avidité (pour le code couleur)
    pub fn is_greedy(&self) -> bool {
        self.value > 50
    }
}

// L'API retourne les valeurs numériques sous forme de chaînes
#[derive(Debug, Deserialize)]
struct FngResponse {
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
}

/// Récupère l'indicateur de sentiment courant
///
/// # Erreurs
/// `SentimentUnavailable` pour tout échec — à absorber au call site, jamais
/// à propager jusqu'à l'utilisateur.
#[instrument]
pub async fn fetch_sentiment() -> Result<Sentiment, MarketError> {
    debug!("Fetch de l'indicateur Fear & Greed");

    let response = reqwest::get(FNG_URL)
        .await
        .map_err(|e| MarketError::SentimentUnavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(MarketError::SentimentUnavailable(format!(
            "HTTP {}",
            response.status()
        )));
    }

    let parsed: FngResponse = response
        .json()
        .await
        .map_err(|e| MarketError::SentimentUnavailable(format!("parsing JSON : {}", e)))?;

    let entry = parsed
        .data
        .into_iter()
        .next()
        .ok_or_else(|| MarketError::SentimentUnavailable("réponse vide".into()))?;

    let value: u8 = entry
        .value
        .parse()
        .map_err(|_| MarketError::SentimentUnavailable(format!("valeur invalide : {}", entry.value)))?;

    let sentiment = Sentiment {
        value,
        classification: entry.value_classification,
    };

    info!(value = sentiment.value, classification = %sentiment.classification, "Sentiment récupéré");
    Ok(sentiment)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fng_response_shape() {
        let json = r#"{
            "name": "Fear and Greed Index",
            "data": [
                { "value": "62", "value_classification": "Greed", "timestamp": "1717027200" }
            ]
        }"#;

        let parsed: FngResponse = serde_json::from_str(json).unwrap();
        let entry = &parsed.data[0];
        assert_eq!(entry.value, "62");
        assert_eq!(entry.value_classification, "Greed");
    }

    #[test]
    fn test_is_greedy_threshold() {
        let fearful = Sentiment { value: 50, classification: "Neutral".into() };
        let greedy = Sentiment { value: 51, classification: "Greed".into() };
        assert!(!fearful.is_greedy());
        assert!(greedy.is_greedy());
    }
}
