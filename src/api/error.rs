// ============================================================================
// Erreurs des sources de données
// ============================================================================
// Taxonomie des échecs de fetch. Aucune de ces erreurs n'est fatale pour la
// session : le premier échec marché déclenche les données de démo, les
// suivants conservent le batch précédent, et le sentiment est toujours
// best-effort.
// ============================================================================

use thiserror::Error;

/// Échecs possibles des appels aux sources externes
#[derive(Error, Debug)]
pub enum MarketError {
    /// La source throttle (HTTP 429)
    #[error("source throttlée (HTTP 429)")]
    RateLimited,

    /// Tout autre échec de fetch marché (transport, statut, parsing)
    #[error("source de données indisponible : {0}")]
    SourceUnavailable(String),

    /// Échec du fetch sentiment — absorbé à la frontière de l'adaptateur,
    /// jamais remonté à l'utilisateur
    #[error("indicateur de sentiment indisponible : {0}")]
    SentimentUnavailable(String),
}

impl MarketError {
    /// Vérifie si l'erreur correspond à du rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, MarketError::RateLimited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert!(MarketError::RateLimited.to_string().contains("429"));
        assert!(MarketError::SourceUnavailable("timeout".into())
            .to_string()
            .contains("timeout"));
    }

    #[test]
    fn test_is_rate_limited() {
        assert!(MarketError::RateLimited.is_rate_limited());
        assert!(!MarketError::SourceUnavailable("x".into()).is_rate_limited());
    }
}
