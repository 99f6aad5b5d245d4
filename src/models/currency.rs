// ============================================================================
// Enum : Currency
// ============================================================================
// Devise de cotation demandée à l'API. Le sélecteur cycle usd → eur → gbp.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Devises supportées par le dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// Code attendu par le paramètre vs_currency de CoinGecko
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
        }
    }

    /// Symbole affiché devant les montants
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Devise suivante dans le cycle (touche 'c')
    pub fn next(&self) -> Self {
        match self {
            Currency::Usd => Currency::Eur,
            Currency::Eur => Currency::Gbp,
            Currency::Gbp => Currency::Usd,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_symbols() {
        assert_eq!(Currency::Usd.code(), "usd");
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Gbp.symbol(), "£");
    }

    #[test]
    fn test_cycle_returns_to_start() {
        let c = Currency::default();
        assert_eq!(c.next().next().next(), c);
    }
}
