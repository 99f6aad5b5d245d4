// ============================================================================
// Structure : CoinRecord
// ============================================================================
// Représente une cryptomonnaie telle que retournée par l'endpoint
// /coins/markets de CoinGecko. Immutable une fois fetchée : chaque
// rafraîchissement remplace le batch entier, jamais de mise à jour partielle.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Série de prix sur 7 jours (un point par heure, ordre chronologique)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sparkline7d {
    pub price: Vec<f64>,
}

/// Une cryptomonnaie du batch marché
///
/// Les noms de champs matchent exactement le JSON CoinGecko pour que serde
/// désérialise sans annotation rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Identifiant unique CoinGecko (ex: "bitcoin")
    pub id: String,

    /// Symbole court en minuscules (ex: "btc")
    pub symbol: String,

    /// Nom complet (ex: "Bitcoin")
    pub name: String,

    /// URL de l'icône
    pub image: String,

    /// Prix actuel dans la devise demandée
    pub current_price: f64,

    /// Capitalisation boursière
    pub market_cap: f64,

    /// Rang par capitalisation (1 = plus grosse cap)
    /// CONCEPT RUST : Option car CoinGecko peut retourner null pour
    /// certains tokens exotiques
    pub market_cap_rank: Option<u32>,

    /// Volume échangé sur 24h
    pub total_volume: f64,

    /// Variation de prix sur 24h en pourcentage (signée)
    pub price_change_percentage_24h: Option<f64>,

    /// Série de prix des 7 derniers jours
    #[serde(default)]
    pub sparkline_in_7d: Sparkline7d,
}

impl CoinRecord {
    /// Variation 24h, ou 0.0 si l'API n'a pas fourni la valeur
    ///
    /// Les tris du pipeline ont besoin d'une valeur totale : un token sans
    /// variation connue est traité comme stable.
    pub fn change_24h(&self) -> f64 {
        self.price_change_percentage_24h.unwrap_or(0.0)
    }

    /// Rang de capitalisation, les tokens sans rang partent en fin de liste
    pub fn rank(&self) -> u32 {
        self.market_cap_rank.unwrap_or(u32::MAX)
    }

    /// Vérifie si la variation 24h est positive (pour le code couleur)
    pub fn is_positive(&self) -> bool {
        self.change_24h() >= 0.0
    }

    /// Symbole en majuscules pour l'affichage (ex: "BTC")
    pub fn symbol_upper(&self) -> String {
        self.symbol.to_uppercase()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 64230.12,
            "market_cap": 1264000000000.0,
            "market_cap_rank": 1,
            "total_volume": 32000000000.0,
            "price_change_percentage_24h": 2.41,
            "sparkline_in_7d": { "price": [63000.0, 63500.0, 64230.12] }
        }"#
    }

    #[test]
    fn test_deserialize_coingecko_shape() {
        let coin: CoinRecord = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(coin.id, "bitcoin");
        assert_eq!(coin.symbol_upper(), "BTC");
        assert_eq!(coin.rank(), 1);
        assert_eq!(coin.sparkline_in_7d.price.len(), 3);
        assert!(coin.is_positive());
    }

    #[test]
    fn test_missing_optional_fields() {
        // Certains tokens arrivent sans rang, sans variation et sans sparkline
        let json = r#"{
            "id": "obscurecoin",
            "symbol": "obs",
            "name": "Obscure Coin",
            "image": "",
            "current_price": 0.002,
            "market_cap": 1000.0,
            "market_cap_rank": null,
            "price_change_percentage_24h": null,
            "total_volume": 12.0
        }"#;

        let coin: CoinRecord = serde_json::from_str(json).unwrap();
        assert_eq!(coin.change_24h(), 0.0);
        assert_eq!(coin.rank(), u32::MAX);
        assert!(coin.sparkline_in_7d.price.is_empty());
    }
}
