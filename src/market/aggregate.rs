// ============================================================================
// Aggregator - Listes des cartes du dashboard
// ============================================================================
// Dérive les quatre sous-listes affichées en cartes à partir du batch
// complet. Lecture pure du batch, aucun effet de bord.
// ============================================================================

use crate::models::CoinRecord;

/// Taille maximale de chaque liste de carte
pub const CARD_LIST_SIZE: usize = 3;

/// Les quatre sous-listes dérivées du batch
#[derive(Debug, Clone, Default)]
pub struct CardLists {
    /// Top 3 par capitalisation (préfixe du batch)
    pub market_leaders: Vec<CoinRecord>,

    /// Top 3 par variation 24h décroissante
    pub top_gainers: Vec<CoinRecord>,

    /// Top 3 par volume 24h décroissant
    pub high_volume: Vec<CoinRecord>,

    /// Jusqu'à 3 stablecoins, dans l'ordre du batch
    pub stablecoins: Vec<CoinRecord>,
}

impl CardLists {
    /// Titre, sous-titre et coins de chaque carte, dans l'ordre d'affichage
    pub fn cards(&self) -> [(&'static str, &'static str, &[CoinRecord]); 4] {
        [
            ("Market Leaders", "Top capitalisation", &self.market_leaders),
            ("Top Gainers", "Meilleure variation 24h", &self.top_gainers),
            ("High Volume", "Les plus échangés", &self.high_volume),
            ("Stablecoins", "Actifs indexés", &self.stablecoins),
        ]
    }
}

/// Construit les quatre listes de cartes à partir du batch
///
/// Le batch arrive pré-trié par capitalisation décroissante (paramètre
/// order=market_cap_desc de la requête) : market_leaders est donc un simple
/// préfixe, sans re-tri. Les tris gainers/volume utilisent sort_by (tri
/// stable) pour que les égalités restent déterministes.
pub fn build_card_lists(coins: &[CoinRecord]) -> CardLists {
    let market_leaders = coins.iter().take(CARD_LIST_SIZE).cloned().collect();

    let mut by_change: Vec<CoinRecord> = coins.to_vec();
    by_change.sort_by(|a, b| {
        b.change_24h()
            .partial_cmp(&a.change_24h())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    by_change.truncate(CARD_LIST_SIZE);

    let mut by_volume: Vec<CoinRecord> = coins.to_vec();
    by_volume.sort_by(|a, b| {
        b.total_volume
            .partial_cmp(&a.total_volume)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    by_volume.truncate(CARD_LIST_SIZE);

    // Heuristique : un symbole contenant "usd" est considéré stablecoin.
    // Approximation, pas une vérification du peg.
    let stablecoins = coins
        .iter()
        .filter(|c| c.symbol.to_lowercase().contains("usd"))
        .take(CARD_LIST_SIZE)
        .cloned()
        .collect();

    CardLists {
        market_leaders,
        top_gainers: by_change,
        high_volume: by_volume,
        stablecoins,
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
