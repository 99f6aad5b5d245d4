// ============================================================================
// Filter Pipeline - Vue filtrée/triée du tableau
// ============================================================================
// Applique le mode de filtre actif au batch complet pour produire les lignes
// du tableau. Ne modifie jamais le batch source : chaque appel retourne une
// nouvelle séquence ordonnée.
// ============================================================================

use crate::models::{is_defi_symbol, CoinRecord, FilterMode};
use crate::storage::Watchlist;

/// Applique le mode de filtre au batch et retourne la vue du tableau
///
/// Contrat par mode :
/// - All       : identité (ordre du batch préservé)
/// - Gainers   : tri décroissant par variation 24h
/// - Losers    : tri croissant par variation 24h
/// - Popular   : tri croissant par rang de capitalisation
/// - Defi      : filtre sur la liste DeFi statique, ordre relatif préservé
/// - Watchlist : filtre sur les favoris, ordre relatif préservé
///
/// Les IDs de la watchlist peuvent ne correspondre à aucun coin du batch
/// (l'univers de l'API peut rétrécir) : le résultat est alors vide, jamais
/// une erreur. Les tris sont stables pour des égalités déterministes.
pub fn apply_filter(
    coins: &[CoinRecord],
    mode: FilterMode,
    watchlist: &Watchlist,
) -> Vec<CoinRecord> {
    let mut view: Vec<CoinRecord> = coins.to_vec();

    match mode {
        FilterMode::All => {}
        FilterMode::Gainers => {
            view.sort_by(|a, b| {
                b.change_24h()
                    .partial_cmp(&a.change_24h())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        FilterMode::Losers => {
            view.sort_by(|a, b| {
                a.change_24h()
                    .partial_cmp(&b.change_24h())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        FilterMode::Popular => {
            view.sort_by_key(|c| c.rank());
        }
        FilterMode::Defi => {
            view.retain(|c| is_defi_symbol(&c.symbol));
        }
        FilterMode::Watchlist => {
            view.retain(|c| watchlist.contains(&c.id));
        }
    }

    view
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sparkline7d;
    use tempfile::TempDir;

    fn coin(id: &str, symbol: &str, change: f64, rank: u32) -> CoinRecord {
        CoinRecord {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: id.to_uppercase(),
            image: String::new(),
            current_price: 10.0,
            market_cap: 1_000.0,
            market_cap_rank: Some(rank),
            total_volume: 500.0,
            price_change_percentage_24h: Some(change),
            sparkline_in_7d: Sparkline7d::default(),
        }
    }

    fn sample_batch() -> Vec<CoinRecord> {
        vec![
            coin("bitcoin", "btc", 2.0, 1),
            coin("uniswap", "uni", -3.0, 20),
            coin("solana", "sol", 8.0, 4),
            coin("aave", "aave", 1.5, 35),
        ]
    }

    fn empty_watchlist() -> (Watchlist, TempDir) {
        let dir = TempDir::new().unwrap();
        let wl = Watchlist::load_from(dir.path().join("watchlist.json"));
        (wl, dir)
    }

    #[test]
    fn test_all_preserves_batch_order() {
        let batch = sample_batch();
        let (wl, _dir) = empty_watchlist();

        let view = apply_filter(&batch, FilterMode::All, &wl);
        let ids: Vec<&str> = view.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "uniswap", "solana", "aave"]);
    }

    #[test]
    fn test_gainers_and_losers_are_exact_reverses() {
        // Pas d'égalités dans le batch : gainers doit être l'inverse exact
        // de losers
        let batch = sample_batch();
        let (wl, _dir) = empty_watchlist();

        let gainers = apply_filter(&batch, FilterMode::Gainers, &wl);
        let mut losers = apply_filter(&batch, FilterMode::Losers, &wl);
        losers.reverse();

        let g: Vec<&str> = gainers.iter().map(|c| c.id.as_str()).collect();
        let l: Vec<&str> = losers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(g, l);
        assert_eq!(g[0], "solana");
    }

    #[test]
    fn test_popular_sorts_by_rank_ascending() {
        let batch = sample_batch();
        let (wl, _dir) = empty_watchlist();

        let view = apply_filter(&batch, FilterMode::Popular, &wl);
        let ranks: Vec<u32> = view.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![1, 4, 20, 35]);
    }

    #[test]
    fn test_defi_keeps_relative_order() {
        let batch = sample_batch();
        let (wl, _dir) = empty_watchlist();

        let view = apply_filter(&batch, FilterMode::Defi, &wl);
        let ids: Vec<&str> = view.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["uniswap", "aave"]);
    }

    #[test]
    fn test_watchlist_filters_by_membership() {
        let batch = sample_batch();
        let dir = TempDir::new().unwrap();
        let mut wl = Watchlist::load_from(dir.path().join("watchlist.json"));
        wl.toggle("solana");
        wl.toggle("bitcoin");

        let view = apply_filter(&batch, FilterMode::Watchlist, &wl);
        let ids: Vec<&str> = view.iter().map(|c| c.id.as_str()).collect();
        // Ordre relatif du batch préservé, pas l'ordre d'ajout
        assert_eq!(ids, vec!["bitcoin", "solana"]);
    }

    #[test]
    fn test_watchlist_with_unknown_ids_yields_empty_not_error() {
        // L'univers de l'API peut avoir rétréci : des favoris sans coin
        // correspondant donnent une vue vide, distincte d'un batch vide
        let batch = sample_batch();
        let dir = TempDir::new().unwrap();
        let mut wl = Watchlist::load_from(dir.path().join("watchlist.json"));
        wl.toggle("coin-retire-du-top-50");

        let view = apply_filter(&batch, FilterMode::Watchlist, &wl);
        assert!(view.is_empty());
        assert!(!batch.is_empty()); // la distinction "vide" vs "pas de données"
    }

    #[test]
    fn test_source_batch_is_not_mutated() {
        let batch = sample_batch();
        let (wl, _dir) = empty_watchlist();

        let _ = apply_filter(&batch, FilterMode::Gainers, &wl);
        assert_eq!(batch[0].id, "bitcoin"); // ordre d'origine intact
    }
}
