// ============================================================================
// Enum : FilterMode
// ============================================================================
// Mode de filtre/tri actif pour le tableau principal. Un seul mode actif à
// la fois, sélectionné par les touches 1 à 6.
// ============================================================================

/// Filtres disponibles pour le tableau des cryptos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Ordre naturel du batch (capitalisation décroissante côté API)
    All,

    /// Tri décroissant par variation 24h
    Gainers,

    /// Tri croissant par variation 24h
    Losers,

    /// Tri croissant par rang de capitalisation
    Popular,

    /// Membres de la liste DeFi statique
    Defi,

    /// Favoris de l'utilisateur
    Watchlist,
}

impl FilterMode {
    /// Libellé affiché dans la barre de filtres
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "Tous",
            FilterMode::Gainers => "Gainers",
            FilterMode::Losers => "Losers",
            FilterMode::Popular => "Populaires",
            FilterMode::Defi => "DeFi",
            FilterMode::Watchlist => "★ Favoris",
        }
    }

    /// Mode associé à une touche chiffre (1..=6)
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(FilterMode::All),
            '2' => Some(FilterMode::Gainers),
            '3' => Some(FilterMode::Losers),
            '4' => Some(FilterMode::Popular),
            '5' => Some(FilterMode::Defi),
            '6' => Some(FilterMode::Watchlist),
            _ => None,
        }
    }

    /// Tous les modes, dans l'ordre des touches
    pub fn all_modes() -> [FilterMode; 6] {
        [
            FilterMode::All,
            FilterMode::Gainers,
            FilterMode::Losers,
            FilterMode::Popular,
            FilterMode::Defi,
            FilterMode::Watchlist,
        ]
    }
}

impl Default for FilterMode {
    fn default() -> Self {
        FilterMode::All
    }
}

/// Liste statique de tokens DeFi
///
/// Filtre manuel par symbole : l'endpoint /coins/markets ne retourne pas de
/// catégorie, et le filtrage par catégorie côté API demande de connaître les
/// IDs. C'est une approximation assumée, pas une classification vérifiée.
pub const DEFI_TOKENS: &[&str] = &[
    "uni", "aave", "link", "mkr", "crv", "comp", "snx", "1inch", "cake",
    "rune", "ldo", "pendle", "inj",
];

/// Vérifie l'appartenance d'un symbole à la liste DeFi (insensible à la casse)
pub fn is_defi_symbol(symbol: &str) -> bool {
    let lower = symbol.to_lowercase();
    DEFI_TOKENS.contains(&lower.as_str())
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digit() {
        assert_eq!(FilterMode::from_digit('1'), Some(FilterMode::All));
        assert_eq!(FilterMode::from_digit('6'), Some(FilterMode::Watchlist));
        assert_eq!(FilterMode::from_digit('7'), None);
        assert_eq!(FilterMode::from_digit('a'), None);
    }

    #[test]
    fn test_defi_membership_case_insensitive() {
        assert!(is_defi_symbol("uni"));
        assert!(is_defi_symbol("UNI"));
        assert!(is_defi_symbol("Ldo"));
        assert!(!is_defi_symbol("btc"));
    }
}
