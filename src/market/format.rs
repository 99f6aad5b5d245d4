// ============================================================================
// Formatter - Montants, pourcentages et lien de trading
// ============================================================================
// Fonctions pures de mise en forme pour l'affichage. Les valeurs sont des
// f64 display-only : aucune arithmétique financière de précision ici.
// ============================================================================

/// Formate un montant dans la devise donnée
///
/// Règles (héritées du comportement d'origine) :
/// - compact : ≥ 1e12 → "T", ≥ 1e9 → "B", ≥ 1e6 → "M", deux décimales
/// - montant < 1 : six décimales (micro-prix des petits tokens)
/// - sinon : séparateurs de milliers et exactement deux décimales
///
/// # Exemples
/// - `format_currency(1_234_567_890.0, "$", true)` → "$1.23B"
/// - `format_currency(0.0000012, "$", false)` → "$0.000001"
/// - `format_currency(1234.5, "$", false)` → "$1,234.50"
pub fn format_currency(value: f64, symbol: &str, compact: bool) -> String {
    if compact {
        if value >= 1e12 {
            return format!("{}{:.2}T", symbol, value / 1e12);
        }
        if value >= 1e9 {
            return format!("{}{:.2}B", symbol, value / 1e9);
        }
        if value >= 1e6 {
            return format!("{}{:.2}M", symbol, value / 1e6);
        }
    }

    if value < 1.0 {
        return format!("{}{:.6}", symbol, value);
    }

    format!("{}{}", symbol, group_thousands(value))
}

/// Formate une variation en pourcentage avec signe explicite
///
/// Format : "+2.41%" / "-3.07%"
pub fn format_percent(change: f64) -> String {
    format!("{:+.2}%", change)
}

/// Insère les séparateurs de milliers sur la partie entière
///
/// Groupement à l'anglo-saxonne (virgule), deux décimales fixes.
fn group_thousands(value: f64) -> String {
    let raw = format!("{:.2}", value);
    let (int_part, dec_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}.{}", grouped, dec_part)
}

/// Génère le lien de trading Binance pour un symbole
///
/// On suppose la paire de cotation courante [COIN]/USDT ; vrai pour les
/// grosses capitalisations, approximatif pour le reste.
pub fn trade_link(symbol: &str) -> String {
    format!(
        "https://www.binance.com/en/trade/{}_USDT",
        symbol.to_uppercase()
    )
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_billions() {
        assert_eq!(format_currency(1_234_567_890.0, "$", true), "$1.23B");
    }

    #[test]
    fn test_compact_trillions_and_millions() {
        assert_eq!(format_currency(2.45e12, "$", true), "$2.45T");
        assert_eq!(format_currency(84_000_000.0, "€", true), "€84.00M");
    }

    #[test]
    fn test_micro_price_six_decimals() {
        assert_eq!(format_currency(0.0000012, "$", false), "$0.000001");
    }

    #[test]
    fn test_thousands_grouping_two_decimals() {
        assert_eq!(format_currency(1234.5, "$", false), "$1,234.50");
        assert_eq!(format_currency(64230.12, "$", false), "$64,230.12");
        assert_eq!(format_currency(1_000_000.0, "$", false), "$1,000,000.00");
    }

    #[test]
    fn test_small_amounts_without_grouping() {
        assert_eq!(format_currency(999.99, "£", false), "£999.99");
        assert_eq!(format_currency(1.0, "$", false), "$1.00");
    }

    #[test]
    fn test_compact_below_million_falls_through() {
        // En dessous du million, compact retombe sur le format normal
        assert_eq!(format_currency(12345.6, "$", true), "$12,345.60");
    }

    #[test]
    fn test_format_percent_signed() {
        assert_eq!(format_percent(2.41), "+2.41%");
        assert_eq!(format_percent(-3.07), "-3.07%");
        assert_eq!(format_percent(0.0), "+0.00%");
    }

    #[test]
    fn test_trade_link_uppercase_usdt_pair() {
        assert_eq!(
            trade_link("btc"),
            "https://www.binance.com/en/trade/BTC_USDT"
        );
    }
}
