// ============================================================================
// Sparkline - Normalisation d'une série de prix
// ============================================================================
// Transforme la série 7 jours d'un coin en polyligne normalisée sur un
// canvas fixe. Deux sorties :
// - normalize_points() : les points (x, y), consommés par le rendu TUI
// - sparkline_path()   : la description de chemin SVG ("M x y L x y ...")
//
// Fonction pure : même entrée, même sortie, aucun effet de bord.
// ============================================================================

/// Largeur par défaut du canvas (viewBox SVG d'origine)
pub const SPARK_WIDTH: f64 = 168.0;

/// Hauteur par défaut du canvas
pub const SPARK_HEIGHT: f64 = 50.0;

/// Normalise une série de prix en points (x, y) sur un canvas width × height
///
/// Contrat :
/// - série vide → aucun point
/// - un seul point → un point unique en x = 0, y = height/2 (une série d'un
///   élément est plate par définition ; évite la division par zéro du pas)
/// - série plate (max == min) → tous les y à height/2
/// - sinon : x = i·width/(n−1), y = height − ((p−min)/(max−min))·height
///   (l'axe y pointe vers le bas dans le repère cible, d'où l'inversion)
pub fn normalize_points(prices: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if prices.is_empty() {
        return Vec::new();
    }

    if prices.len() == 1 {
        // Pas de step_x définissable avec un seul point
        return vec![(0.0, height / 2.0)];
    }

    let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let step_x = width / (prices.len() - 1) as f64;

    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let x = i as f64 * step_x;
            // Série plate : ligne horizontale à mi-hauteur
            let y = if range == 0.0 {
                height / 2.0
            } else {
                height - ((price - min) / range) * height
            };
            (x, y)
        })
        .collect()
}

/// Génère la description de chemin SVG pour une série de prix
///
/// Premier point en "M" (move), les suivants en "L" (line), chaque
/// coordonnée arrondie à une décimale. Série vide → chaîne vide.
pub fn sparkline_path(prices: &[f64], width: f64, height: f64) -> String {
    let points = normalize_points(prices, width, height);

    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let command = if i == 0 { "M" } else { "L" };
        if i > 0 {
            d.push(' ');
        }
        d.push_str(&format!("{} {:.1} {:.1}", command, x, y));
    }

    d
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_yields_empty_path() {
        assert!(normalize_points(&[], SPARK_WIDTH, SPARK_HEIGHT).is_empty());
        assert_eq!(sparkline_path(&[], SPARK_WIDTH, SPARK_HEIGHT), "");
    }

    #[test]
    fn test_first_point_at_zero_last_at_width() {
        let prices = vec![10.0, 12.0, 9.0, 15.0, 11.0];
        let points = normalize_points(&prices, SPARK_WIDTH, SPARK_HEIGHT);

        assert_eq!(points.len(), prices.len());
        assert!((points[0].0 - 0.0).abs() < 1e-9);
        assert!((points.last().unwrap().0 - SPARK_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn test_flat_series_maps_to_mid_height() {
        let prices = vec![42.0; 10];
        let points = normalize_points(&prices, SPARK_WIDTH, SPARK_HEIGHT);

        for (_, y) in points {
            assert!((y - SPARK_HEIGHT / 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_point_no_division_by_zero() {
        let points = normalize_points(&[1234.5], SPARK_WIDTH, SPARK_HEIGHT);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0], (0.0, SPARK_HEIGHT / 2.0));

        let path = sparkline_path(&[1234.5], SPARK_WIDTH, SPARK_HEIGHT);
        assert_eq!(path, "M 0.0 25.0");
    }

    #[test]
    fn test_min_maps_to_bottom_max_to_top() {
        // L'axe y est inversé : le min doit être en bas (y = height),
        // le max en haut (y = 0)
        let prices = vec![5.0, 20.0];
        let points = normalize_points(&prices, SPARK_WIDTH, SPARK_HEIGHT);

        assert!((points[0].1 - SPARK_HEIGHT).abs() < 1e-9);
        assert!((points[1].1 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_path_commands_and_rounding() {
        let path = sparkline_path(&[0.0, 50.0, 100.0], 168.0, 50.0);
        assert_eq!(path, "M 0.0 50.0 L 84.0 25.0 L 168.0 0.0");
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let prices = vec![3.1, 2.7, 4.9, 4.9, 1.0];
        let a = sparkline_path(&prices, SPARK_WIDTH, SPARK_HEIGHT);
        let b = sparkline_path(&prices, SPARK_WIDTH, SPARK_HEIGHT);
        assert_eq!(a, b);
    }
}
