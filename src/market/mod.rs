// ============================================================================
// Module : market
// ============================================================================
// Cœur de transformation du dashboard : fonctions pures qui dérivent les
// vues (cartes, tableau, sparklines, montants formatés) du batch de coins.
// Aucune I/O ici.
// ============================================================================

pub mod aggregate; // Les quatre listes de cartes
pub mod format;    // Montants, pourcentages, lien de trading
pub mod pipeline;  // Vue filtrée/triée du tableau
pub mod sparkline; // Normalisation de la série 7 jours

pub use aggregate::{build_card_lists, CardLists, CARD_LIST_SIZE};
pub use format::{format_currency, format_percent, trade_link};
pub use pipeline::apply_filter;
pub use sparkline::{normalize_points, sparkline_path, SPARK_HEIGHT, SPARK_WIDTH};
