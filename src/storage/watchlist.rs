// ============================================================================
// Watchlist - Favoris persistés
// ============================================================================
// Ensemble ordonné d'IDs de coins marqués favoris. Chargé une seule fois au
// démarrage, gardé en mémoire, et flushé sur disque à chaque mutation
// (fichier JSON : un simple tableau d'IDs).
// ============================================================================

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

/// Nom du fichier de persistance sous le répertoire data
const WATCHLIST_FILE: &str = "watchlist.json";

/// Favoris de l'utilisateur, persistés entre les sessions
///
/// L'ordre d'insertion est conservé (comme un tableau JSON). Les IDs peuvent
/// référencer des coins absents du batch courant : c'est au pipeline de
/// filtrage de produire une vue vide dans ce cas, jamais une erreur.
#[derive(Debug)]
pub struct Watchlist {
    ids: Vec<String>,
    path: PathBuf,
}

impl Watchlist {
    /// Charge la watchlist depuis l'emplacement par défaut
    ///
    /// Emplacement : <data_dir>/coinboard/watchlist.json
    /// (ex: ~/.local/share/coinboard/watchlist.json sous Linux).
    /// Repli sur le répertoire courant si le data dir est indisponible.
    pub fn load() -> Self {
        let base = dirs::data_dir()
            .map(|d| d.join("coinboard"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::load_from(base.join(WATCHLIST_FILE))
    }

    /// Charge la watchlist depuis un chemin explicite
    ///
    /// Fichier manquant ou corrompu → liste vide (jamais fatal : le
    /// dashboard démarre toujours).
    pub fn load_from(path: PathBuf) -> Self {
        let ids = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => {
                    info!(count = ids.len(), path = ?path, "Watchlist chargée");
                    ids
                }
                Err(e) => {
                    warn!(error = ?e, path = ?path, "Fichier watchlist corrompu, repart de zéro");
                    Vec::new()
                }
            },
            Err(_) => {
                debug!(path = ?path, "Pas de fichier watchlist, liste vide");
                Vec::new()
            }
        };

        Self { ids, path }
    }

    /// Vérifie si un coin est dans les favoris
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Bascule l'appartenance d'un coin et retourne le nouvel état
    ///
    /// true = désormais favori, false = retiré. Chaque mutation est flushée
    /// immédiatement sur disque.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_member = if let Some(pos) = self.ids.iter().position(|i| i == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        };

        info!(coin = %id, member = now_member, "Watchlist togglée");
        self.flush();
        now_member
    }

    /// Nombre de favoris
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Vérifie si la liste est vide
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Écrit la liste sur disque
    ///
    /// Best effort : un échec d'écriture est loggé mais ne fait pas tomber
    /// la session (la liste en mémoire reste la référence).
    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(error = ?e, "Impossible de créer le répertoire watchlist");
                return;
            }
        }

        match serde_json::to_string(&self.ids) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!(error = ?e, path = ?self.path, "Échec de l'écriture de la watchlist");
                }
            }
            Err(e) => warn!(error = ?e, "Échec de la sérialisation de la watchlist"),
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let wl = Watchlist::load_from(dir.path().join("watchlist.json"));
        assert!(wl.is_empty());
        assert!(!wl.contains("bitcoin"));
    }

    #[test]
    fn test_toggle_returns_new_membership() {
        let dir = TempDir::new().unwrap();
        let mut wl = Watchlist::load_from(dir.path().join("watchlist.json"));

        assert!(wl.toggle("bitcoin"));
        assert!(wl.contains("bitcoin"));
        assert_eq!(wl.len(), 1);

        assert!(!wl.toggle("bitcoin"));
        assert!(!wl.contains("bitcoin"));
        assert!(wl.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_persisted_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.json");

        let mut wl = Watchlist::load_from(path.clone());
        wl.toggle("ethereum");
        let after_add = fs::read_to_string(&path).unwrap();
        assert!(after_add.contains("ethereum"));

        wl.toggle("ethereum");
        let after_remove = fs::read_to_string(&path).unwrap();
        assert_eq!(after_remove, "[]");
    }

    #[test]
    fn test_mutations_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.json");

        {
            let mut wl = Watchlist::load_from(path.clone());
            wl.toggle("bitcoin");
            wl.toggle("solana");
        }

        let reloaded = Watchlist::load_from(path);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("bitcoin"));
        assert!(reloaded.contains("solana"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.json");
        fs::write(&path, "pas du json {{{").unwrap();

        let wl = Watchlist::load_from(path);
        assert!(wl.is_empty());
    }
}
