//! Verrous par entrée pour regrouper les miss concurrents (single-flight)
//!
//! Quand il est activé, le premier miss sur une entrée prend le verrou,
//! résout puis stocke ; les requêtes concurrentes sur la même entrée
//! attendent le verrou puis refont le `lookup`, qui devient un hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// Table des verrous en cours, indexée par identifiant d'entrée
#[derive(Debug, Clone, Default)]
pub struct FlightLocks {
    locks: Arc<Mutex<LockMap>>,
}

/// Garde d'un verrou d'entrée ; libère la place dans la table si personne
/// d'autre n'attend.
#[derive(Debug)]
pub struct FlightGuard {
    id: String,
    locks: Arc<Mutex<LockMap>>,
    _guard: OwnedMutexGuard<()>,
}

impl FlightLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prend le verrou associé à `id`, en attendant son détenteur actuel
    pub async fn acquire(&self, id: &str) -> FlightGuard {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
            locks
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = mutex.lock_owned().await;
        FlightGuard {
            id: id.to_string(),
            locks: self.locks.clone(),
            _guard: guard,
        }
    }

    /// Nombre d'entrées actuellement verrouillées ou attendues
    pub fn in_flight(&self) -> usize {
        self.locks.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
        // Une référence dans la table et une dans la garde : aucun attendant
        if let Some(mutex) = locks.get(&self.id) {
            if Arc::strong_count(mutex) <= 2 {
                locks.remove(&self.id);
            }
        }
    }
}
