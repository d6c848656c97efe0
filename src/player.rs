//! Persistent player progress
//!
//! Currency, best score and cosmetic unlocks. The session only ever calls
//! `update_best_score` and `add_currency`, once per finished run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_json, save_json};
use crate::skins::DEFAULT_SKIN_ID;

/// Balance a brand new player starts with
pub const STARTING_COINS: u64 = 50;

/// Player progress collaborator
pub trait PlayerStore {
    fn currency(&self) -> u64;
    fn best_score(&self) -> u64;
    fn selected_skin(&self) -> &str;
    fn owned_skins(&self) -> &BTreeSet<String>;

    /// Adjust the balance; the cumulative total never drops below zero
    fn add_currency(&mut self, delta: i64);
    /// Record a score; ignored unless it beats the current best
    fn update_best_score(&mut self, candidate: u64);
    /// Select a skin (also marks it owned)
    fn select_skin(&mut self, id: &str);
    fn purchase_skin(&mut self, id: &str);
}

/// Saved progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgress {
    pub coins: u64,
    pub best_score: u64,
    pub selected_skin: String,
    pub owned_skins: BTreeSet<String>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            best_score: 0,
            selected_skin: DEFAULT_SKIN_ID.to_string(),
            owned_skins: BTreeSet::from([DEFAULT_SKIN_ID.to_string()]),
        }
    }
}

/// `PlayerStore` backed by a key-value store
pub struct PlayerRepository<S: KeyValueStore> {
    store: S,
    progress: PlayerProgress,
}

impl<S: KeyValueStore> PlayerRepository<S> {
    /// Storage key
    const STORAGE_KEY: &'static str = "player";

    /// Load saved progress, starting fresh if there is none
    pub fn open(store: S) -> Self {
        let progress = match load_json::<PlayerProgress>(&store, Self::STORAGE_KEY) {
            Some(progress) => {
                log::info!(
                    "Loaded player progress (best {}, coins {})",
                    progress.best_score,
                    progress.coins
                );
                progress
            }
            None => {
                log::info!("No player progress found, starting fresh");
                PlayerProgress::default()
            }
        };
        Self { store, progress }
    }

    #[cfg(test)]
    fn into_store(self) -> S {
        self.store
    }

    fn save(&mut self) {
        save_json(&mut self.store, Self::STORAGE_KEY, &self.progress);
    }
}

impl<S: KeyValueStore> PlayerStore for PlayerRepository<S> {
    fn currency(&self) -> u64 {
        self.progress.coins
    }

    fn best_score(&self) -> u64 {
        self.progress.best_score
    }

    fn selected_skin(&self) -> &str {
        &self.progress.selected_skin
    }

    fn owned_skins(&self) -> &BTreeSet<String> {
        &self.progress.owned_skins
    }

    fn add_currency(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        let coins = &mut self.progress.coins;
        *coins = if delta >= 0 {
            coins.saturating_add(delta.unsigned_abs())
        } else {
            coins.saturating_sub(delta.unsigned_abs())
        };
        self.save();
    }

    fn update_best_score(&mut self, candidate: u64) {
        if candidate <= self.progress.best_score {
            return;
        }
        log::info!(
            "New best score {} (was {})",
            candidate,
            self.progress.best_score
        );
        self.progress.best_score = candidate;
        self.save();
    }

    fn select_skin(&mut self, id: &str) {
        self.progress.selected_skin = id.to_string();
        self.progress.owned_skins.insert(id.to_string());
        self.save();
    }

    fn purchase_skin(&mut self, id: &str) {
        if self.progress.owned_skins.insert(id.to_string()) {
            self.save();
        }
    }
}
