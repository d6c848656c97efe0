//! Main menu summary

use serde::Serialize;

use crate::player::PlayerStore;
use crate::settings::SettingsStore;
use crate::skins;

/// Everything the main menu shows, gathered in one read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuState {
    pub best_score: u64,
    pub coins: u64,
    pub music_enabled: bool,
    pub sound_enabled: bool,
    pub selected_skin_name: &'static str,
}

impl MenuState {
    pub fn collect<P, S>(player: &P, settings: &S) -> Self
    where
        P: PlayerStore + ?Sized,
        S: SettingsStore + ?Sized,
    {
        Self {
            best_score: player.best_score(),
            coins: player.currency(),
            music_enabled: settings.music_enabled(),
            sound_enabled: settings.sound_enabled(),
            selected_skin_name: skins::find_by_id(player.selected_skin()).name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::player::{PlayerRepository, STARTING_COINS};
    use crate::settings::Settings;

    #[test]
    fn test_collect_reads_both_stores() {
        let mut player = PlayerRepository::open(MemoryStore::default());
        player.update_best_score(77);
        let mut settings = Settings::default();
        settings.set_music_enabled(false);

        let menu = MenuState::collect(&player, &settings);
        assert_eq!(menu.best_score, 77);
        assert_eq!(menu.coins, STARTING_COINS);
        assert!(!menu.music_enabled);
        assert!(menu.sound_enabled);
        assert_eq!(menu.selected_skin_name, "Classic Chick");
    }
}
