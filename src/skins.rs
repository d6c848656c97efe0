//! Cosmetic skin catalog
//!
//! Skins are bought with pickup currency and are purely visual.

use serde::Serialize;

use crate::player::PlayerStore;

/// A cosmetic player skin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u32,
}

/// Id of the skin every player owns
pub const DEFAULT_SKIN_ID: &str = "classic";

pub static CATALOG: [Skin; 4] = [
    Skin {
        id: DEFAULT_SKIN_ID,
        name: "Classic Chick",
        price: 0,
    },
    Skin {
        id: "red",
        name: "Red Pixel",
        price: 320,
    },
    Skin {
        id: "green",
        name: "Green GameBoy",
        price: 750,
    },
    Skin {
        id: "cyber",
        name: "Cyber Grid",
        price: 1200,
    },
];

pub fn default_skin() -> &'static Skin {
    &CATALOG[0]
}

/// Look up a skin, falling back to the default for unknown ids
pub fn find_by_id(id: &str) -> &'static Skin {
    CATALOG
        .iter()
        .find(|s| s.id == id)
        .unwrap_or_else(default_skin)
}

/// What happened when the player picked a skin in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinChoice {
    /// Already owned; now selected
    Selected,
    /// Bought with currency and selected
    Purchased,
    /// Not owned and the balance is too low
    TooExpensive,
    /// Not in the catalog
    Unknown,
}

/// Select an owned skin, or buy then select one the player can afford
pub fn choose_skin<P: PlayerStore + ?Sized>(store: &mut P, id: &str) -> SkinChoice {
    let Some(skin) = CATALOG.iter().find(|s| s.id == id) else {
        log::warn!("Unknown skin '{}'", id);
        return SkinChoice::Unknown;
    };

    if store.owned_skins().contains(skin.id) {
        store.select_skin(skin.id);
        return SkinChoice::Selected;
    }

    if store.currency() < u64::from(skin.price) {
        log::debug!(
            "Cannot afford '{}' ({} < {})",
            skin.id,
            store.currency(),
            skin.price
        );
        return SkinChoice::TooExpensive;
    }

    store.add_currency(-i64::from(skin.price));
    store.purchase_skin(skin.id);
    store.select_skin(skin.id);
    log::info!("Purchased skin '{}' for {}", skin.id, skin.price);
    SkinChoice::Purchased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::player::PlayerRepository;

    #[test]
    fn test_unknown_id_falls_back_to_default() {
        assert_eq!(find_by_id("missing").id, DEFAULT_SKIN_ID);
        assert_eq!(find_by_id("green").name, "Green GameBoy");
    }

    #[test]
    fn test_choose_owned_skin_selects_without_charge() {
        let mut repo = PlayerRepository::open(MemoryStore::default());
        let before = repo.currency();
        assert_eq!(choose_skin(&mut repo, DEFAULT_SKIN_ID), SkinChoice::Selected);
        assert_eq!(repo.currency(), before);
    }

    #[test]
    fn test_choose_unaffordable_skin_is_noop() {
        let mut repo = PlayerRepository::open(MemoryStore::default());
        assert_eq!(choose_skin(&mut repo, "cyber"), SkinChoice::TooExpensive);
        assert_eq!(repo.selected_skin(), DEFAULT_SKIN_ID);
        assert!(!repo.owned_skins().contains("cyber"));
    }

    #[test]
    fn test_choose_affordable_skin_purchases() {
        let mut repo = PlayerRepository::open(MemoryStore::default());
        repo.add_currency(400);
        let before = repo.currency();
        assert_eq!(choose_skin(&mut repo, "red"), SkinChoice::Purchased);
        assert_eq!(repo.currency(), before - 320);
        assert_eq!(repo.selected_skin(), "red");
        assert!(repo.owned_skins().contains("red"));

        // Second choice is free
        assert_eq!(choose_skin(&mut repo, "red"), SkinChoice::Selected);
        assert_eq!(repo.currency(), before - 320);
    }

    #[test]
    fn test_choose_unknown_skin() {
        let mut repo = PlayerRepository::open(MemoryStore::default());
        assert_eq!(choose_skin(&mut repo, "gold"), SkinChoice::Unknown);
    }
}
