//! Item shop: prices and purchase validation
//!
//! Buying spends points directly (it is not an award, so the win streak is
//! untouched) and then hands the item to [`ProgressionEngine::acquire_item`].

use tracing::debug;

use crate::domain::{ConsumableKind, ItemKind, PlayerState};
use crate::progression::{Applied, ProgressionEngine};

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub item: ItemKind,
    pub price: u64,
    pub description: &'static str,
}

/// Everything for sale, in display order
pub static CATALOG: &[ShopItem] = &[
    ShopItem {
        item: ItemKind::CompanionEgg,
        price: 15,
        description: "Hatches into a companion that grows with every win",
    },
    ShopItem {
        item: ItemKind::PermanentBonus,
        price: 10,
        description: "+1 point on every award, forever",
    },
    ShopItem {
        item: ItemKind::Consumable(ConsumableKind::Hint),
        price: 8,
        description: "Reveals a letter or narrows a guess",
    },
    ShopItem {
        item: ItemKind::Consumable(ConsumableKind::CodeHint),
        price: 8,
        description: "Reveals one digit of the secret code",
    },
    ShopItem {
        item: ItemKind::Consumable(ConsumableKind::Retry),
        price: 12,
        description: "One extra attempt after a loss",
    },
    ShopItem {
        item: ItemKind::Consumable(ConsumableKind::CompanionBoost),
        price: 10,
        description: "+10 companion XP",
    },
];

impl ShopItem {
    pub fn find(item: ItemKind) -> Option<&'static ShopItem> {
        CATALOG.iter().find(|entry| entry.item == item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    #[error("{item} costs {price} points, you have {available}")]
    InsufficientPoints {
        item: ItemKind,
        price: u64,
        available: u64,
    },

    #[error("you already own the {0}")]
    AlreadyOwned(ItemKind),

    #[error("{0} is not for sale")]
    NotForSale(ItemKind),
}

/// Whether the player already holds a unique item
fn owns(state: &PlayerState, item: ItemKind) -> bool {
    match item {
        ItemKind::PermanentBonus => state.profile.has_permanent_bonus,
        ItemKind::CompanionEgg => state.profile.companion_stage.is_owned(),
        ItemKind::Consumable(_) => false,
    }
}

/// Buy one unit of `item`
pub fn purchase(
    engine: &ProgressionEngine,
    state: &PlayerState,
    item: ItemKind,
) -> Result<Applied, ShopError> {
    let entry = ShopItem::find(item).ok_or(ShopError::NotForSale(item))?;

    if item.is_unique() && owns(state, item) {
        return Err(ShopError::AlreadyOwned(item));
    }
    if state.profile.points < entry.price {
        return Err(ShopError::InsufficientPoints {
            item,
            price: entry.price,
            available: state.profile.points,
        });
    }

    let mut paid = state.clone();
    paid.profile.points -= entry.price;
    debug!(player = %paid.profile.name, %item, price = entry.price, "purchase");

    Ok(engine.acquire_item(&paid, item, 1))
}
