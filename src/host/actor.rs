//! # Actors
//!
//! The player (or automation) on whose behalf a decor is placed, broken or
//! clicked.

use super::{EntityId, Item};

/// Which hand an interaction used.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandSlot {
    MAIN_HAND,
    OFF_HAND,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameMode {
    SURVIVAL,
    CREATIVE,
    ADVENTURE,
    SPECTATOR,
}

/// The acting party in placement, destruction and clicks.
pub trait Actor {
    fn name(&self) -> &str;

    /// Horizontal look direction in degrees. 0 faces south (+z), 90 west.
    fn yaw(&self) -> f32;

    fn game_mode(&self) -> GameMode;

    fn held_item(&self, slot: HandSlot) -> Option<&Item>;

    fn held_item_mut(&mut self, slot: HandSlot) -> Option<&mut Item>;

    fn set_held_item(&mut self, slot: HandSlot, item: Option<Item>);

    /// Plays the hand swing feedback.
    fn swing(&mut self, slot: HandSlot);

    /// Mounts the actor onto a seat entity.
    fn mount(&mut self, seat: EntityId);

    /// Removes one item from the stack in `slot`, emptying the slot at zero.
    fn consume_one(&mut self, slot: HandSlot) {
        let emptied = match self.held_item_mut(slot) {
            Some(item) => {
                item.amount = item.amount.saturating_sub(1);
                item.amount == 0
            }
            None => false,
        };

        if emptied {
            self.set_held_item(slot, None);
        }
    }

    /// Applies one point of durability damage to the item in `slot`.
    fn damage_held(&mut self, slot: HandSlot) {
        if let Some(item) = self.held_item_mut(slot) {
            item.damage += 1;
        }
    }
}

/// A plain actor with two hands, used by the demo runner and tests.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub yaw: f32,
    pub game_mode: GameMode,
    pub main_hand: Option<Item>,
    pub off_hand: Option<Item>,
    /// Every swing played, in order.
    pub swings: Vec<HandSlot>,
    pub mounted_on: Option<EntityId>,
}

impl Player {
    pub fn new(name: &str, yaw: f32, game_mode: GameMode) -> Self {
        Self {
            name: name.to_owned(),
            yaw,
            game_mode,
            main_hand: None,
            off_hand: None,
            swings: Vec::new(),
            mounted_on: None,
        }
    }

    pub fn holding(mut self, item: Item) -> Self {
        self.main_hand = Some(item);
        self
    }
}

impl Actor for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn game_mode(&self) -> GameMode {
        self.game_mode
    }

    fn held_item(&self, slot: HandSlot) -> Option<&Item> {
        match slot {
            HandSlot::MAIN_HAND => self.main_hand.as_ref(),
            HandSlot::OFF_HAND => self.off_hand.as_ref(),
        }
    }

    fn held_item_mut(&mut self, slot: HandSlot) -> Option<&mut Item> {
        match slot {
            HandSlot::MAIN_HAND => self.main_hand.as_mut(),
            HandSlot::OFF_HAND => self.off_hand.as_mut(),
        }
    }

    fn set_held_item(&mut self, slot: HandSlot, item: Option<Item>) {
        match slot {
            HandSlot::MAIN_HAND => self.main_hand = item,
            HandSlot::OFF_HAND => self.off_hand = item,
        }
    }

    fn swing(&mut self, slot: HandSlot) {
        self.swings.push(slot);
    }

    fn mount(&mut self, seat: EntityId) {
        self.mounted_on = Some(seat);
    }
}
