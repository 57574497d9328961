//! # Sound Groups
//!
//! Named place/break sound pairs. The sound assets themselves belong to the
//! host; the engine only emits their identifiers.

/// The sounds a decor makes when placed and broken.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SoundGroup {
    pub place: &'static str,
    pub breaking: &'static str,
}

impl SoundGroup {
    pub const WOOD: SoundGroup = SoundGroup {
        place: "block.wood.place",
        breaking: "block.wood.break",
    };
    pub const STONE: SoundGroup = SoundGroup {
        place: "block.stone.place",
        breaking: "block.stone.break",
    };
    pub const GLASS: SoundGroup = SoundGroup {
        place: "block.glass.place",
        breaking: "block.glass.break",
    };
    pub const CHAIN: SoundGroup = SoundGroup {
        place: "block.chain.place",
        breaking: "block.chain.break",
    };
    pub const WOOL: SoundGroup = SoundGroup {
        place: "block.wool.place",
        breaking: "block.wool.break",
    };
    pub const ANVIL: SoundGroup = SoundGroup {
        place: "block.anvil.place",
        breaking: "block.anvil.break",
    };
    pub const METAL: SoundGroup = SoundGroup {
        place: "block.metal.place",
        breaking: "block.metal.break",
    };
}

/// Played when an actor sits down.
pub const SIT_SOUND: &str = "entity.horse.saddle";

/// Played when a wrench changes a variant.
pub const WRENCH_SOUND: &str = "item.spyglass.use";
