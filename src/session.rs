//! Cross-screen session state
//!
//! One [`Session`] lives as long as the game. It carries the character
//! name, every customization selection and the player's running stats
//! between screens and levels.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ENERGY, MAX_HEALTH};
use crate::sim::state::{Cosmetics, Player};

/// Longest accepted character name
pub const MAX_NAME_LEN: usize = 19;

/// Base value of each attribute; points can't be refunded below it
pub const BASE_ATTRIBUTE: u32 = 5;
/// Spare attribute points at the start of customization
pub const SPARE_ATTRIBUTE_POINTS: u32 = 5;

pub const SUIT_NAMES: [&str; 3] = ["Standard Spacesuit", "Tactical Spacesuit", "Elite Spacesuit"];
pub const HAIRSTYLES: [&str; 5] = ["Short", "Medium", "Long", "Mohawk", "Bald"];
pub const HAIR_COLORS: [&str; 5] = ["Black", "Brown", "Blonde", "Red", "White"];
pub const BEARD_STYLES: [&str; 4] = ["None", "Stubble", "Full", "Goatee"];
pub const SKIN_TONES: [&str; 3] = ["Light", "Tan", "Dark"];
pub const EYE_COLORS: [&str; 4] = ["Blue", "Green", "Brown", "Gray"];
pub const FACE_STYLES: [&str; 3] = ["Round", "Square", "Oval"];
pub const FIGHTING_CLASSES: [&str; 3] = ["Expert Pilot", "Soldier", "Hacker"];
pub const ARMORS: [&str; 3] = ["Stealth Suit", "Combat Armor", "Power Exoskeleton"];
pub const ACCESSORIES: [&str; 3] = ["Wrist Computer", "Neural Implant", "Holographic Badge"];

const SKIN_RGBA: [[u8; 4]; 3] = [[255, 220, 177, 255], [240, 184, 130, 255], [165, 114, 90, 255]];
const HAIR_RGBA: [[u8; 4]; 5] = [
    [30, 30, 30, 255],
    [139, 69, 19, 255],
    [255, 215, 0, 255],
    [178, 34, 34, 255],
    [220, 220, 220, 255],
];

/// Advance a selection index, wrapping around `count`
#[inline]
pub fn cycle(index: usize, count: usize) -> usize {
    (index + 1) % count
}

/// Equipped weapon; faster shots do less damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    BlasterPistol,
    PlasmaRifle,
    NeuralDisruptor,
}

impl Weapon {
    pub fn name(self) -> &'static str {
        match self {
            Weapon::BlasterPistol => "Blaster Pistol",
            Weapon::PlasmaRifle => "Plasma Rifle",
            Weapon::NeuralDisruptor => "Neural Disruptor",
        }
    }

    /// Projectile speed in pixels per frame
    pub fn projectile_speed(self) -> f32 {
        match self {
            Weapon::BlasterPistol => 15.0,
            Weapon::PlasmaRifle => 12.0,
            Weapon::NeuralDisruptor => 8.0,
        }
    }

    pub fn damage(self) -> i32 {
        match self {
            Weapon::BlasterPistol => 1,
            Weapon::PlasmaRifle => 2,
            Weapon::NeuralDisruptor => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Weapon::BlasterPistol => Weapon::PlasmaRifle,
            Weapon::PlasmaRifle => Weapon::NeuralDisruptor,
            Weapon::NeuralDisruptor => Weapon::BlasterPistol,
        }
    }
}

/// Appearance selections (indices into the option tables above)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub suit: usize,
    pub hairstyle: usize,
    pub hair_color: usize,
    pub beard_style: usize,
    pub skin_tone: usize,
    pub eye_color: usize,
    pub face_style: usize,
}

/// Which attribute a `+`/`-` button targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Agility,
    Intelligence,
}

/// Class and point-buy attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub class: usize,
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    /// Unspent points
    pub spare: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            class: 0,
            strength: BASE_ATTRIBUTE,
            agility: BASE_ATTRIBUTE,
            intelligence: BASE_ATTRIBUTE,
            spare: SPARE_ATTRIBUTE_POINTS,
        }
    }
}

impl Attributes {
    fn slot(&mut self, attr: Attribute) -> &mut u32 {
        match attr {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
        }
    }

    /// Spend a spare point. Returns false if none are left.
    pub fn raise(&mut self, attr: Attribute) -> bool {
        if self.spare == 0 {
            return false;
        }
        self.spare -= 1;
        *self.slot(attr) += 1;
        true
    }

    /// Refund a point. Returns false at the base value.
    pub fn lower(&mut self, attr: Attribute) -> bool {
        let slot = self.slot(attr);
        if *slot <= BASE_ATTRIBUTE {
            return false;
        }
        *slot -= 1;
        self.spare += 1;
        true
    }
}

/// Equipment selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Weapon,
    pub armor: usize,
    pub accessory: usize,
}

/// Customization tab currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CustomizationTab {
    #[default]
    Appearance,
    Attributes,
    Equipment,
}

/// A customization option that cycles on activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomizeOption {
    Suit,
    Hairstyle,
    HairColor,
    BeardStyle,
    SkinTone,
    EyeColor,
    FaceStyle,
    FightingClass,
    Weapon,
    Armor,
    Accessory,
}

/// Everything the player chose on the creation/customization screens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub appearance: Appearance,
    pub attributes: Attributes,
    pub equipment: Equipment,
}

impl Profile {
    /// Cycle one option to its next value
    pub fn cycle(&mut self, option: CustomizeOption) {
        let a = &mut self.appearance;
        match option {
            CustomizeOption::Suit => a.suit = cycle(a.suit, SUIT_NAMES.len()),
            CustomizeOption::Hairstyle => a.hairstyle = cycle(a.hairstyle, HAIRSTYLES.len()),
            CustomizeOption::HairColor => a.hair_color = cycle(a.hair_color, HAIR_COLORS.len()),
            CustomizeOption::BeardStyle => {
                a.beard_style = cycle(a.beard_style, BEARD_STYLES.len())
            }
            CustomizeOption::SkinTone => a.skin_tone = cycle(a.skin_tone, SKIN_TONES.len()),
            CustomizeOption::EyeColor => a.eye_color = cycle(a.eye_color, EYE_COLORS.len()),
            CustomizeOption::FaceStyle => a.face_style = cycle(a.face_style, FACE_STYLES.len()),
            CustomizeOption::FightingClass => {
                self.attributes.class = cycle(self.attributes.class, FIGHTING_CLASSES.len())
            }
            CustomizeOption::Weapon => self.equipment.weapon = self.equipment.weapon.next(),
            CustomizeOption::Armor => {
                self.equipment.armor = cycle(self.equipment.armor, ARMORS.len())
            }
            CustomizeOption::Accessory => {
                self.equipment.accessory = cycle(self.equipment.accessory, ACCESSORIES.len())
            }
        }
    }

    /// Player cosmetics for gameplay (helmet on)
    pub fn cosmetics(&self) -> Cosmetics {
        let a = &self.appearance;
        Cosmetics {
            suit: a.suit,
            hairstyle: a.hairstyle,
            beard_style: a.beard_style,
            skin_color: SKIN_RGBA.get(a.skin_tone).copied().unwrap_or(SKIN_RGBA[0]),
            hair_color: HAIR_RGBA.get(a.hair_color).copied().unwrap_or(HAIR_RGBA[0]),
            helmet: true,
        }
    }
}

/// Name entry buffer for the character creation screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameInput {
    buffer: String,
}

impl NameInput {
    /// Append a typed character; non-printable or overflow input is ignored
    pub fn push(&mut self, c: char) {
        if (' '..='}').contains(&c) && self.buffer.len() < MAX_NAME_LEN {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

/// Running player stats carried between screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Health a fresh run starts with
    pub health: i32,
    pub max_health: i32,
    pub energy: i32,
    pub max_energy: i32,
    pub score: u32,
    pub currency: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            score: 0,
            currency: 0,
        }
    }
}

/// Session context threaded through every screen
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub profile: Profile,
    pub name_input: NameInput,
    pub tab: CustomizationTab,
    pub stats: Stats,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the in-level score and currency back into the session
    pub fn record_progress(&mut self, player: &Player) {
        self.stats.score = player.score;
        self.stats.currency = player.currency;
    }

    /// Reset the player for the first level of a run
    pub fn prime_fresh_run(&self, player: &mut Player) {
        player.health = self.stats.health;
        player.max_health = self.stats.max_health;
        player.energy = self.stats.energy;
        player.score = 0;
        player.currency = 0;
    }
}
