//! Enemy template tables, one pool per theme and tier.

use super::types::{EnemyTemplate, EnemyTier, WorldTheme};
use crate::spells::aspect::Element::{self, Earth, Fire, Ice, Light, Lightning, Nature, Shadow};

/// Templates of one theme, grouped by tier.
#[derive(Debug, Clone, Copy)]
pub struct ThemeTemplates {
    pub theme: WorldTheme,
    pub basic: &'static [EnemyTemplate],
    pub elite: &'static [EnemyTemplate],
    pub champion: &'static [EnemyTemplate],
    pub ancient: &'static [EnemyTemplate],
    pub boss: &'static [EnemyTemplate],
}

impl ThemeTemplates {
    pub fn pool(&self, tier: EnemyTier) -> &'static [EnemyTemplate] {
        match tier {
            EnemyTier::Basic => self.basic,
            EnemyTier::Elite => self.elite,
            EnemyTier::Champion => self.champion,
            EnemyTier::Ancient => self.ancient,
            EnemyTier::Boss => self.boss,
        }
    }
}

const fn t(name: &'static str, hp_base: u32, aspect: Element) -> EnemyTemplate {
    EnemyTemplate {
        name,
        hp_base,
        aspect,
    }
}

/// Used only if a pool is ever empty.
pub const FALLBACK_TEMPLATE: EnemyTemplate = t("Wandering Brute", 70, Earth);

pub static ENEMY_TEMPLATES: &[ThemeTemplates] = &[
    ThemeTemplates {
        theme: WorldTheme::Grassland,
        basic: &[
            t("Meadow Slime", 60, Nature),
            t("Field Rat", 65, Earth),
            t("Thornback Boar", 80, Nature),
        ],
        elite: &[t("Grove Stalker", 95, Nature), t("Bramble Wolf", 100, Earth)],
        champion: &[t("Hill Ogre", 130, Earth), t("Thicket Warden", 125, Nature)],
        ancient: &[
            t("Elder Treant", 170, Nature),
            t("Stonehide Behemoth", 180, Earth),
        ],
        boss: &[t("Verdant Colossus", 260, Nature), t("Meadow Tyrant", 240, Earth)],
    },
    ThemeTemplates {
        theme: WorldTheme::Ice,
        basic: &[
            t("Frost Imp", 85, Ice),
            t("Snow Wolf", 90, Ice),
            t("Rime Crawler", 80, Ice),
        ],
        elite: &[t("Glacier Stalker", 115, Ice), t("Frostfang Yeti", 120, Ice)],
        champion: &[t("Ice Troll", 150, Ice), t("Hoarfrost Knight", 145, Ice)],
        ancient: &[t("Frost Wyrm", 200, Ice), t("Permafrost Golem", 210, Earth)],
        boss: &[t("Winter Queen", 300, Ice), t("Glacial Titan", 320, Ice)],
    },
    ThemeTemplates {
        theme: WorldTheme::Shadow,
        basic: &[
            t("Shade", 95, Shadow),
            t("Gloom Bat", 90, Shadow),
            t("Hollow Cultist", 100, Shadow),
        ],
        elite: &[t("Night Stalker", 130, Shadow), t("Wraith", 125, Shadow)],
        champion: &[t("Dread Knight", 170, Shadow), t("Shadow Weaver", 160, Shadow)],
        ancient: &[t("Void Horror", 230, Shadow), t("Lich Adept", 220, Ice)],
        boss: &[t("Lord of Shadows", 340, Shadow), t("Umbral Dragon", 360, Shadow)],
    },
    ThemeTemplates {
        theme: WorldTheme::Elemental,
        basic: &[
            t("Ember Sprite", 105, Fire),
            t("Storm Wisp", 100, Lightning),
            t("Mud Golem", 110, Earth),
        ],
        elite: &[t("Flame Elemental", 145, Fire), t("Thunder Hawk", 140, Lightning)],
        champion: &[t("Magma Brute", 190, Fire), t("Tempest Djinn", 185, Lightning)],
        ancient: &[t("Primordial Phoenix", 250, Fire), t("Earthshaker", 260, Earth)],
        boss: &[
            t("Elemental Lord", 380, Fire),
            t("Storm Sovereign", 400, Lightning),
        ],
    },
    ThemeTemplates {
        theme: WorldTheme::Cosmic,
        basic: &[
            t("Star Mote", 120, Light),
            t("Nebula Wisp", 115, Shadow),
            t("Astral Hound", 125, Light),
        ],
        elite: &[t("Comet Rider", 160, Fire), t("Void Walker", 165, Shadow)],
        champion: &[
            t("Celestial Guardian", 210, Light),
            t("Eclipse Knight", 215, Shadow),
        ],
        ancient: &[t("Star Devourer", 280, Shadow), t("Astral Seraph", 270, Light)],
        boss: &[
            t("The Cosmic Horror", 450, Shadow),
            t("Astral Emperor", 430, Light),
        ],
    },
];

/// Templates for `theme`. Every theme has an entry in [`ENEMY_TEMPLATES`].
pub fn templates_for(theme: WorldTheme) -> Option<&'static ThemeTemplates> {
    ENEMY_TEMPLATES.iter().find(|t| t.theme == theme)
}
