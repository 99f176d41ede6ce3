// Tick and timing
/// Frames the session waits after a consumed turn before the next actor moves.
pub const ACTION_DELAY_TICKS: u32 = 30;
pub const FRAME_INTERVAL_MS: u64 = 33;
pub const INTRO_ANIMATION_TICKS: u32 = 45;
pub const FLOATING_TEXT_TICKS: u32 = 40;
pub const HIT_ANIMATION_TICKS: u32 = 12;
pub const SPELL_ANIMATION_TICKS: u32 = 20;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 8;
pub const COMBAT_LOG_VISIBLE: usize = 6;

// Character attributes
pub const BASE_ATTRIBUTE_VALUE: i32 = 10;
pub const NUM_ATTRIBUTES: usize = 6;
pub const BASE_ARMOR_CLASS: i32 = 10;

// Load-boundary limits for character files
pub const MAX_CHARACTER_LEVEL: u32 = 100;
pub const MIN_ATTRIBUTE_SCORE: i32 = 1;
pub const MAX_ATTRIBUTE_SCORE: i32 = 100;
/// Largest attribute or armor bonus a single equipped item may carry, either sign.
pub const MAX_ITEM_BONUS: i32 = 50;
pub const MAX_WEAPON_DAMAGE: u32 = 1000;

// Derived pools: max = BASE + (level - 1) * PER_LEVEL + modifier * PER_MOD
pub const BASE_PLAYER_HP: u32 = 100;
pub const HP_PER_LEVEL: u32 = 10;
pub const HP_PER_CON_MODIFIER: i32 = 5;
pub const BASE_PLAYER_MANA: u32 = 20;
pub const MANA_PER_LEVEL: u32 = 5;
pub const MANA_PER_INT_MODIFIER: i32 = 3;

// Hit resolution
pub const BASE_HIT_CHANCE: i32 = 75;
pub const MIN_HIT_CHANCE: i32 = 5;
pub const MAX_HIT_CHANCE: i32 = 100;
pub const ARMOR_CLASS_PENALTY_FACTOR: i32 = 2;

// Critical hits
pub const PHYSICAL_CRIT_BASE: i32 = 5;
pub const PHYSICAL_CRIT_FLOOR: i32 = 5;
pub const SPELL_CRIT_FLOOR: i32 = 3;
pub const CRIT_MULTIPLIER: f64 = 1.5;

// Physical damage ranges (min, max)
pub const PLAYER_UNARMED_DAMAGE: (u32, u32) = (6, 14);
pub const ENEMY_ATTACK_DAMAGE: (u32, u32) = (8, 18);

// Status effect tick damage (min, max)
pub const BURN_TICK_DAMAGE: (u32, u32) = (3, 8);
pub const POISON_TICK_DAMAGE: (u32, u32) = (2, 5);

// Escape
pub const BASE_ESCAPE_CHANCE: i32 = 60;
pub const ESCAPE_CHANCE_PER_DEX: i32 = 3;
pub const MIN_ESCAPE_CHANCE: i32 = 25;
pub const MAX_ESCAPE_CHANCE: i32 = 90;

// Difficulty
pub const MIN_DIFFICULTY_LEVEL: u32 = 1;
pub const MAX_DIFFICULTY_LEVEL: u32 = 25;
pub const MIN_DIFFICULTY_MULTIPLIER: f64 = 0.1;
pub const MAX_DIFFICULTY_MULTIPLIER: f64 = 3.0;

// Enemy hit point scaling: hp_base + (level - 1) * STEP + uniform(VARIANCE)
pub const ENEMY_HP_PER_LEVEL: i64 = 12;
pub const ENEMY_HP_VARIANCE: (i64, i64) = (-10, 15);
pub const BOSS_HP_PER_LEVEL: i64 = 30;
pub const BOSS_HP_VARIANCE: (i64, i64) = (-30, 50);

// Spell unlocks by character level (tier 1, 2, 3)
pub const SPELL_TIER_UNLOCK_LEVELS: [u32; 3] = [1, 3, 5];

// Consumables: known restore amounts, anything else restores the default
pub const DEFAULT_POTION_RESTORE: u32 = 25;
pub const CONSUMABLE_RESTORE_AMOUNTS: &[(&str, u32)] = &[
    ("Minor Health Potion", 20),
    ("Health Potion", 35),
    ("Greater Health Potion", 60),
    ("Minor Mana Potion", 10),
    ("Mana Potion", 20),
    ("Greater Mana Potion", 35),
    ("Restore Tonic", 50),
];
pub const DRAIN_HEAL_DIVISOR: u32 = 2;

// Screen shake magnitudes
pub const SHAKE_ON_HIT: u32 = 1;
pub const SHAKE_ON_CRIT: u32 = 3;

// Character record schema
pub const CHARACTER_RECORD_VERSION: u32 = 2;
