use super::data::{templates_for, ThemeTemplates, ENEMY_TEMPLATES, FALLBACK_TEMPLATE};
use super::types::{EnemyInstance, EnemyTemplate, EnemyTier, WorldTheme};
use crate::core::constants::*;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Produces enemies for the current difficulty level and multiplier.
#[derive(Debug, Clone)]
pub struct EnemyScaler {
    level: u32,
    theme: WorldTheme,
    multiplier: f64,
}

impl Default for EnemyScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyScaler {
    pub fn new() -> Self {
        Self {
            level: MIN_DIFFICULTY_LEVEL,
            theme: WorldTheme::for_level(MIN_DIFFICULTY_LEVEL),
            multiplier: 1.0,
        }
    }

    pub fn difficulty_level(&self) -> u32 {
        self.level
    }

    pub fn theme(&self) -> WorldTheme {
        self.theme
    }

    pub fn difficulty_multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Clamps `level` to the supported range and picks the matching theme.
    pub fn set_difficulty_level(&mut self, level: u32) {
        self.level = level.clamp(MIN_DIFFICULTY_LEVEL, MAX_DIFFICULTY_LEVEL);
        self.theme = WorldTheme::for_level(self.level);
        debug!(level = self.level, theme = self.theme.name(), "difficulty level set");
    }

    pub fn set_difficulty_multiplier(&mut self, multiplier: f64) {
        let multiplier = if multiplier.is_nan() {
            1.0
        } else {
            multiplier
        };
        self.multiplier = multiplier.clamp(MIN_DIFFICULTY_MULTIPLIER, MAX_DIFFICULTY_MULTIPLIER);
    }

    fn theme_templates(&self) -> &'static ThemeTemplates {
        templates_for(self.theme).unwrap_or(&ENEMY_TEMPLATES[0])
    }

    /// A random enemy from the tier matching the current level.
    pub fn create_scaled_enemy<R: Rng>(&self, rng: &mut R) -> EnemyInstance {
        let tier = EnemyTier::for_level(self.level);
        let template = pick(self.theme_templates().pool(tier), rng);
        self.build(template, tier, self.theme, self.level, rng)
    }

    /// A random boss of the current theme, regardless of level.
    pub fn create_scaled_boss<R: Rng>(&self, rng: &mut R) -> EnemyInstance {
        let template = pick(self.theme_templates().pool(EnemyTier::Boss), rng);
        self.build(template, EnemyTier::Boss, self.theme, self.level, rng)
    }

    /// Finds a template whose name contains `name` (case-insensitive) in any
    /// theme or tier. Falls back to [`create_scaled_enemy`](Self::create_scaled_enemy)
    /// when nothing matches.
    pub fn create_specific_enemy<R: Rng>(
        &self,
        name: &str,
        level_override: Option<u32>,
        rng: &mut R,
    ) -> EnemyInstance {
        let needle = name.to_lowercase();
        let level = level_override
            .map(|l| l.clamp(MIN_DIFFICULTY_LEVEL, MAX_DIFFICULTY_LEVEL))
            .unwrap_or(self.level);

        for theme in ENEMY_TEMPLATES {
            for tier in EnemyTier::all() {
                if let Some(template) = theme
                    .pool(tier)
                    .iter()
                    .find(|t| t.name.to_lowercase().contains(&needle))
                {
                    return self.build(template, tier, theme.theme, level, rng);
                }
            }
        }

        debug!(name, "no enemy template matched, using a scaled enemy");
        self.create_scaled_enemy(rng)
    }

    fn build<R: Rng>(
        &self,
        template: &EnemyTemplate,
        tier: EnemyTier,
        theme: WorldTheme,
        level: u32,
        rng: &mut R,
    ) -> EnemyInstance {
        let hp = if tier == EnemyTier::Boss {
            scaled_hit_points(
                template.hp_base,
                level,
                BOSS_HP_PER_LEVEL,
                BOSS_HP_VARIANCE,
                self.multiplier,
                rng,
            )
        } else {
            scaled_hit_points(
                template.hp_base,
                level,
                ENEMY_HP_PER_LEVEL,
                ENEMY_HP_VARIANCE,
                self.multiplier,
                rng,
            )
        };

        debug!(
            name = template.name,
            tier = tier.name(),
            theme = theme.name(),
            level,
            hp,
            "enemy scaled"
        );

        EnemyInstance {
            name: template.name.to_string(),
            hit_points: hp,
            max_hit_points: hp,
            aspect: template.aspect,
            level,
            tier,
            theme,
            difficulty_multiplier: self.multiplier,
        }
    }
}

fn pick<'a, R: Rng>(pool: &'a [EnemyTemplate], rng: &mut R) -> &'a EnemyTemplate {
    pool.choose(rng).unwrap_or(&FALLBACK_TEMPLATE)
}

/// `round((hp_base + (level-1)*per_level + variance) * multiplier)`, never below 1.
pub fn scaled_hit_points<R: Rng>(
    hp_base: u32,
    level: u32,
    per_level: i64,
    variance: (i64, i64),
    multiplier: f64,
    rng: &mut R,
) -> u32 {
    let level_offset = (level.max(1) as i64 - 1) * per_level;
    let roll = rng.gen_range(variance.0..=variance.1);
    let raw = hp_base as i64 + level_offset + roll;
    ((raw as f64) * multiplier).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_defaults() {
        let scaler = EnemyScaler::new();
        assert_eq!(scaler.difficulty_level(), 1);
        assert_eq!(scaler.theme(), WorldTheme::Grassland);
        assert_eq!(scaler.difficulty_multiplier(), 1.0);
    }

    #[test]
    fn test_level_is_clamped_and_selects_theme() {
        let mut scaler = EnemyScaler::new();
        scaler.set_difficulty_level(0);
        assert_eq!(scaler.difficulty_level(), 1);
        scaler.set_difficulty_level(99);
        assert_eq!(scaler.difficulty_level(), 25);
        assert_eq!(scaler.theme(), WorldTheme::Cosmic);
        scaler.set_difficulty_level(10);
        assert_eq!(scaler.theme(), WorldTheme::Shadow);
    }

    #[test]
    fn test_multiplier_is_clamped() {
        let mut scaler = EnemyScaler::new();
        scaler.set_difficulty_multiplier(0.0);
        assert_eq!(scaler.difficulty_multiplier(), 0.1);
        scaler.set_difficulty_multiplier(7.5);
        assert_eq!(scaler.difficulty_multiplier(), 3.0);
        scaler.set_difficulty_multiplier(1.25);
        assert_eq!(scaler.difficulty_multiplier(), 1.25);
    }

    #[test]
    fn test_level_one_grassland_hp_band() {
        let scaler = EnemyScaler::new();
        let mut rng = create_test_rng();
        for _ in 0..500 {
            let enemy = scaler.create_scaled_enemy(&mut rng);
            assert_eq!(enemy.theme, WorldTheme::Grassland);
            assert_eq!(enemy.tier, EnemyTier::Basic);
            assert!(
                (50..=95).contains(&enemy.hit_points),
                "{} had {} HP",
                enemy.name,
                enemy.hit_points
            );
            assert_eq!(enemy.hit_points, enemy.max_hit_points);
        }
    }

    #[test]
    fn test_tier_follows_level() {
        let mut scaler = EnemyScaler::new();
        let mut rng = create_test_rng();
        scaler.set_difficulty_level(6);
        assert_eq!(scaler.create_scaled_enemy(&mut rng).tier, EnemyTier::Elite);
        scaler.set_difficulty_level(14);
        let enemy = scaler.create_scaled_enemy(&mut rng);
        assert_eq!(enemy.tier, EnemyTier::Ancient);
        assert_eq!(enemy.theme, WorldTheme::Elemental);
        scaler.set_difficulty_level(20);
        assert_eq!(scaler.create_scaled_enemy(&mut rng).tier, EnemyTier::Boss);
    }

    #[test]
    fn test_hit_points_never_below_one() {
        let mut scaler = EnemyScaler::new();
        scaler.set_difficulty_multiplier(0.1);
        let mut rng = create_test_rng();
        for _ in 0..200 {
            assert!(scaler.create_scaled_enemy(&mut rng).hit_points >= 1);
        }
        let mut always_low = rand::rngs::mock::StepRng::new(0, 0);
        assert_eq!(
            scaled_hit_points(1, 1, 12, (-10, -10), 1.0, &mut always_low),
            1
        );
    }

    #[test]
    fn test_boss_uses_boss_scaling() {
        let mut scaler = EnemyScaler::new();
        scaler.set_difficulty_level(5);
        let mut rng = create_test_rng();
        for _ in 0..100 {
            let boss = scaler.create_scaled_boss(&mut rng);
            assert_eq!(boss.tier, EnemyTier::Boss);
            assert_eq!(boss.theme, WorldTheme::Ice);
            // Ice bosses: 300..=320 base + 4*30, variance -30..=50
            assert!(boss.hit_points >= 300 + 120 - 30);
            assert!(boss.hit_points <= 320 + 120 + 50);
        }
    }

    #[test]
    fn test_multiplier_scales_hit_points() {
        let mut rng = create_test_rng();
        let hp = scaled_hit_points(100, 1, 12, (0, 0), 1.5, &mut rng);
        assert_eq!(hp, 150);
        let hp = scaled_hit_points(100, 3, 12, (0, 0), 1.0, &mut rng);
        assert_eq!(hp, 124);
    }

    #[test]
    fn test_specific_enemy_substring_search() {
        let scaler = EnemyScaler::new();
        let mut rng = create_test_rng();
        let enemy = scaler.create_specific_enemy("frost wyrm", None, &mut rng);
        assert_eq!(enemy.name, "Frost Wyrm");
        assert_eq!(enemy.theme, WorldTheme::Ice);
        assert_eq!(enemy.tier, EnemyTier::Ancient);
        assert_eq!(enemy.level, 1);

        let enemy = scaler.create_specific_enemy("QUEEN", Some(12), &mut rng);
        assert_eq!(enemy.name, "Winter Queen");
        assert_eq!(enemy.level, 12);
        assert_eq!(enemy.tier, EnemyTier::Boss);
    }

    #[test]
    fn test_specific_enemy_falls_back() {
        let scaler = EnemyScaler::new();
        let mut rng = create_test_rng();
        let enemy = scaler.create_specific_enemy("Nonexistent Dragon", None, &mut rng);
        assert_eq!(enemy.theme, WorldTheme::Grassland);
        assert_eq!(enemy.tier, EnemyTier::Basic);
    }
}
