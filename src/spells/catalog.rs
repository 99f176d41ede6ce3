use super::aspect::{Aspect, Element};
use super::types::{Spell, SpellLine, SPELL_LINES};
use crate::core::constants::SPELL_TIER_UNLOCK_LEVELS;

/// Read-only lookup from aspect and character level to castable spells.
///
/// The catalog borrows a static table; cloning it is free and every session
/// can hold its own copy.
#[derive(Debug, Clone, Copy)]
pub struct SpellCatalog {
    lines: &'static [SpellLine],
}

impl Default for SpellCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl SpellCatalog {
    /// Catalog over the built-in spell lines.
    pub fn standard() -> Self {
        Self::new(SPELL_LINES)
    }

    pub fn new(lines: &'static [SpellLine]) -> Self {
        Self { lines }
    }

    fn line_for(&self, element: Element) -> Option<&'static SpellLine> {
        self.lines
            .iter()
            .find(|line| line.element == element)
            .or_else(|| self.lines.iter().find(|line| line.element == Element::Fire))
    }

    /// Spells unlocked for `aspect` at `level`, lowest tier first.
    pub fn spells_for(&self, aspect: &Aspect, level: u32) -> Vec<&'static Spell> {
        let Some(line) = self.line_for(aspect.element) else {
            return Vec::new();
        };
        line.tiers
            .iter()
            .zip(SPELL_TIER_UNLOCK_LEVELS)
            .enumerate()
            .filter(|(tier, (_, unlock))| *tier == 0 || level >= *unlock)
            .map(|(_, (spell, _))| spell)
            .collect()
    }

    /// Same as [`spells_for`](Self::spells_for) but starting from a raw aspect
    /// identifier such as `fire_level_1`.
    pub fn spells_for_aspect(&self, aspect: &str, level: u32) -> Vec<&'static Spell> {
        self.spells_for(&Aspect::parse(aspect), level)
    }
}
