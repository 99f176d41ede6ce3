//! Elemental aspects: the parsed form of identifiers like `fire_level_2`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Elemental family of an aspect. Every family owns a three-tier spell line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Earth,
    Shadow,
    Light,
    Nature,
}

impl Element {
    pub fn all() -> [Element; 7] {
        [
            Element::Fire,
            Element::Ice,
            Element::Lightning,
            Element::Earth,
            Element::Shadow,
            Element::Light,
            Element::Nature,
        ]
    }

    /// Lowercase family name as it appears in aspect identifiers.
    pub fn family(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Ice => "ice",
            Element::Lightning => "lightning",
            Element::Earth => "earth",
            Element::Shadow => "shadow",
            Element::Light => "light",
            Element::Nature => "nature",
        }
    }

    pub fn from_family(family: &str) -> Option<Element> {
        let family = family.trim().to_ascii_lowercase();
        Element::all().into_iter().find(|e| e.family() == family)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Ice => "Ice",
            Element::Lightning => "Lightning",
            Element::Earth => "Earth",
            Element::Shadow => "Shadow",
            Element::Light => "Light",
            Element::Nature => "Nature",
        }
    }
}

/// A combatant's elemental affinity plus its level suffix.
///
/// Parsing never fails: an unknown family falls back to fire and a missing
/// or malformed suffix falls back to tier 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Aspect {
    pub element: Element,
    pub tier: u32,
}

impl Aspect {
    pub fn new(element: Element, tier: u32) -> Self {
        Self {
            element,
            tier: tier.max(1),
        }
    }

    pub fn parse(identifier: &str) -> Self {
        let family = identifier.split('_').next().unwrap_or("");
        let element = Element::from_family(family).unwrap_or(Element::Fire);
        let tier = identifier
            .rsplit('_')
            .next()
            .filter(|_| identifier.contains('_'))
            .and_then(|suffix| suffix.parse::<u32>().ok())
            .unwrap_or(1);
        Self::new(element, tier)
    }

    /// Canonical identifier, e.g. `fire_level_1`.
    pub fn identifier(&self) -> String {
        format!("{}_level_{}", self.element.family(), self.tier)
    }
}

impl Default for Aspect {
    fn default() -> Self {
        Self::new(Element::Fire, 1)
    }
}

impl From<String> for Aspect {
    fn from(value: String) -> Self {
        Aspect::parse(&value)
    }
}

impl From<Aspect> for String {
    fn from(value: Aspect) -> Self {
        value.identifier()
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element.display_name(), self.tier)
    }
}
