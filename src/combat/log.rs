use crate::core::constants::{COMBAT_LOG_CAPACITY, COMBAT_LOG_VISIBLE};
use std::collections::VecDeque;

/// Semantic color of a log line; the renderer picks the actual palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogColor {
    Neutral,
    PlayerAction,
    EnemyAction,
    Critical,
    Heal,
    Status,
    Warning,
    Victory,
    Defeat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatLogEntry {
    pub message: String,
    pub color: LogColor,
}

/// Bounded combat log. Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct CombatLog {
    entries: VecDeque<CombatLogEntry>,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(COMBAT_LOG_CAPACITY),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, color: LogColor) {
        if self.entries.len() >= COMBAT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(CombatLogEntry {
            message: message.into(),
            color,
        });
    }

    /// Newest entries for display, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &CombatLogEntry> {
        let skip = self.entries.len().saturating_sub(COMBAT_LOG_VISIBLE);
        self.entries.iter().skip(skip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
