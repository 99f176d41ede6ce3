//! Outbound presentation events.
//!
//! The session never draws or plays anything itself. It describes what
//! happened through [`EffectsBus`] and the front end decides how to show it.
//! Every call is fire-and-forget.

use super::log::LogColor;

/// Where on screen an event is attached. The renderer maps anchors to
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Player,
    Enemy,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Damage,
    Critical,
    Heal,
    Mana,
    Miss,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Intro,
    Slash,
    Spell,
    Hit,
    Heal,
    Flee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    CombatStart,
    Hit,
    CriticalHit,
    Miss,
    SpellCast,
    Heal,
    ItemUse,
    Escape,
    Victory,
    Defeat,
}

impl AudioCue {
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::CombatStart => "combat_start",
            AudioCue::Hit => "hit",
            AudioCue::CriticalHit => "critical_hit",
            AudioCue::Miss => "miss",
            AudioCue::SpellCast => "spell_cast",
            AudioCue::Heal => "heal",
            AudioCue::ItemUse => "item_use",
            AudioCue::Escape => "escape",
            AudioCue::Victory => "victory",
            AudioCue::Defeat => "defeat",
        }
    }
}

pub trait EffectsBus {
    fn floating_text(&mut self, anchor: Anchor, text: String, kind: TextKind);

    fn animation(&mut self, anchor: Anchor, kind: AnimationKind, duration_ticks: u32);

    fn screen_shake(&mut self, magnitude: u32);

    fn audio_cue(&mut self, cue: AudioCue);

    /// Mirrors a combat log line to the presentation layer.
    fn append_log(&mut self, message: &str, color: LogColor);

    /// Advances transient timers by one frame.
    fn tick(&mut self);

    /// Drops every transient effect.
    fn clear(&mut self);
}

/// Discards everything. Used by the simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl EffectsBus for NullEffects {
    fn floating_text(&mut self, _anchor: Anchor, _text: String, _kind: TextKind) {}
    fn animation(&mut self, _anchor: Anchor, _kind: AnimationKind, _duration_ticks: u32) {}
    fn screen_shake(&mut self, _magnitude: u32) {}
    fn audio_cue(&mut self, _cue: AudioCue) {}
    fn append_log(&mut self, _message: &str, _color: LogColor) {}
    fn tick(&mut self) {}
    fn clear(&mut self) {}
}

/// One call received by a [`RecordingBus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    FloatingText(Anchor, String, TextKind),
    Animation(Anchor, AnimationKind, u32),
    ScreenShake(u32),
    Audio(AudioCue),
    Log(String, LogColor),
    Tick,
    Clear,
}

/// Keeps every call in order. Handy for asserting on what a session emitted.
#[derive(Debug, Clone, Default)]
pub struct RecordingBus {
    pub events: Vec<BusEvent>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audio_cues(&self) -> Vec<AudioCue> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Audio(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    pub fn logged(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Log(message, _) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EffectsBus for RecordingBus {
    fn floating_text(&mut self, anchor: Anchor, text: String, kind: TextKind) {
        self.events.push(BusEvent::FloatingText(anchor, text, kind));
    }

    fn animation(&mut self, anchor: Anchor, kind: AnimationKind, duration_ticks: u32) {
        self.events
            .push(BusEvent::Animation(anchor, kind, duration_ticks));
    }

    fn screen_shake(&mut self, magnitude: u32) {
        self.events.push(BusEvent::ScreenShake(magnitude));
    }

    fn audio_cue(&mut self, cue: AudioCue) {
        self.events.push(BusEvent::Audio(cue));
    }

    fn append_log(&mut self, message: &str, color: LogColor) {
        self.events.push(BusEvent::Log(message.to_string(), color));
    }

    fn tick(&mut self) {
        self.events.push(BusEvent::Tick);
    }

    fn clear(&mut self) {
        self.events.push(BusEvent::Clear);
    }
}
