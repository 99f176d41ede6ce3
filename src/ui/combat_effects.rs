use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use skirmish::combat::{AnimationKind, Anchor, AudioCue, EffectsBus, LogColor, TextKind};
use skirmish::core::constants::FLOATING_TEXT_TICKS;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct VisualEffect {
    pub anchor: Anchor,
    pub effect_type: EffectType,
    pub lifetime: u32,
    pub max_lifetime: u32,
}

#[derive(Debug, Clone)]
pub enum EffectType {
    FloatingText { text: String, kind: TextKind },
    Animation(AnimationKind),
}

impl VisualEffect {
    pub fn new(anchor: Anchor, effect_type: EffectType, max_lifetime: u32) -> Self {
        Self {
            anchor,
            effect_type,
            lifetime: 0,
            max_lifetime,
        }
    }

    pub fn update(&mut self) -> bool {
        self.lifetime += 1;
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.lifetime <= self.max_lifetime
    }

    fn progress(&self) -> f64 {
        self.lifetime as f64 / self.max_lifetime.max(1) as f64
    }

    pub fn render(&self) -> Option<Line<'static>> {
        match &self.effect_type {
            EffectType::FloatingText { text, kind } => {
                if self.progress() > 0.8 {
                    // Fade out
                    return None;
                }
                let style = match kind {
                    TextKind::Critical => Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                    TextKind::Damage => Style::default().fg(Color::White),
                    TextKind::Heal => Style::default().fg(Color::Green),
                    TextKind::Mana => Style::default().fg(Color::Blue),
                    TextKind::Miss => Style::default().fg(Color::DarkGray),
                    TextKind::Status => Style::default().fg(Color::Magenta),
                };
                Some(Line::from(Span::styled(text.clone(), style)))
            }
            EffectType::Animation(kind) => {
                let frame = (self.lifetime / 3) as usize % 3;
                let (glyphs, color) = match kind {
                    AnimationKind::Intro => (["~ ~ ~", "~~ ~~", "~~~~~"], Color::Cyan),
                    AnimationKind::Slash => (["/", "//", "///"], Color::Yellow),
                    AnimationKind::Spell => (["*", "* *", "*~*~*"], Color::LightMagenta),
                    AnimationKind::Hit => (["*!@#", "@#$%", "#$%!"], Color::Red),
                    AnimationKind::Heal => (["+", "+ +", "+ + +"], Color::Green),
                    AnimationKind::Flee => ([">", ">>", ">>>"], Color::Gray),
                };
                Some(Line::from(Span::styled(glyphs[frame], Style::default().fg(color))))
            }
        }
    }
}

/// Effects bus for the terminal: keeps transient effects alive for a number
/// of frames and turns a few cues into a terminal bell.
#[derive(Debug, Default)]
pub struct TerminalEffects {
    effects: Vec<VisualEffect>,
    shake: u32,
    bell: bool,
}

impl TerminalEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered lines for everything attached to `anchor`, oldest first.
    pub fn lines_at(&self, anchor: Anchor) -> Vec<Line<'static>> {
        self.effects
            .iter()
            .filter(|e| e.anchor == anchor)
            .filter_map(|e| e.render())
            .collect()
    }

    /// Horizontal offset applied to the arena while shaking.
    pub fn shake_offset(&self) -> u16 {
        if self.shake == 0 {
            0
        } else {
            (self.shake % 2) as u16 + 1
        }
    }

    /// Returns and resets the pending bell.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    pub fn active_count(&self) -> usize {
        self.effects.len()
    }
}

impl EffectsBus for TerminalEffects {
    fn floating_text(&mut self, anchor: Anchor, text: String, kind: TextKind) {
        self.effects.push(VisualEffect::new(
            anchor,
            EffectType::FloatingText { text, kind },
            FLOATING_TEXT_TICKS,
        ));
    }

    fn animation(&mut self, anchor: Anchor, kind: AnimationKind, duration_ticks: u32) {
        self.effects.push(VisualEffect::new(
            anchor,
            EffectType::Animation(kind),
            duration_ticks,
        ));
    }

    fn screen_shake(&mut self, magnitude: u32) {
        self.shake = self.shake.max(magnitude * 4);
    }

    fn audio_cue(&mut self, cue: AudioCue) {
        trace!(cue = cue.name(), "audio cue");
        if matches!(
            cue,
            AudioCue::CriticalHit | AudioCue::Victory | AudioCue::Defeat
        ) {
            self.bell = true;
        }
    }

    fn append_log(&mut self, message: &str, color: LogColor) {
        trace!(?color, message, "combat log");
    }

    fn tick(&mut self) {
        self.effects.retain_mut(|e| e.update());
        self.shake = self.shake.saturating_sub(1);
    }

    fn clear(&mut self) {
        self.effects.clear();
        self.shake = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_update() {
        let mut effect = VisualEffect::new(Anchor::Enemy, EffectType::Animation(AnimationKind::Slash), 2);
        assert!(effect.update()); // Still active
        assert!(effect.update()); // Last frame
        assert!(!effect.update()); // Done
    }

    #[test]
    fn test_floating_text_fades() {
        let mut effect = VisualEffect::new(
            Anchor::Player,
            EffectType::FloatingText {
                text: "-12".to_string(),
                kind: TextKind::Damage,
            },
            10,
        );
        assert!(effect.render().is_some());
        for _ in 0..9 {
            effect.update();
        }
        assert!(effect.render().is_none());
    }

    #[test]
    fn test_bus_expires_effects_on_tick() {
        let mut bus = TerminalEffects::new();
        bus.animation(Anchor::Center, AnimationKind::Intro, 1);
        bus.floating_text(Anchor::Enemy, "Miss".to_string(), TextKind::Miss);
        bus.tick();
        assert_eq!(bus.active_count(), 2);
        bus.tick();
        assert_eq!(bus.active_count(), 1);
        assert_eq!(bus.lines_at(Anchor::Enemy).len(), 1);
        bus.clear();
        assert_eq!(bus.active_count(), 0);
    }

    #[test]
    fn test_victory_rings_bell_once() {
        let mut bus = TerminalEffects::new();
        bus.audio_cue(AudioCue::Hit);
        assert!(!bus.take_bell());
        bus.audio_cue(AudioCue::Victory);
        assert!(bus.take_bell());
        assert!(!bus.take_bell());
    }

    #[test]
    fn test_shake_decays() {
        let mut bus = TerminalEffects::new();
        bus.screen_shake(1);
        assert!(bus.shake_offset() > 0);
        for _ in 0..4 {
            bus.tick();
        }
        assert_eq!(bus.shake_offset(), 0);
    }
}
