use super::combat_effects::TerminalEffects;
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use skirmish::character::CharacterRecord;
use skirmish::combat::{
    Action, Anchor, CombatSession, CombatStatus, LogColor, Phase, StatusEffects,
};

type Session<R> = CombatSession<TerminalEffects, R>;

/// Draws the whole combat screen: enemy panel, arena, player panel, menu
/// and log.
pub fn draw_combat_scene<R: Rng>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R>,
    player: &CharacterRecord,
) {
    let title = match session.enemy() {
        Some(enemy) => format!(" Skirmish: {} ", enemy.theme.name()),
        None => " Skirmish ".to_string(),
    };
    let combat_block = Block::default().borders(Borders::ALL).title(title);
    let inner = combat_block.inner(area);
    frame.render_widget(combat_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Enemy panel
            Constraint::Min(5),    // Arena
            Constraint::Length(6), // Player panel
            Constraint::Length(8), // Menu + log
        ])
        .split(inner);

    draw_enemy_panel(frame, chunks[0], session);
    draw_arena(frame, chunks[1], session);
    draw_player_panel(frame, chunks[2], session, player);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);
    draw_menu(frame, bottom[0], session, player);
    draw_log(frame, bottom[1], session);
}

fn hp_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn status_spans(effects: &StatusEffects) -> Vec<Span<'static>> {
    effects
        .iter()
        .map(|(effect, remaining)| {
            Span::styled(
                format!(" [{} {}]", effect.name(), remaining),
                Style::default().fg(Color::Magenta),
            )
        })
        .collect()
}

/// Draws the enemy HP bar and its status effects
fn draw_enemy_panel<R: Rng>(frame: &mut Frame, area: Rect, session: &Session<R>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(2)])
        .split(area);

    let Some(enemy) = session.enemy() else {
        let text = match session.outcome() {
            Some(_) => "The battlefield is quiet.",
            None => "Waiting for enemy...",
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )))
        .block(Block::default().borders(Borders::ALL).title("Enemy"))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let ratio = enemy.hp_ratio().clamp(0.0, 1.0);
    let title = format!(
        "{} (Lv {} {} {})",
        enemy.name,
        enemy.level,
        enemy.tier.name(),
        enemy.aspect.display_name()
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .label(format!("{}/{}", enemy.hit_points, enemy.max_hit_points))
        .ratio(ratio);
    frame.render_widget(gauge, rows[0]);

    let mut spans = status_spans(session.enemy_status());
    spans.extend(
        session
            .bus()
            .lines_at(Anchor::Enemy)
            .into_iter()
            .flat_map(|line| {
                let mut spans = vec![Span::raw("  ")];
                spans.extend(line.spans);
                spans
            }),
    );
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

/// Draws the arena with both combatants and any running animations
fn draw_arena<R: Rng>(frame: &mut Frame, area: Rect, session: &Session<R>) {
    let effects = session.bus();
    let shake = " ".repeat(effects.shake_offset() as usize);
    let enemy_sprite = if session.enemy().is_some() { "👹" } else { "" };

    let mut lines = vec![Line::from("")];
    lines.extend(effects.lines_at(Anchor::Center));
    lines.push(Line::from(vec![
        Span::raw(shake),
        Span::styled(
            "🧙",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("        "),
        Span::styled(
            enemy_sprite,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]));

    let turn_text = match session.outcome() {
        Some(CombatStatus::Victory) => Span::styled(
            "VICTORY! Press q to quit",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Some(CombatStatus::Defeat) => Span::styled(
            "DEFEAT. Press q to quit",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Some(_) => Span::styled(
            "Escaped. Press q to quit",
            Style::default().fg(Color::Yellow),
        ),
        None if session.awaiting_input() => Span::styled(
            "Your turn",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        None if session.is_player_turn() => Span::raw(""),
        None => Span::styled("Enemy turn...", Style::default().fg(Color::Red)),
    };
    lines.push(Line::from(""));
    lines.push(Line::from(turn_text));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Draws the player HP and mana bars
fn draw_player_panel<R: Rng>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R>,
    player: &CharacterRecord,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Length(2)])
        .split(area);

    let max_hp = player.max_hp().max(1);
    let hp_ratio = (player.hit_points as f64 / max_hp as f64).clamp(0.0, 1.0);
    let title = format!("{} (Lv {} {})", player.name, player.level, player.aspect.element.display_name());
    let hp_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(
            Style::default()
                .fg(hp_color(hp_ratio))
                .add_modifier(Modifier::BOLD),
        )
        .label(format!("HP: {}/{}", player.hit_points, max_hp))
        .ratio(hp_ratio);
    frame.render_widget(hp_gauge, rows[0]);

    let max_mana = player.max_mana();
    let mana_ratio = if max_mana == 0 {
        0.0
    } else {
        (player.mana as f64 / max_mana as f64).clamp(0.0, 1.0)
    };
    let mana_gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .label(format!("MP: {}/{}", player.mana, max_mana))
        .ratio(mana_ratio);
    frame.render_widget(mana_gauge, rows[1]);

    let mut spans = status_spans(session.player_status());
    for line in session.bus().lines_at(Anchor::Player) {
        spans.push(Span::raw("  "));
        spans.extend(line.spans);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[2]);
}

fn menu_line(label: String, selected: bool, enabled: bool) -> Line<'static> {
    let style = match (selected, enabled) {
        (true, _) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::White),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    let marker = if selected { "> " } else { "  " };
    Line::from(Span::styled(format!("{}{}", marker, label), style))
}

/// Draws the action menu or the open sub-menu
fn draw_menu<R: Rng>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<R>,
    player: &CharacterRecord,
) {
    let (title, lines): (&str, Vec<Line>) = match session.phase() {
        Phase::SelectAction => (
            "Actions",
            Action::ALL
                .iter()
                .enumerate()
                .map(|(i, action)| {
                    menu_line(action.label().to_string(), i == session.action_cursor(), true)
                })
                .collect(),
        ),
        Phase::SelectSpell => (
            "Spells (Esc to go back)",
            session
                .available_spells(player)
                .iter()
                .enumerate()
                .map(|(i, spell)| {
                    menu_line(
                        format!("{} ({} MP)", spell.name, spell.mana_cost),
                        i == session.spell_cursor(),
                        spell.mana_cost <= player.mana,
                    )
                })
                .collect(),
        ),
        Phase::SelectItem => (
            "Items (Esc to go back)",
            session
                .combat_items(player)
                .into_iter()
                .enumerate()
                .map(|(i, (name, quantity))| {
                    menu_line(
                        format!("{} x{}", name, quantity),
                        i == session.item_cursor(),
                        true,
                    )
                })
                .collect(),
        ),
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn log_style(color: LogColor) -> Style {
    match color {
        LogColor::Neutral => Style::default().fg(Color::White),
        LogColor::PlayerAction => Style::default().fg(Color::Cyan),
        LogColor::EnemyAction => Style::default().fg(Color::LightRed),
        LogColor::Critical => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LogColor::Heal => Style::default().fg(Color::Green),
        LogColor::Status => Style::default().fg(Color::Magenta),
        LogColor::Warning => Style::default().fg(Color::DarkGray),
        LogColor::Victory => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LogColor::Defeat => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Draws the newest combat log entries
fn draw_log<R: Rng>(frame: &mut Frame, area: Rect, session: &Session<R>) {
    let lines: Vec<Line> = session
        .log()
        .visible()
        .map(|entry| Line::from(Span::styled(entry.message.clone(), log_style(entry.color))))
        .collect();
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Combat Log"));
    frame.render_widget(paragraph, area);
}
