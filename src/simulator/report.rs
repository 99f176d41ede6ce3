//! Aggregated fight results.

use crate::combat::session::CombatStatus;
use std::collections::HashMap;

/// Outcome of one simulated fight.
#[derive(Debug, Clone, PartialEq)]
pub struct FightResult {
    pub seed: u64,
    pub enemy_name: String,
    pub enemy_max_hp: u32,
    /// `None` when the fight hit the frame limit.
    pub outcome: Option<CombatStatus>,
    pub turns: u32,
    pub player_hp_left: u32,
    pub player_max_hp: u32,
    pub potions_used: u32,
}

#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub escapes: u32,
    pub timeouts: u32,

    pub avg_turns: f64,
    pub avg_enemy_hp: f64,
    /// Average fraction of max HP left after a victory
    pub avg_hp_left_on_win: f64,
    pub avg_potions_used: f64,

    /// Defeats keyed by enemy name
    pub deadliest_enemies: HashMap<String, u32>,

    pub results: Vec<FightResult>,
}

impl SimReport {
    pub fn from_results(results: Vec<FightResult>) -> Self {
        let num_runs = results.len() as u32;
        let count = |status: CombatStatus| {
            results
                .iter()
                .filter(|r| r.outcome == Some(status))
                .count() as u32
        };
        let victories = count(CombatStatus::Victory);
        let defeats = count(CombatStatus::Defeat);
        let escapes = count(CombatStatus::Escaped);
        let timeouts = results.iter().filter(|r| r.outcome.is_none()).count() as u32;

        let runs = num_runs.max(1) as f64;
        let avg_turns = results.iter().map(|r| r.turns as f64).sum::<f64>() / runs;
        let avg_enemy_hp = results.iter().map(|r| r.enemy_max_hp as f64).sum::<f64>() / runs;
        let avg_potions_used = results.iter().map(|r| r.potions_used as f64).sum::<f64>() / runs;
        let avg_hp_left_on_win = results
            .iter()
            .filter(|r| r.outcome == Some(CombatStatus::Victory))
            .map(|r| r.player_hp_left as f64 / r.player_max_hp.max(1) as f64)
            .sum::<f64>()
            / victories.max(1) as f64;

        let mut deadliest_enemies = HashMap::new();
        for result in results
            .iter()
            .filter(|r| r.outcome == Some(CombatStatus::Defeat))
        {
            *deadliest_enemies
                .entry(result.enemy_name.clone())
                .or_insert(0) += 1;
        }

        Self {
            num_runs,
            victories,
            defeats,
            escapes,
            timeouts,
            avg_turns,
            avg_enemy_hp,
            avg_hp_left_on_win,
            avg_potions_used,
            deadliest_enemies,
            results,
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.victories as f64 / self.num_runs.max(1) as f64
    }

    /// Print a formatted report to stdout.
    pub fn print(&self) {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║                    SIMULATION RESULTS                         ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Fights:           {}", self.num_runs);
        println!(
            "Victories:        {} ({:.1}%)",
            self.victories,
            self.win_rate() * 100.0
        );
        println!("Defeats:          {}", self.defeats);
        println!("Escapes:          {}", self.escapes);
        if self.timeouts > 0 {
            println!("Timeouts:         {}", self.timeouts);
        }
        println!();
        println!("Avg turns:        {:.1}", self.avg_turns);
        println!("Avg enemy HP:     {:.1}", self.avg_enemy_hp);
        println!("Avg HP left (win): {:.0}%", self.avg_hp_left_on_win * 100.0);
        println!("Avg potions used: {:.2}", self.avg_potions_used);

        if !self.deadliest_enemies.is_empty() {
            let mut deadliest: Vec<_> = self.deadliest_enemies.iter().collect();
            deadliest.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            println!();
            println!("Deadliest enemies:");
            for (name, defeats) in deadliest.iter().take(5) {
                println!("  {:<20} {}", name, defeats);
            }
        }
    }

    /// One-line summary for `--quiet`.
    pub fn summary_line(&self) -> String {
        format!(
            "runs={} win={:.3} defeat={} escape={} timeout={} turns={:.1}",
            self.num_runs,
            self.win_rate(),
            self.defeats,
            self.escapes,
            self.timeouts,
            self.avg_turns
        )
    }
}
