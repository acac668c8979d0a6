//! Scenario files: a list of players and the actions they take in order.

use anyhow::Context;
use catan_economy::{GameAction, GameConfig, GameError, GameEvent, GameState, PlayerId, PlayerStatus};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub players: Vec<String>,
    #[serde(default)]
    pub config: GameConfig,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub player: PlayerId,
    pub action: GameAction,
}

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Applied(Vec<GameEvent>),
    Rejected(GameError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub seed: u64,
    pub outcomes: Vec<Outcome>,
    pub players: Vec<PlayerStatus>,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Play every step. Rejected steps are recorded and play continues.
    pub fn run(&self) -> anyhow::Result<Report> {
        let mut game = GameState::new(self.players.clone(), &self.config)?;

        let mut outcomes = Vec::with_capacity(self.steps.len());
        for (n, step) in self.steps.iter().enumerate() {
            match game.apply_action(step.player, step.action.clone()) {
                Ok(events) => {
                    info!(step = n, player = step.player, events = events.len(), "step applied");
                    outcomes.push(Outcome::Applied(events));
                }
                Err(err) => {
                    warn!(step = n, player = step.player, error = %err, "step rejected");
                    outcomes.push(Outcome::Rejected(err));
                }
            }
        }

        Ok(Report {
            seed: game.rng_seed(),
            outcomes,
            players: game.statuses(),
        })
    }
}
