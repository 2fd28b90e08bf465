use std::fs;
use std::path::{Path, PathBuf};

use letterverse_blocks::Letter;
use letterverse_geom::{Direction, GridPos, Vec3};
use letterverse_portal::{Facing, Frame};
use letterverse_world::{Agent, AgentId, DimensionId};
use serde::Deserialize;

use crate::event::Event;
use crate::server::{Server, Summary};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown block '{0}'")]
    UnknownBlock(String),
    #[error("unknown agent {0}")]
    UnknownAgent(u64),
    #[error("'{0}' is not a letter")]
    NotALetter(char),
    #[error("no marker block registered")]
    NoMarker,
}

fn overworld() -> DimensionId {
    DimensionId::Overworld
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    pub id: u64,
    pub name: String,
    #[serde(default = "overworld")]
    pub dimension: DimensionId,
    pub pos: [f32; 3],
}

/// One scripted input, applied at the start of `tick`.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub tick: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Login {
        agent: u64,
    },
    Place {
        agent: Option<u64>,
        #[serde(default = "overworld")]
        dimension: DimensionId,
        pos: [i32; 3],
        block: String,
    },
    Break {
        agent: Option<u64>,
        #[serde(default = "overworld")]
        dimension: DimensionId,
        pos: [i32; 3],
    },
    Move {
        agent: u64,
        pos: [f32; 3],
        yaw: Option<f32>,
        pitch: Option<f32>,
    },
    Input {
        agent: u64,
        #[serde(default)]
        jumping: bool,
        #[serde(default)]
        sneaking: bool,
    },
    /// Place a full marker border, one block at a time.
    Frame {
        #[serde(default = "overworld")]
        dimension: DimensionId,
        anchor: [i32; 3],
        facing: Facing,
    },
    /// Place letter tiles from `start` along `direction`.
    Spell {
        #[serde(default = "overworld")]
        dimension: DimensionId,
        start: [i32; 3],
        direction: Direction,
        word: String,
    },
    Command {
        agent: Option<u64>,
        command: String,
    },
    Travel {
        agent: u64,
        target: DimensionId,
    },
    Wand {
        agent: u64,
    },
    Respawn {
        agent: u64,
        #[serde(default)]
        end_conquered: bool,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn pos([x, y, z]: [i32; 3]) -> GridPos {
    GridPos::new(x, y, z)
}

fn vec3([x, y, z]: [f32; 3]) -> Vec3 {
    Vec3::new(x, y, z)
}

impl Scenario {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Add the agents and queue every step. Nothing is queued if any step is invalid.
    pub fn install(&self, server: &mut Server) -> Result<(), ScenarioError> {
        let mut known: Vec<u64> = server.world.agents.keys().map(|a| a.0).collect();
        known.extend(self.agents.iter().map(|a| a.id));

        let mut scheduled = Vec::new();
        for step in &self.steps {
            for ev in self.expand(server, &known, &step.action)? {
                scheduled.push((step.tick, ev));
            }
        }
        for spec in &self.agents {
            let id = AgentId(spec.id);
            server
                .world
                .add_agent(Agent::new(id, spec.name.clone(), spec.dimension, vec3(spec.pos)));
        }
        for (tick, ev) in scheduled {
            server.queue.emit_at(tick, ev);
        }
        Ok(())
    }

    fn expand(&self, server: &Server, known: &[u64], action: &Action) -> Result<Vec<Event>, ScenarioError> {
        let agent = |id: u64| -> Result<AgentId, ScenarioError> {
            if known.contains(&id) {
                Ok(AgentId(id))
            } else {
                Err(ScenarioError::UnknownAgent(id))
            }
        };
        let reg = &server.world.registry;
        let events = match action {
            Action::Login { agent: a } => vec![Event::AgentLoggedIn { agent: agent(*a)? }],
            Action::Place {
                agent: a,
                dimension,
                pos: p,
                block,
            } => {
                let block = reg
                    .block_by_name(block)
                    .ok_or_else(|| ScenarioError::UnknownBlock(block.clone()))?;
                vec![Event::PlaceRequested {
                    agent: a.map(agent).transpose()?,
                    dim: *dimension,
                    pos: pos(*p),
                    block,
                }]
            }
            Action::Break {
                agent: a,
                dimension,
                pos: p,
            } => vec![Event::BreakRequested {
                agent: a.map(agent).transpose()?,
                dim: *dimension,
                pos: pos(*p),
            }],
            Action::Move {
                agent: a,
                pos: p,
                yaw,
                pitch,
            } => vec![Event::MoveRequested {
                agent: agent(*a)?,
                pos: vec3(*p),
                look: (yaw.is_some() || pitch.is_some())
                    .then(|| (yaw.unwrap_or(0.0), pitch.unwrap_or(0.0))),
            }],
            Action::Input {
                agent: a,
                jumping,
                sneaking,
            } => vec![Event::InputChanged {
                agent: agent(*a)?,
                jumping: *jumping,
                sneaking: *sneaking,
            }],
            Action::Frame {
                dimension,
                anchor,
                facing,
            } => {
                let marker = reg.marker_block().ok_or(ScenarioError::NoMarker)?;
                Frame::new(pos(*anchor), *facing)
                    .border()
                    .into_iter()
                    .map(|p| Event::PlaceRequested {
                        agent: None,
                        dim: *dimension,
                        pos: p,
                        block: marker,
                    })
                    .collect()
            }
            Action::Spell {
                dimension,
                start,
                direction,
                word,
            } => {
                let mut out = Vec::with_capacity(word.len());
                for (i, c) in word.chars().enumerate() {
                    let block = Letter::from_char(c)
                        .and_then(|l| reg.letter_block(l))
                        .ok_or(ScenarioError::NotALetter(c))?;
                    out.push(Event::PlaceRequested {
                        agent: None,
                        dim: *dimension,
                        pos: pos(*start).relative(*direction, i as i32),
                        block,
                    });
                }
                out
            }
            Action::Command { agent: a, command } => vec![Event::CommandIssued {
                agent: a.map(agent).transpose()?,
                command: command.clone(),
            }],
            Action::Travel { agent: a, target } => vec![Event::TravelRequested {
                agent: agent(*a)?,
                target: *target,
            }],
            Action::Wand { agent: a } => vec![Event::WandUsed { agent: agent(*a)? }],
            Action::Respawn {
                agent: a,
                end_conquered,
            } => vec![Event::AgentRespawned {
                agent: agent(*a)?,
                end_conquered: *end_conquered,
            }],
        };
        Ok(events)
    }

    pub fn last_tick(&self) -> u64 {
        self.steps.iter().map(|s| s.tick).max().unwrap_or(0)
    }
}

/// Install `scenario`, run it to its last step plus the configured settle time, and report.
pub fn run(server: &mut Server, scenario: &Scenario) -> Result<Summary, ScenarioError> {
    scenario.install(server)?;
    let end = scenario.last_tick() + 1 + server.cfg.settle_ticks;
    log::info!(
        target: "events",
        "running {} steps for {} agents until tick {}",
        scenario.steps.len(),
        scenario.agents.len(),
        end
    );
    server.run_until(end);
    Ok(server.summary())
}
