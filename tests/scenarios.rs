use std::path::Path;
use std::sync::Arc;

use letterverse::{Scenario, ScenarioError, Server, ServerConfig, scenario};
use letterverse_blocks::BlockRegistry;
use letterverse_geom::Vec3;
use letterverse_world::{AgentId, DimensionId};

const ALEX: AgentId = AgentId(1);

fn quiet_config() -> ServerConfig {
    let mut cfg = ServerConfig::default();
    cfg.realm.island_chance = 0.0;
    cfg.realm.second_island_chance = 0.0;
    cfg
}

fn server(cfg: ServerConfig) -> Server {
    Server::new(cfg, Arc::new(BlockRegistry::standard()), 11)
}

fn scenario(text: &str) -> Scenario {
    Scenario::from_toml_str(text).unwrap()
}

const FRAME_AND_STEP_IN: &str = r#"
[[agents]]
id = 1
name = "alex"
pos = [20.5, 64.0, 20.5]

[[steps]]
tick = 1
action = "frame"
anchor = [0, 64, 0]
facing = "north"

[[steps]]
tick = 3
action = "move"
agent = 1
pos = [1.5, 65.0, 0.5]
"#;

#[test]
fn sample_portal_trip_runs_end_to_end() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/portal_trip.toml");
    let scn = Scenario::load_from_path(path).unwrap();
    let mut srv = server(quiet_config());
    let summary = scenario::run(&mut srv, &scn).unwrap();

    assert_eq!(summary.stat("relocations"), Some(2));
    assert_eq!(summary.stat("active_frames"), Some(2));
    assert_eq!(summary.stat("words_spelled"), Some(1));
    assert_eq!(summary.stat("wand_uses"), Some(1));
    assert_eq!(summary.commands, vec![("testportal".to_string(), 1)]);

    let alex = &summary.agents[0];
    assert_eq!(alex.dimension, DimensionId::Overworld);
    assert_eq!(alex.pos, Vec3::new(1.5, 100.0, 2.5));
    assert!(alex.inbox.contains(&"Portal type: LETTERVERSE".to_string()));

    let in_letterverse: Vec<_> = summary
        .items
        .iter()
        .filter(|(dim, _, _)| *dim == DimensionId::Letterverse)
        .collect();
    assert_eq!(in_letterverse.len(), 11);
    assert!(in_letterverse.iter().any(|(_, item, _)| item == "string"));

    let agent = srv.world.agent(ALEX).unwrap();
    assert_eq!(agent.inventory.count("letter_wand"), 1);
}

#[test]
fn disabled_letterverse_leaves_the_agent_in_place() {
    let mut cfg = quiet_config();
    cfg.letterverse_enabled = false;
    let mut srv = server(cfg);
    let summary = scenario::run(&mut srv, &scenario(FRAME_AND_STEP_IN)).unwrap();
    assert_eq!(summary.stat("relocations"), Some(0));
    let alex = &summary.agents[0];
    assert_eq!(alex.dimension, DimensionId::Overworld);
    assert_eq!(alex.pos, Vec3::new(1.5, 65.0, 0.5));
}

#[test]
fn standing_in_the_portal_relocates_once() {
    let mut srv = server(quiet_config());
    let summary = scenario::run(&mut srv, &scenario(FRAME_AND_STEP_IN)).unwrap();
    assert_eq!(summary.stat("relocations"), Some(1));
    let alex = &summary.agents[0];
    assert_eq!(alex.dimension, DimensionId::Letterverse);
    assert_eq!(alex.pos, Vec3::new(1.5, 101.0, 0.5));
}

#[test]
fn native_travel_from_a_bookshelf_portal_is_cancelled() {
    let text = format!(
        "{FRAME_AND_STEP_IN}
[[agents]]
id = 2
name = \"sam\"
pos = [30.5, 64.0, 30.5]

[[steps]]
tick = 3
action = \"travel\"
agent = 1
target = \"nether\"

[[steps]]
tick = 3
action = \"travel\"
agent = 2
target = \"nether\"
"
    );
    let mut srv = server(quiet_config());
    scenario::run(&mut srv, &scenario(&text)).unwrap();
    assert_eq!(srv.world.agent(ALEX).unwrap().dimension, DimensionId::Letterverse);
    assert_eq!(srv.world.agent(AgentId(2)).unwrap().dimension, DimensionId::Nether);
}

#[test]
fn breaking_the_frame_stops_transit() {
    let text = r#"
[[agents]]
id = 1
name = "alex"
pos = [20.5, 64.0, 20.5]

[[steps]]
tick = 1
action = "frame"
anchor = [0, 64, 0]
facing = "north"

[[steps]]
tick = 2
action = "break"
pos = [0, 64, 0]

[[steps]]
tick = 3
action = "move"
agent = 1
pos = [1.5, 65.0, 0.5]

[[steps]]
tick = 4
action = "command"
agent = 1
command = "testportal"
"#;
    let mut srv = server(quiet_config());
    let summary = scenario::run(&mut srv, &scenario(text)).unwrap();
    assert_eq!(summary.stat("relocations"), Some(0));
    assert_eq!(summary.stat("active_frames"), Some(0));
    assert!(summary.agents[0].inbox.contains(&"Not standing in a portal!".to_string()));
}

#[test]
fn login_and_respawn_hand_out_wands() {
    let text = r#"
[[agents]]
id = 1
name = "alex"
pos = [5.5, 64.0, 5.5]

[[steps]]
tick = 0
action = "login"
agent = 1

[[steps]]
tick = 1
action = "login"
agent = 1

[[steps]]
tick = 2
action = "respawn"
agent = 1

[[steps]]
tick = 3
action = "respawn"
agent = 1
end_conquered = true
"#;
    let mut srv = server(quiet_config());
    scenario::run(&mut srv, &scenario(text)).unwrap();
    let agent = srv.world.agent(ALEX).unwrap();
    assert_eq!(agent.inventory.count("letter_wand"), 2);
    assert_eq!(agent.pos, Vec3::new(0.5, 64.0, 0.5));
}

#[test]
fn jumping_in_the_letterverse_floats_up() {
    let text = r#"
[[agents]]
id = 1
name = "alex"
dimension = "letterverse"
pos = [0.5, 110.0, 0.5]

[[steps]]
tick = 0
action = "input"
agent = 1
jumping = true
"#;
    let mut srv = server(quiet_config());
    scenario::run(&mut srv, &scenario(text)).unwrap();
    let agent = srv.world.agent(ALEX).unwrap();
    assert_eq!(agent.velocity.y, 0.15);
    assert_eq!(agent.fall_distance, 0.0);
}

#[test]
fn letterverse_chunks_grow_islands() {
    let mut cfg = ServerConfig::default();
    cfg.realm.island_chance = 1.0;
    cfg.view_radius = 2;
    let text = r#"
[[agents]]
id = 1
name = "alex"
dimension = "letterverse"
pos = [0.5, 140.0, 0.5]
"#;
    let mut srv = server(cfg);
    let summary = scenario::run(&mut srv, &scenario(text)).unwrap();
    assert!(summary.stat("islands_built").unwrap() >= 25);
}

#[test]
fn unknown_agent_rejects_the_whole_scenario() {
    let text = r#"
[[steps]]
tick = 0
action = "wand"
agent = 42
"#;
    let mut srv = server(quiet_config());
    let err = scenario::run(&mut srv, &scenario(text)).unwrap_err();
    assert!(matches!(err, ScenarioError::UnknownAgent(42)));
    assert_eq!(srv.queue.pending(), 0);
}

#[test]
fn unknown_command_reports_zero() {
    let text = r#"
[[steps]]
tick = 0
action = "command"
command = "testportal"

[[steps]]
tick = 0
action = "command"
command = "fly"
"#;
    let mut srv = server(quiet_config());
    let summary = scenario::run(&mut srv, &scenario(text)).unwrap();
    assert_eq!(
        summary.commands,
        vec![("testportal".to_string(), 0), ("fly".to_string(), 0)]
    );
}
