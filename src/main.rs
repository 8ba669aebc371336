//! Ghost Path headless demo
//!
//! Drives the recorder with a scripted, seeded walker so the record, preview,
//! commit and undo flows can be watched in the log (`RUST_LOG=debug`).
//!
//! Usage: `ghost-path [settings.json] [seed]`

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ghost_path::consts::*;
use ghost_path::platform::{ButtonTracker, SharedPose, resolve_pose_source};
use ghost_path::renderer::StripRenderer;
use ghost_path::renderer::shapes::debug_overlay;
use ghost_path::renderer::vertex::as_bytes;
use ghost_path::sim::{AgentPose, EdgeColliderSet, Facing, PathRecorder, TickInput};
use ghost_path::{RecorderError, RecorderSettings};

/// Agent foot probe radius
const FOOT_RADIUS: f32 = 0.25;
/// Walking speed in units per second
const WALK_SPEED: f32 = 4.0;

/// One scripted step: hold these buttons for this many frames
struct Step {
    frames: u32,
    primary: bool,
    secondary: bool,
    walk: f32,
}

const fn step(frames: u32, primary: bool, secondary: bool, walk: f32) -> Step {
    Step {
        frames,
        primary,
        secondary,
        walk,
    }
}

/// Record a stroke, place it twice, undo with a double-press, record again
const SCRIPT: &[Step] = &[
    step(60, true, false, 1.0),
    step(10, false, false, 0.0),
    step(20, false, true, 0.5),
    step(40, false, false, 1.0),
    step(20, false, true, 0.0),
    step(3, false, false, 0.0),
    step(2, false, true, 0.0),
    step(30, false, false, -1.0),
    step(20, false, true, -0.5),
    step(40, true, false, -1.0),
    step(10, false, false, 0.0),
];

fn load_settings(path: Option<&str>) -> Result<RecorderSettings, RecorderError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| RecorderError::Settings(format!("{path}: {e}")))?;
            let settings = RecorderSettings::from_json(&json)?;
            log::info!("Loaded settings from {}", path);
            Ok(settings)
        }
        None => {
            log::info!("Using default settings");
            Ok(RecorderSettings::default())
        }
    }
}

/// Move the host agent, with a little vertical wobble so paths have shape
fn walk(host: &SharedPose, colliders: &EdgeColliderSet, direction: f32, dt: f32, rng: &mut Pcg32) {
    let mut agent = host.get();
    // Walking direction doubles as the sprite's horizontal scale
    if direction != 0.0 {
        agent.facing = Facing::from_scale_x(direction);
    }
    let bob: f32 = rng.random_range(-1.0..1.0);
    agent.position += Vec3::new(direction * WALK_SPEED * dt, bob * 0.05, 0.0);
    let contact = colliders.ground_contact(agent.position, FOOT_RADIUS);
    if contact.hit {
        agent.position += (contact.normal * contact.penetration).extend(0.0);
    }
    host.set(agent);
}

/// Keep edges from frames that ran no substep
fn merge_edges(carried: TickInput, edges: TickInput) -> TickInput {
    TickInput {
        primary_pressed: carried.primary_pressed || edges.primary_pressed,
        primary_released: carried.primary_released || edges.primary_released,
        secondary_pressed: carried.secondary_pressed || edges.secondary_pressed,
        secondary_released: carried.secondary_released || edges.secondary_released,
        secondary_held: edges.secondary_held,
    }
}

fn main() {
    env_logger::init();
    log::info!("Ghost Path (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings = match load_settings(args.get(1).map(String::as_str)) {
        Ok(s) => s,
        Err(e) => {
            e.report();
            std::process::exit(2);
        }
    };
    let seed = args
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x6057_7a7e);
    log::info!("Walker seed: {}", seed);

    let host = SharedPose::new(AgentPose::new(Vec3::ZERO, Facing::Right));
    let pose = match resolve_pose_source(None, Some(host.clone())) {
        Ok(p) => p,
        Err(_) => std::process::exit(2),
    };

    let mut recorder = PathRecorder::new(settings, pose, StripRenderer::new(), EdgeColliderSet::new());
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut primary = ButtonTracker::new();
    let mut secondary = ButtonTracker::new();
    let mut accumulator = 0.0_f32;
    let mut carried = TickInput::default();

    for s in SCRIPT {
        for _ in 0..s.frames {
            // Jittered frame time, like a real host loop
            let frame_dt = SIM_DT * rng.random_range(0.6..1.8);
            walk(&host, recorder.colliders(), s.walk, frame_dt, &mut rng);

            let edges = TickInput::from_buttons(primary.sample(s.primary), secondary.sample(s.secondary));
            carried = merge_edges(carried, edges);

            accumulator += frame_dt;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // Edges are consumed by the first substep only
                let input = std::mem::replace(
                    &mut carried,
                    TickInput {
                        secondary_held: s.secondary,
                        ..TickInput::default()
                    },
                );
                recorder.tick(&input, SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                accumulator = 0.0;
            }
        }
    }

    let frame = recorder.renderer().visible_vertices();
    let state = recorder.state();
    let overlay = debug_overlay(
        state.archive.iter().map(|e| e.path.points()).collect::<Vec<_>>().into_iter(),
        0.3,
    );
    log::info!(
        "Done after {} ticks: {} recordings ({} points), {} permanent platforms, live ghost: {}",
        state.time_ticks,
        state.archive.len(),
        state.archive.total_points(),
        state.registry.len(),
        recorder.live_ghost().is_some()
    );
    log::info!(
        "Visible strips: {} ({} bytes to upload), overlay vertices: {}, colliders: {}",
        recorder.renderer().visible_count(),
        as_bytes(&frame).len(),
        overlay.len(),
        recorder.colliders().len()
    );
}
