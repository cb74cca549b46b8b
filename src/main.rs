//! Tether - third-person camera rig demo
//!
//! Drives a camera rig headlessly: a target walks a circle through a small
//! collision world while scripted input orbits the camera, profiles switch,
//! and recoil kicks the orbit. Camera poses are logged as the run goes.

mod settings;

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tether_camera::{CameraRig, FrameInput, ProfileSet, Transition};
use tether_core::{GameTime, Transform};
use tether_physics::PhysicsWorld;

use settings::{DemoSettings, SimulationSettings};

/// Ground plus a ring of pillars the camera has to look past
fn build_world(sim: &SimulationSettings) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.create_ground(0.0);

    let pillars = 8;
    for i in 0..pillars {
        let angle = i as f32 / pillars as f32 * std::f32::consts::TAU;
        let radius = sim.path_radius + 0.9;
        let position = Vec3::new(angle.cos() * radius, 1.5, angle.sin() * radius);
        world.create_static_box(Vec3::new(0.3, 1.5, 0.3), position);
    }

    info!("Built collision world with {} colliders", world.collider_count());
    world
}

/// Target pose on its circular path, facing along the direction of travel
fn target_pose(sim: &SimulationSettings, time: f64) -> Transform {
    let angle = (time as f32) * sim.path_speed;
    let position = Vec3::new(angle.cos(), 0.0, angle.sin()) * sim.path_radius;
    let heading = Vec3::new(-angle.sin(), 0.0, angle.cos());
    let rotation = Quat::from_rotation_arc(Vec3::Z, heading);
    Transform::from_position_rotation(position, rotation)
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Tether camera demo...");

    let settings = DemoSettings::load();
    let sim = &settings.simulation;

    let profiles = match &sim.profiles_path {
        Some(path) => ProfileSet::load(path)
            .with_context(|| format!("Failed to load camera profiles from {:?}", path))?,
        None => ProfileSet::presets(),
    };
    let profile_count = profiles.profiles.len();

    let world = build_world(sim);
    let mut time = GameTime::new(settings.time.clone());
    let mut rng = StdRng::seed_from_u64(sim.seed);

    let mut rig = CameraRig::new(profiles.into_profiles());
    rig.initialize(target_pose(sim, 0.0), Some(&world))
        .context("Failed to initialize camera rig")?;

    let frame_delta = 1.0 / sim.frame_rate.max(1.0);
    for frame in 1..=sim.frames {
        time.update(frame_delta);
        if !time.advanced() {
            continue;
        }

        rig.track(target_pose(sim, time.total_time));

        if sim.switch_every > 0 && frame % sim.switch_every == 0 {
            let next = (rig.current_index() + 1) % profile_count;
            let transition = if (frame / sim.switch_every) % 2 == 0 {
                Transition::Snap
            } else {
                Transition::Blend
            };
            rig.switch_configuration(next, transition, Some(&world))?;
            info!(
                "Frame {}: switched to profile '{}' ({:?})",
                frame,
                rig.active_profile()?.name,
                transition
            );
        }

        if sim.recoil_every > 0 && frame % sim.recoil_every == 0 {
            rig.apply_recoil(Vec3::new(0.0, sim.recoil, 0.0));
        }

        let phase = time.total_time as f32;
        let jitter = sim.input_jitter.abs();
        let horizontal = (phase * 0.7).sin() * sim.input_amplitude + rng.gen_range(-jitter..=jitter);
        let vertical = (phase * 1.3).cos() * sim.input_amplitude + rng.gen_range(-jitter..=jitter);
        rig.update(FrameInput::new(horizontal, vertical, time.delta_time), Some(&world))?;

        if sim.log_every > 0 && frame % sim.log_every == 0 {
            let pose = rig.sink();
            info!(
                "Frame {}: position {:.3?} facing {:.3?} toward {:.3?}, fov {:.1}, near clip {:.3}, aim pitch {:.2}{}",
                frame,
                pose.position,
                pose.transform().forward(),
                pose.look_target,
                pose.field_of_view,
                pose.near_clip,
                rig.aim_pitch(),
                if rig.is_transitioning() { " (blending)" } else { "" }
            );
        }
    }

    info!("Finished {} frames ({:.1}s simulated)", time.frame_count, time.total_time);
    Ok(())
}
