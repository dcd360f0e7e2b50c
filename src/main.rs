//! Flight Control headless demo
//!
//! Flies both controller variants through a scripted key timeline and logs
//! where they end up. Usage: `flight-control [settings.json] [preset]`

use flight_control::audio::{AudioSink, CraftAudio};
use flight_control::sim::{
    BlinkingLight, DynamicController, DynamicCraft, FrameRunner, Key, KinematicController,
    KinematicCraft, PointMass, Pose, Transform,
};
use flight_control::{Contact, HandlingPreset, Settings};
use glam::Vec3;

/// Display frame duration for the demo (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;

/// (start second, end second, key held)
const SCRIPT: &[(f32, f32, Key)] = &[
    (0.0, 2.0, Key::W),
    (0.5, 1.0, Key::L),
    (1.0, 1.5, Key::U),
    (1.5, 2.5, Key::E),
    (2.0, 2.5, Key::RightShift),
    (2.5, 4.0, Key::LeftShift),
    (2.5, 3.0, Key::K),
];

/// Audio sink that logs instead of playing
#[derive(Debug, Default)]
struct LogSink {
    propulsion: f32,
}

impl AudioSink for LogSink {
    fn set_propulsion_volume(&mut self, volume: f32) {
        if (volume - self.propulsion).abs() > 0.05 {
            log::debug!("propulsion volume {:.2}", volume);
        }
        self.propulsion = volume;
    }

    fn play_one_shot(&mut self, point: Vec3, volume: f32) {
        log::info!("impact sound at {:?}, volume {:.3}", point, volume);
    }
}

fn held_keys(time: f32) -> Vec<Key> {
    SCRIPT
        .iter()
        .filter(|(start, end, _)| time >= *start && time < *end)
        .map(|(_, _, key)| *key)
        .collect()
}

fn main() {
    env_logger::init();
    log::info!("Flight Control (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if let Some(name) = args.next() {
        match HandlingPreset::from_str(&name) {
            Some(preset) => settings.apply_preset(preset),
            None => log::warn!("Unknown preset '{}', keeping {}", name, settings.preset.as_str()),
        }
    }
    settings.sanitize();

    let mut kinematic = KinematicCraft::new(
        KinematicController::new(settings.kinematic.clone()),
        Transform::default(),
    );
    let mut dynamic = DynamicCraft::new(
        DynamicController::new(settings.dynamic.clone()),
        PointMass::new(1.0).with_drag(0.5, 2.0),
        CraftAudio::new(settings.audio.clone(), settings.audio_seed),
        LogSink::default(),
    )
    .with_integration();
    let mut light = BlinkingLight::new(settings.light.clone());

    let mut kinematic_runner = FrameRunner::new(settings.tick_dt);
    let mut dynamic_runner = FrameRunner::new(settings.tick_dt);
    let mut light_runner = FrameRunner::new(settings.tick_dt);

    let frames = (4.0 / FRAME_DT) as u32;
    for frame in 0..frames {
        let time = frame as f32 * FRAME_DT;
        let keys = held_keys(time);
        kinematic_runner.frame(FRAME_DT, keys.as_slice(), &settings.bindings, &mut kinematic);
        dynamic_runner.frame(FRAME_DT, keys.as_slice(), &settings.bindings, &mut dynamic);
        light_runner.frame(FRAME_DT, keys.as_slice(), &settings.bindings, &mut light);

        // Pretend the craft clips the ground once it climbs past 2 units
        if frame % 60 == 0 && dynamic.position().y > 2.0 {
            let contact = Contact {
                point: dynamic.position(),
                relative_speed: dynamic.speed(),
            };
            dynamic.on_contact(&contact);
        }
    }

    let k = &kinematic.controller.state;
    log::info!(
        "kinematic: position {:?}, velocity {:?}, rates (roll {:.2}, pitch {:.2}, yaw {:.2})",
        kinematic.pose.position(),
        k.velocity,
        k.roll,
        k.pitch,
        k.yaw
    );
    log::info!(
        "dynamic: position {:?}, speed {:.2}, propulsion volume {:.2}",
        dynamic.position(),
        dynamic.speed(),
        dynamic.sink.propulsion
    );
    log::info!(
        "light: {} after {} ticks",
        if light.is_lit() { "lit" } else { "unlit" },
        light_runner.ticks()
    );
}
