//! Pose actor and director harness
//!
//! The actor produces plausible tracked body samples from a small set of
//! scripted controls (yaw rate, hand posture); the harness ticks a
//! seeded director against it at a fixed rate and keeps enough
//! bookkeeping (largest per-tick camera step, side flips) for scenario
//! assertions.

use glam::{Quat, Vec3};

use vantage_core::{BodySample, CameraConfig, Pose};
use vantage_director::{CameraFrame, Director, Side};

/// Fixed simulation tick, roughly a tracking frame.
pub const TICK: f32 = 1.0 / 60.0;

/// What the actor's hands are doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandPosture {
    /// Hanging near the hips, pointing forward.
    Relaxed,
    /// Two-handed forward grip, rear hand at the cheek.
    Grip,
    /// Both controllers lost tracking.
    Untracked,
}

/// A scripted standing wearer.
#[derive(Debug, Clone)]
pub struct PoseActor {
    head_height: f32,
    yaw: f32,
    yaw_rate: f32,
    posture: HandPosture,
}

impl PoseActor {
    pub fn standing(head_height: f32) -> Self {
        PoseActor {
            head_height,
            yaw: 0.0,
            yaw_rate: 0.0,
            posture: HandPosture::Relaxed,
        }
    }

    /// Continuous head turn in radians per second. Positive turns toward
    /// the wearer's right.
    pub fn set_yaw_rate(&mut self, rate: f32) {
        self.yaw_rate = rate;
    }

    pub fn set_posture(&mut self, posture: HandPosture) {
        self.posture = posture;
    }

    pub fn advance(&mut self, dt: f32) {
        self.yaw += self.yaw_rate * dt;
    }

    /// The current tick's tracked body snapshot.
    pub fn sample(&self) -> BodySample {
        let h = self.head_height;
        let rotation = Quat::from_rotation_y(self.yaw);
        let head = Pose::new(Vec3::new(0.0, h, 0.0), rotation);
        let waist = Pose::new(Vec3::new(0.0, h * 0.55, 0.0), rotation);

        let (left_hand, right_hand) = match self.posture {
            HandPosture::Relaxed => (
                Some(Pose::new(
                    head.transform_point(Vec3::new(-0.25, -h * 0.5, 0.2)),
                    rotation,
                )),
                Some(Pose::new(
                    head.transform_point(Vec3::new(0.25, -h * 0.5, 0.2)),
                    rotation,
                )),
            ),
            HandPosture::Grip => (
                Some(Pose::new(
                    head.transform_point(Vec3::new(-0.02, -0.15, 0.6)),
                    rotation,
                )),
                Some(Pose::new(
                    head.transform_point(Vec3::new(0.02, -0.15, 0.2)),
                    rotation,
                )),
            ),
            HandPosture::Untracked => (None, None),
        };

        let eye = Vec3::new(0.032, -0.05, 0.05);
        BodySample {
            head,
            waist,
            left_hand,
            right_hand,
            left_eye: head.transform_point(Vec3::new(-eye.x, eye.y, eye.z)),
            right_eye: head.transform_point(eye),
        }
    }
}

/// Fixed-rate end-to-end harness around a seeded [`Director`].
pub struct DirectorHarness {
    pub director: Director,
    pub actor: PoseActor,
    max_step: f32,
    last_position: Option<Vec3>,
    last_side: Side,
    side_flips: u32,
}

impl DirectorHarness {
    pub fn new(config: CameraConfig, seed: u64) -> Self {
        let director = Director::with_seed(config, seed);
        let last_side = director.side();
        DirectorHarness {
            director,
            actor: PoseActor::standing(1.7),
            max_step: 0.0,
            last_position: None,
            last_side,
            side_flips: 0,
        }
    }

    /// Largest per-tick camera displacement observed so far.
    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// How many times the lateral side has committed a flip.
    pub fn side_flips(&self) -> u32 {
        self.side_flips
    }

    pub fn step(&mut self) -> CameraFrame {
        self.actor.advance(TICK);
        let frame = self.director.update(&self.actor.sample(), TICK);

        if let Some(last) = self.last_position {
            self.max_step = self.max_step.max(frame.position.distance(last));
        }
        self.last_position = Some(frame.position);

        let side = self.director.side();
        if side != self.last_side {
            self.side_flips += 1;
            self.last_side = side;
        }
        frame
    }

    /// Run for roughly `seconds` of simulated time; returns the last
    /// frame.
    pub fn run(&mut self, seconds: f32) -> CameraFrame {
        let ticks = ((seconds / TICK).round() as u64).max(1);
        let mut frame = self.step();
        for _ in 1..ticks {
            frame = self.step();
        }
        frame
    }
}
