//! VANTAGE Director - the automatic camera engine
//!
//! One [`Director`] per tracked wearer. Each tick it samples the body
//! pose into kinematic signals, lets the gesture automaton pick a
//! framing mode (throttled, hysteretic), evaluates the active framing
//! strategy, and smooths the result into an emitted camera pose.
//!
//! The pipeline is strictly ordered:
//! 1. advance the timer bank
//! 2. sample kinematics
//! 3. gesture selection (at the configured throttle, not every tick)
//! 4. side-swap sub-machine for the mirrored framings
//! 5. evaluate the active framing
//! 6. smooth, arc-clamp, clearance-clamp, emit

pub mod sampler;
pub mod selector;
pub mod smoother;
pub mod strategy;

use glam::{Quat, Vec3};
use tracing::debug;

use vantage_core::{BodySample, CameraConfig, TimerBank};

pub use sampler::{KinematicSignal, PoseSampler};
pub use selector::{ManualOverride, ModeSelector, ModeState, Transition};
pub use smoother::{SmoothedPose, SmoothingContext, TrajectorySmoother};
pub use strategy::{
    CameraMode, FramingOutput, FramingStrategy, RotationPolicy, Side, SideState,
};

use strategy::{FirstPersonFraming, FullBodyFraming, ShoulderFraming, TopDownFraming};

/// One tick's emitted camera state.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame {
    pub position: Vec3,
    pub rotation: Quat,
    pub fov: f32,
    /// Hide only the avatar's head (in-avatar framing, head kept).
    pub hide_head: bool,
    /// Hide the whole avatar instead.
    pub hide_avatar: bool,
}

/// The per-wearer camera engine. Owns every piece of cross-tick state;
/// callers feed it body samples and read back camera frames.
pub struct Director {
    config: CameraConfig,
    sampler: PoseSampler,
    selector: ModeSelector,
    smoother: TrajectorySmoother,
    timers: TimerBank,

    shoulder: ShoulderFraming,
    full_body: FullBodyFraming,
    first_person: FirstPersonFraming,
    top_down: TopDownFraming,
}

impl Director {
    pub fn new(config: CameraConfig) -> Self {
        Self::with_selector(config, ModeSelector::new())
    }

    /// Deterministic director for reproducible runs: the only
    /// nondeterminism in the engine is the upward-gesture draw.
    pub fn with_seed(config: CameraConfig, seed: u64) -> Self {
        Self::with_selector(config, ModeSelector::seeded(seed))
    }

    fn with_selector(config: CameraConfig, selector: ModeSelector) -> Self {
        let config = config.clamped();
        let sampler = PoseSampler::new(&config);
        let smoother = TrajectorySmoother::new(&config);
        let mut director = Director {
            sampler,
            selector,
            smoother,
            timers: TimerBank::new(),
            shoulder: ShoulderFraming::new(&config),
            full_body: FullBodyFraming::new(&config),
            first_person: FirstPersonFraming::new(),
            top_down: TopDownFraming,
            config,
        };
        director.propagate_settings();
        director
    }

    /// The active framing mode.
    pub fn mode(&self) -> CameraMode {
        self.selector.state().mode
    }

    /// The aim cross-fade of the first-person framing, in [0, 1].
    pub fn aim_blend(&self) -> f32 {
        self.first_person.blend()
    }

    /// Which shoulder the mirrored framings currently sit over.
    pub fn side(&self) -> Side {
        self.selector.state().sides.side
    }

    /// True while a lateral side swap is in flight.
    pub fn swapping(&self) -> bool {
        self.selector.state().sides.swapping
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Replace the configuration. Values are clamped into their safe
    /// ranges; blend state, side state and in-flight swaps survive, so a
    /// hot-reload never kicks the camera.
    pub fn set_settings(&mut self, config: CameraConfig) {
        self.config = config.clamped();
        self.propagate_settings();
        debug!("settings applied");
    }

    fn propagate_settings(&mut self) {
        self.sampler.set_offsets(&self.config);
        self.shoulder.apply_settings(&self.config);
        self.full_body.apply_settings(&self.config);
        self.first_person.apply_settings(&self.config);
        self.top_down.apply_settings(&self.config);
    }

    /// Force a framing mode for `duration` seconds, suspending automatic
    /// selection until the duration elapses.
    pub fn force_mode(&mut self, mode: CameraMode, duration: f32) {
        self.selector.force_mode(mode, duration, &mut self.timers);
    }

    /// Consume one tick's body sample and emit the camera frame.
    pub fn update(&mut self, sample: &BodySample, dt: f32) -> CameraFrame {
        let Director {
            config,
            sampler,
            selector,
            smoother,
            timers,
            shoulder,
            full_body,
            first_person,
            top_down,
        } = self;

        timers.advance(dt);
        let signal = sampler.update(sample, dt);

        // Gesture evaluation is throttled; the kinematic references keep
        // damping every tick regardless.
        if timers.gesture() >= config.gesture_interval {
            let transition = selector.select(config, sample, &signal, timers);
            timers.reset_gesture();
            match transition {
                Some(Transition::AimEntered { .. }) => {
                    // The preempted glide resumes when aim releases.
                    smoother.stash_velocities();
                }
                Some(Transition::AimRestored { to }) => {
                    let restored: &mut dyn FramingStrategy = match to {
                        CameraMode::Shoulder => shoulder,
                        CameraMode::FullBody => full_body,
                        CameraMode::FirstPerson => first_person,
                        CameraMode::TopDown => top_down,
                    };
                    let sides = selector.state().sides;
                    let target = restored.evaluate(config, sample, &signal, &sides, dt);
                    smoother.snap(&target, true);
                }
                Some(Transition::Switched { .. }) | None => {}
            }
        }

        let state = *selector.state();
        let previous_head_relative = match state.previous {
            CameraMode::Shoulder => shoulder.head_relative(),
            CameraMode::FullBody => full_body.head_relative(),
            CameraMode::FirstPerson => first_person.head_relative(),
            CameraMode::TopDown => top_down.head_relative(),
        };

        let active: &mut dyn FramingStrategy = match state.mode {
            CameraMode::Shoulder => shoulder,
            CameraMode::FullBody => full_body,
            CameraMode::FirstPerson => first_person,
            CameraMode::TopDown => top_down,
        };

        let anchor = active.anchor(config, sample);
        if active.mirrors_side() && !state.in_aim {
            selector.step_side_swap(config, &signal, timers, smoother.position(), anchor);
        }
        let state = *selector.state();

        let target = active.evaluate(config, sample, &signal, &state.sides, dt);

        let context = SmoothingContext {
            anchor,
            head_position: sample.head.position,
            arc_radius: state
                .swap_radius
                .filter(|_| !config.linear_camera_movement),
            clearance_applies: !active.head_relative() && !previous_head_relative,
        };
        let pose = smoother.advance(config, &target, &context, dt);

        let hides = active.hides_head();
        CameraFrame {
            position: pose.position,
            rotation: pose.rotation,
            fov: pose.fov,
            hide_head: hides && !config.remove_avatar_instead_of_head,
            hide_avatar: hides && config.remove_avatar_instead_of_head,
        }
    }
}
