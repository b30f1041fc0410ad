//! Mode selector - the gesture-driven framing automaton
//!
//! A hysteretic state machine over the framing modes. Gestures are read
//! from the kinematic signal, guarded by the timer bank: nothing swaps
//! before the global lock elapses (except the aim gate when the
//! override flag allows it), and the side-swap sub-machine debounces on
//! the per-action timer. The only nondeterminism is the weighted draw
//! between top-down and full-body on the upward gesture, which takes an
//! injectable seeded RNG for reproducible tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use glam::Vec3;

use vantage_core::{average_hand_alignment_deg, planar_distance, BodySample, CameraConfig, TimerBank};

use crate::sampler::KinematicSignal;
use crate::strategy::{aim_gate, grip_aligned, CameraMode, Side, SideState};

/// A pending manual override: the forced mode holds until the duration
/// elapses or another override replaces it.
#[derive(Debug, Clone, Copy)]
pub struct ManualOverride {
    pub mode: CameraMode,
    pub duration: f32,
}

/// The automaton's multi-tick state. Created once per session; mutated
/// only inside the tick call.
///
/// INVARIANT: at most one mode is active; `previous` is retained until
/// the next change. The lateral side only flips when a swap commits.
#[derive(Debug, Clone, Copy)]
pub struct ModeState {
    pub mode: CameraMode,
    pub previous: CameraMode,
    pub sides: SideState,
    /// Aim currently overrides the camera.
    pub in_aim: bool,
    /// Mode to restore when the aim gate lapses.
    pub restore: CameraMode,
    pub manual: Option<ManualOverride>,
    /// Planar radius recorded when the in-flight side swap began.
    pub swap_radius: Option<f32>,
}

impl Default for ModeState {
    fn default() -> Self {
        ModeState {
            mode: CameraMode::Shoulder,
            previous: CameraMode::Shoulder,
            sides: SideState::default(),
            in_aim: false,
            restore: CameraMode::Shoulder,
            manual: None,
            swap_radius: None,
        }
    }
}

/// What the director has to do with the smoother after a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Plain mode change; the smoother glides to the new framing.
    Switched { from: CameraMode, to: CameraMode },
    /// Aim preempted; the smoother should stash its velocities.
    AimEntered { from: CameraMode },
    /// Aim released; snap back to the restored framing and resume the
    /// stashed motion.
    AimRestored { to: CameraMode },
}

pub struct ModeSelector {
    state: ModeState,
    rng: StdRng,
}

impl ModeSelector {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic selector for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        ModeSelector {
            state: ModeState::default(),
            rng,
        }
    }

    pub fn state(&self) -> &ModeState {
        &self.state
    }

    /// Force a mode for `duration` seconds. Automatic selection stays
    /// suspended until the duration elapses or another override lands.
    pub fn force_mode(
        &mut self,
        mode: CameraMode,
        duration: f32,
        timers: &mut TimerBank,
    ) -> Option<Transition> {
        self.state.manual = Some(ManualOverride { mode, duration });
        timers.reset_manual();
        debug!(%mode, duration, "manual override");
        self.set_mode(mode, timers, false)
    }

    /// Evaluate the gesture guards, in priority order, and mutate the
    /// active mode. Called at the gesture throttle rate, not every tick.
    pub fn select(
        &mut self,
        config: &CameraConfig,
        sample: &BodySample,
        signal: &KinematicSignal,
        timers: &mut TimerBank,
    ) -> Option<Transition> {
        if let Some(manual) = self.state.manual {
            if timers.manual() < manual.duration {
                return None;
            }
            self.state.manual = None;
            debug!("manual override elapsed");
        }

        let can_swap = timers.global() > config.swap_time_lock;
        let still_lateral = signal.head_radial.x.abs() < config.movement_threshold;
        let still_vertical = signal.head_radial.y.abs() < config.vertical_movement_threshold;

        // 1. Aim gate: highest priority, may preempt the swap lock.
        if !self.state.in_aim
            && !config.disable_aim_camera
            && !config.disable_first_person
            && (can_swap || config.aim_override)
            && still_vertical
            && aim_gate(config, sample, signal, config.aim_align_enter_scale)
        {
            let from = self.state.mode;
            self.state.restore = from;
            self.set_mode(CameraMode::FirstPerson, timers, true);
            self.state.in_aim = true;
            debug!(%from, "aim gate engaged");
            return Some(Transition::AimEntered { from });
        }

        // Only the alignment leg releases aim once engaged; lowered
        // hands alone do not.
        if self.state.in_aim {
            if can_swap && !grip_aligned(config, sample, signal, config.aim_align_hold_scale) {
                let to = self.state.restore;
                self.state.in_aim = false;
                self.set_mode(to, timers, false);
                debug!(%to, "aim gate released, restoring");
                return Some(Transition::AimRestored { to });
            }
            return None;
        }

        // 2. Downward gesture: inventory / looking down.
        if can_swap
            && signal.head_radial.y < -config.vertical_movement_threshold
            && self
                .hand_alignment_deg(sample, signal.head_below_point)
                .is_some_and(|deg| deg < config.down_gesture_alignment)
        {
            let to = if !config.disable_body_camera {
                CameraMode::FullBody
            } else if !config.disable_first_person {
                CameraMode::FirstPerson
            } else {
                return None;
            };
            debug!(%to, "downward gesture");
            return self.set_mode(to, timers, false).map(|t| self.log_switch(t));
        }

        // 3. Upward gesture: weighted draw so the pick is not mechanical.
        if can_swap
            && !(config.disable_top_camera && config.disable_body_camera)
            && signal.head_radial.y > config.vertical_movement_threshold
            && self
                .hand_alignment_deg(sample, signal.head_above_point)
                .is_some_and(|deg| deg < config.up_gesture_alignment)
        {
            let draw: u8 = self.rng.gen_range(0..100);
            let to = if (draw > config.top_down_weight && !config.disable_top_camera)
                || config.disable_body_camera
            {
                CameraMode::TopDown
            } else {
                CameraMode::FullBody
            };
            debug!(%to, draw, "upward gesture");
            return self.set_mode(to, timers, false).map(|t| self.log_switch(t));
        }

        // 4. Lateral gesture: looking side to side, action is ahead.
        if can_swap
            && !still_lateral
            && self
                .hand_alignment_deg(sample, signal.head_forward_point)
                .is_some_and(|deg| deg < config.lateral_gesture_alignment)
        {
            debug!("lateral gesture");
            return self
                .set_mode(CameraMode::Shoulder, timers, false)
                .map(|t| self.log_switch(t));
        }

        None
    }

    /// The side-swap sub-machine. Runs every tick for the mirrored
    /// framings; `camera_position` and `anchor` fix the arc radius at
    /// the moment the swap begins.
    pub fn step_side_swap(
        &mut self,
        config: &CameraConfig,
        signal: &KinematicSignal,
        timers: &mut TimerBank,
        camera_position: Vec3,
        anchor: Vec3,
    ) {
        let (sensitivity, positioning_time) = match self.state.mode {
            CameraMode::Shoulder => (config.shoulder_sensitivity, config.shoulder_positioning_time),
            CameraMode::FullBody => (config.body_sensitivity, config.body_positioning_time),
            _ => return,
        };

        let sides = &mut self.state.sides;
        if !sides.swapping {
            let estimated = Side::from_lateral(signal.head_radial.x);
            if estimated != sides.side
                && signal.head_radial.x.abs() > sensitivity
                && timers.action() > positioning_time
            {
                sides.swapping = true;
                sides.pending = estimated;
                self.state.swap_radius = Some(
                    planar_distance(camera_position, anchor)
                        .max(config.minimum_camera_distance),
                );
                timers.reset_action();
                debug!(?estimated, "swapping sides");
            }
        } else if timers.action() > positioning_time {
            sides.side = sides.pending;
            sides.swapping = false;
            self.state.swap_radius = None;
            timers.reset_action();
            debug!(side = ?sides.side, "side swap committed");
        }
    }

    fn hand_alignment_deg(&self, sample: &BodySample, target: Vec3) -> Option<f32> {
        let (Some(left), Some(right)) = (sample.left_hand, sample.right_hand) else {
            return None;
        };
        Some(average_hand_alignment_deg(
            right.position,
            right.forward(),
            left.position,
            left.forward(),
            target,
        ))
    }

    fn log_switch(&self, transition: Transition) -> Transition {
        if let Transition::Switched { from, to } = transition {
            debug!(%from, %to, "framing mode switched");
        }
        transition
    }

    /// Change the active mode, resetting the hysteresis timers. A switch
    /// cancels any in-flight side swap without committing the side.
    fn set_mode(
        &mut self,
        mode: CameraMode,
        timers: &mut TimerBank,
        into_aim: bool,
    ) -> Option<Transition> {
        if self.state.mode == mode {
            return None;
        }
        let from = self.state.mode;
        self.state.previous = from;
        self.state.mode = mode;
        self.state.in_aim = into_aim;
        if self.state.sides.swapping {
            self.state.sides.swapping = false;
            self.state.sides.pending = self.state.sides.side;
            self.state.swap_radius = None;
        }
        timers.reset_global();
        timers.reset_action();
        Some(Transition::Switched { from, to: mode })
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new()
    }
}
