use constants::flight::{PROGRESS_STEP, TRAIL_ADMISSION_THRESHOLD};

use super::error::FlightError;
use super::motion::{MotionSampler, OrientationConfig, Pose};
use super::path::{PathModel, normalize_progress};
use super::trail::{TrailBuilder, TrailRetention};

/// Lifecycle of an [`AnimationDriver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriverPhase {
    /// Created, not yet started by the host.
    #[default]
    Idle,
    /// Ticking once per frame.
    Running,
    /// Torn down by the host. Further ticks are ignored.
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    pub progress_step: f32,
    pub admission_threshold: f32,
    pub retention: TrailRetention,
    pub orientation: OrientationConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            progress_step: PROGRESS_STEP,
            admission_threshold: TRAIL_ADMISSION_THRESHOLD,
            retention: TrailRetention::default(),
            orientation: OrientationConfig::default(),
        }
    }
}

/// Result of one frame of animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub progress: f32,
    /// Progress wrapped past 1 on this tick.
    pub wrapped: bool,
    /// Vehicle pose, absent until both the path and the vehicle are available.
    pub pose: Option<Pose>,
    pub trail_admitted: bool,
    /// Always set: the scene is redrawn every tick, loaded or not.
    pub render_requested: bool,
}

/// Owns loop progress and sequences path sampling and trail admission.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    phase: DriverPhase,
    progress: f32,
    step: f32,
    path: Option<PathModel>,
    vehicle_attached: bool,
    sampler: MotionSampler,
    trail: TrailBuilder,
    loops_completed: u64,
}

impl AnimationDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            phase: DriverPhase::Idle,
            progress: 0.0,
            step: valid_step(config.progress_step),
            path: None,
            vehicle_attached: false,
            sampler: MotionSampler::new(config.orientation),
            trail: TrailBuilder::new(config.admission_threshold, config.retention),
            loops_completed: 0,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == DriverPhase::Disposed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn path(&self) -> Option<&PathModel> {
        self.path.as_ref()
    }

    pub fn has_vehicle(&self) -> bool {
        self.vehicle_attached
    }

    pub fn trail(&self) -> &TrailBuilder {
        &self.trail
    }

    pub fn loops_completed(&self) -> u64 {
        self.loops_completed
    }

    /// Replaces step, orientation and trail settings without touching the
    /// phase or progress. Ignored after dispose.
    pub fn apply_config(&mut self, config: DriverConfig) {
        if self.is_disposed() {
            return;
        }
        self.step = valid_step(config.progress_step);
        self.sampler = MotionSampler::new(config.orientation);
        self.trail
            .reconfigure(config.admission_threshold, config.retention);
    }

    /// Installs the resolved flight path. Ignored after dispose.
    pub fn set_path(&mut self, path: PathModel) {
        if self.is_disposed() {
            return;
        }
        self.path = Some(path);
        self.sampler.reset();
        self.trail.clear();
    }

    /// Marks the vehicle mesh as present in the scene. Returns false after dispose.
    pub fn attach_vehicle(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.vehicle_attached = true;
        true
    }

    /// Idle -> Running. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        if self.phase != DriverPhase::Idle {
            return false;
        }
        self.phase = DriverPhase::Running;
        true
    }

    /// Advances one frame. `Ok(None)` unless running; `Err` only when the
    /// trail buffer cannot grow.
    pub fn tick(&mut self) -> Result<Option<TickOutcome>, FlightError> {
        if self.phase != DriverPhase::Running {
            return Ok(None);
        }

        let previous = self.progress;
        self.progress = advance_progress(self.progress, self.step);
        let wrapped = self.progress < previous;
        if wrapped {
            self.loops_completed += 1;
            self.trail.on_loop_completed();
        }

        let (pose, trail_admitted) = match (&self.path, self.vehicle_attached) {
            (Some(path), true) => {
                let pose = self.sampler.sample(path, self.progress);
                let admitted = self.trail.maybe_append(pose.position)?;
                (Some(pose), admitted)
            }
            _ => (None, false),
        };

        Ok(Some(TickOutcome {
            progress: self.progress,
            wrapped,
            pose,
            trail_admitted,
            render_requested: true,
        }))
    }

    /// Stops ticking and releases the path and trail buffers. Only the first
    /// call does anything; it returns true.
    pub fn dispose(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.phase = DriverPhase::Disposed;
        self.path = None;
        self.vehicle_attached = false;
        self.trail.release();
        true
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}

/// Steps must stay inside `(0, 1)` so every loop boundary is seen as a wrap.
fn valid_step(step: f32) -> f32 {
    if step.is_finite() && step > 0.0 && step < 1.0 {
        step
    } else {
        PROGRESS_STEP
    }
}

/// `(t + step) mod 1`, always in `[0, 1)`.
pub fn advance_progress(t: f32, step: f32) -> f32 {
    normalize_progress(t + step)
}
