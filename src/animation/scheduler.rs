//! Frame-driven tween scheduler.
//!
//! Animations are registered with an [`AnimationDescription`] and sampled
//! once per [`AnimationScheduler::update`]. Each registration returns an
//! [`AnimationHandle`] that shares its status with the scheduler, so the
//! owner can tell whether its animation is still running without asking
//! the scheduler.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use super::easing::EasingFunction;

/// Default length of a scheduled animation.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Lifecycle of a scheduled animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Registered and not yet at its stop value.
    Running,
    /// Reached its stop value and was retired.
    Finished,
    /// Removed before it finished.
    Cancelled,
}

/// Owner-side reference to a scheduled animation.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    id: u64,
    status: Rc<Cell<AnimationStatus>>,
}

impl AnimationHandle {
    /// Scheduler-unique identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> AnimationStatus {
        self.status.get()
    }

    /// Whether the animation is still registered and advancing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status() == AnimationStatus::Running
    }
}

/// What to animate: a scalar eased from `start_value` to `stop_value`
/// over `duration`, reported through `on_update` every tick.
pub struct AnimationDescription {
    /// Curve applied to normalized progress.
    pub easing: EasingFunction,
    /// Value reported at progress 0.
    pub start_value: f64,
    /// Value reported at progress 1.
    pub stop_value: f64,
    /// Wall-clock length of the animation.
    pub duration: Duration,
    /// Invoked with the eased value on every tick.
    pub on_update: Box<dyn FnMut(f64)>,
}

impl AnimationDescription {
    /// Animate from 0 to 1 over [`DEFAULT_DURATION`] with the default easing.
    pub fn new(on_update: impl FnMut(f64) + 'static) -> Self {
        Self {
            easing: EasingFunction::DEFAULT,
            start_value: 0.0,
            stop_value: 1.0,
            duration: DEFAULT_DURATION,
            on_update: Box::new(on_update),
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Replace the start and stop values.
    #[must_use]
    pub fn with_range(mut self, start_value: f64, stop_value: f64) -> Self {
        self.start_value = start_value;
        self.stop_value = stop_value;
        self
    }

    /// Replace the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl fmt::Debug for AnimationDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDescription")
            .field("easing", &self.easing)
            .field("start_value", &self.start_value)
            .field("stop_value", &self.stop_value)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

struct Tween {
    description: AnimationDescription,
    start_time: Instant,
    status: Rc<Cell<AnimationStatus>>,
}

impl Tween {
    fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start_time);
        let duration = self.description.duration;

        if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        }
    }

    /// Sample the tween and report whether it should stay registered.
    fn step(&mut self, now: Instant) -> bool {
        let t = self.progress(now);
        let d = &mut self.description;
        let value = d.start_value + (d.stop_value - d.start_value) * d.easing.evaluate(t);
        (d.on_update)(value);

        if t >= 1.0 {
            self.status.set(AnimationStatus::Finished);
            false
        } else {
            true
        }
    }
}

/// Registry of running animations, advanced one tick per frame.
#[derive(Default)]
pub struct AnimationScheduler {
    animations: FxHashMap<u64, Tween>,
    next_id: u64,
}

impl AnimationScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an animation starting now.
    pub fn add(&mut self, description: AnimationDescription) -> AnimationHandle {
        self.add_at(description, Instant::now())
    }

    /// Register an animation with an explicit start time.
    pub fn add_at(
        &mut self,
        description: AnimationDescription,
        start_time: Instant,
    ) -> AnimationHandle {
        let id = self.next_id;
        self.next_id += 1;

        let status = Rc::new(Cell::new(AnimationStatus::Running));
        log::trace!("animation {id} added: {description:?}");
        let _previous = self.animations.insert(
            id,
            Tween {
                description,
                start_time,
                status: Rc::clone(&status),
            },
        );
        AnimationHandle { id, status }
    }

    /// Advance every animation to the current time.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advance every animation to `now`, retiring the ones that finish.
    pub fn update_at(&mut self, now: Instant) {
        self.animations.retain(|id, tween| {
            let running = tween.step(now);
            if !running {
                log::trace!("animation {id} finished");
            }
            running
        });
    }

    /// Cancel a single animation. Returns whether it was still registered.
    pub fn remove(&mut self, handle: &AnimationHandle) -> bool {
        self.animations.remove(&handle.id).is_some_and(|tween| {
            tween.status.set(AnimationStatus::Cancelled);
            true
        })
    }

    /// Cancel every registered animation.
    pub fn remove_all(&mut self) {
        if !self.animations.is_empty() {
            log::debug!("cancelling {} animation(s)", self.animations.len());
        }
        for (_, tween) in self.animations.drain() {
            tween.status.set(AnimationStatus::Cancelled);
        }
    }

    /// Whether `handle` refers to an animation registered here.
    #[must_use]
    pub fn contains(&self, handle: &AnimationHandle) -> bool {
        self.animations.contains_key(&handle.id)
    }

    /// Number of registered animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether no animation is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.remove_all();
    }
}

impl fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("active", &self.animations.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
