// Owns the live particles and drives them: spawn on pointer movement, a frame-rate
// limited advance/cull/render loop, debounced resizing, and teardown.

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::random::RandomSource;
use crate::schedule::{CallbackHandle, FrameLimiter, Scheduler, Throttle};
use crate::surface::Surface;
use log::{debug, trace};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldState {
    Uninitialized,
    Running,
    /// Terminal. A torn down field never runs again.
    TornDown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Field isn't running; nothing was scheduled.
    Inactive,
    /// Too soon after the last frame. The next frame is still requested.
    Skipped,
    Rendered { culled: usize, live: usize },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub frames_rendered: u64,
    pub frames_skipped: u64,
    pub spawns_accepted: u64,
    pub spawns_throttled: u64,
    pub spawns_dropped: u64,
    pub particles_culled: u64,
    pub resizes: u64,
}

pub struct ParticleField<S: Surface, H: Scheduler, R: RandomSource> {
    config: FieldConfig,
    particles: Vec<Particle>,
    surface: S,
    scheduler: H,
    rng: R,
    limiter: FrameLimiter,
    spawn_throttle: Throttle,
    state: FieldState,
    pending_frame: Option<CallbackHandle>,
    pending_resize: Option<CallbackHandle>,
    stats: FieldStats,
}

impl<S: Surface, H: Scheduler, R: RandomSource> ParticleField<S, H, R> {
    pub fn new(surface: S, scheduler: H, rng: R, config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ParticleField {
            particles: Vec::with_capacity(config.capacity),
            surface,
            scheduler,
            rng,
            limiter: FrameLimiter::new(config.frame_interval_ms()),
            spawn_throttle: Throttle::new(config.spawn_interval_ms),
            state: FieldState::Uninitialized,
            pending_frame: None,
            pending_resize: None,
            stats: FieldStats::default(),
            config,
        })
    }

    /// Builds and starts a field on `surface`. A missing surface means the host
    /// container wasn't found; the field is then simply absent, which is not an error.
    pub fn initialize(
        surface: Option<S>,
        scheduler: H,
        rng: R,
        config: FieldConfig,
    ) -> Result<Option<Self>, ConfigError> {
        config.validate()?;
        let surface = match surface {
            Some(surface) => surface,
            None => {
                debug!("no particle container; staying inert");
                return Ok(None);
            }
        };
        let mut field = Self::new(surface, scheduler, rng, config)?;
        field.start();
        Ok(Some(field))
    }

    /// Fits the surface and requests the first frame. Only honoured once, from
    /// `Uninitialized`.
    pub fn start(&mut self) -> bool {
        if self.state != FieldState::Uninitialized {
            return false;
        }
        self.surface.fit_to_container();
        self.state = FieldState::Running;
        self.pending_frame = self.scheduler.request_frame();
        debug!(
            "particle field running on {}x{} surface",
            self.surface.width(),
            self.surface.height()
        );
        true
    }

    pub fn tick(&mut self, now: f64) -> TickOutcome {
        if self.state != FieldState::Running {
            return TickOutcome::Inactive;
        }
        // Always keep the loop alive, whether or not this frame draws
        self.pending_frame = self.scheduler.request_frame();

        if !self.limiter.ready(now) {
            self.stats.frames_skipped += 1;
            return TickOutcome::Skipped;
        }

        self.surface.clear();

        let decay = self.config.decay_per_tick;
        let min_visible = self.config.min_visible_size;
        for particle in self.particles.iter_mut() {
            particle.advance(decay, min_visible);
        }

        let culled = self.cull();

        for particle in &self.particles {
            particle.render(&mut self.surface);
        }

        self.stats.frames_rendered += 1;
        trace!("frame at {:.1}ms: {} live, {} culled", now, self.particles.len(), culled);
        TickOutcome::Rendered {
            culled,
            live: self.particles.len(),
        }
    }

    // Runs only after every particle has advanced, so survival is decided on a fully
    // updated collection.
    fn cull(&mut self) -> usize {
        let min_visible = self.config.min_visible_size;
        let before = self.particles.len();
        self.particles.retain(|p| p.is_visible(min_visible));
        let culled = before - self.particles.len();
        self.stats.particles_culled += culled as u64;
        culled
    }

    /// Adds up to one batch of particles at `(x, y)`, never exceeding capacity.
    /// Returns how many were added.
    pub fn spawn_at(&mut self, x: f64, y: f64) -> usize {
        let room = self.config.capacity.saturating_sub(self.particles.len());
        if room == 0 {
            self.stats.spawns_dropped += 1;
            return 0;
        }
        let count = room.min(self.config.spawn_batch);
        for _ in 0..count {
            let particle = Particle::create(x, y, &mut self.rng, &self.config);
            self.particles.push(particle);
        }
        self.stats.spawns_accepted += 1;
        count
    }

    /// Pointer movement in surface coordinates. Requests closer together than the
    /// spawn interval are dropped before reaching `spawn_at`.
    pub fn pointer_moved(&mut self, x: f64, y: f64, now: f64) -> usize {
        if self.state != FieldState::Running {
            return 0;
        }
        if !self.spawn_throttle.try_accept(now) {
            self.stats.spawns_throttled += 1;
            return 0;
        }
        self.spawn_at(x, y)
    }

    /// Debounced resize: restarts the timer so only the last request of a burst runs.
    pub fn request_resize(&mut self) {
        if self.state != FieldState::Running {
            return;
        }
        if let Some(handle) = self.pending_resize.take() {
            self.scheduler.cancel_timer(handle);
        }
        self.pending_resize = self.scheduler.start_timer(self.config.resize_debounce_ms);
    }

    pub fn resize_timer_fired(&mut self) {
        self.pending_resize = None;
        if self.state == FieldState::Running {
            self.resize_surface();
        }
    }

    /// Re-fits the surface to its container. Live particles are left as they are.
    pub fn resize_surface(&mut self) {
        self.surface.fit_to_container();
        self.stats.resizes += 1;
        debug!(
            "particle surface resized to {}x{}",
            self.surface.width(),
            self.surface.height()
        );
    }

    /// Cancels the pending frame and resize timer. Safe to call any number of times.
    pub fn teardown(&mut self) {
        if self.state == FieldState::TornDown {
            return;
        }
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Some(handle) = self.pending_resize.take() {
            self.scheduler.cancel_timer(handle);
        }
        self.state = FieldState::TornDown;
        debug!("particle field torn down with {} live particles", self.particles.len());
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FieldState::Running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn stats(&self) -> FieldStats {
        self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut H {
        &mut self.scheduler
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }
}
