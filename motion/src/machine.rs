use tracing::debug;

use crate::config::AnimatorConfig;

/// Mutable bookkeeping of one running indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// Horizontal offset in container widths; negative while entering from the left.
    pub position: f64,
    pub last_tick_time: f64,
    pub last_marker_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The mover advanced normally.
    Advanced,
    /// The mover passed the right edge and re-entered from the left on this tick.
    Wrapped,
    /// Too little time elapsed since the last accepted tick.
    Throttled,
    /// The container has no usable width yet.
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    pub status: TickStatus,
    pub position: f64,
    pub pixel_offset: f64,
    pub marker_pixel_offset: Option<f64>,
}

impl TickResult {
    #[must_use]
    pub const fn marker_spawned(&self) -> bool {
        self.marker_pixel_offset.is_some()
    }

    /// Whether the tick moved the mover at all.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        matches!(self.status, TickStatus::Advanced | TickStatus::Wrapped)
    }
}

/// Converts frame timestamps into mover positions and trail-marker spawns.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationStateMachine {
    config: AnimatorConfig,
    state: AnimationState,
}

impl AnimationStateMachine {
    #[must_use]
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            state: AnimationState::default(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Applies a new container width, e.g. after a resize. Position is kept.
    pub fn set_container_width(&mut self, width_px: f64) {
        if width_px != self.config.container_width_px {
            debug!(
                from = self.config.container_width_px,
                to = width_px,
                "Container width changed"
            );
        }
        self.config.container_width_px = width_px;
    }

    pub fn reset(&mut self) {
        self.state = AnimationState::default();
    }

    fn has_usable_width(&self) -> bool {
        let width = self.config.container_width_px;
        width.is_finite() && width > 0.0
    }

    /// Mover width in container widths, or 0 while the container is unusable.
    #[must_use]
    pub fn mover_width_fraction(&self) -> f64 {
        if self.has_usable_width() {
            self.config.mover_width_px / self.config.container_width_px
        } else {
            0.0
        }
    }

    fn idle(&self, status: TickStatus) -> TickResult {
        let width = if self.has_usable_width() {
            self.config.container_width_px
        } else {
            0.0
        };
        TickResult {
            status,
            position: self.state.position,
            pixel_offset: self.state.position * width,
            marker_pixel_offset: None,
        }
    }

    /// Processes one frame at `current_time` milliseconds.
    ///
    /// Timestamps must be non-decreasing. Ticks closer than the minimum frame
    /// interval and ticks without a usable container width leave the state
    /// untouched.
    pub fn tick(&mut self, current_time: f64) -> TickResult {
        let elapsed = current_time - self.state.last_tick_time;
        if elapsed <= self.config.min_frame_interval_millis {
            return self.idle(TickStatus::Throttled);
        }
        if !self.has_usable_width() {
            return self.idle(TickStatus::Inactive);
        }

        self.state.last_tick_time = current_time;

        let container = self.config.container_width_px;
        let mover_fraction = self.mover_width_fraction();
        let speed_fraction = self.config.mover_speed_px_per_sec / container;

        let mut position = self.state.position + speed_fraction * (elapsed / 1000.0);
        let mut status = TickStatus::Advanced;
        if position > 1.0 {
            position = -mover_fraction;
            status = TickStatus::Wrapped;
            debug!(position, "Mover wrapped to left edge");
        }
        self.state.position = position;

        let inside_track = position > mover_fraction && position < 1.0 - mover_fraction;
        let spaced = current_time - self.state.last_marker_time
            > self.config.min_marker_interval_millis;

        let pixel_offset = position * container;
        let marker_pixel_offset = if inside_track && spaced {
            self.state.last_marker_time = current_time;
            debug!(pixel_offset, at = current_time, "Spawning trail marker");
            Some(pixel_offset)
        } else {
            None
        };

        TickResult {
            status,
            position,
            pixel_offset,
            marker_pixel_offset,
        }
    }
}
