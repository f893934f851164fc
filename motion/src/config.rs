use serde::{Deserialize, Serialize};

/// Numeric parameters of the animation state machine.
///
/// `container_width_px` defaults to zero, which keeps the machine inactive
/// until the host has measured its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatorConfig {
    pub container_width_px: f64,
    pub mover_width_px: f64,
    pub mover_speed_px_per_sec: f64,
    pub min_marker_interval_millis: f64,
    pub min_frame_interval_millis: f64,
}

impl AnimatorConfig {
    pub const DEFAULT_MOVER_WIDTH_PX: f64 = 10.0;
    pub const DEFAULT_SPEED_PX_PER_SEC: f64 = 200.0;
    pub const DEFAULT_MARKER_INTERVAL_MILLIS: f64 = 700.0;
    pub const DEFAULT_FRAME_INTERVAL_MILLIS: f64 = 1000.0 / 30.0;

    #[must_use]
    pub fn new(container_width_px: f64, mover_width_px: f64) -> Self {
        Self {
            container_width_px,
            mover_width_px,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_speed(mut self, px_per_sec: f64) -> Self {
        self.mover_speed_px_per_sec = px_per_sec;
        self
    }

    #[must_use]
    pub fn with_marker_interval(mut self, millis: f64) -> Self {
        self.min_marker_interval_millis = millis;
        self
    }

    #[must_use]
    pub fn with_frame_interval(mut self, millis: f64) -> Self {
        self.min_frame_interval_millis = millis;
        self
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            container_width_px: 0.0,
            mover_width_px: Self::DEFAULT_MOVER_WIDTH_PX,
            mover_speed_px_per_sec: Self::DEFAULT_SPEED_PX_PER_SEC,
            min_marker_interval_millis: Self::DEFAULT_MARKER_INTERVAL_MILLIS,
            min_frame_interval_millis: Self::DEFAULT_FRAME_INTERVAL_MILLIS,
        }
    }
}

/// One-shot fade applied to every trail marker.
///
/// Opacity ramps to 1 by `ramp_in_percent`, holds until `hold_percent` and
/// reaches 0 at the end of `lifetime_millis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FadeStyle {
    pub ramp_in_percent: f64,
    pub hold_percent: f64,
    pub lifetime_millis: f64,
    pub resting_opacity: f64,
}

impl FadeStyle {
    /// Copy that is safe to render: percentages within `0..=100` with the hold
    /// never before the ramp, a positive lifetime and an opacity within `0..=1`.
    ///
    /// Non-finite fields fall back to their defaults. Attribute parsing already
    /// rejects such values; deserialized configs are not checked.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let within = |value: f64, max: f64, fallback: f64| {
            if value.is_finite() {
                value.clamp(0.0, max)
            } else {
                fallback
            }
        };

        let ramp_in_percent = within(self.ramp_in_percent, 100.0, defaults.ramp_in_percent);
        let hold_percent =
            within(self.hold_percent, 100.0, defaults.hold_percent).max(ramp_in_percent);
        let lifetime_millis = if self.lifetime_millis.is_finite() && self.lifetime_millis > 0.0 {
            self.lifetime_millis
        } else {
            defaults.lifetime_millis
        };

        Self {
            ramp_in_percent,
            hold_percent,
            lifetime_millis,
            resting_opacity: within(self.resting_opacity, 1.0, defaults.resting_opacity),
        }
    }
}

impl Default for FadeStyle {
    fn default() -> Self {
        Self {
            ramp_in_percent: 2.0,
            hold_percent: 85.0,
            lifetime_millis: 750.0,
            resting_opacity: 0.25,
        }
    }
}

/// Everything a host needs to mount one loading indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    /// CSS width of the container.
    pub width: String,
    /// CSS colour of the mover and its trail.
    pub color: String,
    pub animator: AnimatorConfig,
    pub fade: FadeStyle,
}

impl LoaderConfig {
    /// The fixed-constant tuning: slower mover, sparser trail, longer hold.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            animator: AnimatorConfig::default()
                .with_speed(100.0)
                .with_marker_interval(750.0),
            fade: FadeStyle {
                hold_percent: 90.0,
                ..FadeStyle::default()
            },
            ..Self::default()
        }
    }

    /// Diameter of a dot, which is also the container height.
    #[must_use]
    pub const fn dot_size_px(&self) -> f64 {
        self.animator.mover_width_px
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            width: "100%".to_owned(),
            color: "currentColor".to_owned(),
            animator: AnimatorConfig::default(),
            fade: FadeStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_animator_matches_documented_values() {
        let config = AnimatorConfig::default();
        assert_eq!(config.container_width_px, 0.0);
        assert_eq!(config.mover_speed_px_per_sec, 200.0);
        assert_eq!(config.min_marker_interval_millis, 700.0);
        assert!((config.min_frame_interval_millis - 33.333).abs() < 0.001);
    }

    #[test]
    fn classic_preset_differs_only_in_tuning() {
        let classic = LoaderConfig::classic();
        let default = LoaderConfig::default();

        assert_eq!(classic.animator.mover_speed_px_per_sec, 100.0);
        assert_eq!(classic.animator.min_marker_interval_millis, 750.0);
        assert_eq!(classic.fade.hold_percent, 90.0);
        assert_eq!(default.fade.hold_percent, 85.0);
        assert_eq!(classic.width, default.width);
        assert_eq!(classic.fade.lifetime_millis, default.fade.lifetime_millis);
    }

    #[test]
    fn partial_json_is_filled_with_defaults() {
        let config: LoaderConfig = serde_json::from_value(json!({
            "color": "red",
            "animator": { "moverSpeedPxPerSec": 320.0 }
        }))
        .expect("partial config should deserialize");

        assert_eq!(config.color, "red");
        assert_eq!(config.width, "100%");
        assert_eq!(config.animator.mover_speed_px_per_sec, 320.0);
        assert_eq!(config.animator.min_marker_interval_millis, 700.0);
        assert_eq!(config.fade, FadeStyle::default());
    }

    #[test]
    fn json_keys_are_camel_case() {
        let value = serde_json::to_value(AnimatorConfig::new(200.0, 20.0)).unwrap();
        assert_eq!(value["containerWidthPx"], 200.0);
        assert_eq!(value["moverWidthPx"], 20.0);
        assert!(value.get("min_frame_interval_millis").is_none());
    }

    #[test]
    fn sanitized_fade_keeps_valid_values() {
        assert_eq!(FadeStyle::default().sanitized(), FadeStyle::default());
        assert_eq!(LoaderConfig::classic().fade.sanitized(), LoaderConfig::classic().fade);
    }

    #[test]
    fn sanitized_fade_clamps_json_input() {
        let fade: FadeStyle = serde_json::from_value(json!({
            "rampInPercent": -5.0,
            "holdPercent": 250.0,
            "lifetimeMillis": -1.0,
            "restingOpacity": 3.0
        }))
        .expect("out-of-range numbers still deserialize");

        let fade = fade.sanitized();
        assert_eq!(fade.ramp_in_percent, 0.0);
        assert_eq!(fade.hold_percent, 100.0);
        assert_eq!(fade.lifetime_millis, 750.0);
        assert_eq!(fade.resting_opacity, 1.0);
    }

    #[test]
    fn sanitized_fade_replaces_non_finite_and_orders_hold_after_ramp() {
        let fade = FadeStyle {
            ramp_in_percent: 40.0,
            hold_percent: 10.0,
            lifetime_millis: f64::INFINITY,
            resting_opacity: f64::NAN,
        }
        .sanitized();

        assert_eq!(fade.ramp_in_percent, 40.0);
        assert_eq!(fade.hold_percent, 40.0);
        assert_eq!(fade.lifetime_millis, 750.0);
        assert_eq!(fade.resting_opacity, 0.25);
    }

    #[test]
    fn dot_size_follows_mover_width() {
        let mut config = LoaderConfig::default();
        config.animator.mover_width_px = 14.0;
        assert_eq!(config.dot_size_px(), 14.0);
    }
}
