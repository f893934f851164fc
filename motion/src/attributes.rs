//! Reads a [`LoaderConfig`] from loose `name=value` attribute pairs.
//!
//! Hosts hand over whatever declarative surface they have (element
//! attributes, a query string, environment variables). Malformed values never
//! reach the widget: they are logged and the default is kept.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LoaderConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    #[error("attribute `{name}` is not a number: {value:?}")]
    NotANumber { name: String, value: String },
    #[error("attribute `{name}` must be positive, got {value}")]
    NotPositive { name: String, value: f64 },
    #[error("attribute `{name}` must be at most {max}, got {value}")]
    OutOfRange { name: String, value: f64, max: f64 },
    #[error("attribute `{name}` must not be empty")]
    Empty { name: String },
}

/// Attribute names understood by [`parse_attribute`], in their canonical spelling.
pub const ATTRIBUTE_NAMES: [&str; 8] = [
    "width",
    "color",
    "heightInPixels",
    "speed",
    "markerInterval",
    "frameRate",
    "fadeHold",
    "fadeDuration",
];

/// A single recognised attribute with its parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Width(String),
    Color(String),
    HeightInPixels(f64),
    Speed(f64),
    MarkerInterval(f64),
    FrameRate(f64),
    FadeHold(f64),
    FadeDuration(f64),
}

fn positive(name: &str, value: &str) -> Result<f64, AttributeError> {
    let trimmed = value.trim().trim_end_matches("px");
    let parsed: f64 = trimmed.parse().map_err(|_| AttributeError::NotANumber {
        name: name.to_owned(),
        value: value.to_owned(),
    })?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(AttributeError::NotPositive {
            name: name.to_owned(),
            value: parsed,
        })
    }
}

fn non_empty(name: &str, value: &str) -> Result<String, AttributeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AttributeError::Empty {
            name: name.to_owned(),
        })
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Parses one attribute. Returns `Ok(None)` for names this widget does not use.
///
/// # Errors
///
/// Returns an [`AttributeError`] when a recognised attribute carries an
/// empty, non-numeric or non-positive value.
pub fn parse_attribute(name: &str, value: &str) -> Result<Option<Attribute>, AttributeError> {
    let attribute = match name.to_ascii_lowercase().as_str() {
        "width" => Attribute::Width(non_empty(name, value)?),
        "color" => Attribute::Color(non_empty(name, value)?),
        "heightinpixels" => Attribute::HeightInPixels(positive(name, value)?),
        "speed" => Attribute::Speed(positive(name, value)?),
        "markerinterval" => Attribute::MarkerInterval(positive(name, value)?),
        "framerate" => Attribute::FrameRate(positive(name, value)?),
        "fadehold" => {
            let hold = positive(name, value)?;
            if hold > 100.0 {
                return Err(AttributeError::OutOfRange {
                    name: name.to_owned(),
                    value: hold,
                    max: 100.0,
                });
            }
            Attribute::FadeHold(hold)
        }
        "fadeduration" => Attribute::FadeDuration(positive(name, value)?),
        _ => return Ok(None),
    };
    Ok(Some(attribute))
}

impl LoaderConfig {
    /// Applies one parsed attribute on top of the current values.
    pub fn apply(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Width(width) => self.width = width,
            Attribute::Color(color) => self.color = color,
            Attribute::HeightInPixels(px) => self.animator.mover_width_px = px,
            Attribute::Speed(speed) => self.animator.mover_speed_px_per_sec = speed,
            Attribute::MarkerInterval(millis) => self.animator.min_marker_interval_millis = millis,
            Attribute::FrameRate(hz) => self.animator.min_frame_interval_millis = 1000.0 / hz,
            Attribute::FadeHold(percent) => self.fade.hold_percent = percent,
            Attribute::FadeDuration(millis) => self.fade.lifetime_millis = millis,
        }
    }

    /// Builds a config from attribute pairs on top of [`LoaderConfig::default`].
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::default().with_attributes(attributes)
    }

    /// Overrides `self` with every valid attribute; invalid ones keep the current value.
    #[must_use]
    pub fn with_attributes<'a, I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in attributes {
            match parse_attribute(name, value) {
                Ok(Some(attribute)) => self.apply(attribute),
                Ok(None) => debug!(attribute = name, "Ignoring unknown loader attribute"),
                Err(error) => warn!(%error, "Invalid loader attribute; keeping default"),
            }
        }
        self
    }
}
