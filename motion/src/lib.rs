//! Timing core of the trail loading indicator.
//!
//! An [`AnimationStateMachine`] turns frame timestamps into a normalized
//! mover position and decides when the mover leaves a fading marker behind.
//! Nothing here touches a rendering tree; hosts implement [`TrailHost`] and
//! feed timestamps through [`drive`].

pub mod attributes;
pub mod config;
pub mod host;
pub mod machine;
pub mod markers;

pub use attributes::{parse_attribute, Attribute, AttributeError, ATTRIBUTE_NAMES};
pub use config::{AnimatorConfig, FadeStyle, LoaderConfig};
pub use host::{drive, TrailHost};
pub use machine::{AnimationState, AnimationStateMachine, TickResult, TickStatus};
pub use markers::{TrailMarker, TrailMarkers};
