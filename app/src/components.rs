//! This module serves as a container for the reusable UI components of the demo site.
//!
//! `loader` is the trail loading indicator itself; `header` and `error_template`
//! frame the demo pages around it.

pub mod error_template;
pub mod header;
pub mod loader;
