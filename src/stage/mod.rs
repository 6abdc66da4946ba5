//! Stage presentation for a resolved 3D model.
//!
//! This module provides:
//! - The resolution state machine (`controller`)
//! - Published state and outcome types (`state`)
//! - Render instructions for the presentation collaborator (`view`)

pub mod controller;
pub mod state;
pub mod view;

pub use controller::StageController;
pub use state::{Cycle, PresentationState, Resolution, ResolveFailure, StageSnapshot};
pub use view::{StageView, ViewerProps};
