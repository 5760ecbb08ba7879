//! Forgepad Window Lifecycle
//!
//! One top-level window per process:
//! ```text
//! Uninitialized → Splash → Transitioning → Main → Closed
//! ```
//! The splash is a small frameless square; a single delayed transition
//! resizes it into the main view and routes the UI according to the stored
//! credential.

mod controller;
mod error;
mod geometry;
mod phase;
mod surface;

pub use controller::{LifecycleSettings, WindowController};
pub use error::WindowError;
pub use geometry::{Point, Rect, Size, MAIN_SIZE, SPLASH_BACKGROUND, SPLASH_SIZE};
pub use phase::WindowPhase;
pub use surface::WindowSurface;

pub type Result<T> = std::result::Result<T, WindowError>;
