//! Platform window abstraction
//!
//! The desktop shell implements this for its native window; the controller
//! only ever talks to the trait.

use forgepad_ipc::UiCommand;
use url::Url;

use crate::geometry::{Point, Rect, Size};
use crate::Result;

pub trait WindowSurface: Send + Sync {
    fn show(&self) -> Result<()>;

    fn focus(&self) -> Result<()>;

    fn minimize(&self) -> Result<()>;

    /// Usable area of the primary display, if the platform can report it
    fn work_area(&self) -> Option<Rect>;

    fn set_resizable(&self, resizable: bool) -> Result<()>;

    fn set_max_size(&self, size: Size) -> Result<()>;

    fn set_size(&self, size: Size) -> Result<()>;

    fn set_position(&self, position: Point) -> Result<()>;

    /// Platform centering, used when no work area is known
    fn center(&self) -> Result<()>;

    /// Replace the window's content with `url`
    fn load_url(&self, url: &Url) -> Result<()>;

    /// Navigate back to the app's own entry page
    fn load_app(&self) -> Result<()>;

    /// Deliver a host → UI message
    fn send(&self, command: UiCommand) -> Result<()>;
}
