//! Window geometry in logical pixels

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

/// Frameless splash square; min and max size are pinned to it.
pub const SPLASH_SIZE: Size = Size {
    width: 400.0,
    height: 400.0,
};

pub const MAIN_SIZE: Size = Size {
    width: 1024.0,
    height: 728.0,
};

pub const SPLASH_BACKGROUND: (u8, u8, u8) = (0x32, 0x31, 0x30);

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shrink to fit inside `bounds`, keeping whichever side already fits
    pub fn clamp_to(&self, bounds: Size) -> Size {
        Size {
            width: self.width.min(bounds.width),
            height: self.height.min(bounds.height),
        }
    }
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// A rect of `size` centered inside `self`
    pub fn center(&self, size: Size) -> Rect {
        let size = size.clamp_to(self.size);
        Rect {
            origin: Point {
                x: self.origin.x + (self.size.width - size.width) / 2.0,
                y: self.origin.y + (self.size.height - size.height) / 2.0,
            },
            size,
        }
    }
}
