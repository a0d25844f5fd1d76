//! Viewport geometry in host pixels

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle; the right and bottom edges are exclusive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centers a rectangle of the given size inside `outer`
    pub fn centered_in(outer: Size, size: Size) -> Self {
        let x = (outer.width as i64 - size.width as i64) / 2;
        let y = (outer.height as i64 - size.height as i64) / 2;
        Self::new(x as i32, y as i32, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(clamp_to_i32(self.width))
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(clamp_to_i32(self.height))
    }

    /// Shrinks the rectangle by `inset` on every side
    pub fn inset(&self, inset: u32) -> Self {
        let offset = clamp_to_i32(inset);
        Self::new(
            self.x.saturating_add(offset),
            self.y.saturating_add(offset),
            self.width.saturating_sub(inset.saturating_mul(2)),
            self.height.saturating_sub(inset.saturating_mul(2)),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
