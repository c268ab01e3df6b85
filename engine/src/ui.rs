//! Minimal layout primitives.
//!
//! A `Rect` in buffer pixels plus anchored placement, which is all the board, HUD and
//! overlays need.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && px < self.x.saturating_add(self.w)
            && py >= self.y
            && py < self.y.saturating_add(self.h)
    }

    /// Shrinks the rect by `amount` on every side, saturating at zero size.
    pub fn shrink(&self, amount: u32) -> Self {
        Self {
            x: self.x.saturating_add(amount),
            y: self.y.saturating_add(amount),
            w: self.w.saturating_sub(amount.saturating_mul(2)),
            h: self.h.saturating_sub(amount.saturating_mul(2)),
        }
    }

    /// Places a child of `size` inside this rect using the requested `anchor`.
    ///
    /// If `size` exceeds this rect, it is clamped to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);

        let x = match anchor {
            Anchor::TopLeft | Anchor::CenterLeft => self.x,
            Anchor::TopCenter | Anchor::Center => {
                self.x.saturating_add(self.w.saturating_sub(w) / 2)
            }
        };

        let y = match anchor {
            Anchor::TopLeft | Anchor::TopCenter => self.y,
            Anchor::CenterLeft | Anchor::Center => {
                self.y.saturating_add(self.h.saturating_sub(h) / 2)
            }
        };

        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    CenterLeft,
    Center,
}
