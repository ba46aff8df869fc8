//! Responsive layout flags and hit-test geometry.
//!
//! # Invariants
//! - `is_narrow` is `width <= NARROW_MAX_WIDTH`.
//! - A wide viewport always shows the sidebar.
//! - The sidebar is hidden only by selecting a group while narrow.

/// Widest viewport, in layout units, still treated as narrow.
pub const NARROW_MAX_WIDTH: u32 = 767;

pub fn is_narrow_width(width: u32) -> bool {
    width <= NARROW_MAX_WIDTH
}

/// Sidebar visibility driven by viewport width and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponsiveLayout {
    width: u32,
    is_narrow: bool,
    sidebar_visible: bool,
}

impl ResponsiveLayout {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            is_narrow: is_narrow_width(width),
            sidebar_visible: true,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_narrow(&self) -> bool {
        self.is_narrow
    }

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    /// Whether the main panel is on screen. Narrow viewports show one pane,
    /// and the sidebar wins while it is visible.
    pub fn main_visible(&self) -> bool {
        !self.is_narrow || !self.sidebar_visible
    }

    /// Recomputes the narrow flag. Returns `true` when it flipped.
    pub fn resize(&mut self, width: u32) -> bool {
        let was_narrow = self.is_narrow;
        self.width = width;
        self.is_narrow = is_narrow_width(width);
        if !self.is_narrow {
            self.sidebar_visible = true;
        }
        was_narrow != self.is_narrow
    }

    /// Narrow viewports give the selected thread the full screen.
    pub fn on_select(&mut self) {
        if self.is_narrow {
            self.sidebar_visible = false;
        }
    }

    pub fn on_back(&mut self) {
        self.sidebar_visible = true;
    }
}

/// Pointer position in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding region; the right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x - self.x < self.width
            && point.y - self.y < self.height
    }
}
