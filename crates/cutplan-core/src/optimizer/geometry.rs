use crate::types::{PanelLayout, Placement};

/// Axis-aligned rectangle in panel coordinates (cm), origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

impl From<&Placement> for Rect {
    fn from(p: &Placement) -> Self {
        Rect::new(p.x, p.y, p.width, p.height)
    }
}

/// True when a `width` x `height` extent fits within the panel.
pub fn fits(layout: &PanelLayout, width: f64, height: f64) -> bool {
    width <= layout.width && height <= layout.height
}

/// Interior overlap test. Rectangles that only share an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || a.x >= b.right() || a.bottom() <= b.y || a.y >= b.bottom())
}

/// Corner points worth trying for the next piece: the origin, then the
/// top-right and bottom-left corners of every placement in placement order.
pub fn candidate_positions(layout: &PanelLayout) -> Vec<(f64, f64)> {
    let mut positions = Vec::with_capacity(1 + layout.placements.len() * 2);
    positions.push((0.0, 0.0));

    for placement in &layout.placements {
        let rect = Rect::from(placement);
        positions.push((rect.right(), rect.y));
        positions.push((rect.x, rect.bottom()));
    }

    positions
}
