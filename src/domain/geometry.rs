//! Geometric types for measurement segments and capture regions
//!
//! All coordinates are in session-local (overlay window) pixels.

/// A pixel position in overlay window coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the point by the given offset
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Normalized rectangle: top-left corner plus non-negative size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the normalized rectangle spanned by two arbitrary corners
    pub fn from_corners(p0: Point, p1: Point) -> Self {
        normalize_rect(p0, p1)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// A rectangle narrower or shorter than one pixel cannot be exported
    pub fn is_degenerate(&self) -> bool {
        self.width < 1 || self.height < 1
    }

    /// Calculate the intersection of two rectangles
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left < right && top < bottom {
            Some(Rect::new(
                left,
                top,
                (right - left) as u32,
                (bottom - top) as u32,
            ))
        } else {
            None
        }
    }
}

/// Normalize two arbitrary corner points into `(min x, min y, |dx|, |dy|)`
pub fn normalize_rect(p0: Point, p1: Point) -> Rect {
    Rect {
        x: p0.x.min(p1.x),
        y: p0.y.min(p1.y),
        width: (p1.x - p0.x).unsigned_abs(),
        height: (p1.y - p0.y).unsigned_abs(),
    }
}

/// Euclidean distance between two points
pub fn distance(p0: Point, p1: Point) -> f64 {
    let dx = f64::from(p1.x - p0.x);
    let dy = f64::from(p1.y - p0.y);
    (dx * dx + dy * dy).sqrt()
}

/// A drag-defined pair of points.
///
/// Used both for the measurement line and for the corners of a region
/// selection. `end` follows the pointer while the drag is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    /// Start a new segment where both ends sit on the press position
    pub fn at(start: Point) -> Self {
        Self { start, end: start }
    }

    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn dx(&self) -> i32 {
        self.end.x - self.start.x
    }

    pub fn dy(&self) -> i32 {
        self.end.y - self.start.y
    }

    /// Horizontal extent, `|dx|`
    pub fn width(&self) -> u32 {
        self.dx().unsigned_abs()
    }

    /// Vertical extent, `|dy|`
    pub fn height(&self) -> u32 {
        self.dy().unsigned_abs()
    }

    pub fn distance(&self) -> f64 {
        distance(self.start, self.end)
    }

    /// Integer midpoint, rounded toward zero like the label placement expects
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2,
            (self.start.y + self.end.y) / 2,
        )
    }

    /// The normalized rectangle with this segment as its diagonal
    pub fn rect(&self) -> Rect {
        normalize_rect(self.start, self.end)
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }
}
