//! Shared geometry for overlay drawing
//!
//! Constants and math shared between the live frame and exported rasters,
//! so both draw the measurement identically.

/// Measurement line geometry
pub mod line {
    /// Stroke width of the measurement line
    pub const THICKNESS: f32 = 2.0;
    /// Length of the arrow cap along the line
    pub const CAP_LENGTH: f32 = 10.0;
    /// Half of the arrow cap's base width
    pub const CAP_HALF_WIDTH: f32 = 5.0;
    /// Endpoint marker radius
    pub const MARKER_RADIUS: f32 = 4.0;

    /// Triangle for an arrow cap whose tip sits at `tip`, pointing away
    /// from `from`. `None` when the two points coincide.
    pub fn cap_points(tip: (f32, f32), from: (f32, f32)) -> Option<[(f32, f32); 3]> {
        let dx = tip.0 - from.0;
        let dy = tip.1 - from.1;
        let length = (dx * dx + dy * dy).sqrt();
        if length < f32::EPSILON {
            return None;
        }

        // Unit direction towards the tip and its normal
        let nx = dx / length;
        let ny = dy / length;
        let (px, py) = (-ny, nx);

        let base_x = tip.0 - nx * CAP_LENGTH;
        let base_y = tip.1 - ny * CAP_LENGTH;

        Some([
            tip,
            (base_x + px * CAP_HALF_WIDTH, base_y + py * CAP_HALF_WIDTH),
            (base_x - px * CAP_HALF_WIDTH, base_y - py * CAP_HALF_WIDTH),
        ])
    }
}

/// Dashed stroke patterns
pub mod dash {
    /// Width/height guide lines, 1 px wide
    pub const GUIDE: [f32; 2] = [3.0, 1.0];
    /// Region selection border, 2 px wide
    pub const SELECTION: [f32; 2] = [6.0, 2.0];
    pub const GUIDE_THICKNESS: f32 = 1.0;
    pub const SELECTION_THICKNESS: f32 = 2.0;
}

/// Label placement
pub mod label {
    /// Padding around the distance label text
    pub const DISTANCE_PADDING: i32 = 5;
    /// Gap between the width label plate and the start point's row
    pub const WIDTH_GAP: i32 = 5;
    /// Gap between the end point and the height label
    pub const HEIGHT_GAP: i32 = 5;
    /// Offset of coordinate labels below their point
    pub const COORD_OFFSET: i32 = 10;
    /// Gap between the selection and its size label
    pub const SIZE_GAP: i32 = 5;
    /// Instruction banner text position; the plate starts 5/3 px earlier
    pub const BANNER_X: i32 = 15;
    pub const BANNER_Y: i32 = 13;
}

/// Glyph scale factors for the 8x8 bitmap font
pub mod font {
    pub const SMALL: u32 = 1;
    pub const LARGE: u32 = 2;
}
