//! Elevation color ramp.
//!
//! Maps a normalized height in `[0, 1]` onto a piecewise linear gradient:
//!
//! | band          | colors                     |
//! |---------------|----------------------------|
//! | `[0, 0.3)`    | dark green to light green  |
//! | `[0.3, 0.6)`  | green to yellow/brown      |
//! | `[0.6, 0.85)` | brown to gray              |
//! | `[0.85, 1]`   | gray to white (snow)       |
//!
//! Bands are not continuous with each other; each band restarts from its own
//! base color.

/// RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Upper edge of the lowland band.
pub const LOWLAND_LIMIT: f64 = 0.3;
/// Upper edge of the foothill band.
pub const FOOTHILL_LIMIT: f64 = 0.6;
/// Upper edge of the rock band; snow starts here.
pub const SNOW_LINE: f64 = 0.85;
/// Height span over which snow fades from gray to white.
const SNOW_SPAN: f64 = 0.15;

/// Truncate toward zero and clamp into a byte.
fn channel(value: f64) -> u8 {
    // NaN casts to 0
    value.trunc().clamp(0.0, 255.0) as u8
}

/// Color for a normalized height.
///
/// Heights outside `[0, 1]` are not rejected; the extrapolated channel values
/// are clamped into `0..=255`.
pub fn terrain_color(h: f64) -> Rgba {
    let (r, g, b) = if h < LOWLAND_LIMIT {
        (34.0 + h * 200.0, 139.0 + h * 200.0, 34.0)
    } else if h < FOOTHILL_LIMIT {
        let t = h - LOWLAND_LIMIT;
        (139.0 + t * 200.0, 139.0, 34.0 - t * 100.0)
    } else if h < SNOW_LINE {
        let t = h - FOOTHILL_LIMIT;
        (139.0 + t * 200.0, 90.0 + t * 200.0, 43.0 + t * 200.0)
    } else {
        let snow = (h - SNOW_LINE) / SNOW_SPAN;
        let v = 180.0 + snow * 75.0;
        (v, v, v)
    };

    [channel(r), channel(g), channel(b), 255]
}
