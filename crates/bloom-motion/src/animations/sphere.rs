//! Noise-displaced shaded sphere (stateless, computed from position and time).

use std::f32::consts::PI;

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use super::noise::snoise;
use crate::chars::SHADE_CHARS;
use crate::color::rgb_unit;
use crate::viewport::Viewport;

pub const SPHERE_RADIUS: f32 = 1.8;
const CAMERA_Z: f32 = 4.5;
const FOV_DEGREES: f32 = 50.0;
/// Spin about the vertical axis.
const SPIN_RAD_PER_SEC: f32 = 0.1;
const NOISE_FREQUENCY: f32 = 2.0;
const NOISE_TIME_SCALE: f32 = 0.4;
const MAX_DISPLACEMENT: f32 = 0.3;
const LIGHT_DIR: [f32; 3] = [-0.37, 0.46, 0.81];

/// Displacement along the normal for an object-space position.
pub fn displacement(position: [f32; 3], time_s: f32) -> f32 {
    snoise([
        position[0] * NOISE_FREQUENCY,
        position[1] * NOISE_FREQUENCY,
        time_s * NOISE_TIME_SCALE,
    ]) * MAX_DISPLACEMENT
}

/// Surface colour as unit RGB, including the edge glow.
pub fn surface_color(displacement: f32, u: f32, time_s: f32) -> [f32; 3] {
    let r = 0.3 + 0.3 * (time_s * 0.5 + displacement * 5.0).sin();
    let g = 0.1 + 0.2 * (time_s * 0.3 + u * 3.0).sin();
    let b = 0.6 + 0.3 * (time_s * 0.4 + displacement * 3.0).cos();

    let edge = (1.0 - displacement.abs() * 2.0).max(0.0).powi(3);
    [
        (r + 0.2 * edge).clamp(0.0, 1.0),
        (g + 0.1 * edge).clamp(0.0, 1.0),
        (b + 0.4 * edge).clamp(0.0, 1.0),
    ]
}

/// One shaded terminal cell of the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCell {
    pub glyph: char,
    pub color: Color,
    pub displacement: f32,
}

/// World units visible from the centre to the top edge of the view.
fn half_extent() -> f32 {
    CAMERA_Z * (FOV_DEGREES.to_radians() / 2.0).tan()
}

/// Shade the world-space point `(wx, wy)` on the view plane, or `None` if
/// it misses the displaced silhouette.
pub fn shade(wx: f32, wy: f32, time_s: f32) -> Option<SurfaceCell> {
    let reach = (wx * wx + wy * wy).sqrt();
    if reach > SPHERE_RADIUS + MAX_DISPLACEMENT {
        return None;
    }

    // Nearest point on the undisplaced sphere facing the camera.
    let world = if reach < SPHERE_RADIUS {
        [wx, wy, (SPHERE_RADIUS * SPHERE_RADIUS - reach * reach).sqrt()]
    } else {
        let k = SPHERE_RADIUS / reach.max(f32::EPSILON);
        [wx * k, wy * k, 0.0]
    };

    let angle = time_s * SPIN_RAD_PER_SEC;
    let (sin, cos) = angle.sin_cos();
    let object = [
        cos * world[0] - sin * world[2],
        world[1],
        sin * world[0] + cos * world[2],
    ];

    let d = displacement(object, time_s);
    if reach > SPHERE_RADIUS + d {
        return None;
    }

    let u = 0.5 + object[2].atan2(object[0]) / (2.0 * PI);
    let [r, g, b] = surface_color(d, u, time_s);

    let normal = world.map(|c| c / SPHERE_RADIUS);
    let lambert = (normal[0] * LIGHT_DIR[0] + normal[1] * LIGHT_DIR[1] + normal[2] * LIGHT_DIR[2])
        .max(0.0);
    let brightness = ((r + g + b) / 3.0 * (0.35 + 0.65 * lambert)).clamp(0.0, 0.999);
    let glyph = SHADE_CHARS[(brightness * SHADE_CHARS.len() as f32) as usize];

    Some(SurfaceCell {
        glyph,
        color: rgb_unit(r, g, b),
        displacement: d,
    })
}

/// Draw the sphere centred in `area`.
pub fn render(buf: &mut Buffer, area: Rect, elapsed_ms: u64) {
    let viewport = Viewport::new(area);
    if viewport.height_px <= 0.0 {
        return;
    }
    let time_s = elapsed_ms as f32 / 1_000.0;
    let world_per_px = half_extent() / (viewport.height_px / 2.0);
    let (cx, cy) = (viewport.width_px / 2.0, viewport.height_px / 2.0);

    for row in 0..area.height {
        for col in 0..area.width {
            let (px, py) = Viewport::cell_center(col, row);
            let wx = (px - cx) * world_per_px;
            let wy = (cy - py) * world_per_px;
            let Some(surface) = shade(wx, wy, time_s) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_char(surface.glyph).set_fg(surface.color);
            }
        }
    }
}
