//! Triangle and line rasterization.
//!
//! Triangles are clipped against the near plane in clip space, projected to
//! pixel coordinates and filled with edge functions over their bounding box.
//! Attributes are interpolated perspective-correctly. Lines use Bresenham's
//! algorithm after near-plane and viewport clipping.

use glam::{Vec2, Vec3, Vec4};
use lightlab_resources::Side;

/// Vertex output of the vertex stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipVertex {
    pub clip: Vec4,
    pub world: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl ClipVertex {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            clip: self.clip.lerp(other.clip, t),
            world: self.world.lerp(other.world, t),
            normal: self.normal.lerp(other.normal, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }

    /// Signed distance to the near plane (`z = -w` in GL clip space).
    fn near_distance(&self) -> f32 {
        self.clip.z + self.clip.w
    }
}

/// Interpolated attributes of a covered pixel.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    pub x: u32,
    pub y: u32,
    /// Window depth in `[0, 1]`
    pub depth: f32,
    pub world: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    /// Counter-clockwise on screen, i.e. seen from the front
    pub front_facing: bool,
}

/// A projected vertex with attributes pre-divided by `w`.
#[derive(Clone, Copy, Debug)]
struct ScreenVertex {
    position: Vec2,
    depth: f32,
    inv_w: f32,
    world: Vec3,
    normal: Vec3,
    uv: Vec2,
}

impl ScreenVertex {
    fn project(v: &ClipVertex, width: u32, height: u32) -> Self {
        let inv_w = 1.0 / v.clip.w;
        let ndc = v.clip.truncate() * inv_w;
        Self {
            position: Vec2::new(
                (ndc.x * 0.5 + 0.5) * width as f32,
                (0.5 - ndc.y * 0.5) * height as f32,
            ),
            depth: ndc.z * 0.5 + 0.5,
            inv_w,
            world: v.world * inv_w,
            normal: v.normal * inv_w,
            uv: v.uv * inv_w,
        }
    }
}

/// Twice the signed area of `(a, b, p)`; positive when counter-clockwise on a y-down screen.
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Clip a triangle against the near plane, returning a convex polygon.
pub fn clip_near(triangle: &[ClipVertex; 3]) -> Vec<ClipVertex> {
    let mut polygon = Vec::with_capacity(4);
    for i in 0..3 {
        let current = &triangle[i];
        let next = &triangle[(i + 1) % 3];
        let d_current = current.near_distance();
        let d_next = next.near_distance();

        if d_current >= 0.0 {
            polygon.push(*current);
        }
        if (d_current >= 0.0) != (d_next >= 0.0) {
            let t = d_current / (d_current - d_next);
            polygon.push(current.lerp(next, t));
        }
    }
    polygon
}

/// Rasterize one triangle, calling `emit` for every covered pixel.
///
/// `side` selects which windings are drawn. Returns the number of fragments
/// emitted.
pub fn rasterize_triangle<F>(
    triangle: &[ClipVertex; 3],
    width: u32,
    height: u32,
    side: Side,
    emit: &mut F,
) -> usize
where
    F: FnMut(&Fragment),
{
    let polygon = clip_near(triangle);
    if polygon.len() < 3 {
        return 0;
    }
    let screen: Vec<ScreenVertex> = polygon
        .iter()
        .map(|v| ScreenVertex::project(v, width, height))
        .collect();

    let mut emitted = 0;
    for i in 1..screen.len() - 1 {
        emitted += fill(&screen[0], &screen[i], &screen[i + 1], width, height, side, emit);
    }
    emitted
}

fn fill<F>(
    a: &ScreenVertex,
    b: &ScreenVertex,
    c: &ScreenVertex,
    width: u32,
    height: u32,
    side: Side,
    emit: &mut F,
) -> usize
where
    F: FnMut(&Fragment),
{
    let area = edge(a.position, b.position, c.position);
    if area.abs() <= f32::EPSILON {
        return 0;
    }
    let front_facing = area > 0.0;
    match side {
        Side::Front if !front_facing => return 0,
        Side::Back if front_facing => return 0,
        _ => {}
    }

    let min = a.position.min(b.position).min(c.position).floor();
    let max = a.position.max(b.position).max(c.position).ceil();
    if max.x < 0.0 || max.y < 0.0 || min.x >= width as f32 || min.y >= height as f32 {
        return 0;
    }
    let min_x = min.x.max(0.0) as u32;
    let min_y = min.y.max(0.0) as u32;
    let max_x = max.x.min(width as f32 - 1.0) as u32;
    let max_y = max.y.min(height as f32 - 1.0) as u32;

    let mut emitted = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(b.position, c.position, p) / area;
            let w1 = edge(c.position, a.position, p) / area;
            let w2 = edge(a.position, b.position, p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let inv_w = w0 * a.inv_w + w1 * b.inv_w + w2 * c.inv_w;
            if inv_w <= 0.0 {
                continue;
            }
            let w = 1.0 / inv_w;
            emit(&Fragment {
                x,
                y,
                depth: w0 * a.depth + w1 * b.depth + w2 * c.depth,
                world: (a.world * w0 + b.world * w1 + c.world * w2) * w,
                normal: (a.normal * w0 + b.normal * w1 + c.normal * w2) * w,
                uv: (a.uv * w0 + b.uv * w1 + c.uv * w2) * w,
                front_facing,
            });
            emitted += 1;
        }
    }
    emitted
}

/// Clip a segment against the near plane in clip space.
fn clip_line_near(a: Vec4, b: Vec4) -> Option<(Vec4, Vec4)> {
    let da = a.z + a.w;
    let db = b.z + b.w;
    match (da >= 0.0, db >= 0.0) {
        (true, true) => Some((a, b)),
        (false, false) => None,
        (true, false) => Some((a, a.lerp(b, da / (da - db)))),
        (false, true) => Some((a.lerp(b, da / (da - db)), b)),
    }
}

/// Liang-Barsky parameter range of a segment inside `[min, max]`.
fn clip_to_rect(p0: Vec2, p1: Vec2, min: Vec2, max: Vec2) -> Option<(f32, f32)> {
    let d = p1 - p0;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    for (p, q) in [
        (-d.x, p0.x - min.x),
        (d.x, max.x - p0.x),
        (-d.y, p0.y - min.y),
        (d.y, max.y - p0.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

/// Rasterize a clip-space segment, calling `emit(x, y, depth)` per pixel.
///
/// Returns the number of pixels emitted.
pub fn rasterize_line<F>(a: Vec4, b: Vec4, width: u32, height: u32, emit: &mut F) -> usize
where
    F: FnMut(u32, u32, f32),
{
    let Some((a, b)) = clip_line_near(a, b) else {
        return 0;
    };
    let project = |v: Vec4| {
        let ndc = v.truncate() / v.w;
        (
            Vec2::new(
                (ndc.x * 0.5 + 0.5) * width as f32,
                (0.5 - ndc.y * 0.5) * height as f32,
            ),
            ndc.z * 0.5 + 0.5,
        )
    };
    let (p0, z0) = project(a);
    let (p1, z1) = project(b);

    let bounds_max = Vec2::new(width as f32 - 0.5, height as f32 - 0.5);
    let Some((t0, t1)) = clip_to_rect(p0, p1, Vec2::ZERO, bounds_max) else {
        return 0;
    };
    let (start, end) = (p0.lerp(p1, t0), p0.lerp(p1, t1));
    let (start_depth, end_depth) = (z0 + (z1 - z0) * t0, z0 + (z1 - z0) * t1);

    let (mut x, mut y) = (start.x.round() as i64, start.y.round() as i64);
    let (x1, y1) = (end.x.round() as i64, end.y.round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let steps = dx.max(-dy).max(1) as f32;

    let mut emitted = 0;
    let mut step = 0;
    loop {
        if x >= 0 && y >= 0 && x < width as i64 && y < height as i64 {
            let t = step as f32 / steps;
            emit(x as u32, y as u32, start_depth + (end_depth - start_depth) * t);
            emitted += 1;
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        step += 1;
    }
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, z: f32, w: f32) -> ClipVertex {
        ClipVertex {
            clip: Vec4::new(x, y, z, w),
            world: Vec3::new(x, y, z),
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        }
    }

    /// Counter-clockwise in NDC, covering the lower-left half of the viewport.
    fn ccw_triangle() -> [ClipVertex; 3] {
        [
            vertex(-1.0, -1.0, 0.0, 1.0),
            vertex(1.0, -1.0, 0.0, 1.0),
            vertex(-1.0, 1.0, 0.0, 1.0),
        ]
    }

    fn count(triangle: &[ClipVertex; 3], side: Side) -> usize {
        rasterize_triangle(triangle, 8, 8, side, &mut |_: &Fragment| {})
    }

    #[test]
    fn test_front_faces_are_counter_clockwise() {
        let front = ccw_triangle();
        let mut back = front;
        back.swap(1, 2);

        assert!(count(&front, Side::Front) > 0);
        assert_eq!(count(&back, Side::Front), 0);
        assert_eq!(count(&front, Side::Back), 0);
        assert_eq!(count(&back, Side::Double), count(&front, Side::Double));
    }

    #[test]
    fn test_fragments_report_facing_and_depth() {
        let mut back = ccw_triangle();
        back.swap(1, 2);
        let mut seen = Vec::new();
        rasterize_triangle(&back, 4, 4, Side::Double, &mut |f: &Fragment| seen.push(*f));
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|f| !f.front_facing));
        assert!(seen.iter().all(|f| (f.depth - 0.5).abs() < 1e-5));
    }

    #[test]
    fn test_triangle_behind_near_plane_is_dropped() {
        let behind = [
            vertex(-1.0, -1.0, -2.0, 1.0),
            vertex(1.0, -1.0, -2.0, 1.0),
            vertex(-1.0, 1.0, -2.0, 1.0),
        ];
        assert!(clip_near(&behind).is_empty());
        assert_eq!(count(&behind, Side::Double), 0);
    }

    #[test]
    fn test_straddling_triangle_clips_to_quad() {
        let straddling = [
            vertex(-1.0, -1.0, -2.0, 1.0),
            vertex(1.0, -1.0, 0.0, 1.0),
            vertex(-1.0, 1.0, 0.0, 1.0),
        ];
        let polygon = clip_near(&straddling);
        assert_eq!(polygon.len(), 4);
        assert!(polygon.iter().all(|v| v.near_distance() >= -1e-6));
    }

    #[test]
    fn test_horizontal_line_covers_span() {
        let mut pixels = Vec::new();
        let emitted = rasterize_line(
            Vec4::new(-1.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            10,
            10,
            &mut |x, y, _| pixels.push((x, y)),
        );
        assert_eq!(emitted, pixels.len());
        assert!(pixels.len() >= 9);
        assert!(pixels.iter().all(|&(_, y)| y == pixels[0].1));
    }

    #[test]
    fn test_line_fully_off_screen_emits_nothing() {
        let emitted = rasterize_line(
            Vec4::new(3.0, 3.0, 0.0, 1.0),
            Vec4::new(5.0, 4.0, 0.0, 1.0),
            10,
            10,
            &mut |_, _, _| {},
        );
        assert_eq!(emitted, 0);
    }
}
