//! Line rasterization algorithms.
//!
//! - [`BresenhamLine`]: integer error-term stepping, the one used for edges
//! - [`subdivide`]: recursive midpoint bisection, kept as an alternative
//! - [`clip_to_viewport`]: trims segments to the screen before either walk

use crate::math::vec2::Vec2;

/// Segments shorter than this (in pixels) are not subdivided any further.
pub const MIDPOINT_THRESHOLD: f32 = 0.5;

/// Pixels of slack kept around the viewport when clipping a segment.
///
/// Truncating a clipped endpoint can move it by up to one pixel, so the clip
/// rectangle is a little larger than the screen.
pub const CLIP_MARGIN: f32 = 2.0;

/// Clips the segment `p0`-`p1` to the viewport `[0, width) x [0, height)`
/// grown by [`CLIP_MARGIN`] on every side (Liang-Barsky).
///
/// Returns `None` when an endpoint is non-finite or no part of the segment
/// reaches the rectangle. Segments already inside come back unchanged.
pub fn clip_to_viewport(p0: Vec2, p1: Vec2, width: u32, height: u32) -> Option<(Vec2, Vec2)> {
    if !p0.is_finite() || !p1.is_finite() {
        return None;
    }
    let (min_x, min_y) = (-f64::from(CLIP_MARGIN), -f64::from(CLIP_MARGIN));
    let max_x = f64::from(width) - 1.0 + f64::from(CLIP_MARGIN);
    let max_y = f64::from(height) - 1.0 + f64::from(CLIP_MARGIN);

    let inside = |p: Vec2| {
        let (x, y) = (f64::from(p.x), f64::from(p.y));
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    };
    if inside(p0) && inside(p1) {
        return Some((p0, p1));
    }

    // Wide coordinates keep the parametric form exact for far endpoints.
    let (x0, y0) = (f64::from(p0.x), f64::from(p0.y));
    let (dx, dy) = (f64::from(p1.x) - x0, f64::from(p1.y) - y0);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            // Parallel to this edge: either fully outside or unconstrained.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| Vec2::new((x0 + t * dx) as f32, (y0 + t * dy) as f32);
    Some((at(t0), at(t1)))
}

/// Iterator over the pixels of a line using Bresenham's algorithm.
///
/// Bresenham's algorithm determines which pixels to light using only integer
/// arithmetic. It tracks an error term: the distance between the ideal line
/// and the current pixel. Each step moves along x, along y, or diagonally,
/// depending on which keeps the error smallest.
///
/// Both endpoints are included and the run is 8-connected, with exactly
/// `max(|dx|, |dy|) + 1` pixels. The walk always starts from the
/// lexicographically smaller `(x, y)` endpoint, so swapping the arguments
/// yields the same pixel set.
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    remaining: usize,
}

impl BresenhamLine {
    pub fn new(from: (i32, i32), to: (i32, i32)) -> Self {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };
        let (x0, y0) = (i64::from(start.0), i64::from(start.1));
        let (x1, y1) = (i64::from(end.0), i64::from(end.1));

        // Absolute distances along each axis.
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 <= x1 { 1 } else { -1 },
            sy: if y0 <= y1 { 1 } else { -1 },
            // Positive error favors an x step, negative a y step.
            err: dx - dy,
            remaining: dx.max(dy) as usize + 1,
        }
    }

    /// Truncates both screen points to integers and builds the line.
    pub fn from_points(p0: Vec2, p1: Vec2) -> Self {
        Self::new((p0.x as i32, p0.y as i32), (p1.x as i32, p1.y as i32))
    }
}

impl Iterator for BresenhamLine {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let pixel = (self.x as i32, self.y as i32);

        if self.x == self.x1 && self.y == self.y1 {
            self.remaining = 0;
            return Some(pixel);
        }
        self.remaining -= 1;

        // Doubling the error keeps everything in integers.
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        // Both branches may fire, giving a diagonal step.
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BresenhamLine {}

/// Recursive midpoint subdivision.
///
/// Plots the midpoint of `p0`-`p1`, then recurses into both halves until a
/// segment is shorter than [`MIDPOINT_THRESHOLD`]. A segment already shorter
/// than the threshold plots nothing. Only midpoints are plotted, so the
/// result is not guaranteed to be connected. Recursion depth is bounded by
/// `ceil(log2(distance / MIDPOINT_THRESHOLD))`.
pub fn subdivide(p0: Vec2, p1: Vec2, plot: &mut impl FnMut(Vec2)) {
    subdivide_at_depth(p0, p1, 0, &mut |point, _| plot(point));
}

fn subdivide_at_depth<F: FnMut(Vec2, u32)>(p0: Vec2, p1: Vec2, depth: u32, plot: &mut F) {
    // Negated so a NaN distance also stops the recursion.
    if !(p0.distance(p1) >= MIDPOINT_THRESHOLD) {
        return;
    }
    let middle = p0.midpoint(p1);
    plot(middle, depth);
    subdivide_at_depth(p0, middle, depth + 1, plot);
    subdivide_at_depth(middle, p1, depth + 1, plot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn pixels(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
        BresenhamLine::new(from, to).collect()
    }

    #[test]
    fn shallow_line_matches_known_run() {
        assert_eq!(
            pixels((0, 0), (5, 2)),
            vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]
        );
    }

    #[test]
    fn coincident_endpoints_give_one_pixel() {
        assert_eq!(pixels((7, -3), (7, -3)), vec![(7, -3)]);
    }

    #[test]
    fn runs_are_complete_and_connected() {
        let range = -4i32..=4;
        for x0 in range.clone() {
            for y0 in range.clone() {
                for x1 in range.clone() {
                    for y1 in range.clone() {
                        let expected = (x1 - x0).abs().max((y1 - y0).abs()) as usize + 1;
                        let run: Vec<_> = BresenhamLine::new((x0, y0), (x1, y1)).collect();
                        assert_eq!(run.len(), expected, "({x0},{y0})-({x1},{y1})");
                        assert!(run.contains(&(x0, y0)));
                        assert!(run.contains(&(x1, y1)));
                        for pair in run.windows(2) {
                            let (ax, ay) = pair[0];
                            let (bx, by) = pair[1];
                            assert!((ax - bx).abs() <= 1 && (ay - by).abs() <= 1);
                            assert_ne!(pair[0], pair[1]);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn argument_order_does_not_change_pixel_set() {
        let cases = [((0, 0), (2, 1)), ((-3, 5), (4, -2)), ((10, 0), (0, 7)), ((1, 1), (1, 9))];
        for (a, b) in cases {
            let forward: HashSet<_> = pixels(a, b).into_iter().collect();
            let backward: HashSet<_> = pixels(b, a).into_iter().collect();
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn from_points_truncates_coordinates() {
        let run: Vec<_> = BresenhamLine::from_points(Vec2::new(0.9, 0.2), Vec2::new(2.7, 0.99)).collect();
        assert_eq!(run, vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn midpoint_below_threshold_plots_nothing() {
        let mut plotted = Vec::new();
        subdivide(Vec2::new(1.0, 1.0), Vec2::new(1.2, 1.3), &mut |p| plotted.push(p));
        assert!(plotted.is_empty());
    }

    #[test]
    fn midpoint_plots_midpoint_before_halves() {
        let mut plotted = Vec::new();
        subdivide(Vec2::ZERO, Vec2::new(1.0, 0.0), &mut |p| plotted.push(p.x));
        assert_eq!(plotted, vec![0.5, 0.25, 0.75]);
    }

    #[test]
    fn midpoint_points_stay_on_segment() {
        let (p0, p1) = (Vec2::new(2.0, 3.0), Vec2::new(40.0, 22.0));
        let length = p0.distance(p1);
        let mut count = 0;
        subdivide(p0, p1, &mut |p| {
            count += 1;
            assert_relative_eq!(p0.distance(p) + p.distance(p1), length, epsilon = 1e-3);
        });
        assert!(count > 0);
    }

    #[test]
    fn midpoint_depth_is_bounded() {
        for length in [0.5f32, 1.0, 3.0, 17.0, 100.0, 1234.5] {
            let bound = (length / MIDPOINT_THRESHOLD).log2().ceil() as u32;
            let mut max_depth = 0;
            subdivide_at_depth(Vec2::ZERO, Vec2::new(length, 0.0), 0, &mut |_, depth| {
                max_depth = max_depth.max(depth);
            });
            assert!(max_depth <= bound, "length {length}: depth {max_depth} > {bound}");
        }
    }

    #[test]
    fn midpoint_stops_on_nan() {
        let mut count = 0;
        subdivide(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, &mut |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn clip_keeps_segments_inside_viewport() {
        let (a, b) = (Vec2::new(1.5, 2.0), Vec2::new(60.0, 40.25));
        assert_eq!(clip_to_viewport(a, b, 64, 64), Some((a, b)));
    }

    #[test]
    fn clip_cuts_far_endpoint_at_margin() {
        let (a, b) = clip_to_viewport(Vec2::new(10.0, 10.0), Vec2::new(40000.0, 10.0), 64, 64).unwrap();
        assert_eq!(a, Vec2::new(10.0, 10.0));
        assert_relative_eq!(b.x, 63.0 + CLIP_MARGIN, epsilon = 1e-3);
        assert_relative_eq!(b.y, 10.0);
    }

    #[test]
    fn clip_cuts_both_ends_of_crossing_diagonal() {
        let (a, b) = clip_to_viewport(Vec2::new(-1.0e6, -1.0e6), Vec2::new(1.0e6, 1.0e6), 32, 16).unwrap();
        assert_relative_eq!(a.x, -CLIP_MARGIN, epsilon = 1e-3);
        assert_relative_eq!(a.y, -CLIP_MARGIN, epsilon = 1e-3);
        assert_relative_eq!(b.x, 15.0 + CLIP_MARGIN, epsilon = 1e-3);
        assert_relative_eq!(b.y, 15.0 + CLIP_MARGIN, epsilon = 1e-3);
    }

    #[test]
    fn clip_rejects_misses_and_non_finite_points() {
        assert_eq!(clip_to_viewport(Vec2::new(-50.0, 5.0), Vec2::new(-10.0, 900.0), 64, 64), None);
        assert_eq!(clip_to_viewport(Vec2::new(100.0, 5.0), Vec2::new(1.0e9, 5.0), 64, 64), None);
        assert_eq!(clip_to_viewport(Vec2::new(5.0, 5.0), Vec2::new(0.0, f32::INFINITY), 64, 64), None);
        assert_eq!(clip_to_viewport(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, 64, 64), None);
    }
}
