// Copyright 2026 the Ochre Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Simplifies a stroke's control points using the Ramer-Douglas-Peucker
//! algorithm. (See <http://karthaus.nl/rdp/>)
//!
//! Simplification is a two-phase pass over the stroke's drop mask:
//!
//! 1. Classic RDP flags interior points whose distance to the local chord
//!    is within the error budget as droppable.
//! 2. Structural "keep" rules override phase 1 where the brush needs
//!    points regardless of geometric error: around direction reversals, on
//!    a periodic cadence for textured brushes, and at the stroke's head
//!    and tail. Keep rules only ever clear drop flags, never set them.

use ochre_core::math::{Vec3, EPSILON};
use ochre_core::sketch::{BrushSimplificationParams, ControlPoint, Stroke};

/// Computes which of a stroke's control points can be dropped with a
/// bounded approximation error.
///
/// The `level` scalar tunes aggressiveness; the squared error budget for a
/// stroke is `(brush_scale * level * 0.001)²` in canvas-local units.
#[derive(Debug, Clone, Copy)]
pub struct StrokeSimplifier {
    level: f32,
}

impl StrokeSimplifier {
    /// Creates a simplifier with the given aggressiveness level.
    pub fn new(level: f32) -> Self {
        Self { level }
    }

    /// The simplification level this instance was built with.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Works out what simplification level is needed to get a specified
    /// level of reduction, `reduction` being a target dropped fraction in
    /// `[0, 1]`.
    pub fn calculate_level_for_reduction(reduction: f32) -> f32 {
        2f32.powf(10.0 * (0.9 - reduction))
    }

    /// Fills in `stroke.drop_mask` for the given brush.
    ///
    /// No-op if the brush opts out of simplification or the stroke has
    /// fewer than four control points. Existing drop flags are not cleared
    /// first; re-running with the same level is idempotent, and undo
    /// restores the mask by calling [`Stroke::reset_drop_mask`].
    ///
    /// # Panics
    /// Panics if the drop mask does not parallel the control point array;
    /// that is a programming error in the caller, not a runtime condition.
    pub fn calculate_points_to_drop(
        &self,
        stroke: &mut Stroke,
        brush: &BrushSimplificationParams,
    ) {
        if !brush.supports_simplification {
            return;
        }
        assert_eq!(
            stroke.drop_mask.len(),
            stroke.control_points.len(),
            "drop mask must parallel the control point array"
        );
        let sqr_max_error = (stroke.brush_scale * self.level * 0.001).powi(2);
        if stroke.control_points.len() >= 4 {
            let points = &stroke.control_points;
            let to_drop = &mut stroke.drop_mask;
            flag_points_to_drop(points, to_drop, 0, points.len() - 1, sqr_max_error);
            flag_points_to_keep(points, to_drop, brush);
            log::debug!(
                "simplified stroke at level {}: {} of {} control points flagged",
                self.level,
                to_drop.iter().filter(|d| **d).count(),
                points.len()
            );
        }
    }
}

/// Phase 2: clears drop flags the brush's structural rules insist on.
fn flag_points_to_keep(
    points: &[ControlPoint],
    to_drop: &mut [bool],
    brush: &BrushSimplificationParams,
) {
    if points.len() < 2 {
        return;
    }
    // Force-keep a bounded run of points on both sides of every direction
    // reversal, so sharp turnarounds survive simplification.
    let mut last_diff = points[1].position - points[0].position;
    for i in 1..points.len() - 2 {
        let next_diff = points[i + 1].position - points[i].position;
        if last_diff.dot(next_diff) < 0.0 {
            save_point_sequence(points, to_drop, i, -1, brush);
            save_point_sequence(points, to_drop, i, 1, brush);
        }
        last_diff = next_diff;
    }

    // Textured brushes keep every Nth point outright for cadence.
    if brush.middle_point_step != 0 {
        for i in (0..to_drop.len()).step_by(brush.middle_point_step) {
            to_drop[i] = false;
        }
    }

    // The head and tail of the stroke are always preserved.
    save_point_sequence(points, to_drop, 0, 1, brush);
    save_point_sequence(points, to_drop, points.len() - 1, -1, brush);
}

/// Flags a control point to keep, plus further points in the given
/// direction: one kept per `step` of the countdown, with the countdown
/// advancing each time the walk moves more than the brush's spawn interval
/// past the last counted point.
fn save_point_sequence(
    points: &[ControlPoint],
    to_drop: &mut [bool],
    point: usize,
    dir: isize,
    brush: &BrushSimplificationParams,
) {
    let mut count = if dir == 1 {
        brush.head_min_points
    } else {
        brush.tail_min_points
    };
    let step = if dir == 1 {
        brush.head_point_step
    } else {
        brush.tail_point_step
    };
    let mut last_point = point;
    to_drop[point] = false;
    let spawn_interval = brush.spawn_interval(points[point].pressure);
    let sqr_min_dist = spawn_interval * spawn_interval;

    let mut i = point as isize + dir;
    while i >= 0 && (i as usize) < points.len() {
        let diff = points[i as usize].position - points[last_point].position;
        if count % step == 0 {
            to_drop[i as usize] = false;
        }
        if diff.length_squared() >= sqr_min_dist {
            count -= 1;
            if count <= 0 {
                return;
            }
            last_point = i as usize;
        }
        i += dir;
    }
    // The walk fell off the array before the countdown finished; still
    // guarantee the immediate neighbor survives.
    to_drop[(point as isize + dir) as usize] = false;
}

/// Phase 1: classic recursive RDP over the index range `[first, last]`.
///
/// Finds the interior point farthest from the chord; if it exceeds the
/// error budget, recurses on both halves, otherwise flags the whole
/// interior of the range as droppable.
fn flag_points_to_drop(
    points: &[ControlPoint],
    to_drop: &mut [bool],
    first: usize,
    last: usize,
    sqr_max_error: f32,
) {
    let start = points[first].position;
    let end = points[last].position;
    let line = end - start;
    let line_length = line.length();
    let line_dir = line.normalize();

    let mut farthest_index = None;
    let mut farthest_distance = 0.0f32;
    for i in first + 1..last {
        let diff = points[i].position - start;

        // When checking the closest distance, we can't just take the
        // closest point to the line, as the line is infinite - we need the
        // closest point on the line *segment*: clamp the projection to the
        // segment, falling back to the nearer endpoint outside it.
        let segment_distance = diff.dot(line_dir);
        let sqr_distance = if segment_distance < EPSILON {
            // Also covers degenerate (near-zero-length) chords, whose
            // normalized direction is the zero vector.
            diff.length_squared()
        } else if segment_distance > line_length {
            (points[i].position - end).length_squared()
        } else {
            diff.cross(line_dir).length_squared()
        };
        if sqr_distance > sqr_max_error && sqr_distance > farthest_distance {
            // Strict comparison: the first point reaching the maximum in
            // scan order wins the tie.
            farthest_index = Some(i);
            farthest_distance = sqr_distance;
        }
    }

    if let Some(farthest) = farthest_index {
        flag_points_to_drop(points, to_drop, first, farthest, sqr_max_error);
        flag_points_to_drop(points, to_drop, farthest, last, sqr_max_error);
        return;
    }

    for flag in &mut to_drop[first + 1..last] {
        *flag = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ochre_core::math::LinearRgba;
    use uuid::Uuid;

    fn stroke_from_positions(positions: &[Vec3]) -> Stroke {
        let points = positions
            .iter()
            .enumerate()
            .map(|(i, p)| ControlPoint::at(*p, 10 * i as u32))
            .collect();
        Stroke::new(Uuid::nil(), 1.0, 1.0, LinearRgba::WHITE, points)
    }

    fn collinear_stroke(n: usize) -> Stroke {
        stroke_from_positions(
            &(0..n)
                .map(|i| Vec3::new(i as f32, 0.0, 0.0))
                .collect::<Vec<_>>(),
        )
    }

    /// Quarter circle of unit radius; convex and smooth, so RDP behaves
    /// predictably.
    fn arc_stroke(n: usize) -> Stroke {
        stroke_from_positions(
            &(0..n)
                .map(|i| {
                    let t = (i as f32 / (n - 1) as f32) * std::f32::consts::FRAC_PI_2;
                    Vec3::new(t.cos(), t.sin(), 0.0)
                })
                .collect::<Vec<_>>(),
        )
    }

    fn dropped(stroke: &Stroke) -> usize {
        stroke.drop_mask.iter().filter(|d| **d).count()
    }

    #[test]
    fn test_collinear_interior_points_dropped() {
        let mut stroke = collinear_stroke(6);
        let brush = BrushSimplificationParams::default();
        StrokeSimplifier::new(1000.0).calculate_points_to_drop(&mut stroke, &brush);
        // Interior points collapse onto the chord; the head/tail minimum
        // point rules additionally keep the immediate neighbors of the
        // endpoints.
        assert_eq!(stroke.drop_mask, vec![false, false, true, true, false, false]);
    }

    #[test]
    fn test_no_op_below_four_points() {
        let mut stroke = collinear_stroke(3);
        let brush = BrushSimplificationParams::default();
        StrokeSimplifier::new(1000.0).calculate_points_to_drop(&mut stroke, &brush);
        assert_eq!(dropped(&stroke), 0);
    }

    #[test]
    fn test_no_op_when_brush_opts_out() {
        let mut stroke = collinear_stroke(6);
        let brush = BrushSimplificationParams {
            supports_simplification: false,
            ..Default::default()
        };
        StrokeSimplifier::new(1000.0).calculate_points_to_drop(&mut stroke, &brush);
        assert_eq!(dropped(&stroke), 0);
    }

    #[test]
    fn test_endpoints_never_dropped() {
        let brush = BrushSimplificationParams::default();
        for level in [0.1, 1.0, 10.0, 1000.0] {
            let mut stroke = arc_stroke(25);
            StrokeSimplifier::new(level).calculate_points_to_drop(&mut stroke, &brush);
            assert!(!stroke.drop_mask[0], "head dropped at level {level}");
            assert!(
                !stroke.drop_mask[stroke.len() - 1],
                "tail dropped at level {level}"
            );
        }
    }

    #[test]
    fn test_resimplification_is_idempotent() {
        let brush = BrushSimplificationParams::default();
        let simplifier = StrokeSimplifier::new(50.0);
        let mut stroke = arc_stroke(40);
        simplifier.calculate_points_to_drop(&mut stroke, &brush);
        let first_pass = stroke.drop_mask.clone();
        simplifier.calculate_points_to_drop(&mut stroke, &brush);
        assert_eq!(stroke.drop_mask, first_pass);
    }

    #[test]
    fn test_reduction_monotone_in_level() {
        let brush = BrushSimplificationParams::default();
        let mut previous = 0;
        for level in [1.0, 4.0, 16.0, 64.0, 256.0] {
            let mut stroke = arc_stroke(40);
            StrokeSimplifier::new(level).calculate_points_to_drop(&mut stroke, &brush);
            let n = dropped(&stroke);
            assert!(
                n >= previous,
                "level {level} dropped {n} points, fewer than {previous}"
            );
            previous = n;
        }
    }

    #[test]
    fn test_dropped_points_within_error_bound() {
        let brush = BrushSimplificationParams::default();
        let level = 30.0;
        let mut stroke = arc_stroke(30);
        StrokeSimplifier::new(level).calculate_points_to_drop(&mut stroke, &brush);
        let sqr_max_error = (stroke.brush_scale * level * 0.001).powi(2);
        assert!(dropped(&stroke) > 0, "test wants at least one dropped point");

        // Every dropped point must sit within the error budget of the
        // chord between its bounding retained points.
        let retained: Vec<usize> = (0..stroke.len())
            .filter(|i| !stroke.drop_mask[*i])
            .collect();
        for pair in retained.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let start = stroke.control_points[a].position;
            let end = stroke.control_points[b].position;
            let dir = (end - start).normalize();
            for i in a + 1..b {
                let diff = stroke.control_points[i].position - start;
                let sqr_distance = diff.cross(dir).length_squared();
                assert!(
                    sqr_distance <= sqr_max_error,
                    "point {i} is {sqr_distance} from chord ({a}, {b}), budget {sqr_max_error}"
                );
            }
        }
    }

    #[test]
    fn test_reversal_points_kept() {
        // Out along +X and back: a sharp reversal at index 4.
        let mut positions: Vec<Vec3> = (0..5).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        positions.extend((0..4).rev().map(|i| Vec3::new(i as f32, 0.001, 0.0)));
        let mut stroke = stroke_from_positions(&positions);
        let brush = BrushSimplificationParams::default();
        StrokeSimplifier::new(1000.0).calculate_points_to_drop(&mut stroke, &brush);
        assert!(!stroke.drop_mask[4], "reversal apex must be kept");
    }

    #[test]
    fn test_middle_point_step_keeps_cadence() {
        let mut stroke = collinear_stroke(12);
        let brush = BrushSimplificationParams {
            middle_point_step: 3,
            ..Default::default()
        };
        StrokeSimplifier::new(1000.0).calculate_points_to_drop(&mut stroke, &brush);
        for i in (0..12).step_by(3) {
            assert!(!stroke.drop_mask[i], "cadence point {i} was dropped");
        }
    }

    #[test]
    fn test_level_for_reduction() {
        let level = StrokeSimplifier::calculate_level_for_reduction(0.9);
        assert!((level - 1.0).abs() < 1e-6);
        // Less reduction demands a smaller error budget... via a larger
        // exponent at 0.0 reduction.
        assert!(
            StrokeSimplifier::calculate_level_for_reduction(0.0)
                > StrokeSimplifier::calculate_level_for_reduction(0.5)
        );
    }

    #[test]
    #[should_panic(expected = "drop mask must parallel")]
    fn test_mismatched_mask_is_a_contract_violation() {
        let mut stroke = collinear_stroke(6);
        stroke.drop_mask.pop();
        let brush = BrushSimplificationParams::default();
        StrokeSimplifier::new(1.0).calculate_points_to_drop(&mut stroke, &brush);
    }
}
