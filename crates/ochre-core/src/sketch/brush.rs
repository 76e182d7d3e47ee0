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

//! Defines the simplification-relevant subset of a brush description.

use serde::{Deserialize, Serialize};

/// The parameters of a brush that the stroke simplifier consumes.
///
/// One immutable instance exists per brush type; the host application's
/// brush catalog supplies it alongside each stroke. This is deliberately a
/// plain parameter struct rather than a handle into a catalog so the
/// simplifier has no ambient lookups.
///
/// The head/tail fields bound how aggressively the simplifier may thin the
/// ends of a stroke: at least `head_min_points` retained points are
/// enforced walking forward from the first point (every
/// `head_point_step`-th one kept), and likewise `tail_min_points` /
/// `tail_point_step` walking backward from the last. `middle_point_step`,
/// when nonzero, keeps every Nth point over the whole stroke so textured
/// brushes keep their cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSimplificationParams {
    /// Whether strokes drawn with this brush may be simplified at all.
    pub supports_simplification: bool,
    /// Keep every Nth control point regardless of error (0 disables).
    pub middle_point_step: usize,
    /// Minimum number of retained points at the head of a stroke.
    pub head_min_points: i32,
    /// Keep cadence while satisfying `head_min_points`.
    pub head_point_step: i32,
    /// Minimum number of retained points at the tail of a stroke.
    pub tail_min_points: i32,
    /// Keep cadence while satisfying `tail_min_points`.
    pub tail_point_step: i32,
    /// Pressure-independent part of the spawn interval, in canvas units.
    pub spawn_interval_base: f32,
    /// Pressure-proportional part of the spawn interval, in canvas units.
    pub spawn_interval_pressure_scale: f32,
}

impl BrushSimplificationParams {
    /// The minimum spacing between geometry spawns at a given trigger
    /// pressure. Head/tail preservation runs advance their keep counter
    /// only once the walk has moved this far from the last counted point.
    #[inline]
    pub fn spawn_interval(&self, pressure: f32) -> f32 {
        self.spawn_interval_base + self.spawn_interval_pressure_scale * pressure
    }
}

impl Default for BrushSimplificationParams {
    /// Defaults mirror a plain line brush: simplification enabled, single
    /// guaranteed point at each end, no middle-point cadence.
    fn default() -> Self {
        Self {
            supports_simplification: true,
            middle_point_step: 0,
            head_min_points: 1,
            head_point_step: 1,
            tail_min_points: 1,
            tail_point_step: 1,
            spawn_interval_base: 0.0,
            spawn_interval_pressure_scale: 0.0,
        }
    }
}
