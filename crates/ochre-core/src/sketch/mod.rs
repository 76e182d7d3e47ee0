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

//! The sketch data model: control points, strokes, and brush parameters.
//!
//! A finished pen stroke is captured as an ordered array of
//! [`ControlPoint`] samples plus per-stroke brush state. The stroke carries
//! a parallel *drop mask* that the simplifier fills in: a flagged point may
//! be omitted by downstream geometry generation and by the save pipeline,
//! while the full sample array is retained in memory so the decision can be
//! revisited (undo, re-simplification at a different level).

pub mod brush;
pub mod control_point;
pub mod stroke;

pub use self::brush::BrushSimplificationParams;
pub use self::control_point::ControlPoint;
pub use self::stroke::{GroupTag, Stroke, StrokeFlags};
