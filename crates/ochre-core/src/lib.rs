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

//! # Ochre Core
//!
//! Foundational crate containing the math primitives and the sketch data
//! model shared by the rest of the workspace: control points, strokes,
//! and brush parameters.

#![warn(missing_docs)]

pub mod math;
pub mod sketch;

pub use sketch::{BrushSimplificationParams, ControlPoint, GroupTag, Stroke, StrokeFlags};
