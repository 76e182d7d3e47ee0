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

//! # Ochre Sketch
//!
//! Operations over finalized strokes: Ramer-Douglas-Peucker stroke
//! simplification and the tiered sketch cost meter.
//!
//! Everything here is synchronous and single-threaded: the simplifier runs
//! once per finalized stroke before it is committed to the scene, and the
//! meter is adjusted from the same thread as strokes are added and removed.

#![warn(missing_docs)]

pub mod meter;
pub mod simplify;

pub use meter::{MeterTier, SketchMeter, TIER_CAPACITY};
pub use simplify::StrokeSimplifier;
