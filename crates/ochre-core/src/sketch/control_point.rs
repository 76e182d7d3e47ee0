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

//! Defines the per-sample control point of a stroke.

use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// One sampled pose + pressure + time sample along a pen stroke.
///
/// Control points are ordered; the index within the stroke is their only
/// identity. Once a stroke is finalized the samples are immutable — only
/// the stroke's drop mask changes.
///
/// The layout is pinned (`#[repr(C)]`, `Pod`, no padding: 12 + 16 + 4 + 4 =
/// 36 bytes) because the sketch file fast path writes control point arrays
/// to disk byte-for-byte. Field order must match the serialized field order
/// of the stream codec: position, orientation, then the extension fields
/// (pressure, timestamp) in mask-bit order.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct ControlPoint {
    /// Position of the pointer in canvas-local space.
    pub position: Vec3,
    /// Orientation of the pointer.
    pub orientation: Quaternion,
    /// Trigger pressure in `[0, 1]`; 1.0 is nominal.
    pub pressure: f32,
    /// Sketch time of creation, in milliseconds.
    pub timestamp_ms: u32,
}

impl ControlPoint {
    /// Creates a control point from all four samples.
    #[inline]
    pub const fn new(
        position: Vec3,
        orientation: Quaternion,
        pressure: f32,
        timestamp_ms: u32,
    ) -> Self {
        Self {
            position,
            orientation,
            pressure,
            timestamp_ms,
        }
    }

    /// Creates a control point at a position with identity orientation,
    /// nominal pressure, and the given timestamp. Convenient for tests and
    /// procedural strokes.
    #[inline]
    pub const fn at(position: Vec3, timestamp_ms: u32) -> Self {
        Self::new(position, Quaternion::IDENTITY, 1.0, timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_point_layout_is_pinned() {
        // The stream codec's fast path relies on this exact size.
        assert_eq!(std::mem::size_of::<ControlPoint>(), 36);
        assert_eq!(std::mem::align_of::<ControlPoint>(), 4);
    }

    #[test]
    fn test_control_point_at() {
        let cp = ControlPoint::at(Vec3::new(1.0, 2.0, 3.0), 42);
        assert_eq!(cp.orientation, Quaternion::IDENTITY);
        assert_eq!(cp.pressure, 1.0);
        assert_eq!(cp.timestamp_ms, 42);
    }
}
