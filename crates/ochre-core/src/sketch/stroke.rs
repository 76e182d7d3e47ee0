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

//! Defines a finalized pen stroke and its associated flags.

use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};
use uuid::Uuid;

use crate::math::LinearRgba;
use crate::sketch::ControlPoint;

/// Per-stroke flags serialized into sketch files.
///
/// Multiple flags can be combined using bitwise operations. The raw bit
/// layout is part of the file format and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeFlags {
    bits: u32,
}

impl StrokeFlags {
    /// No flags set.
    pub const NONE: Self = Self { bits: 0 };
    // Bit 0 is a deprecated flag retained for file compatibility; it is
    // never set by current code.
    /// This stroke continues a group that undo/redo treats as a single
    /// entity (e.g. mirrored strokes recorded together). Distinct from
    /// [`GroupTag`], which is a user-facing selection grouping.
    pub const IS_GROUP_CONTINUE: Self = Self { bits: 1 << 1 };

    /// Creates a flag set from raw bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns `true` if all flags in `other` are set in `self`.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Sets the flags in `other`.
    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.bits |= other.bits;
    }

    /// Clears the flags in `other`.
    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.bits &= !other.bits;
    }
}

impl Default for StrokeFlags {
    #[inline]
    fn default() -> Self {
        Self::NONE
    }
}

impl BitOr for StrokeFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for StrokeFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

/// A user-facing selection group a stroke belongs to.
///
/// Strokes selected and moved together share a tag; `GroupTag::NONE` means
/// ungrouped. The inner id is what the stream codec writes when the tag is
/// not `NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GroupTag(pub u32);

impl GroupTag {
    /// The "ungrouped" tag. Never serialized.
    pub const NONE: Self = Self(0);
}

/// A finalized pen stroke.
///
/// The control point array is immutable once the stroke is finalized; the
/// parallel `drop_mask` is the only mutable part, filled in by the
/// simplifier and possibly reverted by undo. Downstream consumers (mesh
/// generation, the save pipeline) skip points whose mask entry is `true`.
///
/// Invariant: `drop_mask.len() == control_points.len()`. Constructors
/// establish it and mutating entry points assert it; a violation is a
/// programming error, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Identifies the brush used to draw this stroke.
    pub brush_guid: Uuid,
    /// Brush size at draw time, in pointer space.
    pub brush_size: f32,
    /// Canvas scale at draw time; `brush_size * brush_scale` is the size in
    /// canvas-local space.
    pub brush_scale: f32,
    /// Stroke color.
    pub color: LinearRgba,
    /// Serialized per-stroke flags.
    pub flags: StrokeFlags,
    /// Seed for deterministic per-stroke randomness (spray brushes etc.).
    pub seed: i32,
    /// Selection group, if any.
    pub group: GroupTag,
    /// The ordered samples of the stroke.
    pub control_points: Vec<ControlPoint>,
    /// Parallel to `control_points`; `true` marks a point the simplifier
    /// decided may be omitted.
    pub drop_mask: Vec<bool>,
}

impl Stroke {
    /// Creates a finalized stroke from its samples. The drop mask starts
    /// all-false (every point retained).
    pub fn new(
        brush_guid: Uuid,
        brush_size: f32,
        brush_scale: f32,
        color: LinearRgba,
        control_points: Vec<ControlPoint>,
    ) -> Self {
        let mask_len = control_points.len();
        Self {
            brush_guid,
            brush_size,
            brush_scale,
            color,
            flags: StrokeFlags::NONE,
            seed: 0,
            group: GroupTag::NONE,
            control_points,
            drop_mask: vec![false; mask_len],
        }
    }

    /// Number of control points in the stroke.
    #[inline]
    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    /// Returns `true` if the stroke has no control points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Timestamp of the first control point, in milliseconds. Loaders use
    /// this to restore strokes in time order.
    #[inline]
    pub fn head_timestamp_ms(&self) -> u32 {
        self.control_points.first().map_or(0, |cp| cp.timestamp_ms)
    }

    /// Iterates over the control points whose drop flag is clear — the
    /// subsequence geometry generation and the save pipeline consume.
    pub fn retained_points(&self) -> impl Iterator<Item = &ControlPoint> {
        debug_assert_eq!(
            self.drop_mask.len(),
            self.control_points.len(),
            "drop mask must parallel the control point array"
        );
        self.control_points
            .iter()
            .zip(self.drop_mask.iter())
            .filter(|(_, dropped)| !**dropped)
            .map(|(cp, _)| cp)
    }

    /// Number of points that survive the drop mask.
    pub fn retained_len(&self) -> usize {
        self.drop_mask.iter().filter(|dropped| !**dropped).count()
    }

    /// Clears the drop mask, un-simplifying the stroke (undo path).
    pub fn reset_drop_mask(&mut self) {
        self.drop_mask.fill(false);
    }
}
