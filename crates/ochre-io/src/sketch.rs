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

//! The versioned sketch stream codec.
//!
//! Stream layout:
//!
//! ```text
//! u32 sentinel
//! i32 version
//! i32 reserved (must be 0)
//! u32 size + <size> bytes of additional header data
//!
//! i32 num_strokes
//! num_strokes * {
//!   i32 brush_index
//!   f32x4 brush_color
//!   f32 brush_size
//!   u32 stroke_extension_mask
//!   u32 control_point_extension_mask
//!   [ i32/f32/u32          for each set bit in stroke_extension_mask &  0xffff ]
//!   [ u32 size + bytes     for each set bit in stroke_extension_mask & ~0xffff ]
//!   i32 num_control_points
//!   num_control_points * {
//!     f32x3 position
//!     f32x4 orientation (quat)
//!     [ i32/f32 for each set bit in control_point_extension_mask ]
//!   }
//! }
//! ```
//!
//! Extension masks make the format forward-compatible: each bit is an
//! extension ID whose data blocks appear in ascending bit order, and a
//! reader skips IDs it does not know. Data blocks for control point
//! extensions are 4 bytes each; stroke extension IDs in `[0, 15]` are
//! 4 bytes and IDs in `[16, 31]` are length-prefixed.
//!
//! Brushes are referenced by index into a palette of GUIDs built in
//! first-seen order while writing; the palette travels in the containing
//! archive's metadata, not in this stream.

use std::collections::HashMap;
use std::io::{Read, Write};

use uuid::Uuid;

use ochre_core::sketch::{ControlPoint, GroupTag, Stroke, StrokeFlags};

use crate::binary::{SketchBinaryReader, SketchBinaryWriter};
use crate::error::{Result, SketchIoError};

/// Marks the head of every sketch stream.
pub const SKETCH_SENTINEL: u32 = 0xc576_a5cd;
/// The stream version this codec writes.
pub const SKETCH_VERSION: i32 = 5;
// Versions this codec can read. 6 is reserved for the first
// length-prefixed stroke extension or additional header data.
const SKETCH_VERSION_MIN: i32 = 5;
const SKETCH_VERSION_MAX: i32 = 6;

// Stroke extension IDs. Bits in [0, 15] carry one 4-byte word; bits in
// [16, 31] carry a u32 length followed by that many bytes.
const STROKE_EXT_SINGLE_WORD_MASK: u32 = 0xffff;
/// u32 bitfield of [`StrokeFlags`].
const STROKE_EXT_FLAGS: u32 = 1 << 0;
/// f32 brush scale; omitted when exactly 1.0.
const STROKE_EXT_SCALE: u32 = 1 << 1;
/// u32 group id; omitted for `GroupTag::NONE`.
const STROKE_EXT_GROUP: u32 = 1 << 2;
/// i32 seed; readers of older files backfill deterministically.
const STROKE_EXT_SEED: u32 = 1 << 3;

// Control point extension IDs; 4 bytes each.
const CP_EXT_PRESSURE: u32 = 1 << 0;
const CP_EXT_TIMESTAMP: u32 = 1 << 1;
/// The extensions present in the native [`ControlPoint`] layout; when a
/// stream's mask matches, whole point arrays can move as raw bytes.
const CP_EXT_NATIVE: u32 = CP_EXT_PRESSURE | CP_EXT_TIMESTAMP;

/// Writes strokes to a sketch stream.
///
/// Points flagged in each stroke's drop mask are omitted from the
/// persisted arrays; the in-memory stroke is untouched. Returns the brush
/// GUID palette in index order, for the caller to store alongside the
/// stream.
///
/// The sink is left unflushed and open; the caller owns its lifecycle.
pub fn write_sketch<W: Write>(sink: W, strokes: &[Stroke]) -> Result<Vec<Uuid>> {
    let mut writer = SketchBinaryWriter::new(sink);

    writer.write_u32(SKETCH_SENTINEL)?;
    writer.write_i32(SKETCH_VERSION)?;
    writer.write_i32(0)?; // reserved for header: must be 0
    writer.write_u32(0)?; // additional header data size

    let mut brush_map: HashMap<Uuid, i32> = HashMap::new();
    let mut brush_list: Vec<Uuid> = Vec::new();

    writer.write_i32(strokes.len() as i32)?;
    for stroke in strokes {
        let brush_index = *brush_map.entry(stroke.brush_guid).or_insert_with(|| {
            brush_list.push(stroke.brush_guid);
            brush_list.len() as i32 - 1
        });

        writer.write_i32(brush_index)?;
        writer.write_color(stroke.color)?;
        writer.write_f32(stroke.brush_size)?;

        let mut stroke_ext = STROKE_EXT_FLAGS | STROKE_EXT_SEED;
        if stroke.brush_scale != 1.0 {
            stroke_ext |= STROKE_EXT_SCALE;
        }
        if stroke.group != GroupTag::NONE {
            stroke_ext |= STROKE_EXT_GROUP;
        }
        writer.write_u32(stroke_ext)?;
        writer.write_u32(CP_EXT_NATIVE)?;

        // Stroke extension fields, in order of appearance in the mask.
        writer.write_u32(stroke.flags.bits())?;
        if stroke_ext & STROKE_EXT_SCALE != 0 {
            writer.write_f32(stroke.brush_scale)?;
        }
        if stroke_ext & STROKE_EXT_GROUP != 0 {
            writer.write_u32(stroke.group.0)?;
        }
        writer.write_i32(stroke.seed)?;

        if stroke.drop_mask.iter().any(|dropped| *dropped) {
            let retained: Vec<ControlPoint> = stroke.retained_points().copied().collect();
            writer.write_i32(retained.len() as i32)?;
            writer.write_raw(&retained)?;
        } else {
            // Nothing dropped: the point array goes out as-is, no copy.
            writer.write_i32(stroke.control_points.len() as i32)?;
            writer.write_raw(&stroke.control_points)?;
        }
    }

    Ok(brush_list)
}

/// Parses a sketch stream back into strokes.
///
/// `brush_list` is the GUID palette saved alongside the stream; an
/// out-of-range brush index maps to the nil GUID rather than failing the
/// whole sketch. Strokes are returned in head-timestamp order; streams
/// with bad timing data are re-sorted with a warning, matching what the
/// writer would have produced.
pub fn read_sketch<R: Read>(source: R, brush_list: &[Uuid]) -> Result<Vec<Stroke>> {
    let mut reader = SketchBinaryReader::new(source);

    let sentinel = reader.read_u32()?;
    if sentinel != SKETCH_SENTINEL {
        log::error!("invalid sketch: bad sentinel {sentinel:#010x}");
        return Err(SketchIoError::BadSentinel { found: sentinel });
    }
    let version = reader.read_i32()?;
    if !(SKETCH_VERSION_MIN..=SKETCH_VERSION_MAX).contains(&version) {
        log::error!("invalid sketch: unsupported version {version}");
        return Err(SketchIoError::UnsupportedVersion(version));
    }
    reader.read_i32()?; // reserved for header: must be 0
    let more_header = reader.read_u32()?;
    reader.skip(more_header)?;

    let num_strokes = reader.read_i32()?;
    if num_strokes < 0 {
        return Err(SketchIoError::Malformed("negative stroke count"));
    }

    let mut strokes = Vec::with_capacity(num_strokes as usize);
    for i in 0..num_strokes {
        strokes.push(read_stroke(&mut reader, brush_list, i)?);
    }

    // Strokes are expected in timestamp order; the by-time scene list is
    // O(n) to rebuild only when they are.
    if !strokes.is_sorted_by_key(Stroke::head_timestamp_ms) {
        log::warn!("unsorted timing data in sketch; strokes re-sorted");
        strokes.sort_by_key(Stroke::head_timestamp_ms);
    }

    Ok(strokes)
}

fn read_stroke<R: Read>(
    reader: &mut SketchBinaryReader<R>,
    brush_list: &[Uuid],
    index: i32,
) -> Result<Stroke> {
    let brush_index = reader.read_i32()?;
    let brush_guid = brush_list
        .get(usize::try_from(brush_index).unwrap_or(usize::MAX))
        .copied()
        .unwrap_or_else(Uuid::nil);
    let color = reader.read_color()?;
    let brush_size = reader.read_f32()?;

    let stroke_ext = reader.read_u32()?;
    let cp_ext = reader.read_u32()?;

    let mut flags = StrokeFlags::NONE;
    let mut brush_scale = 1.0f32;
    let mut group = GroupTag::NONE;
    let mut seed = if stroke_ext & STROKE_EXT_SEED == 0 {
        // Backfill for old files saved without seeds; arbitrary but
        // deterministic.
        backfill_seed(index, &brush_guid, brush_size)
    } else {
        0
    };

    // Iterate through set bits of the mask starting from the LSB:
    //   isolate lowest set bit: x & !(x - 1)
    //   clear lowest set bit:   x & (x - 1)
    let mut fields = stroke_ext;
    while fields != 0 {
        let bit = fields & !(fields - 1);
        match bit {
            STROKE_EXT_FLAGS => flags = StrokeFlags::from_bits(reader.read_u32()?),
            STROKE_EXT_SCALE => brush_scale = reader.read_f32()?,
            STROKE_EXT_GROUP => group = GroupTag(reader.read_u32()?),
            STROKE_EXT_SEED => seed = reader.read_i32()?,
            _ => {
                // Skip unknown extension.
                if bit & STROKE_EXT_SINGLE_WORD_MASK != 0 {
                    log::warn!("skipping unknown stroke extension bit {bit:#x}");
                    reader.read_u32()?;
                } else {
                    let size = reader.read_u32()?;
                    log::warn!("skipping unknown stroke extension bit {bit:#x} ({size} bytes)");
                    reader.skip(size)?;
                }
            }
        }
        fields &= fields - 1;
    }

    let num_points = reader.read_i32()?;
    if num_points < 0 {
        return Err(SketchIoError::Malformed("negative control point count"));
    }
    let num_points = num_points as usize;

    let control_points = if cp_ext == CP_EXT_NATIVE {
        // Fast path: the stream layout matches ControlPoint byte-for-byte.
        reader.read_raw::<ControlPoint>(num_points)?
    } else {
        read_points_slow(reader, cp_ext, num_points)?
    };

    let mut stroke = Stroke::new(brush_guid, brush_size, brush_scale, color, control_points);
    stroke.flags = flags;
    stroke.group = group;
    stroke.seed = seed;
    Ok(stroke)
}

/// Slow path: deserializes control points field by field for streams whose
/// extension set differs from the native layout.
fn read_points_slow<R: Read>(
    reader: &mut SketchBinaryReader<R>,
    cp_ext: u32,
    num_points: usize,
) -> Result<Vec<ControlPoint>> {
    let mut points = Vec::with_capacity(num_points);
    for _ in 0..num_points {
        let position = reader.read_vec3()?;
        let orientation = reader.read_quaternion()?;

        // Known extension field defaults.
        let mut pressure = 1.0f32;
        let mut timestamp_ms = 0u32;

        let mut fields = cp_ext;
        while fields != 0 {
            let bit = fields & !(fields - 1);
            match bit {
                CP_EXT_PRESSURE => pressure = reader.read_f32()?,
                CP_EXT_TIMESTAMP => timestamp_ms = reader.read_u32()?,
                _ => {
                    // Skip unknown extension.
                    reader.read_u32()?;
                }
            }
            fields &= fields - 1;
        }
        points.push(ControlPoint::new(position, orientation, pressure, timestamp_ms));
    }
    Ok(points)
}

/// Deterministic seed for strokes from files predating the seed
/// extension.
fn backfill_seed(index: i32, brush_guid: &Uuid, brush_size: f32) -> i32 {
    let mut seed = index;
    for byte in brush_guid.as_bytes() {
        seed = seed.wrapping_mul(397) ^ i32::from(*byte);
    }
    seed.wrapping_mul(397) ^ brush_size.to_bits() as i32
}
