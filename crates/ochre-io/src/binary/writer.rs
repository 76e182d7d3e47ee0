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

//! Helper for writing large quantities of binary data to a stream.

use bytemuck::Pod;
use std::io::Write;

use ochre_core::math::{LinearRgba, Quaternion, Vec3};

use super::CHUNK_SIZE;
use crate::error::Result;

/// Appends binary-encoded primitives and bulk `Pod` data to an output
/// sink, matching the sketch wire format (little-endian, raw float bits).
///
/// Writes go straight to the sink; nothing larger than [`CHUNK_SIZE`] is
/// staged in memory. Any sink failure propagates immediately as
/// [`crate::SketchIoError::Io`] and the stream should be considered
/// unusable afterward.
#[derive(Debug)]
pub struct SketchBinaryWriter<W: Write> {
    sink: W,
}

impl<W: Write> SketchBinaryWriter<W> {
    /// Wraps a sink. The writer does not buffer, flush, or close it;
    /// lifetime management stays with the caller.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Unwraps the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes a `u32` as four little-endian bytes.
    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.sink.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    /// Writes an `i32` as four little-endian bytes.
    #[inline]
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.sink.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    /// Writes an `f32` as its raw IEEE-754 bits, little-endian.
    #[inline]
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.sink.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    /// Writes a vector as three consecutive floats.
    pub fn write_vec3(&mut self, value: Vec3) -> Result<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)
    }

    /// Writes a quaternion as four consecutive floats (x, y, z, w).
    pub fn write_quaternion(&mut self, value: Quaternion) -> Result<()> {
        self.write_f32(value.x)?;
        self.write_f32(value.y)?;
        self.write_f32(value.z)?;
        self.write_f32(value.w)
    }

    /// Writes a color as four consecutive floats (r, g, b, a).
    pub fn write_color(&mut self, value: LinearRgba) -> Result<()> {
        self.write_f32(value.r)?;
        self.write_f32(value.g)?;
        self.write_f32(value.b)?;
        self.write_f32(value.a)
    }

    /// Writes the elements of a slice as one contiguous byte blob: no
    /// length prefix, no padding beyond the structs' natural `#[repr(C)]`
    /// layout. The blob is flushed in [`CHUNK_SIZE`] pieces so peak
    /// scratch use stays bounded for arbitrarily large arrays.
    pub fn write_raw<T: Pod>(&mut self, elements: &[T]) -> Result<()> {
        let bytes: &[u8] = bytemuck::cast_slice(elements);
        for chunk in bytes.chunks(CHUNK_SIZE) {
            self.sink.write_all(chunk)?;
        }
        Ok(())
    }

    /// Writes the canonical self-describing block: `i32 count`,
    /// `i32 element_size_bytes`, then the raw contiguous element bytes.
    /// A reader can validate `element_size_bytes` against its own struct
    /// before trusting the blob.
    pub fn write_length_prefixed<T: Pod>(&mut self, elements: &[T]) -> Result<()> {
        self.write_i32(elements.len() as i32)?;
        self.write_i32(std::mem::size_of::<T>() as i32)?;
        self.write_raw(elements)
    }
}
