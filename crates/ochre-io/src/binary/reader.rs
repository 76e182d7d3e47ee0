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

//! Helper for reading large quantities of binary data from a stream.

use bytemuck::Pod;
use std::io::Read;

use ochre_core::math::{LinearRgba, Quaternion, Vec3};

use super::CHUNK_SIZE;
use crate::error::{Result, SketchIoError};

/// Mirror image of [`crate::SketchBinaryWriter`]: decodes the sketch wire
/// format from an input source while keeping allocation bounded.
///
/// The reader does no pre-reading or caching, so the source can be handed
/// back to the caller at any point in a consistent state. The large scratch
/// buffer used by [`skip`](Self::skip) is created lazily; sequences that
/// never skip pay nothing for it.
#[derive(Debug)]
pub struct SketchBinaryReader<R: Read> {
    source: R,
    scratch: [u8; 16],
    // Lazily-initialized bounce buffer for skipping unseekable streams.
    big_scratch: Option<Box<[u8]>>,
}

impl<R: Read> SketchBinaryReader<R> {
    /// Wraps a source. The reader does not take ownership semantics beyond
    /// the borrow/move the caller chooses; it never closes the source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            scratch: [0; 16],
            big_scratch: None,
        }
    }

    /// Unwraps the reader, returning the source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Reads four little-endian bytes as a `u32`.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.source.read_exact(&mut self.scratch[..4])?;
        Ok(u32::from_le_bytes([
            self.scratch[0],
            self.scratch[1],
            self.scratch[2],
            self.scratch[3],
        ]))
    }

    /// Reads four little-endian bytes as an `i32`.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Reads four little-endian bytes as raw IEEE-754 `f32` bits.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Reads a vector as three consecutive floats.
    pub fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Reads a quaternion as four consecutive floats (x, y, z, w).
    pub fn read_quaternion(&mut self) -> Result<Quaternion> {
        Ok(Quaternion::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Reads a color as four consecutive floats (r, g, b, a).
    pub fn read_color(&mut self) -> Result<LinearRgba> {
        Ok(LinearRgba::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Discards `length` bytes from the source.
    pub fn skip(&mut self, length: u32) -> Result<()> {
        let mut remaining = length as usize;
        if remaining == 0 {
            return Ok(());
        }
        if remaining <= self.scratch.len() {
            self.source.read_exact(&mut self.scratch[..remaining])?;
            return Ok(());
        }
        let buf = self
            .big_scratch
            .get_or_insert_with(|| vec![0u8; CHUNK_SIZE].into_boxed_slice());
        while remaining > 0 {
            let desired = remaining.min(buf.len());
            self.source.read_exact(&mut buf[..desired])?;
            remaining -= desired;
        }
        Ok(())
    }

    /// Reads `count` elements of an unprefixed contiguous blob, the
    /// counterpart of [`crate::SketchBinaryWriter::write_raw`]. Bytes land
    /// directly in the returned vector; no intermediate staging.
    pub fn read_raw<T: Pod>(&mut self, count: usize) -> Result<Vec<T>> {
        let mut elements = vec![T::zeroed(); count];
        self.source
            .read_exact(bytemuck::cast_slice_mut(&mut elements))?;
        Ok(elements)
    }

    /// Reads a length-prefixed block, validating the declared count and
    /// element size against the caller's expectations before trusting the
    /// payload bytes.
    pub fn read_length_prefixed<T: Pod>(&mut self, expected_count: usize) -> Result<Vec<T>> {
        let count = self.read_i32()?;
        let size = self.read_i32()?;
        if count != expected_count as i32 {
            log::error!("error reading list: count {count} != expected {expected_count}");
            return Err(SketchIoError::CountMismatch {
                expected: expected_count as i32,
                found: count,
            });
        }
        let expected_size = std::mem::size_of::<T>() as i32;
        if size != expected_size {
            log::error!("error reading list: element size {size} != expected {expected_size}");
            return Err(SketchIoError::ElementSizeMismatch {
                expected: expected_size,
                found: size,
            });
        }
        self.read_raw(expected_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::SketchBinaryWriter;
    use std::io::Cursor;

    #[test]
    fn test_primitive_round_trip() {
        let mut buf = Vec::new();
        {
            let mut w = SketchBinaryWriter::new(&mut buf);
            w.write_u32(0xdead_beef).unwrap();
            w.write_i32(-40).unwrap();
            w.write_f32(6.25).unwrap();
            w.write_vec3(Vec3::new(1.0, -2.0, 3.5)).unwrap();
            w.write_quaternion(Quaternion::IDENTITY).unwrap();
            w.write_color(LinearRgba::rgb(0.25, 0.5, 0.75)).unwrap();
        }
        let mut r = SketchBinaryReader::new(Cursor::new(buf));
        assert_eq!(r.read_u32().unwrap(), 0xdead_beef);
        assert_eq!(r.read_i32().unwrap(), -40);
        assert_eq!(r.read_f32().unwrap(), 6.25);
        assert_eq!(r.read_vec3().unwrap(), Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(r.read_quaternion().unwrap(), Quaternion::IDENTITY);
        assert_eq!(r.read_color().unwrap(), LinearRgba::rgb(0.25, 0.5, 0.75));
    }

    #[test]
    fn test_length_prefixed_round_trip() {
        let values: Vec<u32> = (0..100).collect();
        let mut buf = Vec::new();
        SketchBinaryWriter::new(&mut buf)
            .write_length_prefixed(values.as_slice())
            .unwrap();
        let mut r = SketchBinaryReader::new(Cursor::new(buf));
        let back: Vec<u32> = r.read_length_prefixed(100).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_length_prefixed_rejects_wrong_count() {
        let values: [u32; 4] = [1, 2, 3, 4];
        let mut buf = Vec::new();
        SketchBinaryWriter::new(&mut buf)
            .write_length_prefixed(&values)
            .unwrap();
        let mut r = SketchBinaryReader::new(Cursor::new(buf));
        let err = r.read_length_prefixed::<u32>(5).unwrap_err();
        assert!(matches!(err, SketchIoError::CountMismatch { .. }));
    }

    #[test]
    fn test_length_prefixed_rejects_wrong_element_size() {
        let values: [u32; 4] = [1, 2, 3, 4];
        let mut buf = Vec::new();
        SketchBinaryWriter::new(&mut buf)
            .write_length_prefixed(&values)
            .unwrap();
        let mut r = SketchBinaryReader::new(Cursor::new(buf));
        // Same count, but u64 elements are twice the size.
        let err = r.read_length_prefixed::<u64>(4).unwrap_err();
        assert!(matches!(err, SketchIoError::ElementSizeMismatch { .. }));
    }

    #[test]
    fn test_skip() {
        let mut buf = Vec::new();
        {
            let mut w = SketchBinaryWriter::new(&mut buf);
            w.write_u32(1).unwrap();
            // A skip larger than the small scratch buffer.
            let padding = vec![0u8; 5000];
            w.write_raw(padding.as_slice()).unwrap();
            w.write_u32(2).unwrap();
        }
        let mut r = SketchBinaryReader::new(Cursor::new(buf));
        assert_eq!(r.read_u32().unwrap(), 1);
        r.skip(5000).unwrap();
        assert_eq!(r.read_u32().unwrap(), 2);
        r.skip(0).unwrap();
    }

    #[test]
    fn test_truncated_stream_is_an_error() {
        let mut r = SketchBinaryReader::new(Cursor::new(vec![0u8; 2]));
        assert!(matches!(
            r.read_u32().unwrap_err(),
            SketchIoError::Io(_)
        ));
    }
}
