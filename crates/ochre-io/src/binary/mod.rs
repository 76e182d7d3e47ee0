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

//! The primitive binary codec for sketch streams.
//!
//! Wire contract: all multi-byte values are little-endian. Floats are raw
//! IEEE-754 bits, never text. `Vec3` is three consecutive floats,
//! `Quaternion` four (x, y, z, w), `LinearRgba` four (r, g, b, a). Bulk
//! data is the byte-for-byte memory image of `#[repr(C)]` `Pod` structs,
//! either unprefixed ([`SketchBinaryWriter::write_raw`]) or as the
//! canonical self-describing block `i32 count, i32 element_size, bytes`
//! ([`SketchBinaryWriter::write_length_prefixed`]).

pub mod reader;
pub mod writer;

pub use self::reader::SketchBinaryReader;
pub use self::writer::SketchBinaryWriter;

/// Bulk transfers move through the stream in chunks of at most this many
/// bytes, capping scratch memory regardless of array size.
pub const CHUNK_SIZE: usize = 4096;
