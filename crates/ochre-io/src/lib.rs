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

//! # Ochre IO
//!
//! Binary serialization for sketches.
//!
//! Two layers live here. The `binary` module is the primitive codec: raw
//! little-endian integers, floats, math types, and contiguous blobs of
//! `Pod` structs, written straight to an `io::Write` sink with only a
//! bounded scratch footprint. The `sketch` module is the versioned sketch
//! stream built on top of it: header, stroke records with extension masks,
//! and drop-mask-filtered control point arrays.
//!
//! Neither layer defines the containing file format (a sketch archive
//! typically zips this stream alongside thumbnails and metadata); integrity
//! checking belongs to that container. I/O errors are fatal to the
//! operation and propagate to the caller, which owns retry and cleanup
//! policy.
//!
//! Single-writer, single-stream discipline is assumed; callers using a
//! stream from multiple threads must synchronize externally.

#![warn(missing_docs)]

pub mod binary;
pub mod error;
pub mod sketch;

pub use binary::{SketchBinaryReader, SketchBinaryWriter};
pub use error::{Result, SketchIoError};
pub use sketch::{read_sketch, write_sketch};
