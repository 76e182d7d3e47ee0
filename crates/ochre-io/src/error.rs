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

//! Error types for sketch serialization.

use thiserror::Error;

/// Convenience alias for sketch I/O results.
pub type Result<T> = std::result::Result<T, SketchIoError>;

/// An error produced while reading or writing a sketch stream.
///
/// `Io` wraps a failure of the underlying sink or source; the remaining
/// variants are read-side format violations. There is no retry or partial
/// recovery here — the caller decides whether to discard a partial file.
#[derive(Debug, Error)]
pub enum SketchIoError {
    /// The underlying stream failed.
    #[error("stream error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream does not begin with the sketch sentinel.
    #[error("invalid sketch: bad sentinel {found:#010x}")]
    BadSentinel {
        /// The word found where the sentinel was expected.
        found: u32,
    },

    /// The stream's version is outside the supported range.
    #[error("invalid sketch: unsupported version {0}")]
    UnsupportedVersion(i32),

    /// A length-prefixed block declared a different element count than the
    /// reader expected.
    #[error("length-prefixed block count mismatch: expected {expected}, found {found}")]
    CountMismatch {
        /// The count the reader expected.
        expected: i32,
        /// The count declared in the stream.
        found: i32,
    },

    /// A length-prefixed block declared a different element size than the
    /// reader's struct. Trusting the blob would misinterpret every byte,
    /// so this is checked before any element is read.
    #[error("length-prefixed block element size mismatch: expected {expected}, found {found}")]
    ElementSizeMismatch {
        /// The reader's element size in bytes.
        expected: i32,
        /// The element size declared in the stream.
        found: i32,
    },

    /// A count or size field in the stream is negative or otherwise
    /// unusable.
    #[error("invalid sketch: malformed field ({0})")]
    Malformed(&'static str),
}
