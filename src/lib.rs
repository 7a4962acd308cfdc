//! In-memory, position-tracked byte stream for building and parsing binary
//! wire formats.
//!
//! A [`Stream`] owns a growable byte buffer and a read cursor. Writes always
//! append to the tail of the buffer; reads consume bytes at the cursor and
//! advance it. Multi-byte fixed-width values are encoded in the stream's
//! current byte order ([`Endian`], big-endian by default), which may be
//! changed between operations. Variable-length integers use the LEB128-style
//! encoding (7 value bits per byte, least-significant group first, high bit
//! as continuation flag), with zigzag-mapped variants for signed values.
//!
//! The stream performs no I/O of its own: it is the substrate a higher-level
//! protocol or file format reads from and writes into. There is no framing,
//! no schema layer and no concurrency support; a stream is exclusively owned
//! by one caller for the duration of a read or write sequence.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod endian;
mod error;
mod stream;


pub use endian::Endian;
pub use error::StreamError;
pub use stream::Stream;

/// Result alias for fallible [`Stream`] operations.
pub type Result<T> = core::result::Result<T, StreamError>;
