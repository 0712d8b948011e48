//! # OxiCBZ Core
//!
//! Core components for the OxiCBZ comic book archive library.
//!
//! This crate provides the building blocks shared by the container and
//! metadata layers:
//!
//! - [`crc`]: CRC-32 checksum used by ZIP local and central headers
//! - [`entry`]: Container entry metadata
//! - [`error`]: Container-level error types
//!
//! ## Architecture
//!
//! OxiCBZ is layered the same way a protocol stack is:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Comic book                                          │
//! │     ComicInfo model, mapper, XML codec, CBZ read/write  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Container                                           │
//! │     STORED-only ZIP reader/writer                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     CRC-32, Entry, ZipError                             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxicbz_core::crc::Crc32;
//!
//! let crc = Crc32::compute(b"Hello, World!");
//! assert_eq!(crc, 0xEC4AC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod crc;
pub mod entry;
pub mod error;

// Re-exports for convenience
pub use crc::Crc32;
pub use entry::{CompressionMethod, Entry};
pub use error::{Result, ZipError};
