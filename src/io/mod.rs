//! Audio I/O modules
//!
//! Sample source adapters using Symphonia.

pub mod decoder;

pub use decoder::{decode_bytes, decode_file, DecodedAudio};
