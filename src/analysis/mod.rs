//! Recognition and evaluation
//!
//! Ties the fingerprinting pipeline to the index:
//! - Recognizer (ingest songs, identify clips, snapshots)
//! - Result and metadata types
//! - Accuracy evaluation on random sub-clips

pub mod evaluation;
pub mod metadata;
pub mod recognizer;
pub mod result;

pub use metadata::{MatchStrategy, RecognitionMetadata};
pub use recognizer::Recognizer;
pub use result::{ClipFingerprints, RankedMatch, RecognitionResult};
