//! Domain core for Magpie: corpus storage, segmentation, and selection.
//!
//! Everything here is independent of the publishing platform. The corpus is
//! an immutable value behind an atomically-swappable handle, the segmenter is
//! a pure function, and the selector is a bounded rejection-sampling loop
//! over an explicitly threaded random source.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod corpus;
mod segment;
mod select;

pub use corpus::{Corpus, CorpusHandle};
pub use segment::segment;
pub use select::select_entry;
