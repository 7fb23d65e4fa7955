//! Stringes
//!
//! Position-aware string slices. A [`Stringe`] is a cheap view into a shared
//! source text that always knows the line, column and offset it came from,
//! no matter how many times it has been sliced, trimmed or split.

pub mod chare;
pub mod error;
pub mod position;
mod source;
pub mod split;
pub mod stringe;

pub use chare::Chare;
pub use error::SpanError;
pub use position::Position;
pub use split::{Split, SplitOptions};
pub use stringe::{Chares, Stringe};
