use thiserror::Error;

/// Errors raised when deriving stringes or moving a reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// The requested range does not fit inside the stringe.
    #[error("range {offset}..{end} is out of bounds for a stringe of length {length}")]
    OutOfRange {
        offset: usize,
        end: usize,
        length: usize,
    },

    /// Two stringes were combined but belong to different source texts.
    #[error("stringes do not share the same source text")]
    ForeignSource,

    /// The first stringe of a `range`/`between` pair does not precede the second.
    #[error("stringe at offset {first} does not precede stringe at offset {second}")]
    Disordered { first: usize, second: usize },
}

impl SpanError {
    pub(crate) fn out_of_range(offset: usize, length: usize, bound: usize) -> Self {
        SpanError::OutOfRange {
            offset,
            end: offset.saturating_add(length),
            length: bound,
        }
    }
}
