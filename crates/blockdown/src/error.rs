use thiserror::Error;

/// Block containers deeper than this abort the parse. The bound exists to
/// fail predictably on pathological nesting rather than grow the spine
/// without limit.
pub const MAX_CONTAINER_DEPTH: usize = 1024;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("container nesting exceeds the supported depth of {0}")]
    DepthLimitExceeded(usize),
}

pub type ParseResult<T> = Result<T, ParseError>;
