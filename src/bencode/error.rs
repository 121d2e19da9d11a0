use thiserror::Error;

/// A decode failure, tagged with the decode operation that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BencodeError {
    #[error("invalid byte string: {0}")]
    ByteString(&'static str),

    #[error("invalid integer: {0}")]
    Integer(&'static str),

    #[error("invalid list: {0}")]
    List(&'static str),

    #[error("invalid dictionary: {0}")]
    Dictionary(&'static str),

    #[error("unrecognized item type")]
    UnrecognizedItem,

    #[error("nesting depth exceeded")]
    DepthExceeded,
}
