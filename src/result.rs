use thiserror::Error;

pub type Result<A, E = Error> = std::result::Result<A, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unknown record tag {0:#x}")]
    UnknownRecord(u8),
    #[error("failed to read record #{index}: {source}")]
    RecordReadFailed {
        index: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("stream did not begin with a header (got tag {0:#x})")]
    NoHeader(u8),
    #[error("unresolved reference id {0}")]
    UnresolvedReference(i32),
    #[error("metadata record {0} not found for ClassWithId")]
    MetadataNotFound(i32),
    #[error("unsupported record: {0}")]
    Unsupported(&'static str),
    #[error("invalid UTF-8 in decoded string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),
}

impl Error {
    pub fn code(&self) -> u8 {
        match self {
            Error::Io(_) => 2,
            Error::UnexpectedEof => 2,
            Error::UnknownRecord(_) => 4,
            Error::RecordReadFailed { .. } => 5,
            Error::NoHeader(_) => 3,
            Error::UnresolvedReference(_) => 5,
            Error::MetadataNotFound(_) => 5,
            Error::Unsupported(_) => 4,
            Error::InvalidUtf8(_) => 5,
            Error::InvalidPath(_) => 5,
        }
    }
}
