//! Error handling for everything that can go wrong while encoding or decoding.

use std::borrow::Cow;
use std::fmt;

/// A result that, if ok, contains a value, or otherwise contains an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A result that contains no value, but may contain an [`Error`].
pub type UnitResult = Result<()>;

pub use std::io::Error as IoError;
pub use std::io::Result as IoResult;

/// All kinds of errors the codecs in this crate may produce.
/// No error is recovered inside a codec; every one surfaces to the caller,
/// who owns retry or fallback. A codec that fails midway leaves its sink
/// in an indeterminate state, so partial output must be discarded.
#[derive(Debug)]
pub enum Error {

    /// An encoder was fed a byte outside the fixed alphabet.
    /// The encoder state is undefined afterwards.
    UnknownSymbol(u8),

    /// The header of a static encoding failed validation,
    /// for example because a fixed code does not name any alphabet symbol
    /// or the code-length counts describe an impossible code.
    CorruptedHeader(Cow<'static, str>),

    /// The bit stream is not a valid encoding: a start marker is missing,
    /// the stream ended before the end marker, or an impossible
    /// bit sequence was encountered.
    CorruptedEncoding(Cow<'static, str>),

    /// An error of the underlying byte reader or writer, passed on unchanged.
    Io(IoError),
}

impl Error {

    /// Create an error signalling an invalid static header.
    pub(crate) fn header(message: impl Into<Cow<'static, str>>) -> Self {
        Error::CorruptedHeader(message.into())
    }

    /// Create an error signalling an invalid bit stream.
    pub(crate) fn encoding(message: impl Into<Cow<'static, str>>) -> Self {
        Error::CorruptedEncoding(message.into())
    }
}

/// Enable using the `?` operator on `io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        Error::Io(error)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownSymbol(byte) => write!(formatter, "unknown symbol found: 0x{:02x}", byte),
            Error::CorruptedHeader(message) => write!(formatter, "corrupted header: {}", message),
            Error::CorruptedEncoding(message) => write!(formatter, "corrupted encoding: {}", message),
            Error::Io(error) => write!(formatter, "io error: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}
