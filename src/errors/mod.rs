//! The error type returned by the file level [`encode`](crate::encode) and
//! [`decode`](crate::decode) operations.

use std::io;
use std::path::PathBuf;

use crate::decoding::UnpackError;
use crate::encoding::PackError;
use crate::frequency_file::FrequencyFileError;

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An input or frequency file could not be opened
    Open { path: PathBuf, source: io::Error },
    /// An output file could not be created
    Create { path: PathBuf, source: io::Error },
    Io(io::Error),
    FrequencyFile(FrequencyFileError),
    Pack(PackError),
    Unpack(UnpackError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } => Some(source),
            Error::Create { source, .. } => Some(source),
            Error::Io(source) => Some(source),
            Error::FrequencyFile(source) => Some(source),
            Error::Pack(source) => Some(source),
            Error::Unpack(source) => Some(source),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Open { path, .. } => write!(f, "Failed to open {}", path.display()),
            Error::Create { path, .. } => write!(f, "Failed to create {}", path.display()),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::FrequencyFile(e) => write!(f, "Malformed frequency file: {}", e),
            Error::Pack(e) => write!(f, "Failed to pack input: {}", e),
            Error::Unpack(e) => write!(f, "Failed to unpack data: {}", e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(val: io::Error) -> Self {
        Self::Io(val)
    }
}

impl From<FrequencyFileError> for Error {
    fn from(val: FrequencyFileError) -> Self {
        Self::FrequencyFile(val)
    }
}

impl From<PackError> for Error {
    fn from(val: PackError) -> Self {
        Self::Pack(val)
    }
}

impl From<UnpackError> for Error {
    fn from(val: UnpackError) -> Self {
        Self::Unpack(val)
    }
}
