//! A dedicated error for all possible failures while decoding resources and
//! composing DNS responses from them.
use std::fmt;
use std::io;
use std::str;

#[derive(Debug)]
pub enum DNSError {
    Io(io::Error),
    FromUtf8(std::string::FromUtf8Error),
    Utf8(str::Utf8Error),
    LoggerError(log::SetLoggerError),
    DNS(String),
    DNSInternalError(InternalError),
}

/// The closed failure taxonomy from the error handling design: `MalformedResource`
/// covers every way a resource blob can be rejected, `InvalidQueryName` and
/// `OutOfMemory` are the only two failure modes of response composition itself.
#[derive(Debug, PartialEq, Eq)]
pub enum InternalError {
    DnsDomainNameTooLong,
    EmptyDomainName,
    MalformedResource(String),
    InvalidQueryName(String),
    OutOfMemory,
}

impl DNSError {
    // Helper function to create a new DNS error from a string
    pub fn new(s: &str) -> Self {
        DNSError::DNS(String::from(s))
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        DNSError::DNSInternalError(InternalError::MalformedResource(reason.into()))
    }

    pub fn invalid_query_name(reason: impl Into<String>) -> Self {
        DNSError::DNSInternalError(InternalError::InvalidQueryName(reason.into()))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            DNSError::DNSInternalError(InternalError::MalformedResource(_))
        )
    }
}

/// A specific custom `Result` for all functions
pub type DNSResult<T> = Result<T, DNSError>;

impl fmt::Display for DNSError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DNSError::Io(e) => write!(f, "I/O error: {}", e),
            DNSError::FromUtf8(e) => write!(f, "invalid utf8 while converting owned string: {}", e),
            DNSError::Utf8(e) => write!(f, "invalid utf8: {}", e),
            DNSError::LoggerError(e) => write!(f, "logger error: {}", e),
            DNSError::DNS(s) => write!(f, "{}", s),
            DNSError::DNSInternalError(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::DnsDomainNameTooLong => write!(f, "domain name exceeds 255 bytes"),
            InternalError::EmptyDomainName => write!(f, "domain name is empty"),
            InternalError::MalformedResource(reason) => write!(f, "malformed resource: {}", reason),
            InternalError::InvalidQueryName(reason) => write!(f, "invalid query name: {}", reason),
            InternalError::OutOfMemory => write!(f, "out of memory while composing response"),
        }
    }
}

impl std::error::Error for DNSError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DNSError::Io(e) => Some(e),
            DNSError::FromUtf8(e) => Some(e),
            DNSError::Utf8(e) => Some(e),
            DNSError::LoggerError(e) => Some(e),
            _ => None,
        }
    }
}

// All conversions for internal errors into DNSError
impl From<io::Error> for DNSError {
    fn from(err: io::Error) -> Self {
        DNSError::Io(err)
    }
}

impl From<String> for DNSError {
    fn from(err: String) -> Self {
        DNSError::DNS(err)
    }
}

impl From<std::string::FromUtf8Error> for DNSError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DNSError::FromUtf8(err)
    }
}

impl From<str::Utf8Error> for DNSError {
    fn from(err: str::Utf8Error) -> Self {
        DNSError::Utf8(err)
    }
}

impl From<log::SetLoggerError> for DNSError {
    fn from(err: log::SetLoggerError) -> Self {
        DNSError::LoggerError(err)
    }
}
