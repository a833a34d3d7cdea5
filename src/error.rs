//! Defines different error types related to the various phases of rendering a formula.
//!   - [`ClmError`] : errors raised while decoding a `.clm` font-metric file.
//!   - [`FontError`] : errors that have to do with resolving fonts, glyphs and named symbols.
//!   - [`ArgError`] : malformed caller input (length strings, color strings).
//!
//! Layout itself never fails: missing glyphs are substituted and extensible
//! constructions clamp to the largest available variant.

use std::fmt;
use std::io;

/// Result type for the `.clm` loader.
pub type ClmResult<T> = ::std::result::Result<T, ClmError>;
/// Result type for font/symbol resolution.
pub type FontResult<T> = ::std::result::Result<T, FontError>;

/// Errors raised while decoding a `.clm` font-metric file.
///
/// A failed load leaves the font context unchanged.
#[derive(Debug)]
pub enum ClmError {
    /// The underlying file could not be opened or read.
    Io(io::Error),
    /// The data ended in the middle of a record.
    Eof,
    /// The file's format version does not match [`CLM_VER`](crate::otf::clm::CLM_VER).
    UnsupportedVersion(u8),
    /// An internal index or count was out of range; the message names the offending table.
    Corrupt(&'static str),
}

impl From<io::Error> for ClmError {
    fn from(e: io::Error) -> Self {
        ClmError::Io(e)
    }
}

impl PartialEq for ClmError {
    fn eq(&self, other: &Self) -> bool {
        use self::ClmError::*;
        match (self, other) {
            (Io(a), Io(b)) => a.kind() == b.kind(),
            (Eof, Eof) => true,
            (UnsupportedVersion(a), UnsupportedVersion(b)) => a == b,
            (Corrupt(a), Corrupt(b)) => a == b,
            _ => false,
        }
    }
}

/// Errors that have to do with resolving fonts, glyphs and named symbols.
#[derive(Debug, Clone, PartialEq)]
pub enum FontError {
    /// No math font has been registered under that name.
    NotRegistered(String),
    /// The symbol table has no entry for the given name.
    SymbolNotFound(String),
    /// An operation needs state the context does not have yet
    /// (e.g. selecting a math font before any was registered).
    InvalidState(&'static str),
}

/// Malformed caller input outside of font data: lengths and colors.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgError {
    /// A length string such as `"1.2xy"` did not parse.
    InvalidLength(String),
    /// A color string such as `"#12345"` did not parse.
    InvalidColor(String),
}

/// A generic error type covering any error that may happen while setting up
/// and laying out a formula.
#[derive(Debug)]
pub enum Error {
    /// an error from the `.clm` loader
    Clm(ClmError),
    /// a font/symbol resolution error
    Font(FontError),
    /// malformed caller input
    Arg(ArgError),
}

impl From<ClmError> for Error {
    fn from(e: ClmError) -> Self {
        Error::Clm(e)
    }
}
impl From<FontError> for Error {
    fn from(e: FontError) -> Self {
        Error::Font(e)
    }
}
impl From<ArgError> for Error {
    fn from(e: ArgError) -> Self {
        Error::Arg(e)
    }
}

impl fmt::Display for ClmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ClmError::*;
        match self {
            Io(e) =>
                write!(f, "could not read clm data: {}", e),
            Eof =>
                write!(f, "unexpected end of clm data"),
            UnsupportedVersion(got) =>
                write!(f, "unsupported clm format version {}", got),
            Corrupt(what) =>
                write!(f, "corrupt clm data in {}", what),
        }
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::FontError::*;
        match self {
            NotRegistered(name) =>
                write!(f, "no math font registered under the name '{}'", name),
            SymbolNotFound(name) =>
                write!(f, "unknown symbol '\\{}'", name),
            InvalidState(what) =>
                write!(f, "invalid font context state: {}", what),
        }
    }
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ArgError::*;
        match self {
            InvalidLength(s) =>
                write!(f, "failed to parse length '{}'", s),
            InvalidColor(s) =>
                write!(f, "failed to parse color '{}'", s),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Clm(e) => e.fmt(f),
            Error::Font(e) => e.fmt(f),
            Error::Arg(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
