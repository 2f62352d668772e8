//! MetisError: unified error type for metis-shim public APIs
//!
//! libmetis reports failures through an integer status code. [`Status`] maps
//! those codes without loss and [`MetisError`] adds the argument checks the
//! safe builders perform before any call crosses the FFI boundary.

use std::os::raw::c_int;

use thiserror::Error;

use crate::ffi::{self, Idx};

/// Status code returned by every METIS entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// `METIS_OK`
    Ok,
    /// `METIS_ERROR_INPUT`
    Input,
    /// `METIS_ERROR_MEMORY`
    Memory,
    /// `METIS_ERROR`
    Error,
    /// Any code libmetis is not documented to return.
    Unknown(c_int),
}

impl Status {
    pub fn from_code(code: c_int) -> Status {
        match code {
            ffi::METIS_OK => Status::Ok,
            ffi::METIS_ERROR_INPUT => Status::Input,
            ffi::METIS_ERROR_MEMORY => Status::Memory,
            ffi::METIS_ERROR => Status::Error,
            other => Status::Unknown(other),
        }
    }

    /// The raw code, exactly as libmetis returned it.
    pub fn code(self) -> c_int {
        match self {
            Status::Ok => ffi::METIS_OK,
            Status::Input => ffi::METIS_ERROR_INPUT,
            Status::Memory => ffi::METIS_ERROR_MEMORY,
            Status::Error => ffi::METIS_ERROR,
            Status::Unknown(code) => code,
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            Status::Ok => Ok(()),
            Status::Input => Err(MetisError::Input),
            Status::Memory => Err(MetisError::Memory),
            Status::Error => Err(MetisError::Other),
            Status::Unknown(code) => Err(MetisError::UnknownStatus(code)),
        }
    }
}

/// Unified error type for metis-shim operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetisError {
    /// libmetis rejected its input (`METIS_ERROR_INPUT`).
    #[error("METIS rejected its input")]
    Input,
    /// libmetis ran out of memory (`METIS_ERROR_MEMORY`).
    #[error("METIS ran out of memory")]
    Memory,
    /// libmetis failed without further detail (`METIS_ERROR`).
    #[error("METIS returned an error")]
    Other,
    /// libmetis returned a code outside its documented set.
    #[error("METIS returned unexpected status code {0}")]
    UnknownStatus(c_int),
    /// A count that must be strictly positive was not.
    #[error("`{name}` must be strictly positive, got {value}")]
    NonPositive { name: &'static str, value: Idx },
    /// An offsets array (`xadj`, `eptr`) was empty.
    #[error("`{0}` must contain at least one offset")]
    EmptyOffsets(&'static str),
    #[error("`{array}` has length {found}, expected {expected}")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        found: usize,
    },
    /// Offsets that do not start at the numbering base or that decrease.
    #[error("`{0}` must start at the numbering base and never decrease")]
    MalformedOffsets(&'static str),
    /// An index array refers past the end of what it indexes.
    #[error("`{array}` holds {value}, outside {lower}..{upper}")]
    IndexOutOfRange {
        array: &'static str,
        value: Idx,
        lower: Idx,
        upper: Idx,
    },
    /// An array is longer than `Idx` can index.
    #[error("`{0}` is too large to be indexed by idx_t")]
    TooLarge(&'static str),
    /// `numflag` must select C (0) or Fortran (1) numbering.
    #[error("numbering flag must be 0 or 1, got {0}")]
    InvalidNumbering(Idx),
    /// Failure reported by a non-native backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl MetisError {
    /// The libmetis status code behind this error, if it came from libmetis.
    pub fn status_code(&self) -> Option<c_int> {
        match self {
            MetisError::Input => Some(ffi::METIS_ERROR_INPUT),
            MetisError::Memory => Some(ffi::METIS_ERROR_MEMORY),
            MetisError::Other => Some(ffi::METIS_ERROR),
            MetisError::UnknownStatus(code) => Some(*code),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MetisError>;
