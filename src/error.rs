//! The error taxonomy from spec §7, modeled as a single enum in the shape of the
//! teacher's `radiate-error` crate: one variant per error class, a `Context` wrapper
//! for attaching call-site detail, and an `ErrString` so variants can hold either a
//! `&'static str` or an owned `String` without an extra allocation in the common case.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

pub type Result<T> = std::result::Result<T, FactorFlowError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

/// The error taxonomy of spec §7.
#[derive(Debug)]
pub enum FactorFlowError {
    /// A variable or log-potential array mismatches its declared shape. Raised at
    /// `init`.
    ShapeError { message: ErrString },
    /// An evidence/log-potential update references a variable group absent from the
    /// graph. Raised at `init`.
    UnknownVariableGroup { name: ErrString },
    /// An evidence/log-potential update references a factor group absent from the
    /// graph. Raised at `init`.
    UnknownFactorGroup { name: ErrString },
    /// `temperature < 0` was passed to `run`.
    BadTemperature { temperature: f64 },
    /// `damping` outside `[0, 1)` was passed to `run`.
    BadDamping { damping: f64 },
    /// Graph compilation encountered a factor type with no registered kernel.
    UnsupportedFactorType { message: ErrString },
    /// A caller-supplied context wrapping an underlying error.
    Context {
        context: ErrString,
        source: Box<FactorFlowError>,
    },
}

impl FactorFlowError {
    pub fn shape(message: impl Into<ErrString>) -> Self {
        Self::ShapeError {
            message: message.into(),
        }
    }

    pub fn unknown_variable_group(name: impl Into<ErrString>) -> Self {
        Self::UnknownVariableGroup { name: name.into() }
    }

    pub fn unknown_factor_group(name: impl Into<ErrString>) -> Self {
        Self::UnknownFactorGroup { name: name.into() }
    }

    pub fn unsupported_factor_type(message: impl Into<ErrString>) -> Self {
        Self::UnsupportedFactorType {
            message: message.into(),
        }
    }

    pub fn with_context(self, message: impl Into<ErrString>) -> Self {
        Self::Context {
            context: message.into(),
            source: Box::new(self),
        }
    }
}

impl Display for FactorFlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeError { message } => write!(f, "shape error: {message}"),
            Self::UnknownVariableGroup { name } => {
                write!(f, "unknown variable group: {name}")
            }
            Self::UnknownFactorGroup { name } => write!(f, "unknown factor group: {name}"),
            Self::BadTemperature { temperature } => {
                write!(f, "temperature must be >= 0, got {temperature}")
            }
            Self::BadDamping { damping } => {
                write!(f, "damping must be in [0, 1), got {damping}")
            }
            Self::UnsupportedFactorType { message } => {
                write!(f, "unsupported factor type: {message}")
            }
            Self::Context { context, source } => write!(f, "{context}\ncaused by: {source}"),
        }
    }
}

impl std::error::Error for FactorFlowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

pub trait ResultExt<T> {
    fn context(self, message: impl Into<ErrString>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, message: impl Into<ErrString>) -> Result<T> {
        self.map_err(|e| e.with_context(message))
    }
}
