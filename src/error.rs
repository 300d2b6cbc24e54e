use crate::field::SemanticType;
use colored::Colorize;
use std::{fmt, ops::BitOr};

/// Classification of a single load failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The load target was not a mutable reference to a struct
    Prereqs,
    /// A required field had neither an environment value nor a default
    NotFound,
    /// A field is declared with a type that cannot be bound
    InvalidType,
    /// A raw value could not be coerced into the field's type
    InvalidValue,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::Prereqs,
        ErrorKind::NotFound,
        ErrorKind::InvalidType,
        ErrorKind::InvalidValue,
    ];

    /// Numeric flag for this kind, used when rendering combined codes
    pub const fn bit(self) -> u8 {
        match self {
            ErrorKind::Prereqs => 1,
            ErrorKind::NotFound => 1 << 1,
            ErrorKind::InvalidType => 1 << 2,
            ErrorKind::InvalidValue => 1 << 3,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Prereqs => write!(f, "prereqs"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::InvalidType => write!(f, "invalid type"),
            ErrorKind::InvalidValue => write!(f, "invalid value"),
        }
    }
}

/// A set of [`ErrorKind`]s
///
/// Several kinds can be present at once after a load, so membership is
/// tested with [`ErrorKinds::contains`] rather than equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ErrorKinds(u8);

impl ErrorKinds {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(self, kind: ErrorKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: ErrorKind) {
        self.0 |= kind.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The combined numeric code
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = ErrorKind> {
        ErrorKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl From<ErrorKind> for ErrorKinds {
    fn from(kind: ErrorKind) -> Self {
        Self(kind.bit())
    }
}

impl BitOr for ErrorKind {
    type Output = ErrorKinds;

    fn bitor(self, rhs: Self) -> ErrorKinds {
        ErrorKinds(self.bit() | rhs.bit())
    }
}

impl BitOr<ErrorKind> for ErrorKinds {
    type Output = ErrorKinds;

    fn bitor(self, rhs: ErrorKind) -> ErrorKinds {
        ErrorKinds(self.0 | rhs.bit())
    }
}

impl BitOr for ErrorKinds {
    type Output = ErrorKinds;

    fn bitor(self, rhs: Self) -> ErrorKinds {
        ErrorKinds(self.0 | rhs.0)
    }
}

impl FromIterator<ErrorKind> for ErrorKinds {
    fn from_iter<I: IntoIterator<Item = ErrorKind>>(iter: I) -> Self {
        let mut kinds = Self::empty();
        for kind in iter {
            kinds.insert(kind);
        }
        kinds
    }
}

/// One failure encountered while loading a record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadError {
    pub kind: ErrorKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(name: &str, key: &str, semantic_type: SemanticType) -> Self {
        Self::new(
            ErrorKind::NotFound,
            format!("failed to load '{name}' via \"${{{key}}}\" ({semantic_type})"),
        )
    }

    pub(crate) fn invalid_type(name: &str, key: &str, type_name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidType,
            format!("failed to load '{name}' (via \"${{{key}}}\") of type '{type_name}'"),
        )
    }

    pub(crate) fn invalid_value(name: &str, raw: &str, expected: &str) -> Self {
        Self::new(
            ErrorKind::InvalidValue,
            format!("failed to parse '{raw}' as {expected} for loading '{name}'"),
        )
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Load/err[{}]: {}", self.kind.bit(), self.message)
    }
}

impl std::error::Error for LoadError {}

/// Every failure collected during a single load, in the order they occurred
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LoadErrors(Vec<LoadError>);

impl LoadErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: LoadError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadError> {
        self.0.iter()
    }

    /// Union of the kinds of every collected error
    pub fn kinds(&self) -> ErrorKinds {
        self.0.iter().map(|e| e.kind).collect()
    }

    /// Combined numeric code of every collected error
    pub fn code(&self) -> u8 {
        self.kinds().bits()
    }

    /// All messages, quoted and joined: `['first', 'second']`
    pub fn message(&self) -> String {
        let joined = self
            .0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("', '");
        format!("['{}']", joined)
    }

    /// `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), LoadErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for LoadErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Load/err[{}]: {}", self.code(), self.message())
    }
}

impl std::error::Error for LoadErrors {}

impl From<Vec<LoadError>> for LoadErrors {
    fn from(errors: Vec<LoadError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for LoadErrors {
    type Item = LoadError;
    type IntoIter = std::vec::IntoIter<LoadError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LoadErrors {
    type Item = &'a LoadError;
    type IntoIter = std::slice::Iter<'a, LoadError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Human-readable report of a failed load, used when panicking
pub fn format_load_errors(errors: &LoadErrors) -> String {
    let summary = errors
        .iter()
        .map(|e| format!("  - [{}] {}", e.kind.to_string().magenta().bold(), e.message))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Loading from environment failed with {} error(s):\n{}",
        errors.len().to_string().yellow().bold(),
        summary
    )
}
