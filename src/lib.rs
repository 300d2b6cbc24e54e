pub mod binder;
pub mod coerce;
pub mod error;
pub mod field;
pub mod key;
pub mod record;
pub mod source;

// Lets the derive's `::env_loadr::` paths resolve inside this crate's own tests
extern crate self as env_loadr;

// Re-export main types
pub use binder::{Binder, load, load_from};
pub use error::{ErrorKind, ErrorKinds, LoadError, LoadErrors, format_load_errors};
pub use field::{FieldDescriptor, FieldMetadata, FieldTarget, FieldValue, Presence, SemanticType};
pub use record::{Record, Target};
pub use source::{DotenvSource, Layered, MapSource, ProcessEnv, Source};

// Re-export derive
pub use env_loadr_macros::Record;

use std::path::Path;

/// File in the working directory read by [`Load`]
pub const DOTENV_FILE: &str = ".env";

/// Construct-and-bind shortcuts for records that implement `Default`
///
/// Values come from the process environment first, then from `.env` in the
/// working directory. The `.env` file is only read; nothing is exported.
pub trait Load: Sized {
    /// Load from the environment and `.env`, panicking with a report on any error
    fn load() -> Self;

    /// Load from the environment and `.env`, returning errors instead of panicking
    ///
    /// A `.env` file that exists but can't be parsed is a `Prereqs` error.
    fn load_or_error() -> Result<Self, LoadErrors>;
}

impl<T: Record + Default> Load for T {
    fn load() -> Self {
        match Self::load_or_error() {
            Ok(record) => record,
            Err(errors) => panic!("{}", format_load_errors(&errors)),
        }
    }

    fn load_or_error() -> Result<Self, LoadErrors> {
        let dotenv = dotenv_source(Path::new(DOTENV_FILE))?;
        let mut record = Self::default();
        Binder::new(ProcessEnv.or(dotenv)).bind(&mut record)?;
        Ok(record)
    }
}

/// An empty source when `path` doesn't exist
fn dotenv_source(path: &Path) -> Result<DotenvSource, LoadErrors> {
    if !path.is_file() {
        return Ok(DotenvSource::default());
    }
    DotenvSource::from_path(path).map_err(|e| {
        LoadErrors::from(vec![LoadError::new(
            ErrorKind::Prereqs,
            format!("failed to read '{}': {}", path.display(), e),
        )])
    })
}
