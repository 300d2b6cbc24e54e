use crate::{
    coerce::{coerce, expected_phrase},
    error::{ErrorKind, LoadError, LoadErrors},
    field::{FieldDescriptor, FieldTarget, Presence},
    key::resolve_key,
    record::Target,
    source::{ProcessEnv, Source},
};

/// Binds records from the process environment
///
/// Every field is attempted; all failures come back together.
pub fn load<'a>(target: impl Into<Target<'a>>) -> Result<(), LoadErrors> {
    Binder::new(ProcessEnv).bind(target)
}

/// Binds records from any [`Source`]
///
/// # Example
/// ```rust
/// use env_loadr::{MapSource, Record};
///
/// #[derive(Debug, Default, Record)]
/// pub struct Settings {
///     #[field(default = "8080")]
///     pub port: i32,
///     pub motd: Option<String>,
///     #[field(env = "SETTINGS_HOSTS")]
///     pub hosts: Vec<String>,
/// }
///
/// let source = MapSource::new().with("SETTINGS_HOSTS", "a.example,b.example");
/// let mut settings = Settings::default();
/// env_loadr::load_from(&source, &mut settings).unwrap();
///
/// assert_eq!(settings.port, 8080);
/// assert_eq!(settings.motd, None);
/// assert_eq!(settings.hosts, ["a.example", "b.example"]);
/// ```
pub fn load_from<'a, S: Source>(source: S, target: impl Into<Target<'a>>) -> Result<(), LoadErrors> {
    Binder::new(source).bind(target)
}

/// Resolves, coerces and writes every field of a record
#[derive(Debug, Clone)]
pub struct Binder<S> {
    source: S,
    prefix: Option<String>,
}

impl<S: Source> Binder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            prefix: None,
        }
    }

    /// Prepend `prefix` to keys derived from field names
    ///
    /// Explicit `#[field(env = "...")]` keys are never prefixed.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Bind every exported field of `target`
    ///
    /// Fields that fail keep whatever value they had; the rest are written.
    /// Returns `Ok(())` only when no field failed.
    pub fn bind<'a>(&self, target: impl Into<Target<'a>>) -> Result<(), LoadErrors> {
        let record = match target.into() {
            Target::Exclusive(record) if record.is_struct() => record,
            Target::Exclusive(record) => return Err(prerequisite_errors(true, record.is_struct())),
            Target::Shared(record) => return Err(prerequisite_errors(false, record.is_struct())),
        };

        let mut errors = LoadErrors::new();
        let fields = record.fields();
        let field_count = fields.len();
        for field in fields {
            if let Err(e) = self.bind_field(field) {
                errors.push(e);
            }
        }

        tracing::debug!(
            fields = field_count,
            errors = errors.len(),
            code = errors.code(),
            "bound record from environment"
        );
        errors.into_result()
    }

    fn bind_field(&self, field: FieldDescriptor<'_>) -> Result<(), LoadError> {
        let FieldDescriptor {
            name,
            metadata,
            target,
        } = field;
        let key = resolve_key(name, &metadata, self.prefix.as_deref());

        let slot = match target {
            FieldTarget::Supported(slot) => slot,
            FieldTarget::Unsupported(type_name) => {
                return Err(LoadError::invalid_type(name, &key, type_name));
            }
        };
        let semantic_type = slot.semantic_type();

        let raw = match (self.source.lookup(&key), metadata.default) {
            (Some(value), _) => {
                tracing::trace!(field = name, key = %key, "using environment value");
                value
            }
            (None, Some(default)) => {
                tracing::trace!(field = name, key = %key, "using default value");
                default.to_string()
            }
            (None, None) => match slot.presence() {
                Presence::Required => {
                    return Err(LoadError::not_found(name, &key, semantic_type));
                }
                Presence::Optional => {
                    tracing::trace!(field = name, key = %key, "optional field left unset");
                    return Ok(());
                }
            },
        };

        let invalid = || LoadError::invalid_value(name, &raw, expected_phrase(semantic_type));
        let value = coerce(&raw, semantic_type, metadata.delimiter()).ok_or_else(invalid)?;
        slot.assign(value).map_err(|_| invalid())
    }
}

fn prerequisite_errors(exclusive: bool, is_struct: bool) -> LoadErrors {
    let mut errors = LoadErrors::new();
    if !exclusive {
        errors.push(LoadError::new(
            ErrorKind::Prereqs,
            "failed to receive a valid mutable reference",
        ));
    }
    if !is_struct {
        errors.push(LoadError::new(
            ErrorKind::Prereqs,
            "failed to receive a valid struct",
        ));
    }
    tracing::debug!(errors = errors.len(), "load target rejected");
    errors
}
