use std::fmt;

/// Delimiter used to split string lists when a field doesn't declare one
pub const DEFAULT_DELIMITER: &str = ",";

/// The value shapes a field can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    Bool,
    Int,
    String,
    StringList,
}

/// Short label used in error messages
impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Bool => write!(f, "bool"),
            SemanticType::Int => write!(f, "int"),
            SemanticType::String => write!(f, "string"),
            SemanticType::StringList => write!(f, "string list"),
        }
    }
}

/// Whether a field must resolve to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Missing value is a `NotFound` error
    Required,
    /// Missing value leaves the field unset
    Optional,
}

/// Declarative metadata from `#[field(...)]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Explicit environment key, used verbatim
    pub env: Option<&'static str>,
    /// Literal used when the environment has no value
    pub default: Option<&'static str>,
    /// Separator for string lists
    pub delimiter: Option<&'static str>,
}

impl FieldMetadata {
    pub fn delimiter(&self) -> &'static str {
        self.delimiter.unwrap_or(DEFAULT_DELIMITER)
    }
}

/// A coerced value, ready to be written into a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    StringList(Vec<String>),
}

/// The value doesn't fit the field it was meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch;

/// A plain (required) value type that can be built from a [`Value`]
pub trait Scalar: Sized {
    const SEMANTIC_TYPE: SemanticType;

    fn from_value(value: Value) -> Result<Self, Mismatch>;
}

impl Scalar for bool {
    const SEMANTIC_TYPE: SemanticType = SemanticType::Bool;

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(Mismatch),
        }
    }
}

impl Scalar for String {
    const SEMANTIC_TYPE: SemanticType = SemanticType::String;

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(Mismatch),
        }
    }
}

impl Scalar for Vec<String> {
    const SEMANTIC_TYPE: SemanticType = SemanticType::StringList;

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::StringList(items) => Ok(items),
            _ => Err(Mismatch),
        }
    }
}

macro_rules! impl_int_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                const SEMANTIC_TYPE: SemanticType = SemanticType::Int;

                fn from_value(value: Value) -> Result<Self, Mismatch> {
                    match value {
                        Value::Int(i) => <$t>::try_from(i).map_err(|_| Mismatch),
                        _ => Err(Mismatch),
                    }
                }
            }
        )*
    };
}

impl_int_scalar!(i8, i16, i32, i64, isize);

/// A field slot the binder can write into
///
/// Implemented for every [`Scalar`] and for `Option` of each. The derive
/// hands these out as `&mut dyn FieldValue` inside a [`FieldDescriptor`].
pub trait FieldValue {
    fn semantic_type(&self) -> SemanticType;

    fn presence(&self) -> Presence;

    /// Write a coerced value, leaving the slot untouched on mismatch
    fn assign(&mut self, value: Value) -> Result<(), Mismatch>;
}

macro_rules! impl_field_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FieldValue for $t {
                fn semantic_type(&self) -> SemanticType {
                    <$t as Scalar>::SEMANTIC_TYPE
                }

                fn presence(&self) -> Presence {
                    Presence::Required
                }

                fn assign(&mut self, value: Value) -> Result<(), Mismatch> {
                    *self = <$t as Scalar>::from_value(value)?;
                    Ok(())
                }
            }

            impl FieldValue for Option<$t> {
                fn semantic_type(&self) -> SemanticType {
                    <$t as Scalar>::SEMANTIC_TYPE
                }

                fn presence(&self) -> Presence {
                    Presence::Optional
                }

                fn assign(&mut self, value: Value) -> Result<(), Mismatch> {
                    *self = Some(<$t as Scalar>::from_value(value)?);
                    Ok(())
                }
            }
        )*
    };
}

impl_field_value!(bool, String, Vec<String>, i8, i16, i32, i64, isize);

/// Where a field's value is written
pub enum FieldTarget<'a> {
    Supported(&'a mut dyn FieldValue),
    /// The field's type can't be bound; carries the declared type as written
    Unsupported(&'static str),
}

impl fmt::Debug for FieldTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTarget::Supported(slot) => f
                .debug_tuple("Supported")
                .field(&slot.semantic_type())
                .field(&slot.presence())
                .finish(),
            FieldTarget::Unsupported(type_name) => {
                f.debug_tuple("Unsupported").field(type_name).finish()
            }
        }
    }
}

/// One exported field of a record, as seen by the binder
#[derive(Debug)]
pub struct FieldDescriptor<'a> {
    /// Declared identifier
    pub name: &'static str,
    pub metadata: FieldMetadata,
    pub target: FieldTarget<'a>,
}

impl<'a> FieldDescriptor<'a> {
    pub fn new(name: &'static str, metadata: FieldMetadata, slot: &'a mut dyn FieldValue) -> Self {
        Self {
            name,
            metadata,
            target: FieldTarget::Supported(slot),
        }
    }

    pub fn unsupported(name: &'static str, metadata: FieldMetadata, type_name: &'static str) -> Self {
        Self {
            name,
            metadata,
            target: FieldTarget::Unsupported(type_name),
        }
    }

    /// `None` for unsupported types
    pub fn semantic_type(&self) -> Option<SemanticType> {
        match &self.target {
            FieldTarget::Supported(slot) => Some(slot.semantic_type()),
            FieldTarget::Unsupported(_) => None,
        }
    }

    pub fn presence(&self) -> Option<Presence> {
        match &self.target {
            FieldTarget::Supported(slot) => Some(slot.presence()),
            FieldTarget::Unsupported(_) => None,
        }
    }
}
