use crate::field::FieldDescriptor;

/// A type whose fields can be bound from the environment
///
/// Usually implemented with `#[derive(Record)]`. The crate also implements it
/// for primitive types, which report themselves as non-structs so that
/// `load(&mut some_bool)` fails with a `Prereqs` error instead of silently
/// doing nothing.
pub trait Record {
    /// Whether this is a struct with bindable fields
    fn is_struct(&self) -> bool {
        true
    }

    /// Exported fields in declaration order
    fn fields(&mut self) -> Vec<FieldDescriptor<'_>>;
}

macro_rules! impl_non_struct_record {
    ($($t:ty),* $(,)?) => {
        $(
            impl Record for $t {
                fn is_struct(&self) -> bool {
                    false
                }

                fn fields(&mut self) -> Vec<FieldDescriptor<'_>> {
                    Vec::new()
                }
            }
        )*
    };
}

impl_non_struct_record!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

/// What was handed to the binder
///
/// Only an exclusive reference can be written through; a shared one is
/// rejected before any field is touched.
pub enum Target<'a> {
    Exclusive(&'a mut dyn Record),
    Shared(&'a dyn Record),
}

impl<'a, R: Record> From<&'a mut R> for Target<'a> {
    fn from(record: &'a mut R) -> Self {
        Target::Exclusive(record)
    }
}

impl<'a, R: Record> From<&'a R> for Target<'a> {
    fn from(record: &'a R) -> Self {
        Target::Shared(record)
    }
}
