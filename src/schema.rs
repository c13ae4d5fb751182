//! Record schemas: field descriptors and the typed slots the binder fills.
//!
//! A bindable record declares its fields once, in order, through a
//! [`Schema`]. Each entry pairs a field name with an accessor returning a
//! [`FieldSlot`], a mutable typed view into that field. The binder never
//! inspects the record any other way.

use crate::error::{BindError, BindResult};
use std::fmt;

/// Primitive kind of a scalar field or of a sequence element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Int32 => write!(f, "i32"),
            ScalarKind::Int64 => write!(f, "i64"),
            ScalarKind::Float32 => write!(f, "f32"),
            ScalarKind::Float64 => write!(f, "f64"),
            ScalarKind::Bool => write!(f, "bool"),
        }
    }
}

/// Kind of a field as seen by the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Comma-separated sequence of the given element kind.
    Sequence(ScalarKind),
}

impl FieldKind {
    /// Kind of a single value: the scalar itself, or the sequence element.
    pub fn element(self) -> ScalarKind {
        match self {
            FieldKind::Scalar(kind) | FieldKind::Sequence(kind) => kind,
        }
    }

    pub fn is_sequence(self) -> bool {
        matches!(self, FieldKind::Sequence(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => write!(f, "{}", kind),
            FieldKind::Sequence(kind) => write!(f, "[{}]", kind),
        }
    }
}

/// Metadata describing one field of a bindable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Declared default, parsed like any source value.
    pub default: Option<&'static str>,
}

/// Mutable typed view into one field of one record instance.
///
/// Build slots with `FieldSlot::from(&mut record.field)`. Types the binder
/// cannot parse convert to [`FieldSlot::Unsupported`], which fails the bind
/// call with [`BindError::UnsupportedType`].
#[derive(Debug)]
pub enum FieldSlot<'a> {
    String(&'a mut String),
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
    Bool(&'a mut bool),
    Strings(&'a mut Vec<String>),
    Int32s(&'a mut Vec<i32>),
    Int64s(&'a mut Vec<i64>),
    Float32s(&'a mut Vec<f32>),
    Float64s(&'a mut Vec<f64>),
    Bools(&'a mut Vec<bool>),
    /// A field of a type outside the supported set, by type name.
    Unsupported(&'static str),
}

macro_rules! supported_slot {
    ($($ty:ty => $scalar:ident, $seq:ident);* $(;)?) => {$(
        impl<'a> From<&'a mut $ty> for FieldSlot<'a> {
            fn from(value: &'a mut $ty) -> Self {
                FieldSlot::$scalar(value)
            }
        }

        impl<'a> From<&'a mut Vec<$ty>> for FieldSlot<'a> {
            fn from(value: &'a mut Vec<$ty>) -> Self {
                FieldSlot::$seq(value)
            }
        }
    )*};
}

supported_slot! {
    String => String, Strings;
    i32 => Int32, Int32s;
    i64 => Int64, Int64s;
    f32 => Float32, Float32s;
    f64 => Float64, Float64s;
    bool => Bool, Bools;
}

macro_rules! unsupported_slot {
    ($($ty:ty),* $(,)?) => {$(
        impl<'a> From<&'a mut $ty> for FieldSlot<'a> {
            fn from(_: &'a mut $ty) -> Self {
                FieldSlot::Unsupported(stringify!($ty))
            }
        }

        impl<'a> From<&'a mut Vec<$ty>> for FieldSlot<'a> {
            fn from(_: &'a mut Vec<$ty>) -> Self {
                FieldSlot::Unsupported(concat!("Vec<", stringify!($ty), ">"))
            }
        }
    )*};
}

unsupported_slot!(isize, usize, i8, i16, i128, u8, u16, u32, u64, u128, char);

impl FieldSlot<'_> {
    /// Classify the slot, or return the unsupported type name.
    pub fn kind(&self) -> Result<FieldKind, &'static str> {
        let kind = match self {
            FieldSlot::String(_) => FieldKind::Scalar(ScalarKind::String),
            FieldSlot::Int32(_) => FieldKind::Scalar(ScalarKind::Int32),
            FieldSlot::Int64(_) => FieldKind::Scalar(ScalarKind::Int64),
            FieldSlot::Float32(_) => FieldKind::Scalar(ScalarKind::Float32),
            FieldSlot::Float64(_) => FieldKind::Scalar(ScalarKind::Float64),
            FieldSlot::Bool(_) => FieldKind::Scalar(ScalarKind::Bool),
            FieldSlot::Strings(_) => FieldKind::Sequence(ScalarKind::String),
            FieldSlot::Int32s(_) => FieldKind::Sequence(ScalarKind::Int32),
            FieldSlot::Int64s(_) => FieldKind::Sequence(ScalarKind::Int64),
            FieldSlot::Float32s(_) => FieldKind::Sequence(ScalarKind::Float32),
            FieldSlot::Float64s(_) => FieldKind::Sequence(ScalarKind::Float64),
            FieldSlot::Bools(_) => FieldKind::Sequence(ScalarKind::Bool),
            FieldSlot::Unsupported(type_name) => return Err(*type_name),
        };
        Ok(kind)
    }

    /// Whether the field holds its type's zero value.
    pub fn is_zero(&self) -> bool {
        match self {
            FieldSlot::String(v) => v.is_empty(),
            FieldSlot::Int32(v) => **v == 0,
            FieldSlot::Int64(v) => **v == 0,
            FieldSlot::Float32(v) => **v == 0.0,
            FieldSlot::Float64(v) => **v == 0.0,
            FieldSlot::Bool(v) => !**v,
            FieldSlot::Strings(v) => v.is_empty(),
            FieldSlot::Int32s(v) => v.is_empty(),
            FieldSlot::Int64s(v) => v.is_empty(),
            FieldSlot::Float32s(v) => v.is_empty(),
            FieldSlot::Float64s(v) => v.is_empty(),
            FieldSlot::Bools(v) => v.is_empty(),
            FieldSlot::Unsupported(_) => true,
        }
    }

    /// Reset the field to its type's zero value.
    pub fn clear(self) {
        match self {
            FieldSlot::String(v) => v.clear(),
            FieldSlot::Int32(v) => *v = 0,
            FieldSlot::Int64(v) => *v = 0,
            FieldSlot::Float32(v) => *v = 0.0,
            FieldSlot::Float64(v) => *v = 0.0,
            FieldSlot::Bool(v) => *v = false,
            FieldSlot::Strings(v) => v.clear(),
            FieldSlot::Int32s(v) => v.clear(),
            FieldSlot::Int64s(v) => v.clear(),
            FieldSlot::Float32s(v) => v.clear(),
            FieldSlot::Float64s(v) => v.clear(),
            FieldSlot::Bools(v) => v.clear(),
            FieldSlot::Unsupported(_) => {}
        }
    }

    /// Move this field's value into `to`. Returns false if the slots differ.
    pub(crate) fn transfer(self, to: FieldSlot<'_>) -> bool {
        use std::mem::take;

        match (self, to) {
            (FieldSlot::String(from), FieldSlot::String(to)) => *to = take(from),
            (FieldSlot::Int32(from), FieldSlot::Int32(to)) => *to = *from,
            (FieldSlot::Int64(from), FieldSlot::Int64(to)) => *to = *from,
            (FieldSlot::Float32(from), FieldSlot::Float32(to)) => *to = *from,
            (FieldSlot::Float64(from), FieldSlot::Float64(to)) => *to = *from,
            (FieldSlot::Bool(from), FieldSlot::Bool(to)) => *to = *from,
            (FieldSlot::Strings(from), FieldSlot::Strings(to)) => *to = take(from),
            (FieldSlot::Int32s(from), FieldSlot::Int32s(to)) => *to = take(from),
            (FieldSlot::Int64s(from), FieldSlot::Int64s(to)) => *to = take(from),
            (FieldSlot::Float32s(from), FieldSlot::Float32s(to)) => *to = take(from),
            (FieldSlot::Float64s(from), FieldSlot::Float64s(to)) => *to = take(from),
            (FieldSlot::Bools(from), FieldSlot::Bools(to)) => *to = take(from),
            _ => return false,
        }
        true
    }
}

/// Accessor from a record to one of its fields.
pub type Accessor<T> = for<'a> fn(&'a mut T) -> FieldSlot<'a>;

/// One declared field of a record schema.
pub struct Field<T> {
    name: &'static str,
    default: Option<&'static str>,
    accessor: Accessor<T>,
}

impl<T> Field<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn default_value(&self) -> Option<&'static str> {
        self.default
    }

    /// Borrow this field of `target` as a typed slot.
    pub fn slot<'a>(&self, target: &'a mut T) -> FieldSlot<'a> {
        (self.accessor)(target)
    }

    fn describe(&self, sample: &mut T) -> BindResult<FieldDescriptor> {
        let kind = self
            .slot(sample)
            .kind()
            .map_err(|type_name| BindError::unsupported(self.name, type_name))?;
        Ok(FieldDescriptor {
            name: self.name,
            kind,
            default: self.default,
        })
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Ordered field table for a record type.
///
/// # Example
/// ```
/// use flagenv::{FieldKind, FieldSlot, ScalarKind, Schema};
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: i64,
/// }
///
/// let schema = Schema::<Server>::new()
///     .field("host", |s| FieldSlot::from(&mut s.host))
///     .field_with_default("port", "8080", |s| FieldSlot::from(&mut s.port));
///
/// let descriptors = schema.descriptors().unwrap();
/// assert_eq!(descriptors[1].kind, FieldKind::Scalar(ScalarKind::Int64));
/// assert_eq!(descriptors[1].default, Some("8080"));
/// ```
pub struct Schema<T> {
    fields: Vec<Field<T>>,
}

impl<T> Schema<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a field with no default.
    pub fn field(self, name: &'static str, accessor: Accessor<T>) -> Self {
        self.declare(name, None, accessor)
    }

    /// Declare a field with a default applied when no source supplies it.
    pub fn field_with_default(
        self,
        name: &'static str,
        default: &'static str,
        accessor: Accessor<T>,
    ) -> Self {
        self.declare(name, Some(default), accessor)
    }

    /// Declare a field. Fields are bound in declaration order.
    pub fn declare(
        mut self,
        name: &'static str,
        default: Option<&'static str>,
        accessor: Accessor<T>,
    ) -> Self {
        self.fields.push(Field {
            name,
            default,
            accessor,
        });
        self
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: Default> Schema<T> {
    /// Enumerate field descriptors in declaration order.
    ///
    /// Fails with [`BindError::UnsupportedType`] on the first field whose
    /// type (or sequence element type) the binder cannot parse.
    pub fn descriptors(&self) -> BindResult<Vec<FieldDescriptor>> {
        let mut sample = T::default();
        self.fields
            .iter()
            .map(|field| field.describe(&mut sample))
            .collect()
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// A record that can be bound from flags and environment variables.
///
/// Usually implemented with [`bindable!`](crate::bindable).
pub trait Bind: Default {
    fn schema() -> Schema<Self>;
}

/// Implement [`Bind`] for a struct from a list of its fields.
///
/// Each field may carry a declared default as a string literal, parsed the
/// same way as flag and environment values.
///
/// ```
/// use flagenv::{bindable, BindConfig};
/// use std::collections::HashMap;
///
/// #[derive(Debug, Default)]
/// struct Settings {
///     host: String,
///     port: i64,
///     tags: Vec<String>,
/// }
///
/// bindable!(Settings { host = "localhost", port = "8080", tags });
///
/// let env = HashMap::from([("APP_PORT".to_string(), "9000".to_string())]);
/// let settings: Settings = flagenv::bind_from(&BindConfig::new("app"), ["demo"], &env).unwrap();
/// assert_eq!(settings.host, "localhost");
/// assert_eq!(settings.port, 9000);
/// assert!(settings.tags.is_empty());
/// ```
#[macro_export]
macro_rules! bindable {
    (@default) => {
        ::core::option::Option::None
    };
    (@default $default:literal) => {
        ::core::option::Option::Some($default)
    };
    ($ty:ty { $($field:ident $(= $default:literal)?),* $(,)? }) => {
        impl $crate::Bind for $ty {
            fn schema() -> $crate::Schema<Self> {
                $crate::Schema::<Self>::new()
                    $(.declare(
                        stringify!($field),
                        $crate::bindable!(@default $($default)?),
                        |s| $crate::FieldSlot::from(&mut s.$field),
                    ))*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Sample {
        name: String,
        retries: i32,
        ratio: f64,
        enabled: bool,
        hosts: Vec<String>,
        weights: Vec<f32>,
    }

    crate::bindable!(Sample {
        name = "sample",
        retries,
        ratio,
        enabled,
        hosts,
        weights = "0.5, 1.5",
    });

    #[derive(Debug, Default)]
    struct WordSized {
        count: isize,
    }

    crate::bindable!(WordSized { count });

    #[derive(Debug, Default)]
    struct BadElements {
        label: String,
        ids: Vec<usize>,
    }

    crate::bindable!(BadElements { label, ids });

    #[test]
    fn test_descriptors_in_declaration_order() {
        let descriptors = Sample::schema().descriptors().expect("descriptors");
        let names: Vec<_> = descriptors.iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["name", "retries", "ratio", "enabled", "hosts", "weights"]
        );

        assert_eq!(descriptors[0].kind, FieldKind::Scalar(ScalarKind::String));
        assert_eq!(descriptors[1].kind, FieldKind::Scalar(ScalarKind::Int32));
        assert_eq!(descriptors[2].kind, FieldKind::Scalar(ScalarKind::Float64));
        assert_eq!(descriptors[3].kind, FieldKind::Scalar(ScalarKind::Bool));
        assert_eq!(descriptors[4].kind, FieldKind::Sequence(ScalarKind::String));
        assert_eq!(descriptors[5].kind, FieldKind::Sequence(ScalarKind::Float32));
    }

    #[test]
    fn test_declared_defaults_carried() {
        let descriptors = Sample::schema().descriptors().expect("descriptors");
        assert_eq!(descriptors[0].default, Some("sample"));
        assert_eq!(descriptors[1].default, None);
        assert_eq!(descriptors[5].default, Some("0.5, 1.5"));
    }

    #[test]
    fn test_machine_word_integer_unsupported() {
        let err = WordSized::schema().descriptors().unwrap_err();
        match err {
            BindError::UnsupportedType { field, type_name } => {
                assert_eq!(field, "count");
                assert_eq!(type_name, "isize");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unsupported_sequence_element() {
        let err = BadElements::schema().descriptors().unwrap_err();
        assert!(matches!(
            err,
            BindError::UnsupportedType { ref field, ref type_name }
                if field == "ids" && type_name == "Vec<usize>"
        ));
    }

    #[test]
    fn test_zero_detection_and_clear() {
        let mut sample = Sample {
            name: "x".into(),
            retries: 3,
            enabled: true,
            hosts: vec!["a".into()],
            ..Default::default()
        };
        let schema = Sample::schema();

        for field in schema.fields() {
            let expect_zero = matches!(field.name(), "ratio" | "weights");
            assert_eq!(field.slot(&mut sample).is_zero(), expect_zero, "{}", field.name());
        }

        for field in schema.fields() {
            field.slot(&mut sample).clear();
        }
        for field in schema.fields() {
            assert!(field.slot(&mut sample).is_zero(), "{}", field.name());
        }
    }

    #[test]
    fn test_transfer_moves_value() {
        let mut from = Sample {
            hosts: vec!["a".into(), "b".into()],
            retries: 7,
            ..Default::default()
        };
        let mut to = Sample::default();
        let schema = Sample::schema();

        for field in schema.fields() {
            assert!(field.slot(&mut from).transfer(field.slot(&mut to)));
        }
        assert_eq!(to.hosts, vec!["a", "b"]);
        assert_eq!(to.retries, 7);
        assert!(from.hosts.is_empty());
    }

    #[test]
    fn test_transfer_rejects_mismatched_slots() {
        let mut text = String::from("x");
        let mut number = 1i64;
        assert!(!FieldSlot::from(&mut text).transfer(FieldSlot::from(&mut number)));
        assert_eq!(number, 1);
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::Scalar(ScalarKind::Int64).to_string(), "i64");
        assert_eq!(FieldKind::Sequence(ScalarKind::Bool).to_string(), "[bool]");
    }
}
