use crate::kind::Kind;
use crate::record::FieldValue;

/// A single field in a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Matching name. The Rust field name unless renamed.
    pub name: &'static str,
    /// Declared representation kind (of the pointee for nullable fields).
    pub kind: Kind,
    /// `Option<_>` field: may be absent at run time.
    pub nullable: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: Kind, nullable: bool) -> Self {
        Self { name, kind, nullable }
    }

    /// Descriptor for a field of Rust type `T`.
    pub fn of<T: FieldValue>(name: &'static str) -> Self {
        Self::new(name, T::KIND, T::NULLABLE)
    }
}

/// Declared structure of a record type.
///
/// Field position in `fields` is the index used by [`crate::Record::field`]
/// and [`crate::Record::set_field`]. Declared order is visitation order.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Position of the field called exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name)?;
        for field in &self.fields {
            let marker = if field.nullable { "?" } else { "" };
            writeln!(f, "  {}: {}{marker}", field.name, field.kind)?;
        }
        Ok(())
    }
}
