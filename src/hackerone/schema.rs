//! Introspected GraphQL schema
//!
//! Only what the query builder needs is kept: for each named type, its fields
//! in schema order, whether they take arguments, and whether they resolve to a
//! leaf (scalar or enum) value.

use std::collections::HashMap;

use serde::Deserialize;

/// Introspection query sent once per process to discover type fields
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    types {
      name
      kind
      fields(includeDeprecated: true) {
        name
        args { name }
        type {
          kind
          name
          ofType { kind name ofType { kind name ofType { kind name ofType { kind name } } } }
        }
      }
    }
  }
}"#;

/// Metadata for one field of an object type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    pub has_arguments: bool,
    /// Resolves to a scalar or enum, so it can be selected without a sub-selection
    pub leaf: bool,
}

impl FieldMeta {
    /// Argument-free scalar field
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_arguments: false,
            leaf: true,
        }
    }

    /// Scalar field that requires arguments
    pub fn with_arguments(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_arguments: true,
            leaf: true,
        }
    }

    /// Argument-free field returning an object type
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_arguments: false,
            leaf: false,
        }
    }
}

/// Type name to field list mapping
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: HashMap<String, Vec<FieldMeta>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a type and its fields
    pub fn with_type(mut self, name: impl Into<String>, fields: Vec<FieldMeta>) -> Self {
        self.types.insert(name.into(), fields);
        self
    }

    /// Fields of `type_name` in schema order, or `None` if the type is unknown
    pub fn fields_of(&self, type_name: &str) -> Option<&[FieldMeta]> {
        self.types.get(type_name).map(Vec::as_slice)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Build from the `data` member of an introspection response
    pub fn from_introspection(data: serde_json::Value) -> Result<Self, serde_json::Error> {
        let data: IntrospectionData = serde_json::from_value(data)?;

        let types = data
            .schema
            .types
            .into_iter()
            .filter_map(|ty| {
                let name = ty.name?;
                let fields = ty
                    .fields
                    .unwrap_or_default()
                    .into_iter()
                    .map(|field| FieldMeta {
                        leaf: field.ty.leaf_kind().is_leaf(),
                        has_arguments: !field.args.is_empty(),
                        name: field.name,
                    })
                    .collect();
                Some((name, fields))
            })
            .collect();

        Ok(Self { types })
    }
}

#[derive(Debug, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
struct IntrospectionSchema {
    types: Vec<IntrospectedType>,
}

#[derive(Debug, Deserialize)]
struct IntrospectedType {
    name: Option<String>,
    #[serde(default)]
    fields: Option<Vec<IntrospectedField>>,
}

#[derive(Debug, Deserialize)]
struct IntrospectedField {
    name: String,
    #[serde(default)]
    args: Vec<serde_json::Value>,
    #[serde(rename = "type")]
    ty: TypeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    fn is_leaf(self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum)
    }
}

#[derive(Debug, Deserialize)]
struct TypeRef {
    kind: TypeKind,
    #[serde(rename = "ofType", default)]
    of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Kind of the named type after unwrapping NON_NULL and LIST wrappers
    fn leaf_kind(&self) -> TypeKind {
        match (&self.kind, &self.of_type) {
            (TypeKind::NonNull | TypeKind::List, Some(inner)) => inner.leaf_kind(),
            (kind, _) => *kind,
        }
    }
}
