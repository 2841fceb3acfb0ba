//! The schema-introspection capability consumed by the engine.
//!
//! Every lookup returns a [`Lookup`] so that "the schema is unavailable"
//! and "the type genuinely does not exist" stay distinguishable: an oracle
//! that cannot answer returns [`Lookup::Unknown`], and callers degrade to
//! skipping the schema-aware check. Scalar coercion against a *resolved*
//! type is never skipped.

use crate::error::EngineError;
use crate::error::Result;
use crate::typeexpr::TypeExpr;
use graphql_parser::schema;
use std::collections::HashMap;

/// The result of a best-effort capability lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup<T> {
    Known(T),
    Unknown,
}

impl<T> Lookup<T> {
    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    pub fn from_option(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Known(value),
            None => Self::Unknown,
        }
    }
}

/// The category of a named schema type, without its metadata.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeKind {
    Scalar,
    Enum,
    InputObject,
    Object,
    Interface,
    Union,
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Enum => "Enum",
            Self::InputObject => "InputObject",
            Self::Object => "Object",
            Self::Interface => "Interface",
            Self::Union => "Union",
        }
    }

    /// Only composite output kinds may carry a fragment type condition.
    pub fn is_fragment_eligible(&self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }
}

/// Narrow capability interface over a previously-fetched schema.
///
/// How the schema was obtained (introspection fetch, SDL file, cache) is
/// the collaborator's concern; the engine only asks these questions.
pub trait TypeOracle: Send + Sync {
    /// The kind of the named type, unwrapping no wrappers (names here are
    /// bare type names, not annotation strings).
    fn type_kind(&self, type_name: &str) -> Lookup<TypeKind>;

    /// The declared members of an enum type.
    fn enum_members(&self, enum_name: &str) -> Lookup<Vec<String>>;

    /// The annotated type of `field_name` on `parent_type`.
    fn field_type(&self, parent_type: &str, field_name: &str) -> Lookup<TypeExpr>;

    /// The annotated type of an argument on a field of `parent_type`.
    fn argument_type(
        &self,
        parent_type: &str,
        field_name: &str,
        argument_name: &str,
    ) -> Lookup<TypeExpr>;

    /// The annotated type of a field on an input object type.
    fn input_field_type(
        &self,
        input_object: &str,
        field_name: &str,
    ) -> Lookup<TypeExpr>;

    /// The concrete object types behind an interface or union.
    fn possible_types(&self, abstract_type: &str) -> Lookup<Vec<String>>;

    /// The names of the fields selectable on an object/interface type.
    fn fields_of(&self, type_name: &str) -> Lookup<Vec<String>>;
}

/// An oracle with no schema: answers `Unknown` to everything, so every
/// schema-aware check degrades to a skip.
pub struct NullOracle;

impl TypeOracle for NullOracle {
    fn type_kind(&self, _type_name: &str) -> Lookup<TypeKind> {
        Lookup::Unknown
    }

    fn enum_members(&self, _enum_name: &str) -> Lookup<Vec<String>> {
        Lookup::Unknown
    }

    fn field_type(&self, _parent_type: &str, _field_name: &str) -> Lookup<TypeExpr> {
        Lookup::Unknown
    }

    fn argument_type(
        &self,
        _parent_type: &str,
        _field_name: &str,
        _argument_name: &str,
    ) -> Lookup<TypeExpr> {
        Lookup::Unknown
    }

    fn input_field_type(
        &self,
        _input_object: &str,
        _field_name: &str,
    ) -> Lookup<TypeExpr> {
        Lookup::Unknown
    }

    fn possible_types(&self, _abstract_type: &str) -> Lookup<Vec<String>> {
        Lookup::Unknown
    }

    fn fields_of(&self, _type_name: &str) -> Lookup<Vec<String>> {
        Lookup::Unknown
    }
}

#[derive(Clone, Debug)]
struct CatalogField {
    type_expr: TypeExpr,
    arguments: HashMap<String, TypeExpr>,
}

#[derive(Clone, Debug)]
enum CatalogType {
    Scalar,
    Enum(Vec<String>),
    InputObject(HashMap<String, TypeExpr>),
    Object(HashMap<String, CatalogField>),
    Interface(HashMap<String, CatalogField>),
    Union(Vec<String>),
}

/// An immutable [`TypeOracle`] built from SDL text. This is the
/// implementation used in tests and by the CLI; a deployment fetching its
/// schema through introspection plugs in its own oracle.
pub struct SchemaCatalog {
    types: HashMap<String, CatalogType>,
    interface_implementors: HashMap<String, Vec<String>>,
}

impl SchemaCatalog {
    pub fn from_sdl(sdl: &str) -> Result<Self> {
        let document = graphql_parser::parse_schema::<String>(sdl)
            .map_err(|err| EngineError::InvalidValue {
                reason: format!("schema parse error: {err}"),
            })?;

        let mut types = HashMap::new();
        for name in ["Int", "Float", "String", "Boolean", "ID"] {
            types.insert(name.to_string(), CatalogType::Scalar);
        }
        let mut interface_implementors: HashMap<String, Vec<String>> =
            HashMap::new();

        for definition in &document.definitions {
            let schema::Definition::TypeDefinition(type_def) = definition else {
                continue;
            };
            match type_def {
                schema::TypeDefinition::Scalar(scalar) => {
                    types.insert(scalar.name.clone(), CatalogType::Scalar);
                },

                schema::TypeDefinition::Enum(enum_type) => {
                    types.insert(enum_type.name.clone(), CatalogType::Enum(
                        enum_type.values.iter()
                            .map(|value| value.name.clone())
                            .collect(),
                    ));
                },

                schema::TypeDefinition::InputObject(input) => {
                    types.insert(input.name.clone(), CatalogType::InputObject(
                        input.fields.iter()
                            .map(|field| (
                                field.name.clone(),
                                ast_type_to_expr(&field.value_type, true),
                            ))
                            .collect(),
                    ));
                },

                schema::TypeDefinition::Object(object) => {
                    for interface in &object.implements_interfaces {
                        interface_implementors
                            .entry(interface.clone())
                            .or_default()
                            .push(object.name.clone());
                    }
                    types.insert(
                        object.name.clone(),
                        CatalogType::Object(collect_fields(&object.fields)),
                    );
                },

                schema::TypeDefinition::Interface(interface) => {
                    types.insert(
                        interface.name.clone(),
                        CatalogType::Interface(collect_fields(&interface.fields)),
                    );
                },

                schema::TypeDefinition::Union(union_type) => {
                    types.insert(
                        union_type.name.clone(),
                        CatalogType::Union(union_type.types.clone()),
                    );
                },
            }
        }

        Ok(Self {
            types,
            interface_implementors,
        })
    }

    fn output_fields(&self, type_name: &str) -> Option<&HashMap<String, CatalogField>> {
        match self.types.get(type_name)? {
            CatalogType::Object(fields) | CatalogType::Interface(fields) =>
                Some(fields),
            _ => None,
        }
    }
}

impl TypeOracle for SchemaCatalog {
    fn type_kind(&self, type_name: &str) -> Lookup<TypeKind> {
        Lookup::from_option(self.types.get(type_name).map(|entry| match entry {
            CatalogType::Scalar => TypeKind::Scalar,
            CatalogType::Enum(_) => TypeKind::Enum,
            CatalogType::InputObject(_) => TypeKind::InputObject,
            CatalogType::Object(_) => TypeKind::Object,
            CatalogType::Interface(_) => TypeKind::Interface,
            CatalogType::Union(_) => TypeKind::Union,
        }))
    }

    fn enum_members(&self, enum_name: &str) -> Lookup<Vec<String>> {
        match self.types.get(enum_name) {
            Some(CatalogType::Enum(members)) => Lookup::Known(members.clone()),
            _ => Lookup::Unknown,
        }
    }

    fn field_type(&self, parent_type: &str, field_name: &str) -> Lookup<TypeExpr> {
        Lookup::from_option(
            self.output_fields(parent_type)
                .and_then(|fields| fields.get(field_name))
                .map(|field| field.type_expr.clone()),
        )
    }

    fn argument_type(
        &self,
        parent_type: &str,
        field_name: &str,
        argument_name: &str,
    ) -> Lookup<TypeExpr> {
        Lookup::from_option(
            self.output_fields(parent_type)
                .and_then(|fields| fields.get(field_name))
                .and_then(|field| field.arguments.get(argument_name))
                .cloned(),
        )
    }

    fn input_field_type(
        &self,
        input_object: &str,
        field_name: &str,
    ) -> Lookup<TypeExpr> {
        match self.types.get(input_object) {
            Some(CatalogType::InputObject(fields)) =>
                Lookup::from_option(fields.get(field_name).cloned()),
            _ => Lookup::Unknown,
        }
    }

    fn possible_types(&self, abstract_type: &str) -> Lookup<Vec<String>> {
        match self.types.get(abstract_type) {
            Some(CatalogType::Union(members)) => Lookup::Known(members.clone()),
            Some(CatalogType::Interface(_)) => Lookup::Known(
                self.interface_implementors
                    .get(abstract_type)
                    .cloned()
                    .unwrap_or_default(),
            ),
            _ => Lookup::Unknown,
        }
    }

    fn fields_of(&self, type_name: &str) -> Lookup<Vec<String>> {
        Lookup::from_option(
            self.output_fields(type_name)
                .map(|fields| fields.keys().cloned().collect()),
        )
    }
}

fn collect_fields<'a>(
    fields: &[schema::Field<'a, String>],
) -> HashMap<String, CatalogField> {
    fields.iter()
        .map(|field| (field.name.clone(), CatalogField {
            type_expr: ast_type_to_expr(&field.field_type, true),
            arguments: field.arguments.iter()
                .map(|arg| (
                    arg.name.clone(),
                    ast_type_to_expr(&arg.value_type, true),
                ))
                .collect(),
        }))
        .collect()
}

fn ast_type_to_expr<'a>(
    ast_type: &schema::Type<'a, String>,
    nullable: bool,
) -> TypeExpr {
    match ast_type {
        schema::Type::NamedType(name) => TypeExpr::Named {
            name: name.clone(),
            nullable,
        },
        schema::Type::ListType(inner) => TypeExpr::List {
            of: Box::new(ast_type_to_expr(inner, true)),
            nullable,
        },
        schema::Type::NonNullType(inner) => ast_type_to_expr(inner, false),
    }
}
