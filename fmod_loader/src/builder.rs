/* Builds the validated descriptor model from a raw document */

use crate::file::{RawData, RawDerivedType, RawField, RawModule, RawParameter, RawSize};
use fmod_types::{
    AttributeKind, DerivedType, DescriptorError, DimensionResolver, Field, FieldKind,
    LiteralError, Module, Parameter, SizeSpec,
};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

/* Build the module, collecting every descriptor error found on the way.
 * No model is returned unless the whole document is valid. */
pub fn build_module(raw: RawModule) -> Result<Module, Vec<DescriptorError>> {
    let mut errors = Vec::new();

    info!(
        "Found module descriptor for module: {} with {} defined derived types and {} parameters.",
        raw.name,
        raw.derivedtypes.len(),
        raw.parameters.len()
    );

    let parameters = build_parameters(&raw.parameters, &mut errors);
    let resolver = DimensionResolver::new(&parameters);

    let mut types = IndexMap::new();
    let mut seen_types = HashSet::new();
    for type_name in &raw.derivedtypes {
        if !seen_types.insert(fortran_key(type_name)) {
            errors.push(DescriptorError::DuplicateType {
                name: type_name.clone(),
            });
            continue;
        }
        let Some(table) = raw.tables.get(type_name) else {
            errors.push(DescriptorError::MissingDerivedType {
                name: type_name.clone(),
            });
            continue;
        };

        debug!("  derived type: {}", type_name);
        let mut type_errors = Vec::new();
        let dtype = build_derived_type(type_name, table, &resolver, &mut type_errors);
        errors.extend(type_errors.into_iter().map(|e| e.in_type(type_name)));
        types.insert(type_name.clone(), dtype);
    }

    for table_name in raw.tables.keys() {
        if !raw.derivedtypes.contains(table_name) {
            warn!(
                "table '{}' is not listed in derivedtypes and will be ignored",
                table_name
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Module {
        name: raw.name,
        parameters,
        types,
        uses: raw.uses,
    })
}

/* Native identifiers are case-insensitive, so uniqueness is checked on the
 * folded name */
fn fortran_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn build_parameters(raw: &[RawParameter], errors: &mut Vec<DescriptorError>) -> Vec<Parameter> {
    let mut seen = HashSet::new();
    let mut parameters = Vec::with_capacity(raw.len());

    for p in raw {
        if !seen.insert(fortran_key(&p.name)) {
            errors.push(DescriptorError::DuplicateParameter {
                name: p.name.clone(),
            });
            continue;
        }
        let Some(kind) = FieldKind::from_name(&p.kind) else {
            errors.push(DescriptorError::UnknownParameterKind {
                parameter: p.name.clone(),
                name: p.kind.clone(),
            });
            continue;
        };
        if let Err(source) = p.value.coerce(kind) {
            errors.push(DescriptorError::InvalidParameterValue {
                parameter: p.name.clone(),
                source,
            });
        }

        let parameter = Parameter {
            name: p.name.clone(),
            kind,
            value: p.value.clone(),
            comment: p.comment.clone(),
        };
        debug!("  parameter: {}", parameter);
        parameters.push(parameter);
    }

    parameters
}

fn build_derived_type(
    type_name: &str,
    table: &RawDerivedType,
    resolver: &DimensionResolver<'_>,
    errors: &mut Vec<DescriptorError>,
) -> DerivedType {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(table.fields.len());

    if table.fields.is_empty() {
        errors.push(DescriptorError::EmptyDerivedType {
            name: type_name.to_string(),
        });
    }

    for raw in &table.fields {
        if !seen.insert(fortran_key(&raw.name)) {
            errors.push(DescriptorError::DuplicateField {
                name: raw.name.clone(),
            });
            continue;
        }
        if let Some(field) = build_field(raw, resolver, errors) {
            debug!("    field: {}", field);
            fields.push(field);
        }
    }

    DerivedType {
        name: type_name.to_string(),
        comment: table.comment.clone(),
        fields,
    }
}

fn build_field(
    raw: &RawField,
    resolver: &DimensionResolver<'_>,
    errors: &mut Vec<DescriptorError>,
) -> Option<Field> {
    let before = errors.len();

    let kind = FieldKind::from_name(&raw.kind);
    if kind.is_none() {
        errors.push(DescriptorError::UnknownFieldKind {
            field: raw.name.clone(),
            name: raw.kind.clone(),
        });
    }

    let mut attributes = BTreeSet::new();
    for name in &raw.attributes {
        match AttributeKind::from_name(name) {
            Some(attribute) => {
                attributes.insert(attribute);
            }
            None => errors.push(DescriptorError::UnknownAttribute {
                field: raw.name.clone(),
                name: name.clone(),
            }),
        }
    }

    let mut dimensions = Vec::new();
    let raw_sizes = raw.size.clone().map(|s| s.into_vec()).unwrap_or_default();
    for (index, size) in raw_sizes.into_iter().enumerate() {
        match size {
            RawSize::Literal(size) => dimensions.push(SizeSpec::Literal(size)),
            RawSize::Parameter(name) => dimensions.push(SizeSpec::Parameter(name)),
            RawSize::Invalid(_) => errors.push(DescriptorError::InvalidSizeElement {
                field: raw.name.clone(),
                index,
                reason: "expected an integer or a parameter name".to_string(),
            }),
        }
    }

    let kind = kind?;

    if kind.is_string() && dimensions.len() > 1 {
        errors.push(DescriptorError::StringArray {
            field: raw.name.clone(),
            rank: dimensions.len(),
        });
    }

    let mut initial_data = Vec::new();
    let raw_data = raw.data.clone().map(|d| d.into_vec()).unwrap_or_default();
    for (index, element) in raw_data.into_iter().enumerate() {
        match element {
            RawData::Value(value) => {
                if let Err(source) = value.coerce(kind) {
                    errors.push(DescriptorError::InvalidFieldData {
                        field: raw.name.clone(),
                        index,
                        source,
                    });
                }
                initial_data.push(value);
            }
            RawData::Invalid(_) => errors.push(DescriptorError::InvalidFieldData {
                field: raw.name.clone(),
                index,
                source: LiteralError::Mismatch {
                    kind,
                    value: "<non-scalar element>".to_string(),
                },
            }),
        }
    }

    let field = Field {
        name: raw.name.clone(),
        kind,
        dimensions,
        attributes,
        comment: raw.comment.clone(),
        initial_data,
    };

    if errors.len() == before {
        match resolver
            .physical_elements(&field)
            .and_then(|_| resolver.total_elements(&field))
        {
            Ok(_) if field.is_string() && field.initial_data.len() > 1 => {
                debug!(
                    "string field '{}' has {} data literals; only the first one initializes it",
                    field.name,
                    field.initial_data.len()
                );
            }
            Ok(total) if field.initial_data.len() > total => {
                debug!(
                    "field '{}' has {} data literals for {} elements; extras are ignored",
                    field.name,
                    field.initial_data.len(),
                    total
                );
            }
            Ok(_) => {}
            Err(e) => errors.push(e),
        }
    }

    Some(field)
}
