use crate::codegen::in_type;
use crate::comment::sanitize_comment;
use crate::error::GenError;
use fmod_types::{native_dimension_list, AttributeKind, DerivedType, DimensionResolver, FieldKind};
use std::fmt::Write;

/* Intrinsic type keyword for a kind */
pub fn type_keyword(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer => "integer",
        FieldKind::Float => "real",
        FieldKind::Double => "real",
        FieldKind::Character => "character",
        FieldKind::String => "character",
        FieldKind::Bool => "logical",
    }
}

/* iso_c_binding kind constant that fixes the storage width */
pub fn kind_parameter(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer => "C_INT",
        FieldKind::Float => "C_FLOAT",
        FieldKind::Double => "C_DOUBLE",
        FieldKind::Character => "C_CHAR",
        FieldKind::String => "C_CHAR",
        FieldKind::Bool => "C_BOOL",
    }
}

/* `real(kind=C_FLOAT)` and friends */
pub fn type_spec(kind: FieldKind) -> String {
    format!("{}(kind={})", type_keyword(kind), kind_parameter(kind))
}

pub fn record_name(type_name: &str) -> String {
    format!("t_{}", type_name)
}

/* Record declaration plus the singleton bound to the C symbol of the same
 * name. Field extents are resolved integers in native axis order; string
 * fields carry their sentinel slot. */
pub fn emit_derived_type(
    out: &mut String,
    dtype: &DerivedType,
    dims: &DimensionResolver,
) -> Result<(), GenError> {
    let record = record_name(&dtype.name);

    if !dtype.comment.is_empty() {
        writeln!(out, "  !{}", sanitize_comment(&dtype.comment, "  !"))?;
    }
    writeln!(out, "  type, bind(C) :: {}", record)?;

    for field in &dtype.fields {
        if !field.comment.is_empty() {
            writeln!(out, "    !{}", sanitize_comment(&field.comment, "    !"))?;
        }
        let axes = in_type(dims.physical_axes(field), dtype)?;
        let dimension = native_dimension_list(&axes);
        let mut decl = type_spec(field.kind);
        if !dimension.is_empty() {
            write!(decl, ", {}", dimension)?;
        }
        write!(out, "    {} :: {}", decl, field.name)?;
        if field.has_attribute(AttributeKind::Configurable) {
            write!(out, " ! {}", AttributeKind::Configurable.name())?;
        }
        writeln!(out)?;
    }

    writeln!(out, "  end type {}", record)?;
    writeln!(out)?;
    writeln!(
        out,
        "  type({}), bind(C, name=\"{}\") :: {}",
        record, dtype.name, dtype.name
    )?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmod_types::{DataValue, Field, Parameter, SizeSpec};

    #[test]
    fn every_kind_has_a_spec() {
        let specs: Vec<String> = FieldKind::ALL.iter().map(|k| type_spec(*k)).collect();
        assert_eq!(
            specs,
            vec![
                "integer(kind=C_INT)",
                "real(kind=C_FLOAT)",
                "real(kind=C_DOUBLE)",
                "character(kind=C_CHAR)",
                "character(kind=C_CHAR)",
                "logical(kind=C_BOOL)",
            ]
        );
    }

    #[test]
    fn record_uses_native_axis_order() {
        let params = vec![Parameter {
            name: "N".to_string(),
            kind: FieldKind::Integer,
            value: DataValue::Integer(3),
            comment: String::new(),
        }];
        let dims = DimensionResolver::new(&params);
        let dtype = DerivedType {
            name: "T".to_string(),
            comment: "a record\nover two lines".to_string(),
            fields: vec![
                Field::new("grid", FieldKind::Double).with_dimensions(vec![
                    SizeSpec::Literal(4),
                    SizeSpec::Parameter("N".to_string()),
                ]),
                Field::new("label", FieldKind::String).with_dimensions(vec![SizeSpec::Literal(8)]),
                Field::new("on", FieldKind::Bool),
            ],
        };

        let mut out = String::new();
        emit_derived_type(&mut out, &dtype, &dims).expect("emit");

        assert!(out.starts_with("  !a record\n  !over two lines\n  type, bind(C) :: t_T\n"));
        assert!(out.contains("    real(kind=C_DOUBLE), dimension(4, 3) :: grid\n"));
        assert!(out.contains("    character(kind=C_CHAR), dimension(9) :: label\n"));
        assert!(out.contains("    logical(kind=C_BOOL) :: on\n"));
        assert!(out.contains("  end type t_T\n"));
        assert!(out.contains("  type(t_T), bind(C, name=\"T\") :: T\n"));
    }

    #[test]
    fn unresolvable_extent_names_the_type() {
        let dims = DimensionResolver::new(&[]);
        let dtype = DerivedType {
            name: "T".to_string(),
            comment: String::new(),
            fields: vec![Field::new("a", FieldKind::Integer)
                .with_dimensions(vec![SizeSpec::Parameter("M".to_string())])],
        };
        let err = emit_derived_type(&mut String::new(), &dtype, &dims).unwrap_err();
        assert!(err.to_string().contains("T"));
    }
}
