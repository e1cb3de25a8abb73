use crate::codegen::in_type;
use crate::comment::sanitize_comment;
use crate::error::GenError;
use crate::literal::{render, Syntax};
use fmod_types::{c_dimension_list, AttributeKind, DerivedType, DimensionResolver, FieldKind, Parameter};
use std::fmt::Write;

/* C element type for a kind; must match the iso_c_binding kind on the
 * native side */
pub fn c_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer => "int",
        FieldKind::Float => "float",
        FieldKind::Double => "double",
        FieldKind::Character => "char",
        FieldKind::String => "char",
        FieldKind::Bool => "bool",
    }
}

/* printf conversion for one element, applied after `printf_cast` */
pub fn printf_format(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Integer => "%d",
        FieldKind::Float => "%g",
        FieldKind::Double => "%.15g",
        FieldKind::Character => "%c",
        FieldKind::String => "%s",
        FieldKind::Bool => "%d",
    }
}

pub fn printf_cast(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Bool => "(int)",
        FieldKind::Integer
        | FieldKind::Float
        | FieldKind::Double
        | FieldKind::Character
        | FieldKind::String => "",
    }
}

pub fn struct_name(type_name: &str) -> String {
    format!("{}_t", type_name)
}

pub fn emit_parameters(out: &mut String, parameters: &[Parameter]) -> Result<(), GenError> {
    for parameter in parameters {
        let value = render(parameter.kind, &parameter.value, Syntax::C).map_err(|source| {
            GenError::Literal {
                owner: format!("parameter '{}'", parameter.name),
                source,
            }
        })?;
        if !parameter.comment.is_empty() {
            writeln!(out, "//{}", sanitize_comment(&parameter.comment, "//"))?;
        }
        if parameter.is_string() {
            writeln!(out, "static char const * const {} = {};", parameter.name, value)?;
        } else {
            writeln!(
                out,
                "static {} const {} = {};",
                c_type(parameter.kind),
                parameter.name,
                value
            )?;
        }
    }
    if !parameters.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

/* Flat mirror of the native record. Physical extents are reversed so every
 * element sits at the same byte offset as in the column-major layout. */
pub fn emit_struct(out: &mut String, dtype: &DerivedType, dims: &DimensionResolver) -> Result<(), GenError> {
    if !dtype.comment.is_empty() {
        writeln!(out, "//{}", sanitize_comment(&dtype.comment, "//"))?;
    }
    writeln!(out, "struct {} {{", struct_name(&dtype.name))?;
    for field in &dtype.fields {
        if !field.comment.is_empty() {
            writeln!(out, "  //{}", sanitize_comment(&field.comment, "  //"))?;
        }
        let axes = in_type(dims.c_axes(field), dtype)?;
        write!(
            out,
            "  {} {}{};",
            c_type(field.kind),
            field.name,
            c_dimension_list(&axes)
        )?;
        if field.has_attribute(AttributeKind::Configurable) {
            write!(out, " /* {} */", AttributeKind::Configurable.name())?;
        }
        writeln!(out)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmod_types::{DataValue, Field, SizeSpec};

    #[test]
    fn kind_tables_cover_every_kind() {
        let types: Vec<&str> = FieldKind::ALL.iter().map(|k| c_type(*k)).collect();
        assert_eq!(types, vec!["int", "float", "double", "char", "char", "bool"]);
        for kind in FieldKind::ALL {
            assert!(printf_format(kind).starts_with('%'));
        }
    }

    #[test]
    fn struct_reverses_native_axes() {
        let dims = DimensionResolver::new(&[]);
        let dtype = DerivedType {
            name: "T".to_string(),
            comment: String::new(),
            fields: vec![
                Field::new("cube", FieldKind::Integer).with_dimensions(vec![
                    SizeSpec::Literal(4),
                    SizeSpec::Literal(3),
                    SizeSpec::Literal(2),
                ]),
                Field::new("name", FieldKind::String).with_dimensions(vec![SizeSpec::Literal(4)]),
                Field::new("x", FieldKind::Float),
            ],
        };
        let mut out = String::new();
        emit_struct(&mut out, &dtype, &dims).expect("struct");
        assert_eq!(
            out,
            "struct T_t {\n  int cube[2][3][4];\n  char name[5];\n  float x;\n};\n\n"
        );
    }

    #[test]
    fn parameters_become_static_constants() {
        let params = vec![
            Parameter {
                name: "N".to_string(),
                kind: FieldKind::Integer,
                value: DataValue::Integer(3),
                comment: "extent".to_string(),
            },
            Parameter {
                name: "gain".to_string(),
                kind: FieldKind::Float,
                value: DataValue::Float(2.5),
                comment: String::new(),
            },
            Parameter {
                name: "label".to_string(),
                kind: FieldKind::String,
                value: DataValue::String("x".to_string()),
                comment: String::new(),
            },
        ];
        let mut out = String::new();
        emit_parameters(&mut out, &params).expect("parameters");
        assert!(out.contains("//extent\nstatic int const N = 3;\n"));
        assert!(out.contains("static float const gain = 2.500000E+00f;\n"));
        assert!(out.contains("static char const * const label = \"x\";\n"));
    }
}
