use super::types::struct_name;
use crate::codegen::{in_type, initial_string_buffer, literal_error};
use crate::error::GenError;
use crate::literal::{byte_literal, render_list, wrap_list, Syntax};
use fmod_types::{DerivedType, DimensionResolver};
use std::fmt::Write;

/* The singleton shared with the native module, either referenced or defined
 * here. A definition carries the same initial data as the native `data`
 * statements, listed in storage order. */
pub fn emit_instance(
    out: &mut String,
    dtype: &DerivedType,
    dims: &DimensionResolver,
    extern_instance: bool,
) -> Result<(), GenError> {
    let declaration = format!("struct {} {}", struct_name(&dtype.name), dtype.name);
    if extern_instance {
        writeln!(out, "extern {};", declaration)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut members = Vec::new();
    for field in &dtype.fields {
        let opening = format!("  .{} = ", field.name);
        if field.is_string() {
            let Some(buffer) = initial_string_buffer(dtype, field, dims)? else {
                continue;
            };
            let items: Vec<String> = buffer
                .as_bytes()
                .iter()
                .map(|b| byte_literal(*b, Syntax::C))
                .collect();
            members.push(wrap_list(&format!("{}{{", opening), &items, "},", Syntax::C));
        } else if field.has_initial_data() {
            let total = in_type(dims.total_elements(field), dtype)?;
            let items = render_list(field.kind, &field.initial_data, total, Syntax::C)
                .map_err(|source| literal_error(dtype, field, source))?;
            if field.is_array() {
                members.push(wrap_list(&format!("{}{{", opening), &items, "},", Syntax::C));
            } else {
                members.push(wrap_list(&opening, &items, ",", Syntax::C));
            }
        }
    }

    if members.is_empty() {
        writeln!(out, "{};", declaration)?;
    } else {
        writeln!(out, "{} = {{", declaration)?;
        for member in members {
            writeln!(out, "{}", member)?;
        }
        writeln!(out, "}};")?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmod_types::{DataValue, Field, FieldKind, SizeSpec};

    fn sample() -> DerivedType {
        DerivedType {
            name: "T".to_string(),
            comment: String::new(),
            fields: vec![
                Field::new("m", FieldKind::Integer)
                    .with_dimensions(vec![SizeSpec::Literal(2), SizeSpec::Literal(2)])
                    .with_data((1..=6).map(DataValue::Integer).collect()),
                Field::new("on", FieldKind::Bool).with_data(vec![DataValue::Bool(true)]),
                Field::new("s", FieldKind::String)
                    .with_dimensions(vec![SizeSpec::Literal(3)])
                    .with_data(vec![DataValue::String("ab".to_string())]),
                Field::new("empty", FieldKind::String).with_dimensions(vec![SizeSpec::Literal(3)]),
                Field::new("plain", FieldKind::Double),
            ],
        }
    }

    #[test]
    fn extern_declaration_by_default() {
        let mut out = String::new();
        emit_instance(&mut out, &sample(), &DimensionResolver::new(&[]), true).expect("instance");
        assert_eq!(out, "extern struct T_t T;\n\n");
    }

    #[test]
    fn local_definition_uses_designated_initializers() {
        let mut out = String::new();
        emit_instance(&mut out, &sample(), &DimensionResolver::new(&[]), false).expect("instance");
        assert_eq!(
            out,
            "struct T_t T = {\n  .m = {1, 2, 3, 4},\n  .on = true,\n  .s = {'a', 'b', '\\0', '\\0'},\n};\n\n"
        );
    }

    #[test]
    fn multibyte_text_keeps_its_bytes() {
        let dtype = DerivedType {
            name: "T".to_string(),
            comment: String::new(),
            fields: vec![Field::new("s", FieldKind::String)
                .with_dimensions(vec![SizeSpec::Literal(4)])
                .with_data(vec![DataValue::String("é".to_string())])],
        };
        let mut out = String::new();
        emit_instance(&mut out, &dtype, &DimensionResolver::new(&[]), false).expect("instance");
        assert_eq!(
            out,
            "struct T_t T = {\n  .s = {'\\303', '\\251', '\\0', ' ', '\\0'},\n};\n\n"
        );
    }

    #[test]
    fn definition_without_data_is_bare() {
        let dtype = DerivedType {
            name: "U".to_string(),
            comment: String::new(),
            fields: vec![Field::new("x", FieldKind::Integer)],
        };
        let mut out = String::new();
        emit_instance(&mut out, &dtype, &DimensionResolver::new(&[]), false).expect("instance");
        assert_eq!(out, "struct U_t U;\n\n");
    }
}
