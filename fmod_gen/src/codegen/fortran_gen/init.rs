use crate::codegen::{in_type, initial_string_buffer, literal_error};
use crate::error::GenError;
use crate::literal::{byte_literal, needs_byte_constant, render_list, wrap_list, Syntax};
use fmod_types::{
    column_major_subscripts, DerivedType, DimensionResolver, Field, FieldKind, LiteralError,
    TypedLiteral,
};
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::debug;

/* `data` statements for one instance. These must follow every instance
 * declaration in the module. String fields are always initialized so the
 * sentinel slot holds a terminator even without initial data. Bytes that
 * need a named constant are added to `bytes`. */
pub fn emit_initializers(
    out: &mut String,
    dtype: &DerivedType,
    dims: &DimensionResolver,
    bytes: &mut BTreeSet<u8>,
) -> Result<(), GenError> {
    for field in &dtype.fields {
        if field.is_string() {
            emit_string_initializer(out, dtype, field, dims, bytes)?;
        } else if field.has_initial_data() {
            emit_data_initializer(out, dtype, field, dims, bytes)?;
        }
    }
    Ok(())
}

fn byte_item(byte: u8, bytes: &mut BTreeSet<u8>) -> String {
    if needs_byte_constant(byte) {
        bytes.insert(byte);
    }
    byte_literal(byte, Syntax::Fortran)
}

/* Character data goes through the byte path since a `data` item cannot
 * splice in an `achar` call */
fn data_items(
    dtype: &DerivedType,
    field: &Field,
    total: usize,
    bytes: &mut BTreeSet<u8>,
) -> Result<Vec<String>, GenError> {
    if field.kind != FieldKind::Character {
        return render_list(field.kind, &field.initial_data, total, Syntax::Fortran)
            .map_err(|source| literal_error(dtype, field, source));
    }
    field
        .initial_data
        .iter()
        .take(total)
        .map(|value| {
            let byte = match value.coerce(field.kind) {
                Ok(TypedLiteral::Character(c)) => u8::try_from(c).ok(),
                Ok(_) => None,
                Err(source) => return Err(literal_error(dtype, field, source)),
            };
            byte.map(|b| byte_item(b, bytes)).ok_or_else(|| {
                literal_error(
                    dtype,
                    field,
                    LiteralError::OutOfRange {
                        kind: field.kind,
                        value: value.to_string(),
                    },
                )
            })
        })
        .collect()
}

fn emit_data_initializer(
    out: &mut String,
    dtype: &DerivedType,
    field: &Field,
    dims: &DimensionResolver,
    bytes: &mut BTreeSet<u8>,
) -> Result<(), GenError> {
    let total = in_type(dims.total_elements(field), dtype)?;
    let items = data_items(dtype, field, total, bytes)?;
    if items.len() < field.initial_data.len() {
        debug!(
            "{}%{}: {} literals clipped to {}",
            dtype.name,
            field.name,
            field.initial_data.len(),
            items.len()
        );
    }

    let target = format!("{}%{}", dtype.name, field.name);

    if !field.is_array() || items.len() == total {
        let opening = format!("  data {} / ", target);
        writeln!(out, "{}", wrap_list(&opening, &items, " /", Syntax::Fortran))?;
    } else if field.rank() == 1 {
        let opening = format!("  data {}(1:{}) / ", target, items.len());
        writeln!(out, "{}", wrap_list(&opening, &items, " /", Syntax::Fortran))?;
    } else {
        /* Partial multi-dimensional data: one statement per element, in
         * storage order */
        let axes = in_type(dims.axes(field), dtype)?;
        for (subscripts, item) in column_major_subscripts(&axes, items.len()).iter().zip(&items) {
            let index: Vec<String> = subscripts.iter().map(|s| s.to_string()).collect();
            writeln!(out, "  data {}({}) / {} /", target, index.join(", "), item)?;
        }
    }
    Ok(())
}

/* The whole physical buffer is initialized from the first literal using the
 * same set operation the accessors perform. Without data only the reserved
 * slot is written. */
fn emit_string_initializer(
    out: &mut String,
    dtype: &DerivedType,
    field: &Field,
    dims: &DimensionResolver,
    bytes: &mut BTreeSet<u8>,
) -> Result<(), GenError> {
    let Some(buffer) = initial_string_buffer(dtype, field, dims)? else {
        let capacity = in_type(dims.capacity(field), dtype)?;
        writeln!(
            out,
            "  data {}%{}({}) / {} /",
            dtype.name,
            field.name,
            capacity + 1,
            Syntax::Fortran.sentinel()
        )?;
        return Ok(());
    };

    let items: Vec<String> = buffer
        .as_bytes()
        .iter()
        .map(|b| byte_item(*b, bytes))
        .collect();
    let opening = format!("  data {}%{} / ", dtype.name, field.name);
    writeln!(out, "{}", wrap_list(&opening, &items, " /", Syntax::Fortran))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmod_types::{DataValue, FieldKind, SizeSpec};

    fn record(fields: Vec<Field>) -> DerivedType {
        DerivedType {
            name: "T".to_string(),
            comment: String::new(),
            fields,
        }
    }

    fn ints(values: &[i64]) -> Vec<DataValue> {
        values.iter().copied().map(DataValue::Integer).collect()
    }

    fn emit(dtype: &DerivedType) -> String {
        emit_with_bytes(dtype).0
    }

    fn emit_with_bytes(dtype: &DerivedType) -> (String, BTreeSet<u8>) {
        let mut out = String::new();
        let mut bytes = BTreeSet::new();
        emit_initializers(&mut out, dtype, &DimensionResolver::new(&[]), &mut bytes)
            .expect("initializers");
        (out, bytes)
    }

    #[test]
    fn full_and_scalar_data() {
        let dtype = record(vec![
            Field::new("a", FieldKind::Integer)
                .with_dimensions(vec![SizeSpec::Literal(3)])
                .with_data(ints(&[1, 2, 3])),
            Field::new("x", FieldKind::Float).with_data(vec![DataValue::Float(0.5)]),
            Field::new("untouched", FieldKind::Integer),
        ]);
        assert_eq!(
            emit(&dtype),
            "  data T%a / 1, 2, 3 /\n  data T%x / 5.000000E-01_C_FLOAT /\n"
        );
    }

    #[test]
    fn excess_literals_are_clipped() {
        let dtype = record(vec![Field::new("a", FieldKind::Integer)
            .with_dimensions(vec![SizeSpec::Literal(2)])
            .with_data(ints(&[7, 8, 9, 10]))]);
        assert_eq!(emit(&dtype), "  data T%a / 7, 8 /\n");
    }

    #[test]
    fn partial_vector_uses_a_slice() {
        let dtype = record(vec![Field::new("a", FieldKind::Integer)
            .with_dimensions(vec![SizeSpec::Literal(5)])
            .with_data(ints(&[4, 5]))]);
        assert_eq!(emit(&dtype), "  data T%a(1:2) / 4, 5 /\n");
    }

    #[test]
    fn partial_matrix_is_written_element_by_element() {
        let dtype = record(vec![Field::new("m", FieldKind::Integer)
            .with_dimensions(vec![SizeSpec::Literal(2), SizeSpec::Literal(3)])
            .with_data(ints(&[1, 2, 3]))]);
        assert_eq!(
            emit(&dtype),
            "  data T%m(1, 1) / 1 /\n  data T%m(2, 1) / 2 /\n  data T%m(1, 2) / 3 /\n"
        );
    }

    #[test]
    fn string_without_data_gets_only_the_sentinel() {
        let dtype = record(vec![
            Field::new("s", FieldKind::String).with_dimensions(vec![SizeSpec::Literal(4)])
        ]);
        assert_eq!(emit(&dtype), "  data T%s(5) / C_NULL_CHAR /\n");
    }

    #[test]
    fn string_data_is_truncated_and_terminated() {
        let dtype = record(vec![Field::new("s", FieldKind::String)
            .with_dimensions(vec![SizeSpec::Literal(4)])
            .with_data(vec![
                DataValue::String("hello".to_string()),
                DataValue::String("ignored".to_string()),
            ])]);
        assert_eq!(
            emit(&dtype),
            "  data T%s / \"h\", \"e\", \"l\", \"l\", C_NULL_CHAR /\n"
        );

        let short = record(vec![Field::new("s", FieldKind::String)
            .with_dimensions(vec![SizeSpec::Literal(3)])
            .with_data(vec![DataValue::String("a\"".to_string())])]);
        assert_eq!(
            emit(&short),
            "  data T%s / \"a\", \"\"\"\", C_NULL_CHAR, C_NULL_CHAR /\n"
        );
    }

    #[test]
    fn multibyte_text_is_written_byte_by_byte() {
        let dtype = record(vec![Field::new("s", FieldKind::String)
            .with_dimensions(vec![SizeSpec::Literal(4)])
            .with_data(vec![DataValue::String("é".to_string())])]);
        let (out, bytes) = emit_with_bytes(&dtype);
        assert_eq!(
            out,
            "  data T%s / byte_195, byte_169, C_NULL_CHAR, \" \", C_NULL_CHAR /\n"
        );
        assert_eq!(bytes.into_iter().collect::<Vec<_>>(), vec![0xc3, 0xa9]);
    }

    #[test]
    fn control_characters_use_named_bytes() {
        let dtype = record(vec![Field::new("c", FieldKind::Character)
            .with_dimensions(vec![SizeSpec::Literal(2)])
            .with_data(vec![
                DataValue::String("\t".to_string()),
                DataValue::String("x".to_string()),
            ])]);
        let (out, bytes) = emit_with_bytes(&dtype);
        assert_eq!(out, "  data T%c / byte_9, \"x\" /\n");
        assert!(bytes.contains(&9));
    }

    #[test]
    fn mismatched_literal_names_field_and_type() {
        let dtype = record(vec![
            Field::new("flag", FieldKind::Bool).with_data(vec![DataValue::Float(1.5)])
        ]);
        let err = emit_initializers(
            &mut String::new(),
            &dtype,
            &DimensionResolver::new(&[]),
            &mut BTreeSet::new(),
        )
        .unwrap_err();
        assert!(
            matches!(err, GenError::Literal { ref owner, .. } if owner == "field 'flag' on type 'T'")
        );
    }
}
