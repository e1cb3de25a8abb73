use super::types::struct_name;
use crate::codegen::in_type;
use crate::error::GenError;
use fmod_types::{DerivedType, DimensionResolver, Field};
use std::fmt::Write;

pub fn len_fn_name(dtype: &DerivedType, field: &Field) -> String {
    format!("{}_len_{}", dtype.name, field.name)
}

pub fn get_fn_name(dtype: &DerivedType, field: &Field) -> String {
    format!("{}_get_{}", dtype.name, field.name)
}

pub fn set_fn_name(dtype: &DerivedType, field: &Field) -> String {
    format!("{}_set_{}", dtype.name, field.name)
}

/* Inline length/get/set helpers for every string field. They follow the
 * same buffer contract as the native accessors: reads stop at the last
 * character that is neither blank nor NUL, writes blank the content area
 * and terminate right after the copied characters. */
pub fn emit_string_helpers(
    out: &mut String,
    dtype: &DerivedType,
    dims: &DimensionResolver,
) -> Result<(), GenError> {
    let st = struct_name(&dtype.name);

    for field in dtype.string_fields() {
        let capacity = in_type(dims.capacity(field), dtype)?;
        let name = &field.name;

        writeln!(
            out,
            "static inline size_t {}( struct {} const * self ) {{",
            len_fn_name(dtype, field),
            st
        )?;
        writeln!(out, "  size_t n = {};", capacity)?;
        writeln!(
            out,
            "  while( n > 0 && ( self->{0}[n - 1] == ' ' || self->{0}[n - 1] == '\\0' ) ) {{",
            name
        )?;
        writeln!(out, "    --n;")?;
        writeln!(out, "  }}")?;
        writeln!(out, "  return n;")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(
            out,
            "static inline void {}( struct {} const * self, char out[{}] ) {{",
            get_fn_name(dtype, field),
            st,
            capacity + 1
        )?;
        writeln!(out, "  size_t n = {}( self );", len_fn_name(dtype, field))?;
        writeln!(out, "  memcpy( out, self->{}, n );", name)?;
        writeln!(out, "  out[n] = '\\0';")?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(
            out,
            "static inline void {}( struct {} * self, char const * str ) {{",
            set_fn_name(dtype, field),
            st
        )?;
        writeln!(out, "  size_t len = strlen( str );")?;
        writeln!(out, "  size_t n = len < {0} ? len : {0};", capacity)?;
        writeln!(out, "  if( len > {} ) {{", capacity)?;
        writeln!(
            out,
            "    fprintf( stderr, \"[WARN]: String \\\"%s\\\" is too large to fit in {}::{}, truncated to {} characters\\n\", str );",
            dtype.name, name, capacity
        )?;
        writeln!(out, "  }}")?;
        writeln!(out, "  memset( self->{}, ' ', {} );", name, capacity)?;
        writeln!(out, "  memcpy( self->{}, str, n );", name)?;
        writeln!(out, "  self->{}[n] = '\\0';", name)?;
        writeln!(out, "}}")?;
        writeln!(out)?;
    }
    Ok(())
}
