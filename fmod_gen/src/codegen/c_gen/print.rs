use super::strings::get_fn_name;
use super::types::{c_type, printf_cast, printf_format, struct_name};
use crate::codegen::in_type;
use crate::error::GenError;
use fmod_types::{DerivedType, DimensionResolver};
use std::fmt::Write;

/* `cprint_<type>`: dump a C-side record without calling into the native
 * module. Arrays print flat, in storage order. */
pub fn emit_print_fn(out: &mut String, dtype: &DerivedType, dims: &DimensionResolver) -> Result<(), GenError> {
    writeln!(
        out,
        "static inline void cprint_{}( struct {} const * self ) {{",
        dtype.name,
        struct_name(&dtype.name)
    )?;
    writeln!(out, "  printf( \"{}: {{\\n\" );", dtype.name)?;

    for field in &dtype.fields {
        let name = &field.name;
        let format = printf_format(field.kind);
        let cast = printf_cast(field.kind);

        if field.is_string() {
            let capacity = in_type(dims.capacity(field), dtype)?;
            writeln!(out, "  {{")?;
            writeln!(out, "    char buf[{}];", capacity + 1)?;
            writeln!(out, "    {}( self, buf );", get_fn_name(dtype, field))?;
            writeln!(out, "    printf( \"  {}: %s\\n\", buf );", name)?;
            writeln!(out, "  }}")?;
        } else if field.is_array() {
            let total = in_type(dims.total_elements(field), dtype)?;
            writeln!(out, "  printf( \"  {}: [\" );", name)?;
            writeln!(out, "  for( size_t i = 0; i < {}; ++i ) {{", total)?;
            writeln!(
                out,
                "    printf( \" {}\", {}((({} const *)self->{})[i]) );",
                format,
                cast,
                c_type(field.kind),
                name
            )?;
            writeln!(out, "  }}")?;
            writeln!(out, "  printf( \" ]\\n\" );")?;
        } else {
            writeln!(
                out,
                "  printf( \"  {}: {}\\n\", {}self->{} );",
                name, format, cast, name
            )?;
        }
    }

    writeln!(out, "  printf( \"}}\\n\" );")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}
