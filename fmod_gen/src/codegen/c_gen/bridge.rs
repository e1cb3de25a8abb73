use super::types::{c_type, struct_name};
use crate::codegen::fortran_gen::bridge::{copy_name, print_name, update_name};
use crate::error::GenError;
use fmod_types::DerivedType;
use std::fmt::Write;

/* Prototypes of the routines the native module exports for this type */
pub fn emit_bridge_declarations(out: &mut String, dtype: &DerivedType) -> Result<(), GenError> {
    let st = struct_name(&dtype.name);
    writeln!(out, "void {}( struct {} * inst );", copy_name(&dtype.name), st)?;
    writeln!(out, "void {}( struct {} const * inst );", update_name(&dtype.name), st)?;
    writeln!(out, "void {}( void );", print_name(&dtype.name))?;
    writeln!(out)?;
    Ok(())
}

/* `<type>_copy_<field>` / `<type>_update_<field>` move one field between the
 * shared instance and caller storage. Inline helpers touch the instance
 * directly; otherwise they round-trip the whole record through the bridge
 * routines. */
pub fn emit_field_transfer_helpers(
    out: &mut String,
    dtype: &DerivedType,
    inline: bool,
) -> Result<(), GenError> {
    let instance = &dtype.name;
    let st = struct_name(&dtype.name);
    let copy = copy_name(&dtype.name);
    let update = update_name(&dtype.name);

    for field in &dtype.fields {
        let elem = c_type(field.kind);
        let name = &field.name;

        writeln!(
            out,
            "static inline void {}_copy_{}( {} * out ) {{",
            instance, name, elem
        )?;
        if inline {
            writeln!(out, "  memcpy( out, &{0}.{1}, sizeof {0}.{1} );", instance, name)?;
        } else {
            writeln!(out, "  struct {} tmp;", st)?;
            writeln!(out, "  {}( &tmp );", copy)?;
            writeln!(out, "  memcpy( out, &tmp.{0}, sizeof tmp.{0} );", name)?;
        }
        writeln!(out, "}}")?;
        writeln!(out)?;

        writeln!(
            out,
            "static inline void {}_update_{}( {} const * in ) {{",
            instance, name, elem
        )?;
        if inline {
            writeln!(out, "  memcpy( &{0}.{1}, in, sizeof {0}.{1} );", instance, name)?;
        } else {
            writeln!(out, "  struct {} tmp;", st)?;
            writeln!(out, "  {}( &tmp );", copy)?;
            writeln!(out, "  memcpy( &tmp.{0}, in, sizeof tmp.{0} );", name)?;
            writeln!(out, "  {}( &tmp );", update)?;
        }
        writeln!(out, "}}")?;
        writeln!(out)?;
    }
    Ok(())
}

/* Heap copies of a record for C callers; the overlay uses values instead */
pub fn emit_memory_helpers(out: &mut String, dtype: &DerivedType) -> Result<(), GenError> {
    let st = struct_name(&dtype.name);
    writeln!(out, "#ifndef __cplusplus")?;
    writeln!(out, "static inline struct {0} * alloc_{1}( void ) {{", st, dtype.name)?;
    writeln!(out, "  return (struct {0} *)calloc( 1, sizeof( struct {0} ) );", st)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "static inline void free_{}( struct {} * inst ) {{", dtype.name, st)?;
    writeln!(out, "  free( inst );")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    Ok(())
}
