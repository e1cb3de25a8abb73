use super::strings::getter_name;
use super::types::record_name;
use crate::error::GenError;
use fmod_types::DerivedType;
use std::fmt::Write;

pub fn print_name(type_name: &str) -> String {
    format!("print_{}", type_name)
}

pub fn copy_name(type_name: &str) -> String {
    format!("copy_{}", type_name)
}

pub fn update_name(type_name: &str) -> String {
    format!("update_{}", type_name)
}

/* List-directed dump of the singleton, callable from C */
pub fn emit_print_routine(out: &mut String, dtype: &DerivedType) -> Result<(), GenError> {
    let name = print_name(&dtype.name);

    writeln!(out, "  subroutine {}() bind(C, name=\"{}\")", name, name)?;
    writeln!(out, "    print *, \"{}: {{\"", dtype.name)?;
    for field in &dtype.fields {
        if field.is_string() {
            writeln!(
                out,
                "    print *, \"  {}: \", {}()",
                field.name,
                getter_name(dtype, field)
            )?;
        } else {
            writeln!(
                out,
                "    print *, \"  {}: \", {}%{}",
                field.name, dtype.name, field.name
            )?;
        }
    }
    writeln!(out, "    print *, \"}}\"")?;
    writeln!(out, "  end subroutine {}", name)?;
    writeln!(out)?;
    Ok(())
}

/* Whole-record assignment between the singleton and a C struct mirror at
 * `inst` */
pub fn emit_bridge_routines(out: &mut String, dtype: &DerivedType) -> Result<(), GenError> {
    let record = record_name(&dtype.name);

    for (name, assignment) in [
        (copy_name(&dtype.name), format!("fptr = {}", dtype.name)),
        (update_name(&dtype.name), format!("{} = fptr", dtype.name)),
    ] {
        writeln!(out, "  subroutine {}(inst) bind(C, name=\"{}\")", name, name)?;
        writeln!(out, "    type(C_PTR), value, intent(in) :: inst")?;
        writeln!(out, "    type({}), pointer :: fptr", record)?;
        writeln!(out)?;
        writeln!(out, "    call c_f_pointer(inst, fptr)")?;
        writeln!(out, "    {}", assignment)?;
        writeln!(out, "  end subroutine {}", name)?;
        writeln!(out)?;
    }
    Ok(())
}
