use crate::codegen::in_type;
use crate::error::GenError;
use fmod_types::{DerivedType, DimensionResolver, Field};
use std::fmt::Write;

/* Getter and setter for every string field of a type */
pub fn emit_string_accessors(
    out: &mut String,
    dtype: &DerivedType,
    dims: &DimensionResolver,
) -> Result<(), GenError> {
    for field in dtype.string_fields() {
        let capacity = in_type(dims.capacity(field), dtype)?;
        emit_getter(out, dtype, field, capacity)?;
        emit_setter(out, dtype, field, capacity)?;
    }
    Ok(())
}

pub fn getter_name(dtype: &DerivedType, field: &Field) -> String {
    format!("get_{}_{}", dtype.name, field.name)
}

pub fn setter_name(dtype: &DerivedType, field: &Field) -> String {
    format!("set_{}_{}", dtype.name, field.name)
}

/* Scan back from the last content slot past blanks and sentinels */
fn emit_getter(
    out: &mut String,
    dtype: &DerivedType,
    field: &Field,
    capacity: usize,
) -> Result<(), GenError> {
    let name = getter_name(dtype, field);
    let slot = format!("{}%{}(i)", dtype.name, field.name);

    writeln!(out, "  function {}() result(str)", name)?;
    writeln!(out, "    character(len=:), allocatable :: str")?;
    writeln!(out, "    integer :: i, n")?;
    writeln!(out)?;
    writeln!(out, "    n = 0")?;
    writeln!(out, "    do i = {}, 1, -1", capacity)?;
    writeln!(
        out,
        "      if (({} /= \" \") .and. ({} /= C_NULL_CHAR)) then",
        slot, slot
    )?;
    writeln!(out, "        n = i")?;
    writeln!(out, "        exit")?;
    writeln!(out, "      end if")?;
    writeln!(out, "    end do")?;
    writeln!(out, "    allocate(character(len=n) :: str)")?;
    writeln!(out, "    do i = 1, n")?;
    writeln!(out, "      str(i:i) = {}", slot)?;
    writeln!(out, "    end do")?;
    writeln!(out, "  end function {}", name)?;
    writeln!(out)?;
    Ok(())
}

/* Blank the content area, copy what fits, terminate right after it */
fn emit_setter(
    out: &mut String,
    dtype: &DerivedType,
    field: &Field,
    capacity: usize,
) -> Result<(), GenError> {
    let name = setter_name(dtype, field);
    let target = format!("{}%{}", dtype.name, field.name);

    writeln!(out, "  subroutine {}(str)", name)?;
    writeln!(out, "    character(len=*), intent(in) :: str")?;
    writeln!(out, "    integer :: i, n")?;
    writeln!(out)?;
    writeln!(out, "    n = min(len(str), {})", capacity)?;
    writeln!(out, "    {}(1:{}) = \" \"", target, capacity)?;
    writeln!(out, "    do i = 1, n")?;
    writeln!(out, "      {}(i) = str(i:i)", target)?;
    writeln!(out, "    end do")?;
    writeln!(out, "    {}(n + 1) = C_NULL_CHAR", target)?;
    writeln!(out, "  end subroutine {}", name)?;
    writeln!(out)?;
    Ok(())
}
