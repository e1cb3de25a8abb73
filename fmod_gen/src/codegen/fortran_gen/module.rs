use super::types::type_spec;
use crate::comment::sanitize_comment;
use crate::error::GenError;
use crate::literal::{byte_constant_name, render, Syntax};
use fmod_types::{Module, Parameter};
use std::collections::BTreeSet;
use std::fmt::Write;

pub fn emit_file_header(out: &mut String, module: &Module) -> Result<(), GenError> {
    writeln!(out, "module {}", module.name)?;
    writeln!(out, "  use iso_c_binding")?;
    for used in &module.uses {
        writeln!(out, "  use {}", used)?;
    }
    writeln!(out, "  implicit none")?;
    writeln!(out)?;
    Ok(())
}

/* Named constants. Strings are assumed-length so the literal sets the length */
pub fn emit_parameters(out: &mut String, parameters: &[Parameter]) -> Result<(), GenError> {
    for parameter in parameters {
        let value = render(parameter.kind, &parameter.value, Syntax::Fortran).map_err(|source| {
            GenError::Literal {
                owner: format!("parameter '{}'", parameter.name),
                source,
            }
        })?;
        let spec = if parameter.is_string() {
            "character(kind=C_CHAR,len=*)".to_string()
        } else {
            type_spec(parameter.kind)
        };

        if !parameter.comment.is_empty() {
            writeln!(out, "  !{}", sanitize_comment(&parameter.comment, "  !"))?;
        }
        writeln!(out, "  {}, parameter :: {} = {}", spec, parameter.name, value)?;
    }
    if !parameters.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

/* Single-byte constants for the unquotable bytes that `data` statements use.
 * A `data` item cannot be an `achar` call, only a named constant. */
pub fn emit_byte_constants(out: &mut String, bytes: &BTreeSet<u8>) -> Result<(), GenError> {
    for byte in bytes {
        writeln!(
            out,
            "  character(kind=C_CHAR), parameter :: {} = achar({}, kind=C_CHAR)",
            byte_constant_name(*byte),
            byte
        )?;
    }
    if !bytes.is_empty() {
        writeln!(out)?;
    }
    Ok(())
}

pub fn emit_file_footer(out: &mut String, module: &Module) -> Result<(), GenError> {
    writeln!(out, "end module {}", module.name)?;
    Ok(())
}
