use crate::codegen::fortran_gen::{
    emit_bridge_routines, emit_byte_constants, emit_derived_type, emit_file_footer,
    emit_file_header, emit_initializers, emit_parameters, emit_print_routine,
    emit_string_accessors,
};
use crate::error::GenError;
use fmod_types::{DimensionResolver, Module};
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::debug;

/// Emits the native module: header, parameters, one `bind(C)` record and
/// singleton per derived type, their initializers, then the string
/// accessors and the print/copy/update bridge routines.
pub struct FortranModuleGenerator<'a> {
    module: &'a Module,
    dims: DimensionResolver<'a>,
}

impl<'a> FortranModuleGenerator<'a> {
    pub fn new(module: &'a Module) -> Self {
        Self {
            module,
            dims: DimensionResolver::for_module(module),
        }
    }

    pub fn emit_code(&self) -> Result<String, GenError> {
        /* Rendered first to learn which byte constants they reference */
        let mut initializers = String::new();
        let mut bytes = BTreeSet::new();
        for dtype in self.module.derived_types() {
            emit_initializers(&mut initializers, dtype, &self.dims, &mut bytes)?;
        }

        let mut out = String::new();

        emit_file_header(&mut out, self.module)?;
        emit_parameters(&mut out, &self.module.parameters)?;
        emit_byte_constants(&mut out, &bytes)?;

        for dtype in self.module.derived_types() {
            debug!("native record for {}", dtype.name);
            emit_derived_type(&mut out, dtype, &self.dims)?;
        }

        /* Initializers reference instances, so they come after all of them */
        if !initializers.is_empty() {
            out.push_str(&initializers);
            writeln!(out)?;
        }
        writeln!(out, "  save")?;
        writeln!(out)?;

        if !self.module.types.is_empty() {
            writeln!(out, "contains")?;
            writeln!(out)?;
            for dtype in self.module.derived_types() {
                emit_string_accessors(&mut out, dtype, &self.dims)?;
            }
            for dtype in self.module.derived_types() {
                emit_print_routine(&mut out, dtype)?;
                emit_bridge_routines(&mut out, dtype)?;
            }
        }

        emit_file_footer(&mut out, self.module)?;
        Ok(out)
    }
}
