use crate::codegen::c_gen::{
    emit_bridge_declarations, emit_field_transfer_helpers, emit_instance, emit_memory_helpers,
    emit_parameters, emit_print_fn, emit_string_helpers, emit_struct,
};
use crate::codegen::overlay::emit_overlay;
use crate::codegen::GeneratorOptions;
use crate::error::GenError;
use fmod_types::{DimensionResolver, Module};
use std::fmt::Write;
use tracing::debug;

/// Emits the C header: a layout-compatible struct mirror and singleton per
/// derived type with its helpers, followed by the C++ overlay.
pub struct CCodeGenerator<'a> {
    module: &'a Module,
    dims: DimensionResolver<'a>,
    options: &'a GeneratorOptions,
}

impl<'a> CCodeGenerator<'a> {
    pub fn new(module: &'a Module, options: &'a GeneratorOptions) -> Self {
        Self {
            module,
            dims: DimensionResolver::for_module(module),
            options,
        }
    }

    pub fn emit_code(&self) -> Result<String, GenError> {
        let mut out = String::new();

        self.emit_header(&mut out)?;
        emit_parameters(&mut out, &self.module.parameters)?;

        for dtype in self.module.derived_types() {
            debug!("C mirror for {}", dtype.name);
            emit_struct(&mut out, dtype, &self.dims)?;
            emit_instance(&mut out, dtype, &self.dims, self.options.extern_instance)?;
            emit_bridge_declarations(&mut out, dtype)?;
            emit_string_helpers(&mut out, dtype, &self.dims)?;
            emit_field_transfer_helpers(&mut out, dtype, self.options.inline_bridge_helpers)?;
            emit_memory_helpers(&mut out, dtype)?;
            if self.options.emit_print {
                emit_print_fn(&mut out, dtype, &self.dims)?;
            }
        }

        self.emit_footer(&mut out)?;

        if self.options.emit_overlay {
            writeln!(out)?;
            emit_overlay(&mut out, self.module, &self.options.namespace)?;
        }
        Ok(out)
    }

    fn emit_header(&self, out: &mut String) -> Result<(), GenError> {
        writeln!(out, "#pragma once")?;
        writeln!(out)?;
        writeln!(out, "/* Mirror of module {} */", self.module.name)?;
        writeln!(out)?;
        writeln!(out, "#include <stdbool.h>")?;
        writeln!(out, "#include <stddef.h>")?;
        writeln!(out, "#include <stdio.h>")?;
        writeln!(out, "#include <stdlib.h>")?;
        writeln!(out, "#include <string.h>")?;
        writeln!(out)?;
        writeln!(out, "#ifdef __cplusplus")?;
        writeln!(out, "#include <string>")?;
        writeln!(out)?;
        writeln!(out, "extern \"C\" {{")?;
        writeln!(out, "#endif")?;
        writeln!(out)?;
        Ok(())
    }

    fn emit_footer(&self, out: &mut String) -> Result<(), GenError> {
        writeln!(out, "#ifdef __cplusplus")?;
        writeln!(out, "}}")?;
        writeln!(out, "#endif")?;
        Ok(())
    }
}
