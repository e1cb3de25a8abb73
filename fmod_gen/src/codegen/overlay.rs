use crate::codegen::c_gen::strings::{len_fn_name, set_fn_name};
use crate::codegen::c_gen::types::struct_name;
use crate::codegen::fortran_gen::bridge::{copy_name, update_name};
use crate::error::GenError;
use fmod_types::Module;
use std::fmt::Write;

pub fn interface_name(type_name: &str) -> String {
    format!("{}IF", type_name)
}

/* C++ value-semantics wrappers: `<ns>::<type>IF::copy()` / `update()` over
 * the bridge routines, plus std::string access to string fields. Emitted
 * after the extern "C" block closes. */
pub fn emit_overlay(out: &mut String, module: &Module, namespace: &str) -> Result<(), GenError> {
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "namespace {} {{", namespace)?;
    writeln!(out)?;

    for dtype in module.derived_types() {
        let st = struct_name(&dtype.name);

        writeln!(out, "namespace {} {{", interface_name(&dtype.name))?;
        writeln!(out)?;
        writeln!(out, "inline {} copy() {{", st)?;
        writeln!(out, "  {} inst;", st)?;
        writeln!(out, "  {}( &inst );", copy_name(&dtype.name))?;
        writeln!(out, "  return inst;")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "inline void update( {} const & inst ) {{", st)?;
        writeln!(out, "  {}( &inst );", update_name(&dtype.name))?;
        writeln!(out, "}}")?;
        writeln!(out)?;

        for field in dtype.string_fields() {
            writeln!(
                out,
                "inline std::string get_{}( {} const & inst ) {{",
                field.name, st
            )?;
            writeln!(
                out,
                "  return std::string( inst.{}, {}( &inst ) );",
                field.name,
                len_fn_name(dtype, field)
            )?;
            writeln!(out, "}}")?;
            writeln!(out)?;
            writeln!(
                out,
                "inline void set_{}( {} & inst, std::string const & str ) {{",
                field.name, st
            )?;
            writeln!(out, "  {}( &inst, str.c_str() );", set_fn_name(dtype, field))?;
            writeln!(out, "}}")?;
            writeln!(out)?;
        }

        writeln!(out, "}} // namespace {}", interface_name(&dtype.name))?;
        writeln!(out)?;
    }

    writeln!(out, "}} // namespace {}", namespace)?;
    writeln!(out, "#endif")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmod_types::{DerivedType, Field, FieldKind, SizeSpec};

    #[test]
    fn overlay_wraps_bridge_calls() {
        let mut module = Module::new("M");
        module.types.insert(
            "T".to_string(),
            DerivedType {
                name: "T".to_string(),
                comment: String::new(),
                fields: vec![
                    Field::new("a", FieldKind::Integer),
                    Field::new("s", FieldKind::String).with_dimensions(vec![SizeSpec::Literal(4)]),
                ],
            },
        );
        let mut out = String::new();
        emit_overlay(&mut out, &module, "Shared").expect("overlay");

        assert!(out.starts_with("#ifdef __cplusplus\nnamespace Shared {\n\nnamespace TIF {\n"));
        assert!(out.contains("inline T_t copy() {\n  T_t inst;\n  copy_T( &inst );\n  return inst;\n}\n"));
        assert!(out.contains("inline void update( T_t const & inst ) {\n  update_T( &inst );\n}\n"));
        assert!(out.contains("  return std::string( inst.s, T_len_s( &inst ) );\n"));
        assert!(out.contains("  T_set_s( &inst, str.c_str() );\n"));
        assert!(!out.contains("get_a"));
        assert!(out.ends_with("} // namespace Shared\n#endif\n"));
    }
}
