pub mod c;
pub mod c_gen;
pub mod fortran;
pub mod fortran_gen;
pub mod overlay;

use crate::error::GenError;
use crate::strings::SentinelBuffer;
use fmod_types::{DerivedType, DescriptorResult, DimensionResolver, Field, LiteralError, Module};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The two artifacts of one run, rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub native_module: String,
    pub c_header: String,
}

/// Switches for the C header and its overlay. The native module has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Declare the singleton `extern` instead of defining it in the header.
    pub extern_instance: bool,
    /// Per-field copy/update helpers touch the instance directly instead of
    /// going through the bridge routines.
    pub inline_bridge_helpers: bool,
    /// Emit the C diagnostic `cprint_<type>`.
    pub emit_print: bool,
    pub emit_overlay: bool,
    /// Outer namespace of the C++ overlay.
    pub namespace: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            extern_instance: true,
            inline_bridge_helpers: false,
            emit_print: true,
            emit_overlay: true,
            namespace: "FortMod".to_string(),
        }
    }
}

/* Render both artifacts. Nothing is returned unless both succeed. */
pub fn generate(module: &Module, options: &GeneratorOptions) -> Result<Artifacts, GenError> {
    let native_module = fortran::FortranModuleGenerator::new(module).emit_code()?;
    let c_header = c::CCodeGenerator::new(module, options).emit_code()?;
    Ok(Artifacts {
        native_module,
        c_header,
    })
}

/* `<stub>.f90` and `<stub>.h`; the stub is extended, never truncated */
pub fn artifact_paths(stub: &Path) -> (PathBuf, PathBuf) {
    let with_suffix = |suffix: &str| {
        let mut name = stub.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    };
    (with_suffix(".f90"), with_suffix(".h"))
}

/* Write both artifacts next to `stub`, creating the directory if needed.
 * Both are staged under a `.tmp` suffix and renamed into place, so a failed
 * run leaves neither artifact behind. */
pub fn write_artifacts(artifacts: &Artifacts, stub: &Path) -> Result<(PathBuf, PathBuf), GenError> {
    let (native_path, header_path) = artifact_paths(stub);

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| GenError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let targets = [
        (&native_path, &artifacts.native_module),
        (&header_path, &artifacts.c_header),
    ];

    let mut staged: Vec<PathBuf> = Vec::new();
    for (path, text) in targets {
        let staging = staging_path(path);
        if let Err(source) = std::fs::write(&staging, text) {
            staged.push(staging);
            discard(&staged);
            return Err(GenError::Io {
                path: path.clone(),
                source,
            });
        }
        staged.push(staging);
    }

    for (i, (path, _)) in targets.iter().enumerate() {
        if let Err(source) = std::fs::rename(&staged[i], path) {
            discard(&staged[i..]);
            let placed: Vec<PathBuf> = targets[..i].iter().map(|(p, _)| p.to_path_buf()).collect();
            discard(&placed);
            return Err(GenError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    for (path, _) in &targets {
        info!("[✓] Generated {}", path.display());
    }
    Ok((native_path, header_path))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/* Best-effort cleanup after a failed write; the original error wins */
fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("could not remove {}: {}", path.display(), e);
            }
        }
    }
}

/* Attach the derived type to resolver errors raised while emitting it */
pub(crate) fn in_type<T>(result: DescriptorResult<T>, dtype: &DerivedType) -> Result<T, GenError> {
    result.map_err(|e| GenError::Descriptor(e.in_type(&dtype.name)))
}

/* Physical contents of a string field initialized from its first literal,
 * or None when the field has no data. Further literals are ignored. */
pub(crate) fn initial_string_buffer(
    dtype: &DerivedType,
    field: &Field,
    dims: &DimensionResolver,
) -> Result<Option<SentinelBuffer>, GenError> {
    let Some(first) = field.initial_data.first() else {
        return Ok(None);
    };
    let text = first.as_text().ok_or_else(|| {
        literal_error(
            dtype,
            field,
            LiteralError::Mismatch {
                kind: field.kind,
                value: first.to_string(),
            },
        )
    })?;
    let mut buffer = SentinelBuffer::new(in_type(dims.capacity(field), dtype)?);
    buffer.set(text);
    Ok(Some(buffer))
}

pub(crate) fn literal_error(dtype: &DerivedType, field: &Field, source: LiteralError) -> GenError {
    GenError::Literal {
        owner: format!("field '{}' on type '{}'", field.name, dtype.name),
        source,
    }
}
