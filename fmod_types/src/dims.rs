use crate::error::{DescriptorError, DescriptorResult};
use crate::types::{Field, Module, Parameter, SizeSpec};

/// Upper bound on any extent or element count. Subscripts and extents are
/// emitted as C `int` and default Fortran integers.
pub const MAX_ELEMENTS: usize = i32::MAX as usize;

/// Resolves symbolic and literal array extents against a parameter list.
///
/// Both emitters go through the same resolver so the native module and the
/// C mirror can never disagree on an extent.
#[derive(Debug, Clone, Copy)]
pub struct DimensionResolver<'a> {
    parameters: &'a [Parameter],
}

impl<'a> DimensionResolver<'a> {
    pub fn new(parameters: &'a [Parameter]) -> Self {
        Self { parameters }
    }

    pub fn for_module(module: &'a Module) -> Self {
        Self::new(&module.parameters)
    }

    fn lookup(&self, name: &str) -> Option<&'a Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /* Resolve a single size spec; `field` and `axis` only label errors */
    fn resolve_spec(&self, field: &Field, axis: usize, spec: &SizeSpec) -> DescriptorResult<usize> {
        let size = match spec {
            SizeSpec::Literal(size) => *size,
            SizeSpec::Parameter(name) => {
                let parameter = self.lookup(name).ok_or_else(|| DescriptorError::UnknownParameter {
                    field: field.name.clone(),
                    parameter: name.clone(),
                })?;
                if !parameter.is_integer() {
                    return Err(DescriptorError::NonIntegerParameter {
                        field: field.name.clone(),
                        parameter: name.clone(),
                        kind: parameter.kind,
                    });
                }
                parameter
                    .value
                    .as_integer()
                    .ok_or_else(|| DescriptorError::UnparsableDimension {
                        field: field.name.clone(),
                        parameter: name.clone(),
                        value: parameter.value.to_string(),
                    })?
            }
        };

        match usize::try_from(size) {
            Ok(size) if size > MAX_ELEMENTS => Err(DescriptorError::ExtentOverflow {
                field: field.name.clone(),
                limit: MAX_ELEMENTS,
            }),
            Ok(size) if size > 0 => Ok(size),
            _ => Err(DescriptorError::NonPositiveDimension {
                field: field.name.clone(),
                axis,
                size,
            }),
        }
    }

    /// Extent of one axis, in native axis order.
    pub fn resolve(&self, field: &Field, axis: usize) -> DescriptorResult<usize> {
        let spec = field
            .dimensions
            .get(axis)
            .ok_or_else(|| DescriptorError::AxisOutOfRange {
                field: field.name.clone(),
                axis,
                rank: field.rank(),
            })?;
        self.resolve_spec(field, axis, spec)
    }

    /// All logical extents in native (column-major) order.
    pub fn axes(&self, field: &Field) -> DescriptorResult<Vec<usize>> {
        (0..field.rank()).map(|axis| self.resolve(field, axis)).collect()
    }

    /// Product of all logical extents; 1 for a scalar.
    pub fn total_elements(&self, field: &Field) -> DescriptorResult<usize> {
        checked_product(field, &self.axes(field)?)
    }

    /// Number of content characters a string field can hold.
    pub fn capacity(&self, field: &Field) -> DescriptorResult<usize> {
        self.total_elements(field)
    }

    /// Extents as laid out in memory, native axis order. String fields get
    /// one extra slot for the terminating sentinel.
    pub fn physical_axes(&self, field: &Field) -> DescriptorResult<Vec<usize>> {
        if field.is_string() {
            let physical = self.capacity(field)? + 1;
            return checked_product(field, &[physical]).map(|slots| vec![slots]);
        }
        self.axes(field)
    }

    /// Physical extents in C (row-major) declaration order: the exact
    /// reverse of the native order, so linear offsets coincide.
    pub fn c_axes(&self, field: &Field) -> DescriptorResult<Vec<usize>> {
        let mut axes = self.physical_axes(field)?;
        axes.reverse();
        Ok(axes)
    }

    /// Total number of elements the physical buffer holds.
    pub fn physical_elements(&self, field: &Field) -> DescriptorResult<usize> {
        checked_product(field, &self.physical_axes(field)?)
    }
}

fn checked_product(field: &Field, axes: &[usize]) -> DescriptorResult<usize> {
    axes.iter()
        .try_fold(1usize, |acc, d| acc.checked_mul(*d))
        .filter(|total| *total <= MAX_ELEMENTS)
        .ok_or_else(|| DescriptorError::ExtentOverflow {
            field: field.name.clone(),
            limit: MAX_ELEMENTS,
        })
}

/// `dimension(d0, d1, ...)` for the native module; empty for scalars.
pub fn native_dimension_list(axes: &[usize]) -> String {
    if axes.is_empty() {
        return String::new();
    }
    let dims: Vec<String> = axes.iter().map(|d| d.to_string()).collect();
    format!("dimension({})", dims.join(", "))
}

/// `[dn]...[d0]` for the C mirror; expects axes already in C order.
pub fn c_dimension_list(axes: &[usize]) -> String {
    axes.iter().map(|d| format!("[{}]", d)).collect()
}

/// 1-based column-major subscripts of the first `count` elements.
pub fn column_major_subscripts(axes: &[usize], count: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::with_capacity(count);
    let mut index = vec![1usize; axes.len()];
    for _ in 0..count {
        out.push(index.clone());
        for (axis, extent) in axes.iter().enumerate() {
            if index[axis] < *extent {
                index[axis] += 1;
                break;
            }
            index[axis] = 1;
        }
    }
    out
}
