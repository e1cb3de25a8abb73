use crate::value::DataValue;
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Closed set of element kinds a field or parameter can have.
///
/// Every table keyed on the kind (native keyword, native storage width, C
/// keyword, literal rule, byte size) is written as an exhaustive `match`,
/// so adding a variant fails to compile until all of them are updated.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Float,
    Double,
    Character,
    String,
    Bool,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Integer,
        FieldKind::Float,
        FieldKind::Double,
        FieldKind::Character,
        FieldKind::String,
        FieldKind::Bool,
    ];

    /// Look up a kind by its descriptor name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(FieldKind::Integer),
            "float" => Some(FieldKind::Float),
            "double" => Some(FieldKind::Double),
            "character" => Some(FieldKind::Character),
            "string" => Some(FieldKind::String),
            "bool" => Some(FieldKind::Bool),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Character => "character",
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
        }
    }

    /// Size in bytes of a single element. Strings are counted per character.
    pub fn byte_size(self) -> usize {
        match self {
            FieldKind::Integer => 4,
            FieldKind::Float => 4,
            FieldKind::Double => 8,
            FieldKind::Character => 1,
            FieldKind::String => 1,
            FieldKind::Bool => 1,
        }
    }

    /// Natural alignment of one element. Every kind is self-aligned.
    pub fn alignment(self) -> usize {
        self.byte_size()
    }

    pub fn is_integer(self) -> bool {
        self == FieldKind::Integer
    }

    pub fn is_string(self) -> bool {
        self == FieldKind::String
    }

    pub fn is_floating(self) -> bool {
        matches!(self, FieldKind::Float | FieldKind::Double)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Configurable,
}

impl AttributeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "configurable" => Some(AttributeKind::Configurable),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Configurable => "configurable",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Size of one array axis: a literal extent or the name of a parameter.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum SizeSpec {
    Literal(i64),
    Parameter(String),
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeSpec::Literal(size) => write!(f, "{}", size),
            SizeSpec::Parameter(name) => f.write_str(name),
        }
    }
}

/// Named scalar constant, usable as a value and as an array extent.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub value: DataValue,
    #[serde(default)]
    pub comment: String,
}

impl Parameter {
    pub fn is_integer(&self) -> bool {
        self.kind.is_integer()
    }

    pub fn is_string(&self) -> bool {
        self.kind.is_string()
    }

    pub fn is_floating(&self) -> bool {
        self.kind.is_floating()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {}", self.kind, self.name, self.value)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Axis extents in native (column-major) order. Empty for scalars.
    #[serde(default)]
    pub dimensions: Vec<SizeSpec>,
    #[serde(default)]
    pub attributes: BTreeSet<AttributeKind>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub initial_data: Vec<DataValue>,
}

impl Field {
    /// A scalar field of the given kind with no attributes or data.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            dimensions: Vec::new(),
            attributes: BTreeSet::new(),
            comment: String::new(),
            initial_data: Vec::new(),
        }
    }

    pub fn with_dimensions(mut self, dimensions: Vec<SizeSpec>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_data(mut self, data: Vec<DataValue>) -> Self {
        self.initial_data = data;
        self
    }

    pub fn is_array(&self) -> bool {
        !self.dimensions.is_empty()
    }

    pub fn is_string(&self) -> bool {
        self.kind.is_string()
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    pub fn has_attribute(&self, attribute: AttributeKind) -> bool {
        self.attributes.contains(&attribute)
    }

    pub fn has_initial_data(&self) -> bool {
        !self.initial_data.is_empty()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.name)?;
        if self.is_array() {
            let dims: Vec<String> = self.dimensions.iter().map(|d| d.to_string()).collect();
            write!(f, "({})", dims.join(", "))?;
        }
        Ok(())
    }
}

/// Record type. Field order is the memory layout order.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct DerivedType {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub fields: Vec<Field>,
}

impl DerivedType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn string_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_string())
    }
}

/// Root of the descriptor model. Built once, then only read.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub types: IndexMap<String, DerivedType>,
    #[serde(default)]
    pub uses: Vec<String>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            types: IndexMap::new(),
            uses: Vec::new(),
        }
    }

    /// Linear scan; parameter lists are short.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn derived_type(&self, name: &str) -> Option<&DerivedType> {
        self.types.get(name)
    }

    pub fn derived_types(&self) -> impl Iterator<Item = &DerivedType> {
        self.types.values()
    }
}
