use fmod_types::DataValue;
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde_derive::Deserialize;
use std::path::Path;

/* ============================================================================
   Raw descriptor document

   These mirror the document one-to-one. Kind and attribute names stay as
   strings here so that unknown names surface as descriptor errors naming
   the field, not as opaque deserializer failures.
   ============================================================================ */

/* Document formats understood by the loader */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptorFormat {
    #[default]
    Toml,
    Yaml,
    Json,
}

impl DescriptorFormat {
    /* Pick the format from the file extension; anything unknown is TOML */
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DescriptorFormat::Yaml,
            Some("json") => DescriptorFormat::Json,
            _ => DescriptorFormat::Toml,
        }
    }
}

/* Top level of the document: a single `module` table */
#[derive(Deserialize, Debug, Clone)]
pub struct DescriptorFile {
    pub module: RawModule,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawModule {
    pub name: String,

    /* Declared derived type names, in emission order */
    pub derivedtypes: Vec<String>,

    #[serde(default)]
    pub parameters: Vec<RawParameter>,

    #[serde(default)]
    pub uses: Vec<String>,

    /* Every other key is a derived type table, keyed by type name */
    #[serde(flatten)]
    pub tables: IndexMap<String, RawDerivedType>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: DataValue,
    #[serde(default)]
    pub comment: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawDerivedType {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub size: Option<OneOrMany<RawSize>>,
    #[serde(default)]
    pub data: Option<OneOrMany<RawData>>,
}

/* A scalar or a list of scalars */
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawSize {
    Literal(i64),
    Parameter(String),
    /* Tables, booleans, floats: reported with their index */
    Invalid(IgnoredAny),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawData {
    Value(DataValue),
    Invalid(IgnoredAny),
}
