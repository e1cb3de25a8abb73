use fmod_loader::fmod_types::{
    AttributeKind, DataValue, DescriptorError, FieldKind, SizeSpec,
};
use fmod_loader::{load_module, parse_module, DescriptorFormat, LoadError};
use std::fs;

const TESTMOD_TOML: &str = r#"
[module]
name = "testmod"
derivedtypes = ["testtype1", "testtype2"]
uses = ["constants"]

[[module.parameters]]
name = "intpar"
type = "integer"
value = 5
comment = "array extent"

[[module.parameters]]
name = "floatpar"
type = "float"
value = 1.2345678

[module.testtype1]
comment = "scalars"

[[module.testtype1.fields]]
name = "fbool"
type = "bool"
data = true

[[module.testtype1.fields]]
name = "fstr"
type = "string"
size = 100
attributes = ["configurable"]
data = "hello"

[module.testtype2]

[[module.testtype2.fields]]
name = "ffloatapar"
type = "float"
size = ["intpar"]
data = [10, 9, 8, 7, 6]

[[module.testtype2.fields]]
name = "fint3dim"
type = "integer"
size = [4, 3, 2]
"#;

fn expect_invalid(result: Result<fmod_loader::fmod_types::Module, LoadError>) -> Vec<DescriptorError> {
    match result {
        Err(LoadError::Invalid { errors }) => errors,
        Err(other) => panic!("expected descriptor errors, got {other}"),
        Ok(_) => panic!("expected descriptor errors, got a module"),
    }
}

fn root_cause(error: &DescriptorError) -> &DescriptorError {
    match error {
        DescriptorError::InType { source, .. } => root_cause(source),
        other => other,
    }
}

#[test]
fn loads_toml_module_in_declaration_order() {
    let module = parse_module(TESTMOD_TOML, DescriptorFormat::Toml).expect("valid descriptor");

    assert_eq!(module.name, "testmod");
    assert_eq!(module.uses, vec!["constants".to_string()]);
    assert_eq!(module.parameters.len(), 2);
    assert_eq!(module.parameters[0].kind, FieldKind::Integer);
    assert_eq!(module.parameters[0].comment, "array extent");

    let names: Vec<&str> = module.types.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["testtype1", "testtype2"]);

    let t1 = module.derived_type("testtype1").expect("testtype1");
    assert_eq!(t1.comment, "scalars");
    assert_eq!(t1.fields[0].initial_data, vec![DataValue::Bool(true)]);
    let fstr = t1.field("fstr").expect("fstr");
    assert_eq!(fstr.dimensions, vec![SizeSpec::Literal(100)]);
    assert!(fstr.has_attribute(AttributeKind::Configurable));

    let t2 = module.derived_type("testtype2").expect("testtype2");
    assert_eq!(
        t2.fields[0].dimensions,
        vec![SizeSpec::Parameter("intpar".to_string())]
    );
    assert_eq!(t2.fields[0].initial_data.len(), 5);
    assert_eq!(t2.fields[1].rank(), 3);
}

#[test]
fn loads_yaml_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mod.yaml");
    fs::write(
        &path,
        r#"
module:
  name: ymod
  derivedtypes: [point]
  parameters:
    - name: dims
      type: integer
      value: 3
  point:
    fields:
      - name: xyz
        type: double
        size: dims
        data: [1.0, 2.5, -3]
"#,
    )
    .expect("write descriptor");

    let module = load_module(&path).expect("valid yaml descriptor");
    let point = module.derived_type("point").expect("point");
    assert_eq!(point.fields[0].kind, FieldKind::Double);
    assert_eq!(point.fields[0].initial_data[2], DataValue::Integer(-3));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = load_module(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let result = parse_module("[module]\nname = 3\n", DescriptorFormat::Toml);
    assert!(matches!(result, Err(LoadError::Toml(_))));
}

#[test]
fn reports_every_descriptor_error() {
    let doc = r#"
[module]
name = "bad"
derivedtypes = ["T", "Missing"]

[[module.parameters]]
name = "fp"
type = "float"
value = 2.0

[module.T]

[[module.T.fields]]
name = "a"
type = "complex"

[[module.T.fields]]
name = "b"
type = "integer"
size = ["fp"]

[[module.T.fields]]
name = "c"
type = "integer"
size = ["nope"]

[[module.T.fields]]
name = "d"
type = "string"
size = [2, 3]

[[module.T.fields]]
name = "e"
type = "bool"
data = 1

[[module.T.fields]]
name = "f"
type = "integer"
attributes = ["volatile"]
"#;
    let errors = expect_invalid(parse_module(doc, DescriptorFormat::Toml));
    let causes: Vec<&DescriptorError> = errors.iter().map(root_cause).collect();

    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::UnknownFieldKind { name, .. } if name == "complex")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::NonIntegerParameter { parameter, .. } if parameter == "fp")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::UnknownParameter { parameter, .. } if parameter == "nope")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::StringArray { rank: 2, .. })));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::InvalidFieldData { field, .. } if field == "e")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::UnknownAttribute { name, .. } if name == "volatile")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::MissingDerivedType { name } if name == "Missing")));

    /* Field errors name their derived type */
    assert!(errors
        .iter()
        .all(|e| matches!(e, DescriptorError::InType { type_name, .. } if type_name == "T")
            || matches!(e, DescriptorError::MissingDerivedType { .. })));
}

#[test]
fn duplicates_are_rejected() {
    let doc = r#"
[module]
name = "dups"
derivedtypes = ["T", "T"]

[[module.parameters]]
name = "N"
type = "integer"
value = 1

[[module.parameters]]
name = "N"
type = "integer"
value = 2

[module.T]

[[module.T.fields]]
name = "x"
type = "integer"

[[module.T.fields]]
name = "x"
type = "float"
"#;
    let errors = expect_invalid(parse_module(doc, DescriptorFormat::Toml));
    let causes: Vec<&DescriptorError> = errors.iter().map(root_cause).collect();
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::DuplicateParameter { name } if name == "N")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::DuplicateType { name } if name == "T")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::DuplicateField { name } if name == "x")));
}

#[test]
fn duplicates_ignore_case() {
    let doc = r#"
[module]
name = "folded"
derivedtypes = ["Foo", "foo"]

[[module.parameters]]
name = "n"
type = "integer"
value = 1

[[module.parameters]]
name = "N"
type = "integer"
value = 2

[module.Foo]

[[module.Foo.fields]]
name = "a"
type = "integer"

[[module.Foo.fields]]
name = "A"
type = "integer"

[module.foo]

[[module.foo.fields]]
name = "b"
type = "integer"
"#;
    let errors = expect_invalid(parse_module(doc, DescriptorFormat::Toml));
    let causes: Vec<&DescriptorError> = errors.iter().map(root_cause).collect();
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::DuplicateParameter { name } if name == "N")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::DuplicateType { name } if name == "foo")));
    assert!(causes
        .iter()
        .any(|e| matches!(e, DescriptorError::DuplicateField { name } if name == "A")));
}

#[test]
fn derived_type_needs_a_field() {
    for fields in ["fields = []\n", ""] {
        let doc = format!(
            "[module]\nname = \"m\"\nderivedtypes = [\"T\"]\n\n[module.T]\ncomment = \"hollow\"\n{}",
            fields
        );
        let errors = expect_invalid(parse_module(&doc, DescriptorFormat::Toml));
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(matches!(
            &errors[0],
            DescriptorError::InType { type_name, source }
                if type_name == "T"
                    && matches!(source.as_ref(), DescriptorError::EmptyDerivedType { name } if name == "T")
        ));
    }
}

#[test]
fn invalid_parameter_literal() {
    let doc = r#"
[module]
name = "m"
derivedtypes = []

[[module.parameters]]
name = "flag"
type = "bool"
value = 1
"#;
    let errors = expect_invalid(parse_module(doc, DescriptorFormat::Toml));
    assert!(matches!(
        &errors[0],
        DescriptorError::InvalidParameterValue { parameter, .. } if parameter == "flag"
    ));
}

#[test]
fn excess_data_is_not_an_error() {
    let doc = r#"
[module]
name = "m"
derivedtypes = ["T"]

[module.T]

[[module.T.fields]]
name = "a"
type = "integer"
size = 3
data = [1, 2, 3, 4, 5]
"#;
    let module = parse_module(doc, DescriptorFormat::Toml).expect("excess literals are clipped later");
    assert_eq!(module.types["T"].fields[0].initial_data.len(), 5);
}

#[test]
fn format_follows_extension() {
    use std::path::Path;
    assert_eq!(DescriptorFormat::from_path(Path::new("a.yml")), DescriptorFormat::Yaml);
    assert_eq!(DescriptorFormat::from_path(Path::new("a.json")), DescriptorFormat::Json);
    assert_eq!(DescriptorFormat::from_path(Path::new("a.toml")), DescriptorFormat::Toml);
    assert_eq!(DescriptorFormat::from_path(Path::new("descriptor")), DescriptorFormat::Toml);
}
