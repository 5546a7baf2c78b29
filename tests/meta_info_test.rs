//! Tests for ObjectMetaInfo parse/serialize contract

use std::fmt::Debug;

use roxmltree::Document;
use rstest::rstest;

use ccreport::meta_info::{MetaInfoError, ObjectMetaInfo, OBJECT_META_INFO_TAG};
use ccreport::util::testing::init_test_setup;
use ccreport::xml::{Tabs, XmlValue};

fn to_input(info: &ObjectMetaInfo<impl XmlValue>) -> String {
    let mut out = Vec::new();
    info.to_input_xml(&mut out, &mut Tabs::new()).unwrap();
    String::from_utf8(out).unwrap()
}

fn parse<T: XmlValue + Default>(xml: &str) -> (ObjectMetaInfo<T>, Result<(), MetaInfoError>) {
    let doc = Document::parse(xml).unwrap();
    let mut info = ObjectMetaInfo::<T>::default();
    let result = info.try_parse(doc.root_element());
    (info, result)
}

fn assert_roundtrip<T: XmlValue + Default + Clone + PartialEq + Debug>(name: &str, value: T) {
    let original = ObjectMetaInfo::new(name, value);
    let xml = to_input(&original);

    let doc = Document::parse(&xml).unwrap();
    let mut parsed = ObjectMetaInfo::<T>::default();

    assert!(parsed.parse(doc.root_element()), "failed to parse {xml}");
    assert_eq!(parsed, original);
}

// ============================================================
// Round trip
// ============================================================

#[rstest]
#[case("gdp-scale", 1.2)]
#[case("negative", -0.000_125)]
#[case("large", 6.02e23)]
#[case("a\nb\tc", 0.5)]
#[case("gdp\r\nscale", 1.5)]
fn given_f64_record_when_roundtripping_then_equal(#[case] name: &str, #[case] value: f64) {
    assert_roundtrip(name, value);
}

#[test]
fn given_records_of_other_types_when_roundtripping_then_equal() {
    assert_roundtrip("count", 42_i32);
    assert_roundtrip("enabled", true);
    assert_roundtrip("unit", String::from("Gt C <per> year & more"));
    assert_roundtrip("note", String::from("a\rb"));
    assert_roundtrip("lines", String::from("first\r\nsecond\tthird"));
}

#[test]
fn given_unchanged_record_when_serializing_twice_then_output_is_identical() {
    let info = ObjectMetaInfo::new("gdp-scale", 1.2_f64);
    assert_eq!(to_input(&info), to_input(&info));
}

#[test]
fn given_record_when_serializing_debug_then_matches_input_dialect() {
    let info = ObjectMetaInfo::new("gdp-scale", 1.2_f64);
    let mut debug = Vec::new();
    info.to_debug_xml(7, &mut debug, &mut Tabs::new()).unwrap();

    assert_eq!(String::from_utf8(debug).unwrap(), to_input(&info));
}

#[test]
fn given_indented_tabs_when_serializing_then_restores_depth() {
    let info = ObjectMetaInfo::new("x", 1_i64);
    let mut tabs = Tabs::new();
    tabs.increase();
    let mut out = Vec::new();

    info.to_input_xml(&mut out, &mut tabs).unwrap();

    assert_eq!(tabs.depth(), 1);
    assert!(String::from_utf8(out).unwrap().starts_with("\t<object-meta-info"));
}

// ============================================================
// Field count
// ============================================================

#[rstest]
#[case::name_only(r#"<object-meta-info name="a"/>"#, Err(MetaInfoError::MissingValue))]
#[case::value_only(r#"<object-meta-info><value>1</value></object-meta-info>"#, Err(MetaInfoError::MissingName))]
#[case::empty_name(r#"<object-meta-info name=""><value>1</value></object-meta-info>"#, Err(MetaInfoError::MissingName))]
#[case::two_values(
    r#"<object-meta-info name="a"><value>1</value><value>2</value></object-meta-info>"#,
    Err(MetaInfoError::DuplicateValue(2))
)]
#[case::two_values_no_name(
    r#"<object-meta-info><value>1</value><value>2</value></object-meta-info>"#,
    Err(MetaInfoError::DuplicateValue(2))
)]
#[case::complete(r#"<object-meta-info name="a"><value>1</value></object-meta-info>"#, Ok(()))]
#[case::with_whitespace(
    "<object-meta-info name=\"a\">\n\t<value> 1 </value>\n</object-meta-info>",
    Ok(())
)]
#[case::with_comment(
    r#"<object-meta-info name="a"><!-- note --><value>1</value></object-meta-info>"#,
    Ok(())
)]
fn given_node_when_parsing_then_requires_name_and_one_value(
    #[case] xml: &str,
    #[case] expected: Result<(), MetaInfoError>,
) {
    let (_, result) = parse::<f64>(xml);
    assert_eq!(result, expected);
}

#[test]
fn given_complete_node_when_parsing_then_bool_result_is_true() {
    let doc = Document::parse(r#"<object-meta-info name="a"><value>2.5</value></object-meta-info>"#)
        .unwrap();
    let mut info = ObjectMetaInfo::<f64>::default();

    assert!(info.parse(doc.root_element()));
    assert_eq!(info.name(), "a");
    assert_eq!(*info.value(), 2.5);
}

// ============================================================
// Rejection
// ============================================================

#[test]
fn given_unknown_child_with_complete_fields_when_parsing_then_rejects() {
    init_test_setup();
    let (_, result) = parse::<f64>(
        r#"<object-meta-info name="a"><value>1</value><unit>Gt</unit></object-meta-info>"#,
    );
    assert_eq!(result, Err(MetaInfoError::UnknownField("unit".to_string())));
}

#[test]
fn given_unknown_child_before_value_when_parsing_then_keeps_partial_name() {
    let (info, result) =
        parse::<f64>(r#"<object-meta-info name="a"><unit/><value>1</value></object-meta-info>"#);

    assert!(result.is_err());
    assert_eq!(info.name(), "a");
    assert_eq!(*info.value(), 0.0);
}

#[test]
fn given_unconvertible_value_when_parsing_then_rejects() {
    let (_, result) =
        parse::<i32>(r#"<object-meta-info name="a"><value>1.5</value></object-meta-info>"#);
    assert_eq!(result, Err(MetaInfoError::InvalidValue));
}

#[test]
fn given_any_type_then_tag_name_is_shared() {
    assert_eq!(ObjectMetaInfo::<f64>::xml_name_static(), OBJECT_META_INFO_TAG);
    assert_eq!(ObjectMetaInfo::<String>::xml_name_static(), "object-meta-info");
}
