use miniforest::prelude::*;
use miniforest::{AttributeKind, Feature, Value};

use std::io::Write;
use std::path::PathBuf;


const GOLF: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dataset/golf.csv");


fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}


#[test]
fn reads_golf_with_header() {
    let sample = SampleReader::new()
        .file(GOLF)
        .has_header(true)
        .target_feature("play")
        .read()
        .unwrap();

    assert_eq!(sample.shape(), (14, 4));
    assert_eq!(sample.target_name(), Some("play"));
    assert_eq!(sample.target()[0], "no");

    let kinds = sample.features()
        .iter()
        .map(|feature| (feature.name(), feature.kind()))
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec![
        ("outlook", AttributeKind::Categorical),
        ("temperature", AttributeKind::Numeric),
        ("humidity", AttributeKind::Numeric),
        ("windy", AttributeKind::Categorical),
    ]);

    assert_eq!(sample.numeric_column("humidity").unwrap()[3], 96.0);
    assert_eq!(sample.categorical_column("windy").unwrap()[1], "true");
    assert!(matches!(
        sample.numeric_column("outlook"),
        Err(C45Error::AttributeTypeMismatch { .. })
    ));
}


#[test]
fn headerless_columns_get_default_names() {
    let path = scratch_file(
        "miniforest_headerless.csv",
        "1.0,a,x\n2.5,b,y\n\n3.0,a,x\n",
    );
    let sample = Sample::from_csv(&path, false)
        .unwrap()
        .set_target("Feat. [3]")
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(sample.shape(), (3, 2));
    assert!(matches!(
        sample.feature("Feat. [1]").unwrap(),
        Feature::Numeric(_)
    ));
    assert_eq!(sample.target(), ["x", "y", "x"]);
}


#[test]
fn malformed_files_are_rejected() {
    let ragged = scratch_file("miniforest_ragged.csv", "a,b\n1,2\n3\n");
    assert!(matches!(
        Sample::from_csv(&ragged, true),
        Err(C45Error::RaggedRow { line: 3, expected: 2, got: 1 })
    ));
    std::fs::remove_file(&ragged).unwrap();

    let missing = scratch_file("miniforest_missing.csv", "a,b\n1,\n");
    assert!(matches!(
        Sample::from_csv(&missing, true),
        Err(C45Error::MissingValue { .. })
    ));
    std::fs::remove_file(&missing).unwrap();

    assert!(matches!(
        Sample::from_csv("/nonexistent/miniforest.csv", true),
        Err(C45Error::ReadSample { .. })
    ));
}


#[test]
fn reader_needs_file_and_target() {
    let no_target = SampleReader::<_, &str>::new()
        .file(GOLF)
        .read();
    assert!(matches!(
        no_target,
        Err(C45Error::InvalidConfig { parameter: "target_feature", .. })
    ));

    let unknown = SampleReader::new()
        .file(GOLF)
        .has_header(true)
        .target_feature("score")
        .read();
    assert!(matches!(unknown, Err(C45Error::UnknownColumn { .. })));
}


#[test]
fn rows_are_records() {
    let sample = Sample::from_csv(GOLF, true)
        .unwrap()
        .set_target("play")
        .unwrap();
    let row = sample.row(2).unwrap();
    assert_eq!(row.index(), 2);
    assert_eq!(row.label(), Some("yes"));

    let point = Point::new()
        .with("outlook", "overcast")
        .with("temperature", 83.0);
    assert_eq!(point.value("outlook"), row.value("outlook"));
    assert_eq!(point.value("temperature"), row.value("temperature"));
    assert_eq!(row.value("play"), None);

    assert!(matches!(
        sample.row(14),
        Err(C45Error::RowOutOfBounds { row: 14, n_sample: 14 })
    ));
}


#[test]
fn points_parse_from_json() {
    let point: Point = serde_json::from_str(
        r#"{"outlook": "rainy", "humidity": 80}"#
    ).unwrap();
    let expected = Point::from_iter([
        ("outlook".to_string(), Value::from("rainy")),
        ("humidity".to_string(), Value::from(80.0)),
    ]);
    assert_eq!(point, expected);
}


#[test]
fn quoted_cells_may_contain_commas() {
    let path = scratch_file(
        "miniforest_quoted.csv",
        "name,height,class\n\"Smith, J\",1.8,yes\n\"Doe, A\", 1.6 ,no\n",
    );
    let sample = Sample::from_csv(&path, true)
        .unwrap()
        .set_target("class")
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(sample.shape(), (2, 2));
    assert_eq!(sample.categorical_column("name").unwrap()[0], "Smith, J");
    assert_eq!(sample.numeric_column("height").unwrap(), &[1.8, 1.6]);
    assert_eq!(sample.target(), ["yes", "no"]);
}
