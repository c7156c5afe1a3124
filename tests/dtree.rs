use miniforest::prelude::*;
use miniforest::{Feature, TreeNode, RecordingMonitor, TraceMonitor, AttributeKind};
use polars::prelude::NamedFrom;

use std::collections::BTreeMap;


// Toy example (r/o are the red/orange examples).
// The labels are separated by `x <= 0`;
// `y` does not separate them.
//
//  6|                       o
//  5|   r                   |
//  4|                       |     o
//  3|           r           |
//  2|                       o
//  1|       r               |
//   |___________________________________
//      -2  -1   0   1   2   3
//
fn separable() -> Sample {
    let df = polars::df!(
        "x" => &[-2.0, -1.0, 0.0, 1.0, 2.0, 3.0],
        "y" => &[5.0, 1.0, 3.0, 2.0, 6.0, 4.0],
        "color" => &["red", "red", "red", "orange", "orange", "orange"],
    ).unwrap();

    Sample::from_dataframe(&df)
        .unwrap()
        .set_target("color")
        .unwrap()
}


fn golf() -> Sample {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dataset/golf.csv");
    Sample::from_csv(path, true)
        .unwrap()
        .set_target("play")
        .unwrap()
}


#[test]
fn single_numeric_split() {
    let sample = separable();
    let tree = build_tree(&sample, 1, 0.0).unwrap();

    let expected = TreeNode::numeric(
        "x", 0.0, TreeNode::leaf("red"), TreeNode::leaf("orange"),
    );
    assert_eq!(tree.to_tree_node().unwrap(), expected);
    assert_eq!(tree.n_splits(), 1);
    assert_eq!(tree.n_leaves(), 2);
    assert_eq!(tree.depth().unwrap(), 1);

    let point = Point::new().with("x", 0.0).with("y", 100.0);
    assert_eq!(tree.classify(&point).unwrap(), "red");
    let point = Point::new().with("x", 0.5);
    assert_eq!(tree.classify(&point).unwrap(), "orange");
}


#[test]
fn one_row_is_a_leaf() {
    let sample = Sample::from_features(vec![
        Feature::numeric("x", [1.5]),
        Feature::categorical("shade", ["dark"]),
        Feature::categorical("class", ["solo"]),
    ]).unwrap()
        .set_target("class")
        .unwrap();

    let tree = build_tree(&sample, 2, 0.05).unwrap();
    assert_eq!(tree.to_tree_node().unwrap(), TreeNode::leaf("solo"));
    assert_eq!(tree.classify(&Point::new()).unwrap(), "solo");
}


#[test]
fn golf_tree() {
    let sample = golf();
    let tree = build_tree(&sample, 2, 0.05).unwrap();

    let rainy = TreeNode::categorical(
        "windy",
        BTreeMap::from([
            ("false".to_string(), TreeNode::leaf("yes")),
            ("true".to_string(), TreeNode::leaf("no")),
        ]),
    );
    let sunny = TreeNode::numeric(
        "humidity", 70.0, TreeNode::leaf("yes"), TreeNode::leaf("no"),
    );
    let expected = TreeNode::categorical(
        "outlook",
        BTreeMap::from([
            ("overcast".to_string(), TreeNode::leaf("yes")),
            ("rainy".to_string(), rainy),
            ("sunny".to_string(), sunny),
        ]),
    );
    assert_eq!(tree.to_tree_node().unwrap(), expected);
}


#[test]
fn zero_threshold_fits_training_data() {
    for sample in [separable(), golf()] {
        let tree = build_tree(&sample, usize::MAX, 0.0).unwrap();
        let indices = sample.indices();
        assert_eq!(tree.accuracy(&sample, &indices).unwrap(), 1.0);

        for i in indices {
            let row = sample.row(i).unwrap();
            assert_eq!(tree.classify(&row).unwrap(), sample.target()[i]);
        }
    }
}


#[test]
fn growth_is_deterministic() {
    let sample = golf();
    let first = build_tree(&sample, 2, 0.05).unwrap();
    let second = build_tree(&sample, 2, 0.05).unwrap();
    assert_eq!(first, second);

    let point = Point::new()
        .with("outlook", "sunny")
        .with("humidity", 85.0);
    let labels = (0..10)
        .map(|_| first.classify(&point).unwrap())
        .collect::<Vec<_>>();
    assert!(labels.iter().all(|&label| label == "no"));
}


#[test]
fn bootstrap_rows_are_accepted() {
    let sample = separable();
    let tree = DecisionTreeBuilder::new()
        .min_depth(1)
        .info_threshold(0.0)
        .build()
        .unwrap();

    let f = tree.produce(&sample, &[0, 0, 0, 5, 5]).unwrap();
    assert_eq!(f.to_tree_node().unwrap().label(), None);
    assert_eq!(f.predict(&sample, 0).unwrap(), "red");
    assert_eq!(f.predict(&sample, 3).unwrap(), "orange");

    assert!(matches!(
        tree.produce(&sample, &[]),
        Err(C45Error::EmptyDataset)
    ));
    assert!(matches!(
        tree.produce(&sample, &[0, 6]),
        Err(C45Error::RowOutOfBounds { row: 6, .. })
    ));
}


#[test]
fn max_depth_caps_the_tree() {
    let sample = golf();
    let tree = DecisionTreeBuilder::new()
        .max_depth(1)
        .build()
        .unwrap()
        .produce(&sample, &sample.indices())
        .unwrap();
    assert_eq!(tree.depth().unwrap(), 1);
    assert_eq!(tree.n_splits(), 1);
}


#[test]
fn monitor_sees_every_node() {
    let sample = golf();
    let learner = DecisionTreeBuilder::new().build().unwrap();
    let mut monitor = RecordingMonitor::default();
    let tree = learner
        .produce_with_monitor(&sample, &sample.indices(), &mut monitor)
        .unwrap();

    assert_eq!(monitor.splits.len(), tree.n_splits());
    assert_eq!(monitor.leaves.len(), tree.n_leaves());
    assert_eq!(monitor.splits[0].0, 0);

    let traced = learner
        .produce_with_monitor(&sample, &sample.indices(), &mut TraceMonitor)
        .unwrap();
    assert_eq!(traced, tree);
}


#[test]
fn classification_failures() {
    let sample = golf();
    let tree = build_tree(&sample, 2, 0.05).unwrap();

    let unseen = Point::new().with("outlook", "foggy");
    match tree.classify(&unseen) {
        Err(C45Error::UnknownCategory { attribute, value }) => {
            assert_eq!(attribute, "outlook");
            assert_eq!(value.as_deref(), Some("foggy"));
        },
        other => panic!("unexpected result: {other:?}"),
    }

    let missing = Point::new().with("humidity", 60.0);
    assert!(matches!(
        tree.classify(&missing),
        Err(C45Error::UnknownCategory { value: None, .. })
    ));

    let mistyped = Point::new()
        .with("outlook", "sunny")
        .with("humidity", "high");
    assert!(matches!(
        tree.classify(&mistyped),
        Err(C45Error::AttributeTypeMismatch {
            expected: AttributeKind::Numeric,
            ..
        })
    ));
}


#[test]
fn invalid_builder_parameters() {
    assert!(matches!(
        DecisionTreeBuilder::new().info_threshold(f64::NAN).build(),
        Err(C45Error::InvalidConfig { .. })
    ));
    assert!(matches!(
        DecisionTreeBuilder::new().info_threshold(f64::INFINITY).build(),
        Err(C45Error::InvalidConfig { .. })
    ));
}


#[test]
fn zero_max_depth_is_a_mode_leaf() {
    let sample = golf();
    let tree = DecisionTreeBuilder::new()
        .max_depth(0)
        .build()
        .unwrap()
        .produce(&sample, &sample.indices())
        .unwrap();
    // 9 of the 14 days are `yes`.
    assert_eq!(tree.to_tree_node().unwrap(), TreeNode::leaf("yes"));
    assert_eq!(tree.depth().unwrap(), 0);
}


#[test]
fn display_follows_the_tree() {
    let sample = separable();
    let tree = build_tree(&sample, 1, 0.0).unwrap();
    let text = tree.to_string();
    assert!(text.starts_with("Split by \"x\" at 0\n"));
    assert!(text.contains("\tIt's red\n"));
    assert!(text.contains("Otherwise (x>0):\n\tIt's orange\n"));
}


#[test]
fn golf_tree_to_dot_file() {
    let sample = golf();
    let tree = build_tree(&sample, 2, 0.05).unwrap();

    let path = std::env::temp_dir().join("miniforest_golf.dot");
    tree.to_dot_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.first(), Some(&"graph DecisionTree {"));
    assert_eq!(lines.last(), Some(&"}"));

    // Nodes are numbered in pre-order.
    assert!(lines.contains(&"\tnode_0 [ label = \"outlook ?\" ];"));
    assert!(lines.contains(&"\tnode_1 [ label = \"yes\", shape = box ];"));
    assert!(lines.contains(&"\tnode_2 [ label = \"windy ?\" ];"));
    assert!(lines.contains(&"\tnode_5 [ label = \"humidity <= 70.0000 ?\" ];"));
    assert!(lines.contains(&"\tnode_0 -- node_1 [ label = \"overcast\" ];"));
    assert!(lines.contains(&"\tnode_0 -- node_5 [ label = \"sunny\" ];"));
    assert!(lines.contains(&"\tnode_5 -- node_6 [ label = \"Yes\" ];"));
    assert!(lines.contains(&"\tnode_5 -- node_7 [ label = \"No\" ];"));

    let (edges, nodes): (Vec<&str>, Vec<&str>) = lines.iter()
        .filter(|line| line.ends_with("];"))
        .partition(|line| line.contains("--"));
    let (n_nodes, n_edges) = (nodes.len(), edges.len());
    assert_eq!(n_nodes, tree.n_nodes());
    assert_eq!(n_edges, tree.n_nodes() - 1);
}


#[test]
fn dot_file_escapes_quotes() {
    let tree = DecisionTreeClassifier::from(TreeNode::categorical(
        "size",
        BTreeMap::from([
            ("5\" disk".to_string(), TreeNode::leaf("a\\b")),
            ("tape".to_string(), TreeNode::leaf("c")),
        ]),
    ));

    let path = std::env::temp_dir().join("miniforest_escaped.dot");
    tree.to_dot_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(text.contains("[ label = \"5\\\" disk\" ];"));
    assert!(text.contains("[ label = \"a\\\\b\", shape = box ];"));

    assert!(matches!(
        tree.to_dot_file("/nonexistent/miniforest.dot"),
        Err(C45Error::WriteFile { .. })
    ));
}
