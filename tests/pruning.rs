use miniforest::prelude::*;
use miniforest::{Feature, TreeNode};

use rand::SeedableRng;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use std::collections::BTreeMap;


// `x` decides the label on the training rows,
// but every reference row with `x > 0` is labeled `a`.
fn reference_sample() -> Sample {
    Sample::from_features(vec![
        Feature::numeric("x", [-1.0, 1.0, 1.0, 2.0]),
        Feature::numeric("y", [0.0, -1.0, 1.0, 5.0]),
        Feature::categorical("class", ["a", "a", "a", "a"]),
    ]).unwrap()
        .set_target("class")
        .unwrap()
}


fn nested_tree() -> DecisionTreeClassifier {
    let greater = TreeNode::numeric(
        "y", 0.0, TreeNode::leaf("b"), TreeNode::leaf("c"),
    );
    DecisionTreeClassifier::from(
        TreeNode::numeric("x", 0.0, TreeNode::leaf("a"), greater)
    )
}


// Labels are a noisy function of two numeric columns.
fn noisy_sample(n_sample: usize, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut xs = Vec::with_capacity(n_sample);
    let mut ys = Vec::with_capacity(n_sample);
    let mut labels = Vec::with_capacity(n_sample);
    for _ in 0..n_sample {
        let x: f64 = rng.gen_range(-1.0..1.0);
        let y: f64 = rng.gen_range(-1.0..1.0);
        let mut label = if x + y > 0.0 { "pos" } else { "neg" };
        if rng.gen_bool(0.2) {
            label = if label == "pos" { "neg" } else { "pos" };
        }
        xs.push(x);
        ys.push(y);
        labels.push(label);
    }
    Sample::from_features(vec![
        Feature::numeric("x", xs),
        Feature::numeric("y", ys),
        Feature::categorical("label", labels),
    ]).unwrap()
        .set_target("label")
        .unwrap()
}


#[test]
fn score_pruning_replaces_a_harmful_subtree() {
    let sample = reference_sample();
    let indices = sample.indices();
    let mut tree = nested_tree();
    assert_eq!(tree.accuracy(&sample, &indices).unwrap(), 0.25);

    tree.prune(&sample, &indices, PruneMethod::Score).unwrap();

    assert_eq!(tree.accuracy(&sample, &indices).unwrap(), 1.0);
    let expected = TreeNode::numeric(
        "x", 0.0, TreeNode::leaf("a"), TreeNode::leaf("a"),
    );
    assert_eq!(tree.to_tree_node().unwrap(), expected);
    assert_eq!(tree.n_nodes(), 3);
}


#[test]
fn score_pruning_merges_uniform_children() {
    let sample = reference_sample();
    let tree = DecisionTreeClassifier::from(TreeNode::numeric(
        "x", 0.0, TreeNode::leaf("a"), TreeNode::leaf("a"),
    ));
    let tree = prune(tree, &sample, &sample.indices(), PruneMethod::Score)
        .unwrap();
    assert_eq!(tree.to_tree_node().unwrap(), TreeNode::leaf("a"));
    assert_eq!(tree.n_nodes(), 1);
}


#[test]
fn score_pruning_never_lowers_accuracy() {
    let train = noisy_sample(120, 11);
    let tree = build_tree(&train, usize::MAX, 0.0).unwrap();

    for seed in 0..5 {
        let reference = noisy_sample(60, 100 + seed);
        let indices = reference.indices();
        let before = tree.accuracy(&reference, &indices).unwrap();

        let pruned = prune(tree.clone(), &reference, &indices, PruneMethod::Score)
            .unwrap();
        let after = pruned.accuracy(&reference, &indices).unwrap();

        assert!(after >= before, "{after} < {before}");
        assert!(pruned.n_nodes() <= tree.n_nodes());
    }
}


#[test]
fn unreached_children_become_parent_mode_leaves() {
    let sample = reference_sample();
    // No reference row has `x <= -5`.
    let tree = DecisionTreeClassifier::from(TreeNode::numeric(
        "x",
        -5.0,
        TreeNode::numeric("y", 0.0, TreeNode::leaf("b"), TreeNode::leaf("c")),
        TreeNode::leaf("a"),
    ));
    let tree = prune(tree, &sample, &sample.indices(), PruneMethod::Score)
        .unwrap();
    let expected = TreeNode::numeric(
        "x", -5.0, TreeNode::leaf("a"), TreeNode::leaf("a"),
    );
    assert_eq!(tree.to_tree_node().unwrap(), expected);
}


#[test]
fn entropy_pruning_collapses_weak_splits() {
    let sample = Sample::from_features(vec![
        Feature::numeric("x", [-2.0, -1.0, 0.0, 1.0, 2.0, 3.0]),
        Feature::categorical(
            "color", ["red", "red", "red", "orange", "orange", "orange"]
        ),
    ]).unwrap()
        .set_target("color")
        .unwrap();
    let indices = sample.indices();
    let tree = build_tree(&sample, 1, 0.0).unwrap();

    // The split gains exactly one bit.
    let kept = prune(
        tree.clone(), &sample, &indices, PruneMethod::default()
    ).unwrap();
    assert_eq!(kept, tree);

    // Ties on the mode go to the smallest label.
    let collapsed = prune(
        tree, &sample, &indices, PruneMethod::Entropy { threshold: 1.5 }
    ).unwrap();
    assert_eq!(collapsed.to_tree_node().unwrap(), TreeNode::leaf("orange"));
}


#[test]
fn entropy_pruning_collapses_on_missing_groups() {
    let sample = Sample::from_features(vec![
        Feature::categorical("shade", ["dark", "dark", "light", "light"]),
        Feature::categorical("class", ["p", "q", "q", "q"]),
    ]).unwrap()
        .set_target("class")
        .unwrap();

    let tree = DecisionTreeClassifier::from(TreeNode::categorical(
        "shade",
        BTreeMap::from([
            ("dark".to_string(), TreeNode::leaf("p")),
            ("light".to_string(), TreeNode::leaf("q")),
            ("pale".to_string(), TreeNode::leaf("p")),
        ]),
    ));
    let method = PruneMethod::Entropy { threshold: 0.0 };
    let pruned = prune(tree, &sample, &sample.indices(), method).unwrap();
    assert_eq!(pruned.to_tree_node().unwrap(), TreeNode::leaf("q"));
}


#[test]
fn pruning_rejects_bad_input() {
    let sample = reference_sample();
    let mut tree = nested_tree();
    assert!(matches!(
        tree.prune(&sample, &[], PruneMethod::Score),
        Err(C45Error::EmptyDataset)
    ));
    assert!(matches!(
        tree.prune(&sample, &[0, 9], PruneMethod::Score),
        Err(C45Error::RowOutOfBounds { row: 9, .. })
    ));
    assert!(matches!(
        tree.prune(
            &sample, &[0], PruneMethod::Entropy { threshold: f64::INFINITY }
        ),
        Err(C45Error::InvalidConfig { .. })
    ));
    assert_eq!(tree, nested_tree());
}
