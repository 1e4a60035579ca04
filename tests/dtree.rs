use std::env;
use minitree::prelude::*;
use minitree::decision_tree::{Node, Routing};



/// Tests for `DecisionTree`.
#[cfg(test)]
pub mod dtree_tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    const TEST_TOLERANCE: f64 = 1e-9;


    fn weather() -> Sample {
        let mut path = env::current_dir().unwrap();
        path.push("tests/dataset/weather.csv");

        Sample::from_csv(path, true)
            .unwrap()
            .set_target("play")
            .unwrap()
    }


    fn nominal_pair() -> Sample {
        let color = Feature::nominal("color", &["a", "b"], vec![0.0, 0.0, 1.0, 1.0]);
        let class = Feature::nominal("class", &["yes", "no"], vec![0.0, 0.0, 1.0, 1.0]);
        Sample::new(vec![color], class).unwrap()
    }


    fn numeric_five() -> Sample {
        let x = Feature::numeric("x", vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let class = Feature::nominal("class", &["A", "B"], vec![0.0, 0.0, 0.0, 1.0, 1.0]);
        Sample::new(vec![x], class).unwrap()
    }


    #[test]
    fn perfectly_correlated_nominal() {
        let sample = nominal_pair();
        let tree = DecisionTreeBuilder::new()
            .min_leaf_size(1.0)
            .build()
            .unwrap();
        let f = tree.produce(&sample).unwrap();

        let Node::Branch(root) = f.root() else {
            panic!("expected a split at the root, got {:?}.", f.root());
        };
        assert_eq!(root.children().len(), 2);
        assert!(root.children().iter().all(|c| matches!(c.as_deref(), Some(Node::Leaf(_)))));

        assert_eq!(f.classify(&[0.0]).unwrap(), 0);
        assert_eq!(f.classify(&[1.0]).unwrap(), 1);
        assert_eq!(f.class_distribution(&[0.0]).unwrap(), vec![1.0, 0.0]);
        assert_eq!(f.class_distribution(&[1.0]).unwrap(), vec![0.0, 1.0]);
        assert_eq!(f.tree_size(), 3);
        assert_eq!(f.n_leaves(), 2);
        assert_eq!(f.n_rules(), 1);
    }


    #[test]
    fn size_check_stops_gini_only() {
        // Both branches hold 2 rows, which does not exceed the minimum `2`.
        let sample = nominal_pair();

        let gain_ratio = TreeConfig {
            criterion: Criterion::GainRatio,
            ..TreeConfig::default()
        };
        let f = build(&sample, &gain_ratio).unwrap();
        assert!(matches!(f.root(), Node::Branch(_)), "gain ratio must split.");

        let gini = TreeConfig {
            criterion: Criterion::Gini,
            ..TreeConfig::default()
        };
        let f = build(&sample, &gini).unwrap();
        let Node::Leaf(leaf) = f.root() else {
            panic!("expected a leaf under Gini, got {:?}.", f.root());
        };
        assert_eq!(leaf.rows().len(), 4);
        assert_eq!(f.class_distribution(&[1.0]).unwrap(), vec![0.5, 0.5]);
    }


    #[test]
    fn informative_feature_beats_constant() {
        let constant = Feature::numeric("constant", vec![7.0; 5]);
        let x = Feature::numeric("x", vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let class = Feature::nominal("class", &["A", "B"], vec![0.0, 0.0, 0.0, 1.0, 1.0]);
        let sample = Sample::new(vec![constant, x], class).unwrap();

        for style in [SplitStyle::Binary, SplitStyle::Multiway] {
            let config = TreeConfig {
                split_style: style,
                min_leaf_size: 1.0,
                ..TreeConfig::default()
            };
            let f = build(&sample, &config).unwrap();
            let Node::Branch(root) = f.root() else {
                panic!("{style}: expected a split at the root, got {:?}.", f.root());
            };
            assert_eq!(root.rule().feature, 1, "{style}: expected to split on `x`.");
            assert_eq!(f.classify(&[7.0, 1.0]).unwrap(), 0);
            assert_eq!(f.classify(&[7.0, 5.0]).unwrap(), 1);
        }
    }


    #[test]
    fn gini_binary_splits_numeric_feature() {
        let x = Feature::numeric("x", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let class = Feature::nominal(
            "class", &["A", "B"],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        );
        let sample = Sample::new(vec![x], class).unwrap();
        let config = TreeConfig {
            criterion: Criterion::Gini,
            split_style: SplitStyle::Binary,
            min_leaf_size: 0.0,
        };
        let f = build(&sample, &config).unwrap();

        // The threshold `6` leaves a branch empty and is never chosen.
        let Node::Branch(root) = f.root() else {
            panic!("expected a split at the root, got {:?}.", f.root());
        };
        assert_eq!(root.rule().routing, Routing::NumericBinary { threshold: 1.0 });

        assert_eq!(f.classify(&[1.0]).unwrap(), 0);
        assert_eq!(f.classify(&[2.0]).unwrap(), 0);
        assert_eq!(f.classify(&[6.0]).unwrap(), 1);
    }


    #[test]
    fn numeric_threshold_at_three() {
        let sample = numeric_five();
        let tree = DecisionTreeBuilder::new()
            .split_style(SplitStyle::Binary)
            .min_leaf_size(1.0)
            .build()
            .unwrap();
        let f = tree.produce(&sample).unwrap();

        assert_eq!(f.classify(&[2.5]).unwrap(), 0);
        assert_eq!(f.classify(&[3.0]).unwrap(), 0);
        assert_eq!(f.classify(&[3.5]).unwrap(), 1);
        // Beyond the observed range.
        assert_eq!(f.classify(&[100.0]).unwrap(), 1);

        let predictions = f.predict_all(&sample)
            .into_iter()
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(predictions, vec![0, 0, 0, 1, 1]);
    }


    #[test]
    fn constant_feature_gives_a_leaf() {
        let x = Feature::numeric("x", vec![7.0, 7.0, 7.0]);
        let class = Feature::nominal("class", &["A", "B"], vec![0.0, 1.0, 0.0]);
        let sample = Sample::new(vec![x], class).unwrap();

        for style in [SplitStyle::Binary, SplitStyle::Multiway] {
            let config = TreeConfig { split_style: style, ..TreeConfig::default() };
            let f = build(&sample, &config).unwrap();
            assert!(matches!(f.root(), Node::Leaf(_)), "{style}: expected a leaf.");

            assert_eq!(f.classify(&[7.0]).unwrap(), 0);
            let dist = f.class_distribution(&[7.0]).unwrap();
            let expected = 2.0 / 3.0;
            assert!(
                (dist[0] - expected).abs() < TEST_TOLERANCE,
                "expected {expected}, got {}.", dist[0]
            );
        }
    }


    #[test]
    fn empty_sample_gives_a_degenerate_root() {
        let x = Feature::numeric("x", Vec::new());
        let class = Feature::nominal("class", &["A", "B"], Vec::new());
        let sample = Sample::new(vec![x], class).unwrap();

        let f = build(&sample, &TreeConfig::default()).unwrap();
        let Node::Leaf(leaf) = f.root() else {
            panic!("expected a leaf, got {:?}.", f.root());
        };
        assert!(leaf.is_degenerate());
        assert_eq!(f.majority_class(), None);

        let result = f.classify(&[1.0]);
        assert!(matches!(result, Err(MiniTreeError::NoTrainingCoverage)));
        assert!(f.class_distribution(&[1.0]).unwrap().is_empty());
        assert!(f.to_string().contains(": null"));
    }


    #[test]
    fn no_class_schema_is_an_error() {
        let x = Feature::numeric("x", Vec::new());
        let class = Feature::nominal("class", &[] as &[String], Vec::new());
        let sample = Sample::new(vec![x], class).unwrap();

        let result = build(&sample, &TreeConfig::default());
        assert!(matches!(result, Err(MiniTreeError::EmptyTrainingSet)));
    }


    #[test]
    fn absent_branch_is_unroutable() {
        let color = Feature::nominal(
            "color", &["red", "green", "blue"],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0],
        );
        let class = Feature::nominal(
            "class", &["yes", "no"],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0],
        );
        let sample = Sample::new(vec![color], class).unwrap();
        let f = build(&sample, &TreeConfig::default()).unwrap();

        assert_eq!(f.classify(&[0.0]).unwrap(), 0);
        assert_eq!(f.classify(&[1.0]).unwrap(), 1);
        let result = f.classify(&[2.0]);
        match result {
            Err(MiniTreeError::UnroutableInstance { feature, branch }) => {
                assert_eq!(feature, "color");
                assert_eq!(branch, 2);
            },
            other => panic!("expected an unroutable instance, got {other:?}."),
        }
        // An absent slot counts as a leaf and a rule.
        assert_eq!(f.n_leaves(), 3);
        assert_eq!(f.n_rules(), 2);
    }


    #[test]
    fn wrong_instance_width() {
        let f = build(&numeric_five(), &TreeConfig::default()).unwrap();
        let result = f.classify(&[1.0, 2.0]);
        assert!(matches!(
            result,
            Err(MiniTreeError::InstanceWidth { expected: 1, got: 2 })
        ));
    }


    #[test]
    fn missing_values_are_imputed() {
        let sample = numeric_five();
        let config = TreeConfig {
            split_style: SplitStyle::Binary,
            min_leaf_size: 1.0,
            ..TreeConfig::default()
        };
        let f = build(&sample, &config).unwrap();

        let instance = vec![f64::NAN];
        let filled = f.impute(&instance).unwrap();
        assert_eq!(filled, vec![3.0]);
        assert!(instance[0].is_nan(), "impute must not touch the instance.");

        // The mean `3` goes to the left branch.
        assert_eq!(f.classify(&instance).unwrap(), 0);
    }


    #[test]
    fn missing_values_while_growing() {
        let x = Feature::numeric("x", vec![1.0, 2.0, f64::NAN, 8.0, 9.0, 10.0]);
        let class = Feature::nominal(
            "class", &["A", "B"],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, f64::NAN],
        );
        let sample = Sample::new(vec![x], class).unwrap();
        let config = TreeConfig {
            split_style: SplitStyle::Binary,
            min_leaf_size: 0.0,
            ..TreeConfig::default()
        };
        let f = build(&sample, &config).unwrap();

        // The unlabeled row is dropped, so the mean is `(1 + 2 + 8 + 9) / 4`.
        let filled = f.impute(&[f64::NAN]).unwrap();
        assert!(
            (filled[0] - 5.0).abs() < TEST_TOLERANCE,
            "expected 5.0, got {}.", filled[0]
        );
        assert_eq!(f.classify(&[1.5]).unwrap(), 0);
        assert_eq!(f.classify(&[8.5]).unwrap(), 1);
        assert_eq!(f.majority_class(), Some(0));
    }


    #[test]
    fn weather_gain_ratio_multiway() {
        let sample = weather();
        let f = DecisionTreeBuilder::new()
            .criterion(Criterion::GainRatio)
            .split_style(SplitStyle::Multiway)
            .build()
            .unwrap()
            .produce(&sample)
            .unwrap();

        let (m, _) = sample.shape();
        let predictions = f.predict_all(&sample);
        let loss = sample.target()
            .iter()
            .zip(predictions)
            .map(|(t, p)| if *t != p.unwrap() as f64 { 1.0 } else { 0.0 })
            .sum::<f64>() / m as f64;
        assert_eq!(loss, 0.0, "Training Loss: {loss}");

        assert_eq!(f.tree_size(), 8);
        assert_eq!(f.n_leaves(), 5);
        assert_eq!(f.n_rules(), 3);

        let text = f.to_string();
        println!("{text}");
        assert!(text.starts_with("MiniTree"));
        assert!(text.contains("outlook = sunny\n|  humidity = high: no (3)"));
        assert!(text.contains("outlook = overcast: yes (4)"));
        assert!(text.ends_with("Size of the tree: 8\n\nNumber of leaves: 5"));
    }


    #[test]
    fn weather_gini_binary() {
        let sample = weather();
        let f = DecisionTreeBuilder::new()
            .criterion(Criterion::Gini)
            .split_style(SplitStyle::Binary)
            .build()
            .unwrap()
            .produce(&sample)
            .unwrap();

        assert!(f.n_leaves() <= f.tree_size());
        assert_eq!(f.majority_class(), Some(1));
        for result in f.predict_all(&sample) {
            match result {
                Ok(class) => assert!(class < sample.n_class()),
                Err(MiniTreeError::UnroutableInstance { .. }) => {},
                Err(e) => panic!("unexpected error: {e}."),
            }
        }
    }


    #[test]
    fn growing_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1234);
        let n_sample = 200;

        let x = (0..n_sample)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect::<Vec<f64>>();
        let codes = (0..n_sample)
            .map(|_| rng.gen_range(0..4) as f64)
            .collect::<Vec<f64>>();
        let y = x.iter()
            .zip(&codes)
            .map(|(&v, &c)| if v > 0.0 || c == 3.0 { 1.0 } else { 0.0 })
            .collect::<Vec<f64>>();

        let features = vec![
            Feature::numeric("x", x),
            Feature::nominal("c", &["p", "q", "r", "s"], codes),
        ];
        let class = Feature::nominal("y", &["neg", "pos"], y);
        let sample = Sample::new(features, class).unwrap();

        for criterion in [Criterion::GainRatio, Criterion::Gini] {
            for style in [SplitStyle::Binary, SplitStyle::Multiway] {
                let config = TreeConfig {
                    criterion,
                    split_style: style,
                    ..TreeConfig::default()
                };
                let f = build(&sample, &config).unwrap();
                let g = build(&sample, &config).unwrap();
                assert_eq!(f, g, "{criterion}/{style} is not deterministic.");
            }
        }
    }


    #[test]
    fn json_round_trip() {
        let sample = weather();
        let config = TreeConfig {
            split_style: SplitStyle::Binary,
            ..TreeConfig::default()
        };
        let f = build(&sample, &config).unwrap();

        let json = f.to_json().unwrap();
        let g = DecisionTreeClassifier::from_json(&json).unwrap();
        assert_eq!(f, g);

        let mut path = env::temp_dir();
        path.push("minitree_weather_tree.json");
        f.save(&path).unwrap();
        let h = DecisionTreeClassifier::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(f, h);
    }


    #[test]
    fn sample_reader() {
        let mut path = env::current_dir().unwrap();
        path.push("tests/dataset/weather.csv");

        let sample = SampleReader::new()
            .file(path)
            .has_header(true)
            .target_feature("play")
            .read()
            .unwrap();
        assert_eq!(sample.shape(), (14, 4));
        assert_eq!(sample.classes(), &["no".to_string(), "yes".to_string()]);

        let result = SampleReader::<&str, &str>::new()
            .has_header(true)
            .read();
        assert!(matches!(result, Err(MiniTreeError::InvalidConfiguration(_))));
    }
}
