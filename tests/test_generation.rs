#[cfg(test)]
mod test_generation {
    use bayesgen::bayesnet::common::setup::GeneratorConfig;
    use bayesgen::bayesnet::enumerate::assignment_count;
    use bayesgen::bayesnet::generator::factory::MORPHOLOGIES;
    use bayesgen::bayesnet::generator::topology::suffix;
    use bayesgen::bayesnet::generator::{generate, generate_from_config, MorphologyParams};
    use bayesgen::bayesnet::model::Network;
    use bayesgen::NetworkError;
    use rand::{rngs::StdRng, SeedableRng};

    fn generated(morphology: &str, num_vars: usize, arity: usize, seed: u64) -> Network {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(morphology, num_vars, arity, &MorphologyParams::default(), &mut rng)
            .unwrap_or_else(|e| panic!("{} with {} variables: {}", morphology, num_vars, e))
    }

    #[test]
    fn test_parents_always_numbered_below_children() {
        for morphology in MORPHOLOGIES {
            for num_vars in 1..=12 {
                for seed in 0..4 {
                    let network = generated(morphology, num_vars, 2, seed);
                    for table in network.tables() {
                        let child = suffix(&table.child).expect("placeholder name");
                        for parent in &table.parents {
                            let parent = suffix(parent).expect("placeholder name");
                            assert!(
                                parent < child,
                                "{}: X{} is a parent of X{}",
                                morphology,
                                parent,
                                child
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_row_counts_and_simplex() {
        for morphology in MORPHOLOGIES {
            let network = generated(morphology, 9, 3, 5);
            assert_eq!(network.variable_count(), 9);
            assert_eq!(network.table_count(), 9);
            for table in network.tables() {
                let domains = network.parent_domains(table).expect("declared parents");
                let expected = if table.is_unconditional() {
                    1
                } else {
                    assignment_count(&domains)
                };
                assert_eq!(table.stored_rows(), expected, "{} in {}", table.child, morphology);
                for assignment in network.assignments(table).expect("declared parents") {
                    let row = table.row(&assignment).expect("every assignment has a row");
                    assert_eq!(row.len(), 3);
                    assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
                }
            }
            assert!(network.validate().is_empty());
        }
    }

    #[test]
    fn test_every_non_root_has_a_parent() {
        for morphology in MORPHOLOGIES {
            let network = generated(morphology, 10, 2, 8);
            let roots = network
                .tables()
                .iter()
                .filter(|t| t.is_unconditional())
                .count();
            match morphology {
                // A single source: X1.
                "chain" | "full_tree" | "random_dag" => assert_eq!(roots, 1, "{}", morphology),
                // Every leaf of the laid-out tree becomes a source.
                _ => assert!(roots >= 1),
            }
        }
    }

    #[test]
    fn test_chain_network_names_and_parents() {
        let network = generated("chain", 4, 2, 0);
        let names: Vec<&str> = network.variables().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["X1", "X2", "X3", "X4"]);
        assert!(network.table("X1").map(|t| t.parents.is_empty()).unwrap_or(false));
        assert_eq!(network.table("X3").map(|t| t.parents.clone()), Some(vec!["X2".to_string()]));
    }

    #[test]
    fn test_seeded_config_is_reproducible() {
        let config = GeneratorConfig {
            morphology: "random_dag".to_string(),
            num_vars: 7,
            seed: Some(2024),
            ..GeneratorConfig::default()
        };
        let first = generate_from_config(&config, &mut config.rng()).expect("generate");
        let second = generate_from_config(&config, &mut config.rng()).expect("generate");
        assert_eq!(first.tables(), second.tables());
    }

    #[test]
    fn test_generation_failures_are_reported() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = MorphologyParams::default();
        assert!(matches!(
            generate("hexagon", 4, 2, &params, &mut rng),
            Err(NetworkError::UnknownMorphology(_))
        ));
        assert!(matches!(
            generate("chain", 0, 2, &params, &mut rng),
            Err(NetworkError::InvalidParameter(_))
        ));
        assert!(matches!(
            generate("chain", 3, 0, &params, &mut rng),
            Err(NetworkError::InvalidParameter(_))
        ));
    }
}
