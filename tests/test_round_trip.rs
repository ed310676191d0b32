#[cfg(test)]
mod test_round_trip {
    use bayesgen::bayesnet::format::bif::{parse, parse_with, ParseOptions};
    use bayesgen::bayesnet::format::tabular::{load_tabular, read_tabular, serialize};
    use bayesgen::bayesnet::generator::{generate, MorphologyParams};
    use bayesgen::bayesnet::model::Network;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Write;

    const CANCER: &str = "\
network unknown {
}
variable Pollution {
  type discrete [ 2 ] { low, high };
}
variable Smoker {
  type discrete [ 2 ] { True, False };
}
variable Cancer {
  type discrete [ 2 ] { True, False };
}
variable Xray {
  type discrete [ 2 ] { positive, negative };
}
probability ( Pollution ) {
  table 0.9, 0.1;
}
probability ( Smoker ) {
  table 0.3, 0.7;
}
probability ( Cancer | Pollution, Smoker ) {
  (low, True) 0.03, 0.97;
  (high, False) 0.02, 0.98;  # out of order on purpose
  (high, True) 0.05, 0.95;
  (low, False) 0.001, 0.999;
}
probability ( Xray | Cancer ) {
  (True) 0.9, 0.1;
  (False) 0.2, 0.8;
}
";

    const CANCER_TABULAR: &str = "\
4
Pollution low high
Smoker True False
Cancer True False
Xray positive negative
4

Pollution
0.9 0.1

Smoker
0.3 0.7

Cancer Pollution Smoker
0.03 0.97
0.001 0.999
0.05 0.95
0.02 0.98

Xray Cancer
0.9 0.1
0.2 0.8";

    fn assert_same_values(left: &Network, right: &Network) {
        assert_eq!(left.variables(), right.variables());
        assert_eq!(left.table_count(), right.table_count());
        for table in left.tables() {
            let other = right.table(&table.child).expect("table present on both sides");
            assert_eq!(table.parents, other.parents);
            for assignment in left.assignments(table).expect("declared parents") {
                assert_eq!(table.row(&assignment), other.row(&assignment));
            }
        }
    }

    #[test]
    fn test_bif_to_tabular_orders_rows_canonically() {
        let outcome = parse_with(CANCER, &ParseOptions::strict()).expect("well formed");
        assert_eq!(serialize(&outcome.network).expect("serialize"), CANCER_TABULAR);
    }

    #[test]
    fn test_tabular_reads_back_parsed_network() {
        let network = parse(CANCER).network;
        let text = serialize(&network).expect("serialize");
        let reread = read_tabular(&text).expect("read back");
        assert_same_values(&network, &reread);
        assert_eq!(serialize(&reread).expect("serialize"), text);
    }

    #[test]
    fn test_generated_network_round_trips_through_file() {
        let mut rng = StdRng::seed_from_u64(17);
        let params = MorphologyParams {
            extra_edge_prob: 0.5,
            ..MorphologyParams::default()
        };
        let network = generate("random_dag", 6, 3, &params, &mut rng).expect("generate");
        let text = serialize(&network).expect("serialize");

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(text.as_bytes()).expect("write");
        let reread = load_tabular(file.path()).expect("load");

        assert_eq!(network.variables(), reread.variables());
        for table in network.tables() {
            let other = reread.table(&table.child).expect("table present");
            assert_eq!(table.parents, other.parents);
            for assignment in network.assignments(table).expect("declared parents") {
                let written = table.row(&assignment).expect("row");
                let read = other.row(&assignment).expect("row");
                // Synthetic tables are written with four decimals.
                for (w, r) in written.iter().zip(read) {
                    assert!((w - r).abs() <= 5e-5, "{} vs {}", w, r);
                }
            }
        }
    }

    #[test]
    fn test_partial_bif_still_serializes() {
        let text = "variable A {\n  type discrete [ 2 ] { a1, a2 };\n}\nvariable B {\n  type discrete [ 2 ] { b1, b2 };\n}\nprobability ( B | A ) {\n  (a2) 0.5, 0.5;\n}\n";
        let network = parse(text).network;
        assert_eq!(network.validate().len(), 2);
        assert_eq!(
            serialize(&network).expect("serialize"),
            "2\nA a1 a2\nB b1 b2\n1\n\nB A\n\n0.5 0.5"
        );
    }

    #[test]
    fn test_missing_rows_at_end_of_file_read_back() {
        let conditional = "variable A {\n  type discrete [ 2 ] { a1, a2 };\n}\nvariable B {\n  type discrete [ 2 ] { b1, b2 };\n}\nprobability ( A ) {\n  table 0.5, 0.5;\n}\nprobability ( B | A ) {\n  (a1) 0.5, 0.5;\n}\n";
        let unconditional = "variable A {\n  type discrete [ 2 ] { a1, a2 };\n}\nprobability ( A ) { }\n";
        for bif in [conditional, unconditional] {
            let network = parse(bif).network;
            let text = serialize(&network).expect("serialize");
            assert!(text.ends_with('\n'), "last row should be missing: {:?}", text);
            let reread = read_tabular(&text).unwrap_or_else(|e| panic!("{:?}: {}", text, e));
            assert_same_values(&network, &reread);
            assert_eq!(serialize(&reread).expect("serialize"), text);
        }
    }
}
