// Property-based tests for name matching and reconciliation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use para_audit::matching::normalize::normalize;
use para_audit::{Category, ItemKind, NameMatcher, ReconciliationEngine, Record, Source};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn config_64() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// One word: plain, accented, abbreviated or a stop word.
fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r"[A-Za-z]{1,9}",
        1 => r"[a-zéèüñçø0-9]{1,6}",
        1 => prop::sample::select(vec!["Mgmt", "dev", "HR", "QA", "ops", "fin"])
            .prop_map(str::to_string),
        1 => prop::sample::select(vec!["the", "of", "Project", "area"]).prop_map(str::to_string),
    ]
}

/// A label as a tool would show it: words, punctuation, maybe a leading marker.
fn arb_label() -> impl Strategy<Value = String> {
    (
        prop::option::of(prop::sample::select(vec!["🌐 ", "📁", "✅ ", "🏠 "])),
        prop::collection::vec(arb_word(), 1..5),
        prop::sample::select(vec![" ", " - ", "_", " & ", "/"]),
    )
        .prop_map(|(marker, words, sep)| {
            format!("{}{}", marker.unwrap_or_default(), words.join(sep))
        })
}

/// Any text at all, including labels that normalize to nothing.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => arb_label(),
        1 => r"[ \-_.!?🌐✅]{0,6}",
    ]
}

fn arb_record(pool: Vec<String>) -> impl Strategy<Value = Record> {
    (
        prop::sample::select(pool),
        prop::sample::select(Source::ALL.to_vec()),
        prop::sample::select(ItemKind::ALL.to_vec()),
        any::<bool>(),
        prop::sample::select(Category::ALL.to_vec()),
    )
        .prop_map(|(name, source, kind, active, category)| {
            Record::new(name, kind, active, category, source).unwrap()
        })
}

/// Records drawn from a small shared label pool so clusters form.
fn arb_records(max: usize) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_label(), 1..6)
        .prop_flat_map(move |pool| prop::collection::vec(arb_record(pool), 0..max))
}

fn record_key(record: &Record) -> (String, Source, ItemKind, bool) {
    (
        record.display_name().to_string(),
        record.source(),
        record.kind(),
        record.is_active(),
    )
}

// ---------------------------------------------------------------------------
// Name matching
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn similarity_is_bounded(a in arb_text(), b in arb_text()) {
        let score = NameMatcher::default().similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score), "score {} for {:?} / {:?}", score, a, b);
    }

    #[test]
    fn similarity_is_symmetric(a in arb_text(), b in arb_text()) {
        let matcher = NameMatcher::default();
        prop_assert_eq!(matcher.similarity(&a, &b), matcher.similarity(&b, &a));
    }

    #[test]
    fn label_matches_itself(a in arb_label()) {
        prop_assume!(!normalize(&a).is_empty());
        let score = NameMatcher::default().similarity(&a, &a);
        prop_assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_is_idempotent(a in arb_text()) {
        let once = normalize(&a);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn breakdown_never_exceeds_similarity(a in arb_label(), b in arb_label()) {
        let matcher = NameMatcher::default();
        let similarity = matcher.similarity(&a, &b);
        for entry in matcher.similarity_breakdown(&a, &b) {
            prop_assert!(entry.score <= similarity + 1e-12, "{} above combined", entry.metric);
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_64())]
    #[test]
    fn clusters_cover_input_exactly(records in arb_records(24)) {
        let result = ReconciliationEngine::new().compare(&records);

        let mut input: Vec<_> = records.iter().map(record_key).collect();
        let mut clustered: Vec<_> = result.clusters.iter().flatten().map(record_key).collect();
        input.sort();
        clustered.sort();
        prop_assert_eq!(input, clustered);
        prop_assert_eq!(result.total_items, records.len());
    }

    #[test]
    fn orphans_are_the_singleton_clusters(records in arb_records(24)) {
        let result = ReconciliationEngine::new().compare(&records);

        let singletons: Vec<_> = result
            .clusters
            .iter()
            .filter(|c| c.len() == 1)
            .map(|c| record_key(&c[0]))
            .collect();
        let orphans: Vec<_> = result.orphans.iter().map(record_key).collect();
        prop_assert_eq!(singletons, orphans);
        prop_assert!(result.clusters.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn consistency_score_is_bounded(records in arb_records(24)) {
        let result = ReconciliationEngine::new().compare(&records);
        let score = result.consistency_score();
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert!(result.consistent_items <= result.total_items);

        let all_clean = result.orphans.is_empty() && result.inconsistencies.is_empty();
        prop_assert_eq!((score - 1.0).abs() < f64::EPSILON, all_clean);
    }

    #[test]
    fn task_manager_category_wins_in_its_cluster(records in arb_records(24)) {
        let result = ReconciliationEngine::new().compare(&records);
        for cluster in &result.clusters {
            if let Some(task) = cluster.iter().find(|r| r.source() == Source::TaskManager) {
                let authority = task.category();
                prop_assert!(cluster
                    .iter()
                    .filter(|r| r.source() != Source::TaskManager)
                    .all(|r| r.category() == authority));
            }
        }
    }
}
