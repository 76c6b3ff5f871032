//! Integration tests for the resolution engine

use chronicle_extractor::{
    read_table, Confidence, EngineConfig, EraContext, OrchestratorRegistry, ParseError, Precision,
    Resolution, ResolutionStatus, RowWarning, TableExtractor,
};

/// Surface engine logs when RUST_LOG is set
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const AUGUSTAN_TABLE: &str = r#"
<table class="wikitable">
  <tbody>
    <tr><th>Year</th><th>Date</th><th>Event</th></tr>
    <tr><th rowspan="3">44&nbsp;BC</th><td>15 March</td><td>Julius Caesar is assassinated.<sup>[1]</sup></td></tr>
    <tr><td>January</td><td>Octavian arrives in Rome.</td></tr>
    <tr><td></td><td>Cicero attacks Antony in the Philippics.</td></tr>
    <tr><td>c. 43 BC</td><td>27 November</td><td>Second Triumvirate formed.</td></tr>
    <tr><td>31 BC</td><td>2 September</td><td>Battle of Actium (30).</td></tr>
    <tr><td>27 BC</td><td>16 January</td><td>Octavian is named Augustus.</td></tr>
    <tr><td>AD 14</td><td>19 August</td><td>Augustus dies.</td></tr>
  </tbody>
</table>
"#;

#[test]
fn test_html_table_extraction() {
    init_tracing();

    let rows = read_table(AUGUSTAN_TABLE, None);
    assert_eq!(rows.len(), 7);

    let extraction = TableExtractor::new().extract(&rows, &EraContext::default());
    let spans: Vec<_> = extraction.spans().collect();
    assert_eq!(spans.len(), 7);

    assert_eq!(spans[0].start_year(), -44);
    assert_eq!(spans[0].precision(), Precision::ExactDate);
    assert_eq!(spans[1].start_month(), Some(1));
    assert_eq!(spans[1].confidence(), Confidence::Inferred);
    assert_eq!(spans[2].precision(), Precision::YearOnly);

    assert!(spans[3].circa());
    assert_eq!(spans[3].precision(), Precision::Approximate);
    assert_eq!(spans[6].start_year(), 14);

    assert_eq!(extraction.summary.resolved, 5);
    assert_eq!(extraction.summary.inherited, 2);
    assert_eq!(extraction.summary.skipped, 0);
}

#[test]
fn test_description_mismatch_is_reported_not_applied() {
    let rows = read_table(AUGUSTAN_TABLE, None);
    let extraction = TableExtractor::new().extract(&rows, &EraContext::default());

    let actium = &extraction.outcomes[4];
    assert_eq!(actium.status, ResolutionStatus::Resolved);
    assert_eq!(actium.span.as_ref().map(|s| s.start_year()), Some(-31));
    assert!(actium.warnings.contains(&RowWarning::DescriptionMismatch {
        column_year: -31,
        description_year: -30,
    }));
}

#[test]
fn test_spans_sort_chronologically() {
    let rows = read_table(AUGUSTAN_TABLE, None);
    let extraction = TableExtractor::new().extract(&rows, &EraContext::default());

    let mut spans: Vec<_> = extraction.spans().cloned().collect();
    spans.sort();
    let years: Vec<i32> = spans.iter().map(|s| s.start_year()).collect();
    assert_eq!(years, vec![-44, -44, -44, -43, -31, -27, 14]);
    assert_eq!(spans[0].start_month(), None);
}

#[test]
fn test_registry_from_toml() {
    init_tracing();

    let config = EngineConfig::from_toml(
        r#"
        reference_year = 2000
        apply_qualifiers = false

        [[orchestrators]]
        id = "ancient"
        strategies = ["years_ago", "century", "year"]
        fallback = "section_range"
        "#,
    )
    .unwrap();
    let registry = OrchestratorRegistry::from_config(&config);
    assert_eq!(registry.ids(), vec!["ancient"]);

    let era = EraContext::bc().with_section_range(-753, -509);

    let span = registry.parse("3,000 years ago", &era, "ancient").unwrap().unwrap();
    assert_eq!(span.start_year(), -1001);

    let span = registry.parse("753 – traditionally founded", &era, "ancient").unwrap().unwrap();
    assert_eq!(span.start_year(), -753);
    assert_eq!(span.confidence(), Confidence::Explicit);

    match registry.resolve("The kings rule Rome", &era, "ancient").unwrap() {
        Resolution::Fallback(span) => {
            assert_eq!((span.start_year(), span.end_year()), (-753, -509));
            assert_eq!(span.confidence(), Confidence::Fallback);
        }
        other => panic!("expected fallback, got {:?}", other),
    }

    assert!(matches!(
        registry.parse("509 BC", &era, "bullet_list"),
        Err(ParseError::UnknownOrchestrator(_))
    ));
}

#[test]
fn test_inline_batch_summary() {
    let registry = OrchestratorRegistry::with_defaults();
    let orchestrator = registry.get("inline_mentions").unwrap();
    let era = EraContext::default().with_section_range(1900, 1999);

    let texts = [
        "On 15 March 1945 the offensive stalls",
        "March 1945",
        "1914–1918",
        "the war ends",
        "5th century BC",
    ];
    let (resolutions, summary) = orchestrator.resolve_all(texts, &era);

    assert_eq!(resolutions[0].span().map(|s| s.start_day()), Some(Some(15)));
    assert_eq!(summary.resolved, 3);
    assert_eq!(summary.fallback, 0);
    assert_eq!(summary.skipped, 2);
    assert!(summary.summary().contains("Skipped: 2"));
}

#[test]
fn test_concurrent_resolution() {
    let registry = std::sync::Arc::new(OrchestratorRegistry::with_defaults());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                registry
                    .parse("2500–1500 BCE", &EraContext::default(), "bullet_list")
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(results[0].as_ref().map(|s| s.start_year()), Some(-2500));
}
