//! Cross-module tests: documented scenarios and resolution properties

#[cfg(test)]
mod tests {
    use crate::{parse, parse_table_row, OrchestratorRegistry, TableCell, TableExtractor, TableRow};
    use chronicle_domain::{Confidence, Era, EraContext, Precision, RowspanContext};
    use proptest::prelude::*;

    const ORCHESTRATORS: [&str; 5] = [
        "bullet_list",
        "century_dominant",
        "prehistory",
        "modern_events",
        "inline_mentions",
    ];

    #[test]
    fn test_scenario_bc_year() {
        let span = parse("509 BC", &EraContext::default(), "bullet_list").unwrap().unwrap();
        assert_eq!((span.start_year(), span.end_year()), (-509, -509));
        assert_eq!(span.precision(), Precision::YearOnly);
        assert_eq!(span.confidence(), Confidence::Explicit);
        assert!(!span.notes().is_empty());
    }

    #[test]
    fn test_modern_events_plain_year() {
        let span = parse("1945", &EraContext::default(), "modern_events").unwrap().unwrap();
        assert_eq!((span.start_year(), span.end_year()), (1945, 1945));
        assert_eq!(span.precision(), Precision::YearOnly);
        assert_eq!(span.confidence(), Confidence::Explicit);

        let doubtful = parse("1066?", &EraContext::default(), "modern_events").unwrap().unwrap();
        assert_eq!(doubtful.start_year(), 1066);
        assert_eq!(doubtful.precision(), Precision::Uncertain);
    }

    #[test]
    fn test_bullet_list_passes_certain_years_through_uncertain() {
        let span = parse("1066 – Battle of Hastings", &EraContext::default(), "bullet_list")
            .unwrap()
            .unwrap();
        assert_eq!(span.start_year(), 1066);
        assert_eq!(span.precision(), Precision::YearOnly);

        let range = parse("1939–45", &EraContext::default(), "bullet_list").unwrap().unwrap();
        assert_eq!((range.start_year(), range.end_year()), (1939, 1945));
    }

    #[test]
    fn test_scenario_trailing_era_range() {
        let span = parse("2500–1500 BCE", &EraContext::default(), "bullet_list").unwrap().unwrap();
        assert_eq!((span.start_year(), span.end_year()), (-2500, -1500));
    }

    #[test]
    fn test_scenario_century() {
        let span = parse("5th century BCE", &EraContext::default(), "century_dominant").unwrap().unwrap();
        assert_eq!((span.start_year(), span.end_year()), (-500, -401));
        assert_eq!(span.precision(), Precision::Century);
    }

    #[test]
    fn test_scenario_years_ago() {
        let span = parse("250,000 years ago", &EraContext::default(), "prehistory").unwrap().unwrap();
        assert_eq!((span.start_year(), span.end_year()), (-248_000, -248_000));
        assert!(span.circa());
        assert_eq!(span.precision(), Precision::YearsAgo);
    }

    #[test]
    fn test_scenario_rowspan_table() {
        let rows = vec![
            TableRow::new(
                Some(TableCell::new("44 BC").with_rowspan(3)),
                Some(TableCell::new("15 March")),
                "Assassination of Julius Caesar",
            ),
            TableRow::new(None, Some(TableCell::new("January")), "Octavian reaches Rome"),
            TableRow::new(None, Some(TableCell::new("")), "Second Triumvirate"),
        ];
        let extraction = TableExtractor::new().extract(&rows, &EraContext::default());

        let exact = extraction.outcomes[0].span.as_ref().unwrap();
        assert_eq!((exact.start_year(), exact.end_year()), (-44, -44));
        assert_eq!((exact.start_month(), exact.start_day()), (Some(3), Some(15)));
        assert_eq!(exact.precision(), Precision::ExactDate);
        assert_eq!(exact.confidence(), Confidence::Explicit);

        let month = extraction.outcomes[1].span.as_ref().unwrap();
        assert_eq!((month.start_year(), month.end_year()), (-44, -44));
        assert_eq!(month.start_month(), Some(1));
        assert_eq!(month.precision(), Precision::MonthOnly);
        assert_eq!(month.confidence(), Confidence::Inferred);

        assert_eq!(extraction.summary.resolved, 1);
        assert_eq!(extraction.summary.inherited, 2);
    }

    #[test]
    fn test_scenario_before_century() {
        let span = parse("Before 17th century", &EraContext::default(), "century_dominant")
            .unwrap()
            .unwrap();
        assert_eq!((span.start_year(), span.end_year()), (1567, 1600));
        assert_eq!(span.precision(), Precision::CenturyModifier);
    }

    #[test]
    fn test_bullet_list_grammar_mix() {
        let era = EraContext::default();
        let cases = [
            ("1990s", (1990, 1999), Precision::Decade),
            ("c. 1200 BC", (-1200, -1200), Precision::Approximate),
            ("~1500", (1500, 1500), Precision::Approximate),
            ("Late 16th century – 17th century", (1567, 1700), Precision::CenturyModifier),
            ("5th–3rd centuries BCE", (-500, -201), Precision::CenturyRange),
            ("1066?", (1066, 1066), Precision::Uncertain),
            ("15 March 44 BC", (-44, -44), Precision::ExactDate),
            ("March 1945", (1945, 1945), Precision::MonthOnly),
            ("5–2 million years ago", (-4_998_000, -1_998_000), Precision::YearsAgo),
            ("In 1066, William invades England", (1066, 1066), Precision::YearOnly),
        ];
        for (text, (start, end), precision) in cases {
            let span = parse(text, &era, "bullet_list").unwrap().unwrap();
            assert_eq!((span.start_year(), span.end_year()), (start, end), "{}", text);
            assert_eq!(span.precision(), precision, "{}", text);
        }
    }

    #[test]
    fn test_unknown_orchestrator() {
        assert!(parse("509 BC", &EraContext::default(), "astrology").is_err());
    }

    fn era_strategy() -> impl Strategy<Value = Era> {
        prop_oneof![Just(Era::Bc), Just(Era::Ad)]
    }

    proptest! {
        /// Property: "{year} {era}" round-trips to a point span with the era's sign
        #[test]
        fn test_year_era_round_trip(year in 1u32..=9999, era in era_strategy()) {
            let text = format!("{} {}", year, era.as_str());
            let span = parse(&text, &EraContext::default(), "bullet_list").unwrap().unwrap();
            prop_assert_eq!(span.start_year(), span.end_year());
            prop_assert_eq!(span.start_year().unsigned_abs(), year);
            prop_assert_eq!(Era::of(span.start_year()), Some(era));
        }

        /// Property: no orchestrator emits year zero or an inverted span
        #[test]
        fn test_no_zero_years(text in "\\PC{0,40}") {
            let registry = OrchestratorRegistry::with_defaults();
            let era = EraContext::default().with_section_range(-100, 100);
            for id in ORCHESTRATORS {
                if let Some(span) = registry.parse(&text, &era, id).unwrap() {
                    prop_assert!(span.start_year() != 0 && span.end_year() != 0);
                    prop_assert!(span.start_year() <= span.end_year());
                    prop_assert!(!span.notes().is_empty());
                }
            }
        }

        /// Property: no emitted span is zero even for digit-heavy input
        #[test]
        fn test_no_zero_years_numeric(text in "[0-9 ,.~?–-]{1,6}( (BC|AD|BCE|CE|years ago|s|th century))?") {
            for id in ORCHESTRATORS {
                if let Some(span) = parse(&text, &EraContext::default(), id).unwrap() {
                    prop_assert!(span.start_year() != 0 && span.end_year() != 0);
                    prop_assert!(span.start_year() <= span.end_year());
                }
            }
        }

        /// Property: a parsed century has exactly 100 years
        #[test]
        fn test_parsed_century_has_one_hundred_years(n in 1u32..=99, era in era_strategy()) {
            let text = format!("{}th century {}", n, era.as_str());
            let span = parse(&text, &EraContext::default(), "century_dominant").unwrap().unwrap();
            prop_assert_eq!(span.precision(), Precision::Century);
            prop_assert_eq!(span.year_count(), 100);
        }

        /// Property: early, mid and late parse to a partition of the century
        #[test]
        fn test_parsed_thirds_partition(n in 1u32..=99, era in era_strategy()) {
            let era_ctx = EraContext::default();
            let century = parse(&format!("{}th century {}", n, era.as_str()), &era_ctx, "century_dominant")
                .unwrap()
                .unwrap();
            let thirds: Vec<_> = ["Early", "Mid", "Late"]
                .iter()
                .map(|m| {
                    parse(&format!("{} {}th century {}", m, n, era.as_str()), &era_ctx, "century_dominant")
                        .unwrap()
                        .unwrap()
                })
                .collect();

            prop_assert_eq!(thirds[0].start_year(), century.start_year());
            prop_assert_eq!(thirds[2].end_year(), century.end_year());
            prop_assert_eq!(thirds[0].end_year() + 1, thirds[1].start_year());
            prop_assert_eq!(thirds[1].end_year() + 1, thirds[2].start_year());
            let total: u64 = thirds.iter().map(|s| s.year_count()).sum();
            prop_assert_eq!(total, 100);
        }

        /// Property: rowspan N yields N-1 inherited rows, then nothing
        #[test]
        fn test_rowspan_inherits_exactly(n in 2u32..=20, year in 1u32..=2000, era in era_strategy()) {
            let era_ctx = EraContext::default();
            let mut ctx = RowspanContext::new();
            let cell = format!("{} {}", year, era.as_str());
            let signed = era.apply(year).unwrap();

            let first = parse_table_row(&cell, None, Some(n), &mut ctx, &era_ctx).unwrap();
            prop_assert_eq!(first.confidence(), Confidence::Explicit);

            for _ in 1..n {
                let span = parse_table_row("", Some("March"), None, &mut ctx, &era_ctx).unwrap();
                prop_assert_eq!(span.start_year(), signed);
                prop_assert_eq!(span.confidence(), Confidence::Inferred);
            }
            prop_assert_eq!(ctx.remaining_rows(), 0);
            prop_assert!(parse_table_row("", Some("March"), None, &mut ctx, &era_ctx).is_none());
        }

        /// Property: resolution is idempotent
        #[test]
        fn test_parse_is_idempotent(text in "\\PC{0,40}") {
            let era = EraContext::bc().with_section_range(-500, -401);
            for id in ORCHESTRATORS {
                let first = parse(&text, &era, id).unwrap();
                let second = parse(&text, &era, id).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_idempotent_on_known_grammars() {
        let era = EraContext::default();
        for text in ["509 BC", "2500–1500 BCE", "Before 17th century", "250,000 years ago", "1990s"] {
            assert_eq!(
                parse(text, &era, "bullet_list").unwrap(),
                parse(text, &era, "bullet_list").unwrap()
            );
        }
    }
}
