// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::types::ReleaseType;
use chrono::NaiveDate;
use proptest::prelude::*;

fn render(pattern: &str, record: &Metadata) -> Result<String, TemplateError> {
    Template::compile(pattern)?.render(record)
}

fn artists(names: &[&str]) -> Metadata {
    Metadata::new(names.iter().copied(), "Title")
}

fn uncaged_unity() -> Metadata {
    Metadata::new(["Rogue", "Stonebank", "Slips & Slurs"], "Unity")
        .with_album("Monstercat Uncaged Vol. 1")
        .with_track(1)
        .with_release_type(ReleaseType::Collection)
}

// ---------------------------------------------------------------------------
// compile
// ---------------------------------------------------------------------------

#[test]
fn test_compile_splits_literals_and_fields() {
    let template = Template::compile("{artists|, } - {title}.mp3").unwrap();

    assert_eq!(
        template.segments(),
        [
            Segment::Field {
                name: "artists".into(),
                modifier: Some(", ".into()),
            },
            Segment::Literal(" - ".into()),
            Segment::Field {
                name: "title".into(),
                modifier: None,
            },
            Segment::Literal(".mp3".into()),
        ]
    );
}

#[test]
fn test_compile_pure_literal_is_single_segment() {
    let template = Template::compile("just text } with a brace").unwrap();
    assert_eq!(
        template.segments(),
        [Segment::Literal("just text } with a brace".into())]
    );
}

#[test]
fn test_compile_empty_pattern_has_no_segments() {
    assert!(Template::compile("").unwrap().segments().is_empty());
}

#[test]
fn test_compile_adjacent_fields() {
    let template = Template::compile("{track}{title}").unwrap();
    assert_eq!(template.segments().len(), 2);
}

#[test]
fn test_compile_modifier_splits_on_first_pipe_only() {
    let template = Template::compile("{artists| | }").unwrap();
    assert_eq!(
        template.segments(),
        [Segment::Field {
            name: "artists".into(),
            modifier: Some(" | ".into()),
        }]
    );
}

#[test]
fn test_compile_unterminated_at_end() {
    assert_eq!(
        Template::compile("{unterminated"),
        Err(TemplateError::UnterminatedField { position: 0 })
    );
    assert_eq!(
        Template::compile("abc {title"),
        Err(TemplateError::UnterminatedField { position: 4 })
    );
}

#[test]
fn test_compile_unterminated_before_next_brace() {
    assert_eq!(
        Template::compile("{title {album}"),
        Err(TemplateError::UnterminatedField { position: 0 })
    );
}

#[test]
fn test_compile_positions_count_characters() {
    assert_eq!(
        Template::compile("Tiësto {"),
        Err(TemplateError::UnterminatedField { position: 7 })
    );
}

#[test]
fn test_compile_empty_name() {
    assert_eq!(
        Template::compile("a{}"),
        Err(TemplateError::EmptyFieldName { position: 1 })
    );
    assert_eq!(
        Template::compile("{|x}"),
        Err(TemplateError::EmptyFieldName { position: 0 })
    );
}

#[test]
fn test_compile_rejects_modifiers_invalid_for_kind() {
    for pattern in ["{title|}", "{track|}", "{track|abc}", "{track|99}", "{releaseDate|}"] {
        let err = Template::compile(pattern).unwrap_err();
        assert!(
            matches!(err, TemplateError::InvalidModifier { .. }),
            "{pattern}: {err:?}"
        );
        assert!(err.is_syntax_error());
    }
}

#[test]
fn test_compile_rejects_time_format_on_date() {
    let err = Template::compile("{releaseDate|%H:%M} {title}").unwrap_err();
    assert!(matches!(
        err,
        TemplateError::InvalidModifier { ref field, ref modifier, .. }
            if field == "releaseDate" && modifier == "%H:%M"
    ));

    let outcome = validate("{releaseDate|%H:%M}", &Metadata::sample());
    assert_eq!(outcome.preview(), None);
    assert_eq!(outcome.error().map(|e| e.code.as_str()), Some("syntax_error"));
}

#[test]
fn test_compile_accepts_empty_list_modifier() {
    assert!(Template::compile("{artists|}").is_ok());
}

#[test]
fn test_compile_defers_unknown_fields() {
    // no kind known, so any modifier is accepted until render
    let template = Template::compile("{nope|}").unwrap();
    assert_eq!(template.field_names().collect::<Vec<_>>(), ["nope"]);
}

#[test]
fn test_compile_is_deterministic() {
    let pattern = "{artistsTitle} - {album} - {track|2} {title}";
    assert_eq!(
        Template::compile(pattern).unwrap(),
        Template::compile(pattern).unwrap()
    );
}

#[test]
fn test_display_round_trips_source() {
    let pattern = "{artists|natural} - {track|2} {title} [{catalogId}]";
    let template: Template = pattern.parse().unwrap();
    assert_eq!(template.to_string(), pattern);
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn test_render_natural_join() {
    assert_eq!(
        render("{artists|natural}", &artists(&["A", "B", "C"])).unwrap(),
        "A, B & C"
    );
    assert_eq!(render("{artists|natural}", &artists(&["A"])).unwrap(), "A");
}

#[test]
fn test_render_natural_join_of_empty_list_is_empty() {
    let record = artists(&[]);
    assert_eq!(
        Template::compile("{artists|natural}")
            .unwrap()
            .expand(&record)
            .unwrap(),
        ""
    );
}

#[test]
fn test_render_literal_separator() {
    assert_eq!(render("{artists|, }", &artists(&["A", "B"])).unwrap(), "A, B");
    assert_eq!(render("{artists| x }", &artists(&["A", "B"])).unwrap(), "A x B");
}

#[test]
fn test_render_default_list_separator() {
    assert_eq!(
        render("{artists}", &artists(&["A", "B", "C"])).unwrap(),
        "A, B, C"
    );
}

#[test]
fn test_render_track_padding() {
    let record = Metadata::new(["A"], "T").with_track(7);
    assert_eq!(render("{track}", &record).unwrap(), "7");
    assert_eq!(render("{track|2}", &record).unwrap(), "07");
    assert_eq!(render("{track|3} {title}", &record).unwrap(), "007 T");
}

#[test]
fn test_render_absent_track_is_empty() {
    let record = Metadata::new(["A"], "T");
    assert_eq!(render("{track|2} {title}", &record).unwrap(), "T");
}

#[test]
fn test_render_release_date() {
    let record = Metadata::new(["A"], "T")
        .with_release_date(NaiveDate::from_ymd_opt(2017, 4, 7).unwrap());
    assert_eq!(render("{releaseDate}", &record).unwrap(), "2017-04-07");
    assert_eq!(render("{releaseDate|%Y} {title}", &record).unwrap(), "2017 T");
}

#[test]
fn test_render_release_type_and_catalog_id() {
    let record = uncaged_unity().with_catalog_id("MCUV-1");
    assert_eq!(
        render("[{catalogId}] {releaseType}", &record).unwrap(),
        "[MCUV-1] Collection"
    );
}

#[test]
fn test_render_unknown_field() {
    assert_eq!(
        render("{nope}", &uncaged_unity()),
        Err(TemplateError::UnknownField {
            name: "nope".into()
        })
    );
}

#[test]
fn test_render_reports_first_unknown_field() {
    assert_eq!(
        render("{title} {first} {second}", &uncaged_unity()),
        Err(TemplateError::UnknownField {
            name: "first".into()
        })
    );
}

#[test]
fn test_render_field_names_are_case_sensitive() {
    assert!(render("{Title}", &uncaged_unity()).is_err());
}

#[test]
fn test_render_sanitizes_whole_output() {
    let record = Metadata::new(["AC/DC"], "What?");
    assert_eq!(
        render("{artist}: {title}", &record).unwrap(),
        "AC_DC_ What_"
    );
    // literal parts are sanitized too
    assert_eq!(render("a/b", &record).unwrap(), "a_b");
}

#[test]
fn test_render_never_ends_in_a_dot() {
    let record = Metadata::new(["A"], "Hits.");
    assert_eq!(render("{title} .", &record).unwrap(), "Hits");
    assert_eq!(render("{title}. . ", &record).unwrap(), "Hits");
}

#[test]
fn test_render_empty_result_uses_fallback() {
    let record = Metadata::new(Vec::<String>::new(), "");
    assert_eq!(render("{album}", &record).unwrap(), "Untitled");
    assert_eq!(render("", &record).unwrap(), "Untitled");
}

#[test]
fn test_render_with_custom_policy() {
    let policy = SanitizePolicy {
        replacement: "-".into(),
        ..Default::default()
    };
    let record = Metadata::new(["AC/DC"], "T");
    let template = Template::compile("{artist}").unwrap();

    assert_eq!(template.render_with(&record, &policy).unwrap(), "AC-DC");
    assert_eq!(template.expand(&record).unwrap(), "AC/DC");
}

#[test]
fn test_render_end_to_end_fixture() {
    let template = Template::compile("{artistsTitle} - {album} - {track} {title}").unwrap();
    let record = uncaged_unity();

    let first = template.render(&record).unwrap();
    assert_eq!(
        first,
        "Rogue, Stonebank & Slips & Slurs - Unity - Monstercat Uncaged Vol. 1 - 1 Unity"
    );
    assert_eq!(template.render(&record).unwrap(), first);
}

#[test]
fn test_render_title_parts() {
    let record = Metadata::new(["Julian Calor"], "Monster (feat. Trove) [VIP Mix]");
    assert_eq!(
        render("{artist} feat. {feat} - {titleRaw} ({remix})", &record).unwrap(),
        "Julian Calor feat. Trove - Monster (VIP Mix)"
    );
}

#[test]
fn test_template_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Template>();
    assert_send_sync::<Metadata>();
}

#[test]
fn test_concurrent_renders_agree() {
    let template = std::sync::Arc::new(Template::compile("{artists|natural} - {title}").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let template = template.clone();
            std::thread::spawn(move || {
                let record = Metadata::new(["A", "B"], format!("T{i}"));
                template.render(&record).unwrap()
            })
        })
        .collect();

    let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, ["A & B - T0", "A & B - T1", "A & B - T2", "A & B - T3"]);
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn test_validate_preview() {
    let outcome = validate("{artists|natural} - {title}", &uncaged_unity());
    assert!(outcome.is_valid());
    assert_eq!(outcome.preview(), Some("Rogue, Stonebank & Slips & Slurs - Unity"));
    assert!(outcome.error().is_none());
}

#[test]
fn test_validate_syntax_error() {
    let outcome = validate("{unterminated", &Metadata::sample());
    assert!(!outcome.is_valid());

    let error = outcome.error().unwrap();
    assert_eq!(error.code, "syntax_error");
    assert_eq!(error.details.as_ref().unwrap()["position"], 0);
}

#[test]
fn test_validate_unknown_field() {
    let outcome = validate("{nope}", &Metadata::sample());
    let error = outcome.error().unwrap();

    assert_eq!(error.code, "unknown_field");
    assert_eq!(error.message, "unknown field 'nope'");
    assert_eq!(error.details.as_ref().unwrap()["field"], "nope");
}

#[test]
fn test_validate_serializes_as_preview_or_error() {
    let ok = serde_json::to_value(validate("{title}", &artists(&["A"]))).unwrap();
    assert_eq!(ok, serde_json::json!({ "preview": "Title" }));

    let err = serde_json::to_value(validate("{nope}", &artists(&["A"]))).unwrap();
    assert_eq!(err["error"]["code"], "unknown_field");
    assert!(err.get("preview").is_none());
}

#[test]
fn test_validate_outcome_deserializes() {
    let outcome: ValidationOutcome =
        serde_json::from_str(r#"{"error": {"code": "syntax_error", "message": "m"}}"#).unwrap();
    assert_eq!(outcome.error().unwrap().code, "syntax_error");
}

#[test]
fn test_validate_every_field_against_sample() {
    let sample = Metadata::sample();
    for name in fields::field_names() {
        let outcome = validate(&format!("{{{name}}}"), &sample);
        assert!(outcome.is_valid(), "{name}: {outcome:?}");
    }
}

// ---------------------------------------------------------------------------
// properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_literal_patterns_render_unchanged(
        pattern in "[A-Za-z0-9]([A-Za-z0-9 ,&()-]{0,40}[A-Za-z0-9])?"
    ) {
        let rendered = render(&pattern, &Metadata::sample()).unwrap();
        prop_assert_eq!(rendered, pattern);
    }

    #[test]
    fn prop_compile_and_render_are_idempotent(
        literal in "[a-z -]{0,10}",
        field in prop::sample::select(vec![
            "artists", "artists|natural", "artists| & ", "artistsTitle", "title",
            "album", "track", "track|3", "releaseType", "releaseDate|%Y",
        ]),
        names in prop::collection::vec("[A-Z][a-z]{1,8}", 0..5),
    ) {
        let pattern = format!("{literal}{{{field}}}{literal}");
        let record = Metadata::new(names, "Song").with_track(4);

        let first = Template::compile(&pattern).unwrap();
        let second = Template::compile(&pattern).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.render(&record), second.render(&record));
    }

    #[test]
    fn prop_compile_never_panics(pattern in "\\PC{0,40}") {
        let _ = validate(&pattern, &Metadata::sample());
    }

    #[test]
    fn prop_natural_join_keeps_every_name(names in prop::collection::vec("[A-Z][a-z]{1,8}", 0..6)) {
        let record = Metadata::new(names.clone(), "T");
        let rendered = Template::compile("{artists|natural}").unwrap().expand(&record).unwrap();
        for name in &names {
            prop_assert!(rendered.contains(name.as_str()));
        }
        if names.len() >= 2 {
            prop_assert_eq!(rendered.matches(" & ").count(), 1);
        }
    }
}
