use form_cli::form::{
    ErrorKind, FieldKey, FormDocument, FormEvent, FormRenderer, RenderOptions, SubmitOutcome,
    ValidationMode,
    WidgetKind,
};
use std::sync::{Arc, Mutex};

fn renderer(json: &str) -> FormRenderer {
    FormRenderer::new(FormDocument::from_json(json).unwrap(), RenderOptions::default())
}

/// Dropdown default survives an untouched submit
#[test]
fn test_dropdown_default_submitted_unchanged() {
    let mut form = renderer(r#"[{"type": "dropdown", "options": ["a", "b", "c"], "default_value": "b"}]"#);

    let instruction = form.instruction(0).unwrap();
    assert_eq!(
        instruction.widget,
        WidgetKind::Select {
            options: vec!["a".into(), "b".into(), "c".into()]
        }
    );
    assert_eq!(instruction.initial_option(), Some(1));

    match form.submit() {
        SubmitOutcome::Accepted(values) => assert_eq!(values.get("0"), Some("b")),
        SubmitOutcome::Rejected(errors) => panic!("unexpected errors: {:?}", errors),
    }
}

#[test]
fn test_dropdown_value_outside_options_falls_back_to_first() {
    let mut form = renderer(r#"[{"type": "dropdown", "options": [1, 2], "value": 7}]"#);
    assert_eq!(form.value(0), Some("1"));
    assert!(form.submit().is_accepted());
}

#[test]
fn test_dropdown_rejects_values_it_cannot_offer() {
    let mut form = renderer(r#"[{"type": "dropdown", "options": ["a", "b"]}]"#);
    assert!(form.set_value(0, "zzz").is_err());
    assert_eq!(form.value(0), Some("a"));

    let SubmitOutcome::Accepted(values) = form.submit() else {
        panic!("the default option should submit");
    };
    assert_eq!(values.get("0"), Some("a"));
}

/// Number bounds at index 2: 15 is rejected, 5 is accepted
#[test]
fn test_number_bounds_at_third_position() {
    let mut form = renderer(
        r#"[
            {"type": "text"},
            {"type": "longtext"},
            {"type": "number", "min_value": 1, "max_value": 10}
        ]"#,
    );

    form.set_value(2, "15").unwrap();
    match form.submit() {
        SubmitOutcome::Rejected(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(&FieldKey::positional(2)).unwrap().kind, ErrorKind::Max);
        }
        SubmitOutcome::Accepted(_) => panic!("15 should exceed the maximum"),
    }
    assert!(form.submitted().is_none());
    assert_eq!(form.messages_for(2), vec!["Maximum value should be 10".to_string()]);

    form.set_value(2, "5").unwrap();
    assert!(form.submit().is_accepted());
    assert_eq!(form.submitted().unwrap().get("2"), Some("5"));
    assert!(form.messages_for(2).is_empty());
}

#[test]
fn test_round_trip_in_field_order() {
    let mut form = renderer(
        r#"[
            {"type": "text", "validation": "^[A-Z]"},
            {"type": "dropdown", "options": ["x", "y"]},
            {"type": "longtext"},
            {"type": "number", "max_value": 3}
        ]"#,
    );
    for (index, value) in ["Ada", "y", "line one\nline two", "2"].iter().enumerate() {
        form.set_value(index, *value).unwrap();
    }

    let SubmitOutcome::Accepted(values) = form.submit() else {
        panic!("all constraints are satisfied");
    };
    assert_eq!(values.values(), vec!["Ada", "y", "line one\nline two", "2"]);
    assert_eq!(
        values.display_lines(),
        vec!["Form values:", "• Ada", "• y", "• line one\nline two", "• 2"]
    );
}

#[test]
fn test_resubmitting_identical_values_is_idempotent() {
    let mut form = renderer(r#"[{"type": "text", "name": "who"}, {"type": "number", "min_value": 0}]"#);
    form.set_value_by_key("who", "Grace").unwrap();
    form.set_value(1, "3").unwrap();

    let first = form.submit();
    let second = form.submit();
    assert!(first.is_accepted());
    assert_eq!(first, second);
}

#[test]
fn test_plain_fields_are_optional() {
    let mut form = renderer(r#"[{"type": "text"}, {"type": "number"}, {"type": "longtext"}]"#);
    for instruction in form.instructions() {
        assert!(!instruction.constraints.is_required());
    }
    let SubmitOutcome::Accepted(values) = form.submit() else {
        panic!("empty optional fields should submit");
    };
    assert_eq!(values.values(), vec!["", "", ""]);
}

#[test]
fn test_any_rule_makes_field_required() {
    let form = renderer(
        r#"[
            {"type": "text", "validation": "."},
            {"type": "number", "min_value": 1},
            {"type": "number", "max_value": 1},
            {"type": "text"}
        ]"#,
    );
    let required: Vec<bool> = form
        .instructions()
        .iter()
        .map(|i| i.constraints.is_required())
        .collect();
    assert_eq!(required, vec![true, true, true, false]);
}

#[test]
fn test_required_field_reports_required_before_other_rules() {
    let mut form = renderer(r#"[{"type": "text", "validation": "^a", "label": "Code"}]"#);
    let SubmitOutcome::Rejected(errors) = form.submit() else {
        panic!("empty required field must be rejected");
    };
    assert_eq!(errors.get(&FieldKey::positional(0)).unwrap().kind, ErrorKind::Required);
    assert_eq!(form.messages_for(0), vec!["Field is required".to_string()]);
}

#[test]
fn test_named_keys_and_unknown_key() {
    let mut form = renderer(r#"{"title": "Signup", "fields": [{"type": "text", "name": "email"}]}"#);
    assert_eq!(form.title(), Some("Signup"));
    assert!(form.set_value_by_key("email", "a@b.c").is_ok());
    assert!(form.set_value_by_key("0", "x").is_err());
}

#[test]
fn test_on_blur_mode_validates_after_leaving_field() {
    let options = RenderOptions {
        validation_mode: ValidationMode::OnBlur,
        ..RenderOptions::default()
    };
    let mut form = FormRenderer::new(
        FormDocument::from_json(r#"[{"type": "number", "max_value": 1}]"#).unwrap(),
        options,
    );
    form.set_value(0, "4").unwrap();
    assert!(form.error(0).is_none());
    form.blur(0);
    assert_eq!(form.error(0).map(|e| e.kind), Some(ErrorKind::Max));
}

#[test]
fn test_subscribers_see_submit_events() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let mut form = renderer(r#"[{"type": "text", "validation": "^x$"}]"#);
    form.subscribe(move |event| {
        if matches!(event, FormEvent::Submitted(_) | FormEvent::SubmitRejected { .. }) {
            sink.lock().unwrap().push(event.clone());
        }
    });

    form.submit();
    form.set_value(0, "x").unwrap();
    form.submit();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], FormEvent::SubmitRejected { error_count: 1 });
    assert!(matches!(&events[1], FormEvent::Submitted(values) if values.get("0") == Some("x")));
}

#[test]
fn test_invalid_pattern_is_a_load_error() {
    assert!(FormDocument::from_json(r#"[{"type": "text", "validation": "("}]"#).is_err());
}

#[test]
fn test_duplicate_names_are_a_load_error() {
    let json = r#"[{"type": "text", "name": "a"}, {"type": "text", "name": "a"}]"#;
    assert!(FormDocument::from_json(json).is_err());
}
