use proptest::prelude::*;
use streamcodec_model::{
    well_known, EventData, KeyedModel, ModelError, ModelKey, StreamEnd, TimeseriesData,
};

// ── Equality & display ───────────────────────────────────────────

#[test]
fn keys_with_same_string_are_equal() {
    assert_eq!(ModelKey::new("TimeseriesData"), ModelKey::new("TimeseriesData"));
    assert_ne!(ModelKey::new("EventData"), ModelKey::new("EventData[]"));
}

#[test]
fn display_is_the_raw_identity() {
    let key = ModelKey::new("EventData[]");
    assert_eq!(key.to_string(), "EventData[]");
    assert_eq!(key.as_str(), "EventData[]");
}

#[test]
fn serde_is_transparent() {
    let key = ModelKey::new("StreamEnd");
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"StreamEnd\"");
    let back: ModelKey = serde_json::from_str(&json).unwrap();
    assert_eq!(back, key);
}

// ── Type-name normalization ──────────────────────────────────────

#[test]
fn plain_type_name_is_kept() {
    assert_eq!(ModelKey::for_type_name("EventData").as_str(), "EventData");
}

#[test]
fn module_path_is_stripped() {
    let key = ModelKey::for_type_name("streamcodec_model::event::EventData");
    assert_eq!(key.as_str(), "EventData");
}

#[test]
fn dotted_namespace_is_stripped() {
    let key = ModelKey::for_type_name("Telemetry.Models.StreamProperties");
    assert_eq!(key.as_str(), "StreamProperties");
}

#[test]
fn array_forms_normalize_to_the_same_key() {
    let expected = ModelKey::new("EventData[]");
    assert_eq!(ModelKey::for_type_name("EventData[]"), expected);
    assert_eq!(ModelKey::for_type_name("[EventData]"), expected);
    assert_eq!(ModelKey::for_type_name("Vec<EventData>"), expected);
    assert_eq!(
        ModelKey::for_type_name("alloc::vec::Vec<streamcodec_model::event::EventData>"),
        expected
    );
}

#[test]
fn array_key_is_distinct_from_element_key() {
    assert_ne!(
        ModelKey::for_type_name("EventData[]"),
        ModelKey::for_type_name("EventData")
    );
}

#[test]
fn nested_arrays_keep_every_level() {
    let key = ModelKey::for_type_name("Vec<Vec<EventData>>");
    assert_eq!(key.as_str(), "EventData[][]");
}

#[test]
fn deeply_nested_arrays_normalize_without_recursion() {
    const DEPTH: usize = 100_000;
    let expected = format!("EventData{}", "[]".repeat(DEPTH));

    let suffixed = ModelKey::for_type_name(&expected);
    assert_eq!(suffixed.as_str(), expected);

    let generic = format!("{}EventData{}", "Vec<".repeat(DEPTH), ">".repeat(DEPTH));
    assert_eq!(ModelKey::for_type_name(&generic).as_str(), expected);

    let bracketed = format!("{}EventData{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
    assert_eq!(ModelKey::for_type_name(&bracketed).as_str(), expected);
}

#[test]
fn mixed_array_forms_nest() {
    let key = ModelKey::for_type_name("Vec<[std::vec::Vec<EventData>]>[]");
    assert_eq!(key.as_str(), "EventData[][][]");
}

#[test]
fn non_array_generics_are_stripped() {
    let key = ModelKey::for_type_name("Box<TimeseriesData>");
    assert_eq!(key.as_str(), "Box");
    let key = ModelKey::for_type_name("DefaultJson<TimeseriesData>");
    assert_eq!(key.as_str(), "DefaultJson");
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(ModelKey::for_type_name("  StreamEnd \n").as_str(), "StreamEnd");
}

#[test]
fn parse_rejects_blank_names() {
    assert_eq!(ModelKey::parse("   "), Err(ModelError::EmptyKey));
    assert_eq!("[]".parse::<ModelKey>(), Err(ModelError::EmptyKey));
    assert_eq!(ModelKey::parse("[][]"), Err(ModelError::EmptyKey));
    assert_eq!(ModelKey::parse("Vec<>"), Err(ModelError::EmptyKey));
}

#[test]
fn parse_accepts_type_names() {
    let key: ModelKey = "Vec<EventData>".parse().unwrap();
    assert_eq!(key.as_str(), "EventData[]");
}

// ── Array helpers ────────────────────────────────────────────────

#[test]
fn array_and_element_are_inverse() {
    let key = ModelKey::new("EventData");
    let array = key.array();
    assert!(array.is_array());
    assert!(!key.is_array());
    assert_eq!(array.element(), Some(key.clone()));
    assert_eq!(key.element(), None);
}

// ── KeyedModel keys ──────────────────────────────────────────────

#[test]
fn models_declare_well_known_keys() {
    assert_eq!(TimeseriesData::model_key().as_str(), well_known::TIMESERIES_DATA);
    assert_eq!(EventData::model_key().as_str(), well_known::EVENT_DATA);
    assert_eq!(StreamEnd::model_key().as_str(), well_known::STREAM_END);
}

#[test]
fn vec_of_model_uses_array_key() {
    assert_eq!(
        <Vec<EventData>>::model_key().as_str(),
        well_known::EVENT_DATA_ARRAY
    );
}

#[test]
fn well_known_lists_every_key_once() {
    let keys = ModelKey::well_known();
    assert_eq!(keys.len(), well_known::ALL.len());
    let mut deduped = keys.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), keys.len());
}

proptest! {
    #[test]
    fn array_suffix_round_trips(name in "[A-Z][A-Za-z0-9]{0,20}") {
        let key = ModelKey::for_type_name(&name);
        prop_assert_eq!(key.as_str(), name.as_str());
        prop_assert_eq!(ModelKey::for_type_name(&format!("{name}[]")), key.array());
        prop_assert_eq!(ModelKey::for_type_name(&format!("Vec<{name}>")), key.array());
    }
}
