use pretty_assertions::assert_eq;
use streamcodec_inspect::{codec_table, render_table, roundtrip, sample_timeseries, KeyReport};
use streamcodec_model::KeyedModel;
use streamcodec_registry::{CodecRegistry, CodecSettings, FormatProfile};

fn registry_for(profile: FormatProfile) -> CodecRegistry {
    let registry = CodecRegistry::new();
    registry.register_profile(profile).unwrap();
    registry
}

fn timeseries_row(table: &[KeyReport]) -> &KeyReport {
    table.iter().find(|r| r.key == "TimeseriesData").unwrap()
}

#[test]
fn table_lists_every_key_sorted() {
    let table = codec_table(&registry_for(FormatProfile::Json)).unwrap();
    let keys: Vec<&str> = table.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "EventData",
            "EventData[]",
            "EventDefinitions",
            "ParameterDefinitions",
            "StreamEnd",
            "StreamProperties",
            "TimeseriesData",
        ]
    );
}

#[test]
fn table_marks_only_the_writer() {
    let table = codec_table(&registry_for(FormatProfile::Protobuf)).unwrap();
    let row = timeseries_row(&table);
    let ids: Vec<&str> = row.codecs.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["PT", "J", "JT"]);
    assert!(row.codecs[0].writer);
    assert!(row.codecs[1..].iter().all(|c| !c.writer));
    assert_eq!(row.codecs[0].format, "protobuf");
    assert_eq!(row.codecs[1].role, "default");
}

#[test]
fn empty_registry_gives_empty_table() {
    let table = codec_table(&CodecRegistry::new()).unwrap();
    assert!(table.is_empty());
    assert_eq!(render_table(&table), "");
}

#[test]
fn rendered_table_stars_the_writer() {
    let table = codec_table(&registry_for(FormatProfile::ImprovedJson)).unwrap();
    let rendered = render_table(&table);
    let line = rendered
        .lines()
        .find(|l| l.starts_with("TimeseriesData"))
        .unwrap();
    assert!(line.ends_with("*JT (compact-json), J (json), PT (protobuf)"));
    assert_eq!(rendered.lines().count(), 7);
}

#[test]
fn table_serializes_as_json() {
    let table = codec_table(&registry_for(FormatProfile::Json)).unwrap();
    let json = serde_json::to_string(&table).unwrap();
    let back: Vec<KeyReport> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, table);
}

#[test]
fn roundtrip_uses_active_writer() {
    for (profile, writer) in [
        (FormatProfile::Json, "J"),
        (FormatProfile::ImprovedJson, "JT"),
        (FormatProfile::Protobuf, "PT"),
    ] {
        let report = roundtrip(&registry_for(profile)).unwrap();
        assert_eq!(report.writer, writer);
        assert_eq!(report.key, "TimeseriesData");
        assert!(report.matches);
        assert!(report.bytes > 0);
    }
}

#[test]
fn roundtrip_without_profile_fails() {
    assert!(roundtrip(&CodecRegistry::new()).is_err());
}

#[test]
fn sample_frame_is_valid() {
    assert_eq!(sample_timeseries().validate(), Ok(()));
}

#[test]
fn settings_file_drives_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("streamcodec.toml");
    std::fs::write(&path, "profile = \"ImprovedJson\"\n").unwrap();

    let settings = CodecSettings::from_toml_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let registry = CodecRegistry::new();
    settings.apply(&registry).unwrap();

    let table = codec_table(&registry).unwrap();
    assert_eq!(timeseries_row(&table).codecs[0].id, "JT");
}
