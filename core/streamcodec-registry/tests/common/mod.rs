//! Shared test helpers for registry tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use streamcodec_model::{EventData, TimeseriesData};
use streamcodec_registry::{CodecRegistry, FormatProfile};

/// A small frame touching every column group.
pub fn sample_timeseries() -> TimeseriesData {
    TimeseriesData::new(1_700_000_000_000_000_000, vec![0, 100, 200])
        .with_numeric("speed", vec![Some(212.5), None, Some(-0.25)])
        .with_string("gear", vec![Some("7".into()), None, Some("N".into())])
        .with_binary("frame", vec![Some(vec![0, 1, 255]), Some(vec![]), None])
        .with_tag("driver", vec![Some("ham".into()), Some("ham".into()), None])
}

pub fn sample_event() -> EventData {
    EventData::new(1_000, "pit-lane", "entered").with_tag("lap", "12")
}

/// A fresh registry with the given profiles registered in order.
pub fn registry_with(profiles: &[FormatProfile]) -> CodecRegistry {
    let registry = CodecRegistry::new();
    for profile in profiles {
        registry
            .register_profile(*profile)
            .expect("built-in profiles never conflict");
    }
    registry
}

/// Codec ids for a key, in list order.
pub fn ids(registry: &CodecRegistry, key: &str) -> Vec<&'static str> {
    registry
        .retrieve_codecs(key)
        .expect("key registered")
        .iter()
        .map(|c| c.id().as_str())
        .collect()
}

fn column<T: std::fmt::Debug + Clone + 'static>(
    rows: usize,
    cell: impl Strategy<Value = T> + 'static,
) -> impl Strategy<Value = BTreeMap<String, Vec<Option<T>>>> {
    btree_map("[a-z][a-z0-9_]{0,7}", vec(option::of(cell), rows), 0..3)
}

/// Arbitrary aligned frames with finite numbers.
pub fn arb_timeseries() -> impl Strategy<Value = TimeseriesData> {
    (0usize..6).prop_flat_map(|rows| {
        (
            any::<i64>(),
            vec(any::<i64>(), rows),
            column(rows, -1.0e12f64..1.0e12),
            column(rows, "[ -~]{0,12}"),
            column(rows, vec(any::<u8>(), 0..16)),
            column(rows, "[a-z]{0,6}"),
        )
            .prop_map(
                |(epoch, timestamps, numeric_values, string_values, binary_values, tag_values)| {
                    TimeseriesData {
                        epoch,
                        timestamps,
                        numeric_values,
                        string_values,
                        binary_values,
                        tag_values,
                    }
                },
            )
    })
}
