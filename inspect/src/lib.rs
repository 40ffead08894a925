//! Reports over a codec registry, shared by the `streamcodec-inspect` binary.

use serde::{Deserialize, Serialize};
use streamcodec_model::{well_known, TimeseriesData};
use streamcodec_registry::{CodecRegistry, CodecResult, CodecRole};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CodecReport {
    pub id: String,
    pub format: String,
    pub role: String,
    pub writer: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KeyReport {
    pub key: String,
    pub codecs: Vec<CodecReport>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoundtripReport {
    pub key: String,
    pub writer: String,
    pub bytes: usize,
    pub matches: bool,
}

/// Ordered codecs for every registered key, sorted by key.
pub fn codec_table(registry: &CodecRegistry) -> CodecResult<Vec<KeyReport>> {
    registry
        .keys()
        .into_iter()
        .map(|key| {
            let codecs = registry
                .retrieve_entries(&key)?
                .into_iter()
                .enumerate()
                .map(|(index, entry)| CodecReport {
                    id: entry.codec.id().to_string(),
                    format: entry.codec.format().to_string(),
                    role: match entry.role() {
                        CodecRole::Default => "default".to_string(),
                        CodecRole::FormatSpecific => "format-specific".to_string(),
                    },
                    writer: index == 0,
                })
                .collect();
            Ok(KeyReport {
                key: key.to_string(),
                codecs,
            })
        })
        .collect()
}

/// Plain-text rendering of [`codec_table`], one line per key.
pub fn render_table(table: &[KeyReport]) -> String {
    let width = table.iter().map(|r| r.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for report in table {
        let codecs: Vec<String> = report
            .codecs
            .iter()
            .map(|c| {
                if c.writer {
                    format!("*{} ({})", c.id, c.format)
                } else {
                    format!("{} ({})", c.id, c.format)
                }
            })
            .collect();
        out.push_str(&format!("{:<width$}  {}\n", report.key, codecs.join(", ")));
    }
    out
}

/// A three-row frame touching every column group.
pub fn sample_timeseries() -> TimeseriesData {
    TimeseriesData::new(1_700_000_000_000_000_000, vec![0, 1_000_000, 2_000_000])
        .with_numeric("vCar", vec![Some(281.4), Some(283.9), None])
        .with_string("gear", vec![Some("7".into()), Some("8".into()), Some("8".into())])
        .with_binary("telemetryFrame", vec![None, Some(vec![0x0a, 0x0b]), None])
        .with_tag("driver", vec![Some("44".into()), Some("44".into()), Some("44".into())])
}

/// Writes [`sample_timeseries`] with the active writer and reads it back.
pub fn roundtrip(registry: &CodecRegistry) -> CodecResult<RoundtripReport> {
    let data = sample_timeseries();
    let payload = registry.write_tagged(well_known::TIMESERIES_DATA, &data)?;
    let back: TimeseriesData = registry.read(&payload.key, &payload.bytes)?;
    Ok(RoundtripReport {
        key: payload.key.to_string(),
        writer: payload.codec.to_string(),
        bytes: payload.bytes.len(),
        matches: back == data,
    })
}
