//! Typed mirrors of the raw JMA feed payloads.
//!
//! The upstream JSON is positionally indexed and frequently truncated: time
//! series groups may be absent, arrays may be shorter than their
//! `timeDefines`, and numeric fields arrive as strings that may be empty.
//! Every field here is `#[serde(default)]` so a short or missing structure
//! decodes to empty values instead of failing the decode.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The forecast feed: a sequence of up to two report blocks
/// (short-term first, weekly second).
pub type ForecastFeed = Vec<ReportBlock>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBlock {
    #[serde(default)]
    pub report_datetime: String,
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
}

/// One positionally-addressed group of per-day fields, aligned to its own
/// `time_defines` sequence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub time_defines: Vec<String>,
    #[serde(default)]
    pub areas: Vec<AreaSeries>,
}

/// Per-area arrays within a time series group. Short-term and weekly blocks
/// populate different subsets; the rest decode as empty vectors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSeries {
    #[serde(default)]
    pub area: AreaRef,
    #[serde(default)]
    pub weather_codes: Vec<String>,
    #[serde(default)]
    pub weathers: Vec<String>,
    #[serde(default)]
    pub winds: Vec<String>,
    #[serde(default)]
    pub pops: Vec<String>,
    #[serde(default)]
    pub temps: Vec<String>,
    #[serde(default)]
    pub reliabilities: Vec<String>,
    #[serde(default)]
    pub temps_min: Vec<String>,
    #[serde(default)]
    pub temps_max: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

/// The area registry feed. Only the `offices` mapping is consumed; the
/// sibling `centers`/`class10s`/... mappings are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaRegistryFeed {
    #[serde(default)]
    pub offices: BTreeMap<String, OfficeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfficeInfo {
    #[serde(default)]
    pub name: String,
}

/// Index-or-default access over a feed array: the entry at `i`, or `""` when
/// the array is shorter than `i + 1`.
pub fn entry_or_empty(values: &[String], i: usize) -> String {
    values.get(i).cloned().unwrap_or_default()
}

/// Outcome of parsing one precipitation-probability entry. Non-numeric and
/// empty entries are skipped rather than treated as zero, so "no eligible
/// entries" stays distinguishable from "an entry equal to 0".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopEntry {
    Parsed(u32),
    Skipped,
}

impl PopEntry {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(v) => PopEntry::Parsed(v),
            Err(_) => PopEntry::Skipped,
        }
    }
}

/// Maximum of the parseable entries in `slice`; 0 when none parse.
pub fn max_pop(slice: &[String]) -> u32 {
    slice
        .iter()
        .map(|raw| PopEntry::parse(raw))
        .filter_map(|entry| match entry {
            PopEntry::Parsed(v) => Some(v),
            PopEntry::Skipped => None,
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn entry_or_empty_defaults_past_the_end() {
        let values = strings(&["a", "b"]);
        assert_eq!(entry_or_empty(&values, 1), "b");
        assert_eq!(entry_or_empty(&values, 2), "");
        assert_eq!(entry_or_empty(&[], 0), "");
    }

    #[test]
    fn pop_entry_skips_non_numeric() {
        assert_eq!(PopEntry::parse("40"), PopEntry::Parsed(40));
        assert_eq!(PopEntry::parse(""), PopEntry::Skipped);
        assert_eq!(PopEntry::parse("--"), PopEntry::Skipped);
    }

    #[test]
    fn max_pop_over_empty_eligible_set_is_zero() {
        assert_eq!(max_pop(&strings(&["", "--", ""])), 0);
        assert_eq!(max_pop(&[]), 0);
    }

    #[test]
    fn max_pop_distinguishes_zero_entry_from_no_entries() {
        assert_eq!(max_pop(&strings(&["0"])), 0);
        assert_eq!(max_pop(&strings(&["10", "", "40", "20"])), 40);
    }

    #[test]
    fn truncated_feed_decodes_without_error() {
        let raw = r#"[{"reportDatetime":"2026-08-07T11:00:00+09:00","timeSeries":[{"timeDefines":["2026-08-07T11:00:00+09:00"],"areas":[{"area":{"name":"Tokyo","code":"130010"}}]}]}]"#;
        let feed: ForecastFeed = serde_json::from_str(raw).expect("decode");
        assert_eq!(feed.len(), 1);
        let series = &feed[0].time_series[0];
        assert!(series.areas[0].weather_codes.is_empty());
        assert_eq!(series.areas[0].area.name, "Tokyo");
    }
}
