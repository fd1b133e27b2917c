//! Decoding of the raw feed into normalized forecast records.
//!
//! The feed is positionally indexed and may be truncated at any level:
//! blocks, time series groups, per-area arrays, individual entries. Decoding
//! therefore never fails; every missing value becomes an empty string (or 0
//! for an aggregated probability). The decode is pure, with no I/O and no
//! clock; persistence happens in [`crate::service::ingest`].

use crate::types::feed::{AreaSeries, ForecastFeed, TimeSeries, entry_or_empty, max_pop};
use crate::types::forecast::{DayForecast, ForecastBundle, WeeklyEntry};

/// Entries per day in the short-term precipitation series: one per
/// six-hour window.
const POPS_PER_DAY: usize = 4;

/// Calendar-date portion of a feed time marker (`2026-08-07T11:00:00+09:00`
/// -> `2026-08-07`).
fn date_part(marker: &str) -> String {
    marker.chars().take(10).collect()
}

/// First area entry of time series group `idx`, when present.
fn first_area(series: &[TimeSeries], idx: usize) -> Option<&AreaSeries> {
    series.get(idx).and_then(|ts| ts.areas.first())
}

/// Clamp `values[start..start + POPS_PER_DAY]` to the array's actual length.
fn day_slice(values: &[String], start: usize) -> &[String] {
    let end = values.len().min(start + POPS_PER_DAY);
    if start >= end { &[] } else { &values[start..end] }
}

/// Decode a forecast feed into the normalized bundle.
pub fn parse_forecast(feed: &ForecastFeed) -> ForecastBundle {
    let mut bundle = ForecastBundle::default();

    let Some(block) = feed.first() else {
        return bundle;
    };
    bundle.report_datetime = block.report_datetime.clone();

    let series = &block.time_series;
    if let Some(area) = first_area(series, 0) {
        bundle.area_name = area.area.name.clone();

        let time_defines = series
            .first()
            .map(|ts| ts.time_defines.as_slice())
            .unwrap_or(&[]);
        let pops = first_area(series, 1).map(|a| a.pops.as_slice()).unwrap_or(&[]);
        let temps = first_area(series, 2).map(|a| a.temps.as_slice()).unwrap_or(&[]);

        if let Some(marker) = time_defines.first() {
            bundle.today = Some(DayForecast {
                date: date_part(marker),
                weather_code: entry_or_empty(&area.weather_codes, 0),
                weather_text: entry_or_empty(&area.weathers, 0),
                temp_min: entry_or_empty(temps, 0),
                temp_max: entry_or_empty(temps, 1),
                pop: max_pop(day_slice(pops, 0)),
                wind: entry_or_empty(&area.winds, 0),
            });
        }

        if let Some(marker) = time_defines.get(1) {
            bundle.tomorrow = Some(DayForecast {
                date: date_part(marker),
                weather_code: entry_or_empty(&area.weather_codes, 1),
                weather_text: entry_or_empty(&area.weathers, 1),
                temp_min: String::new(),
                temp_max: String::new(),
                pop: max_pop(day_slice(pops, POPS_PER_DAY)),
                wind: entry_or_empty(&area.winds, 1),
            });
        }
    }

    if let Some(weekly_block) = feed.get(1) {
        let series = &weekly_block.time_series;
        if let Some(area) = first_area(series, 0) {
            let time_defines = series
                .first()
                .map(|ts| ts.time_defines.as_slice())
                .unwrap_or(&[]);
            let (temps_min, temps_max) = first_area(series, 1)
                .map(|a| (a.temps_min.as_slice(), a.temps_max.as_slice()))
                .unwrap_or((&[], &[]));

            for (i, marker) in time_defines.iter().enumerate() {
                bundle.weekly.push(WeeklyEntry {
                    date: date_part(marker),
                    weather_code: entry_or_empty(&area.weather_codes, i),
                    pop: entry_or_empty(&area.pops, i),
                    temp_min: entry_or_empty(temps_min, i),
                    temp_max: entry_or_empty(temps_max, i),
                    reliability: entry_or_empty(&area.reliabilities, i),
                });
            }
        }
    }

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::feed::ForecastFeed;
    use serde_json::json;

    fn feed_from(value: serde_json::Value) -> ForecastFeed {
        serde_json::from_value(value).expect("test feed must decode")
    }

    #[test]
    fn empty_feed_yields_all_defaults() {
        let bundle = parse_forecast(&Vec::new());
        assert_eq!(bundle, ForecastBundle::default());
        assert!(bundle.today.is_none());
        assert!(bundle.tomorrow.is_none());
        assert!(bundle.weekly.is_empty());
        assert_eq!(bundle.report_datetime, "");
        assert_eq!(bundle.area_name, "");
    }

    #[test]
    fn single_marker_produces_today_only() {
        let feed = feed_from(json!([{
            "reportDatetime": "2026-08-07T11:00:00+09:00",
            "timeSeries": [{
                "timeDefines": ["2026-08-07T11:00:00+09:00"],
                "areas": [{
                    "area": {"name": "Tokyo", "code": "130010"},
                    "weatherCodes": ["100"]
                }]
            }]
        }]));

        let bundle = parse_forecast(&feed);
        let today = bundle.today.expect("today");
        assert_eq!(today.date, "2026-08-07");
        assert_eq!(today.weather_code, "100");
        assert_eq!(today.weather_text, "");
        assert_eq!(today.wind, "");
        assert_eq!(today.pop, 0);
        assert!(bundle.tomorrow.is_none());
        assert_eq!(bundle.area_name, "Tokyo");
    }

    #[test]
    fn pop_slices_aggregate_by_max_of_parseable_entries() {
        let feed = feed_from(json!([{
            "reportDatetime": "2026-08-07T11:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": ["2026-08-07T11:00:00+09:00", "2026-08-08T00:00:00+09:00"],
                    "areas": [{
                        "area": {"name": "Tokyo", "code": "130010"},
                        "weatherCodes": ["100", "200"]
                    }]
                },
                {
                    "timeDefines": [],
                    "areas": [{
                        "area": {"name": "Tokyo", "code": "130010"},
                        "pops": ["10", "20", "", "40", "50", "60", "", "80"]
                    }]
                }
            ]
        }]));

        let bundle = parse_forecast(&feed);
        assert_eq!(bundle.today.expect("today").pop, 40);
        assert_eq!(bundle.tomorrow.expect("tomorrow").pop, 80);
    }

    #[test]
    fn today_temps_come_from_the_third_group() {
        let feed = feed_from(json!([{
            "reportDatetime": "2026-08-07T11:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": ["2026-08-07T11:00:00+09:00", "2026-08-08T00:00:00+09:00"],
                    "areas": [{
                        "area": {"name": "Tokyo", "code": "130010"},
                        "weatherCodes": ["100", "200"],
                        "weathers": ["sunny", "cloudy"],
                        "winds": ["calm", "north"]
                    }]
                },
                {"timeDefines": [], "areas": []},
                {
                    "timeDefines": [],
                    "areas": [{
                        "area": {"name": "Tokyo", "code": "130010"},
                        "temps": ["21", "32"]
                    }]
                }
            ]
        }]));

        let bundle = parse_forecast(&feed);
        let today = bundle.today.expect("today");
        assert_eq!(today.temp_min, "21");
        assert_eq!(today.temp_max, "32");
        assert_eq!(today.weather_text, "sunny");
        assert_eq!(today.wind, "calm");

        // Tomorrow never carries temperatures at this granularity.
        let tomorrow = bundle.tomorrow.expect("tomorrow");
        assert_eq!(tomorrow.temp_min, "");
        assert_eq!(tomorrow.temp_max, "");
        assert_eq!(tomorrow.weather_text, "cloudy");
        assert_eq!(tomorrow.wind, "north");
    }

    #[test]
    fn weekly_rows_index_align_and_default_past_short_arrays() {
        let days: Vec<String> = (1..=7)
            .map(|d| format!("2026-08-{:02}T00:00:00+09:00", d + 7))
            .collect();
        let feed = feed_from(json!([
            {"reportDatetime": "", "timeSeries": []},
            {
                "reportDatetime": "2026-08-07T11:00:00+09:00",
                "timeSeries": [
                    {
                        "timeDefines": days,
                        "areas": [{
                            "area": {"name": "Tokyo", "code": "130010"},
                            "weatherCodes": ["100", "101", "102", "200", "201"],
                            "pops": ["10", "20", "30", "40", "50", "60", "70"],
                            "reliabilities": ["A", "A", "B", "B", "C", "C", "C"]
                        }]
                    },
                    {
                        "timeDefines": [],
                        "areas": [{
                            "area": {"name": "Tokyo", "code": "130010"},
                            "tempsMin": ["20", "21", "22", "23", "24", "25", "26"],
                            "tempsMax": ["30", "31", "32", "33", "34", "35", "36"]
                        }]
                    }
                ]
            }
        ]));

        let bundle = parse_forecast(&feed);
        assert_eq!(bundle.weekly.len(), 7);
        assert_eq!(bundle.weekly[0].date, "2026-08-08");
        assert_eq!(bundle.weekly[2].weather_code, "102");
        assert_eq!(bundle.weekly[6].pop, "70");
        assert_eq!(bundle.weekly[6].temp_max, "36");

        // weatherCodes has length 5: indices 5 and 6 default to "" while
        // the longer arrays still populate.
        assert_eq!(bundle.weekly[5].weather_code, "");
        assert_eq!(bundle.weekly[6].weather_code, "");
        assert_eq!(bundle.weekly[5].reliability, "C");
    }

    #[test]
    fn short_pop_array_never_reaches_the_tomorrow_slice() {
        let feed = feed_from(json!([{
            "reportDatetime": "",
            "timeSeries": [
                {
                    "timeDefines": ["2026-08-07T11:00:00+09:00", "2026-08-08T00:00:00+09:00"],
                    "areas": [{"area": {"name": "Tokyo", "code": "130010"}}]
                },
                {
                    "timeDefines": [],
                    "areas": [{"area": {"name": "Tokyo", "code": "130010"}, "pops": ["30", "60"]}]
                }
            ]
        }]));

        let bundle = parse_forecast(&feed);
        assert_eq!(bundle.today.expect("today").pop, 60);
        assert_eq!(bundle.tomorrow.expect("tomorrow").pop, 0);
    }
}
