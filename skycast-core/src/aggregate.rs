//! Grouping of the 3-hour forecast series into per-day summaries.

use std::{collections::HashMap, ops::RangeInclusive};

use chrono::{Local, NaiveDate, TimeZone, Timelike};

use crate::model::{DailySummary, ForecastSample};

/// Maximum number of days in a summary.
pub const MAX_DAYS: usize = 5;

/// Local hours (inclusive) that qualify a sample as the day's representative.
pub const MIDDAY_HOURS: RangeInclusive<u32> = 12..=15;

/// Summarize `samples` per calendar day, with day boundaries in `tz`.
///
/// Days keep the order in which they first appear in `samples`, and only the
/// first [`MAX_DAYS`] days are returned. Each day's representative is the first
/// sample whose local hour falls in [`MIDDAY_HOURS`], or the day's first sample
/// when none does.
pub fn daily_summaries<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailySummary> {
    let mut days: Vec<(NaiveDate, Vec<&ForecastSample>)> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();
        match index.get(&date) {
            Some(&pos) => days[pos].1.push(sample),
            None => {
                index.insert(date, days.len());
                days.push((date, vec![sample]));
            }
        }
    }

    days.into_iter()
        .take(MAX_DAYS)
        .filter_map(|(date, group)| summarize(date, &group, tz))
        .collect()
}

/// [`daily_summaries`] using the machine's local time zone.
pub fn daily_summaries_local(samples: &[ForecastSample]) -> Vec<DailySummary> {
    daily_summaries(samples, &Local)
}

fn summarize<Tz: TimeZone>(
    date: NaiveDate,
    group: &[&ForecastSample],
    tz: &Tz,
) -> Option<DailySummary> {
    let first = *group.first()?;

    let representative = group
        .iter()
        .copied()
        .find(|s| MIDDAY_HOURS.contains(&s.timestamp.with_timezone(tz).hour()))
        .unwrap_or(first);

    let (daily_min, daily_max) = group.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), s| (min.min(s.temperature), max.max(s.temperature)),
    );

    Some(DailySummary {
        date,
        representative: representative.clone(),
        daily_min,
        daily_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset, Utc};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).expect("valid offset")
    }

    fn at(tz: &FixedOffset, y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        tz.with_ymd_and_hms(y, m, d, h, 0, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc)
    }

    fn sample(timestamp: DateTime<Utc>, temperature: f64) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature,
            feels_like: temperature - 1.0,
            humidity_pct: 60,
            pressure_hpa: 1013.0,
            wind_speed_mps: 3.5,
            clouds_pct: 20,
            visibility_m: Some(10_000),
            condition: None,
        }
    }

    fn local_hour(s: &ForecastSample) -> u32 {
        s.timestamp.with_timezone(&tz()).hour()
    }

    #[test]
    fn empty_input_yields_no_summaries() {
        assert!(daily_summaries(&[], &tz()).is_empty());
    }

    #[test]
    fn five_full_days_pick_noon_and_exact_extremes() {
        let tz = tz();
        let start = at(&tz, 2024, 3, 1, 0);
        let samples: Vec<_> = (0..40)
            .map(|i| {
                let day = (i / 8) as f64;
                let slot = (i % 8) as f64;
                sample(start + Duration::hours(3 * i), 270.0 + day * 2.0 + slot)
            })
            .collect();

        let days = daily_summaries(&samples, &tz);

        assert_eq!(days.len(), 5);
        for (d, summary) in days.iter().enumerate() {
            let expected_date = NaiveDate::from_ymd_opt(2024, 3, 1 + d as u32).expect("date");
            assert_eq!(summary.date, expected_date);
            assert_eq!(local_hour(&summary.representative), 12);
            assert_eq!(summary.daily_min, 270.0 + d as f64 * 2.0);
            assert_eq!(summary.daily_max, 277.0 + d as f64 * 2.0);
            assert!(summary.daily_min <= summary.representative.temperature);
            assert!(summary.representative.temperature <= summary.daily_max);
        }
    }

    #[test]
    fn output_is_capped_at_five_days() {
        let tz = tz();
        let samples: Vec<_> = (1..=7).map(|d| sample(at(&tz, 2024, 5, d, 9), 280.0)).collect();

        let days = daily_summaries(&samples, &tz);

        assert_eq!(days.len(), MAX_DAYS);
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2024, 5, 5).expect("date"));
    }

    #[test]
    fn midday_sample_wins_regardless_of_position() {
        let tz = tz();
        let samples = vec![
            sample(at(&tz, 2024, 6, 10, 9), 290.0),
            sample(at(&tz, 2024, 6, 10, 18), 291.0),
            sample(at(&tz, 2024, 6, 10, 13), 295.0),
            sample(at(&tz, 2024, 6, 10, 21), 288.0),
        ];

        let days = daily_summaries(&samples, &tz);

        assert_eq!(days.len(), 1);
        assert_eq!(local_hour(&days[0].representative), 13);
        assert_eq!(days[0].representative.temperature, 295.0);
    }

    #[test]
    fn first_sample_used_when_no_midday_sample() {
        let tz = tz();
        let samples = vec![
            sample(at(&tz, 2024, 6, 10, 18), 291.0),
            sample(at(&tz, 2024, 6, 10, 3), 285.0),
            sample(at(&tz, 2024, 6, 10, 21), 288.0),
        ];

        let days = daily_summaries(&samples, &tz);

        assert_eq!(local_hour(&days[0].representative), 18);
        assert_eq!(days[0].daily_min, 285.0);
        assert_eq!(days[0].daily_max, 291.0);
    }

    #[test]
    fn days_follow_first_appearance_and_merge_stragglers() {
        let tz = tz();
        let samples = vec![
            sample(at(&tz, 2024, 1, 3, 6), 271.0),
            sample(at(&tz, 2024, 1, 2, 6), 272.0),
            sample(at(&tz, 2024, 1, 3, 9), 275.0),
        ];

        let days = daily_summaries(&samples, &tz);

        let dates: Vec<_> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02"]);
        assert_eq!(days[0].daily_max, 275.0);
    }

    #[test]
    fn single_sample_day_has_equal_extremes() {
        let tz = tz();
        let days = daily_summaries(&[sample(at(&tz, 2024, 2, 2, 0), 265.4)], &tz);

        assert_eq!(days[0].daily_min, 265.4);
        assert_eq!(days[0].daily_max, 265.4);
        assert_eq!(days[0].representative.temperature, 265.4);
    }

    #[test]
    fn day_boundaries_use_the_given_zone() {
        let tz = tz();
        // 23:00 UTC is 01:00 the next day at UTC+2.
        let ts = Utc
            .with_ymd_and_hms(2024, 7, 1, 23, 0, 0)
            .single()
            .expect("valid utc");

        let local = daily_summaries(&[sample(ts, 300.0)], &tz);
        let utc = daily_summaries(&[sample(ts, 300.0)], &Utc);

        assert_eq!(local[0].date, NaiveDate::from_ymd_opt(2024, 7, 2).expect("date"));
        assert_eq!(utc[0].date, NaiveDate::from_ymd_opt(2024, 7, 1).expect("date"));
    }
}
