/// Temporal activity distributions.
///
/// Hour, weekday and week are taken in a caller-chosen zone (the system's
/// local zone through the short-named functions). Daily buckets use the UTC
/// calendar date embedded in `fullDateISO`.
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::error::{Result, StatsError};
use crate::message::ParsedMessage;
use crate::stats::{DailyPoint, HeatCell, WeeklyPoint};
use crate::timefmt;

fn zoned<Tz: TimeZone>(m: &ParsedMessage, tz: &Tz) -> Result<DateTime<Tz>> {
    timefmt::parse_iso_in(&m.full_date_iso, tz).ok_or_else(|| StatsError::MalformedDate {
        id: Some(m.id),
        value: m.full_date_iso.clone(),
    })
}

pub fn hour_weekday_heatmap(messages: &[ParsedMessage]) -> Result<Vec<HeatCell>> {
    hour_weekday_heatmap_in(messages, &Local)
}

/// Counts messages per (weekday, hour) in `tz`; Monday is weekday 0.
///
/// Only non-empty slots are emitted, in the order they were first hit.
pub fn hour_weekday_heatmap_in<Tz: TimeZone>(
    messages: &[ParsedMessage],
    tz: &Tz,
) -> Result<Vec<HeatCell>> {
    let mut slots: IndexMap<(u32, u32), u64> = IndexMap::new();

    for m in messages {
        let dt = zoned(m, tz)?;
        let weekday = dt.weekday().num_days_from_monday();
        *slots.entry((weekday, dt.hour())).or_insert(0) += 1;
    }

    Ok(slots
        .into_iter()
        .map(|((weekday, hour), count)| HeatCell {
            weekday,
            hour,
            count,
        })
        .collect())
}

/// Messages per UTC calendar day, ascending by date.
pub fn daily_chart(messages: &[ParsedMessage]) -> Vec<DailyPoint> {
    let mut by_day: BTreeMap<&str, u64> = BTreeMap::new();
    for m in messages {
        let day = m.full_date_iso.get(..10).unwrap_or(m.full_date_iso.as_str());
        *by_day.entry(day).or_insert(0) += 1;
    }

    by_day
        .into_iter()
        .map(|(date, count)| DailyPoint {
            date: date.to_string(),
            count,
        })
        .collect()
}

pub fn weekly_trend(messages: &[ParsedMessage]) -> Result<Vec<WeeklyPoint>> {
    weekly_trend_in(messages, &Local)
}

/// Messages per `YYYY-Wnn` week key in `tz`, ascending by key.
///
/// See [`week_number`] for how weeks are counted.
pub fn weekly_trend_in<Tz: TimeZone>(
    messages: &[ParsedMessage],
    tz: &Tz,
) -> Result<Vec<WeeklyPoint>> {
    let mut by_week: BTreeMap<String, u64> = BTreeMap::new();
    for m in messages {
        let dt = zoned(m, tz)?;
        let week = format!("{}-W{:02}", dt.year(), week_number(&dt));
        *by_week.entry(week).or_insert(0) += 1;
    }

    Ok(by_week
        .into_iter()
        .map(|(week, count)| WeeklyPoint { week, count })
        .collect())
}

/// Week of the year as `ceil((weekday + 1 + day_of_year) / 7)`.
///
/// `weekday` counts from Sunday = 0 and `day_of_year` from Jan 1 = 0, both
/// for `date` itself. This is not ISO-8601 week numbering: it can yield
/// week 53 or disagree with ISO near year boundaries, and existing week keys
/// depend on it.
pub fn week_number<D: Datelike>(date: &D) -> u32 {
    let weekday = date.weekday().num_days_from_sunday();
    let days = date.ordinal0();
    (weekday + 1 + days).div_ceil(7)
}
