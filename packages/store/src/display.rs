//! Text formatting shared by the meeting views.

use chrono::{DateTime, NaiveDateTime};

pub const UNKNOWN_TIME: &str = "시간 미정";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a server timestamp. Offsets are dropped: meeting times are local wall-clock times.
pub fn parse_meeting_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `2026. 5. 1. 18:30`, or [`UNKNOWN_TIME`].
pub fn meeting_time_text(raw: Option<&str>) -> String {
    raw.and_then(parse_meeting_time)
        .map(|dt| dt.format("%Y. %-m. %-d. %H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// `5/1 (금) 18:30` for compact cards.
pub fn meeting_time_short(raw: Option<&str>) -> String {
    const WEEKDAYS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];
    raw.and_then(parse_meeting_time)
        .map(|dt| {
            use chrono::Datelike;
            let weekday = WEEKDAYS[dt.weekday().num_days_from_monday() as usize];
            format!("{} ({}) {}", dt.format("%-m/%-d"), weekday, dt.format("%H:%M"))
        })
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Group digits by thousands: `12000` → `12,000`.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `무료` for free meetings, `12,000원` otherwise.
pub fn cost_text(cost: i64) -> String {
    if cost <= 0 {
        "무료".to_string()
    } else {
        format!("{}원", group_thousands(cost))
    }
}

pub fn distance_text(km: Option<f64>) -> Option<String> {
    km.filter(|d| d.is_finite()).map(|d| format!("{:.1}km", d))
}

pub fn participants_text(current: Option<i64>, max: Option<i64>) -> String {
    format!("{}/{}명", current.unwrap_or(0), max.unwrap_or(0))
}

/// Match score as a whole percentage.
pub fn score_text(score: f64) -> String {
    format!("{}%", score.round() as i64)
}
