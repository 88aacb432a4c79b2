use chrono::NaiveDate;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format an optional string, returning a default if None or blank
pub fn format_optional(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Parse the date part of a backend date or timestamp
/// ("2024-03-01" or "2024-03-01T10:00:00.000000Z").
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return Some(dt.date_naive());
    }
    date.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

/// Format an optional backend date for display, "-" when missing
pub fn format_date(date: Option<&str>) -> String {
    match date {
        None => "-".to_string(),
        Some(d) if d.trim().is_empty() => "-".to_string(),
        Some(d) => parse_date(d)
            .map(|parsed| parsed.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| d.to_string()),
    }
}
