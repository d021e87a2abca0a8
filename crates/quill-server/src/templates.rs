//! Tera environment, built once at startup and stored in the app state.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use tera::{Tera, Value};

pub const TEMPLATE_GLOB: &str = "templates/**/*.html";

pub fn build() -> anyhow::Result<Tera> {
    let mut tera = Tera::new(TEMPLATE_GLOB)?;
    tera.register_filter("datetime", datetime_filter);
    Ok(tera)
}

/// `{{ blog.created_at | datetime }}` — relative age for recent timestamps,
/// a plain date beyond a week. Input is unix epoch seconds.
fn datetime_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let ts = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg("datetime filter expects a number"))?;
    let now = Utc::now().timestamp() as f64;
    let delta = (now - ts).max(0.0) as i64;

    let text = if delta < 60 {
        "1 minute ago".to_string()
    } else if delta < 3600 {
        format!("{} minutes ago", delta / 60)
    } else if delta < 86400 {
        format!("{} hours ago", delta / 3600)
    } else if delta < 604800 {
        format!("{} days ago", delta / 86400)
    } else {
        match Utc.timestamp_opt(ts as i64, 0).single() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => "unknown date".to_string(),
        }
    };
    Ok(Value::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ts: f64) -> String {
        let value = datetime_filter(&Value::from(ts), &HashMap::new()).unwrap();
        value.as_str().unwrap().to_string()
    }

    #[test]
    fn recent_timestamps_format_as_relative_age() {
        let now = Utc::now().timestamp() as f64;
        assert_eq!(run(now - 30.0), "1 minute ago");
        assert_eq!(run(now - 120.0), "2 minutes ago");
        assert_eq!(run(now - 7200.0), "2 hours ago");
        assert_eq!(run(now - 172_800.0), "2 days ago");
    }

    #[test]
    fn old_timestamps_format_as_dates() {
        let text = run(1_500_000_000.0);
        assert_eq!(text, "2017-07-14");
    }

    #[test]
    fn non_numeric_input_is_an_error() {
        assert!(datetime_filter(&Value::String("soon".into()), &HashMap::new()).is_err());
    }
}
