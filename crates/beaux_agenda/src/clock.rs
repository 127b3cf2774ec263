// --- File: crates/beaux_agenda/src/clock.rs ---
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Zone used when neither the branch nor the session names one.
pub const DEFAULT_TIME_ZONE: Tz = Tz::America__Bogota;

/// Source of the current instant.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Parses an IANA zone name, falling back to Bogotá.
pub fn resolve_time_zone(zona_horaria: Option<&str>) -> Tz {
    match zona_horaria.map(str::trim).filter(|z| !z.is_empty()) {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Unknown time zone '{}', using {}", name, DEFAULT_TIME_ZONE);
            DEFAULT_TIME_ZONE
        }),
        None => DEFAULT_TIME_ZONE,
    }
}

/// Calendar day it currently is in the given zone.
pub fn today_in(clock: &dyn Clock, zona_horaria: Option<&str>) -> NaiveDate {
    clock
        .now_utc()
        .with_timezone(&resolve_time_zone(zona_horaria))
        .date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_today_depends_on_zone() {
        let mut clock = MockClock::new();
        // 03:30 UTC is still the previous evening in Bogotá (UTC-5).
        clock
            .expect_now_utc()
            .returning(|| Utc.with_ymd_and_hms(2025, 3, 11, 3, 30, 0).unwrap());

        assert_eq!(
            today_in(&clock, None),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert_eq!(
            today_in(&clock, Some("Europe/Madrid")),
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
        );
        assert_eq!(
            today_in(&clock, Some("Mars/Olympus")),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_resolve_time_zone() {
        assert_eq!(resolve_time_zone(Some(" America/Guayaquil ")), Tz::America__Guayaquil);
        assert_eq!(resolve_time_zone(Some("")), DEFAULT_TIME_ZONE);
    }
}
