//! Time helpers for OTP expiry and station operating hours.

use chrono::{DateTime, NaiveTime, Utc};

/// Check whether a timestamp has passed.
///
/// A missing expiry counts as expired: codes without a recorded
/// expiry must never validate.
pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expires_at {
        Some(expiry) => now > expiry,
        None => true,
    }
}

/// Check whether a time of day falls inside an open/close window.
///
/// When `close < open` the window wraps past midnight: the station is
/// open from `open` until midnight and again from midnight until
/// `close`. Equal bounds mean open around the clock.
pub fn is_within_window(open: NaiveTime, close: NaiveTime, now: NaiveTime) -> bool {
    if open == close {
        return true;
    }
    if open < close {
        open <= now && now <= close
    } else {
        now >= open || now <= close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn missing_expiry_is_expired() {
        assert!(is_expired(None, Utc::now()));
    }

    #[test]
    fn expiry_boundary() {
        let expiry = Utc::now();
        assert!(!is_expired(Some(expiry), expiry - Duration::seconds(1)));
        assert!(!is_expired(Some(expiry), expiry));
        assert!(is_expired(Some(expiry), expiry + Duration::seconds(1)));
    }

    #[test]
    fn normal_window() {
        let open = t(6, 0);
        let close = t(22, 0);
        assert!(is_within_window(open, close, t(6, 0)));
        assert!(is_within_window(open, close, t(10, 0)));
        assert!(is_within_window(open, close, t(22, 0)));
        assert!(!is_within_window(open, close, t(5, 59)));
        assert!(!is_within_window(open, close, t(23, 0)));
    }

    #[test]
    fn overnight_window_wraps_past_midnight() {
        let open = t(22, 0);
        let close = t(6, 0);
        assert!(is_within_window(open, close, t(23, 0)));
        assert!(is_within_window(open, close, t(0, 30)));
        assert!(is_within_window(open, close, t(5, 0)));
        assert!(!is_within_window(open, close, t(12, 0)));
        assert!(!is_within_window(open, close, t(21, 59)));
    }

    #[test]
    fn equal_bounds_mean_always_open() {
        let at = t(8, 0);
        assert!(is_within_window(at, at, t(3, 0)));
        assert!(is_within_window(at, at, t(8, 0)));
        assert!(is_within_window(at, at, t(20, 0)));
    }
}
