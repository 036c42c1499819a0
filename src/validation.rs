//! Reservation and contact form validation
//!
//! Pure functions from a submitted payload to the list of violations found.
//! Every rule runs independently; an empty list means the payload is valid.

use chrono::{Days, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

// ============================================================================
// Payloads
// ============================================================================

/// Reservation form as submitted. Fields are raw form strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationRequest {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    #[serde(alias = "guestCount")]
    pub guests: String,
    pub notes: Option<String>,
}

/// Contact form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

// ============================================================================
// Violations
// ============================================================================

/// One failed rule. The display text is shown to the customer verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("Name is required")]
    NameRequired,

    #[error("Phone is required")]
    PhoneRequired,

    #[error("Date is required")]
    DateRequired,

    #[error("Time is required")]
    TimeRequired,

    #[error("Number of guests is required")]
    GuestsRequired,

    #[error("Please enter a valid Indonesian phone number")]
    InvalidPhone,

    #[error(
        "Please select a time during business hours ({} - {})",
        format_hhmm(.open),
        format_hhmm(.close)
    )]
    OutsideBusinessHours { open: u32, close: u32 },

    #[error("Please select a valid date (YYYY-MM-DD)")]
    InvalidDate,

    #[error("Please select a date between {earliest} and {latest}")]
    DateOutOfWindow { earliest: NaiveDate, latest: NaiveDate },

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Message is required")]
    MessageRequired,
}

// ============================================================================
// Business hours
// ============================================================================

/// Accepted reservation window, minutes since midnight, both ends inclusive.
///
/// Serialized as `"HH:MM"` strings in config files. Deserialization
/// rejects a window that closes before it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBusinessHours")]
pub struct BusinessHours {
    #[serde(serialize_with = "hhmm::serialize")]
    pub open: u32,
    #[serde(serialize_with = "hhmm::serialize")]
    pub close: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("business hours open at {} but close at {}", format_hhmm(.open), format_hhmm(.close))]
pub struct InvertedHours {
    pub open: u32,
    pub close: u32,
}

#[derive(Deserialize)]
struct RawBusinessHours {
    #[serde(deserialize_with = "hhmm::deserialize")]
    open: u32,
    #[serde(deserialize_with = "hhmm::deserialize")]
    close: u32,
}

impl TryFrom<RawBusinessHours> for BusinessHours {
    type Error = InvertedHours;

    fn try_from(raw: RawBusinessHours) -> Result<Self, Self::Error> {
        Self::new(raw.open, raw.close)
    }
}

impl Default for BusinessHours {
    /// 07:00 - 22:00
    fn default() -> Self {
        Self {
            open: 7 * 60,
            close: 22 * 60,
        }
    }
}

impl BusinessHours {
    /// `open` and `close` in minutes since midnight; `open <= close`
    pub fn new(open: u32, close: u32) -> Result<Self, InvertedHours> {
        if open > close {
            return Err(InvertedHours { open, close });
        }
        Ok(Self { open, close })
    }

    #[inline]
    pub fn contains(&self, minutes: u32) -> bool {
        (self.open..=self.close).contains(&minutes)
    }
}

/// Parse `"HH:MM"` (optionally `"HH:MM:SS"`) into minutes since midnight.
/// Seconds are dropped.
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let value = value.trim();
    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()?;
    Some(time.hour() * 60 + time.minute())
}

/// Minutes since midnight → `"HH:MM"`
pub fn format_hhmm(minutes: &u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

mod hhmm {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(minutes: &u32, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_hhmm(minutes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_hhmm(&raw)
            .ok_or_else(|| D::Error::custom(format!("expected HH:MM, got '{}'", raw)))
    }
}

// ============================================================================
// Rules
// ============================================================================

const PHONE_PREFIXES: [&str; 3] = ["+62", "62", "0"];
const PHONE_MIN_DIGITS: usize = 9;
const PHONE_MAX_DIGITS: usize = 13;

#[inline]
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Local phone pattern: whitespace removed, then `+62` | `62` | `0`
/// followed by 9-13 ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_PREFIXES.iter().any(|prefix| {
        compact.strip_prefix(prefix).is_some_and(|rest| {
            (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&rest.len())
                && rest.bytes().all(|b| b.is_ascii_digit())
        })
    })
}

/// Validate a reservation against the default 07:00 - 22:00 window.
pub fn validate_reservation(req: &ReservationRequest) -> Vec<Violation> {
    validate_reservation_with(req, &BusinessHours::default())
}

/// Validate a reservation against the given business hours.
///
/// # Rules (all evaluated, in this order)
/// 1. name non-blank
/// 2. phone non-blank
/// 3. date present
/// 4. time present
/// 5. guests present and not zero
/// 6. phone (when given) matches the local pattern
/// 7. time (when given) parses as `HH:MM` and lies inside `hours`
pub fn validate_reservation_with(req: &ReservationRequest, hours: &BusinessHours) -> Vec<Violation> {
    let mut violations = Vec::new();

    if is_blank(&req.name) {
        violations.push(Violation::NameRequired);
    }
    if is_blank(&req.phone) {
        violations.push(Violation::PhoneRequired);
    }
    if is_blank(&req.date) {
        violations.push(Violation::DateRequired);
    }
    if is_blank(&req.time) {
        violations.push(Violation::TimeRequired);
    }
    if is_blank(&req.guests) || req.guests.trim().parse::<u32>() == Ok(0) {
        violations.push(Violation::GuestsRequired);
    }

    // A whitespace-only phone reports both "required" and "invalid"
    if !req.phone.is_empty() && !is_valid_phone(&req.phone) {
        violations.push(Violation::InvalidPhone);
    }

    if !is_blank(&req.time) {
        let within = parse_hhmm(&req.time).is_some_and(|minutes| hours.contains(minutes));
        if !within {
            violations.push(Violation::OutsideBusinessHours {
                open: hours.open,
                close: hours.close,
            });
        }
    }

    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "reservation rejected");
    }
    violations
}

/// Check that `date` (`YYYY-MM-DD`) lies in `[today, today + window_days]`.
pub fn validate_booking_date(
    date: &str,
    today: NaiveDate,
    window_days: u32,
) -> Result<NaiveDate, Violation> {
    let parsed =
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| Violation::InvalidDate)?;
    let latest = today
        .checked_add_days(Days::new(window_days.into()))
        .unwrap_or(NaiveDate::MAX);
    if parsed < today || parsed > latest {
        return Err(Violation::DateOutOfWindow {
            earliest: today,
            latest,
        });
    }
    Ok(parsed)
}

/// Validate a contact message: name, email and message are required and
/// the email needs a local part and a dotted domain.
pub fn validate_contact(req: &ContactRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if is_blank(&req.name) {
        violations.push(Violation::NameRequired);
    }
    if is_blank(&req.email) {
        violations.push(Violation::EmailRequired);
    } else if !is_plausible_email(req.email.trim()) {
        violations.push(Violation::InvalidEmail);
    }
    if is_blank(&req.message) {
        violations.push(Violation::MessageRequired);
    }

    violations
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ReservationRequest {
        ReservationRequest {
            name: "Budi".to_string(),
            phone: "08123456789".to_string(),
            date: "2024-01-01".to_string(),
            time: "10:00".to_string(),
            guests: "2".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_valid_request_has_no_violations() {
        assert!(validate_reservation(&valid_request()).is_empty());
    }

    #[test]
    fn test_empty_name_only() {
        let req = ReservationRequest {
            name: "".to_string(),
            ..valid_request()
        };
        assert_eq!(validate_reservation(&req), vec![Violation::NameRequired]);
    }

    #[test]
    fn test_whitespace_name_is_blank() {
        let req = ReservationRequest {
            name: "   ".to_string(),
            ..valid_request()
        };
        assert_eq!(validate_reservation(&req), vec![Violation::NameRequired]);
    }

    #[test]
    fn test_time_after_close() {
        let req = ReservationRequest {
            time: "23:00".to_string(),
            ..valid_request()
        };
        let violations = validate_reservation(&req);
        assert_eq!(
            violations,
            vec![Violation::OutsideBusinessHours {
                open: 420,
                close: 1320
            }]
        );
        assert_eq!(
            violations[0].to_string(),
            "Please select a time during business hours (07:00 - 22:00)"
        );
    }

    #[test]
    fn test_business_hours_inclusive_bounds() {
        for (time, ok) in [
            ("06:59", false),
            ("07:00", true),
            ("22:00", true),
            ("22:01", false),
        ] {
            let req = ReservationRequest {
                time: time.to_string(),
                ..valid_request()
            };
            assert_eq!(validate_reservation(&req).is_empty(), ok, "time {}", time);
        }
    }

    #[test]
    fn test_unparseable_time_is_outside_hours() {
        let req = ReservationRequest {
            time: "noon".to_string(),
            ..valid_request()
        };
        assert!(matches!(
            validate_reservation(&req).as_slice(),
            [Violation::OutsideBusinessHours { .. }]
        ));
    }

    #[test]
    fn test_short_phone_invalid() {
        let req = ReservationRequest {
            phone: "12345".to_string(),
            ..valid_request()
        };
        assert_eq!(validate_reservation(&req), vec![Violation::InvalidPhone]);
    }

    #[test]
    fn test_phone_patterns() {
        assert!(is_valid_phone("08123456789"));
        assert!(is_valid_phone("+628123456789"));
        assert!(is_valid_phone("628123456789"));
        assert!(is_valid_phone("0812 3456 789"));
        assert!(is_valid_phone("0123456789")); // 0 + 9 digits
        assert!(is_valid_phone("01234567890123")); // 0 + 13 digits

        assert!(!is_valid_phone("012345678")); // 0 + 8 digits
        assert!(!is_valid_phone("012345678901234")); // 0 + 14 digits
        assert!(!is_valid_phone("+6512345678901")); // foreign prefix
        assert!(!is_valid_phone("0812-3456-789"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_missing_everything_collects_all() {
        let violations = validate_reservation(&ReservationRequest::default());
        assert_eq!(
            violations,
            vec![
                Violation::NameRequired,
                Violation::PhoneRequired,
                Violation::DateRequired,
                Violation::TimeRequired,
                Violation::GuestsRequired,
            ]
        );
    }

    #[test]
    fn test_whitespace_phone_reports_required_and_invalid() {
        let req = ReservationRequest {
            phone: "  ".to_string(),
            ..valid_request()
        };
        assert_eq!(
            validate_reservation(&req),
            vec![Violation::PhoneRequired, Violation::InvalidPhone]
        );
    }

    #[test]
    fn test_zero_guests_missing() {
        let req = ReservationRequest {
            guests: "0".to_string(),
            ..valid_request()
        };
        assert_eq!(validate_reservation(&req), vec![Violation::GuestsRequired]);
    }

    #[test]
    fn test_custom_business_hours() {
        let hours = BusinessHours {
            open: 10 * 60,
            close: 23 * 60 + 30,
        };
        let late = ReservationRequest {
            time: "23:00".to_string(),
            ..valid_request()
        };
        let early = ReservationRequest {
            time: "09:00".to_string(),
            ..valid_request()
        };
        assert!(validate_reservation_with(&late, &hours).is_empty());
        assert_eq!(validate_reservation_with(&early, &hours).len(), 1);
    }

    #[test]
    fn test_business_hours_from_yaml() {
        let hours: BusinessHours = serde_yaml::from_str("open: \"08:30\"\nclose: \"21:00\"\n").unwrap();
        assert_eq!(hours.open, 510);
        assert_eq!(hours.close, 1260);
        assert!(serde_yaml::from_str::<BusinessHours>("open: \"25:00\"\nclose: \"21:00\"\n").is_err());
    }

    #[test]
    fn test_business_hours_closing_before_opening_rejected() {
        let err = serde_yaml::from_str::<BusinessHours>("open: \"22:00\"\nclose: \"07:00\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("open at 22:00 but close at 07:00"));
        assert_eq!(
            BusinessHours::new(600, 540),
            Err(InvertedHours { open: 600, close: 540 })
        );
        // A single-minute window is still a window
        assert!(BusinessHours::new(600, 600).is_ok());
    }

    #[test]
    fn test_business_hours_round_trip_as_hhmm() {
        let yaml = serde_yaml::to_string(&BusinessHours::default()).unwrap();
        assert!(yaml.contains("07:00"));
        assert_eq!(
            serde_yaml::from_str::<BusinessHours>(&yaml).unwrap(),
            BusinessHours::default()
        );
    }

    #[test]
    fn test_time_with_seconds_accepted() {
        assert_eq!(parse_hhmm("10:00:00"), Some(600));
        assert_eq!(parse_hhmm("21:59:59"), Some(21 * 60 + 59));
        let req = ReservationRequest {
            time: "10:00:00".to_string(),
            ..valid_request()
        };
        assert!(validate_reservation(&req).is_empty());
        assert_eq!(parse_hhmm("10"), None);
    }

    #[test]
    fn test_guest_count_alias() {
        let req: ReservationRequest = serde_json::from_str(
            r#"{"name":"A","phone":"08123456789","date":"2024-01-01","time":"10:00","guestCount":"4"}"#,
        )
        .unwrap();
        assert_eq!(req.guests, "4");
        assert!(req.notes.is_none());
    }

    #[test]
    fn test_booking_window() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(validate_booking_date("2024-01-01", today, 7).is_ok());
        assert!(validate_booking_date("2024-01-08", today, 7).is_ok());
        assert_eq!(
            validate_booking_date("2024-01-09", today, 7),
            Err(Violation::DateOutOfWindow {
                earliest: today,
                latest: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            })
        );
        assert!(matches!(
            validate_booking_date("2023-12-31", today, 7),
            Err(Violation::DateOutOfWindow { .. })
        ));
        assert_eq!(
            validate_booking_date("01/02/2024", today, 7),
            Err(Violation::InvalidDate)
        );
    }

    #[test]
    fn test_booking_window_huge_does_not_overflow() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(validate_booking_date("2099-12-31", today, u32::MAX).is_ok());
        assert!(matches!(
            validate_booking_date("2023-12-31", today, u32::MAX),
            Err(Violation::DateOutOfWindow { latest, .. }) if latest == NaiveDate::MAX
        ));
    }

    #[test]
    fn test_contact_validation() {
        let ok = ContactRequest {
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            subject: "".to_string(),
            message: "Do you cater?".to_string(),
        };
        assert!(validate_contact(&ok).is_empty());

        let bad = ContactRequest {
            email: "sari-at-example".to_string(),
            message: " ".to_string(),
            ..ok
        };
        assert_eq!(
            validate_contact(&bad),
            vec![Violation::InvalidEmail, Violation::MessageRequired]
        );
        assert_eq!(
            validate_contact(&ContactRequest::default()),
            vec![
                Violation::NameRequired,
                Violation::EmailRequired,
                Violation::MessageRequired
            ]
        );
    }
}
