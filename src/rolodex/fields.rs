//! # Field Types
//!
//! Every piece of contact data is a typed, validated scalar. Construction goes
//! through [`Field::parse`], which either returns a valid value or a
//! [`RolodexError::Validation`]; there is no way to hold an unchecked field.
//!
//! | Kind | Accepts | Warns | Normalizes |
//! |------|---------|-------|------------|
//! | [`Name`] | any non-empty text | - | - |
//! | [`Phone`] | `digits` or `+digits` | digit count outside 3..=15 | - |
//! | [`Email`] | any non-empty text | not `local@domain.tld` | - |
//! | [`Birthday`] | `day/month[/anything]` | - | zero-padded `dd/mm` |
//! | [`Address`] | any non-empty text | - | - |
//!
//! E-mail is deliberately permissive: a malformed address is stored and only
//! reported through [`Diagnostics`].
//!
//! February always allows 29 days, whatever the year; see
//! [`crate::record::Record::days_to_birthday`] for how such a birthday is counted
//! in non-leap years.

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::{Result, RolodexError};
use std::fmt;

const MIN_PHONE_DIGITS: usize = 3;
const MAX_PHONE_DIGITS: usize = 15;

/// Days per month, February fixed at 29.
const MAX_DAYS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Birthday,
    Address,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Phone => "phone",
            FieldKind::Email => "e-mail",
            FieldKind::Birthday => "birthday",
            FieldKind::Address => "address",
        }
    }

    /// Label with the first letter upper-cased, for sentence starts.
    pub fn title(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated contact value.
pub trait Field: Sized + Clone + fmt::Debug + PartialEq {
    const KIND: FieldKind;

    /// Validates `raw` and builds the field. Non-fatal remarks go to `diag`.
    fn parse(raw: &str, diag: &mut Diagnostics) -> Result<Self>;

    /// The stored (normalized) value.
    fn value(&self) -> &str;

    /// Re-validates and replaces the value. On error `self` is left untouched.
    fn set_value(&mut self, raw: &str, diag: &mut Diagnostics) -> Result<()> {
        *self = Self::parse(raw, diag)?;
        Ok(())
    }
}

fn require_non_empty(kind: FieldKind, raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Err(RolodexError::validation(format!(
            "The {} cannot be empty.",
            kind.label()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Field for Name {
    const KIND: FieldKind = FieldKind::Name;

    fn parse(raw: &str, _diag: &mut Diagnostics) -> Result<Self> {
        require_non_empty(Self::KIND, raw)?;
        Ok(Self(raw.to_string()))
    }

    fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Field for Address {
    const KIND: FieldKind = FieldKind::Address;

    fn parse(raw: &str, _diag: &mut Diagnostics) -> Result<Self> {
        require_non_empty(Self::KIND, raw)?;
        Ok(Self(raw.to_string()))
    }

    fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Field for Phone {
    const KIND: FieldKind = FieldKind::Phone;

    fn parse(raw: &str, diag: &mut Diagnostics) -> Result<Self> {
        let digits = raw.strip_prefix('+').unwrap_or(raw);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(RolodexError::validation(format!(
                "The value '{}' is not a valid telephone number. Please, provide another value.",
                raw
            )));
        }
        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
            diag.warn(
                WarningKind::PhoneLength,
                format!("the phone number '{}' is potentially malformed.", raw),
            );
        }
        Ok(Self(raw.to_string()))
    }

    fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Exactly one `@`, and exactly one `.` in the domain part.
    pub fn is_well_formed(raw: &str) -> bool {
        let parts: Vec<&str> = raw.split('@').collect();
        parts.len() == 2 && parts[1].split('.').count() == 2
    }
}

impl Field for Email {
    const KIND: FieldKind = FieldKind::Email;

    fn parse(raw: &str, diag: &mut Diagnostics) -> Result<Self> {
        require_non_empty(Self::KIND, raw)?;
        if !Self::is_well_formed(raw) {
            diag.warn(
                WarningKind::MalformedEmail,
                format!("the email '{}' is malformed.", raw),
            );
        }
        Ok(Self(raw.to_string()))
    }

    fn value(&self) -> &str {
        &self.0
    }
}

/// Day and month of a birthday, stored as `dd/mm`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Birthday {
    value: String,
    day: u32,
    month: u32,
}

impl Birthday {
    pub fn from_day_month(day: u32, month: u32) -> Result<Self> {
        let max = month
            .checked_sub(1)
            .and_then(|m| MAX_DAYS.get(m as usize))
            .copied()
            .ok_or_else(|| invalid_birthday(&format!("{}/{}", day, month)))?;
        if day == 0 || day > max {
            return Err(invalid_birthday(&format!("{}/{}", day, month)));
        }
        Ok(Self {
            value: format!("{:02}/{:02}", day, month),
            day,
            month,
        })
    }

    /// Validates `raw` and returns its canonical `dd/mm` form.
    pub fn normalize(raw: &str) -> Result<String> {
        let mut parts = raw.split('/');
        let (day, month) = match (parts.next(), parts.next()) {
            (Some(day), Some(month)) => (parse_number(raw, day)?, parse_number(raw, month)?),
            _ => return Err(invalid_birthday(raw)),
        };
        Self::from_day_month(day, month)
            .map(|b| b.value)
            .map_err(|_| invalid_birthday(raw))
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

fn parse_number(raw: &str, part: &str) -> Result<u32> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid_birthday(raw));
    }
    part.parse::<u32>().map_err(|_| invalid_birthday(raw))
}

fn invalid_birthday(raw: &str) -> RolodexError {
    RolodexError::validation(format!(
        "The value '{}' is not a valid birthday value. Please, provide another value in the format 'day/month'.",
        raw
    ))
}

impl Field for Birthday {
    const KIND: FieldKind = FieldKind::Birthday;

    fn parse(raw: &str, _diag: &mut Diagnostics) -> Result<Self> {
        let normalized = Self::normalize(raw)?;
        // normalize() already validated both numbers
        let (day, month) = normalized
            .split_once('/')
            .and_then(|(d, m)| Some((d.parse().ok()?, m.parse().ok()?)))
            .ok_or_else(|| invalid_birthday(raw))?;
        Ok(Self {
            value: normalized,
            day,
            month,
        })
    }

    fn value(&self) -> &str {
        &self.value
    }
}

macro_rules! display_value {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.value())
                }
            }
        )*
    };
}

display_value!(Name, Phone, Email, Birthday, Address);

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<F: Field>(raw: &str) -> (Result<F>, Diagnostics) {
        let mut diag = Diagnostics::new();
        let res = F::parse(raw, &mut diag);
        (res, diag)
    }

    #[test]
    fn test_phone_accepts_plus_prefix() {
        let (phone, diag) = parse::<Phone>("+36785295720958");
        assert_eq!(phone.unwrap().value(), "+36785295720958");
        assert!(diag.is_empty());
    }

    #[test]
    fn test_phone_rejects_letters() {
        let (phone, _) = parse::<Phone>("12a3");
        assert!(matches!(phone, Err(RolodexError::Validation(_))));
    }

    #[test]
    fn test_phone_rejects_bare_plus_and_empty() {
        assert!(parse::<Phone>("+").0.is_err());
        assert!(parse::<Phone>("").0.is_err());
        assert!(parse::<Phone>("++123").0.is_err());
    }

    #[test]
    fn test_short_phone_is_accepted_with_warning() {
        let (phone, diag) = parse::<Phone>("12");
        assert_eq!(phone.unwrap().value(), "12");
        assert!(diag.has(WarningKind::PhoneLength));
    }

    #[test]
    fn test_long_phone_is_accepted_with_warning() {
        let (phone, diag) = parse::<Phone>("+1234567890123456");
        assert!(phone.is_ok());
        assert!(diag.has(WarningKind::PhoneLength));
    }

    #[test]
    fn test_email_well_formed() {
        let (email, diag) = parse::<Email>("shf_4uh@d.re");
        assert_eq!(email.unwrap().value(), "shf_4uh@d.re");
        assert!(diag.is_empty());
    }

    #[test]
    fn test_malformed_email_is_stored_anyway() {
        for raw in ["jhfsew@kjfjg", "a@b.c.d", "no-at-sign.com", "a@b@c.d"] {
            let (email, diag) = parse::<Email>(raw);
            assert_eq!(email.unwrap().value(), raw);
            assert!(diag.has(WarningKind::MalformedEmail), "{}", raw);
        }
    }

    #[test]
    fn test_empty_email_rejected() {
        assert!(matches!(
            parse::<Email>("").0,
            Err(RolodexError::Validation(_))
        ));
    }

    #[test]
    fn test_birthday_normalization() {
        assert_eq!(Birthday::normalize("5/7").unwrap(), "05/07");
        assert_eq!(Birthday::normalize("000024/0001/54").unwrap(), "24/01");
        assert_eq!(Birthday::normalize("0008/9").unwrap(), "08/09");
        assert_eq!(Birthday::normalize("13/2").unwrap(), "13/02");
    }

    #[test]
    fn test_birthday_month_table() {
        assert!(Birthday::normalize("29/2").is_ok());
        assert!(Birthday::normalize("30/2").is_err());
        assert!(Birthday::normalize("31/4").is_err());
        assert!(Birthday::normalize("30/4").is_ok());
        assert!(Birthday::normalize("31/12").is_ok());
    }

    #[test]
    fn test_birthday_rejects_garbage() {
        for raw in ["", "5", "0/5", "5/0", "5/13", "a/5", "5/b", "-1/5", "/5", "99999999999/1"] {
            assert!(Birthday::normalize(raw).is_err(), "{}", raw);
        }
    }

    #[test]
    fn test_birthday_keeps_day_and_month() {
        let (birthday, _) = parse::<Birthday>("7/10/1990");
        let birthday = birthday.unwrap();
        assert_eq!(birthday.value(), "07/10");
        assert_eq!((birthday.day(), birthday.month()), (7, 10));
    }

    #[test]
    fn test_set_value_revalidates_and_keeps_old_on_error() {
        let mut diag = Diagnostics::new();
        let mut phone = Phone::parse("689573", &mut diag).unwrap();
        phone.set_value("76544321", &mut diag).unwrap();
        assert_eq!(phone.value(), "76544321");

        assert!(phone.set_value("not a phone", &mut diag).is_err());
        assert_eq!(phone.value(), "76544321");
    }

    #[test]
    fn test_name_and_address_non_empty() {
        assert!(parse::<Name>("").0.is_err());
        assert!(parse::<Address>("").0.is_err());
        assert_eq!(parse::<Address>("1 Main St").0.unwrap().value(), "1 Main St");
    }

    #[test]
    fn test_kind_title() {
        assert_eq!(FieldKind::Email.title(), "E-mail");
        assert_eq!(FieldKind::Phone.to_string(), "phone");
    }
}
