//! # Lookups
//!
//! Read-only queries over an [`AddressBook`]. Every lookup fails with
//! [`RolodexError::NotFound`] when the book is empty or nothing matches, so an
//! `Ok` result is never empty.
//!
//! Exact lookups compare stored values verbatim, except birthdays: the query is
//! normalized with the same rules as stored birthdays (`5/7` finds `05/07`).
//! Substring search is case-sensitive and scans the attributes picked by a
//! [`SearchFields`] flag string.
//!
//! Results come back as records in book order. [`AddressBook::find_paged`] wraps
//! them in a [`PagedView`].

use crate::book::{missing_name, AddressBook};
use crate::error::{Result, RolodexError};
use crate::fields::{Birthday, Field};
use crate::paging::PagedView;
use crate::record::{today, Record};
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Which attributes a substring search scans.
///
/// Parsed from flag characters: `n` name, `p` phones, `e` e-mails, `b` birthday,
/// `a` address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub name: bool,
    pub phone: bool,
    pub email: bool,
    pub birthday: bool,
    pub address: bool,
}

impl SearchFields {
    pub const DEFAULT_FLAGS: &'static str = "np";

    pub fn parse(flags: &str) -> Result<Self> {
        let mut fields = Self {
            name: false,
            phone: false,
            email: false,
            birthday: false,
            address: false,
        };
        for flag in flags.chars() {
            match flag {
                'n' => fields.name = true,
                'p' => fields.phone = true,
                'e' => fields.email = true,
                'b' => fields.birthday = true,
                'a' => fields.address = true,
                other => {
                    return Err(RolodexError::validation(format!(
                        "Unknown search field '{}': expected any of 'n', 'p', 'e', 'b', 'a'.",
                        other
                    )))
                }
            }
        }
        if fields.flags().is_empty() {
            return Err(RolodexError::validation(
                "At least one search field has to be given.",
            ));
        }
        Ok(fields)
    }

    /// Canonical flag string, in `npeba` order.
    pub fn flags(&self) -> String {
        [
            (self.name, 'n'),
            (self.phone, 'p'),
            (self.email, 'e'),
            (self.birthday, 'b'),
            (self.address, 'a'),
        ]
        .into_iter()
        .filter_map(|(on, flag)| on.then_some(flag))
        .collect()
    }

    fn matches(&self, record: &Record, needle: &str) -> bool {
        (self.name && record.name().contains(needle))
            || (self.birthday
                && record
                    .birthday()
                    .is_some_and(|b| b.value().contains(needle)))
            || (self.address && record.address().is_some_and(|a| a.value().contains(needle)))
            || (self.phone && record.phones().iter().any(|p| p.value().contains(needle)))
            || (self.email && record.emails().iter().any(|e| e.value().contains(needle)))
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            name: true,
            phone: true,
            email: false,
            birthday: false,
            address: false,
        }
    }
}

impl FromStr for SearchFields {
    type Err = RolodexError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SearchFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flags())
    }
}

/// A lookup request, as built by clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Name(String),
    Phone(String),
    Email(String),
    Birthday(String),
    DaysTillBirthday(i64),
    Address(String),
    Substring { text: String, fields: SearchFields },
}

/// Parses the textual day count taken by the days-till-birthday lookup.
pub fn parse_days(raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        RolodexError::validation(format!(
            "The given parameter '{}' for the number of days is not a valid integer number.",
            raw
        ))
    })
}

impl AddressBook {
    fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(RolodexError::not_found("The address book is empty."));
        }
        Ok(())
    }

    fn collect_matching<F>(&self, matches: F, what: String) -> Result<Vec<&Record>>
    where
        F: Fn(&Record) -> bool,
    {
        self.ensure_not_empty()?;
        let found: Vec<&Record> = self.records().filter(|&record| matches(record)).collect();
        if found.is_empty() {
            return Err(RolodexError::not_found(format!(
                "No record with {} in the address book.",
                what
            )));
        }
        Ok(found)
    }

    pub fn get_by_name(&self, name: &str) -> Result<&Record> {
        self.ensure_not_empty()?;
        self.get(name).ok_or_else(|| missing_name(name))
    }

    pub fn get_by_phone(&self, phone: &str) -> Result<Vec<&Record>> {
        self.collect_matching(
            |r| r.phones().contains_value(phone),
            format!("the phone number '{}'", phone),
        )
    }

    pub fn get_by_email(&self, email: &str) -> Result<Vec<&Record>> {
        self.collect_matching(
            |r| r.emails().contains_value(email),
            format!("the e-mail '{}'", email),
        )
    }

    /// `birthday` is normalized first, so malformed input fails `Validation`.
    pub fn get_by_birthday(&self, birthday: &str) -> Result<Vec<&Record>> {
        self.ensure_not_empty()?;
        let wanted = Birthday::normalize(birthday)?;
        self.collect_matching(
            |r| r.birthday().is_some_and(|b| b.value() == wanted),
            format!("the birthday date '{}'", wanted),
        )
    }

    /// Contacts whose birthday falls exactly `days` days from today.
    pub fn get_by_days_till_birthday(&self, days: i64) -> Result<Vec<&Record>> {
        self.get_by_days_till_birthday_on(today(), days)
    }

    pub fn get_by_days_till_birthday_on(&self, today: NaiveDate, days: i64) -> Result<Vec<&Record>> {
        let target = Duration::try_days(days)
            .and_then(|delta| today.checked_add_signed(delta))
            .ok_or_else(|| {
                RolodexError::validation(format!(
                    "The number of days '{}' is out of the supported date range.",
                    days
                ))
            })?;
        self.get_by_birthday(&format!("{}/{}", target.day(), target.month()))
    }

    pub fn get_by_address(&self, address: &str) -> Result<Vec<&Record>> {
        self.collect_matching(
            |r| r.address().is_some_and(|a| a.value() == address),
            format!("the address '{}'", address),
        )
    }

    pub fn get_by_substring(&self, substring: &str, fields: SearchFields) -> Result<Vec<&Record>> {
        self.collect_matching(
            |r| fields.matches(r, substring),
            format!(
                "the substring '{}' within the fields '{}'",
                substring, fields
            ),
        )
    }

    pub fn find(&self, query: &Query) -> Result<Vec<&Record>> {
        self.find_on(today(), query)
    }

    pub fn find_on(&self, today: NaiveDate, query: &Query) -> Result<Vec<&Record>> {
        match query {
            Query::Name(name) => self.get_by_name(name).map(|r| vec![r]),
            Query::Phone(phone) => self.get_by_phone(phone),
            Query::Email(email) => self.get_by_email(email),
            Query::Birthday(birthday) => self.get_by_birthday(birthday),
            Query::DaysTillBirthday(days) => self.get_by_days_till_birthday_on(today, *days),
            Query::Address(address) => self.get_by_address(address),
            Query::Substring { text, fields } => self.get_by_substring(text, *fields),
        }
    }

    /// Runs `query` and pages over the matches.
    pub fn find_paged(&self, query: &Query, page_size: Option<usize>) -> Result<PagedView<'_>> {
        let found = self.find(query)?;
        PagedView::new(found, page_size.or(self.page_size()))
    }
}
