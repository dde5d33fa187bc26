//! # Contact Records
//!
//! A [`Record`] is one contact: a mandatory [`Name`], ordered lists of phones and
//! e-mails, and optional birthday and address.
//!
//! ## Editing modalities
//!
//! | Field | Add | Edit | Remove |
//! |-------|-----|------|--------|
//! | phones / e-mails | [`Placement`] (index, beginning, end) | [`Selector`] + new value | [`Selector`] |
//! | birthday / address | - | set, or overwrite with a warning | clear |
//! | name | - | only through the address book (it is the key) | - |
//!
//! Every mutator validates its input, checks uniqueness and resolves positions
//! before touching the record. Warnings are merged into the caller's
//! [`Diagnostics`] only once the edit has gone through.
//!
//! ## Days to birthday
//!
//! The next occurrence is this year when the birthday's `(month, day)` is on or
//! after today, next year otherwise. A 29/02 birthday falling in a non-leap year
//! is celebrated on 1 March.

use crate::diagnostics::{Diagnostics, Warning, WarningKind};
use crate::error::{Result, RolodexError};
use crate::fields::{Address, Birthday, Email, Field, Name, Phone};
use crate::list::{FieldList, Placement, Selector};
use crate::render::render_table;
use chrono::{Datelike, Local, NaiveDate};

pub const NO_BIRTHDAY: &str = "no birthday information";

/// Today's date in local time, time of day dropped.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: Name,
    phones: FieldList<Phone>,
    emails: FieldList<Email>,
    birthday: Option<Birthday>,
    address: Option<Address>,
}

impl Record {
    pub fn new(name: &str) -> Result<Self> {
        let name = Name::parse(name, &mut Diagnostics::new())?;
        Ok(Self {
            name,
            phones: FieldList::new(),
            emails: FieldList::new(),
            birthday: None,
            address: None,
        })
    }

    /// Builds a record with optional initial values. Empty strings count as absent.
    pub fn build(
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        birthday: Option<&str>,
        address: Option<&str>,
        diag: &mut Diagnostics,
    ) -> Result<Self> {
        let mut record = Self::new(name)?;
        if let Some(phone) = present(phone) {
            record.add_phone(phone, Placement::End, diag)?;
        }
        if let Some(email) = present(email) {
            record.add_email(email, Placement::End, diag)?;
        }
        if let Some(birthday) = present(birthday) {
            record.edit_birthday(birthday, diag)?;
        }
        if let Some(address) = present(address) {
            record.edit_address(address, diag)?;
        }
        Ok(record)
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn phones(&self) -> &FieldList<Phone> {
        &self.phones
    }

    pub fn emails(&self) -> &FieldList<Email> {
        &self.emails
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub(crate) fn rename(&mut self, name: Name) {
        self.name = name;
    }

    // --- Multi-valued fields ---

    pub fn add_phone(&mut self, raw: &str, at: Placement, diag: &mut Diagnostics) -> Result<()> {
        add_to(&mut self.phones, raw, at, diag)
    }

    pub fn add_email(&mut self, raw: &str, at: Placement, diag: &mut Diagnostics) -> Result<()> {
        add_to(&mut self.emails, raw, at, diag)
    }

    pub fn remove_phone(&mut self, target: &Selector) -> Result<Phone> {
        self.phones.remove(target)
    }

    pub fn remove_email(&mut self, target: &Selector) -> Result<Email> {
        self.emails.remove(target)
    }

    pub fn edit_phone(
        &mut self,
        raw: &str,
        target: &Selector,
        diag: &mut Diagnostics,
    ) -> Result<Phone> {
        edit_in(&mut self.phones, raw, target, diag)
    }

    pub fn edit_email(
        &mut self,
        raw: &str,
        target: &Selector,
        diag: &mut Diagnostics,
    ) -> Result<Email> {
        edit_in(&mut self.emails, raw, target, diag)
    }

    // --- Single-valued fields ---

    pub fn edit_birthday(&mut self, raw: &str, diag: &mut Diagnostics) -> Result<()> {
        let new = Birthday::parse(raw, diag)?;
        let (value, warning) = replace_single(self.birthday.as_ref(), new);
        if let Some(warning) = warning {
            diag.push(warning);
        }
        self.birthday = Some(value);
        Ok(())
    }

    pub fn edit_address(&mut self, raw: &str, diag: &mut Diagnostics) -> Result<()> {
        let new = Address::parse(raw, diag)?;
        let (value, warning) = replace_single(self.address.as_ref(), new);
        if let Some(warning) = warning {
            diag.push(warning);
        }
        self.address = Some(value);
        Ok(())
    }

    pub fn remove_birthday(&mut self) -> Option<Birthday> {
        self.birthday.take()
    }

    pub fn remove_address(&mut self) -> Option<Address> {
        self.address.take()
    }

    // --- Derived views ---

    /// Days until the next birthday, counted from `today`. `None` without a birthday.
    pub fn days_to_birthday(&self, today: NaiveDate) -> Result<Option<i64>> {
        let Some(birthday) = &self.birthday else {
            return Ok(None);
        };
        let (day, month) = (birthday.day(), birthday.month());
        let year = if (month, day) >= (today.month(), today.day()) {
            today.year()
        } else {
            today.year() + 1
        };

        let date = match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => date,
            None if (day, month) == (29, 2) => NaiveDate::from_ymd_opt(year, 3, 1)
                .ok_or_else(|| self.birthday_problem())?,
            None => return Err(self.birthday_problem()),
        };
        Ok(Some((date - today).num_days()))
    }

    fn birthday_problem(&self) -> RolodexError {
        RolodexError::validation(format!(
            "Unknown problem with the birthday date ('{}') of the contact '{}', days till birthday cannot be calculated.",
            self.birthday.as_ref().map(|b| b.value()).unwrap_or_default(),
            self.name()
        ))
    }

    /// `dd/mm (N days till birthday)`, or `None` without a birthday.
    pub fn birthday_info(&self, today: NaiveDate) -> Result<Option<String>> {
        let Some(birthday) = &self.birthday else {
            return Ok(None);
        };
        Ok(self.days_to_birthday(today)?.map(|days| {
            let unit = if days == 1 { "day" } else { "days" };
            format!("{} ({} {} till birthday)", birthday, days, unit)
        }))
    }

    pub fn render_summary(&self) -> Result<String> {
        self.render_summary_on(today())
    }

    pub fn render_summary_on(&self, today: NaiveDate) -> Result<String> {
        let rows = [
            ("NAME", self.name().to_string()),
            (
                "BIRTHDAY",
                self.birthday_info(today)?
                    .unwrap_or_else(|| NO_BIRTHDAY.to_string()),
            ),
            ("PHONE(S)", numbered(&self.phones.values())),
            ("EMAIL(S)", numbered(&self.emails.values())),
            (
                "ADDRESS",
                self.address
                    .as_ref()
                    .map(|a| a.value().to_string())
                    .unwrap_or_default(),
            ),
        ];
        Ok(format!("CONTACT INFO\n{}", render_table(&rows)))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// One value as-is, several as a 1-based numbered list.
pub fn numbered(values: &[&str]) -> String {
    match values {
        [single] => single.to_string(),
        _ => values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{}. {}", i + 1, v))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Overwrite rule for single-valued fields: the new value always wins, with a
/// warning when something was already there.
pub fn replace_single<T: Field>(current: Option<&T>, new: T) -> (T, Option<Warning>) {
    let warning = current.map(|old| {
        Warning::new(
            WarningKind::FieldOverwritten,
            format!(
                "you are overwriting existing {} info. Old info: '{}', new info: '{}'.",
                T::KIND.label(),
                old.value(),
                new.value()
            ),
        )
    });
    (new, warning)
}

fn add_to<T: Field>(
    list: &mut FieldList<T>,
    raw: &str,
    at: Placement,
    diag: &mut Diagnostics,
) -> Result<()> {
    let mut local = Diagnostics::new();
    let item = T::parse(raw, &mut local)?;
    list.insert(item, at)?;
    diag.extend(local);
    Ok(())
}

fn edit_in<T: Field>(
    list: &mut FieldList<T>,
    raw: &str,
    target: &Selector,
    diag: &mut Diagnostics,
) -> Result<T> {
    let mut local = Diagnostics::new();
    let item = T::parse(raw, &mut local)?;
    let old = list.replace(item, target)?;
    diag.extend(local);
    Ok(old)
}
