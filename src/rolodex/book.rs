//! # Address Book
//!
//! [`AddressBook`] is the keyed store of [`Record`]s, plus the owner's name and a
//! default page size for listings.
//!
//! ## Keys and ordering
//!
//! Records are keyed by their name, and the key always equals the record's name.
//! Iteration follows insertion order (an [`IndexMap`]):
//!
//! - overwriting an existing key keeps its position,
//! - deleting shifts later records up,
//! - renaming moves the record to the end, as a fresh insertion would.
//!
//! ## Editing
//!
//! [`AddressBook::edit_record`] takes a [`Change`], finds the target record and
//! dispatches on the change kind. Renames go through
//! [`AddressBook::edit_record_name`] since they re-key the store. Like every
//! mutator here, a failed edit leaves the book as it was.
//!
//! Lookups live in [`crate::search`].

use crate::change::{Change, ChangeKind};
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::{Result, RolodexError};
use crate::fields::{Field, FieldKind, Name};
use crate::paging::{render_records, validate_page_size, PagedView};
use crate::record::{today, Record};
use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::debug;

pub const DEFAULT_OWNER: &str = "defaultuser";
pub const EMPTY_BOOK: &str = "Address book is empty.";

#[derive(Debug, Clone, PartialEq)]
pub struct AddressBook {
    owner: String,
    records: IndexMap<String, Record>,
    page_size: Option<usize>,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            records: IndexMap::new(),
            page_size: None,
        }
    }
}

impl AddressBook {
    pub fn new(owner: &str) -> Result<Self> {
        let mut book = Self::default();
        book.set_owner(owner)?;
        Ok(book)
    }

    /// Rebuilds a book from stored records. Repeated names mean the data is corrupt.
    pub fn from_records(owner: &str, records: Vec<Record>) -> Result<Self> {
        let mut book = Self::new(owner)?;
        for record in records {
            let name = record.name().to_string();
            if book.records.insert(name.clone(), record).is_some() {
                return Err(RolodexError::Corrupted(format!(
                    "the contact '{}' is stored twice",
                    name
                )));
            }
        }
        Ok(book)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: &str) -> Result<()> {
        if owner.trim().is_empty() {
            return Err(RolodexError::validation("The user name cannot be empty."));
        }
        self.owner = owner.to_string();
        Ok(())
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: Option<usize>) -> Result<()> {
        self.page_size = validate_page_size(page_size)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Inserts `record`, replacing (with a warning) any record of the same name.
    /// Returns the replaced record.
    pub fn add_record(&mut self, record: Record, diag: &mut Diagnostics) -> Option<Record> {
        let name = record.name().to_string();
        let replaced = self.records.insert(name.clone(), record);
        if replaced.is_some() {
            diag.warn(
                WarningKind::RecordOverwritten,
                format!("the record for the contact '{}' gets overwritten.", name),
            );
        }
        debug!(contact = %name, overwritten = replaced.is_some(), "record added");
        replaced
    }

    pub fn delete_record(&mut self, name: &str) -> Result<Record> {
        let record = self.records.shift_remove(name).ok_or_else(|| {
            RolodexError::not_found(format!(
                "The record for the contact '{}' cannot be deleted: this name is not in the address book.",
                name
            ))
        })?;
        debug!(contact = %name, "record deleted");
        Ok(record)
    }

    /// Renames a record and re-keys it. An existing record under `new_name` is
    /// overwritten with a warning.
    pub fn edit_record_name(
        &mut self,
        old_name: &str,
        new_name: &str,
        diag: &mut Diagnostics,
    ) -> Result<&Record> {
        if !self.records.contains_key(old_name) {
            return Err(RolodexError::not_found(format!(
                "Cannot change the name of a record: the name '{}' is not in the address book.",
                old_name
            )));
        }
        let name = Name::parse(new_name, diag)?;
        if old_name != new_name {
            if let Some(mut record) = self.records.shift_remove(old_name) {
                record.rename(name);
                self.add_record(record, diag);
                debug!(from = %old_name, to = %new_name, "record renamed");
            }
        }
        self.get_by_name(new_name)
    }

    /// Applies `change` to its target record and returns the record as it is now
    /// (under its new key for renames).
    pub fn edit_record(&mut self, change: Change, diag: &mut Diagnostics) -> Result<&Record> {
        let Change { target_name, kind } = change;
        self.get_by_name(&target_name)?;
        debug!(contact = %target_name, change = kind.describe(), "applying change");

        let record = self
            .records
            .get_mut(&target_name)
            .ok_or_else(|| missing_name(&target_name))?;

        match kind {
            ChangeKind::EditName { new_name } => {
                return self.edit_record_name(&target_name, &new_name, diag);
            }
            ChangeKind::EditPhone(edit) => {
                let target = edit.target.selector(FieldKind::Phone, "edited")?;
                record.edit_phone(&edit.new_value, &target, diag)?;
            }
            ChangeKind::EditEmail(edit) => {
                let target = edit.target.selector(FieldKind::Email, "edited")?;
                record.edit_email(&edit.new_value, &target, diag)?;
            }
            ChangeKind::AddPhone(add) => {
                record.add_phone(&add.new_value, add.placement(), diag)?;
            }
            ChangeKind::AddEmail(add) => {
                record.add_email(&add.new_value, add.placement(), diag)?;
            }
            ChangeKind::RemovePhone(target) => {
                let target = target.selector(FieldKind::Phone, "removed")?;
                record.remove_phone(&target)?;
            }
            ChangeKind::RemoveEmail(target) => {
                let target = target.selector(FieldKind::Email, "removed")?;
                record.remove_email(&target)?;
            }
            ChangeKind::EditBirthday { new_birthday } => {
                record.edit_birthday(&new_birthday, diag)?;
            }
            ChangeKind::RemoveBirthday => {
                record.remove_birthday();
            }
            ChangeKind::EditAddress { new_address } => {
                record.edit_address(&new_address, diag)?;
            }
            ChangeKind::RemoveAddress => {
                record.remove_address();
            }
        }
        self.get_by_name(&target_name)
    }

    /// Pages over all records, using the book's page size when none is given.
    pub fn iterate(&self, page_size: Option<usize>) -> Result<PagedView<'_>> {
        PagedView::new(self.records().collect(), page_size.or(self.page_size))
    }

    pub fn render_all(&self) -> Result<String> {
        self.render_all_on(today())
    }

    pub fn render_all_on(&self, today: NaiveDate) -> Result<String> {
        if self.is_empty() {
            return Ok(EMPTY_BOOK.to_string());
        }
        let records: Vec<&Record> = self.records().collect();
        render_records(&records, 0, today)
    }
}

pub(crate) fn missing_name(name: &str) -> RolodexError {
    RolodexError::not_found(format!(
        "No record with the name '{}' in the address book.",
        name
    ))
}
