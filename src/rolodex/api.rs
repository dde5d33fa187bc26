//! # API Facade
//!
//! [`RolodexApi`] is the single entry point for every rolodex operation, whatever
//! the UI. It owns one session: the open [`AddressBook`] and the storage backend
//! it is saved to. There is no global state, so two sessions never interfere.
//!
//! The facade:
//! - **Dispatches** to the book, search and storage layers,
//! - **Converts warnings** from [`Diagnostics`] into `Warning`-level messages,
//! - **Returns structured types** (`Result<CmdResult>`).
//!
//! It never prints and never exits. Rendering records is done here only as far as
//! producing text pages (`CmdResult::pages`); deciding where they go is the
//! client's business.
//!
//! `RolodexApi<B: StorageBackend>` is generic over the backend:
//! - Production: `RolodexApi<FsBackend>`
//! - Testing: `RolodexApi<MemBackend>`

use crate::book::{AddressBook, EMPTY_BOOK};
use crate::change::Change;
use crate::diagnostics::Diagnostics;
use crate::error::{Result, RolodexError};
use crate::paging::PagedView;
use crate::record::{numbered, today, Record};
use crate::search::Query;
use crate::store::{self, StorageBackend};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A stored address book, as listed by [`RolodexApi::books`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBook {
    pub owner: String,
    /// The book open in this session.
    pub open: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created or changed by the command, as they are now.
    pub affected: Vec<Record>,
    /// Records returned by a lookup or listing.
    pub listed: Vec<Record>,
    /// Rendered listing, one entry per page.
    pub pages: Vec<String>,
    pub books: Vec<StoredBook>,
    pub messages: Vec<CmdMessage>,
    /// The open book now differs from what is stored for its owner.
    pub modified: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.add_message(message);
        self
    }

    pub fn with_affected(mut self, records: Vec<Record>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, records: Vec<Record>) -> Self {
        self.listed = records;
        self
    }

    pub fn with_pages(mut self, pages: Vec<String>) -> Self {
        self.pages = pages;
        self
    }

    /// Appends every warning as a `Warning` message.
    pub fn with_warnings(mut self, diag: Diagnostics) -> Self {
        for warning in diag {
            self.add_message(CmdMessage::warning(warning.to_string()));
        }
        self
    }

    pub fn with_books(mut self, books: Vec<StoredBook>) -> Self {
        self.books = books;
        self
    }

    pub fn modified(mut self) -> Self {
        self.modified = true;
        self
    }
}

pub struct RolodexApi<B: StorageBackend> {
    backend: B,
    book: AddressBook,
    default_owner: String,
}

impl<B: StorageBackend> RolodexApi<B> {
    /// Starts a session on an empty book owned by `default_owner`.
    pub fn new(backend: B, default_owner: &str) -> Result<Self> {
        Ok(Self {
            backend,
            book: AddressBook::new(default_owner)?,
            default_owner: default_owner.to_string(),
        })
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Default page size for listings of this session. Kept across loads.
    pub fn set_page_size(&mut self, page_size: Option<usize>) -> Result<()> {
        self.book.set_page_size(page_size)
    }

    // --- Profile & storage ---

    pub fn owner(&self) -> Result<CmdResult> {
        Ok(CmdResult::default().with_message(CmdMessage::info(self.book.owner())))
    }

    /// Renames the open book. Refused when another book is already stored
    /// under `owner`. The new name becomes the active owner.
    pub fn set_owner(&mut self, owner: &str) -> Result<CmdResult> {
        if owner != self.book.owner() {
            self.ensure_not_stored(owner)?;
        }
        self.book.set_owner(owner)?;
        self.backend.write_active(owner)?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "The username successfully changed to '{}'.",
                owner
            )))
            .modified())
    }

    /// Replaces the open book with an empty one and makes it the active owner.
    /// Refused when a book is already stored under that owner.
    pub fn new_profile(&mut self, owner: Option<&str>) -> Result<CmdResult> {
        let owner = owner.unwrap_or(&self.default_owner).to_string();
        self.ensure_not_stored(&owner)?;
        self.open_empty(&owner)?;
        self.backend.write_active(&owner)?;
        debug!(owner = %owner, "new profile");
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "New profile for the user '{}' successfully created.",
                owner
            )))
            .modified())
    }

    pub fn store(&self) -> Result<CmdResult> {
        store::save_book(&self.backend, &self.book)?;
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "The address book for the user '{}' was successfully stored.",
            self.book.owner()
        ))))
    }

    /// Replaces the open book with the stored one and makes it the active
    /// owner. `NotFound` if never stored.
    pub fn load(&mut self, owner: &str) -> Result<CmdResult> {
        self.open_stored(owner)?;
        self.backend.write_active(owner)?;
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Address book for the user '{}' successfully loaded.",
            owner
        ))))
    }

    /// Loads `owner`'s book, or starts an empty one if none was stored. The
    /// active owner is left alone.
    pub fn load_or_new(&mut self, owner: &str) -> Result<CmdResult> {
        match self.open_stored(owner) {
            Ok(()) => Ok(CmdResult::default()),
            Err(RolodexError::NotFound(_)) => {
                debug!(owner = %owner, "no stored book, starting empty");
                self.open_empty(owner)?;
                Ok(CmdResult::default().modified())
            }
            Err(e) => Err(e),
        }
    }

    /// Opens `owner`'s book, or the active owner's, or the default owner's.
    pub fn open(&mut self, owner: Option<&str>) -> Result<CmdResult> {
        let owner = match owner {
            Some(owner) => owner.to_string(),
            None => self
                .backend
                .read_active()?
                .unwrap_or_else(|| self.default_owner.clone()),
        };
        self.load_or_new(&owner)
    }

    /// Stored books known to the backend.
    pub fn list_books(&self) -> Result<Vec<String>> {
        self.backend.list_books()
    }

    pub fn books(&self) -> Result<CmdResult> {
        let books: Vec<StoredBook> = self
            .list_books()?
            .into_iter()
            .map(|owner| StoredBook {
                open: owner == self.book.owner(),
                owner,
            })
            .collect();
        if books.is_empty() {
            return Ok(CmdResult::default()
                .with_message(CmdMessage::info("No address books stored yet.")));
        }
        Ok(CmdResult::default().with_books(books))
    }

    fn open_stored(&mut self, owner: &str) -> Result<()> {
        let mut book = store::load_book(&self.backend, owner)?;
        book.set_page_size(self.book.page_size())?;
        self.book = book;
        Ok(())
    }

    fn open_empty(&mut self, owner: &str) -> Result<()> {
        let mut book = AddressBook::new(owner)?;
        book.set_page_size(self.book.page_size())?;
        self.book = book;
        Ok(())
    }

    fn ensure_not_stored(&self, owner: &str) -> Result<()> {
        if store::is_stored(&self.backend, owner)? {
            return Err(RolodexError::duplicate(format!(
                "An address book for the user '{}' is already stored.",
                owner
            )));
        }
        Ok(())
    }

    // --- Editing ---

    /// Adds a contact. Every value is validated before the book is touched; an
    /// existing contact of the same name is overwritten with a warning.
    pub fn add_contact(
        &mut self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        birthday: Option<&str>,
        address: Option<&str>,
    ) -> Result<CmdResult> {
        let mut diag = Diagnostics::new();
        let record = Record::build(name, phone, email, birthday, address, &mut diag)?;
        self.book.add_record(record.clone(), &mut diag);
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "New contact '{}' successfully added.",
                name
            )))
            .with_warnings(diag)
            .with_affected(vec![record])
            .modified())
    }

    pub fn edit(&mut self, change: Change) -> Result<CmdResult> {
        let mut diag = Diagnostics::new();
        let record = self.book.edit_record(change, &mut diag)?.clone();
        Ok(CmdResult::default()
            .with_message(CmdMessage::success("The record was successfully edited."))
            .with_warnings(diag)
            .with_affected(vec![record])
            .modified())
    }

    pub fn delete(&mut self, name: &str) -> Result<CmdResult> {
        let record = self.book.delete_record(name)?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "The record for the name '{}' was successfully deleted.",
                name
            )))
            .with_affected(vec![record])
            .modified())
    }

    // --- Per-contact views ---

    pub fn phones(&self, name: &str) -> Result<CmdResult> {
        let record = self.book.get_by_name(name)?;
        let text = if record.phones().is_empty() {
            format!("No phones stored for {}.", name)
        } else {
            numbered(&record.phones().values())
        };
        Ok(CmdResult::default().with_message(CmdMessage::info(text)))
    }

    pub fn emails(&self, name: &str) -> Result<CmdResult> {
        let record = self.book.get_by_name(name)?;
        let text = if record.emails().is_empty() {
            format!("No e-mails stored for {}.", name)
        } else {
            numbered(&record.emails().values())
        };
        Ok(CmdResult::default().with_message(CmdMessage::info(text)))
    }

    pub fn birthday(&self, name: &str) -> Result<CmdResult> {
        let record = self.book.get_by_name(name)?;
        let text = record
            .birthday_info(today())?
            .unwrap_or_else(|| format!("No birthday information stored for {}.", name));
        Ok(CmdResult::default().with_message(CmdMessage::info(text)))
    }

    // --- Listings ---

    /// Runs a lookup. Matches are rendered in pages of `page_size` (or the
    /// session default), a single page when neither is set.
    pub fn find(&self, query: &Query, page_size: Option<usize>) -> Result<CmdResult> {
        let view = self.book.find_paged(query, page_size)?;
        paged_result(view)
    }

    pub fn show_all(&self, page_size: Option<usize>) -> Result<CmdResult> {
        let view = self.book.iterate(page_size)?;
        if self.book.is_empty() {
            return Ok(CmdResult::default().with_message(CmdMessage::info(EMPTY_BOOK)));
        }
        paged_result(view)
    }
}

fn paged_result(view: PagedView<'_>) -> Result<CmdResult> {
    let listed = view.records().iter().map(|r| (*r).clone()).collect();
    let pages = view.map(|page| page.render()).collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed(listed).with_pages(pages))
}
