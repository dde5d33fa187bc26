//! # Stored Book Format
//!
//! A saved book is a gzip-compressed JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "owner": "alice",
//!   "records": [
//!     { "name": "Ada", "phones": ["5551234"], "emails": [], "birthday": "10/12" }
//!   ]
//! }
//! ```
//!
//! Records keep their book order. Decoding never trusts the document: every record
//! is rebuilt through the same validating constructors used for user input, so a
//! damaged or hand-edited file fails with [`RolodexError::Corrupted`] instead of
//! producing a record that breaks its own invariants. The default page size is a
//! session setting and is not stored.

use crate::book::AddressBook;
use crate::diagnostics::Diagnostics;
use crate::error::{Result, RolodexError};
use crate::fields::Field;
use crate::list::Placement;
use crate::record::Record;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct BookSnapshot {
    version: u32,
    owner: String,
    records: Vec<StoredRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    name: String,
    #[serde(default)]
    phones: Vec<String>,
    #[serde(default)]
    emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl From<&Record> for StoredRecord {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name().to_string(),
            phones: record.phones().iter().map(|p| p.value().to_string()).collect(),
            emails: record.emails().iter().map(|e| e.value().to_string()).collect(),
            birthday: record.birthday().map(|b| b.value().to_string()),
            address: record.address().map(|a| a.value().to_string()),
        }
    }
}

impl StoredRecord {
    fn into_record(self) -> Result<Record> {
        // Remarks were shown when the values were first entered.
        let mut diag = Diagnostics::new();
        let mut record = Record::new(&self.name)?;
        for phone in &self.phones {
            record.add_phone(phone, Placement::End, &mut diag)?;
        }
        for email in &self.emails {
            record.add_email(email, Placement::End, &mut diag)?;
        }
        if let Some(birthday) = &self.birthday {
            record.edit_birthday(birthday, &mut diag)?;
        }
        if let Some(address) = &self.address {
            record.edit_address(address, &mut diag)?;
        }
        Ok(record)
    }
}

pub fn encode(book: &AddressBook) -> Result<Vec<u8>> {
    let snapshot = BookSnapshot {
        version: SNAPSHOT_VERSION,
        owner: book.owner().to_string(),
        records: book.records().map(StoredRecord::from).collect(),
    };
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    serde_json::to_writer(&mut encoder, &snapshot)?;
    let bytes = encoder.finish()?;
    debug!(owner = %book.owner(), records = book.len(), bytes = bytes.len(), "book encoded");
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<AddressBook> {
    let snapshot: BookSnapshot = serde_json::from_reader(GzDecoder::new(bytes))
        .map_err(|e| rejected(RolodexError::from(e)))?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(rejected(RolodexError::Corrupted(format!(
            "unsupported format version {}",
            snapshot.version
        ))));
    }

    let records = snapshot
        .records
        .into_iter()
        .map(StoredRecord::into_record)
        .collect::<Result<Vec<_>>>()
        .map_err(rejected)?;
    let book = AddressBook::from_records(&snapshot.owner, records).map_err(rejected)?;
    debug!(owner = %book.owner(), records = book.len(), "book decoded");
    Ok(book)
}

fn rejected(err: RolodexError) -> RolodexError {
    let err = match err {
        RolodexError::Corrupted(_) => err,
        other => RolodexError::Corrupted(other.to_string()),
    };
    warn!(error = %err, "stored book rejected");
    err
}
