//! Populated books for tests.

use crate::book::AddressBook;
use crate::diagnostics::Diagnostics;
use crate::record::Record;

pub struct BookFixture {
    pub book: AddressBook,
}

impl Default for BookFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl BookFixture {
    pub fn new() -> Self {
        Self {
            book: AddressBook::default(),
        }
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.book.add_record(record, &mut Diagnostics::new());
        self
    }

    pub fn with_contact(self, name: &str, phone: &str) -> Self {
        let record = Record::build(name, Some(phone), None, None, None, &mut Diagnostics::new())
            .unwrap();
        self.with_record(record)
    }

    pub fn with_email_only(self, name: &str, email: &str) -> Self {
        let record = Record::build(name, None, Some(email), None, None, &mut Diagnostics::new())
            .unwrap();
        self.with_record(record)
    }

    /// `contact1..=contactN`, each with a distinct phone.
    pub fn with_contacts(mut self, count: usize) -> Self {
        for i in 1..=count {
            self = self.with_contact(&format!("contact{}", i), &format!("5550{:03}", i));
        }
        self
    }

    /// Five contacts sharing name prefixes, phones and birthdays:
    ///
    /// | name | phone | e-mail | birthday | address |
    /// |------|-------|--------|----------|---------|
    /// | tu | 684721 | ns@i.f | 08/09 | |
    /// | tu1 | 684721787 | n@ks.jk | 07/10 | |
    /// | tu2 | 6847 | nd@sn.v | 12/11 | Baker St 221b |
    /// | tu4 | 6847842197 | mck@ds.jc | 11/01 | |
    /// | tu5 | 6847842197 | mck@ds.jc | 08/09 | |
    pub fn with_sample_contacts(mut self) -> Self {
        let rows = [
            ("tu", "684721", "ns@i.f", "08/09", None),
            ("tu1", "684721787", "n@ks.jk", "07/10", None),
            ("tu2", "6847", "nd@sn.v", "12/11", Some("Baker St 221b")),
            ("tu4", "6847842197", "mck@ds.jc", "11/01", None),
            ("tu5", "6847842197", "mck@ds.jc", "08/09", None),
        ];
        for (name, phone, email, birthday, address) in rows {
            let record = Record::build(
                name,
                Some(phone),
                Some(email),
                Some(birthday),
                address,
                &mut Diagnostics::new(),
            )
            .unwrap();
            self = self.with_record(record);
        }
        self
    }
}
