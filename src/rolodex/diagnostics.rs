//! Non-fatal warnings raised while editing.
//!
//! Some edits succeed but deserve a remark: overwriting an existing contact,
//! replacing a birthday that was already set, a phone number of unusual length,
//! an e-mail that does not look right. None of these abort the operation, and
//! none of them belong in the returned value either. Every mutating call takes a
//! `&mut Diagnostics` and pushes its remarks there; the API layer turns them into
//! `Warning`-level [`crate::api::CmdMessage`]s.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A record with the same name was replaced.
    RecordOverwritten,
    /// A single-valued field (birthday, address) already held a value.
    FieldOverwritten,
    /// Phone number digit count outside 3..=15.
    PhoneLength,
    /// E-mail stored although it does not look like `local@domain.tld`.
    MalformedEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WARNING: {}", self.message)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        tracing::debug!(kind = ?warning.kind, message = %warning.message, "warning raised");
        self.warnings.push(warning);
    }

    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        self.push(Warning::new(kind, message));
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }
}

impl IntoIterator for Diagnostics {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_in_order() {
        let mut diag = Diagnostics::new();
        diag.warn(WarningKind::PhoneLength, "first");
        diag.warn(WarningKind::MalformedEmail, "second");

        assert_eq!(diag.len(), 2);
        assert!(diag.has(WarningKind::MalformedEmail));
        assert!(!diag.has(WarningKind::RecordOverwritten));
        let messages: Vec<_> = diag.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_extend_merges() {
        let mut a = Diagnostics::new();
        a.warn(WarningKind::PhoneLength, "a");
        let mut b = Diagnostics::new();
        b.warn(WarningKind::FieldOverwritten, "b");

        a.extend(b);
        assert_eq!(a.into_vec().len(), 2);
    }

    #[test]
    fn test_display_prefix() {
        let w = Warning::new(WarningKind::PhoneLength, "odd number");
        assert_eq!(w.to_string(), "WARNING: odd number");
    }
}
