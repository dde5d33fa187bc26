//! # Change Commands
//!
//! A [`Change`] describes one edit to one contact. It is built by a client (the
//! CLI, a test, anything) and handed to
//! [`AddressBook::edit_record`](crate::book::AddressBook::edit_record), which
//! consumes it.
//!
//! The eleven kinds form a closed enum, so dispatch is an exhaustive `match`.
//! List edits carry the loose parameter set a user can type (value, index,
//! first/last); they are turned into a [`Selector`] or [`Placement`] at dispatch
//! time, with the usual priority rules (see [`crate::list`]).

use crate::error::{Result, RolodexError};
use crate::fields::FieldKind;
use crate::list::{Placement, Selector};

/// Parameters for adding a phone or e-mail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddValue {
    pub new_value: String,
    /// 1-based position; wins over `add_to_beginning`.
    pub idx: Option<usize>,
    pub add_to_beginning: bool,
}

impl AddValue {
    pub fn new(new_value: impl Into<String>) -> Self {
        Self {
            new_value: new_value.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, idx: usize) -> Self {
        self.idx = Some(idx);
        self
    }

    pub fn to_beginning(mut self) -> Self {
        self.add_to_beginning = true;
        self
    }

    pub fn placement(&self) -> Placement {
        Placement::from_params(self.idx, self.add_to_beginning)
    }
}

/// Which existing entry to act on. Priority: value > idx > first > last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub cur_value: Option<String>,
    pub idx: Option<usize>,
    pub first: bool,
    pub last: bool,
}

impl Target {
    pub fn by_value(value: impl Into<String>) -> Self {
        Self {
            cur_value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn at(idx: usize) -> Self {
        Self {
            idx: Some(idx),
            ..Default::default()
        }
    }

    pub fn first() -> Self {
        Self {
            first: true,
            ..Default::default()
        }
    }

    pub fn last() -> Self {
        Self {
            last: true,
            ..Default::default()
        }
    }

    pub fn selector(&self, kind: FieldKind, purpose: &str) -> Result<Selector> {
        Selector::from_params(self.cur_value.as_deref(), self.idx, self.first, self.last)
            .ok_or_else(|| {
                RolodexError::validation(format!(
                    "Please specify the {} which has to be {}.",
                    kind.label(),
                    purpose
                ))
            })
    }
}

/// Parameters for replacing a phone or e-mail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditValue {
    pub new_value: String,
    pub target: Target,
}

impl EditValue {
    pub fn new(new_value: impl Into<String>, target: Target) -> Self {
        Self {
            new_value: new_value.into(),
            target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    EditName { new_name: String },
    EditPhone(EditValue),
    EditEmail(EditValue),
    AddPhone(AddValue),
    AddEmail(AddValue),
    RemovePhone(Target),
    RemoveEmail(Target),
    EditBirthday { new_birthday: String },
    RemoveBirthday,
    EditAddress { new_address: String },
    RemoveAddress,
}

impl ChangeKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ChangeKind::EditName { .. } => "edit name",
            ChangeKind::EditPhone(_) => "edit phone",
            ChangeKind::EditEmail(_) => "edit e-mail",
            ChangeKind::AddPhone(_) => "add phone",
            ChangeKind::AddEmail(_) => "add e-mail",
            ChangeKind::RemovePhone(_) => "remove phone",
            ChangeKind::RemoveEmail(_) => "remove e-mail",
            ChangeKind::EditBirthday { .. } => "edit birthday",
            ChangeKind::RemoveBirthday => "remove birthday",
            ChangeKind::EditAddress { .. } => "edit address",
            ChangeKind::RemoveAddress => "remove address",
        }
    }
}

/// One requested edit to the record named `target_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub target_name: String,
    pub kind: ChangeKind,
}

impl Change {
    pub fn new(target_name: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            target_name: target_name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_value_placement() {
        assert_eq!(AddValue::new("1").placement(), Placement::End);
        assert_eq!(
            AddValue::new("1").to_beginning().placement(),
            Placement::Beginning
        );
        assert_eq!(
            AddValue::new("1").to_beginning().at(3).placement(),
            Placement::At(3)
        );
    }

    #[test]
    fn test_target_without_selector_is_validation_error() {
        let err = Target::default()
            .selector(FieldKind::Phone, "removed")
            .unwrap_err();
        assert!(matches!(err, RolodexError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Please specify the phone which has to be removed."
        );
    }

    #[test]
    fn test_target_priority() {
        let target = Target {
            cur_value: Some("x".into()),
            idx: Some(2),
            first: true,
            last: true,
        };
        assert_eq!(
            target.selector(FieldKind::Email, "edited").unwrap(),
            Selector::Value("x".into())
        );
        assert_eq!(
            Target::last().selector(FieldKind::Email, "edited").unwrap(),
            Selector::Last
        );
    }
}
