//! # Ordered Multi-Value Fields
//!
//! Phones and e-mails are kept in a [`FieldList`]: an ordered sequence with no
//! duplicate values. Users address entries by 1-based position, by value, or as
//! first/last. The 1-based to 0-based conversion happens here and nowhere else.
//!
//! ## Selecting an entry
//!
//! A [`Selector`] is resolved from the loose parameter set the command surface
//! offers (`cur_value`, `idx`, `first`, `last`) with a fixed priority:
//!
//! ```text
//! value > idx > first > last
//! ```
//!
//! If none is given the caller must report "specify the target".
//!
//! ## Placing a new entry
//!
//! [`Placement`] follows the same idea for inserts: an explicit position wins
//! over "to the beginning", which wins over the default append.
//!
//! Every check (duplicate value, bounds, presence) runs before the vector is
//! touched, so a failed call leaves the list exactly as it was.

use crate::error::{Result, RolodexError};
use crate::fields::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Value(String),
    /// 1-based position.
    Index(usize),
    First,
    Last,
}

impl Selector {
    /// Picks the highest-priority usable selector, `None` if nothing was given.
    pub fn from_params(
        cur_value: Option<&str>,
        idx: Option<usize>,
        first: bool,
        last: bool,
    ) -> Option<Self> {
        if let Some(value) = cur_value.filter(|v| !v.is_empty()) {
            Some(Selector::Value(value.to_string()))
        } else if let Some(idx) = idx {
            Some(Selector::Index(idx))
        } else if first {
            Some(Selector::First)
        } else if last {
            Some(Selector::Last)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// 1-based position; `len + 1` appends.
    At(usize),
    Beginning,
    #[default]
    End,
}

impl Placement {
    pub fn from_params(idx: Option<usize>, to_beginning: bool) -> Self {
        match idx {
            Some(idx) => Placement::At(idx),
            None if to_beginning => Placement::Beginning,
            None => Placement::End,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Remove,
    Edit,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Remove => "removed",
            Action::Edit => "edited",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldList<T: Field> {
    items: Vec<T>,
}

impl<T: Field> Default for FieldList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Field> FieldList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn values(&self) -> Vec<&str> {
        self.items.iter().map(|f| f.value()).collect()
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.items.iter().any(|f| f.value() == value)
    }

    fn ensure_unique(&self, item: &T) -> Result<()> {
        if self.contains_value(item.value()) {
            return Err(RolodexError::duplicate(format!(
                "{} '{}' is already present.",
                T::KIND.title(),
                item.value()
            )));
        }
        Ok(())
    }

    /// Inserts a new, unique entry.
    pub fn insert(&mut self, item: T, placement: Placement) -> Result<()> {
        self.ensure_unique(&item)?;
        let position = match placement {
            Placement::At(idx) => {
                let len = self.items.len();
                if idx == 0 || idx > len + 1 {
                    return Err(RolodexError::out_of_range(format!(
                        "Provided index '{}' is out of range. Possible: 1-{}.",
                        idx,
                        len + 1
                    )));
                }
                idx - 1
            }
            Placement::Beginning => 0,
            Placement::End => self.items.len(),
        };
        self.items.insert(position, item);
        Ok(())
    }

    /// Removes the selected entry and returns it.
    pub fn remove(&mut self, selector: &Selector) -> Result<T> {
        let position = self.resolve(selector, Action::Remove)?;
        Ok(self.items.remove(position))
    }

    /// Replaces the selected entry with `item`, returning the old one.
    ///
    /// `item` must not duplicate any current entry, including the one being
    /// replaced.
    pub fn replace(&mut self, item: T, selector: &Selector) -> Result<T> {
        self.ensure_unique(&item)?;
        let position = self.resolve(selector, Action::Edit)?;
        Ok(std::mem::replace(&mut self.items[position], item))
    }

    fn resolve(&self, selector: &Selector, action: Action) -> Result<usize> {
        let kind = T::KIND.label();
        match selector {
            Selector::Value(value) => self
                .items
                .iter()
                .position(|f| f.value() == value)
                .ok_or_else(|| {
                    RolodexError::not_found(format!(
                        "{} '{}' cannot be {}: it is not in the list.",
                        T::KIND.title(),
                        value,
                        action.verb()
                    ))
                }),
            Selector::Index(idx) => {
                if *idx == 0 || *idx > self.items.len() {
                    Err(RolodexError::out_of_range(format!(
                        "Provided index '{}' is out of range. Possible: 1-{}.",
                        idx,
                        self.items.len()
                    )))
                } else {
                    Ok(idx - 1)
                }
            }
            Selector::First if !self.items.is_empty() => Ok(0),
            Selector::Last if !self.items.is_empty() => Ok(self.items.len() - 1),
            Selector::First => Err(RolodexError::out_of_range(format!(
                "First {} can't be {}: the list is empty.",
                kind,
                action.verb()
            ))),
            Selector::Last => Err(RolodexError::out_of_range(format!(
                "Last {} can't be {}: the list is empty.",
                kind,
                action.verb()
            ))),
        }
    }
}

impl<'a, T: Field> IntoIterator for &'a FieldList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
