//! Append-only record arena.
//!
//! Every record of a loaded document lives in a [`Store`] and is addressed by
//! an [`Id`]. Ids are handed out by a counter owned by the store, so two
//! documents never interfere with each other, and an id is never reused.
//!
//! Ids render as `@#<n>`. No parameter name or value text may start with the
//! `@#` prefix, which lets the clause parser tell an id apart from literal
//! text by its shape alone (see [`Id::parse`]).

use std::fmt;

use thiserror::Error;

use crate::ast::{Clause, Parameter, Record, ValueRecord};

/// Prefix reserved for rendered ids.
pub const ID_PREFIX: &str = "@#";

/// Opaque handle of a record in a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u32);

impl Id {
    /// Recognises the rendered form of an id (`@#12`).
    ///
    /// Only the shape is checked; whether the store holds a record under the
    /// id is a separate question.
    ///
    /// ```
    /// use pcs_lang::store::Id;
    ///
    /// assert!(Id::parse("@#12").is_some());
    /// assert!(Id::parse("@#").is_none());
    /// assert!(Id::parse("KICKS").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Id> {
        let digits = text.trim().strip_prefix(ID_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Id)
    }

    /// Position of the slot in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, self.0)
    }
}

/// Errors raised by store lookups.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The id was never allocated, or its slot is still empty
    #[error("unknown id {0}")]
    UnknownId(Id),
}

#[derive(Debug, Clone, Default)]
struct Slot {
    record: Option<Record>,
    comment: Option<Id>,
}

/// Append-only table of records.
#[derive(Debug, Clone, Default)]
pub struct Store {
    slots: Vec<Slot>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a fresh slot and returns its id.
    pub fn allocate(&mut self) -> Id {
        let id = Id(self.slots.len() as u32);
        self.slots.push(Slot::default());
        id
    }

    /// Stores `record` under an id previously returned by [`Store::allocate`].
    pub fn put(&mut self, id: Id, record: Record) -> Result<(), StoreError> {
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or(StoreError::UnknownId(id))?;
        slot.record = Some(record);
        Ok(())
    }

    /// Allocates a slot and fills it in one step.
    pub fn insert(&mut self, record: Record) -> Id {
        let id = self.allocate();
        self.slots[id.index()].record = Some(record);
        id
    }

    pub fn get(&self, id: Id) -> Result<&Record, StoreError> {
        self.slots
            .get(id.index())
            .and_then(|slot| slot.record.as_ref())
            .ok_or(StoreError::UnknownId(id))
    }

    pub fn get_mut(&mut self, id: Id) -> Result<&mut Record, StoreError> {
        self.slots
            .get_mut(id.index())
            .and_then(|slot| slot.record.as_mut())
            .ok_or(StoreError::UnknownId(id))
    }

    /// Drops every slot from `len` on. Used to undo records inserted by a
    /// parse that failed, before any of their ids were handed out.
    pub fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    /// True when `id` names a filled slot.
    pub fn contains(&self, id: Id) -> bool {
        self.get(id).is_ok()
    }

    /// Number of allocated slots, filled or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Links a Comment record to the record stored under `id`.
    pub fn attach_comment(&mut self, id: Id, comment: Id) -> Result<(), StoreError> {
        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or(StoreError::UnknownId(id))?;
        slot.comment = Some(comment);
        Ok(())
    }

    pub fn comment_of(&self, id: Id) -> Option<Id> {
        self.slots.get(id.index()).and_then(|slot| slot.comment)
    }

    // Typed accessors

    pub fn parameter(&self, id: Id) -> Option<&Parameter> {
        match self.get(id) {
            Ok(Record::Parameter(param)) => Some(param),
            _ => None,
        }
    }

    pub fn clause(&self, id: Id) -> Option<&Clause> {
        match self.get(id) {
            Ok(Record::Clause(clause)) => Some(clause),
            _ => None,
        }
    }

    pub fn value(&self, id: Id) -> Option<&ValueRecord> {
        match self.get(id) {
            Ok(Record::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Iterates over filled slots in allocation order.
    pub fn records(&self) -> impl Iterator<Item = (Id, &Record)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.record.as_ref().map(|r| (Id(i as u32), r)))
    }
}
