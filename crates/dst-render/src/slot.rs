//! Slot values and their classification.
//!
//! A template alternates literal fragments with slots. What a slot *does* is
//! decided by its variant: a plain value, a section opening, a section
//! closing, or an accessor evaluated against the current frame.
//!
//! Untyped input can go through [`Slot::from_value`], which reads the shape
//! of a JSON value the way object-literal templates do: `{"rows": rows}`
//! opens a section driven by `rows`, `{}` closes one.

use serde_json::Value;

use crate::accessor::Accessor;

/// The value controlling a section's repetition.
#[derive(Debug, Clone)]
pub enum Driver {
    /// Used as-is.
    Value(Value),
    /// Evaluated against the scope enclosing the section.
    Accessor(Accessor),
}

impl From<Value> for Driver {
    fn from(value: Value) -> Self {
        Driver::Value(value)
    }
}

impl From<Accessor> for Driver {
    fn from(accessor: Accessor) -> Self {
        Driver::Accessor(accessor)
    }
}

/// A substitution point between two literal fragments.
#[derive(Debug, Clone)]
pub enum Slot {
    /// Rendered by stringifying the value.
    Direct(Value),
    /// Opens a section.
    Start(Driver),
    /// Closes the innermost open section.
    End,
    /// Evaluated against the current frame.
    Accessor(Accessor),
}

/// The role a slot plays, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Direct,
    SectionStart,
    SectionEnd,
    Accessor,
}

impl SlotKind {
    /// Whether the slot is a section boundary.
    pub fn is_marker(self) -> bool {
        matches!(self, SlotKind::SectionStart | SlotKind::SectionEnd)
    }
}

/// Classifies a slot.
pub fn classify(slot: &Slot) -> SlotKind {
    slot.kind()
}

impl Slot {
    /// A section opening driven by a literal value or an accessor.
    pub fn section(driver: impl Into<Driver>) -> Self {
        Slot::Start(driver.into())
    }

    /// A section closing.
    pub fn end() -> Self {
        Slot::End
    }

    /// A plain value.
    pub fn direct(value: impl Into<Value>) -> Self {
        Slot::Direct(value.into())
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Direct(_) => SlotKind::Direct,
            Slot::Start(_) => SlotKind::SectionStart,
            Slot::End => SlotKind::SectionEnd,
            Slot::Accessor(_) => SlotKind::Accessor,
        }
    }

    /// Builds a slot from the shape of a JSON value.
    ///
    /// - An object with a single non-null value opens a section driven by
    ///   that value. The driver's truthiness does not matter here, so
    ///   `{"n": 0}` still opens a section (one that renders nothing).
    /// - An empty object, or one whose only value is null, closes a section.
    /// - Anything else, including objects with several keys, is direct.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) if map.len() <= 1 => match map.into_iter().next() {
                Some((_, Value::Null)) | None => Slot::End,
                Some((_, driver)) => Slot::Start(Driver::Value(driver)),
            },
            other => Slot::Direct(other),
        }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::from_value(value)
    }
}

impl From<Accessor> for Slot {
    fn from(accessor: Accessor) -> Self {
        Slot::Accessor(accessor)
    }
}

impl From<&str> for Slot {
    fn from(text: &str) -> Self {
        Slot::Direct(Value::from(text))
    }
}

impl From<String> for Slot {
    fn from(text: String) -> Self {
        Slot::Direct(Value::from(text))
    }
}

impl From<i64> for Slot {
    fn from(n: i64) -> Self {
        Slot::Direct(Value::from(n))
    }
}

impl From<bool> for Slot {
    fn from(b: bool) -> Self {
        Slot::Direct(Value::from(b))
    }
}
