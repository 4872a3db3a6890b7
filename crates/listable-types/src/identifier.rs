//! Typed identity keys.
//!
//! An [`Identifier<T>`] tells the diff engine that two values from different
//! render passes are "the same row", independently of whether their contents
//! are equal. Identifiers are scoped to a content type: an `Identifier<A>`
//! and an `Identifier<B>` wrapping the same value never compare equal once
//! erased to [`AnyIdentifier`].

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The raw value wrapped by an identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdentifierValue {
    Int(i64),
    Str(String),
    Uuid(Uuid),
}

impl fmt::Display for IdentifierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Uuid(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for IdentifierValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for IdentifierValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for IdentifierValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<i64> for IdentifierValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for IdentifierValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for IdentifierValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Uuid> for IdentifierValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

/// A key identifying one value of type `T` across render passes.
pub struct Identifier<T: ?Sized> {
    value: IdentifierValue,
    _scope: PhantomData<fn() -> T>,
}

impl<T: ?Sized> Identifier<T> {
    pub fn new(value: impl Into<IdentifierValue>) -> Self {
        Self {
            value: value.into(),
            _scope: PhantomData,
        }
    }

    /// A fresh identifier that will not collide with any other.
    pub fn unique() -> Self {
        Self::new(Uuid::now_v7())
    }

    pub fn value(&self) -> &IdentifierValue {
        &self.value
    }
}

impl<T: ?Sized + 'static> Identifier<T> {
    /// Erase the scope type, keeping it as a runtime tag.
    pub fn erase(&self) -> AnyIdentifier {
        AnyIdentifier {
            scope: TypeId::of::<T>(),
            scope_name: short_type_name(std::any::type_name::<T>()),
            value: self.value.clone(),
        }
    }
}

impl<T: ?Sized> Clone for Identifier<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T: ?Sized> PartialEq for Identifier<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: ?Sized> Eq for Identifier<T> {}

impl<T: ?Sized> Hash for Identifier<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for Identifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Identifier<{}>({})",
            short_type_name(std::any::type_name::<T>()),
            self.value
        )
    }
}

impl<T: ?Sized> fmt::Display for Identifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A type-erased identifier.
///
/// Two `AnyIdentifier`s are equal iff they were erased from the same scope
/// type and wrap the same value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AnyIdentifier {
    scope: TypeId,
    scope_name: &'static str,
    value: IdentifierValue,
}

impl AnyIdentifier {
    pub fn value(&self) -> &IdentifierValue {
        &self.value
    }

    /// Short name of the scope type, for diagnostics.
    pub fn scope_name(&self) -> &'static str {
        self.scope_name
    }

    /// Returns `true` if this identifier was erased from an `Identifier<T>`.
    pub fn is_scoped_to<T: ?Sized + 'static>(&self) -> bool {
        self.scope == TypeId::of::<T>()
    }
}

impl fmt::Debug for AnyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyIdentifier<{}>({})", self.scope_name, self.value)
    }
}

impl fmt::Display for AnyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope_name, self.value)
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    // Generic arguments contain `::` too; only strip the leading path.
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
