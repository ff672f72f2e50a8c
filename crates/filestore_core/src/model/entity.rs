//! Entity and identifier traits.
//!
//! # Responsibility
//! - Bind a record type to its identifier type and its store file stem.
//! - Define what a "blank" identifier means per identifier type.
//!
//! # Invariants
//! - `Entity::ENTITY_NAME` is stable across releases; it names the store file.
//! - Structural equality (`PartialEq`) and identifier equality are distinct:
//!   upsert uses the former, lookups use the latter.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use uuid::Uuid;

/// Identifier value carried by an entity.
///
/// Two precondition levels:
/// - `is_missing`: no value at all. Lookups by such an id are rejected.
/// - `is_blank`: missing or empty. `save` refuses entities with a blank id,
///   while lookups by an empty id run normally.
pub trait Identifier: PartialEq + Debug {
    fn is_blank(&self) -> bool;

    fn is_missing(&self) -> bool {
        false
    }
}

impl Identifier for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Identifier for Uuid {
    fn is_blank(&self) -> bool {
        self.is_nil()
    }
}

/// Identifiers not assigned yet are modelled as `None`.
impl<I: Identifier> Identifier for Option<I> {
    fn is_blank(&self) -> bool {
        match self {
            Some(inner) => inner.is_blank(),
            None => true,
        }
    }

    // Why: `Some("")` is a present value; only an absent id is missing.
    fn is_missing(&self) -> bool {
        self.is_none()
    }
}

macro_rules! never_blank_identifier {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identifier for $ty {
                fn is_blank(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_blank_identifier!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// Record type persisted by a `RecordStore`.
///
/// # Contract
/// - `ENTITY_NAME` is the file stem of the backing `<name>.json` file.
/// - `id` returns the one designated identifier field.
/// - `PartialEq` must compare every field; `save` relies on it to decide
///   between replace-in-place and append.
pub trait Entity: Serialize + DeserializeOwned + Clone + PartialEq {
    type Id: Identifier;

    const ENTITY_NAME: &'static str;

    fn id(&self) -> &Self::Id;

    /// Returns whether this instance may be written.
    fn has_identifier(&self) -> bool {
        !self.id().is_blank()
    }
}
