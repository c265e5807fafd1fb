//! Special object vocabulary.
//!
//! Special objects are the `@`-introduced builtin names (`@int`, `@str`, `@none`, ...). Like directives they form a
//! closed set: the lexer rejects `@` followed by an unknown name.
//!
//! ## Examples
//! ```rust
//! use cand_core::lang::special_objects::{self, SpecialObjectId};
//!
//! assert_eq!(special_objects::from_str("int"), Some(SpecialObjectId::Int));
//! assert_eq!(special_objects::as_str(SpecialObjectId::SelfObject), "self");
//! ```

use super::registry::Since;

/// Stable identifier for every special object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialObjectId {
    // Builtin types
    Int,
    Uint,
    Real,
    Bit,
    Octet,
    Str,

    // Meta objects
    None,
    Any,
    Type,
    Value,
    SelfObject,
}

/// Metadata for a special object.
#[derive(Debug, Clone, Copy)]
pub struct SpecialObjectInfo {
    pub id: SpecialObjectId,
    pub canonical: &'static str,
    pub is_type: bool,
    pub since: Since,
}

/// Registry of all special objects, ordered by [`SpecialObjectId`] ordinal.
pub const SPECIAL_OBJECTS: &[SpecialObjectInfo] = &[
    info(SpecialObjectId::Int, "int", true),
    info(SpecialObjectId::Uint, "uint", true),
    info(SpecialObjectId::Real, "real", true),
    info(SpecialObjectId::Bit, "bit", true),
    info(SpecialObjectId::Octet, "octet", true),
    info(SpecialObjectId::Str, "str", true),
    info(SpecialObjectId::None, "none", false),
    info(SpecialObjectId::Any, "any", false),
    info(SpecialObjectId::Type, "type", false),
    info(SpecialObjectId::Value, "value", false),
    info(SpecialObjectId::SelfObject, "self", false),
];

/// Canonical spelling (without the `@` marker).
pub fn as_str(id: SpecialObjectId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If [`SPECIAL_OBJECTS`] is out of ordinal order (this indicates a programming error).
pub fn info_for(id: SpecialObjectId) -> &'static SpecialObjectInfo {
    let info = &SPECIAL_OBJECTS[id as usize];
    assert_eq!(info.id, id, "INVARIANT: SPECIAL_OBJECTS is ordered by SpecialObjectId");
    info
}

/// Lookup by spelling (without the `@` marker).
pub fn from_str(s: &str) -> Option<SpecialObjectId> {
    SPECIAL_OBJECTS.iter().find(|o| o.canonical == s).map(|o| o.id)
}

const fn info(id: SpecialObjectId, canonical: &'static str, is_type: bool) -> SpecialObjectInfo {
    SpecialObjectInfo {
        id,
        canonical,
        is_type,
        since: Since(0, 1),
    }
}
