//! Record trait: identity + continuity across state changes.

/// Record marker + minimal interface.
///
/// Every persisted portal record exposes a strongly-typed identifier so that
/// storage and lookup code can stay generic over the record kind.
pub trait Record {
    /// Strongly-typed record identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the record identifier.
    fn id(&self) -> &Self::Id;
}
