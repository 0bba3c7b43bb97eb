//! Widget identity and type-name hashing.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique widget identifier.
///
/// Ids are handed out from a monotonic counter when a [`WidgetNode`] is
/// constructed and are never reused, so a stale id simply stops resolving
/// once its widget is destroyed.
///
/// [`WidgetNode`]: crate::widget::WidgetNode
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    pub(crate) fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Widget#{}", self.0)
    }
}

/// Hash of a widget type name, used as the [`WidgetRegistry`] key.
///
/// [`WidgetRegistry`]: crate::registry::WidgetRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeNameHash(u64);

impl TypeNameHash {
    /// FNV-1a over the UTF-8 bytes of `name`.
    pub const fn new(name: &str) -> Self {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;

        let bytes = name.as_bytes();
        let mut hash = FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<&str> for TypeNameHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_ids_are_monotonic() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_type_name_hash() {
        assert_eq!(TypeNameHash::new("Button"), TypeNameHash::from("Button"));
        assert_ne!(TypeNameHash::new("Button"), TypeNameHash::new("Label"));
        // FNV-1a of the empty string is the offset basis.
        assert_eq!(TypeNameHash::new("").as_u64(), 0xcbf29ce484222325);
    }
}
