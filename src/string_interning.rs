use crate::settings::MINIMUM_STRING_TABLE_CAPACITY;
use rustc_hash::FxHashMap;

/// A unique identifier for an interned string, represented as a u32 for memory efficiency.
/// This provides type safety to prevent mixing string IDs with other integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringId(u32);

impl StringId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn resolve<'a>(self, table: &'a StringTable) -> &'a str {
        table.resolve(self)
    }
}

impl std::fmt::Display for StringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StringId({})", self.0)
    }
}

/// A centralized string interning system that stores unique strings only once in memory.
///
/// Dual-mapping: `Vec<Box<str>>` for O(1) ID→string resolution, and an `FxHashMap` for
/// O(1) string→ID lookup while interning identifiers, keywords and literal text.
#[derive(Debug, Clone)]
pub struct StringTable {
    strings: Vec<Box<str>>,
    string_to_id: FxHashMap<&'static str, StringId>,
    next_id: u32,
}

impl StringTable {
    pub fn new() -> Self {
        Self::with_capacity(MINIMUM_STRING_TABLE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next_id: 0,
            strings: Vec::with_capacity(capacity),
            string_to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn intern(&mut self, s: &str) -> StringId {
        if let Some(&existing_id) = self.string_to_id.get(s) {
            return existing_id;
        }

        self.intern_new(s)
    }

    #[cold]
    #[inline(never)]
    fn intern_new(&mut self, s: &str) -> StringId {
        let new_id = StringId(self.next_id);
        self.next_id += 1;

        let boxed: Box<str> = s.into();

        // SAFETY: the StringTable owns `boxed` for the rest of the program's life and
        // never removes or reallocates entries, so this reference outlives every use of it.
        let static_ref: &'static str =
            unsafe { std::mem::transmute::<&str, &'static str>(boxed.as_ref()) };

        self.string_to_id.insert(static_ref, new_id);
        self.strings.push(boxed);

        new_id
    }

    #[inline]
    pub fn resolve(&self, id: StringId) -> &str {
        // SAFETY: StringIds are only ever created by this table, and are never invalidated.
        unsafe { self.strings.get_unchecked(id.0 as usize).as_ref() }
    }

    #[inline]
    pub fn try_resolve(&self, id: StringId) -> Option<&str> {
        self.strings.get(id.0 as usize).map(|s| s.as_ref())
    }

    #[inline]
    pub fn get_existing(&self, s: &str) -> Option<StringId> {
        self.string_to_id.get(s).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_dedupes() {
        let mut table = StringTable::new();
        let a = table.intern("foo");
        let b = table.intern("foo");
        let c = table.intern("bar");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.resolve(a), "foo");
        assert_eq!(table.resolve(c), "bar");
        assert_eq!(table.len(), 2);
    }
}
