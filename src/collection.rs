//! Ordered key-value container with a stateful iteration cursor.
//!
//! [`Collection`] underlies the command registry, the history and every
//! argument list. Insertion order is semantically significant: all
//! index-based accessors refer to the current insertion order, and
//! removal shifts rather than swaps.

use indexmap::IndexMap;

use crate::value::Value;

/// Insertion-ordered `Value -> Value` container.
///
/// Keys are unique; `set_value` on an existing key keeps its position.
/// An auto-key counter backs [`add`](Collection::add) and is
/// monotonically non-decreasing: integer keys handed out once are never
/// reused, even after removals or [`clear`](Collection::clear).
///
/// The container carries a single iteration cursor (`-1` = before
/// start). The cursor is only reset where a fresh collection is produced
/// ([`filter`](Collection::filter)); plain mutation leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    entries: IndexMap<Value, Value>,
    cursor: i64,
    next_key: i64,
}

impl Collection {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            cursor: -1,
            next_key: 0,
        }
    }

    /// Build a collection from an arbitrary value: a map becomes the
    /// entries as-is, an array is keyed by position, `None` is empty and
    /// any other value lands under key `0`.
    pub fn from_value(value: &Value) -> Self {
        let mut collection = Self::new();
        match value {
            Value::Map(entries) => {
                collection.entries = entries.clone();
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    collection
                        .entries
                        .insert(Value::Int(index as i64), item.clone());
                }
            }
            Value::None => {}
            other => {
                collection.entries.insert(Value::Int(0), other.clone());
            }
        }
        collection
    }

    /// Upsert. An existing key keeps its position, a new key appends.
    pub fn set_value(&mut self, key: Value, value: Value) {
        self.entries.insert(key, value);
    }

    /// Append `value` under the next automatic integer key.
    ///
    /// The counter first catches up to the current size, then skips past
    /// any explicitly-set integer key so an auto-key never shadows one.
    pub fn add(&mut self, value: Value) {
        self.next_key = self.next_key.max(self.entries.len() as i64);
        while self.entries.contains_key(&Value::Int(self.next_key)) {
            self.next_key += 1;
        }
        let key = Value::Int(self.next_key);
        self.next_key += 1;
        self.entries.insert(key, value);
    }

    /// Remove by key; `None` if the key was absent.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Remove the first entry whose value equals `element`.
    pub fn remove_element(&mut self, element: &Value) -> bool {
        match self.entries.values().position(|value| value == element) {
            Some(index) => {
                self.entries.shift_remove_index(index);
                true
            }
            None => false,
        }
    }

    /// Remove the entry at `index`; out-of-range is a no-op.
    pub fn remove_by_index(&mut self, index: i64) {
        if index >= 0 && (index as usize) < self.entries.len() {
            self.entries.shift_remove_index(index as usize);
        }
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.entries.contains_key(key)
    }

    /// Value membership, by linear scan.
    pub fn contains(&self, element: &Value) -> bool {
        self.entries.values().any(|value| value == element)
    }

    /// Key of the first entry whose value equals `element`.
    pub fn index_of(&self, element: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(_, value)| *value == element)
            .map(|(key, _)| key)
    }

    pub fn get_value(&self, key: &Value) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_by_index(&self, index: i64) -> Option<&Value> {
        if index < 0 {
            return None;
        }
        self.entries.get_index(index as usize).map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. The cursor and the auto-key counter are left
    /// untouched; keys handed out before the clear stay retired.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move the cursor to the first entry and return it.
    pub fn first(&mut self) -> Option<&Value> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = 0;
        self.get_by_index(self.cursor)
    }

    /// Move the cursor to the last entry and return it.
    pub fn last(&mut self) -> Option<&Value> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.entries.len() as i64 - 1;
        self.get_by_index(self.cursor)
    }

    /// Place the cursor at an arbitrary position. No bounds check; a
    /// wild cursor simply makes `current` return `None`.
    pub fn seek(&mut self, index: i64) {
        self.cursor = index;
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.entries.len() as i64 - 1
    }

    /// Advance and return the next entry, or `None` without moving when
    /// the cursor is already at the end.
    pub fn next(&mut self) -> Option<&Value> {
        if self.entries.is_empty() || !self.has_next() {
            return None;
        }
        self.cursor += 1;
        self.get_by_index(self.cursor)
    }

    /// Step back and return the previous entry, or `None` without moving
    /// when the cursor is at (or before) the start.
    pub fn previous(&mut self) -> Option<&Value> {
        if self.entries.is_empty() || self.cursor <= 0 {
            return None;
        }
        self.cursor -= 1;
        self.get_by_index(self.cursor)
    }

    /// Re-read the entry under the cursor without moving it.
    pub fn current(&self) -> Option<&Value> {
        if self.entries.is_empty() || self.cursor < 0 {
            return None;
        }
        self.get_by_index(self.cursor)
    }

    /// Overwrite existing integer-keyed slots in `[start, start+length)`
    /// with `value`, bounded by the current size. Never inserts. Returns
    /// a copy of the collection after the overwrite.
    pub fn fill(&mut self, value: Value, start: i64, length: Option<i64>) -> Collection {
        let len = self.entries.len() as i64;
        let count = length.unwrap_or(len - start);
        let mut index = start;
        while index < start + count && index < len {
            let key = Value::Int(index);
            if self.entries.contains_key(&key) {
                self.entries.insert(key, value.clone());
            }
            index += 1;
        }
        self.clone()
    }

    /// Produce a new collection containing only entries the predicate
    /// accepts. The predicate receives `(key, value, position, partial)`
    /// where `partial` is the partially filtered collection built so
    /// far; rejected entries are already gone from it.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value, &Value, usize, &Collection) -> bool,
    {
        let mut filtered = Collection {
            entries: self.entries.clone(),
            cursor: -1,
            next_key: 0,
        };
        let mut index = 0;
        while let Some((key, value)) = filtered
            .entries
            .get_index(index)
            .map(|(key, value)| (key.clone(), value.clone()))
        {
            if predicate(&key, &value, index, &filtered) {
                index += 1;
            } else {
                filtered.entries.shift_remove_index(index);
            }
        }
        filtered
    }

    /// [`filter`](Collection::filter) without a predicate: drop entries
    /// whose value is empty under the fixed rule (absent, empty text,
    /// empty array, empty map).
    pub fn compact(&self) -> Collection {
        self.filter(|_, value, _, _| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueMap;

    fn collect_values(collection: &Collection) -> Vec<Value> {
        collection.values().cloned().collect()
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut collection = Collection::new();
        collection.add(Value::from("a"));
        collection.add(Value::from("b"));
        collection.add(Value::from("c"));

        let values = collect_values(&collection);
        assert_eq!(values, vec![Value::from("a"), Value::from("b"), Value::from("c")]);
        for (index, value) in values.iter().enumerate() {
            assert_eq!(collection.get_by_index(index as i64), Some(value));
        }
    }

    #[test]
    fn test_set_value_upsert_keeps_position() {
        let mut collection = Collection::new();
        collection.set_value(Value::from("a"), Value::Int(1));
        collection.set_value(Value::from("b"), Value::Int(2));
        collection.set_value(Value::from("a"), Value::Int(10));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get_by_index(0), Some(&Value::Int(10)));
        assert_eq!(collection.get_by_index(1), Some(&Value::Int(2)));
    }

    #[test]
    fn test_auto_keys_never_reused_after_removal() {
        let mut collection = Collection::new();
        collection.add(Value::from("a"));
        collection.add(Value::from("b"));
        collection.add(Value::from("c"));
        collection.remove_by_index(0);
        collection.add(Value::from("d"));

        assert!(collection.contains_key(&Value::Int(3)));
        assert!(!collection.contains_key(&Value::Int(0)));
        assert_eq!(collection.get_value(&Value::Int(3)), Some(&Value::from("d")));
    }

    #[test]
    fn test_auto_key_skips_explicit_integer_keys() {
        let mut collection = Collection::new();
        collection.add(Value::from("a"));
        collection.set_value(Value::Int(1), Value::from("manual"));
        collection.add(Value::from("b"));

        // The manual key survives; the new auto-key landed past it.
        assert_eq!(collection.get_value(&Value::Int(1)), Some(&Value::from("manual")));
        assert_eq!(collection.get_value(&Value::Int(2)), Some(&Value::from("b")));
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_removals_tolerate_absent_targets() {
        let mut collection = Collection::new();
        collection.add(Value::Int(1));

        assert_eq!(collection.remove(&Value::from("missing")), None);
        assert!(!collection.remove_element(&Value::Int(99)));
        collection.remove_by_index(5);
        collection.remove_by_index(-1);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_remove_element_removes_first_match_only() {
        let mut collection = Collection::new();
        collection.add(Value::from("x"));
        collection.add(Value::from("y"));
        collection.add(Value::from("x"));

        assert!(collection.remove_element(&Value::from("x")));
        assert_eq!(
            collect_values(&collection),
            vec![Value::from("y"), Value::from("x")]
        );
    }

    #[test]
    fn test_value_queries() {
        let mut collection = Collection::new();
        collection.set_value(Value::from("k"), Value::Int(5));

        assert!(collection.contains_key(&Value::from("k")));
        assert!(collection.contains(&Value::Int(5)));
        assert!(!collection.contains(&Value::Int(6)));
        assert_eq!(collection.index_of(&Value::Int(5)), Some(&Value::from("k")));
        assert_eq!(collection.index_of(&Value::Int(6)), None);
    }

    #[test]
    fn test_out_of_range_access_yields_none() {
        let collection = Collection::new();
        assert_eq!(collection.get_by_index(0), None);
        assert_eq!(collection.get_by_index(-1), None);
        assert_eq!(collection.get_value(&Value::Int(0)), None);
    }

    #[test]
    fn test_cursor_protocol() {
        let mut collection = Collection::new();
        collection.add(Value::Int(10));
        collection.add(Value::Int(20));
        collection.add(Value::Int(30));

        assert_eq!(collection.first(), Some(&Value::Int(10)));
        assert!(collection.has_next());
        assert_eq!(collection.next(), Some(&Value::Int(20)));
        assert_eq!(collection.next(), Some(&Value::Int(30)));
        assert!(!collection.has_next());

        // A failed advance does not move the cursor.
        assert_eq!(collection.next(), None);
        assert_eq!(collection.current(), Some(&Value::Int(30)));

        assert_eq!(collection.previous(), Some(&Value::Int(20)));
        assert_eq!(collection.previous(), Some(&Value::Int(10)));
        assert_eq!(collection.previous(), None);
        assert_eq!(collection.current(), Some(&Value::Int(10)));

        assert_eq!(collection.last(), Some(&Value::Int(30)));
    }

    #[test]
    fn test_cursor_on_empty_collection() {
        let mut collection = Collection::new();
        assert_eq!(collection.first(), None);
        assert_eq!(collection.last(), None);
        assert_eq!(collection.next(), None);
        assert_eq!(collection.previous(), None);
        assert_eq!(collection.current(), None);
        assert!(!collection.has_next());
    }

    #[test]
    fn test_seek_out_of_range_makes_current_none() {
        let mut collection = Collection::new();
        collection.add(Value::Int(1));
        collection.seek(10);
        assert_eq!(collection.current(), None);
        assert!(!collection.has_next());
    }

    #[test]
    fn test_compact_removes_only_empty_values() {
        let mut collection = Collection::new();
        collection.add(Value::None);
        collection.add(Value::from(""));
        collection.add(Value::Array(Vec::new()));
        collection.add(Value::Map(ValueMap::new()));
        collection.add(Value::Bool(false));
        collection.add(Value::Int(0));
        collection.add(Value::Float(0.0));
        collection.add(Value::from("keep"));

        let compacted = collection.compact();
        assert_eq!(
            collect_values(&compacted),
            vec![
                Value::Bool(false),
                Value::Int(0),
                Value::Float(0.0),
                Value::from("keep"),
            ]
        );
        // The source is untouched.
        assert_eq!(collection.len(), 8);
    }

    #[test]
    fn test_filter_predicate_sees_partial_accumulator() {
        let mut collection = Collection::new();
        collection.add(Value::Int(1));
        collection.add(Value::Int(2));
        collection.add(Value::Int(3));

        let mut observed_lengths = Vec::new();
        let filtered = collection.filter(|_, value, _, partial| {
            observed_lengths.push(partial.len());
            value != &Value::Int(2)
        });

        assert_eq!(filtered.len(), 2);
        // The rejected entry had already been removed when the third
        // entry was examined.
        assert_eq!(observed_lengths, vec![3, 3, 2]);
    }

    #[test]
    fn test_filter_result_has_fresh_cursor() {
        let mut collection = Collection::new();
        collection.add(Value::Int(1));
        collection.last();

        let mut filtered = collection.filter(|_, _, _, _| true);
        assert_eq!(filtered.current(), None);
        assert_eq!(filtered.first(), Some(&Value::Int(1)));
    }

    #[test]
    fn test_fill_overwrites_without_extending() {
        let mut collection = Collection::new();
        collection.add(Value::Int(1));
        collection.add(Value::Int(2));
        collection.add(Value::Int(3));

        let copy = collection.fill(Value::Int(0), 1, Some(5));
        assert_eq!(
            collect_values(&collection),
            vec![Value::Int(1), Value::Int(0), Value::Int(0)]
        );
        assert_eq!(collection.len(), 3);
        assert_eq!(collect_values(&copy), collect_values(&collection));
    }

    #[test]
    fn test_fill_skips_non_integer_keys() {
        let mut collection = Collection::new();
        collection.set_value(Value::from("name"), Value::from("x"));
        collection.set_value(Value::Int(1), Value::from("y"));

        collection.fill(Value::from("z"), 0, None);
        assert_eq!(collection.get_value(&Value::from("name")), Some(&Value::from("x")));
        assert_eq!(collection.get_value(&Value::Int(1)), Some(&Value::from("z")));
    }

    #[test]
    fn test_from_value() {
        let array = Value::Array(vec![Value::Int(1), Value::Int(2)]);
        let collection = Collection::from_value(&array);
        assert_eq!(collection.get_value(&Value::Int(0)), Some(&Value::Int(1)));
        assert_eq!(collection.get_value(&Value::Int(1)), Some(&Value::Int(2)));

        let mut entries = ValueMap::new();
        entries.insert(Value::from("k"), Value::Int(9));
        let collection = Collection::from_value(&Value::Map(entries));
        assert_eq!(collection.get_value(&Value::from("k")), Some(&Value::Int(9)));

        let collection = Collection::from_value(&Value::None);
        assert!(collection.is_empty());

        let collection = Collection::from_value(&Value::Int(7));
        assert_eq!(collection.get_value(&Value::Int(0)), Some(&Value::Int(7)));
    }
}
