//! Memory Store Module
//!
//! In-process keyspace implementing the subset of Redis commands the
//! gateway exposes, with the same reply and error semantics.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::error::{StoreError, StoreResult};
use crate::store::StoredValue;

const NOT_AN_INTEGER: &str = "ERR value is not an integer or out of range";

// == Memory Store ==
/// Keyspace mapping keys to typed values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, StoredValue>,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Strings ==
    /// SET: stores a scalar, replacing whatever the key held.
    pub fn set(&mut self, key: &str, value: &[u8]) {
        self.entries
            .insert(key.to_string(), StoredValue::String(value.to_vec()));
    }

    /// GET: returns the scalar, or None when the key is absent.
    pub fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match self.entries.get(key) {
            Some(value) => Ok(Some(value.as_string()?.to_vec())),
            None => Ok(None),
        }
    }

    /// INCR: adds one to an integer scalar, starting from zero.
    pub fn incr(&mut self, key: &str) -> StoreResult<i64> {
        let current = match self.entries.get(key) {
            Some(value) => parse_integer(value.as_string()?)?,
            None => 0,
        };
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::Command(NOT_AN_INTEGER.to_string()))?;
        self.set(key, next.to_string().as_bytes());
        Ok(next)
    }

    // == Lists ==
    /// LPUSH: prepends a value and returns the new length.
    pub fn lpush(&mut self, key: &str, value: &[u8]) -> StoreResult<usize> {
        let list = self
            .entry_or_insert(key, || StoredValue::List(VecDeque::new()))
            .as_list_mut()?;
        list.push_front(value.to_vec());
        Ok(list.len())
    }

    /// LRANGE key 0 -1: the whole list, head first.
    pub fn lrange(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
        match self.entries.get(key) {
            Some(value) => Ok(value.as_list()?.iter().cloned().collect()),
            None => Ok(Vec::new()),
        }
    }

    // == Sets ==
    /// SADD: returns true when the member was not already present.
    pub fn sadd(&mut self, key: &str, member: &[u8]) -> StoreResult<bool> {
        let set = self
            .entry_or_insert(key, || StoredValue::Set(BTreeSet::new()))
            .as_set_mut()?;
        Ok(set.insert(member.to_vec()))
    }

    /// SMEMBERS
    pub fn smembers(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
        match self.entries.get(key) {
            Some(value) => Ok(value.as_set()?.iter().cloned().collect()),
            None => Ok(Vec::new()),
        }
    }

    // == Hashes ==
    /// HSET: returns true when the field is new.
    pub fn hset(&mut self, key: &str, field: &[u8], value: &[u8]) -> StoreResult<bool> {
        let hash = self
            .entry_or_insert(key, || StoredValue::Hash(BTreeMap::new()))
            .as_hash_mut()?;
        Ok(hash.insert(field.to_vec(), value.to_vec()).is_none())
    }

    /// HGETALL
    pub fn hgetall(&self, key: &str) -> StoreResult<Vec<(Vec<u8>, Vec<u8>)>> {
        match self.entries.get(key) {
            Some(value) => Ok(value
                .as_hash()?
                .iter()
                .map(|(f, v)| (f.clone(), v.clone()))
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    // == Sorted Sets ==
    /// ZADD: sets the member's score, returns true when the member is new.
    pub fn zadd(&mut self, key: &str, member: &[u8], score: f64) -> StoreResult<bool> {
        let zset = self
            .entry_or_insert(key, || StoredValue::SortedSet(BTreeMap::new()))
            .as_sorted_set_mut()?;
        Ok(zset.insert(member.to_vec(), score).is_none())
    }

    /// ZRANGE key 0 -1 WITHSCORES: ascending score, ties broken by member bytes.
    pub fn zrange_withscores(&self, key: &str) -> StoreResult<Vec<(Vec<u8>, f64)>> {
        let Some(value) = self.entries.get(key) else {
            return Ok(Vec::new());
        };
        let mut members: Vec<(Vec<u8>, f64)> = value
            .as_sorted_set()?
            .iter()
            .map(|(m, s)| (m.clone(), *s))
            .collect();
        members.sort_by(|(ma, sa), (mb, sb)| sa.total_cmp(sb).then_with(|| ma.cmp(mb)));
        Ok(members)
    }

    // == Introspection ==
    // Only the tests inspect the keyspace directly.

    /// TYPE: structure held under the key, if any.
    #[cfg(test)]
    pub(crate) fn key_type(&self, key: &str) -> Option<&'static str> {
        self.entries.get(key).map(StoredValue::type_name)
    }

    /// Returns the current number of keys.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the keyspace is empty.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_or_insert(
        &mut self,
        key: &str,
        default: impl FnOnce() -> StoredValue,
    ) -> &mut StoredValue {
        self.entries.entry(key.to_string()).or_insert_with(default)
    }
}

fn parse_integer(bytes: &[u8]) -> StoreResult<i64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| StoreError::Command(NOT_AN_INTEGER.to_string()))
}
