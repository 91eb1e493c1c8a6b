//! Stored Value Module
//!
//! Typed values held by the in-memory keyspace.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{StoreError, StoreResult};

// == Stored Value ==
/// One value in the keyspace. Payloads are raw bytes, as in Redis.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    String(Vec<u8>),
    List(VecDeque<Vec<u8>>),
    Set(BTreeSet<Vec<u8>>),
    Hash(BTreeMap<Vec<u8>, Vec<u8>>),
    SortedSet(BTreeMap<Vec<u8>, f64>),
}

impl StoredValue {
    // == Type Name ==
    /// Name reported by the Redis TYPE command for this value.
    #[cfg(test)]
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            StoredValue::String(_) => "string",
            StoredValue::List(_) => "list",
            StoredValue::Set(_) => "set",
            StoredValue::Hash(_) => "hash",
            StoredValue::SortedSet(_) => "zset",
        }
    }

    // == Typed Accessors ==
    // Each returns WrongType when the value holds a different structure.

    pub fn as_string(&self) -> StoreResult<&[u8]> {
        match self {
            StoredValue::String(bytes) => Ok(bytes.as_slice()),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_list(&self) -> StoreResult<&VecDeque<Vec<u8>>> {
        match self {
            StoredValue::List(list) => Ok(list),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_list_mut(&mut self) -> StoreResult<&mut VecDeque<Vec<u8>>> {
        match self {
            StoredValue::List(list) => Ok(list),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_set(&self) -> StoreResult<&BTreeSet<Vec<u8>>> {
        match self {
            StoredValue::Set(set) => Ok(set),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_set_mut(&mut self) -> StoreResult<&mut BTreeSet<Vec<u8>>> {
        match self {
            StoredValue::Set(set) => Ok(set),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_hash(&self) -> StoreResult<&BTreeMap<Vec<u8>, Vec<u8>>> {
        match self {
            StoredValue::Hash(hash) => Ok(hash),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_hash_mut(&mut self) -> StoreResult<&mut BTreeMap<Vec<u8>, Vec<u8>>> {
        match self {
            StoredValue::Hash(hash) => Ok(hash),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_sorted_set(&self) -> StoreResult<&BTreeMap<Vec<u8>, f64>> {
        match self {
            StoredValue::SortedSet(zset) => Ok(zset),
            _ => Err(StoreError::WrongType),
        }
    }

    pub fn as_sorted_set_mut(&mut self) -> StoreResult<&mut BTreeMap<Vec<u8>, f64>> {
        match self {
            StoredValue::SortedSet(zset) => Ok(zset),
            _ => Err(StoreError::WrongType),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(StoredValue::String(b"x".to_vec()).type_name(), "string");
        assert_eq!(StoredValue::List(VecDeque::new()).type_name(), "list");
        assert_eq!(StoredValue::Set(BTreeSet::new()).type_name(), "set");
        assert_eq!(StoredValue::Hash(BTreeMap::new()).type_name(), "hash");
        assert_eq!(StoredValue::SortedSet(BTreeMap::new()).type_name(), "zset");
    }

    #[test]
    fn test_matching_accessor() {
        let value = StoredValue::String(b"hello".to_vec());
        assert_eq!(value.as_string().unwrap(), b"hello");
    }

    #[test]
    fn test_mismatched_accessor_is_wrong_type() {
        let mut value = StoredValue::String(b"hello".to_vec());
        assert_eq!(value.as_set_mut().unwrap_err(), StoreError::WrongType);
        assert_eq!(value.as_list().unwrap_err(), StoreError::WrongType);
        assert_eq!(value.as_hash().unwrap_err(), StoreError::WrongType);
        assert_eq!(value.as_sorted_set().unwrap_err(), StoreError::WrongType);
    }
}
