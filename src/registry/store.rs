use std::collections::HashMap;

use super::RegistrationCommitment;
use crate::{Error, Result};

/// Default capacity of [`InMemoryCommitmentStore`].
pub const MAX_STORED_COMMITMENTS: usize = 10_000;

/// External store holding one registration commitment per identity.
///
/// Durable backends implement this trait; the crate only ships an in-memory one.
pub trait CommitmentStore {
    /// Stores the commitment for `id`.
    ///
    /// Implementations reject an `id` that is already present.
    fn insert(&mut self, id: &[u8], commitment: RegistrationCommitment) -> Result<()>;

    /// Returns the commitment stored for `id`.
    fn get(&self, id: &[u8]) -> Option<RegistrationCommitment>;

    /// Removes and returns the commitment stored for `id`.
    fn remove(&mut self, id: &[u8]) -> Option<RegistrationCommitment>;

    /// Returns the number of stored commitments.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capacity-bounded commitment table kept in process memory.
#[derive(Clone, Debug)]
pub struct InMemoryCommitmentStore {
    commitments: HashMap<Vec<u8>, RegistrationCommitment>,
    capacity: usize,
}

impl InMemoryCommitmentStore {
    /// Creates an empty store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_STORED_COMMITMENTS)
    }

    /// Creates an empty store holding at most `capacity` commitments.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commitments: HashMap::new(),
            capacity,
        }
    }

    /// Returns the maximum number of commitments.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryCommitmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitmentStore for InMemoryCommitmentStore {
    fn insert(&mut self, id: &[u8], commitment: RegistrationCommitment) -> Result<()> {
        if self.commitments.contains_key(id) {
            return Err(Error::Registry(format!(
                "Device '{}' already registered",
                String::from_utf8_lossy(id)
            )));
        }

        if self.commitments.len() >= self.capacity {
            return Err(Error::Registry(format!(
                "Maximum registered devices reached ({})",
                self.capacity
            )));
        }

        self.commitments.insert(id.to_vec(), commitment);
        Ok(())
    }

    fn get(&self, id: &[u8]) -> Option<RegistrationCommitment> {
        self.commitments.get(id).copied()
    }

    fn remove(&mut self, id: &[u8]) -> Option<RegistrationCommitment> {
        self.commitments.remove(id)
    }

    fn len(&self) -> usize {
        self.commitments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commitment(byte: u8) -> RegistrationCommitment {
        RegistrationCommitment::from_bytes([byte; 32])
    }

    #[test]
    fn insert_get_remove() {
        let mut store = InMemoryCommitmentStore::new();
        assert!(store.is_empty());

        store.insert(b"a", commitment(1)).unwrap();
        assert_eq!(store.get(b"a"), Some(commitment(1)));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove(b"a"), Some(commitment(1)));
        assert_eq!(store.get(b"a"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut store = InMemoryCommitmentStore::new();
        store.insert(b"a", commitment(1)).unwrap();

        let err = store.insert(b"a", commitment(2)).unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
        assert_eq!(store.get(b"a"), Some(commitment(1)));
    }

    #[test]
    fn enforces_capacity() {
        let mut store = InMemoryCommitmentStore::with_capacity(2);
        store.insert(b"a", commitment(1)).unwrap();
        store.insert(b"b", commitment(2)).unwrap();

        assert!(matches!(
            store.insert(b"c", commitment(3)),
            Err(Error::Registry(_))
        ));

        store.remove(b"a");
        assert!(store.insert(b"c", commitment(3)).is_ok());
    }
}
