use crate::models::{ListingRecord, NOT_AVAILABLE};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Identity key for a record: its URL, or `name-phone` when it has none.
///
/// Records without a URL that share a name and phone (including two `N/A`
/// phones) produce the same key and are treated as one listing.
#[must_use]
pub fn identity_key(record: &ListingRecord) -> String {
    let url = record.url.trim();
    if !url.is_empty() && url != NOT_AVAILABLE {
        url.to_string()
    } else {
        format!("{}-{}", record.name, record.phone)
    }
}

/// Digests of every identity key accepted during one run
#[derive(Debug, Default)]
pub struct SeenKeys {
    digests: HashSet<String>,
}

impl SeenKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and remembers the record if it has not been seen before.
    pub fn is_new(&mut self, record: &ListingRecord) -> bool {
        let digest = format!("{:x}", Sha256::digest(identity_key(record).as_bytes()));
        self.digests.insert(digest)
    }

    pub fn len(&self) -> usize {
        self.digests.len()
    }
}
