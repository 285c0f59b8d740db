//! Cache key scheme and expiration policy.

use std::num::NonZeroU64;

use crate::models::BookId;

/// Key holding the serialized list of all books.
pub const COLLECTION_KEY: &str = "books:all";

/// Prefix of per-book keys. Distinct from [`COLLECTION_KEY`] for every id.
pub const ITEM_KEY_PREFIX: &str = "book:";

/// Default expiration for every cache write: one hour.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Key holding the serialized book `id`.
///
/// Depends on the identifier alone, so it is stable across restarts.
pub fn item_key(id: &BookId) -> String {
    format!("{}{}", ITEM_KEY_PREFIX, id)
}

// == Cache Policy ==
/// Expiration applied to every cache write the coordinator performs.
///
/// A zero TTL cannot be expressed, so no entry is ever written without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    ttl: NonZeroU64,
}

impl CachePolicy {
    /// Policy with the given TTL; zero falls back to the one-hour default.
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        match NonZeroU64::new(ttl_secs) {
            Some(ttl) => Self { ttl },
            None => Self::default(),
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl.get()
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: NonZeroU64::MIN.saturating_add(DEFAULT_TTL_SECS - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_item_key_format() {
        let id = BookId::generate();
        assert_eq!(item_key(&id), format!("book:{}", id));
        assert_eq!(item_key(&id), item_key(&id));
    }

    #[test]
    fn test_item_key_roundtrips_through_parse() {
        let id = BookId::generate();
        let key = item_key(&id);
        let parsed = BookId::parse(key.trim_start_matches(ITEM_KEY_PREFIX)).unwrap();
        assert_eq!(item_key(&parsed), key);
    }

    #[test]
    fn test_default_policy_is_one_hour() {
        assert_eq!(CachePolicy::default().ttl_secs(), 3600);
    }

    #[test]
    fn test_zero_ttl_falls_back() {
        assert_eq!(CachePolicy::with_ttl_secs(0), CachePolicy::default());
        assert_eq!(CachePolicy::with_ttl_secs(90).ttl_secs(), 90);
    }

    proptest! {
        #[test]
        fn prop_item_keys_never_collide(a in any::<u128>(), b in any::<u128>()) {
            let id_a = BookId::parse(&format!("{:032x}", a)).unwrap();
            let id_b = BookId::parse(&format!("{:032x}", b)).unwrap();

            prop_assert_eq!(item_key(&id_a) == item_key(&id_b), a == b);
            prop_assert_ne!(item_key(&id_a), COLLECTION_KEY);
        }
    }
}
