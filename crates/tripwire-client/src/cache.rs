//! Keyed query cache and its invalidation seam.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use tracing::debug;
use uuid::Uuid;

/// Identifies one cached query result.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum CacheKey {
  /// The trigger list of an organization.
  TriggerList { organization_id: Uuid },
  /// One trigger with its conditions and actions.
  TriggerDetail { trigger_id: Uuid },
}

impl fmt::Display for CacheKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CacheKey::TriggerList { organization_id } => write!(f, "triggers/list/{}", organization_id),
      CacheKey::TriggerDetail { trigger_id } => write!(f, "triggers/detail/{}", trigger_id),
    }
  }
}

/// Receives fire-and-forget instructions to drop cached queries.
pub trait CacheInvalidator: Send + Sync {
  fn invalidate(&self, keys: &[CacheKey]);
}

/// In-memory query cache.
pub struct QueryCache {
  entries: RwLock<HashMap<CacheKey, serde_json::Value>>,
}

impl QueryCache {
  pub fn new() -> Self {
    Self {
      entries: RwLock::new(HashMap::new()),
    }
  }

  pub fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
    let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
    entries.get(key).cloned()
  }

  pub fn insert(&self, key: CacheKey, value: serde_json::Value) {
    let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
    entries.insert(key, value);
  }

  pub fn contains(&self, key: &CacheKey) -> bool {
    let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
    entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
    entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for QueryCache {
  fn default() -> Self {
    Self::new()
  }
}

impl CacheInvalidator for QueryCache {
  fn invalidate(&self, keys: &[CacheKey]) {
    let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
    for key in keys {
      if entries.remove(key).is_some() {
        debug!(key = %key, "invalidated cached query");
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_invalidate_removes_only_named_keys() {
    let org = Uuid::new_v4();
    let trigger = Uuid::new_v4();
    let other = Uuid::new_v4();

    let cache = QueryCache::new();
    cache.insert(CacheKey::TriggerList { organization_id: org }, json!([]));
    cache.insert(CacheKey::TriggerDetail { trigger_id: trigger }, json!({}));
    cache.insert(CacheKey::TriggerDetail { trigger_id: other }, json!({}));

    cache.invalidate(&[
      CacheKey::TriggerList { organization_id: org },
      CacheKey::TriggerDetail { trigger_id: trigger },
    ]);

    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&CacheKey::TriggerDetail { trigger_id: other }));
  }

  #[test]
  fn test_invalidate_missing_key_is_harmless() {
    let cache = QueryCache::default();
    cache.invalidate(&[CacheKey::TriggerDetail {
      trigger_id: Uuid::new_v4(),
    }]);
    assert!(cache.is_empty());
  }

  #[test]
  fn test_key_display() {
    let key = CacheKey::TriggerList {
      organization_id: Uuid::nil(),
    };
    assert_eq!(
      key.to_string(),
      "triggers/list/00000000-0000-0000-0000-000000000000"
    );
  }
}
