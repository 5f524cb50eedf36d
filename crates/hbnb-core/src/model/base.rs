use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::timestamp;

/// Fields shared by every Kind
///
/// `id` is assigned once and never changes. Timestamps are only reachable
/// through methods that truncate to microseconds, the precision of the text
/// format, so they survive the round trip exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseModel {
    /// Opaque unique identifier (UUID v4 text)
    pub id: String,

    /// Timestamp when the entity was constructed
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,

    /// Timestamp of the last successful mutate-and-persist
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
}

impl BaseModel {
    /// Fresh id, both timestamps set to now
    pub fn new() -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`, never letting it fall behind `created_at`
    pub fn touch(&mut self) {
        self.updated_at = timestamp::now().max(self.created_at);
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Set both timestamps, truncated to microseconds
    ///
    /// Ordering is not enforced here; the codec rejects a record whose
    /// `updated_at` precedes `created_at`.
    pub fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = created_at.trunc_subsecs(6);
        self.updated_at = updated_at.trunc_subsecs(6);
    }

    pub fn timestamps_ordered(&self) -> bool {
        self.updated_at >= self.created_at
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_new_base_model() {
        let base = BaseModel::new();
        assert_eq!(base.id.len(), 36);
        assert_eq!(base.created_at, base.updated_at);
        assert!(base.timestamps_ordered());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(BaseModel::new().id, BaseModel::new().id);
    }

    #[test]
    fn test_touch_moves_updated_at_forward() {
        let mut base = BaseModel::new();
        base.created_at -= Duration::seconds(10);
        base.updated_at = base.created_at;

        base.touch();
        assert!(base.updated_at > base.created_at);
    }

    #[test]
    fn test_set_timestamps_truncates_to_microseconds() {
        let mut base = BaseModel::new();
        let at = Utc.timestamp_nanos(1_497_479_463_285_259_731);

        base.set_timestamps(at, at);

        assert_eq!(base.created_at().timestamp_subsec_nanos(), 285_259_000);
        assert_eq!(base.updated_at(), base.created_at());
    }

    #[test]
    fn test_touch_never_precedes_created_at() {
        let mut base = BaseModel::new();
        base.created_at += Duration::days(1);

        base.touch();
        assert_eq!(base.updated_at, base.created_at);
    }
}
