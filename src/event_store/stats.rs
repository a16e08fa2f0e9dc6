//! Event Store statistics
//!
//! Counters are read under the store lock, so every field describes the same
//! instant.

use serde::Serialize;

use crate::types::EventId;

/// Statistics about the Event Store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Maximum number of events retained
    pub capacity: usize,
    /// Events currently resident
    pub count: usize,
    /// Events accepted since startup
    pub total_received: u64,
    /// Events dropped to make room for newer ones
    pub total_evicted: u64,
    /// Oldest resident event
    pub oldest_id: Option<EventId>,
    /// Newest resident event
    pub newest_id: Option<EventId>,
}

impl StoreStats {
    /// Whether the next append will evict
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    /// Fill level in percent
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.count as f64 * 100.0 / self.capacity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utilization_and_full() {
        let stats = StoreStats {
            capacity: 4,
            count: 1,
            ..Default::default()
        };
        assert_eq!(stats.utilization(), 25.0);
        assert!(!stats.is_full());

        let full = StoreStats {
            capacity: 4,
            count: 4,
            ..Default::default()
        };
        assert!(full.is_full());
        assert_eq!(StoreStats::default().utilization(), 0.0);
    }
}
