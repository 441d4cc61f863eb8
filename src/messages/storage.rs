use super::types::Exchange;
use crate::intent::Intent;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;

/// Exchanges kept when no capacity is given
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Shared sliding window of recent exchanges, oldest first
///
/// Once full, recording a new exchange evicts the oldest one.
#[derive(Debug, Clone)]
pub struct ExchangeLog {
    exchanges: Arc<RwLock<VecDeque<Exchange>>>,
    capacity: usize,
}

impl ExchangeLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a log holding at most `capacity` exchanges (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            exchanges: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn add(&self, exchange: Exchange) {
        let mut exchanges = self.exchanges.write();
        if exchanges.len() >= self.capacity {
            exchanges.pop_front();
        }
        exchanges.push_back(exchange);
    }

    pub fn get_all(&self) -> Vec<Exchange> {
        self.exchanges.read().iter().cloned().collect()
    }

    /// Most recent exchange served with the given intent
    pub fn last_for(&self, intent: Intent) -> Option<Exchange> {
        self.exchanges
            .read()
            .iter()
            .rev()
            .find(|e| e.intent == intent)
            .cloned()
    }

    /// How many retained exchanges were served with the given intent
    pub fn count_for(&self, intent: Intent) -> usize {
        self.exchanges
            .read()
            .iter()
            .filter(|e| e.intent == intent)
            .count()
    }

    /// Mean processing time over the retained exchanges
    pub fn average_processing_ms(&self) -> Option<u64> {
        let exchanges = self.exchanges.read();
        if exchanges.is_empty() {
            return None;
        }
        let total: u64 = exchanges
            .iter()
            .map(|e| e.processing_time_ms)
            .fold(0, u64::saturating_add);
        Some(total / exchanges.len() as u64)
    }

    pub fn clear(&self) {
        self.exchanges.write().clear();
    }

    pub fn len(&self) -> usize {
        self.exchanges.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.read().is_empty()
    }
}

impl Default for ExchangeLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_shared_between_clones() {
        let log = ExchangeLog::new();
        let other = log.clone();

        other.add(Exchange::new("status", Intent::Status, "first"));
        log.add(Exchange::new("hello", Intent::Unknown, "second"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.get_all()[0].response, "first");

        log.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_log_evicts_oldest_when_full() {
        let log = ExchangeLog::with_capacity(2);
        log.add(Exchange::new("one", Intent::Unknown, "1"));
        log.add(Exchange::new("two", Intent::Unknown, "2"));
        log.add(Exchange::new("three", Intent::Unknown, "3"));

        let all = log.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].utterance, "two");
        assert_eq!(all[1].utterance, "three");
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let log = ExchangeLog::with_capacity(0);
        assert_eq!(log.capacity(), 1);
        log.add(Exchange::new("a", Intent::Status, "x"));
        log.add(Exchange::new("b", Intent::Status, "y"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.get_all()[0].utterance, "b");
    }

    #[test]
    fn test_lookup_by_intent() {
        let log = ExchangeLog::new();
        log.add(Exchange::new("run tests", Intent::RunTests, "run 1"));
        log.add(Exchange::new("status", Intent::Status, "status 1"));
        log.add(Exchange::new("start tests", Intent::RunTests, "run 2"));

        assert_eq!(log.last_for(Intent::RunTests).unwrap().response, "run 2");
        assert_eq!(log.count_for(Intent::RunTests), 2);
        assert_eq!(log.count_for(Intent::ListBugs), 0);
        assert!(log.last_for(Intent::ExplainFix).is_none());
    }

    #[test]
    fn test_average_processing_ms() {
        let log = ExchangeLog::new();
        assert_eq!(log.average_processing_ms(), None);

        log.add(Exchange::new("a", Intent::Unknown, "x").with_processing_time_ms(10));
        log.add(Exchange::new("b", Intent::Unknown, "y").with_processing_time_ms(30));
        assert_eq!(log.average_processing_ms(), Some(20));
    }
}
