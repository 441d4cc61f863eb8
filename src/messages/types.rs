use crate::intent::Intent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One utterance and the reply spoken back for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: Uuid,
    pub utterance: String,
    pub intent: Intent,
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl Exchange {
    pub fn new(utterance: impl Into<String>, intent: Intent, response: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            utterance: utterance.into(),
            intent,
            response: response.into(),
            timestamp: Utc::now(),
            processing_time_ms: 0,
        }
    }

    pub fn with_processing_time_ms(mut self, processing_time_ms: u64) -> Self {
        self.processing_time_ms = processing_time_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_ids_are_unique() {
        let a = Exchange::new("status", Intent::Status, "ok");
        let b = Exchange::new("status", Intent::Status, "ok");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_exchange_serializes_intent() {
        let exchange = Exchange::new("run tests", Intent::RunTests, "Starting")
            .with_processing_time_ms(12);
        let value = serde_json::to_value(&exchange).unwrap();
        assert_eq!(value["intent"], "run_tests");
        assert_eq!(value["processing_time_ms"], 12);
    }
}
