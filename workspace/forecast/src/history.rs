use chrono::NaiveDate;
use serde::Serialize;

/// One forecast output, tagged with the model that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub date: NaiveDate,
    pub value: f64,
    pub model_name: String,
}

/// Append-only, process-wide forecast log.
///
/// Records are never mutated or evicted; a long-running process accumulates
/// every forecast from every request. Callers share the log behind a mutex
/// and hold the lock only to append or snapshot.
#[derive(Debug, Default)]
pub struct ForecastHistory {
    records: Vec<PredictionRecord>,
}

impl ForecastHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of records, preserving their order.
    pub fn append_batch(&mut self, batch: Vec<PredictionRecord>) {
        self.records.extend(batch);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// Records for one model, insertion order preserved.
    pub fn for_model(&self, model_name: &str) -> Vec<PredictionRecord> {
        self.records
            .iter()
            .filter(|record| record.model_name == model_name)
            .cloned()
            .collect()
    }
}
