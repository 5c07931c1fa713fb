//! Hand-off of finalized records
//!
//! Finalized records leave this crate as plain data keyed by the survey
//! question that requested them. Persistence itself is a collaborator behind
//! [`RecordSink`]; this crate knows nothing about surveys beyond the key.

use std::convert::Infallible;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::collection::Collection;
use crate::measurement::FinalizedRecord;

/// One record addressed to one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub question_id: String,
    pub record: FinalizedRecord,
}

impl ResponsePayload {
    pub fn new(question_id: impl Into<String>, record: FinalizedRecord) -> Self {
        Self {
            question_id: question_id.into(),
            record,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Consumer of finalized records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn submit(&self, payload: ResponsePayload) -> Result<(), Self::Error>;
}

/// Submit every record of `collection` under `question_id`, in order
///
/// Stops at the first sink error. Returns the number of records submitted.
pub async fn submit_collection<S>(
    sink: &S,
    question_id: &str,
    collection: &Collection,
) -> Result<usize, S::Error>
where
    S: RecordSink + ?Sized,
{
    let mut submitted = 0;
    for record in collection.list() {
        sink.submit(ResponsePayload::new(question_id, record.clone())).await?;
        submitted += 1;
    }
    crate::log_debug!("submitted {} records for question {}", submitted, question_id);
    Ok(submitted)
}

/// In-process sink that keeps every payload
#[derive(Debug, Default)]
pub struct MemorySink {
    payloads: Mutex<Vec<ResponsePayload>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<ResponsePayload> {
        self.lock().clone()
    }

    /// Payloads submitted for one question
    pub fn for_question(&self, question_id: &str) -> Vec<ResponsePayload> {
        self.lock()
            .iter()
            .filter(|p| p.question_id == question_id)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ResponsePayload>> {
        self.payloads.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    type Error = Infallible;

    async fn submit(&self, payload: ResponsePayload) -> Result<(), Self::Error> {
        self.lock().push(payload);
        Ok(())
    }
}
