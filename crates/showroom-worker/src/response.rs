use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use showroom_decode::MeshRecord;

use crate::error::WorkerError;

/// The sole observable output of a decode request. Exactly one of these is
/// delivered per request; on the wire it is tagged by a `success` boolean.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Success { data: Vec<MeshRecord> },
    Failure { error: String },
}

impl WorkerResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkerResponse::Success { .. })
    }
}

impl From<Result<Vec<MeshRecord>, WorkerError>> for WorkerResponse {
    fn from(result: Result<Vec<MeshRecord>, WorkerError>) -> Self {
        match result {
            Ok(data) => WorkerResponse::Success { data },
            Err(err) => WorkerResponse::Failure {
                error: err.to_string(),
            },
        }
    }
}

impl Serialize for WorkerResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WorkerResponse::Success { data } => {
                let mut state = serializer.serialize_struct("WorkerResponse", 2)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            WorkerResponse::Failure { error } => {
                let mut state = serializer.serialize_struct("WorkerResponse", 2)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for WorkerResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Envelope {
            success: bool,
            #[serde(default)]
            data: Option<Vec<MeshRecord>>,
            #[serde(default)]
            error: Option<String>,
        }

        let envelope = Envelope::deserialize(deserializer)?;
        if envelope.success {
            let data = envelope
                .data
                .ok_or_else(|| D::Error::missing_field("data"))?;
            Ok(WorkerResponse::Success { data })
        } else {
            let error = envelope
                .error
                .ok_or_else(|| D::Error::missing_field("error"))?;
            Ok(WorkerResponse::Failure { error })
        }
    }
}
