//! Wire envelope of callable functions: `{"data": ...}` in, `{"result": ...}` out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct CallableRequest<T> {
    #[serde(default)]
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

impl<T> CallableResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

#[derive(Debug, Serialize)]
pub struct CallableError {
    pub error: CallableErrorBody,
}

#[derive(Debug, Serialize)]
pub struct CallableErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl CallableError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: CallableErrorBody {
                status: "INTERNAL",
                message: message.into(),
            },
        }
    }
}
