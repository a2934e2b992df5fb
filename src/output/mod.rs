pub mod human;

use serde_json::{Value, json};

use crate::error::AppError;

/// Standard JSON envelope.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

pub fn error(command: &str, code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// Error envelope for a typed failure, carrying its HTTP-equivalent status.
pub fn app_error(command: &str, err: &AppError) -> Value {
    let mut out = error(command, err.code(), &err.to_string());
    out["error"]["http_status"] = json!(err.http_status());
    out
}
