//! Provider protocol types.
//!
//! Defines the JSON protocol used for communication between the famhub CLI
//! and provider binaries over stdin/stdout.

use serde::{Deserialize, Serialize};

/// Commands a provider can be asked to run.
///
/// A provider answers the commands for the capabilities it serves and
/// returns an error response for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SignIn,
    SignOut,
    ListEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    UploadPhoto,
    ListPhotos,
    DeletePhoto,
}

/// Request sent from the CLI to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a provider to the CLI.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data }).unwrap()
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        serde_json::to_string(&Response::<()>::Error {
            error: msg.to_string(),
        })
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_snake_case_on_the_wire() {
        let json = serde_json::to_string(&Command::ListEvents).unwrap();
        assert_eq!(json, "\"list_events\"");

        let back: Command = serde_json::from_str("\"upload_photo\"").unwrap();
        assert_eq!(back, Command::UploadPhoto);
    }

    #[test]
    fn responses_are_status_tagged() {
        let ok = Response::success(serde_json::json!({"id": "abc"}));
        assert!(ok.contains("\"status\":\"success\""));

        let err: Response<serde_json::Value> =
            serde_json::from_str(&Response::error("boom")).unwrap();
        assert!(matches!(err, Response::Error { error } if error == "boom"));
    }
}
