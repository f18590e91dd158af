//! famhub-provider-google - Google provider for famhub
//!
//! This binary implements the famhub provider protocol, communicating with
//! the famhub CLI via JSON over stdin/stdout. It serves all three
//! capabilities against Google services: identity (OAuth sign-in), the
//! shared calendar (Calendar v3) and the photo album (Cloud Storage +
//! Firestore).
//!
//! The provider manages its own credentials and tokens:
//!   ~/.config/famhub/providers/google/credentials.json
//!   ~/.config/famhub/providers/google/tokens.json

mod calendar;
mod config;
mod convert;
mod firestore;
mod oauth;
mod photos;
mod types;

use famhub_core::protocol::{Command, Request, Response};
use serde::Deserialize;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = Response::error(&format!("Failed to parse request: {}", e));
                writeln!(stdout, "{}", response).unwrap();
                stdout.flush().unwrap();
                continue;
            }
        };

        let response = handle_request(request).await;

        writeln!(stdout, "{}", response).unwrap();
        stdout.flush().unwrap();
    }
}

async fn handle_request(request: Request) -> String {
    match request.command {
        Command::SignIn => handle_sign_in().await,
        Command::SignOut => handle_sign_out().await,
        Command::ListEvents => handle_list_events(&request.params).await,
        Command::CreateEvent => handle_create_event(&request.params).await,
        Command::UpdateEvent => handle_update_event(&request.params).await,
        Command::DeleteEvent => handle_delete_event(&request.params).await,
        Command::UploadPhoto => handle_upload_photo(&request.params).await,
        Command::ListPhotos => handle_list_photos(&request.params).await,
        Command::DeletePhoto => handle_delete_photo(&request.params).await,
    }
}

async fn handle_sign_in() -> String {
    match oauth::sign_in().await {
        Ok(user) => Response::success(user),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

async fn handle_sign_out() -> String {
    match oauth::sign_out().await {
        Ok(()) => Response::success(()),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct ListEventsParams {
    calendar_id: String,
    time_min: String,
    time_max: String,
    max_results: u32,
}

async fn handle_list_events(params: &serde_json::Value) -> String {
    let params: ListEventsParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match calendar::list_events(
        &params.calendar_id,
        &params.time_min,
        &params.time_max,
        params.max_results,
    )
    .await
    {
        Ok(events) => Response::success(events),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct CreateEventParams {
    calendar_id: String,
    event: famhub_core::event::EventDraft,
}

async fn handle_create_event(params: &serde_json::Value) -> String {
    let params: CreateEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match calendar::create_event(&params.calendar_id, &params.event).await {
        Ok(event) => Response::success(event),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct UpdateEventParams {
    calendar_id: String,
    event_id: String,
    patch: famhub_core::event::EventPatch,
}

async fn handle_update_event(params: &serde_json::Value) -> String {
    let params: UpdateEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match calendar::update_event(&params.calendar_id, &params.event_id, &params.patch).await {
        Ok(event) => Response::success(event),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct DeleteEventParams {
    calendar_id: String,
    event_id: String,
}

async fn handle_delete_event(params: &serde_json::Value) -> String {
    let params: DeleteEventParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match calendar::delete_event(&params.calendar_id, &params.event_id).await {
        Ok(()) => Response::success(()),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct UploadPhotoParams {
    bucket: String,
    project: String,
    file_path: String,
    uploaded_by: String,
    uploaded_by_name: String,
}

async fn handle_upload_photo(params: &serde_json::Value) -> String {
    let params: UploadPhotoParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match photos::upload_photo(
        &params.bucket,
        &params.project,
        &params.file_path,
        &params.uploaded_by,
        &params.uploaded_by_name,
    )
    .await
    {
        Ok(photo) => Response::success(photo),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct ListPhotosParams {
    project: String,
}

async fn handle_list_photos(params: &serde_json::Value) -> String {
    let params: ListPhotosParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match photos::list_photos(&params.project).await {
        Ok(photos) => Response::success(photos),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}

#[derive(Debug, Deserialize)]
struct DeletePhotoParams {
    bucket: String,
    project: String,
    photo_id: String,
    storage_path: String,
}

async fn handle_delete_photo(params: &serde_json::Value) -> String {
    let params: DeletePhotoParams = match serde_json::from_value(params.clone()) {
        Ok(p) => p,
        Err(e) => return Response::error(&format!("Invalid params: {}", e)),
    };

    match photos::delete_photo(
        &params.bucket,
        &params.project,
        &params.photo_id,
        &params.storage_path,
    )
    .await
    {
        Ok(()) => Response::success(()),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}
