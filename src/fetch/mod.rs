mod client;
mod basic;
pub mod auth;

pub use client::{HttpClient, Reply};
pub use basic::BasicClient;

use crate::error::{ConsoleError, Result};
use reqwest::StatusCode;

/// Executes `req` and returns the body of a successful reply.
///
/// A 401 means the stored token was rejected and is reported as
/// [`ConsoleError::Unauthenticated`]; any other non-success status becomes
/// [`ConsoleError::RequestFailed`] carrying the status and body text.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(
    client: &C,
    req: reqwest::Request,
) -> Result<Vec<u8>> {
    let reply = client.execute(req).await?;

    if reply.status == StatusCode::UNAUTHORIZED {
        return Err(ConsoleError::Unauthenticated);
    }
    if !reply.status.is_success() {
        return Err(ConsoleError::RequestFailed(format!(
            "server returned status {}: {}",
            reply.status,
            reply.text()
        )));
    }

    Ok(reply.body)
}
