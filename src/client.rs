use crate::errors::{Result, SlidesError};
use crate::generator::SlideGenerator;
use crate::models::presentation::Presentation;
use crate::models::requests::{BatchUpdateRequest, BatchUpdateResponse};
use log::{debug, info};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

const SLIDES_API: &str = "https://slides.googleapis.com/v1/presentations";
const SCOPES: &[&str] = &["https://www.googleapis.com/auth/presentations"];

/// Helper struct to attempt parsing standard Google API error responses.
#[derive(Deserialize, Debug)]
struct GoogleApiErrorResponse {
    error: GoogleApiErrorDetail,
}

/// Details within a standard Google API error response.
#[allow(unused)]
#[derive(Deserialize, Debug)]
struct GoogleApiErrorDetail {
    code: i32,
    message: String,
    status: String,
}

/// Obtains a bearer token for the service account named by the
/// `GOOGLE_APPLICATION_CREDENTIALS` environment variable.
async fn access_token() -> Result<String> {
    let key_file_path = env::var("GOOGLE_APPLICATION_CREDENTIALS")?;
    let sa_key = read_service_account_key(Path::new(&key_file_path))
        .await
        .map_err(|e| {
            SlidesError::AuthSetupError(format!(
                "Failed to read service account key from '{}': {}",
                key_file_path, e
            ))
        })?;
    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;
    let token = auth.token(SCOPES).await?;
    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| SlidesError::AuthSetupError("OAuth token is missing its access token".to_string()))
}

/// Decodes a successful response body, or maps an error status to `SlidesError::ApiError`.
async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            let json_snippet = String::from_utf8_lossy(&bytes[..bytes.len().min(500)]);
            debug!("Failing JSON snippet:\n{}", json_snippet);
            SlidesError::Json(e)
        })
    } else {
        let error_text = response.text().await?;
        let message = match serde_json::from_str::<GoogleApiErrorResponse>(&error_text) {
            Ok(google_error) => google_error.error.message,
            Err(_) => format!("API request failed with status {}: {}", status, error_text),
        };
        Err(SlidesError::ApiError { status, message })
    }
}

fn require_id(presentation_id: &str) -> Result<()> {
    if presentation_id.is_empty() {
        return Err(SlidesError::InvalidInput(
            "Presentation ID cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Fetches a presentation resource from the Google Slides API using Service Account credentials.
///
/// Reads the service account key file path from the `GOOGLE_APPLICATION_CREDENTIALS`
/// environment variable. Ensure `dotenvy::dotenv().ok();` has been called beforehand.
pub async fn get_presentation_sa(
    presentation_id: &str,
    http_client: &reqwest::Client,
) -> Result<Presentation> {
    require_id(presentation_id)?;
    let access_token = access_token().await?;

    let response = http_client
        .get(format!("{}/{}", SLIDES_API, presentation_id))
        .header(AUTHORIZATION, format!("Bearer {}", access_token))
        .header(ACCEPT, "application/json")
        .send()
        .await?;
    read_response(response).await
}

/// Applies a batch of requests to a presentation. The server applies the whole batch
/// atomically: if any request fails, none are applied.
pub async fn batch_update_sa(
    presentation_id: &str,
    batch: &BatchUpdateRequest,
    http_client: &reqwest::Client,
) -> Result<BatchUpdateResponse> {
    require_id(presentation_id)?;
    if batch.requests.is_empty() {
        debug!("[batch_update_sa] Nothing to send for {}", presentation_id);
        return Ok(BatchUpdateResponse {
            presentation_id: presentation_id.to_string(),
            replies: Vec::new(),
        });
    }
    let access_token = access_token().await?;

    let response = http_client
        .post(format!("{}/{}:batchUpdate", SLIDES_API, presentation_id))
        .header(AUTHORIZATION, format!("Bearer {}", access_token))
        .header(ACCEPT, "application/json")
        .json(batch)
        .send()
        .await?;
    read_response(response).await
}

/// Creates an empty presentation with the given title.
pub async fn create_presentation_sa(
    title: &str,
    http_client: &reqwest::Client,
) -> Result<Presentation> {
    let access_token = access_token().await?;

    let response = http_client
        .post(SLIDES_API)
        .header(AUTHORIZATION, format!("Bearer {}", access_token))
        .header(ACCEPT, "application/json")
        .json(&json!({ "title": title }))
        .send()
        .await?;
    read_response(response).await
}

/// Compiles `markdown` and builds the slides in an existing presentation.
///
/// Runs two sequential round trips: the creation batch, then a reload of the
/// presentation so placeholder ids are known, then the population batch.
pub async fn generate_slides_sa(
    presentation_id: &str,
    markdown: &str,
    generator: &mut SlideGenerator,
    http_client: &reqwest::Client,
) -> Result<Presentation> {
    let mut slides = generator.compile(markdown)?;
    let presentation = get_presentation_sa(presentation_id, http_client).await?;

    let creation = generator.plan_creation(&presentation, &mut slides)?;
    batch_update_sa(presentation_id, &creation, http_client).await?;
    info!(
        "Created {} slides in {}",
        slides.len(),
        presentation_id
    );

    let reloaded = get_presentation_sa(presentation_id, http_client).await?;
    let population = generator.plan_population(&reloaded, &slides)?;
    batch_update_sa(presentation_id, &population, http_client).await?;
    info!(
        "Applied {} population requests to {}",
        population.requests.len(),
        presentation_id
    );

    get_presentation_sa(presentation_id, http_client).await
}
