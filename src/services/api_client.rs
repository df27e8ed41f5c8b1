use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::booking::{BookingConfirmation, BookingRequest};
use crate::models::hostel::{Envelope, HostelRecord};
use crate::models::lenient;
use crate::models::profile::UpdatePayload;

/// The backend calls the booking and profile flows depend on.
pub trait HostelApi {
    async fn fetch_hostel(&self, hostel_id: &str) -> Result<HostelRecord, ApiError>;

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation, ApiError>;

    async fn update_hostel(&self, hostel_id: &str, payload: UpdatePayload) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct BookingResponse {
    success: Option<bool>,
    #[serde(rename = "bookingId")]
    booking_id: Option<Value>,
    message: Option<String>,
}

pub struct ApiClient {
    http: ReqwestClient,
    config: ApiConfig,
    api_root: Url,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = ReqwestClient::builder().timeout(config.timeout).build()?;
        let api_root = config.api_root();
        Ok(Self {
            http,
            config,
            api_root,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Endpoint(self.api_root.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl HostelApi for ApiClient {
    async fn fetch_hostel(&self, hostel_id: &str) -> Result<HostelRecord, ApiError> {
        let url = self.endpoint(&["hostel", hostel_id])?;
        debug!("GET {}", url);

        let response = self.authorize(self.http.get(url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(hostel_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let envelope: Envelope<HostelRecord> = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("hostel {}: {}", hostel_id, e)))?;

        envelope
            .data
            .ok_or_else(|| ApiError::NotFound(hostel_id.to_string()))
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation, ApiError> {
        if self.config.token.is_none() {
            return Err(ApiError::MissingToken);
        }
        let url = self.endpoint(&["booking", "newbooking"])?;
        debug!("POST {} for hostel {}", url, request.hostel_id);

        let response = self.authorize(self.http.post(url)).json(request).send().await?;
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let body: BookingResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("booking response: {}", e)))?;

        if body.success != Some(true) {
            return Err(ApiError::Rejected(
                body.message.unwrap_or_else(|| "Booking failed".to_string()),
            ));
        }

        let booking_id = body
            .booking_id
            .as_ref()
            .and_then(lenient::text)
            .ok_or_else(|| ApiError::Decode("booking response has no bookingId".to_string()))?;

        Ok(BookingConfirmation { booking_id })
    }

    async fn update_hostel(&self, hostel_id: &str, payload: UpdatePayload) -> Result<(), ApiError> {
        let url = self.endpoint(&["hostel", "update", hostel_id])?;
        debug!(
            "PUT {} with {} new image(s)",
            url,
            payload.new_images.len()
        );

        let form = multipart_form(payload)?;
        let response = self.authorize(self.http.put(url)).multipart(form).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(hostel_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(error_from(response).await);
        }

        let text = response.text().await?;
        if let Ok(envelope) = serde_json::from_str::<Envelope<Value>>(&text) {
            if envelope.rejected() {
                return Err(ApiError::Rejected(
                    envelope.message.unwrap_or_else(|| "Update failed".to_string()),
                ));
            }
        }
        Ok(())
    }
}

fn json_part<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn multipart_form(payload: UpdatePayload) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("pgName", payload.name)
        .text("pgInfo", payload.description)
        .text("pgType", payload.pg_type)
        .text("location", json_part(&payload.location)?)
        .text("sharing", json_part(&payload.sharing)?)
        .text("rules", json_part(&payload.rules)?)
        .text("furnish", json_part(&payload.amenities)?)
        .text("foodMenu", json_part(&payload.food_menu)?)
        .text("existingImages", json_part(&payload.existing_images)?);

    for image in payload.new_images {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        form = form.part("images", part);
    }
    Ok(form)
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(lenient::text)
        })
        .unwrap_or(body);
    warn!("Backend answered {}: {}", status, message);
    ApiError::Status { status, message }
}
