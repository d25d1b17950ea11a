//! HTTP client for the admissions backend
//!
//! One fixed origin, JSON bodies, no retries. Non-2xx responses surface
//! the backend's `detail` text so the UI can show it verbatim.

use super::error::{extract_detail, ApiError};
use super::traits::{AdmissionsApi, ApiResult};
use crate::state::wizard::SubmissionPayload;
use crate::state::{
    AdminIdentity, Application, ApplicationStatus, Course, GroupOverview, Institution,
    LookupResult, OfferAction, ProfileUpdate, StudentIdentity, SubmissionOutcome,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Serialize)]
struct AdminLoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct StudentLoginRequest<'a> {
    email: &'a str,
    dob: &'a str,
}

#[derive(Serialize)]
struct StatusUpdateRequest {
    status: ApplicationStatus,
}

#[derive(Serialize)]
struct AskAiRequest<'a> {
    question: &'a str,
    institution_id: Option<i64>,
}

#[derive(Serialize)]
struct OfferRequest {
    action: OfferAction,
}

#[derive(Serialize)]
struct PaymentRequest<'a> {
    amount: f64,
    application_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MessageResponse {
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AskAiResponse {
    answer: String,
}

/// Client for the admissions REST backend
#[derive(Debug, Clone)]
pub struct AdmissionsClient {
    client: Client,
    base_url: String,
}

impl AdmissionsClient {
    /// Create a client for `base_url`; an optional timeout applies to every request
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body, mapping failures to `ApiError`
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!("Admissions request failed: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AdmissionsApi for AdmissionsClient {
    async fn list_institutions(&self) -> ApiResult<Vec<Institution>> {
        self.send(self.client.get(self.url("/institutions/"))).await
    }

    async fn list_courses(&self, institution_id: i64) -> ApiResult<Vec<Course>> {
        let url = self.url(&format!("/institutions/{}/courses", institution_id));
        self.send(self.client.get(url)).await
    }

    async fn lookup_student(&self, email: &str) -> ApiResult<LookupResult> {
        let request = self
            .client
            .get(self.url("/student/lookup/"))
            .query(&[("email", email)]);
        self.send(request).await
    }

    async fn submit_application(
        &self,
        payload: &SubmissionPayload,
    ) -> ApiResult<SubmissionOutcome> {
        let request = self
            .client
            .post(self.url("/submit-application/"))
            .json(payload);
        self.send(request).await
    }

    async fn admin_login(&self, email: &str, password: &str) -> ApiResult<AdminIdentity> {
        let request = self
            .client
            .post(self.url("/admin/login/"))
            .json(&AdminLoginRequest { email, password });
        self.send(request).await
    }

    async fn group_overview(&self) -> ApiResult<GroupOverview> {
        self.send(self.client.get(self.url("/admin/analytics/group-overview")))
            .await
    }

    async fn institution_applications(&self, institution_id: i64) -> ApiResult<Vec<Application>> {
        let url = self.url(&format!("/admin/applications/{}", institution_id));
        self.send(self.client.get(url)).await
    }

    async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
    ) -> ApiResult<()> {
        let url = self.url(&format!("/admin/application/{}/status", application_id));
        let request = self.client.put(url).json(&StatusUpdateRequest { status });
        let _: MessageResponse = self.send(request).await?;
        Ok(())
    }

    async fn ask_ai(&self, question: &str, institution_id: Option<i64>) -> ApiResult<String> {
        let request = self
            .client
            .post(self.url("/admin/ask-ai/"))
            .json(&AskAiRequest {
                question,
                institution_id,
            });
        let response: AskAiResponse = self.send(request).await?;
        Ok(response.answer)
    }

    async fn student_login(&self, email: &str, dob: &str) -> ApiResult<StudentIdentity> {
        let request = self
            .client
            .post(self.url("/student/login/"))
            .json(&StudentLoginRequest { email, dob });
        self.send(request).await
    }

    async fn my_applications(&self, email: &str) -> ApiResult<Vec<Application>> {
        let request = self
            .client
            .get(self.url("/student/my-applications/"))
            .query(&[("email", email)]);
        self.send(request).await
    }

    async fn respond_offer(&self, reference: &str, action: OfferAction) -> ApiResult<String> {
        let request = self
            .client
            .post(self.url("/student/respond-offer/"))
            .query(&[("application_id", reference)])
            .json(&OfferRequest { action });
        let response: MessageResponse = self.send(request).await?;
        Ok(response.message.unwrap_or_default())
    }

    async fn update_profile(&self, reference: &str, update: &ProfileUpdate) -> ApiResult<()> {
        let request = self
            .client
            .put(self.url("/student/update-profile/"))
            .query(&[("application_id", reference)])
            .json(update);
        let _: MessageResponse = self.send(request).await?;
        Ok(())
    }

    async fn pay_fee(&self, reference: &str, amount: f64) -> ApiResult<()> {
        let request = self
            .client
            .post(self.url("/student/pay-fee/"))
            .json(&PaymentRequest {
                amount,
                application_id: reference,
            });
        let _: MessageResponse = self.send(request).await?;
        Ok(())
    }
}
