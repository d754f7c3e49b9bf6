use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Enrolment, EnrolmentId, HelpOrder, HelpOrderId, Plan, Student, StudentId},
    error::{ApiErrorBody, ErrorCode},
    protocol::{
        EnrolmentPayload, HelpOrderAnswer, HelpOrderQuestion, ListQuery, Page, StudentPayload,
        TOTAL_PAGES_HEADER,
    },
};
use tracing::{debug, warn};

pub mod config;
pub mod error;
pub mod pages;

pub use config::{load_settings, ClientSettings};
pub use error::ClientError;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Every backend operation the clients perform. Page controllers only talk to
/// this trait so tests can swap the HTTP client for an in-memory fake.
#[async_trait]
pub trait GymApi: Send + Sync {
    async fn list_students(&self, query: &ListQuery) -> Result<Page<Student>>;
    async fn get_student(&self, id: StudentId) -> Result<Student>;
    async fn create_student(&self, payload: &StudentPayload) -> Result<Student>;
    async fn update_student(&self, id: StudentId, payload: &StudentPayload) -> Result<Student>;
    async fn delete_student(&self, id: StudentId) -> Result<()>;

    async fn list_plans(&self) -> Result<Vec<Plan>>;

    async fn list_enrolments(&self, query: &ListQuery) -> Result<Page<Enrolment>>;
    async fn get_enrolment(&self, id: EnrolmentId) -> Result<Enrolment>;
    async fn create_enrolment(&self, payload: &EnrolmentPayload) -> Result<Enrolment>;
    async fn update_enrolment(
        &self,
        id: EnrolmentId,
        payload: &EnrolmentPayload,
    ) -> Result<Enrolment>;
    async fn delete_enrolment(&self, id: EnrolmentId) -> Result<()>;

    async fn list_student_help_orders(
        &self,
        student_id: StudentId,
        query: &ListQuery,
    ) -> Result<Page<HelpOrder>>;
    async fn create_help_order(
        &self,
        student_id: StudentId,
        question: &HelpOrderQuestion,
    ) -> Result<HelpOrder>;
    async fn list_unanswered_help_orders(&self, query: &ListQuery) -> Result<Page<HelpOrder>>;
    async fn answer_help_order(
        &self,
        id: HelpOrderId,
        answer: &HelpOrderAnswer,
    ) -> Result<HelpOrder>;
}

pub struct GymClient {
    http: Client,
    base_url: String,
}

impl GymClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let base_url = settings.validated_api_url()?;
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn fetch_page<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Page<T>> {
        let response = check_status(request.send().await?).await?;
        let total_pages = parse_total_pages(response.headers())?;
        let items: Vec<T> = response.json().await?;
        Ok(Page::new(items, total_pages))
    }

    async fn fetch_empty(&self, request: RequestBuilder) -> Result<()> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into [`ClientError::Status`], keeping whatever
/// message the backend put in the body.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
    warn!(status = status.as_u16(), path = %url, "gym api request failed: {message}");

    Err(ClientError::Status {
        code: ErrorCode::from_status(status.as_u16()),
        status: status.as_u16(),
        message,
    })
}

/// A missing header means the backend does not paginate this list.
pub fn parse_total_pages(headers: &HeaderMap) -> Result<u32> {
    let Some(value) = headers.get(TOTAL_PAGES_HEADER) else {
        return Ok(1);
    };
    let invalid = || ClientError::InvalidHeader {
        name: TOTAL_PAGES_HEADER,
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    };
    value
        .to_str()
        .map_err(|_| invalid())?
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid())
}

#[async_trait]
impl GymApi for GymClient {
    async fn list_students(&self, query: &ListQuery) -> Result<Page<Student>> {
        debug!(page = query.page, q = %query.q, "listing students");
        self.fetch_page(self.http.get(self.url("/students")).query(query))
            .await
    }

    async fn get_student(&self, id: StudentId) -> Result<Student> {
        self.fetch_json(self.http.get(self.url(&format!("/students/{}", id.0))))
            .await
    }

    async fn create_student(&self, payload: &StudentPayload) -> Result<Student> {
        debug!(email = %payload.email, "creating student");
        self.fetch_json(self.http.post(self.url("/students")).json(payload))
            .await
    }

    async fn update_student(&self, id: StudentId, payload: &StudentPayload) -> Result<Student> {
        debug!(student_id = id.0, "updating student");
        self.fetch_json(
            self.http
                .put(self.url(&format!("/students/{}", id.0)))
                .json(payload),
        )
        .await
    }

    async fn delete_student(&self, id: StudentId) -> Result<()> {
        debug!(student_id = id.0, "deleting student");
        self.fetch_empty(self.http.delete(self.url(&format!("/students/{}", id.0))))
            .await
    }

    async fn list_plans(&self) -> Result<Vec<Plan>> {
        self.fetch_json(self.http.get(self.url("/plans"))).await
    }

    async fn list_enrolments(&self, query: &ListQuery) -> Result<Page<Enrolment>> {
        debug!(page = query.page, q = %query.q, "listing enrolments");
        self.fetch_page(self.http.get(self.url("/enrolments")).query(query))
            .await
    }

    async fn get_enrolment(&self, id: EnrolmentId) -> Result<Enrolment> {
        self.fetch_json(self.http.get(self.url(&format!("/enrolments/{}", id.0))))
            .await
    }

    async fn create_enrolment(&self, payload: &EnrolmentPayload) -> Result<Enrolment> {
        debug!(student_id = payload.student_id.0, plan_id = payload.plan_id.0, "creating enrolment");
        self.fetch_json(self.http.post(self.url("/enrolments")).json(payload))
            .await
    }

    async fn update_enrolment(
        &self,
        id: EnrolmentId,
        payload: &EnrolmentPayload,
    ) -> Result<Enrolment> {
        debug!(enrolment_id = id.0, "updating enrolment");
        self.fetch_json(
            self.http
                .put(self.url(&format!("/enrolments/{}", id.0)))
                .json(payload),
        )
        .await
    }

    async fn delete_enrolment(&self, id: EnrolmentId) -> Result<()> {
        debug!(enrolment_id = id.0, "deleting enrolment");
        self.fetch_empty(
            self.http
                .delete(self.url(&format!("/enrolments/{}", id.0))),
        )
        .await
    }

    async fn list_student_help_orders(
        &self,
        student_id: StudentId,
        query: &ListQuery,
    ) -> Result<Page<HelpOrder>> {
        debug!(student_id = student_id.0, page = query.page, "listing help orders");
        self.fetch_page(
            self.http
                .get(self.url(&format!("/students/{}/help-orders", student_id.0)))
                .query(query),
        )
        .await
    }

    async fn create_help_order(
        &self,
        student_id: StudentId,
        question: &HelpOrderQuestion,
    ) -> Result<HelpOrder> {
        debug!(student_id = student_id.0, "creating help order");
        self.fetch_json(
            self.http
                .post(self.url(&format!("/students/{}/help-orders", student_id.0)))
                .json(question),
        )
        .await
    }

    async fn list_unanswered_help_orders(&self, query: &ListQuery) -> Result<Page<HelpOrder>> {
        debug!(page = query.page, "listing unanswered help orders");
        self.fetch_page(self.http.get(self.url("/help-orders")).query(query))
            .await
    }

    async fn answer_help_order(
        &self,
        id: HelpOrderId,
        answer: &HelpOrderAnswer,
    ) -> Result<HelpOrder> {
        debug!(help_order_id = id.0, "answering help order");
        self.fetch_json(
            self.http
                .post(self.url(&format!("/help-orders/{}/answer", id.0)))
                .json(answer),
        )
        .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
