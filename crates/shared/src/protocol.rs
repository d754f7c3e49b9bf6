use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PlanId, StudentId};

/// Response header carrying the page count of a list endpoint.
pub const TOTAL_PAGES_HEADER: &str = "total_pages";

/// Query string shared by every paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub q: String,
}

impl ListQuery {
    pub fn new(page: u32, per_page: u32, q: impl Into<String>) -> Self {
        Self {
            page,
            per_page,
            q: q.into(),
        }
    }
}

/// One page of a list response, normalized from the body and the
/// `total_pages` header.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub email: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolmentPayload {
    pub student_id: StudentId,
    pub plan_id: PlanId,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpOrderQuestion {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpOrderAnswer {
    pub answer: String,
}
