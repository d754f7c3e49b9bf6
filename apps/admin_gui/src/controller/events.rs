//! Backend-to-UI events and error modeling for the admin dashboard.

use client_core::{
    pages::{enrolments::EnrolmentFormOptions, FetchTicket},
    ClientError,
};
use shared::{
    domain::{Enrolment, EnrolmentId, HelpOrder, HelpOrderId, Student, StudentId},
    error::ErrorCode,
    protocol::Page,
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    StudentsLoaded {
        ticket: FetchTicket,
        result: Result<Page<Student>, UiError>,
    },
    StudentDeleted(StudentId),
    StudentDeleteFailed {
        id: StudentId,
        error: UiError,
    },
    StudentLoaded(Result<Student, UiError>),
    StudentSaved(Result<Student, UiError>),
    EnrolmentsLoaded {
        ticket: FetchTicket,
        result: Result<Page<Enrolment>, UiError>,
    },
    EnrolmentDeleted(EnrolmentId),
    EnrolmentDeleteFailed {
        id: EnrolmentId,
        error: UiError,
    },
    EnrolmentFormLoaded(Result<(EnrolmentFormOptions, Option<Enrolment>), UiError>),
    EnrolmentStudentsFound {
        query: String,
        result: Result<Vec<Student>, UiError>,
    },
    EnrolmentSaved(Result<Enrolment, UiError>),
    HelpOrdersLoaded {
        ticket: FetchTicket,
        result: Result<Page<HelpOrder>, UiError>,
    },
    HelpOrderAnswered(Result<HelpOrder, (HelpOrderId, UiError)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    NotFound,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    ListFetch,
    Delete,
    Load,
    Save,
    Answer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport(_) => UiErrorCategory::Transport,
            ClientError::Status { code, .. } => match code {
                ErrorCode::Validation => UiErrorCategory::Validation,
                ErrorCode::NotFound => UiErrorCategory::NotFound,
                ErrorCode::Internal => UiErrorCategory::Server,
                _ => UiErrorCategory::Unknown,
            },
            ClientError::InvalidHeader { .. } => UiErrorCategory::Server,
            ClientError::Config(_) => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Classifies free-form worker messages that never went through the API
    /// client, such as runtime startup failures.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("timed out")
            || lower.contains("connection")
            || lower.contains("disconnected")
            || lower.contains("unreachable")
        {
            UiErrorCategory::Transport
        } else if lower.contains("invalid") || lower.contains("malformed") {
            UiErrorCategory::Validation
        } else if lower.contains("not found") {
            UiErrorCategory::NotFound
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status line text, e.g. `Conexão: error sending request`.
    pub fn status_line(&self) -> String {
        format!("{}: {}", category_label(self.category), self.message)
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

fn category_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Conexão",
        UiErrorCategory::Validation => "Dados inválidos",
        UiErrorCategory::NotFound => "Não encontrado",
        UiErrorCategory::Server => "Servidor",
        UiErrorCategory::Unknown => "Erro",
    }
}
