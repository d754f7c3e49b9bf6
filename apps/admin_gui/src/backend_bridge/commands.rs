//! Backend commands queued from UI to backend worker.

use client_core::pages::FetchTicket;
use shared::{
    domain::{EnrolmentId, HelpOrderId, StudentId},
    protocol::{EnrolmentPayload, HelpOrderAnswer, StudentPayload},
};

/// The list screens whose fetches supersede each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Students,
    Enrolments,
    HelpOrders,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    FetchStudents(FetchTicket),
    DeleteStudent(StudentId),
    LoadStudent(StudentId),
    SaveStudent {
        editing: Option<StudentId>,
        payload: StudentPayload,
    },
    FetchEnrolments(FetchTicket),
    DeleteEnrolment(EnrolmentId),
    LoadEnrolmentForm {
        editing: Option<EnrolmentId>,
    },
    /// Re-queries the enrolment form's student options by name.
    SearchEnrolmentStudents(String),
    SaveEnrolment {
        editing: Option<EnrolmentId>,
        payload: EnrolmentPayload,
    },
    FetchUnansweredHelpOrders(FetchTicket),
    AnswerHelpOrder {
        id: HelpOrderId,
        payload: HelpOrderAnswer,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchStudents(_) => "fetch_students",
            Self::DeleteStudent(_) => "delete_student",
            Self::LoadStudent(_) => "load_student",
            Self::SaveStudent { .. } => "save_student",
            Self::FetchEnrolments(_) => "fetch_enrolments",
            Self::DeleteEnrolment(_) => "delete_enrolment",
            Self::LoadEnrolmentForm { .. } => "load_enrolment_form",
            Self::SearchEnrolmentStudents(_) => "search_enrolment_students",
            Self::SaveEnrolment { .. } => "save_enrolment",
            Self::FetchUnansweredHelpOrders(_) => "fetch_unanswered_help_orders",
            Self::AnswerHelpOrder { .. } => "answer_help_order",
        }
    }

    /// The list a fetch belongs to. A newer fetch for the same list makes the
    /// older one pointless, so the worker aborts it.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            Self::FetchStudents(_) => Some(ListKind::Students),
            Self::FetchEnrolments(_) => Some(ListKind::Enrolments),
            Self::FetchUnansweredHelpOrders(_) => Some(ListKind::HelpOrders),
            _ => None,
        }
    }
}
