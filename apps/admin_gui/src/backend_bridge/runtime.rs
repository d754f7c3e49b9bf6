//! Backend worker: a dedicated thread running a tokio runtime that turns
//! queued [`BackendCommand`]s into API calls and reports back as [`UiEvent`]s.

use std::{collections::HashMap, sync::Arc, thread};

use client_core::{
    pages::{
        enrolments::{self, EnrolmentFormOptions},
        help_orders::HelpOrderScope,
        students, DeletableResource, ListResource,
    },
    GymApi,
};
use shared::domain::{Enrolment, HelpOrder, Student};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::{BackendCommand, ListKind};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Status text shown once the worker can accept commands. No request has
/// reached the server at this point.
pub const READY_MESSAGE: &str = "Backend pronto";

pub fn launch(api: Arc<dyn GymApi>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                emit(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )),
                );
                return;
            }
        };

        runtime.block_on(async move {
            emit(&ui_tx, UiEvent::Info(READY_MESSAGE.to_string()));
            let mut in_flight: HashMap<ListKind, JoinHandle<()>> = HashMap::new();

            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend worker received command");
                let list_kind = cmd.list_kind();
                let task = tokio::spawn(run_command(Arc::clone(&api), cmd, ui_tx.clone()));
                if let Some(kind) = list_kind {
                    if let Some(previous) = in_flight.insert(kind, task) {
                        previous.abort();
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if let Err(err) = ui_tx.try_send(event) {
        tracing::warn!("dropping backend event: {err}");
    }
}

async fn run_command(api: Arc<dyn GymApi>, cmd: BackendCommand, ui_tx: Sender<UiEvent>) {
    let api = api.as_ref();
    let event = match cmd {
        BackendCommand::FetchStudents(ticket) => {
            let result = Student::fetch(api, &(), &ticket.query)
                .await
                .map_err(|err| UiError::from_client(UiErrorContext::ListFetch, &err));
            UiEvent::StudentsLoaded { ticket, result }
        }
        BackendCommand::DeleteStudent(id) => match Student::delete(api, id).await {
            Ok(()) => UiEvent::StudentDeleted(id),
            Err(err) => UiEvent::StudentDeleteFailed {
                id,
                error: UiError::from_client(UiErrorContext::Delete, &err),
            },
        },
        BackendCommand::LoadStudent(id) => UiEvent::StudentLoaded(
            api.get_student(id)
                .await
                .map_err(|err| UiError::from_client(UiErrorContext::Load, &err)),
        ),
        BackendCommand::SaveStudent { editing, payload } => UiEvent::StudentSaved(
            students::save(api, editing, &payload)
                .await
                .map_err(|err| UiError::from_client(UiErrorContext::Save, &err)),
        ),
        BackendCommand::FetchEnrolments(ticket) => {
            let result = Enrolment::fetch(api, &(), &ticket.query)
                .await
                .map_err(|err| UiError::from_client(UiErrorContext::ListFetch, &err));
            UiEvent::EnrolmentsLoaded { ticket, result }
        }
        BackendCommand::DeleteEnrolment(id) => match Enrolment::delete(api, id).await {
            Ok(()) => UiEvent::EnrolmentDeleted(id),
            Err(err) => UiEvent::EnrolmentDeleteFailed {
                id,
                error: UiError::from_client(UiErrorContext::Delete, &err),
            },
        },
        BackendCommand::LoadEnrolmentForm { editing } => {
            let result = match editing {
                Some(id) => tokio::try_join!(
                    EnrolmentFormOptions::load(api, ""),
                    api.get_enrolment(id)
                )
                .map(|(options, enrolment)| (options, Some(enrolment))),
                None => EnrolmentFormOptions::load(api, "")
                    .await
                    .map(|options| (options, None)),
            };
            UiEvent::EnrolmentFormLoaded(
                result.map_err(|err| UiError::from_client(UiErrorContext::Load, &err)),
            )
        }
        BackendCommand::SearchEnrolmentStudents(query) => {
            let result = EnrolmentFormOptions::search_students(api, &query)
                .await
                .map_err(|err| UiError::from_client(UiErrorContext::Load, &err));
            UiEvent::EnrolmentStudentsFound { query, result }
        }
        BackendCommand::SaveEnrolment { editing, payload } => UiEvent::EnrolmentSaved(
            enrolments::save(api, editing, &payload)
                .await
                .map_err(|err| UiError::from_client(UiErrorContext::Save, &err)),
        ),
        BackendCommand::FetchUnansweredHelpOrders(ticket) => {
            let result = HelpOrder::fetch(api, &HelpOrderScope::Unanswered, &ticket.query)
                .await
                .map_err(|err| UiError::from_client(UiErrorContext::ListFetch, &err));
            UiEvent::HelpOrdersLoaded { ticket, result }
        }
        BackendCommand::AnswerHelpOrder { id, payload } => UiEvent::HelpOrderAnswered(
            api.answer_help_order(id, &payload)
                .await
                .map_err(|err| (id, UiError::from_client(UiErrorContext::Answer, &err))),
        ),
    };
    emit(&ui_tx, event);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use client_core::GymClient;
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn worker_reports_ready_before_any_request() {
        let api: Arc<dyn GymApi> = Arc::new(GymClient::new("http://127.0.0.1:9"));
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(4);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(4);
        launch(api, cmd_rx, ui_tx);

        match ui_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(UiEvent::Info(message)) => assert_eq!(message, "Backend pronto"),
            Ok(_) => panic!("expected the ready status first"),
            Err(err) => panic!("worker sent nothing: {err}"),
        }
        drop(cmd_tx);
    }
}
