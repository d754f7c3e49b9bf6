//! Reducer-like state transitions for the admin dashboard.
//!
//! [`apply_action`] and [`apply_event`] mutate [`AppState`] and return the
//! backend commands the transition requires. Neither touches egui or the
//! network, so every screen rule is testable without a window or a server.

use client_core::{
    pages::{
        enrolments::{self, EnrolmentForm, EnrolmentFormOptions},
        help_orders::{self, AnswerForm},
        students::{self, StudentForm},
        ConfirmDialog, DeletableResource, FetchOutcome, FormErrors, ListPage, Listed, Toasts,
    },
    ClientSettings,
};
use shared::domain::{Enrolment, EnrolmentId, HelpOrder, HelpOrderId, Student, StudentId};

use crate::backend_bridge::commands::{BackendCommand, ListKind};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const STUDENT_LOAD_FAILURE: &str = "Erro ao carregar aluno";
const ENROLMENT_FORM_LOAD_FAILURE: &str = "Erro ao carregar dados da matrícula";
const STUDENT_SEARCH_FAILURE: &str = "Erro ao buscar alunos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Students,
    StudentForm(Option<StudentId>),
    Enrolments,
    EnrolmentForm(Option<EnrolmentId>),
    HelpOrders,
}

impl Route {
    /// The top navigation entry highlighted for this route.
    pub fn section(self) -> ListKind {
        match self {
            Self::Students | Self::StudentForm(_) => ListKind::Students,
            Self::Enrolments | Self::EnrolmentForm(_) => ListKind::Enrolments,
            Self::HelpOrders => ListKind::HelpOrders,
        }
    }
}

pub struct ListScreen<R> {
    pub list: ListPage<R>,
    pub dialog: ConfirmDialog<R>,
    /// Text typed into the filter box; applied on Enter.
    pub filter_draft: String,
}

impl<R: Listed> ListScreen<R> {
    fn new(settings: &ClientSettings) -> Self {
        Self {
            list: ListPage::new(settings.per_page)
                .with_filter_reset(settings.reset_page_on_filter),
            dialog: ConfirmDialog::default(),
            filter_draft: String::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct StudentFormScreen {
    pub editing: Option<StudentId>,
    pub form: StudentForm,
    pub errors: FormErrors,
    pub loading: bool,
    pub saving: bool,
}

#[derive(Debug, Default)]
pub struct EnrolmentFormScreen {
    pub editing: Option<EnrolmentId>,
    pub form: EnrolmentForm,
    pub errors: FormErrors,
    pub options: EnrolmentFormOptions,
    /// Name of the edited enrolment's student, for when they fall outside
    /// the loaded options.
    pub student_label: Option<String>,
    pub student_search: String,
    /// The search last sent to the backend; older results are ignored.
    pub pending_search: Option<String>,
    pub loading: bool,
    pub saving: bool,
}

impl EnrolmentFormScreen {
    pub fn student_choices(&self) -> Vec<&Student> {
        let needle = self.student_search.trim().to_lowercase();
        self.options
            .students
            .iter()
            .filter(|student| needle.is_empty() || student.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn selected_student_label(&self) -> Option<String> {
        let student_id = self.form.student_id?;
        self.options
            .students
            .iter()
            .find(|student| student.id == student_id)
            .map(|student| student.name.clone())
            .or_else(|| self.student_label.clone())
    }
}

pub struct HelpOrdersScreen {
    pub list: ListPage<HelpOrder>,
    pub answering: Option<HelpOrder>,
    pub answer: AnswerForm,
    pub errors: FormErrors,
    pub sending: bool,
}

pub struct AppState {
    pub route: Route,
    pub students: ListScreen<Student>,
    pub enrolments: ListScreen<Enrolment>,
    pub help_orders: HelpOrdersScreen,
    pub student_form: StudentFormScreen,
    pub enrolment_form: EnrolmentFormScreen,
    pub toasts: Toasts,
    pub status: String,
    pub banner: Option<UiError>,
}

impl AppState {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            route: Route::Students,
            students: ListScreen::new(settings),
            enrolments: ListScreen::new(settings),
            help_orders: HelpOrdersScreen {
                list: ListPage::new(settings.per_page),
                answering: None,
                answer: AnswerForm::default(),
                errors: FormErrors::default(),
                sending: false,
            },
            student_form: StudentFormScreen::default(),
            enrolment_form: EnrolmentFormScreen::default(),
            toasts: Toasts::default(),
            status: String::new(),
            banner: None,
        }
    }

    fn begin_fetch(&mut self, kind: ListKind) -> BackendCommand {
        match kind {
            ListKind::Students => BackendCommand::FetchStudents(self.students.list.begin_fetch()),
            ListKind::Enrolments => {
                BackendCommand::FetchEnrolments(self.enrolments.list.begin_fetch())
            }
            ListKind::HelpOrders => {
                BackendCommand::FetchUnansweredHelpOrders(self.help_orders.list.begin_fetch())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Navigate(Route),
    /// Applies the list's `filter_draft`.
    SubmitFilter(ListKind),
    SelectPage(ListKind, u32),
    Retry(ListKind),
    RequestStudentDelete(StudentId),
    RequestEnrolmentDelete(EnrolmentId),
    ConfirmDelete(ListKind),
    CancelDelete(ListKind),
    SaveStudent,
    SaveEnrolment,
    /// Asks the backend for students matching `student_search`.
    SearchEnrolmentStudents,
    OpenAnswer(HelpOrderId),
    SubmitAnswer,
    CancelAnswer,
    DismissToast(usize),
    DismissBanner,
}

pub fn apply_action(state: &mut AppState, action: UiAction) -> Vec<BackendCommand> {
    match action {
        UiAction::Navigate(route) => navigate(state, route),
        UiAction::SubmitFilter(kind) => {
            let changed = match kind {
                ListKind::Students => {
                    let draft = state.students.filter_draft.clone();
                    state.students.list.submit_filter(&draft)
                }
                ListKind::Enrolments => {
                    let draft = state.enrolments.filter_draft.clone();
                    state.enrolments.list.submit_filter(&draft)
                }
                ListKind::HelpOrders => false,
            };
            if changed {
                vec![state.begin_fetch(kind)]
            } else {
                Vec::new()
            }
        }
        UiAction::SelectPage(kind, page) => {
            let changed = match kind {
                ListKind::Students => state.students.list.select_page(page),
                ListKind::Enrolments => state.enrolments.list.select_page(page),
                ListKind::HelpOrders => state.help_orders.list.select_page(page),
            };
            if changed {
                vec![state.begin_fetch(kind)]
            } else {
                Vec::new()
            }
        }
        UiAction::Retry(kind) => vec![state.begin_fetch(kind)],
        UiAction::RequestStudentDelete(id) => {
            request_delete(&mut state.students, id);
            Vec::new()
        }
        UiAction::RequestEnrolmentDelete(id) => {
            request_delete(&mut state.enrolments, id);
            Vec::new()
        }
        UiAction::ConfirmDelete(kind) => match kind {
            ListKind::Students => state
                .students
                .dialog
                .confirm()
                .map(|student| BackendCommand::DeleteStudent(student.id))
                .into_iter()
                .collect(),
            ListKind::Enrolments => state
                .enrolments
                .dialog
                .confirm()
                .map(|enrolment| BackendCommand::DeleteEnrolment(enrolment.id))
                .into_iter()
                .collect(),
            ListKind::HelpOrders => Vec::new(),
        },
        UiAction::CancelDelete(kind) => {
            match kind {
                ListKind::Students => state.students.dialog.cancel(),
                ListKind::Enrolments => state.enrolments.dialog.cancel(),
                ListKind::HelpOrders => {}
            }
            Vec::new()
        }
        UiAction::SaveStudent => save_student(&mut state.student_form),
        UiAction::SaveEnrolment => save_enrolment(&mut state.enrolment_form),
        UiAction::SearchEnrolmentStudents => {
            let screen = &mut state.enrolment_form;
            if screen.loading {
                return Vec::new();
            }
            let query = screen.student_search.trim().to_string();
            screen.pending_search = Some(query.clone());
            vec![BackendCommand::SearchEnrolmentStudents(query)]
        }
        UiAction::OpenAnswer(id) => {
            let screen = &mut state.help_orders;
            screen.answering = screen
                .list
                .items()
                .iter()
                .find(|order| order.id == id)
                .cloned();
            screen.answer = AnswerForm::default();
            screen.errors = FormErrors::default();
            Vec::new()
        }
        UiAction::SubmitAnswer => submit_answer(&mut state.help_orders),
        UiAction::CancelAnswer => {
            state.help_orders.answering = None;
            state.help_orders.errors = FormErrors::default();
            Vec::new()
        }
        UiAction::DismissToast(index) => {
            state.toasts.dismiss(index);
            Vec::new()
        }
        UiAction::DismissBanner => {
            state.banner = None;
            Vec::new()
        }
    }
}

fn navigate(state: &mut AppState, route: Route) -> Vec<BackendCommand> {
    tracing::debug!(?route, "navigating");
    state.route = route;
    match route {
        Route::Students => vec![state.begin_fetch(ListKind::Students)],
        Route::Enrolments => vec![state.begin_fetch(ListKind::Enrolments)],
        Route::HelpOrders => {
            state.help_orders.answering = None;
            vec![state.begin_fetch(ListKind::HelpOrders)]
        }
        Route::StudentForm(editing) => {
            state.student_form = StudentFormScreen {
                editing,
                loading: editing.is_some(),
                ..StudentFormScreen::default()
            };
            editing.map(BackendCommand::LoadStudent).into_iter().collect()
        }
        Route::EnrolmentForm(editing) => {
            state.enrolment_form = EnrolmentFormScreen {
                editing,
                loading: true,
                ..EnrolmentFormScreen::default()
            };
            vec![BackendCommand::LoadEnrolmentForm { editing }]
        }
    }
}

fn request_delete<R: DeletableResource>(screen: &mut ListScreen<R>, id: R::Id) {
    let item = screen
        .list
        .items()
        .iter()
        .find(|item| item.list_id() == id)
        .cloned();
    match item {
        Some(item) => screen
            .dialog
            .open(R::DELETE_TITLE, item.delete_prompt(), item),
        None => tracing::warn!(?id, "delete requested for a row that is not listed"),
    }
}

fn save_student(screen: &mut StudentFormScreen) -> Vec<BackendCommand> {
    if screen.saving || screen.loading {
        return Vec::new();
    }
    match screen.form.validate() {
        Ok(payload) => {
            screen.errors = FormErrors::default();
            screen.saving = true;
            vec![BackendCommand::SaveStudent {
                editing: screen.editing,
                payload,
            }]
        }
        Err(errors) => {
            screen.errors = errors;
            Vec::new()
        }
    }
}

fn save_enrolment(screen: &mut EnrolmentFormScreen) -> Vec<BackendCommand> {
    if screen.saving || screen.loading {
        return Vec::new();
    }
    match screen.form.validate(&screen.options.plans) {
        Ok(payload) => {
            screen.errors = FormErrors::default();
            screen.saving = true;
            vec![BackendCommand::SaveEnrolment {
                editing: screen.editing,
                payload,
            }]
        }
        Err(errors) => {
            screen.errors = errors;
            Vec::new()
        }
    }
}

fn submit_answer(screen: &mut HelpOrdersScreen) -> Vec<BackendCommand> {
    if screen.sending {
        return Vec::new();
    }
    let Some(id) = screen.answering.as_ref().map(|order| order.id) else {
        return Vec::new();
    };
    match screen.answer.validate() {
        Ok(payload) => {
            screen.errors = FormErrors::default();
            screen.sending = true;
            vec![BackendCommand::AnswerHelpOrder { id, payload }]
        }
        Err(errors) => {
            screen.errors = errors;
            Vec::new()
        }
    }
}

pub fn apply_event(state: &mut AppState, event: UiEvent) -> Vec<BackendCommand> {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
            Vec::new()
        }
        UiEvent::Error(err) => {
            state.status = err.status_line();
            if err.context() == UiErrorContext::BackendStartup {
                state.banner = Some(err);
            }
            Vec::new()
        }
        UiEvent::StudentsLoaded { ticket, result } => {
            let outcome = state.students.list.finish_fetch(&ticket, result);
            after_fetch(state, ListKind::Students, outcome)
        }
        UiEvent::EnrolmentsLoaded { ticket, result } => {
            let outcome = state.enrolments.list.finish_fetch(&ticket, result);
            after_fetch(state, ListKind::Enrolments, outcome)
        }
        UiEvent::HelpOrdersLoaded { ticket, result } => {
            let outcome = state.help_orders.list.finish_fetch(&ticket, result);
            after_fetch(state, ListKind::HelpOrders, outcome)
        }
        UiEvent::StudentDeleted(id) => {
            state.students.list.remove(id);
            state.toasts.success(Student::DELETE_SUCCESS);
            Vec::new()
        }
        UiEvent::StudentDeleteFailed { id, error } => {
            tracing::warn!(?id, "student delete failed: {error}");
            state.status = error.status_line();
            state.toasts.error(Student::DELETE_FAILURE);
            Vec::new()
        }
        UiEvent::EnrolmentDeleted(id) => {
            state.enrolments.list.remove(id);
            state.toasts.success(Enrolment::DELETE_SUCCESS);
            Vec::new()
        }
        UiEvent::EnrolmentDeleteFailed { id, error } => {
            tracing::warn!(?id, "enrolment delete failed: {error}");
            state.status = error.status_line();
            state.toasts.error(Enrolment::DELETE_FAILURE);
            Vec::new()
        }
        UiEvent::StudentLoaded(result) => {
            let screen = &mut state.student_form;
            match result {
                Ok(student) if screen.editing == Some(student.id) => {
                    screen.form = StudentForm::from_student(&student);
                    screen.loading = false;
                }
                Ok(student) => {
                    tracing::debug!(id = %student.id, "ignoring student for a closed form");
                }
                Err(err) => {
                    screen.loading = false;
                    state.status = err.status_line();
                    state.toasts.error(STUDENT_LOAD_FAILURE);
                }
            }
            Vec::new()
        }
        UiEvent::StudentSaved(result) => match result {
            Ok(student) => {
                tracing::info!(id = %student.id, "student saved");
                state.student_form.saving = false;
                state.toasts.success(students::SAVE_SUCCESS);
                navigate(state, Route::Students)
            }
            Err(err) => {
                state.student_form.saving = false;
                state.status = err.status_line();
                state.toasts.error(students::SAVE_FAILURE);
                Vec::new()
            }
        },
        UiEvent::EnrolmentFormLoaded(result) => {
            let screen = &mut state.enrolment_form;
            screen.loading = false;
            match result {
                Ok((options, enrolment)) => {
                    screen.options = options;
                    if let Some(enrolment) = enrolment.filter(|e| screen.editing == Some(e.id)) {
                        screen.form = EnrolmentForm::from_enrolment(&enrolment);
                        screen.student_label = enrolment.student.map(|student| student.name);
                    }
                }
                Err(err) => {
                    state.status = err.status_line();
                    state.toasts.error(ENROLMENT_FORM_LOAD_FAILURE);
                }
            }
            Vec::new()
        }
        UiEvent::EnrolmentStudentsFound { query, result } => {
            let screen = &mut state.enrolment_form;
            if screen.pending_search.as_deref() != Some(query.as_str()) {
                tracing::debug!(%query, "ignoring superseded student search");
                return Vec::new();
            }
            screen.pending_search = None;
            match result {
                Ok(found) => {
                    // keep the chosen student's name when the new batch lacks them
                    if let Some(label) = screen.selected_student_label() {
                        screen.student_label = Some(label);
                    }
                    screen.options.students = found;
                }
                Err(err) => {
                    state.status = err.status_line();
                    state.toasts.error(STUDENT_SEARCH_FAILURE);
                }
            }
            Vec::new()
        }
        UiEvent::EnrolmentSaved(result) => match result {
            Ok(enrolment) => {
                tracing::info!(id = %enrolment.id, "enrolment saved");
                state.enrolment_form.saving = false;
                state.toasts.success(enrolments::SAVE_SUCCESS);
                navigate(state, Route::Enrolments)
            }
            Err(err) => {
                state.enrolment_form.saving = false;
                state.status = err.status_line();
                state.toasts.error(enrolments::SAVE_FAILURE);
                Vec::new()
            }
        },
        UiEvent::HelpOrderAnswered(result) => {
            let screen = &mut state.help_orders;
            screen.sending = false;
            match result {
                Ok(order) => {
                    screen.list.remove(order.id);
                    if screen.answering.as_ref().map(|open| open.id) == Some(order.id) {
                        screen.answering = None;
                    }
                    state.toasts.success(help_orders::ANSWER_SUCCESS);
                }
                Err((id, err)) => {
                    tracing::warn!(%id, "answer failed: {err}");
                    state.status = err.status_line();
                    state.toasts.error(help_orders::ANSWER_FAILURE);
                }
            }
            Vec::new()
        }
    }
}

fn after_fetch(state: &mut AppState, kind: ListKind, outcome: FetchOutcome) -> Vec<BackendCommand> {
    match outcome {
        FetchOutcome::PageOutOfRange => vec![state.begin_fetch(kind)],
        FetchOutcome::Failed => {
            tracing::warn!(?kind, "list fetch failed");
            Vec::new()
        }
        FetchOutcome::Applied | FetchOutcome::Stale => Vec::new(),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
