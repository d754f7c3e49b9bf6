use super::*;
use client_core::pages::{FetchTicket, ListBody, ToastLevel};
use shared::{
    domain::{Plan, PlanId, StudentSummary},
    protocol::{ListQuery, Page},
};

fn state() -> AppState {
    AppState::new(&ClientSettings::default())
}

fn student(id: i64, name: &str) -> Student {
    Student {
        id: StudentId(id),
        name: name.into(),
        email: format!("{}@gympoint.com", name.to_lowercase()),
        age: 30,
    }
}

fn fetch_ticket(commands: &[BackendCommand]) -> FetchTicket {
    match commands {
        [BackendCommand::FetchStudents(ticket)] => ticket.clone(),
        other => panic!("expected a single students fetch, got {other:?}"),
    }
}

/// Mounts the students screen and answers its first fetch.
fn mounted_with(students: Vec<Student>, total_pages: u32) -> AppState {
    let mut state = state();
    let commands = apply_action(&mut state, UiAction::Navigate(Route::Students));
    let ticket = fetch_ticket(&commands);
    apply_event(
        &mut state,
        UiEvent::StudentsLoaded {
            ticket,
            result: Ok(Page::new(students, total_pages)),
        },
    );
    state
}

#[test]
fn mounting_students_fetches_first_page() {
    let mut state = state();
    let commands = apply_action(&mut state, UiAction::Navigate(Route::Students));
    assert_eq!(fetch_ticket(&commands).query, ListQuery::new(1, 7, ""));
    assert_eq!(state.students.list.body(), ListBody::Loading);
}

#[test]
fn filter_submit_emits_one_fetch_with_current_page() {
    let mut state = mounted_with(vec![student(1, "Ana")], 3);
    let ticket = fetch_ticket(&apply_action(
        &mut state,
        UiAction::SelectPage(ListKind::Students, 2),
    ));
    apply_event(
        &mut state,
        UiEvent::StudentsLoaded {
            ticket,
            result: Ok(Page::new(vec![student(2, "Bia")], 3)),
        },
    );

    state.students.filter_draft = "bia".into();
    let commands = apply_action(&mut state, UiAction::SubmitFilter(ListKind::Students));
    assert_eq!(fetch_ticket(&commands).query, ListQuery::new(2, 7, "bia"));

    let again = apply_action(&mut state, UiAction::SubmitFilter(ListKind::Students));
    assert!(again.is_empty());
}

#[test]
fn delete_is_only_sent_after_confirmation() {
    let mut state = mounted_with(vec![student(4, "Ana"), student(5, "Bia")], 1);

    let commands = apply_action(&mut state, UiAction::RequestStudentDelete(StudentId(5)));
    assert!(commands.is_empty());
    assert!(state.students.dialog.is_open());
    assert_eq!(
        state.students.dialog.description(),
        "Tem certeza que deseja apagar o aluno Bia ?"
    );

    let commands = apply_action(&mut state, UiAction::ConfirmDelete(ListKind::Students));
    assert_eq!(commands, vec![BackendCommand::DeleteStudent(StudentId(5))]);
    assert!(apply_action(&mut state, UiAction::ConfirmDelete(ListKind::Students)).is_empty());
}

#[test]
fn cancelled_dialog_sends_nothing() {
    let mut state = mounted_with(vec![student(5, "Bia")], 1);
    apply_action(&mut state, UiAction::RequestStudentDelete(StudentId(5)));
    apply_action(&mut state, UiAction::CancelDelete(ListKind::Students));

    assert!(!state.students.dialog.is_open());
    assert!(apply_action(&mut state, UiAction::ConfirmDelete(ListKind::Students)).is_empty());
}

#[test]
fn successful_delete_removes_only_that_row() {
    let mut state = mounted_with(
        vec![student(4, "Ana"), student(5, "Bia"), student(6, "Caio")],
        1,
    );

    let commands = apply_event(&mut state, UiEvent::StudentDeleted(StudentId(5)));
    assert!(commands.is_empty(), "delete must not trigger a refetch");

    let ids: Vec<i64> = state.students.list.items().iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![4, 6]);
    let toast = state.toasts.entries().last().expect("toast");
    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "Aluno deletado com sucesso");
}

#[test]
fn stale_list_response_is_ignored() {
    let mut state = state();
    let first = fetch_ticket(&apply_action(
        &mut state,
        UiAction::Navigate(Route::Students),
    ));
    state.students.filter_draft = "caio".into();
    let second = fetch_ticket(&apply_action(
        &mut state,
        UiAction::SubmitFilter(ListKind::Students),
    ));

    apply_event(
        &mut state,
        UiEvent::StudentsLoaded {
            ticket: second,
            result: Ok(Page::new(vec![student(6, "Caio")], 1)),
        },
    );
    apply_event(
        &mut state,
        UiEvent::StudentsLoaded {
            ticket: first,
            result: Ok(Page::new(vec![student(1, "Ana"), student(2, "Bia")], 1)),
        },
    );

    let names: Vec<&str> = state
        .students
        .list
        .items()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["Caio"]);
}

#[test]
fn invalid_student_form_never_reaches_backend() {
    let mut state = state();
    apply_action(&mut state, UiAction::Navigate(Route::StudentForm(None)));
    state.student_form.form = StudentForm {
        name: "Ana".into(),
        email: "not-an-email".into(),
        age: "0".into(),
    };

    assert!(apply_action(&mut state, UiAction::SaveStudent).is_empty());
    assert!(state.student_form.errors.get("email").is_some());
    assert!(state.student_form.errors.get("age").is_some());
}

#[test]
fn saved_student_returns_to_list() {
    let mut state = state();
    apply_action(&mut state, UiAction::Navigate(Route::StudentForm(None)));
    state.student_form.form = StudentForm {
        name: "Ana".into(),
        email: "ana@gympoint.com".into(),
        age: "28".into(),
    };

    let commands = apply_action(&mut state, UiAction::SaveStudent);
    assert!(matches!(
        commands.as_slice(),
        [BackendCommand::SaveStudent { editing: None, .. }]
    ));
    assert!(apply_action(&mut state, UiAction::SaveStudent).is_empty());

    let commands = apply_event(&mut state, UiEvent::StudentSaved(Ok(student(9, "Ana"))));
    assert_eq!(state.route, Route::Students);
    fetch_ticket(&commands);
}

#[test]
fn editing_enrolment_prefills_form_once_loaded() {
    let mut state = state();
    let commands = apply_action(
        &mut state,
        UiAction::Navigate(Route::EnrolmentForm(Some(EnrolmentId(3)))),
    );
    assert_eq!(
        commands,
        vec![BackendCommand::LoadEnrolmentForm {
            editing: Some(EnrolmentId(3))
        }]
    );

    let plan = Plan {
        id: PlanId(2),
        title: "Gold".into(),
        duration: 3,
        price: 109.0,
    };
    let start_date = chrono::NaiveDate::from_ymd_opt(2026, 1, 10).expect("date");
    let enrolment = Enrolment {
        id: EnrolmentId(3),
        student_id: StudentId(1),
        plan_id: PlanId(2),
        start_date,
        end_date: chrono::NaiveDate::from_ymd_opt(2026, 4, 10).expect("date"),
        price: 327.0,
        active: true,
        student: None,
        plan: None,
    };
    apply_event(
        &mut state,
        UiEvent::EnrolmentFormLoaded(Ok((
            EnrolmentFormOptions {
                students: vec![student(1, "Ana")],
                plans: vec![plan],
            },
            Some(enrolment),
        ))),
    );

    let screen = &state.enrolment_form;
    assert!(!screen.loading);
    assert_eq!(screen.form.start_date, "10/01/2026");
    assert_eq!(screen.selected_student_label().as_deref(), Some("Ana"));
    assert!(matches!(
        apply_action(&mut state, UiAction::SaveEnrolment).as_slice(),
        [BackendCommand::SaveEnrolment {
            editing: Some(EnrolmentId(3)),
            ..
        }]
    ));
}

#[test]
fn answered_order_leaves_the_queue() {
    let mut state = state();
    let ticket = match apply_action(&mut state, UiAction::Navigate(Route::HelpOrders)).as_slice() {
        [BackendCommand::FetchUnansweredHelpOrders(ticket)] => ticket.clone(),
        other => panic!("unexpected commands: {other:?}"),
    };
    let order = HelpOrder {
        id: HelpOrderId(8),
        student_id: Some(StudentId(1)),
        question: "Posso treinar em jejum?".into(),
        answer: None,
        time: "Há 1 dia".into(),
    };
    apply_event(
        &mut state,
        UiEvent::HelpOrdersLoaded {
            ticket,
            result: Ok(Page::new(vec![order.clone()], 1)),
        },
    );

    apply_action(&mut state, UiAction::OpenAnswer(HelpOrderId(8)));
    assert!(apply_action(&mut state, UiAction::SubmitAnswer).is_empty());

    state.help_orders.answer.answer = "Pode, com moderação.".into();
    let commands = apply_action(&mut state, UiAction::SubmitAnswer);
    assert_eq!(commands.len(), 1);

    let answered = HelpOrder {
        answer: Some("Pode, com moderação.".into()),
        ..order
    };
    apply_event(&mut state, UiEvent::HelpOrderAnswered(Ok(answered)));
    assert!(state.help_orders.list.items().is_empty());
    assert!(state.help_orders.answering.is_none());
}

fn enrolment(id: i64, student_name: &str) -> Enrolment {
    let start_date = chrono::NaiveDate::from_ymd_opt(2026, 1, 10).expect("date");
    Enrolment {
        id: EnrolmentId(id),
        student_id: StudentId(id),
        plan_id: PlanId(2),
        start_date,
        end_date: chrono::NaiveDate::from_ymd_opt(2026, 4, 10).expect("date"),
        price: 327.0,
        active: true,
        student: Some({
            let s = student(id, student_name);
            StudentSummary {
                name: s.name,
                email: Some(s.email),
            }
        }),
        plan: None,
    }
}

fn mounted_enrolments(enrolments: Vec<Enrolment>) -> AppState {
    let mut state = state();
    let ticket = match apply_action(&mut state, UiAction::Navigate(Route::Enrolments)).as_slice() {
        [BackendCommand::FetchEnrolments(ticket)] => ticket.clone(),
        other => panic!("unexpected commands: {other:?}"),
    };
    apply_event(
        &mut state,
        UiEvent::EnrolmentsLoaded {
            ticket,
            result: Ok(Page::new(enrolments, 1)),
        },
    );
    state
}

#[test]
fn enrolment_delete_confirms_then_removes_row() {
    let mut state = mounted_enrolments(vec![enrolment(1, "Ana"), enrolment(2, "Bia")]);

    assert!(apply_action(&mut state, UiAction::RequestEnrolmentDelete(EnrolmentId(2))).is_empty());
    assert_eq!(state.enrolments.dialog.title(), "Apagar matrícula");

    let commands = apply_action(&mut state, UiAction::ConfirmDelete(ListKind::Enrolments));
    assert_eq!(commands, vec![BackendCommand::DeleteEnrolment(EnrolmentId(2))]);

    assert!(apply_event(&mut state, UiEvent::EnrolmentDeleted(EnrolmentId(2))).is_empty());
    let ids: Vec<i64> = state.enrolments.list.items().iter().map(|e| e.id.0).collect();
    assert_eq!(ids, vec![1]);
    let toast = state.toasts.entries().last().expect("toast");
    assert_eq!(toast.level, ToastLevel::Success);
    assert_eq!(toast.message, "Matrícula deletada com sucesso");
}

#[test]
fn failed_enrolment_delete_keeps_row_and_reports_error() {
    let mut state = mounted_enrolments(vec![enrolment(1, "Ana")]);
    apply_action(&mut state, UiAction::RequestEnrolmentDelete(EnrolmentId(1)));
    apply_action(&mut state, UiAction::ConfirmDelete(ListKind::Enrolments));

    apply_event(
        &mut state,
        UiEvent::EnrolmentDeleteFailed {
            id: EnrolmentId(1),
            error: UiError::from_message(UiErrorContext::Delete, "500 Internal Server Error"),
        },
    );

    assert_eq!(state.enrolments.list.items().len(), 1);
    let toast = state.toasts.entries().last().expect("toast");
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "Erro ao deletar matrícula");
}

#[test]
fn failed_student_delete_keeps_list_and_reports_error() {
    let mut state = mounted_with(vec![student(4, "Ana"), student(5, "Bia")], 1);
    apply_action(&mut state, UiAction::RequestStudentDelete(StudentId(5)));
    apply_action(&mut state, UiAction::ConfirmDelete(ListKind::Students));

    let commands = apply_event(
        &mut state,
        UiEvent::StudentDeleteFailed {
            id: StudentId(5),
            error: UiError::from_message(UiErrorContext::Delete, "connection refused"),
        },
    );

    assert!(commands.is_empty());
    assert_eq!(state.students.list.items().len(), 2);
    assert!(!state.status.is_empty());
    let toast = state.toasts.entries().last().expect("toast");
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "Erro ao deletar aluno");
}

#[test]
fn student_search_requeries_backend_and_keeps_selection() {
    let mut state = state();
    apply_action(&mut state, UiAction::Navigate(Route::EnrolmentForm(None)));
    apply_event(
        &mut state,
        UiEvent::EnrolmentFormLoaded(Ok((
            EnrolmentFormOptions {
                students: vec![student(1, "Ana")],
                plans: Vec::new(),
            },
            None,
        ))),
    );
    state.enrolment_form.form.student_id = Some(StudentId(1));

    state.enrolment_form.student_search = " Ze ".into();
    let first = apply_action(&mut state, UiAction::SearchEnrolmentStudents);
    assert_eq!(first, vec![BackendCommand::SearchEnrolmentStudents("Ze".into())]);
    state.enrolment_form.student_search = "Zeca".into();
    apply_action(&mut state, UiAction::SearchEnrolmentStudents);

    apply_event(
        &mut state,
        UiEvent::EnrolmentStudentsFound {
            query: "Ze".into(),
            result: Ok(vec![student(80, "Zelia")]),
        },
    );
    assert_eq!(state.enrolment_form.options.students[0].name, "Ana");

    apply_event(
        &mut state,
        UiEvent::EnrolmentStudentsFound {
            query: "Zeca".into(),
            result: Ok(vec![student(120, "Zeca")]),
        },
    );
    let screen = &state.enrolment_form;
    let choices: Vec<&str> = screen
        .student_choices()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(choices, vec!["Zeca"]);
    assert_eq!(screen.selected_student_label().as_deref(), Some("Ana"));
    assert!(screen.pending_search.is_none());
}
