use super::*;
use crate::pages::{
    help_orders::{HelpOrderScope, HelpOrdersPage},
    students::student_rows,
    ListController,
    ListBody,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct Recorder {
    queries: Arc<Mutex<Vec<ListQuery>>>,
    deleted: Arc<Mutex<Vec<i64>>>,
    questions: Arc<Mutex<Vec<(i64, HelpOrderQuestion)>>>,
}

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn total_pages(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TOTAL_PAGES_HEADER),
        HeaderValue::from_static(value),
    );
    headers
}

fn ana() -> Student {
    Student {
        id: StudentId(1),
        name: "Ana".into(),
        email: "a@x.com".into(),
        age: 20,
    }
}

async fn list_students_three_pages(
    State(recorder): State<Recorder>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    recorder.queries.lock().await.push(query);
    (total_pages("3"), Json(vec![ana()]))
}

async fn delete_student_ok(State(recorder): State<Recorder>, Path(id): Path<i64>) -> StatusCode {
    recorder.deleted.lock().await.push(id);
    StatusCode::NO_CONTENT
}

fn students_router(recorder: Recorder) -> Router {
    Router::new()
        .route("/students", get(list_students_three_pages))
        .route("/students/:id", delete(delete_student_ok))
        .with_state(recorder)
}

#[tokio::test]
async fn list_students_sends_query_and_reads_total_pages() {
    let recorder = Recorder::default();
    let server_url = spawn_server(students_router(recorder.clone())).await;
    let client = GymClient::new(server_url);

    let page = client
        .list_students(&ListQuery::new(2, 7, "ana"))
        .await
        .expect("list");

    assert_eq!(page.items, vec![ana()]);
    assert_eq!(page.total_pages, 3);
    assert_eq!(
        recorder.queries.lock().await.as_slice(),
        &[ListQuery::new(2, 7, "ana")]
    );
}

#[tokio::test]
async fn missing_total_pages_header_means_single_page() {
    let app = Router::new().route("/students", get(|| async { Json(vec![ana()]) }));
    let client = GymClient::new(spawn_server(app).await);

    let page = client
        .list_students(&ListQuery::new(1, 7, ""))
        .await
        .expect("list");
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn malformed_total_pages_header_is_rejected() {
    let app = Router::new().route(
        "/students",
        get(|| async { (total_pages("many"), Json(vec![ana()])) }),
    );
    let client = GymClient::new(spawn_server(app).await);

    let err = client
        .list_students(&ListQuery::new(1, 7, ""))
        .await
        .expect_err("must fail");
    assert!(
        matches!(err, ClientError::InvalidHeader { ref value, .. } if value == "many"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn delete_student_hits_id_path() {
    let recorder = Recorder::default();
    let client = GymClient::new(spawn_server(students_router(recorder.clone())).await);

    client.delete_student(StudentId(5)).await.expect("delete");
    assert_eq!(recorder.deleted.lock().await.as_slice(), &[5]);
}

#[tokio::test]
async fn error_status_keeps_backend_message() {
    let app = Router::new().route(
        "/students/:id",
        delete(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Student not found" })),
            )
        }),
    );
    let client = GymClient::new(spawn_server(app).await);

    let err = client
        .delete_student(StudentId(9))
        .await
        .expect_err("must fail");
    match err {
        ClientError::Status {
            code,
            status,
            message,
        } => {
            assert_eq!(code, shared::error::ErrorCode::NotFound);
            assert_eq!(status, 404);
            assert_eq!(message, "Student not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn create_help_order_posts_question_for_student() {
    async fn create(
        State(recorder): State<Recorder>,
        Path(student_id): Path<i64>,
        Json(question): Json<HelpOrderQuestion>,
    ) -> Json<HelpOrder> {
        let order = HelpOrder {
            id: HelpOrderId(10),
            student_id: Some(StudentId(student_id)),
            question: question.question.clone(),
            answer: None,
            time: "Agora".into(),
        };
        recorder.questions.lock().await.push((student_id, question));
        Json(order)
    }

    let recorder = Recorder::default();
    let app = Router::new()
        .route("/students/:id/help-orders", axum::routing::post(create))
        .with_state(recorder.clone());
    let client = GymClient::new(spawn_server(app).await);

    let order = client
        .create_help_order(
            StudentId(3),
            &HelpOrderQuestion {
                question: "Posso treinar em jejum?".into(),
            },
        )
        .await
        .expect("create");

    assert_eq!(order.id, HelpOrderId(10));
    assert!(!order.is_answered());
    let questions = recorder.questions.lock().await;
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].0, 3);
}

#[tokio::test]
async fn students_page_renders_first_page_of_three() {
    let recorder = Recorder::default();
    let client = GymClient::new(spawn_server(students_router(recorder.clone())).await);
    let mut page = ListController::<Student>::new(Arc::new(client), (), &ClientSettings::default());

    page.mount().await;

    let ListBody::Rows(students) = page.list().body() else {
        panic!("expected rows, got {:?}", page.list().body());
    };
    let rows = student_rows(students);
    assert_eq!(rows.len(), 1);
    assert_eq!(
        (rows[0].name.as_str(), rows[0].email.as_str(), rows[0].age.as_str()),
        ("Ana", "a@x.com", "20")
    );
    assert_eq!(page.list().pagination().label(), "1 / 3");
    assert_eq!(
        recorder.queries.lock().await.as_slice(),
        &[ListQuery::new(1, 7, "")]
    );
}

#[tokio::test]
async fn student_help_orders_are_fetched_from_student_scope() {
    async fn list(Path(student_id): Path<i64>) -> impl IntoResponse {
        let orders = vec![
            HelpOrder {
                id: HelpOrderId(1),
                student_id: Some(StudentId(student_id)),
                question: "Batata doce logo cedo?".into(),
                answer: None,
                time: "Há 2 horas".into(),
            },
            HelpOrder {
                id: HelpOrderId(2),
                student_id: Some(StudentId(student_id)),
                question: "Frango também?".into(),
                answer: Some("De duas em duas horas.".into()),
                time: "Há 2 horas".into(),
            },
        ];
        (total_pages("1"), Json(orders))
    }

    let app = Router::new().route("/students/:id/help-orders", get(list));
    let client = GymClient::new(spawn_server(app).await);
    let mut page = HelpOrdersPage::new(
        Arc::new(client),
        HelpOrderScope::Student(StudentId(4)),
        &ClientSettings::default(),
    );

    page.mount().await;

    let items = page.list().items();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|order| order.student_id == Some(StudentId(4))));
}
