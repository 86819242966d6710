use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use jsonwebtoken::{EncodingKey, Header};
use learnup::api::ApiClient;
use learnup::auth::{Session, UserClaims};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Records held by the in-process LearnUp API.
#[derive(Debug)]
pub struct MockState {
    pub courses: Vec<Value>,
    pub exams: Vec<Value>,
    pub disciplines: Vec<Value>,
    pub lessons: Vec<Value>,
    pub passed_exams: Vec<Value>,
    pub user_answers: Vec<Value>,
    pub deleted_passed_exams: Vec<i64>,
    /// Reject `POST /user-answers` once this many answers are stored.
    pub fail_user_answers_after: Option<usize>,
    pub auth_headers: Vec<String>,
    next_id: i64,
}

impl MockState {
    fn seeded() -> Self {
        Self {
            courses: vec![
                json!({
                    "id": 1, "title": "Rust basics", "description": "ownership",
                    "specialty_id": 1, "user_id": 5,
                    "exam": { "id": 10, "title": "Final" }, "required_score": 60,
                }),
                json!({ "id": 2, "title": "Draft course", "description": "wip", "specialty_id": 1 }),
            ],
            exams: vec![json!({
                "id": 10, "course_id": 1, "title": "Final", "duration": 15,
                "questions": [
                    { "id": 1, "text": "What does `move` do?", "answers": [
                        { "id": 11, "text": "transfers ownership", "is_correct": true },
                        { "id": 12, "text": "copies the value", "is_correct": false },
                    ]},
                    { "id": 2, "text": "Which types are Send?", "type": "multiple", "answers": [
                        { "id": 21, "text": "Arc<T>", "is_correct": true },
                        { "id": 22, "text": "Rc<T>", "is_correct": false },
                        { "id": 23, "text": "i32", "is_correct": true },
                    ]},
                    { "id": 3, "text": "Is `String` Copy?", "answers": [
                        { "id": 31, "text": "yes", "is_correct": false },
                        { "id": 32, "text": "no", "is_correct": true },
                    ]},
                    { "id": 4, "text": "Borrow checker runs at?", "answers": [
                        { "id": 41, "text": "compile time", "is_correct": true },
                        { "id": 42, "text": "run time", "is_correct": false },
                    ]},
                ],
            })],
            disciplines: vec![json!({ "id": 1, "name": "Computer science" })],
            lessons: vec![
                json!({ "id": 1, "course_id": 1, "title": "Ownership", "content": "..." }),
                json!({ "id": 2, "course_id": 1, "title": "Borrowing", "content": "..." }),
                json!({ "id": 3, "course_id": 2, "title": "Other", "content": "..." }),
            ],
            passed_exams: vec![],
            user_answers: vec![],
            deleted_passed_exams: vec![],
            fail_user_answers_after: None,
            auth_headers: vec![],
            next_id: 100,
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub state: Shared,
    pub base_url: String,
}

impl MockApi {
    pub fn client(&self) -> ApiClient {
        ApiClient::with_base_url(&self.base_url).unwrap()
    }

    pub fn signed_in_client(&self) -> ApiClient {
        self.client()
            .with_session(Session::from_token(token(3600, "student")).unwrap())
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

pub async fn spawn_mock_api() -> MockApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state: Shared = Arc::new(Mutex::new(MockState::seeded()));

    let app = Router::new()
        .route("/login", post(login))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", get(get_course).delete(delete_course))
        .route("/courses/{id}/lessons", get(course_lessons))
        .route("/courses/{id}/enroll", post(enroll))
        .route("/exams/{id}", get(get_exam))
        .route("/disciplines", get(list_disciplines))
        .route("/passed-exams", post(create_passed_exam))
        .route("/passed-exams/{id}", get(get_passed_exam).delete(delete_passed_exam))
        .route("/passed-exams/{id}/user-answers", get(passed_exam_answers))
        .route("/user-answers", post(create_user_answer))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockApi {
        state,
        base_url: format!("http://{addr}"),
    }
}

/// Bearer token expiring `exp_in` seconds from now.
pub fn token(exp_in: i64, role: &str) -> String {
    let claims = UserClaims {
        sub: String::from("5"),
        exp: chrono::Utc::now().timestamp() + exp_in,
        role: Some(role.to_string()),
    };
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"mock")).unwrap()
}

fn record_auth(state: &mut MockState, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.auth_headers.push(value.to_string());
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response()
}

fn find(items: &[Value], id: i64) -> Option<Value> {
    items.iter().find(|v| v["id"] == json!(id)).cloned()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad credentials" })))
            .into_response();
    }
    Json(json!({
        "token": token(3600, "teacher"),
        "user": { "id": 5, "name": "Ann", "email": body["email"], "role": "teacher" },
    }))
    .into_response()
}

async fn list_courses(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    Json(json!(state.courses)).into_response()
}

async fn get_course(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match find(&state.courses, id) {
        Some(course) => Json(course).into_response(),
        None => not_found(),
    }
}

async fn create_course(State(state): State<Shared>, Json(mut body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    body["id"] = json!(state.next_id());
    state.courses.push(body.clone());
    (StatusCode::CREATED, Json(json!({ "data": body }))).into_response()
}

async fn delete_course(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.courses.len();
    state.courses.retain(|c| c["id"] != json!(id));
    if state.courses.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn course_lessons(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    let lessons: Vec<_> = state
        .lessons
        .iter()
        .filter(|l| l["course_id"] == json!(id))
        .cloned()
        .collect();
    Json(json!({ "data": lessons })).into_response()
}

async fn enroll(State(state): State<Shared>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    record_auth(&mut state, &headers);
    if find(&state.courses, id).is_none() {
        return not_found();
    }
    if !headers.contains_key("authorization") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "login first" }))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn get_exam(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match find(&state.exams, id) {
        Some(exam) => Json(exam).into_response(),
        None => not_found(),
    }
}

async fn list_disciplines(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    Json(json!({ "data": state.disciplines })).into_response()
}

async fn create_passed_exam(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let record = json!({
        "id": state.next_id(),
        "exam_id": body["exam_id"],
        "user_id": 5,
        "score": body["score"],
        "created_at": "2026-10-19T12:00:00Z",
    });
    state.passed_exams.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn get_passed_exam(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match find(&state.passed_exams, id) {
        Some(record) => Json(record).into_response(),
        None => not_found(),
    }
}

async fn delete_passed_exam(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    state.passed_exams.retain(|p| p["id"] != json!(id));
    state.user_answers.retain(|a| a["passed_exam_id"] != json!(id));
    state.deleted_passed_exams.push(id);
    StatusCode::NO_CONTENT.into_response()
}

async fn passed_exam_answers(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    let answers: Vec<_> = state
        .user_answers
        .iter()
        .filter(|a| a["passed_exam_id"] == json!(id))
        .cloned()
        .collect();
    Json(answers).into_response()
}

async fn create_user_answer(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(limit) = state.fail_user_answers_after {
        if state.user_answers.len() >= limit {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "database unavailable" })),
            )
                .into_response();
        }
    }
    let record = json!({
        "id": state.next_id(),
        "question_id": body["question_id"],
        "answer_id": body["answer_id"],
        "passed_exam_id": body["passed_exam_id"],
    });
    state.user_answers.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}
