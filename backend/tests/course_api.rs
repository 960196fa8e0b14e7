//! End-to-end course lifecycle through the public HTTP surface.
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{App, http::StatusCode, test, web};
use courses::Trace;
use courses::domain::CourseService;
use courses::domain::ports::SequentialCourseIdGenerator;
use courses::inbound::http::state::HttpState;
use courses::inbound::http::{courses as course_routes, json_config, not_found};
use courses::outbound::persistence::InMemoryCourseRepository;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn state() -> HttpState {
    let service = CourseService::new(
        Arc::new(InMemoryCourseRepository::new()),
        Arc::new(SequentialCourseIdGenerator::starting_after(41_999)),
    );
    HttpState::from_service(Arc::new(service))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(json_config())
                .wrap(Trace)
                .configure(course_routes::configure)
                .default_service(web::to(not_found)),
        )
        .await
    };
}

async fn body_json<B: MessageBody>(response: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

#[rstest]
#[actix_web::test]
async fn create_fetch_delete_lifecycle(state: HttpState) {
    let app = app!(state);

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/courses")
            .set_json(json!({ "name": "Intro to AI", "syllabus": "Search, logic, learning" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(created.headers().contains_key("trace-id"));
    let created = body_json(created).await;
    assert_eq!(created["id"], "42000");

    let duplicate = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/courses/")
            .set_json(json!({ "name": "Intro to AI", "syllabus": "Again" }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(duplicate).await,
        json!({ "error": "Course with this name already exists" })
    );

    let fetched = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/courses/42000").to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await, created);

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/courses/42000").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        body_json(deleted).await,
        json!({ "message": "Intro to AI has been deleted", "deleted": created })
    );

    let gone = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/courses/42000").to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(gone).await,
        json!({ "error": "Course not found" })
    );
}

#[rstest]
#[actix_web::test]
async fn list_tracks_creates_and_deletes(state: HttpState) {
    let app = app!(state);

    for name in ["Algebra", "Biology", "Chemistry"] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/courses")
                .set_json(json!({ "name": name, "syllabus": "Weekly lectures" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let response = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/courses/42001").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/courses").to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let names: Vec<Value> = body_json(listed)
        .await
        .as_array()
        .expect("array body")
        .iter()
        .map(|course| course["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Algebra"), json!("Chemistry")]);
}

#[rstest]
#[actix_web::test]
async fn unknown_paths_fall_back_to_json_not_found(state: HttpState) {
    let app = app!(state);

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/students").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Resource not found" })
    );
}
