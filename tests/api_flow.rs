use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use edusprint::cache::{MokaCacheWrapper, ObjectCache};
use edusprint::models::AppStartTime;
use edusprint::routes;
use edusprint::storage::Storage;
use edusprint::storage::memory_storage::MemoryStorage;
use edusprint::utils::{json_error_handler, query_error_handler};

const PASSWORD: &str = "Sprint2026x";

macro_rules! init_app {
    () => {{
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1_000, 300));
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: Utc::now(),
                }))
                .configure(routes::configure_all_routes),
        )
        .await
    }};
}

// 发送请求并解析 JSON 响应体
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! register {
    ($app:expr, $name:expr, $email:expr, $role:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(json!({
                    "name": $name,
                    "email": $email,
                    "password": PASSWORD,
                    "role": $role,
                }))
        );
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"]["id"].as_str().expect("user id").to_string()
    }};
}

macro_rules! login {
    ($app:expr, $email:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(json!({ "email": $email, "password": PASSWORD }))
        );
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().expect("number");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[actix_web::test]
async fn test_ping_is_public() {
    let app = init_app!();
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/ping"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["code"], 0);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = init_app!();

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/v1/tasks"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/tasks")
            .insert_header(bearer("not-a-jwt"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_rejects_duplicates_and_admin_role() {
    let app = init_app!();
    register!(app, "Dr. Smith", "faculty@edusprint.com", "faculty");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "name": "Someone Else",
                "email": "FACULTY@edusprint.com",
                "password": PASSWORD,
                "role": "student",
            }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 2004);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "name": "Root",
                "email": "root@edusprint.com",
                "password": PASSWORD,
                "role": "admin",
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "faculty@edusprint.com", "password": "Wrong2026x" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_and_verify_token() {
    let app = init_app!();
    let student_id = register!(app, "Alex Student", "alex@edusprint.com", "student");
    let token = login!(app, "alex@edusprint.com");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["id"], student_id.as_str());
    assert!(body["data"]["user"].get("password_hash").is_none());

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/auth/verify-token")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_valid"], true);
}

#[actix_web::test]
async fn test_students_cannot_manage_subjects() {
    let app = init_app!();
    register!(app, "Alex Student", "alex@edusprint.com", "student");
    let token = login!(app, "alex@edusprint.com");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "Data Structures", "code": "CS201" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1003);
}

#[actix_web::test]
async fn test_full_grading_flow() {
    let app = init_app!();
    register!(app, "Dr. Smith", "faculty@edusprint.com", "faculty");
    let student_id = register!(app, "Alex Student", "alex@edusprint.com", "student");
    register!(app, "Sam Student", "sam@edusprint.com", "student");
    let faculty = login!(app, "faculty@edusprint.com");
    let student = login!(app, "alex@edusprint.com");
    let other = login!(app, "sam@edusprint.com");

    // 课程
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .insert_header(bearer(&faculty))
            .set_json(json!({ "name": "Data Structures", "code": "cs201" }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["code"], "CS201");
    let subject_id = body["data"]["id"].as_str().expect("subject id").to_string();

    // 任务：剩余不到 3 天，按 3 天计算
    let due_at = Utc::now() + Duration::days(3) - Duration::hours(1);
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/tasks")
            .insert_header(bearer(&faculty))
            .set_json(json!({
                "title": "Binary Search Tree Implementation",
                "subject_id": subject_id,
                "due_at": due_at,
                "max_score": 20.0,
                "penalty_rate_percent": 20.0,
                "definition": ["Implement BST insert operation"],
            }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "not-started");
    assert_eq!(body["data"]["projection"]["days_remaining"], 3);
    let task_id = body["data"]["id"].as_str().expect("task id").to_string();

    // 未分配时学生看不到任务
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/tasks/{task_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 未选课的学生不能被分配任务
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/tasks/{task_id}/assign"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3006);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["student_id"], student_id.as_str());

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/tasks/{task_id}/assign"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["student_id"], student_id.as_str());

    // 发布后截止时间锁定
    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/tasks/{task_id}"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "due_at": Utc::now() + Duration::days(30) }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/tasks/{task_id}/projection"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["urgency"], "high");
    assert_close(&body["data"]["penalty_fraction"], 0.14);
    assert_close(&body["data"]["potential_score"], 17.2);

    // 其他学生既不能查看也不能提交
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/tasks/{task_id}/projection"))
            .insert_header(bearer(&other))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/tasks/{task_id}/submit"))
            .insert_header(bearer(&other))
            .set_json(json!({ "submission": "copied" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/tasks")
            .insert_header(bearer(&other))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 0);

    // 提交前不能评分
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grades")
            .insert_header(bearer(&faculty))
            .set_json(json!({ "task_id": task_id, "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5003);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/tasks/{task_id}/start"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "in-progress");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/tasks/{task_id}/submit"))
            .insert_header(bearer(&student))
            .set_json(json!({ "submission": "https://git.example.edu/alex/bst" }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "submitted");

    // 提交后罚分率锁定，其他字段的修改不影响提交状态
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/tasks/{task_id}"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "penalty_rate_percent": 5.0 }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4003);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/tasks/{task_id}"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "title": "BST Implementation" }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "submitted");
    assert_eq!(body["data"]["submission"], "https://git.example.edu/alex/bst");

    // 不允许重复提交
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/tasks/{task_id}/submit"))
            .insert_header(bearer(&student))
            .set_json(json!({ "submission": "again" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    // 学生不能评分
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grades")
            .insert_header(bearer(&student))
            .set_json(json!({ "task_id": task_id, "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grades")
            .insert_header(bearer(&faculty))
            .set_json(json!({ "task_id": task_id, "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["status"], "pending");
    assert_close(&body["data"]["auto_score"], 17.2);
    let grade_id = body["data"]["id"].as_str().expect("grade id").to_string();

    // 重复评分报告为已存在，而不是任务未提交
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grades")
            .insert_header(bearer(&faculty))
            .set_json(json!({ "task_id": task_id, "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5001);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/tasks/{task_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "graded");

    // 有评分的任务不能删除
    let (status, body) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/tasks/{task_id}"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4004);

    // 分数超过满分
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/grades/{grade_id}/review"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "final_score": 25.0 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/grades/{grade_id}/review"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "final_score": 18.0, "feedback": "Clean recursion" }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "reviewed");
    assert_close(&body["data"]["final_score"], 18.0);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/grades/{grade_id}/approve"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "approved");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/grades/{grade_id}/review"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "final_score": 19.0 }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5004);

    // 覆盖分数需要理由
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grades/override")
            .insert_header(bearer(&faculty))
            .set_json(json!({
                "task_id": task_id,
                "student_id": student_id,
                "final_score": 19.5,
                "reason": "  ",
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/grades/override")
            .insert_header(bearer(&faculty))
            .set_json(json!({
                "task_id": task_id,
                "student_id": student_id,
                "final_score": 19.5,
                "reason": "Regrade after appeal",
            }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_close(&body["data"]["grade"]["final_score"], 19.5);
    assert_close(&body["data"]["audit"]["original_score"], 18.0);
    assert!(
        body["data"]["grade"]["feedback"]
            .as_str()
            .expect("feedback")
            .contains("[OVERRIDDEN: Regrade after appeal]")
    );

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/grades/{grade_id}/overrides"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().expect("audit list").len(), 1);

    // 学生只能查看自己的评分
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/grades/{grade_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["final_score"], 19.5);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/grades/{grade_id}"))
            .insert_header(bearer(&other))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/grades")
            .insert_header(bearer(&other))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 0);

    // 课程下仍有任务
    let (status, body) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/subjects/{subject_id}"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3003);
}

#[actix_web::test]
async fn test_penalty_records() {
    let app = init_app!();
    register!(app, "Dr. Smith", "faculty@edusprint.com", "faculty");
    let student_id = register!(app, "Alex Student", "alex@edusprint.com", "student");
    let faculty = login!(app, "faculty@edusprint.com");
    let student = login!(app, "alex@edusprint.com");

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .insert_header(bearer(&faculty))
            .set_json(json!({ "name": "Algorithms", "code": "CS301" }))
    );
    let subject_id = body["data"]["id"].as_str().expect("subject id").to_string();

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/tasks")
            .insert_header(bearer(&faculty))
            .set_json(json!({
                "title": "Graph Traversal",
                "subject_id": subject_id,
                "due_at": Utc::now() + Duration::days(12),
                "max_score": 10.0,
            }))
    );
    let task_id = body["data"]["id"].as_str().expect("task id").to_string();
    assert_eq!(body["data"]["projection"]["urgency"], "low");
    assert_close(&body["data"]["penalty_rate_percent"], 2.0);

    send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "student_id": student_id }))
    );
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/tasks/{task_id}/assign"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/penalties")
            .insert_header(bearer(&faculty))
            .set_json(json!({
                "task_id": task_id,
                "student_id": student_id,
                "penalty_percent": 120.0,
                "reason": "Late",
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/penalties")
            .insert_header(bearer(&faculty))
            .set_json(json!({
                "task_id": task_id,
                "student_id": student_id,
                "penalty_percent": 15.0,
                "reason": "Late draft",
            }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let penalty_id = body["data"]["id"].as_str().expect("penalty id").to_string();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/penalties")
            .insert_header(bearer(&student))
            .set_json(json!({
                "task_id": task_id,
                "student_id": student_id,
                "penalty_percent": 0.0,
                "reason": "Self",
            }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/penalties")
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["reason"], "Late draft");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/penalties/{penalty_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_close(&body["data"]["penalty_percent"], 15.0);

    // 学生不能修改或删除罚分
    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/penalties/{penalty_id}"))
            .insert_header(bearer(&student))
            .set_json(json!({ "penalty_percent": 0.0 }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/penalties/{penalty_id}"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "penalty_percent": 101.0 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6000);

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/penalties/{penalty_id}"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "penalty_percent": 5.0, "reason": "Late draft, reduced" }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_close(&body["data"]["penalty_percent"], 5.0);
    assert_eq!(body["data"]["reason"], "Late draft, reduced");
    assert_eq!(body["data"]["student_id"], student_id.as_str());

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/penalties/{penalty_id}"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/penalties/{penalty_id}"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[actix_web::test]
async fn test_enrollment_management() {
    let app = init_app!();
    register!(app, "Dr. Smith", "faculty@edusprint.com", "faculty");
    let other_faculty_id = register!(app, "Dr. Jones", "jones@edusprint.com", "faculty");
    let student_id = register!(app, "Alex Student", "alex@edusprint.com", "student");
    let other_id = register!(app, "Sam Student", "sam@edusprint.com", "student");
    let faculty = login!(app, "faculty@edusprint.com");
    let jones = login!(app, "jones@edusprint.com");
    let student = login!(app, "alex@edusprint.com");

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/subjects")
            .insert_header(bearer(&faculty))
            .set_json(json!({ "name": "Operating Systems", "code": "CS330" }))
    );
    let subject_id = body["data"]["id"].as_str().expect("subject id").to_string();

    // 只能给学生选课
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "student_id": other_faculty_id }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2006);

    // 非负责教师与学生都不能选课
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll"))
            .insert_header(bearer(&jones))
            .set_json(json!({ "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3002);
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll"))
            .insert_header(bearer(&student))
            .set_json(json!({ "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    for id in [&student_id, &other_id] {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/subjects/{subject_id}/enroll"))
                .insert_header(bearer(&faculty))
                .set_json(json!({ "student_id": id }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll"))
            .insert_header(bearer(&faculty))
            .set_json(json!({ "student_id": student_id }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3004);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/{subject_id}/students"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().expect("roster").len(), 2);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/student/{student_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["code"], "CS330");

    // 学生不能查看他人的选课
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/student/{other_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll/{student_id}"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/subjects/{subject_id}/enroll/{student_id}"))
            .insert_header(bearer(&faculty))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3005);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/subjects/student/{student_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().expect("subjects").is_empty());
}
