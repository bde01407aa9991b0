use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::auth::Role;
use crate::models::submissions::requests::{
    SubmissionExportQuery, SubmissionListQuery, UpdateSubmissionRequest,
};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建提交（学生上传作业）
pub async fn create_submission(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.create_submission(&req, payload).await
}

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 导出提交为 CSV
pub async fn export_submissions_csv(
    req: HttpRequest,
    query: web::Query<SubmissionExportQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .export_submissions_csv(&req, query.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 下载提交的附件
pub async fn download_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download_submission(&req, path.into_inner())
        .await
}

// 提交附件文本预览
pub async fn preview_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .preview_submission(&req, path.into_inner())
        .await
}

// 更新提交状态/反馈
pub async fn update_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(&req, path.into_inner(), body.into_inner())
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/submissions")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .wrap(RequireRole::new(Role::Student))
                            .to(create_submission),
                    )
                    .route(
                        web::get()
                            .wrap(RequireRole::new(Role::Admin))
                            .to(list_submissions),
                    ),
            )
            .service(
                web::resource("/export/csv").route(
                    web::get()
                        .wrap(RequireRole::new(Role::Admin))
                        .to(export_submissions_csv),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .wrap(RequireRole::new(Role::Admin))
                            .to(get_submission),
                    )
                    .route(
                        web::patch()
                            .wrap(RequireRole::new(Role::Admin))
                            .to(update_submission),
                    ),
            )
            .service(
                web::resource("/{id}/download").route(
                    web::get()
                        .wrap(RequireRole::new(Role::Admin))
                        .to(download_submission),
                ),
            )
            .service(
                web::resource("/{id}/preview").route(
                    web::get()
                        .wrap(RequireRole::new(Role::Admin))
                        .to(preview_submission),
                ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use std::sync::Arc;

    use crate::models::auth::Role;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::test_support::{bearer, init_test_config, multipart_body};

    macro_rules! test_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($storage.clone()))
                    .configure(crate::routes::configure_submission_routes),
            )
            .await
        };
    }

    async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::new_in_memory().await.unwrap())
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::get().uri("/submissions").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_student_cannot_list_submissions() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::get()
            .uri("/submissions")
            .insert_header(bearer(Role::Student))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_admin_cannot_create_submission() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let (content_type, body) = multipart_body(
            &[("student_name", "Ana")],
            Some(("lista.py", "print('ola')\n")),
        );
        let req = test::TestRequest::post()
            .uri("/submissions")
            .insert_header(bearer(Role::Admin))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_create_requires_all_metadata_fields() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        // 缺少 subject
        let (content_type, body) = multipart_body(
            &[
                ("student_name", "Ana Souza"),
                ("student_ra", "2024001"),
                ("title", "Lista 1"),
            ],
            Some(("lista.py", "print('ola')\n")),
        );
        let req = test::TestRequest::post()
            .uri("/submissions")
            .insert_header(bearer(Role::Student))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_create_detail_preview_and_patch_flow() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        // 学生创建提交
        let (content_type, body) = multipart_body(
            &[
                ("student_name", "Ana Souza"),
                ("student_ra", "2024001"),
                ("subject", "Matemática"),
                ("title", "Lista 1"),
                ("notes", "segunda tentativa"),
            ],
            Some(("lista.py", "print('ola')\n")),
        );
        let req = test::TestRequest::post()
            .uri("/submissions")
            .insert_header(bearer(Role::Student))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: serde_json::Value = test::read_body_json(resp).await;
        let id = created["id"].as_i64().expect("id should be present");

        // 管理员查看详情
        let req = test::TestRequest::get()
            .uri(&format!("/submissions/{id}"))
            .insert_header(bearer(Role::Admin))
            .to_request();
        let detail: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail["status"], "recebido");
        assert_eq!(detail["is_previewable"], true);
        assert_eq!(detail["original_filename"], "lista.py");

        // 文本预览
        let req = test::TestRequest::get()
            .uri(&format!("/submissions/{id}/preview"))
            .insert_header(bearer(Role::Admin))
            .to_request();
        let preview: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(preview["language"], "python");
        assert_eq!(preview["truncated"], false);
        assert_eq!(preview["content"], "print('ola')\n");

        // 下载
        let req = test::TestRequest::get()
            .uri(&format!("/submissions/{id}/download"))
            .insert_header(bearer(Role::Admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = test::read_body(resp).await;
        assert_eq!(&bytes[..], b"print('ola')\n");

        // 批改：更新状态与反馈
        let req = test::TestRequest::patch()
            .uri(&format!("/submissions/{id}"))
            .insert_header(bearer(Role::Admin))
            .set_json(serde_json::json!({"status": "em_correcao", "feedback": "Revisar questão 2"}))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "em_correcao");
        assert_eq!(updated["feedback"], "Revisar questão 2");
    }

    #[actix_web::test]
    async fn test_list_clamps_limit_and_reports_pagination() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::get()
            .uri("/submissions?page=0&limit=100000")
            .insert_header(bearer(Role::Admin))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], 100);
        assert!(body["data"].is_array());
    }

    #[actix_web::test]
    async fn test_patch_with_no_fields_is_bad_request() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::patch()
            .uri("/submissions/1")
            .insert_header(bearer(Role::Admin))
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_patch_with_invalid_status_is_bad_request() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::patch()
            .uri("/submissions/1")
            .insert_header(bearer(Role::Admin))
            .set_json(serde_json::json!({"status": "aprovado"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_detail_of_missing_submission_is_not_found() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::get()
            .uri("/submissions/424242")
            .insert_header(bearer(Role::Admin))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_csv_export_has_bom_and_content_type() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::get()
            .uri("/submissions/export/csv")
            .insert_header(bearer(Role::Admin))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/csv"));

        let bytes = test::read_body(resp).await;
        assert!(bytes.starts_with("\u{feff}".as_bytes()));
    }
}
