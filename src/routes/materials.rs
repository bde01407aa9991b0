use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::auth::Role;
use crate::models::materials::requests::{MaterialListQuery, UpdateMaterialRequest};
use crate::services::MaterialService;

// 懒加载的全局 MaterialService 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// 发布资料（管理员上传）
pub async fn create_material(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.create_material(&req, payload).await
}

// 列出资料
pub async fn list_materials(
    req: HttpRequest,
    query: web::Query<MaterialListQuery>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(&req, query.into_inner())
        .await
}

// 科目目录（含资料数量）
pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_subjects(&req).await
}

// 获取资料详情
pub async fn get_material(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(&req, path.into_inner()).await
}

// 下载资料文件
pub async fn download_material(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .download_material(&req, path.into_inner())
        .await
}

// 资料文本预览
pub async fn preview_material(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .preview_material(&req, path.into_inner())
        .await
}

// 更新资料元数据
pub async fn update_material(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除资料（连同磁盘文件）
pub async fn delete_material(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/materials")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .wrap(RequireRole::new(Role::Admin))
                            .to(create_material),
                    )
                    .route(web::get().to(list_materials)),
            )
            .service(web::resource("/subjects").route(web::get().to(list_subjects)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_material))
                    .route(
                        web::patch()
                            .wrap(RequireRole::new(Role::Admin))
                            .to(update_material),
                    )
                    .route(
                        web::delete()
                            .wrap(RequireRole::new(Role::Admin))
                            .to(delete_material),
                    ),
            )
            .service(web::resource("/{id}/download").route(web::get().to(download_material)))
            .service(web::resource("/{id}/preview").route(web::get().to(preview_material))),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use std::sync::Arc;

    use crate::models::auth::Role;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::test_support::{bearer, init_test_config, multipart_body, test_upload_dir};

    macro_rules! test_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($storage.clone()))
                    .configure(crate::routes::configure_material_routes),
            )
            .await
        };
    }

    async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::new_in_memory().await.unwrap())
    }

    // 在上传目录树中查找包含指定内容的文件
    fn find_upload_with_content(content: &str) -> Option<std::path::PathBuf> {
        fn walk(dir: &std::path::Path, needle: &[u8], found: &mut Option<std::path::PathBuf>) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                return;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, needle, found);
                } else if std::fs::read(&path).is_ok_and(|data| data == needle) {
                    *found = Some(path);
                    return;
                }
            }
        }
        let mut found = None;
        walk(&test_upload_dir(), content.as_bytes(), &mut found);
        found
    }

    #[actix_web::test]
    async fn test_materials_require_authentication() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::get().uri("/materials").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_student_cannot_publish_material() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let (content_type, body) =
            multipart_body(&[("title", "Slides"), ("subject", "Matemática")], None);
        let req = test::TestRequest::post()
            .uri("/materials")
            .insert_header(bearer(Role::Student))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_invalid_category_is_rejected() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let (content_type, body) = multipart_body(
            &[
                ("title", "Slides"),
                ("subject", "Matemática"),
                ("category", "video"),
            ],
            Some(("slides.txt", "conteudo")),
        );
        let req = test::TestRequest::post()
            .uri("/materials")
            .insert_header(bearer(Role::Admin))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_publish_browse_update_delete_flow() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        // 管理员发布资料；文件内容全局唯一，便于在磁盘上定位
        let marker = format!("material-flow-{}", uuid::Uuid::new_v4());
        let (content_type, body) = multipart_body(
            &[
                ("title", "Lista de exercícios"),
                ("subject", "Matemática"),
                ("description", "Capítulo 3"),
                ("category", "exercise"),
            ],
            Some(("lista.md", marker.as_str())),
        );
        let req = test::TestRequest::post()
            .uri("/materials")
            .insert_header(bearer(Role::Admin))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: serde_json::Value = test::read_body_json(resp).await;
        let id = created["id"].as_i64().expect("id should be present");
        assert!(find_upload_with_content(&marker).is_some());

        // 学生可以浏览列表与详情
        let req = test::TestRequest::get()
            .uri("/materials?category=exercise")
            .insert_header(bearer(Role::Student))
            .to_request();
        let listing: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listing["pagination"]["total"], 1);
        assert_eq!(listing["data"][0]["category"], "exercise");

        let req = test::TestRequest::get()
            .uri(&format!("/materials/{id}"))
            .insert_header(bearer(Role::Student))
            .to_request();
        let detail: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail["is_previewable"], true);

        // 科目目录
        let req = test::TestRequest::get()
            .uri("/materials/subjects")
            .insert_header(bearer(Role::Student))
            .to_request();
        let subjects: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(subjects[0]["subject"], "Matemática");
        assert_eq!(subjects[0]["total"], 1);

        // 学生不能修改
        let req = test::TestRequest::patch()
            .uri(&format!("/materials/{id}"))
            .insert_header(bearer(Role::Student))
            .set_json(serde_json::json!({"title": "Hackeado"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 管理员更新元数据
        let req = test::TestRequest::patch()
            .uri(&format!("/materials/{id}"))
            .insert_header(bearer(Role::Admin))
            .set_json(serde_json::json!({"title": "Lista revisada", "category": "document"}))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["title"], "Lista revisada");
        assert_eq!(updated["category"], "document");

        // 管理员删除：记录与磁盘文件都应消失
        let req = test::TestRequest::delete()
            .uri(&format!("/materials/{id}"))
            .insert_header(bearer(Role::Admin))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(find_upload_with_content(&marker).is_none());

        let req = test::TestRequest::get()
            .uri(&format!("/materials/{id}/download"))
            .insert_header(bearer(Role::Student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_preview_of_binary_file_is_rejected() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let (content_type, body) = multipart_body(
            &[("title", "Binário"), ("subject", "Física")],
            Some(("dados.bin", "0101")),
        );
        let req = test::TestRequest::post()
            .uri("/materials")
            .insert_header(bearer(Role::Admin))
            .insert_header(("Content-Type", content_type))
            .set_payload(body)
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().expect("id should be present");

        let req = test::TestRequest::get()
            .uri(&format!("/materials/{id}"))
            .insert_header(bearer(Role::Student))
            .to_request();
        let detail: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(detail["is_previewable"], false);

        let req = test::TestRequest::get()
            .uri(&format!("/materials/{id}/preview"))
            .insert_header(bearer(Role::Student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_patch_cannot_clear_required_fields() {
        init_test_config();
        let storage = storage().await;
        let app = test_app!(storage);

        let req = test::TestRequest::patch()
            .uri("/materials/1")
            .insert_header(bearer(Role::Admin))
            .set_json(serde_json::json!({"title": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
