//! 提交 CSV 导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubmissionService;
use crate::errors::{PortalError, Result};
use crate::models::ErrorBody;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::SubmissionExportQuery;
use crate::services::storage_error_response;

/// 导出过滤后的全部提交为 CSV 附件
pub async fn handle_export(
    service: &SubmissionService,
    request: &HttpRequest,
    query: SubmissionExportQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let rows = match storage.list_submissions_for_export(query).await {
        Ok(rows) => rows,
        Err(e) => return Ok(storage_error_response(e, "Failed to export submissions.")),
    };

    match render_csv(&rows) {
        Ok(data) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"envios.csv\"",
            ))
            .body(data)),
        Err(e) => {
            error!("CSV generation failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorBody::new("Failed to export submissions.")))
        }
    }
}

/// 渲染 CSV 文档
///
/// 所有字段加引号（内部引号按 CSV 规则加倍），空的可选字段渲染为
/// 空串。文档以 UTF-8 BOM 开头，便于电子表格软件识别编码。
fn render_csv(rows: &[Submission]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::from("\u{feff}".as_bytes()));

    // 写入表头
    wtr.write_record([
        "ID",
        "Nome",
        "RA",
        "Matéria",
        "Título",
        "Observações",
        "Arquivo",
        "Tamanho(bytes)",
        "Status",
        "Feedback",
        "Data Envio",
    ])
    .map_err(|e| PortalError::serialization(format!("CSV write failed: {e}")))?;

    // 写入数据（已按创建时间倒序）
    for row in rows {
        wtr.write_record([
            row.id.to_string(),
            row.student_name.clone(),
            row.student_ra.clone(),
            row.subject.clone(),
            row.title.clone(),
            row.notes.clone().unwrap_or_default(),
            row.file.original_filename.clone(),
            row.file.file_size.to_string(),
            row.status.to_string(),
            row.feedback.clone().unwrap_or_default(),
            row.created_at.to_rfc3339(),
        ])
        .map_err(|e| PortalError::serialization(format!("CSV write failed: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| PortalError::serialization(format!("CSV generation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::attachment::StoredFile;
    use crate::models::submissions::entities::SubmissionStatus;

    fn sample_submission(id: i64, notes: Option<&str>, feedback: Option<&str>) -> Submission {
        Submission {
            id,
            student_name: "Ana \"Aninha\" Souza".to_string(),
            student_ra: "2024001".to_string(),
            subject: "Matemática".to_string(),
            title: "Lista, 1".to_string(),
            notes: notes.map(|s| s.to_string()),
            file: StoredFile {
                original_filename: "lista1.py".to_string(),
                stored_filename: "abc.py".to_string(),
                file_path: "/tmp/uploads/abc.py".to_string(),
                file_size: 128,
                mime_type: "text/x-python".to_string(),
            },
            status: SubmissionStatus::Recebido,
            feedback: feedback.map(|s| s.to_string()),
            created_at: chrono::DateTime::from_timestamp(1_705_276_800, 0).unwrap(),
            updated_at: chrono::DateTime::from_timestamp(1_705_276_800, 0).unwrap(),
        }
    }

    #[test]
    fn test_csv_starts_with_utf8_bom() {
        let data = render_csv(&[]).unwrap();
        assert!(data.starts_with("\u{feff}".as_bytes()));
    }

    #[test]
    fn test_csv_quotes_round_trip_through_parser() {
        let data = render_csv(&[sample_submission(1, Some("ele disse \"pronto\""), None)]).unwrap();

        // 去掉 BOM 后应能被标准 CSV 解析器还原
        let body = &data[3..];
        let mut reader = csv::Reader::from_reader(body);
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(&record[1], "Ana \"Aninha\" Souza");
        assert_eq!(&record[4], "Lista, 1");
        assert_eq!(&record[5], "ele disse \"pronto\"");
    }

    #[test]
    fn test_csv_renders_missing_fields_as_empty_strings() {
        let data = render_csv(&[sample_submission(2, None, None)]).unwrap();

        let body = &data[3..];
        let mut reader = csv::Reader::from_reader(body);
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(&record[5], "");
        assert_eq!(&record[9], "");
        assert_eq!(&record[8], "recebido");
    }

    #[test]
    fn test_csv_header_order_is_fixed() {
        let data = render_csv(&[]).unwrap();
        let text = String::from_utf8(data[3..].to_vec()).unwrap();
        assert!(text.starts_with(
            "\"ID\",\"Nome\",\"RA\",\"Matéria\",\"Título\",\"Observações\",\"Arquivo\""
        ));
    }
}
