use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::attachment::StoredFile;

// 提交状态（批改工作流）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Recebido,   // 已接收
    EmCorrecao, // 批改中
    Corrigido,  // 已批改
}

impl SubmissionStatus {
    pub const RECEBIDO: &'static str = "recebido";
    pub const EM_CORRECAO: &'static str = "em_correcao";
    pub const CORRIGIDO: &'static str = "corrigido";
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::RECEBIDO => Ok(SubmissionStatus::Recebido),
            SubmissionStatus::EM_CORRECAO => Ok(SubmissionStatus::EmCorrecao),
            SubmissionStatus::CORRIGIDO => Ok(SubmissionStatus::Corrigido),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid status: '{s}'. Supported statuses: recebido, em_correcao, corrigido"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Recebido => write!(f, "{}", SubmissionStatus::RECEBIDO),
            SubmissionStatus::EmCorrecao => write!(f, "{}", SubmissionStatus::EM_CORRECAO),
            SubmissionStatus::Corrigido => write!(f, "{}", SubmissionStatus::CORRIGIDO),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recebido" => Ok(SubmissionStatus::Recebido),
            "em_correcao" => Ok(SubmissionStatus::EmCorrecao),
            "corrigido" => Ok(SubmissionStatus::Corrigido),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 学生作业提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub student_name: String,
    pub student_ra: String,
    pub subject: String,
    pub title: String,
    pub notes: Option<String>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub file: StoredFile,
    pub status: SubmissionStatus,
    pub feedback: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            SubmissionStatus::Recebido,
            SubmissionStatus::EmCorrecao,
            SubmissionStatus::Corrigido,
        ] {
            assert_eq!(status.to_string().parse::<SubmissionStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_deserialize_rejects_unknown() {
        let result: Result<SubmissionStatus, _> = serde_json::from_str("\"aprovado\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_status_serializes_to_wire_value() {
        let json = serde_json::to_string(&SubmissionStatus::EmCorrecao).unwrap();
        assert_eq!(json, "\"em_correcao\"");
    }
}
