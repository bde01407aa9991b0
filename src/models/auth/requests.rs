use serde::Deserialize;
use ts_rs::TS;

// 登录请求
//
// 字段缺省为空字符串，缺失与空串统一按"未填写"处理。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
