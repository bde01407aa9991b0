use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Role;

// 登录成功响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}
