use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 门户角色：只有固定的学生与管理员两种身份
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub enum Role {
    Student, // 学生
    Admin,   // 管理员
}

impl Role {
    pub const STUDENT: &'static str = "student";
    pub const ADMIN: &'static str = "admin";
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            Role::STUDENT => Ok(Role::Student),
            Role::ADMIN => Ok(Role::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid role: '{s}'. Supported roles: student, admin"
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "{}", Role::STUDENT),
            Role::Admin => write!(f, "{}", Role::ADMIN),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}
