pub mod auth;
pub mod common;
pub mod materials;
pub mod submissions;

pub use common::pagination::PaginationInfo;
pub use common::response::{ErrorBody, MessageBody};

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
