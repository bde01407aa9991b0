//! 附件文件处理
//!
//! 提交与资料共享同一套附件语义：multipart 接收落盘、原样下载、
//! 文本预览。记录类型各自持有 [`StoredFile`] 元数据，文件操作
//! 统一经过这里。
//!
//! [`StoredFile`]: crate::models::common::attachment::StoredFile

pub mod receive;
pub mod serve;

pub use receive::{MultipartUpload, UploadRejection, receive_upload};
pub use serve::{send_download, send_preview};
