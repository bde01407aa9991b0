use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 两类记录共享的附件文件元数据
//
// 存储文件名与磁盘路径只在服务端使用，不序列化到JSON响应中。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct StoredFile {
    // 用户上传时的原始文件名
    pub original_filename: String,
    // 服务端生成的存储文件名（UUID，全局唯一）
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_filename: String,
    // 磁盘绝对/相对路径
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_path: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // MIME 类型
    pub mime_type: String,
}
