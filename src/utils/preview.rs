//! 文本文件预览
//!
//! 按扩展名判断文件能否作为文本预览，并返回限制大小的内容摘录。
//! 服务端的扩展名白名单是权威判断，前端的副本仅作展示提示。

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PortalError, Result};

/// 预览内容上限：500 KiB
pub const PREVIEW_MAX_BYTES: usize = 512_000;

/// 可作为文本预览的扩展名白名单（含点号，小写）
static TEXT_EXTENSIONS: &[&str] = &[
    ".js",
    ".jsx",
    ".ts",
    ".tsx",
    ".py",
    ".java",
    ".c",
    ".cpp",
    ".h",
    ".hpp",
    ".cs",
    ".rb",
    ".go",
    ".rs",
    ".php",
    ".swift",
    ".kt",
    ".scala",
    ".html",
    ".htm",
    ".css",
    ".scss",
    ".sass",
    ".less",
    ".json",
    ".xml",
    ".yaml",
    ".yml",
    ".toml",
    ".ini",
    ".cfg",
    ".conf",
    ".md",
    ".txt",
    ".csv",
    ".log",
    ".sh",
    ".bash",
    ".bat",
    ".ps1",
    ".sql",
    ".r",
    ".m",
    ".lua",
    ".pl",
    ".asm",
    ".s",
    ".dockerfile",
    ".makefile",
    ".gitignore",
    ".env",
    ".vue",
    ".svelte",
    ".astro",
];

// 预览响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/preview.ts")]
pub struct FilePreview {
    pub language: String,
    pub content: String,
    pub truncated: bool,
    #[serde(rename = "totalSize")]
    pub total_size: i64,
}

/// 提取小写扩展名（含点号）
fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 判断文件是否可作为文本预览
pub fn is_text_file(filename: &str) -> bool {
    let ext = file_extension(filename);
    TEXT_EXTENSIONS.contains(&ext.as_str())
}

/// 扩展名到展示语言标签的映射，未收录的扩展名回退到 "text"
pub fn display_language(filename: &str) -> &'static str {
    match file_extension(filename).as_str() {
        ".js" | ".jsx" => "javascript",
        ".ts" | ".tsx" => "typescript",
        ".py" => "python",
        ".java" => "java",
        ".c" | ".h" => "c",
        ".cpp" | ".hpp" => "cpp",
        ".cs" => "csharp",
        ".rb" => "ruby",
        ".go" => "go",
        ".rs" => "rust",
        ".php" => "php",
        ".html" | ".htm" => "html",
        ".css" => "css",
        ".scss" => "scss",
        ".json" => "json",
        ".xml" => "xml",
        ".yaml" | ".yml" => "yaml",
        ".md" => "markdown",
        ".txt" => "text",
        ".sql" => "sql",
        ".sh" => "bash",
        ".bat" => "batch",
        ".ps1" => "powershell",
        ".r" => "r",
        ".lua" => "lua",
        ".vue" => "vue",
        ".svelte" => "svelte",
        _ => "text",
    }
}

/// 读取文件预览
///
/// 最多读取文件开头的 [`PREVIEW_MAX_BYTES`] 字节，按 UTF-8 尽力解码。
/// 文件在读取时已被删除则返回 NotFound 错误，由调用方映射为 404。
pub fn read_preview(file_path: &str, filename: &str) -> Result<FilePreview> {
    let metadata = std::fs::metadata(file_path).map_err(map_missing_file)?;
    let total_size = metadata.len();
    let truncated = total_size > PREVIEW_MAX_BYTES as u64;

    let file = std::fs::File::open(file_path).map_err(map_missing_file)?;
    let mut buffer = Vec::with_capacity((total_size as usize).min(PREVIEW_MAX_BYTES));
    file.take(PREVIEW_MAX_BYTES as u64)
        .read_to_end(&mut buffer)?;

    Ok(FilePreview {
        language: display_language(filename).to_string(),
        content: String::from_utf8_lossy(&buffer).into_owned(),
        truncated,
        total_size: total_size as i64,
    })
}

fn map_missing_file(err: std::io::Error) -> PortalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        PortalError::not_found("File not found on server")
    } else {
        PortalError::from(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_text_file_known_extensions() {
        assert!(is_text_file("main.py"));
        assert!(is_text_file("notes.TXT"));
        assert!(is_text_file("Makefile.makefile"));
    }

    #[test]
    fn test_is_text_file_rejects_binaries() {
        assert!(!is_text_file("trabalho.zip"));
        assert!(!is_text_file("app.exe"));
        assert!(!is_text_file("no_extension"));
    }

    #[test]
    fn test_display_language_mapping() {
        assert_eq!(display_language("main.rs"), "rust");
        assert_eq!(display_language("INDEX.HTML"), "html");
        // 可预览但未收录在语言表中的扩展名回退到 text
        assert_eq!(display_language("config.toml"), "text");
        assert_eq!(display_language("unknown.bin"), "text");
    }

    #[test]
    fn test_preview_small_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hello.py");
        std::fs::write(&path, "print('ola')\n").unwrap();

        let preview = read_preview(path.to_str().unwrap(), "hello.py").unwrap();
        assert_eq!(preview.language, "python");
        assert_eq!(preview.content, "print('ola')\n");
        assert!(!preview.truncated);
        assert_eq!(preview.total_size, 13);
    }

    #[test]
    fn test_preview_exactly_at_cap_is_not_truncated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("exact.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![b'a'; PREVIEW_MAX_BYTES]).unwrap();

        let preview = read_preview(path.to_str().unwrap(), "exact.txt").unwrap();
        assert!(!preview.truncated);
        assert_eq!(preview.content.len(), PREVIEW_MAX_BYTES);
        assert_eq!(preview.total_size, PREVIEW_MAX_BYTES as i64);
    }

    #[test]
    fn test_preview_over_cap_is_truncated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("big.log");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&vec![b'b'; PREVIEW_MAX_BYTES + 1]).unwrap();

        let preview = read_preview(path.to_str().unwrap(), "big.log").unwrap();
        assert!(preview.truncated);
        assert_eq!(preview.content.len(), PREVIEW_MAX_BYTES);
        assert_eq!(preview.total_size, (PREVIEW_MAX_BYTES + 1) as i64);
    }

    #[test]
    fn test_preview_missing_file_is_not_found() {
        let err = read_preview("/definitely/not/here.txt", "here.txt").unwrap_err();
        assert_eq!(err.code(), crate::errors::PortalError::not_found("").code());
    }
}
