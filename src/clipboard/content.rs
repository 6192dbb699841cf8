use std::fmt;

use super::{ClipboardHandle, FormatId};
use crate::error::ClipboardError;

/// 一次轮询读到的剪贴板内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    /// 文件路径列表，保持剪贴板中的原始顺序
    FileList(Vec<String>),
    /// Unicode 文本
    UnicodeText(String),
    /// 旧式文本（已宽松解码）
    LegacyText(String),
    /// 没有任何受支持的格式
    None,
}

/// 内容种类标签，随事件一起发送，仅用于日志
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    FileList,
    UnicodeText,
    LegacyText,
}

impl ClipboardContent {
    pub fn kind(&self) -> Option<ContentKind> {
        match self {
            Self::FileList(_) => Some(ContentKind::FileList),
            Self::UnicodeText(_) => Some(ContentKind::UnicodeText),
            Self::LegacyText(_) => Some(ContentKind::LegacyText),
            Self::None => None,
        }
    }

    /// 按优先级探测格式并读取第一个可用的
    ///
    /// 格式存在但读取失败时返回错误，而不是回退到下一个格式：
    /// 回退会让同一份内容在不同轮次产生不同指纹。
    pub fn read_from<H: ClipboardHandle + ?Sized>(handle: &mut H) -> Result<Self, ClipboardError> {
        for format in FormatId::PRIORITY {
            if !handle.has_format(format) {
                continue;
            }
            return match format {
                FormatId::FileList => handle.read_file_list().map(Self::FileList),
                FormatId::UnicodeText => handle.read_unicode_text().map(Self::UnicodeText),
                FormatId::LegacyText => handle
                    .read_legacy_text()
                    .map(|bytes| Self::LegacyText(decode_legacy_text(&bytes))),
            };
        }
        Ok(Self::None)
    }
}

/// 宽松解码旧式文本
///
/// 截断到第一个 NUL（CF_TEXT 以 NUL 结尾），非法字节替换为 U+FFFD，永不失败。
pub fn decode_legacy_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

impl fmt::Display for ClipboardContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileList(paths) => write!(f, "FileList({} item(s))", paths.len()),
            Self::UnicodeText(text) => write!(f, "UnicodeText({} chars)", text.chars().count()),
            Self::LegacyText(text) => write!(f, "LegacyText({} chars)", text.chars().count()),
            Self::None => write!(f, "None"),
        }
    }
}
