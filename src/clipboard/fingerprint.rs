//! 剪贴板内容指纹
//!
//! SHA-256 摘要折叠为 64 位，足够让不同内容以压倒性概率得到不同指纹，
//! 同时只需 O(1) 存储。文件列表先排序再拼接，复制同一组文件时
//! 选择顺序不同也会得到相同指纹。

use std::fmt;

use sha2::{Digest, Sha256};

use super::ClipboardContent;

/// 文件路径拼接分隔符（Windows 路径中不允许出现）
const PATH_DELIMITER: &str = "|";

/// 内容摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// 对任意字节计算指纹
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut folded = [0u8; 8];
        folded.copy_from_slice(&digest[..8]);
        Self(u64::from_be_bytes(folded))
    }

    /// 对剪贴板内容计算指纹；`None` 内容不产生指纹
    pub fn of_content(content: &ClipboardContent) -> Option<Self> {
        match content {
            ClipboardContent::FileList(paths) => Some(Self::of_bytes(join_sorted(paths).as_bytes())),
            ClipboardContent::UnicodeText(text) | ClipboardContent::LegacyText(text) => {
                Some(Self::of_bytes(text.as_bytes()))
            }
            ClipboardContent::None => None,
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// 排序后拼接文件路径
pub fn join_sorted(paths: &[String]) -> String {
    let mut sorted: Vec<&str> = paths.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(PATH_DELIMITER)
}
