//! 剪贴板监控模块
//!
//! # 设计思路
//!
//! 统一管理剪贴板变化检测：
//! - **访问抽象**：`ClipboardAccess` / `ClipboardHandle` 描述"独占打开 → 查询格式 →
//!   读取数据 → 自动关闭"的最小接口，平台差异全部收敛在 `platform` 中
//! - **RAII 句柄**：`acquire()` 返回的句柄在 `Drop` 时释放剪贴板，
//!   任何退出路径（含读取失败）都不会遗留占用
//! - **指纹去重**：只保存上一次内容的摘要，不保留剪贴板历史
//! - **轮询**：固定 100ms 轮询而非系统回调，保证各平台行为一致
//!
//! # 实现思路
//!
//! - 格式按优先级探测：文件列表 → Unicode 文本 → 旧式文本。
//! - 监控器运行在独立线程中，通过有界 channel 把 `ClipboardEvent` 交给运行循环。
//! - 子模块按职责拆分：内容读取归 `content`，摘要归 `fingerprint`，
//!   循环归 `watcher`，系统 API 归 `platform`。

pub mod content;
pub mod fingerprint;
pub mod platform;
pub mod watcher;

pub use content::{ClipboardContent, ContentKind};
pub use fingerprint::Fingerprint;
pub use watcher::{ClipboardWatcher, PollOutcome, WatcherHandle, spawn_watcher};

use crate::error::ClipboardError;

/// 剪贴板数据格式（按探测优先级排列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatId {
    /// 资源管理器复制的文件列表（CF_HDROP）
    FileList,
    /// UTF-16 文本（CF_UNICODETEXT）
    UnicodeText,
    /// 本地代码页文本（CF_TEXT）
    LegacyText,
}

impl FormatId {
    /// 探测顺序
    pub const PRIORITY: [FormatId; 3] = [
        FormatId::FileList,
        FormatId::UnicodeText,
        FormatId::LegacyText,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatId::FileList => "CF_HDROP",
            FormatId::UnicodeText => "CF_UNICODETEXT",
            FormatId::LegacyText => "CF_TEXT",
        }
    }
}

/// 已打开的剪贴板（作用域句柄）
///
/// 句柄存活期间剪贴板处于独占状态，`Drop` 时释放。
pub trait ClipboardHandle {
    /// 当前剪贴板是否提供该格式
    fn has_format(&self, format: FormatId) -> bool;

    /// 读取文件列表，保持剪贴板中的原始顺序
    fn read_file_list(&mut self) -> Result<Vec<String>, ClipboardError>;

    /// 读取 Unicode 文本
    fn read_unicode_text(&mut self) -> Result<String, ClipboardError>;

    /// 读取旧式文本的原始字节，由调用方做宽松解码
    fn read_legacy_text(&mut self) -> Result<Vec<u8>, ClipboardError>;
}

/// 剪贴板资源
pub trait ClipboardAccess {
    type Handle<'a>: ClipboardHandle
    where
        Self: 'a;

    /// 独占打开剪贴板；被其他进程占用时返回错误，调用方下一轮重试
    fn acquire(&mut self) -> Result<Self::Handle<'_>, ClipboardError>;
}

/// 监控线程发往运行循环的"新复制"事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardEvent {
    /// 新内容的指纹
    pub fingerprint: Fingerprint,
    /// 新内容来自哪种格式
    pub kind: ContentKind,
}
