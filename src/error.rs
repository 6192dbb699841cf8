//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 错误只在两处真正向上传播：进程启动阶段（运行时、窗口创建）与剪贴板适配层。
//! 剪贴板监控循环会在发生点就地吸收 `ClipboardError`，绝不把它交给调用方；
//! 通知控制器自身没有可失败的逻辑。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - `ClipboardError` 区分"被占用"（下一轮重试即可）与"读取失败"，
//!   便于日志分级。
//! - `AppError` 为 `main` 使用的顶层错误，提供 `From` 转换，无需手动 map。

/// 剪贴板适配层错误
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// 剪贴板被其他进程占用，下一轮轮询重试
    #[error("剪贴板被占用: {0}")]
    Busy(String),

    /// 格式存在但数据读取失败
    #[error("读取剪贴板格式 {format} 失败: {message}")]
    Read {
        format: &'static str,
        message: String,
    },

    /// 当前平台不支持该格式
    #[error("当前平台不支持剪贴板格式 {0}")]
    Unsupported(&'static str),
}

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 剪贴板访问失败
    #[error("剪贴板操作失败: {0}")]
    Clipboard(#[from] ClipboardError),

    /// 窗口操作失败
    #[error("窗口操作失败: {0}")]
    Window(String),

    /// 线程或运行时 I/O 错误
    #[error("运行时错误: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_error_converts_into_app_error() {
        let err: AppError = ClipboardError::Busy("OpenClipboard".to_string()).into();
        assert!(matches!(err, AppError::Clipboard(ClipboardError::Busy(_))));
        assert!(err.to_string().contains("OpenClipboard"));
    }

    #[test]
    fn read_error_message_names_the_format() {
        let err = ClipboardError::Read {
            format: "CF_HDROP",
            message: "GlobalLock 返回空指针".to_string(),
        };
        assert!(err.to_string().contains("CF_HDROP"));
    }
}
