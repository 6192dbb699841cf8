//! # 复制提示浮窗 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌─ 监控线程 (clipboard-watcher) ──────────────────────────┐
//! │                                                         │
//! │  ClipboardWatcher ── 每 100ms 轮询                       │
//! │    ├─ platform   Win32 / arboard 适配                   │
//! │    ├─ content    CF_HDROP → CF_UNICODETEXT → CF_TEXT   │
//! │    └─ fingerprint SHA-256 指纹去重                      │
//! └──────────────┬──────────────────────────────────────────┘
//!                ↓ 有界 mpsc (ClipboardEvent, try_send)
//! ┌─ 运行循环 (current_thread runtime) ─────────────────────┐
//! │                                                         │
//! │  RunLoop ── select! { 退出信号 | 剪贴板事件 | 逐帧 }      │
//! │    ↓                                                    │
//! │  NotificationController ── 状态机 + 动画 + 定时器        │
//! │    ↓                                                    │
//! │  Surface ── Win32 分层窗口 / Headless 日志               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` / `ClipboardError` |
//! | [`config`] | 时序与视觉常量 |
//! | [`clipboard`] | 剪贴板访问抽象、内容读取、指纹、轮询线程 |
//! | [`toast`] | 浮窗状态机、动画、绘制层 |
//! | [`display`] | 主显示器尺寸查询 |
//! | [`runtime`] | 把剪贴板事件与逐帧时钟交给控制器的主循环 |

pub mod error;
pub mod config;
pub mod clipboard;
pub mod display;
pub mod runtime;
pub mod toast;
