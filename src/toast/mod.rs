//! "Copied" 浮窗通知模块
//!
//! 屏幕底部居中的小浮窗，两条显示路径：
//!
//! ```text
//! 复制提示:  Hidden → Showing → Visible → Hiding → Hidden
//!                      300ms     600ms     300ms
//!
//! 启动序列:  Hidden → Loading → Transitioning → CheckmarkShown → Closing → Hidden
//!                      2000ms    变形 400ms + 渐变     1000ms        300ms
//! ```
//!
//! # 设计思路
//!
//! - 状态机、属性动画、逐帧子动画、定时器全部由 `NotificationController` 以显式状态持有，
//!   通过 `advance_to(now)` 推进，测试可以用虚拟时钟精确驱动。
//! - 所有定时器都带序列号，触发时重新检查状态与序列号，过期即丢弃。
//! - 绘制与窗口合成隔离在 `Surface` 之后：Windows 使用 GDI 分层窗口，
//!   其他平台使用只写日志的 `HeadlessSurface`。
//!
//! # 模块结构
//!
//! - `controller` - 状态机与时钟推进
//! - `state` / `progress` - 状态枚举与逐帧子动画进度
//! - `animation` / `timer` - 属性插值与一次性定时器
//! - `geometry` - 尺寸、坐标、摆放计算
//! - `view` / `surface` - 渲染模型与绘制层接口

pub mod animation;
pub mod controller;
pub mod geometry;
pub mod progress;
pub mod state;
pub mod surface;
pub mod timer;
pub mod view;

#[cfg(target_os = "windows")]
pub mod win32;

pub use controller::NotificationController;
pub use geometry::{Placement, Point, Size};
pub use progress::AnimationProgress;
pub use state::NotificationState;
pub use surface::{HeadlessSurface, Surface};
pub use view::{IndicatorView, ToastView};

use crate::error::AppError;

#[cfg(target_os = "windows")]
pub type PlatformSurface = win32::Win32Surface;

#[cfg(not(target_os = "windows"))]
pub type PlatformSurface = HeadlessSurface;

/// 创建当前平台的浮窗绘制层
pub fn platform_surface() -> Result<PlatformSurface, AppError> {
    #[cfg(target_os = "windows")]
    {
        win32::Win32Surface::new()
    }

    #[cfg(not(target_os = "windows"))]
    {
        Ok(HeadlessSurface::new())
    }
}
