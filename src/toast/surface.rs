//! 浮窗绘制层接口
//!
//! # 设计思路
//!
//! 窗口合成（置顶、无边框、不进任务栏、半透明）与像素绘制不属于状态机，
//! 控制器只通过 `Surface` 设置尺寸、位置、透明度与可见性，并每帧提交一份 `ToastView`。
//! 动画与定时器由控制器以显式状态维护，绘制层不持有任何时序逻辑。
//!
//! # 实现思路
//!
//! - Windows：`win32::Win32Surface`，分层窗口 + GDI 绘制。
//! - 其他平台：`HeadlessSurface`，只记录日志，便于在无桌面环境下运行。

use super::geometry::{Point, Size};
use super::view::ToastView;
use crate::display;

/// 浮窗绘制层
pub trait Surface {
    /// 主显示器尺寸；每次调用都重新查询，反映分辨率与主显示器的变化
    fn primary_display_bounds(&self) -> Size;

    /// 文本在浮窗字体下的外框尺寸
    fn text_extent(&self, text: &str) -> Size;

    fn set_size(&mut self, size: Size);

    fn set_position(&mut self, position: Point);

    /// `opacity ∈ [0, 1]`
    fn set_opacity(&mut self, opacity: f64);

    fn show(&mut self);

    fn hide(&mut self);

    /// 提交一帧绘制内容
    fn render(&mut self, view: &ToastView<'_>);

    /// 处理平台消息；无消息循环的平台无需实现
    fn pump(&mut self) {}
}

/// 估算字符宽度（像素），对应 14pt 粗体
const HEADLESS_CHAR_WIDTH: u32 = 11;
/// 估算行高（像素）
const HEADLESS_LINE_HEIGHT: u32 = 25;

/// 无窗口的绘制层，只把属性变化写入日志
#[derive(Debug)]
pub struct HeadlessSurface {
    visible: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for HeadlessSurface {
    fn primary_display_bounds(&self) -> Size {
        display::primary_display_bounds()
    }

    fn text_extent(&self, text: &str) -> Size {
        Size::new(
            text.chars().count() as u32 * HEADLESS_CHAR_WIDTH,
            HEADLESS_LINE_HEIGHT,
        )
    }

    fn set_size(&mut self, size: Size) {
        log::trace!("🪟 size = {}x{}", size.width, size.height);
    }

    fn set_position(&mut self, position: Point) {
        log::trace!("🪟 position = ({}, {})", position.x, position.y);
    }

    fn set_opacity(&mut self, opacity: f64) {
        log::trace!("🪟 opacity = {:.2}", opacity);
    }

    fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            log::info!("✅ 浮窗显示");
        }
    }

    fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            log::info!("🫥 浮窗隐藏");
        }
    }

    fn render(&mut self, view: &ToastView<'_>) {
        log::trace!("🎨 {:?}", view);
    }
}
