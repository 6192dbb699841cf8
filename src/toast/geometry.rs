//! 浮窗几何计算模块
//!
//! 浮窗始终水平居中于主显示器，在"屏幕底边以下"与"屏幕底部上方"两个位置之间滑动。
//!
//! # 设计思路
//!
//! - 算法纯函数化：输入为显示器尺寸与浮窗尺寸，输出唯一的摆放参数，便于测试。
//! - `Placement` 不是独立可变状态：浮窗尺寸每次变化都重新计算。
//! - 浮窗比屏幕还宽时水平坐标收敛到 0，避免出现负坐标。

use super::animation::Lerp;

/// 像素尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 宽高各加同一内边距
    pub fn padded(self, padding: u32) -> Self {
        Self::new(
            self.width.saturating_add(padding),
            self.height.saturating_add(padding),
        )
    }
}

/// 屏幕坐标（左上角为原点，Y 轴向下）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

fn lerp_f64(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Lerp for Point {
    fn lerp(from: Self, to: Self, t: f64) -> Self {
        Point::new(
            lerp_f64(from.x as f64, to.x as f64, t).round() as i32,
            lerp_f64(from.y as f64, to.y as f64, t).round() as i32,
        )
    }
}

impl Lerp for Size {
    fn lerp(from: Self, to: Self, t: f64) -> Self {
        Size::new(
            lerp_f64(from.width as f64, to.width as f64, t).round().max(0.0) as u32,
            lerp_f64(from.height as f64, to.height as f64, t).round().max(0.0) as u32,
        )
    }
}

/// 浮窗摆放参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// 水平居中时的左上角 X
    pub center_x: i32,
    /// 隐藏位置（屏幕底边以下）的 Y
    pub bottom_y: i32,
    /// 显示位置的 Y
    pub top_y: i32,
}

impl Placement {
    /// 根据显示器尺寸与浮窗尺寸计算摆放参数
    ///
    /// # 参数
    /// * `display`          - 主显示器尺寸
    /// * `widget`           - 浮窗当前尺寸
    /// * `offscreen_margin` - 隐藏时位于屏幕底边以下的距离
    /// * `bottom_margin`    - 显示时浮窗底边距屏幕底边的距离
    pub fn compute(display: Size, widget: Size, offscreen_margin: i32, bottom_margin: i32) -> Self {
        let dw = display.width as i32;
        let dh = display.height as i32;
        let ww = widget.width as i32;
        let wh = widget.height as i32;

        Self {
            center_x: (dw - ww).max(0) / 2,
            bottom_y: dh + offscreen_margin,
            top_y: dh - wh - bottom_margin,
        }
    }

    /// 隐藏位置
    pub fn offscreen(&self) -> Point {
        Point::new(self.center_x, self.bottom_y)
    }

    /// 显示位置
    pub fn onscreen(&self) -> Point {
        Point::new(self.center_x, self.top_y)
    }
}
