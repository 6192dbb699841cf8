//! 固定时序与视觉常量
//!
//! 所有时长、尺寸、步进量集中在这里。运行时不读取任何配置文件，
//! 这里的 `Default` 即为产品行为；测试可以构造自定义实例以缩短时序。

use std::time::Duration;

use crate::toast::geometry::Size;

/// 剪贴板轮询间隔
const POLL_INTERVAL_MS: u64 = 100;
/// 监控线程 → 运行循环的事件队列容量
const EVENT_QUEUE_CAPACITY: usize = 8;

/// 剪贴板监控参数
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// 两次轮询之间的休眠时长
    pub poll_interval: Duration,
    /// 有界事件队列容量
    pub queue_capacity: usize,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            queue_capacity: EVENT_QUEUE_CAPACITY,
        }
    }
}

/// 通知浮窗参数
#[derive(Debug, Clone)]
pub struct ToastConfig {
    /// 文字模式显示的内容
    pub text: String,
    /// 文字外框的额外内边距（宽高各加）
    pub text_padding: u32,
    /// 位置 / 透明度动画时长
    pub slide_duration: Duration,
    /// 宽度形变动画时长
    pub morph_duration: Duration,
    /// 完全显示后的停留时长
    pub dwell: Duration,
    /// 启动序列中加载点持续时长
    pub loading_delay: Duration,
    /// 对勾完整显示后的停留时长
    pub checkmark_hold: Duration,
    /// 逐帧驱动间隔（约 60 Hz）
    pub frame_interval: Duration,
    /// 加载点外框
    pub dots_box: Size,
    /// 对勾外框（形变终点）
    pub checkmark_box: Size,
    /// 屏幕底边以下的隐藏偏移
    pub offscreen_margin: i32,
    /// 显示时距屏幕底边的距离
    pub bottom_margin: i32,
    /// 每帧加载点相位增量（弧度）
    pub dot_phase_step: f64,
    /// 每帧加载点淡出 / 对勾淡入的透明度步进
    pub fade_step: f64,
    /// 每帧对勾描边进度步进
    pub stroke_step: f64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            text: "Copied".to_string(),
            text_padding: 24,
            slide_duration: Duration::from_millis(300),
            morph_duration: Duration::from_millis(400),
            dwell: Duration::from_millis(600),
            loading_delay: Duration::from_millis(2000),
            checkmark_hold: Duration::from_millis(1000),
            frame_interval: Duration::from_millis(16),
            dots_box: Size::new(100, 60),
            checkmark_box: Size::new(80, 60),
            offscreen_margin: 10,
            bottom_margin: 40,
            dot_phase_step: 0.1,
            fade_step: 0.025,
            stroke_step: 0.05,
        }
    }
}
