//! 浮窗渲染模型
//!
//! 控制器每帧把当前状态整理成 `ToastView` 交给 `Surface`，
//! 绘制层只关心"画什么"，不需要理解状态机。

use super::progress::AnimationProgress;
use super::state::NotificationState;

/// 对勾折线（相对中心点）：左端 → 底部拐点 → 右上端
const CHECKMARK_POINTS: [(f64, f64); 3] = [(-15.0, 0.0), (-5.0, 10.0), (15.0, -10.0)];

/// 加载点 / 对勾模式的绘制参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorView {
    /// 三个加载点的垂直偏移；`None` 表示不绘制加载点
    pub dot_offsets: Option<[f64; 3]>,
    pub dots_opacity: f64,
    /// 是否绘制对勾
    pub show_checkmark: bool,
    pub checkmark_opacity: f64,
    pub checkmark_progress: f64,
}

/// 一帧的绘制内容
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastView<'a> {
    /// 浮窗隐藏，无需绘制
    Hidden,
    /// "Copied" 文字提示
    Text(&'a str),
    /// 启动序列
    Indicator(IndicatorView),
}

impl<'a> ToastView<'a> {
    pub fn from_parts(state: NotificationState, progress: &AnimationProgress, text: &'a str) -> Self {
        if state == NotificationState::Hidden {
            return Self::Hidden;
        }
        if !state.is_indicator() {
            return Self::Text(text);
        }

        let dot_offsets =
            (state.shows_dots() && progress.dots_opacity > 0.0).then(|| progress.dot_offsets());
        Self::Indicator(IndicatorView {
            dot_offsets,
            dots_opacity: progress.dots_opacity,
            show_checkmark: state.shows_checkmark() && progress.checkmark_opacity > 0.0,
            checkmark_opacity: progress.checkmark_opacity,
            checkmark_progress: progress.checkmark_progress,
        })
    }
}

/// 按描边进度截取对勾折线
///
/// 沿折线总长度截取 `progress` 比例，返回需要连线的顶点序列（至少包含起点）。
/// `progress >= 1.0` 时返回完整的三个顶点。
pub fn checkmark_stroke(center: (f64, f64), progress: f64) -> Vec<(f64, f64)> {
    let (cx, cy) = center;
    let points: Vec<(f64, f64)> = CHECKMARK_POINTS
        .iter()
        .map(|&(dx, dy)| (cx + dx, cy + dy))
        .collect();
    if progress >= 1.0 {
        return points;
    }

    let segment_len = |a: (f64, f64), b: (f64, f64)| ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
    let total: f64 = points.windows(2).map(|w| segment_len(w[0], w[1])).sum();
    let mut remaining = total * progress.clamp(0.0, 1.0);

    let mut stroke = vec![points[0]];
    for w in points.windows(2) {
        let len = segment_len(w[0], w[1]);
        if remaining >= len {
            stroke.push(w[1]);
            remaining -= len;
            continue;
        }
        if remaining > 0.0 {
            let t = remaining / len;
            stroke.push((w[0].0 + (w[1].0 - w[0].0) * t, w[0].1 + (w[1].1 - w[0].1) * t));
        }
        break;
    }
    stroke
}
