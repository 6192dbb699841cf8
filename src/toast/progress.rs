use std::f64::consts::TAU;

/// 加载点弹跳幅度（像素）
const DOT_BOUNCE: f64 = 4.0;

/// 启动序列的逐帧子动画进度
///
/// 只在 `Loading / Transitioning / CheckmarkShown / Closing` 期间有意义。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationProgress {
    /// 加载点相位（弧度，取模 2π）
    pub dot_phase: f64,
    /// 对勾描边进度
    pub checkmark_progress: f64,
    /// 加载点透明度
    pub dots_opacity: f64,
    /// 对勾透明度
    pub checkmark_opacity: f64,
}

impl Default for AnimationProgress {
    fn default() -> Self {
        Self {
            dot_phase: 0.0,
            checkmark_progress: 0.0,
            dots_opacity: 1.0,
            checkmark_opacity: 0.0,
        }
    }
}

impl AnimationProgress {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 推进加载点相位
    pub fn advance_dots(&mut self, step: f64) {
        self.dot_phase = (self.dot_phase + step).rem_euclid(TAU);
    }

    /// 加载点淡出、对勾淡入并描边一帧
    pub fn advance_transition(&mut self, fade_step: f64, stroke_step: f64) {
        self.dots_opacity = (self.dots_opacity - fade_step).max(0.0);
        self.checkmark_opacity = (self.checkmark_opacity + fade_step).min(1.0);
        self.checkmark_progress = (self.checkmark_progress + stroke_step).min(1.0);
    }

    /// 加载点完全消失且对勾完全显现
    pub fn transition_complete(&self) -> bool {
        self.dots_opacity <= 0.0 && self.checkmark_opacity >= 1.0
    }

    /// 三个加载点的垂直偏移，相位依次错开 1/3 周期
    pub fn dot_offsets(&self) -> [f64; 3] {
        std::array::from_fn(|i| (self.dot_phase + i as f64 * TAU / 3.0).sin() * DOT_BOUNCE)
    }
}
