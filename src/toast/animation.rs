//! 属性插值动画
//!
//! 每个动画只是一段显式状态：起止值、开始时刻、时长、缓动函数。
//! 控制器在推进时钟时直接读取 `value_at(now)`，并在 `ends_at()` 到达时
//! 处理完成事件，不需要回调对象，守卫检查就是普通的字段比较。

use std::time::Duration;

/// 缓动曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    InOutQuad,
}

impl Easing {
    /// 把线性进度 `t ∈ [0, 1]` 映射为缓动后的进度
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// 可插值的属性值
pub trait Lerp: Copy {
    fn lerp(from: Self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(from: Self, to: Self, t: f64) -> Self {
        from + (to - from) * t
    }
}

/// 一段属性动画
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    started_at: Duration,
    duration: Duration,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, started_at: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            easing,
        }
    }

    /// 动画结束时刻
    pub fn ends_at(&self) -> Duration {
        self.started_at + self.duration
    }

    /// 线性进度，钳制在 `[0, 1]`；零时长视为立即完成
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.ends_at()
    }

    /// 给定时刻的属性值；结束后精确返回终点值
    pub fn value_at(&self, now: Duration) -> T {
        if self.is_finished(now) {
            return self.to;
        }
        T::lerp(self.from, self.to, self.easing.apply(self.progress(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn in_out_quad_is_symmetric() {
        let e = Easing::InOutQuad;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(0.5), 0.5);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
        assert!(e.apply(0.25) < 0.25, "slow start");
    }

    #[test]
    fn easing_clamps_out_of_range() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::InOutQuad.apply(2.0), 1.0);
    }

    #[test]
    fn tween_reaches_exact_target() {
        let tween = Tween::new(1.0_f64, 0.0, ms(100), ms(300), Easing::InOutQuad);
        assert_eq!(tween.ends_at(), ms(400));
        assert_eq!(tween.value_at(ms(100)), 1.0);
        assert_eq!(tween.value_at(ms(400)), 0.0);
        assert_eq!(tween.value_at(ms(900)), 0.0);
        assert!(!tween.is_finished(ms(399)));
        assert!(tween.is_finished(ms(400)));
    }

    #[test]
    fn tween_before_start_holds_origin() {
        let tween = Tween::new(0.0_f64, 1.0, ms(100), ms(200), Easing::Linear);
        assert_eq!(tween.value_at(ms(50)), 0.0);
        assert!((tween.value_at(ms(200)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let tween = Tween::new(0.0_f64, 1.0, ms(10), Duration::ZERO, Easing::Linear);
        assert_eq!(tween.progress(ms(10)), 1.0);
        assert_eq!(tween.value_at(ms(10)), 1.0);
    }
}
