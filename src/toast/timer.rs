use std::time::Duration;

/// 一次性定时器的用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// "Copied" 浮窗完全显示后的停留
    Dwell,
    /// 启动序列中加载点 → 对勾的延迟
    LoadingDelay,
    /// 对勾完整显示后的停留
    CheckmarkHold,
}

/// 已排期的一次性定时器
///
/// `epoch` 记录排期时所属的显示序列，触发时与控制器当前序列比对。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub due: Duration,
    pub epoch: u64,
}

/// 按到期时间排序的定时器队列，到期时间相同时保持排期顺序
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn schedule(&mut self, kind: TimerKind, due: Duration, epoch: u64) {
        let at = self.timers.partition_point(|t| t.due <= due);
        self.timers.insert(at, Timer { kind, due, epoch });
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.timers.first().map(|t| t.due)
    }

    /// 取出最早一个已到期的定时器
    pub fn pop_due(&mut self, now: Duration) -> Option<Timer> {
        if self.next_due()? <= now {
            Some(self.timers.remove(0))
        } else {
            None
        }
    }

    /// 清空队列，不触发任何定时器，返回被取消的数量
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.timers.len();
        self.timers.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// 固定间隔的逐帧驱动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDriver {
    next_tick: Duration,
    interval: Duration,
}

impl FrameDriver {
    /// 从 `now` 开始，第一帧在一个间隔之后
    pub fn start(now: Duration, interval: Duration) -> Self {
        Self {
            next_tick: now + interval,
            interval,
        }
    }

    pub fn next_tick(&self) -> Duration {
        self.next_tick
    }

    pub fn advance(&mut self) {
        self.next_tick += self.interval;
    }
}
