//! 主运行循环
//!
//! # 设计思路
//!
//! 控制器只在这一个任务上被调用，剪贴板事件、逐帧时钟、退出信号
//! 在同一个 `select!` 中串行处理，不存在并发修改状态机的可能。
//!
//! # 实现思路
//!
//! - 时钟：以循环启动时刻为原点的单调时间，传给 `advance_to()`。
//!   使用 `tokio::time::Instant`，暂停时间的测试同样可以驱动。
//! - 逐帧：有动画、定时器或逐帧驱动时按帧间隔唤醒，错过的帧由控制器按时间顺序补齐；
//!   控制器空闲时降到 `IDLE_INTERVAL`，只为处理平台消息。
//! - 退出：收到退出信号或事件通道关闭后调用 `shutdown()`，返回控制器供调用方检查。

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::clipboard::ClipboardEvent;
use crate::toast::{NotificationController, Surface};

/// 控制器空闲时的唤醒间隔
pub const IDLE_INTERVAL: Duration = Duration::from_millis(250);

pub struct RunLoop<S: Surface> {
    controller: NotificationController<S>,
    events: mpsc::Receiver<ClipboardEvent>,
    frame_interval: Duration,
}

impl<S: Surface> RunLoop<S> {
    pub fn new(
        controller: NotificationController<S>,
        events: mpsc::Receiver<ClipboardEvent>,
        frame_interval: Duration,
    ) -> Self {
        Self {
            controller,
            events,
            frame_interval,
        }
    }

    /// 运行直到 `shutdown` 完成或事件通道关闭
    pub async fn run<F>(mut self, shutdown: F) -> NotificationController<S>
    where
        F: Future<Output = ()>,
    {
        // 控制器的时钟从创建时的零点开始，循环原点需要对齐到它当前的时刻
        let now = Instant::now();
        let origin = now.checked_sub(self.controller.now()).unwrap_or(now);
        let mut next_wake = Instant::now();
        tokio::pin!(shutdown);

        log::info!("▶️ 运行循环启动，帧间隔 {:?}", self.frame_interval);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    log::info!("🛑 收到退出信号");
                    break;
                }

                event = self.events.recv() => match event {
                    Some(event) => {
                        self.controller.advance_to(origin.elapsed());
                        log::debug!("📋 剪贴板变化 {} ({:?})", event.fingerprint, event.kind);
                        if self.controller.on_new_copy() {
                            // 空闲间隔下的下一次唤醒可能还很远，新浮窗需要立即按帧推进
                            next_wake = next_wake.min(Instant::now() + self.frame_interval);
                        }
                    }
                    None => {
                        log::warn!("⚠️ 剪贴板事件通道已关闭，停止运行循环");
                        break;
                    }
                },

                _ = sleep_until(next_wake) => {
                    self.controller.surface_mut().pump();
                    self.controller.advance_to(origin.elapsed());
                    next_wake = Instant::now() + self.wake_interval();
                }
            }
        }

        self.controller.shutdown();
        self.controller
    }

    fn wake_interval(&self) -> Duration {
        if self.controller.is_idle() {
            IDLE_INTERVAL
        } else {
            self.frame_interval
        }
    }
}
