use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};

use super::{ClipboardAccess, ClipboardContent, ClipboardEvent, Fingerprint};
use crate::config::WatcherConfig;
use crate::error::{AppError, ClipboardError};

/// 单次轮询的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// 指纹发生变化，需要发出"新复制"事件
    Changed(ClipboardEvent),
    /// 与上次内容相同
    Unchanged,
    /// 没有受支持的格式
    NoContent,
    /// 打开或读取失败，本轮作废
    Failed,
}

/// 剪贴板变化检测器
///
/// 只保存上一次成功读取的指纹。读取失败与空内容都不会改动它，
/// 因此剪贴板短暂被占用后恢复原内容时不会误报。
pub struct ClipboardWatcher<A: ClipboardAccess> {
    access: A,
    last_seen: Option<Fingerprint>,
}

impl<A: ClipboardAccess> ClipboardWatcher<A> {
    pub fn new(access: A) -> Self {
        Self {
            access,
            last_seen: None,
        }
    }

    pub fn last_seen(&self) -> Option<Fingerprint> {
        self.last_seen
    }

    /// 轮询一次剪贴板
    ///
    /// 永不失败：所有错误都在这里吸收并记录，下一轮自然重试。
    /// 启动后第一次成功读取也视为变化。
    pub fn poll_once(&mut self) -> PollOutcome {
        let content = match self.read_content() {
            Ok(content) => content,
            Err(ClipboardError::Busy(reason)) => {
                log::trace!("⏳ 剪贴板被占用，下一轮重试: {}", reason);
                return PollOutcome::Failed;
            }
            Err(err) => {
                log::debug!("⚠️ 读取剪贴板失败，本轮忽略: {}", err);
                return PollOutcome::Failed;
            }
        };

        let (Some(fingerprint), Some(kind)) = (Fingerprint::of_content(&content), content.kind())
        else {
            return PollOutcome::NoContent;
        };

        if self.last_seen == Some(fingerprint) {
            return PollOutcome::Unchanged;
        }

        log::debug!("📋 剪贴板内容变化: {} ({})", content, fingerprint);
        self.last_seen = Some(fingerprint);
        PollOutcome::Changed(ClipboardEvent { fingerprint, kind })
    }

    fn read_content(&mut self) -> Result<ClipboardContent, ClipboardError> {
        // 句柄在本函数返回时 Drop，成功与失败路径都会释放剪贴板
        let mut handle = self.access.acquire()?;
        ClipboardContent::read_from(&mut handle)
    }

    /// 固定间隔轮询，直到 `stop` 被置位
    ///
    /// 停止标志在每轮开始时检查，当前这一轮总是完整执行。
    /// 事件队列已满时丢弃事件：运行循环尚未消费的事件本来也只会触发同一个浮窗。
    pub fn run(mut self, events: mpsc::Sender<ClipboardEvent>, stop: &AtomicBool, interval: Duration) {
        log::info!("📋 剪贴板监听已启动（间隔 {}ms）", interval.as_millis());

        while !stop.load(Ordering::Acquire) {
            if let PollOutcome::Changed(event) = self.poll_once() {
                match events.try_send(event) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        log::debug!("⏭️ 事件队列已满，丢弃本次变化事件");
                    }
                    Err(TrySendError::Closed(_)) => {
                        log::warn!("📋 事件接收端已关闭，剪贴板监听退出");
                        break;
                    }
                }
            }
            thread::sleep(interval);
        }

        log::info!("📋 剪贴板监听已退出");
    }
}

/// 后台监控线程句柄
///
/// `stop()` 置位停止标志并等待线程结束；直接 Drop 只置位不等待。
pub struct WatcherHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WatcherHandle {
    /// 请求停止并等待监控线程退出
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("📋 剪贴板监听线程异常退出");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
    }
}

/// 在独立线程中启动剪贴板监控
///
/// 剪贴板资源由 `factory` 在监控线程内部创建，部分平台的剪贴板对象不能跨线程移动。
pub fn spawn_watcher<A, F>(
    factory: F,
    config: &WatcherConfig,
    events: mpsc::Sender<ClipboardEvent>,
) -> Result<WatcherHandle, AppError>
where
    A: ClipboardAccess,
    F: FnOnce() -> A + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = Arc::clone(&stop);
    let interval = config.poll_interval;

    let thread = thread::Builder::new()
        .name("clipboard-watcher".to_string())
        .spawn(move || {
            ClipboardWatcher::new(factory()).run(events, &thread_stop, interval);
        })?;

    Ok(WatcherHandle {
        stop,
        thread: Some(thread),
    })
}
