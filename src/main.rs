// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # 复制提示浮窗 — 应用入口
//!
//! 本文件仅负责日志、运行时与各组件的装配。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::process::ExitCode;

use copy_toast::clipboard::{self, platform};
use copy_toast::config::{ToastConfig, WatcherConfig};
use copy_toast::error::AppError;
use copy_toast::runtime::RunLoop;
use copy_toast::toast::{self, NotificationController};
use tokio::sync::mpsc;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ 启动失败: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let watcher_config = WatcherConfig::default();
    let toast_config = ToastConfig::default();
    let frame_interval = toast_config.frame_interval;

    let (events_tx, events_rx) = mpsc::channel(watcher_config.queue_capacity);

    // 浮窗必须在运行循环所在线程创建
    let surface = toast::platform_surface()?;
    let mut controller = NotificationController::new(surface, toast_config);
    controller.start_loading();
    log::info!("setup: startup sequence started");

    let watcher = clipboard::spawn_watcher(platform::system_clipboard, &watcher_config, events_tx)?;
    log::info!("setup: clipboard watcher spawned");

    let controller = runtime.block_on(async {
        RunLoop::new(controller, events_rx, frame_interval)
            .run(shutdown_signal())
            .await
    });
    log::debug!("最终状态: {:?}", controller.state());

    watcher.stop();
    log::info!("👋 已退出");
    Ok(())
}

/// Ctrl+C；信号监听注册失败时永不完成，进程由系统结束
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("退出信号监听失败: {err}");
        std::future::pending::<()>().await;
    }
}
