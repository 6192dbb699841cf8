// Run loop driven by tokio's paused clock
mod common;

use std::time::Duration;

use common::{Drawn, controller, copy_event};
use copy_toast::runtime::RunLoop;
use copy_toast::toast::NotificationState;
use tokio::sync::mpsc;
use tokio::time::sleep;

const FRAME: Duration = Duration::from_millis(16);

#[tokio::test(start_paused = true)]
async fn copy_event_plays_the_toast_once() {
    let (tx, rx) = mpsc::channel(8);
    tx.send(copy_event("hello")).await.unwrap();
    tx.send(copy_event("world")).await.unwrap();

    let c = RunLoop::new(controller(), rx, FRAME)
        .run(sleep(Duration::from_millis(1500)))
        .await;

    assert_eq!(c.state(), NotificationState::Hidden);
    let surface = c.surface();
    assert_eq!(surface.shows, 1, "second copy arrived while showing");
    assert_eq!(surface.hides, 1);
    assert!(surface.drawn.iter().all(|d| *d == Drawn::Text));
    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn closed_channel_ends_the_loop() {
    let (tx, rx) = mpsc::channel(8);
    drop(tx);

    let c = RunLoop::new(controller(), rx, FRAME)
        .run(std::future::pending::<()>())
        .await;
    assert_eq!(c.state(), NotificationState::Hidden);
    assert_eq!(c.surface().shows, 0);
}

#[tokio::test(start_paused = true)]
async fn startup_sequence_runs_to_completion() {
    let (tx, rx) = mpsc::channel(8);
    let _keep_open = tx.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(500)).await;
        let _ = tx.send(copy_event("during startup")).await;
    });

    let mut ctrl = controller();
    assert!(ctrl.start_loading());
    let c = RunLoop::new(ctrl, rx, FRAME)
        .run(sleep(Duration::from_millis(5000)))
        .await;

    let surface = c.surface();
    assert_eq!(surface.shows, 1);
    assert_eq!(surface.hides, 1);
    assert!(surface.drawn.contains(&Drawn::Dots));
    assert!(surface.drawn.contains(&Drawn::Checkmark));
    assert!(!surface.drawn.contains(&Drawn::Text));
}

#[tokio::test(start_paused = true)]
async fn shutdown_mid_toast_hides_and_cancels() {
    let (tx, rx) = mpsc::channel(8);
    tx.send(copy_event("x")).await.unwrap();

    let c = RunLoop::new(controller(), rx, FRAME)
        .run(sleep(Duration::from_millis(500)))
        .await;

    assert_eq!(c.state(), NotificationState::Hidden);
    assert_eq!(c.pending_timers(), 0);
    assert!(!c.is_animating());
    assert!(!c.surface().visible);
    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn idle_loop_wakes_at_the_idle_rate() {
    let (tx, rx) = mpsc::channel(8);

    let c = RunLoop::new(controller(), rx, FRAME)
        .run(sleep(Duration::from_secs(10)))
        .await;

    let pumps = c.surface().pumps;
    assert!((35..=45).contains(&pumps), "woke {pumps} times in 10s");
    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn copy_after_long_idle_still_animates_per_frame() {
    let (tx, rx) = mpsc::channel(8);
    let _keep_open = tx.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(5010)).await;
        let _ = tx.send(copy_event("late")).await;
    });

    let c = RunLoop::new(controller(), rx, FRAME)
        .run(sleep(Duration::from_millis(6400)))
        .await;

    let surface = c.surface();
    assert_eq!((surface.shows, surface.hides), (1, 1));
    // 300 ms entry at 16 ms frames renders far more than a 250 ms idle tick would
    assert!(surface.drawn.len() > 30, "rendered {} frames", surface.drawn.len());
}
