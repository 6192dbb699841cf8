// Clipboard change detection against a scripted clipboard
mod common;

use std::thread;
use std::time::{Duration, Instant};

use common::{ScriptedClipboard, Snapshot, Step};
use copy_toast::clipboard::{ClipboardWatcher, ContentKind, FormatId, PollOutcome, spawn_watcher};
use copy_toast::config::WatcherConfig;
use proptest::prelude::*;
use tokio::sync::mpsc;

fn fast_config(queue_capacity: usize) -> WatcherConfig {
    WatcherConfig {
        poll_interval: Duration::from_millis(1),
        queue_capacity,
    }
}

fn changed_kind(outcome: PollOutcome) -> Option<ContentKind> {
    match outcome {
        PollOutcome::Changed(event) => Some(event.kind),
        _ => None,
    }
}

#[test]
fn file_list_wins_over_text() {
    let both = Snapshot {
        files: Some(vec!["C:\\a.txt".to_string()]),
        text: Some("a.txt".to_string()),
        ..Default::default()
    };
    let mut watcher = ClipboardWatcher::new(ScriptedClipboard::new([Step::Present(both)]));
    assert_eq!(changed_kind(watcher.poll_once()), Some(ContentKind::FileList));
}

#[test]
fn legacy_text_is_used_as_last_resort() {
    let legacy = Snapshot {
        legacy: Some(b"caf\xe9\0garbage".to_vec()),
        ..Default::default()
    };
    let mut watcher = ClipboardWatcher::new(ScriptedClipboard::new([Step::Present(legacy)]));
    assert_eq!(changed_kind(watcher.poll_once()), Some(ContentKind::LegacyText));
    assert_eq!(watcher.poll_once(), PollOutcome::Unchanged);
}

#[test]
fn same_files_in_another_order_are_unchanged() {
    let mut watcher = ClipboardWatcher::new(ScriptedClipboard::new([
        Step::Present(Snapshot::files(&["b.txt", "a.txt"])),
        Step::Present(Snapshot::files(&["a.txt", "b.txt"])),
    ]));
    assert!(matches!(watcher.poll_once(), PollOutcome::Changed(_)));
    assert_eq!(watcher.poll_once(), PollOutcome::Unchanged);
}

#[test]
fn broken_format_does_not_fall_through_or_reset() {
    let broken = Snapshot {
        text: Some("fallback".to_string()),
        broken: Some(FormatId::FileList),
        ..Default::default()
    };
    let mut watcher = ClipboardWatcher::new(ScriptedClipboard::new([
        Step::Present(Snapshot::text("x")),
        Step::Present(broken),
        Step::Busy,
        Step::Present(Snapshot::text("x")),
    ]));
    assert!(matches!(watcher.poll_once(), PollOutcome::Changed(_)));
    let seen = watcher.last_seen();

    assert_eq!(watcher.poll_once(), PollOutcome::Failed);
    assert_eq!(watcher.poll_once(), PollOutcome::Failed);
    assert_eq!(watcher.last_seen(), seen);
    assert_eq!(watcher.poll_once(), PollOutcome::Unchanged);
}

#[test]
fn empty_clipboard_keeps_previous_fingerprint() {
    let mut watcher = ClipboardWatcher::new(ScriptedClipboard::new([
        Step::Present(Snapshot::text("x")),
        Step::Present(Snapshot::default()),
        Step::Present(Snapshot::text("x")),
    ]));
    assert!(matches!(watcher.poll_once(), PollOutcome::Changed(_)));
    assert_eq!(watcher.poll_once(), PollOutcome::NoContent);
    assert_eq!(watcher.poll_once(), PollOutcome::Unchanged);
}

#[test]
fn watcher_thread_delivers_changes_and_stops() {
    let (tx, mut rx) = mpsc::channel(8);
    let handle = spawn_watcher(
        || ScriptedClipboard::texts(&["a", "a", "b"]),
        &fast_config(8),
        tx,
    )
    .unwrap();

    let first = rx.blocking_recv().unwrap();
    let second = rx.blocking_recv().unwrap();
    assert_ne!(first.fingerprint, second.fingerprint);

    handle.stop();
    assert!(rx.blocking_recv().is_none(), "sender dropped with the thread");
}

#[test]
fn full_queue_drops_events_without_blocking() {
    let texts: Vec<String> = (0..50).map(|i| format!("text-{i}")).collect();
    let (tx, mut rx) = mpsc::channel(1);
    let handle = spawn_watcher(
        move || ScriptedClipboard::new(texts.iter().map(|t| Step::Present(Snapshot::text(t)))),
        &fast_config(1),
        tx,
    )
    .unwrap();

    thread::sleep(Duration::from_millis(100));
    handle.stop();

    assert!(rx.try_recv().is_ok());
    assert!(rx.blocking_recv().is_none());
}

#[test]
fn watcher_exits_when_receiver_is_gone() {
    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    let handle = spawn_watcher(|| ScriptedClipboard::texts(&["a"]), &fast_config(1), tx).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !handle.is_finished() {
        assert!(Instant::now() < deadline, "watcher thread did not exit");
        thread::sleep(Duration::from_millis(5));
    }
}

/// Number of maximal runs of equal adjacent values
fn runs(values: &[u8]) -> usize {
    values.windows(2).filter(|w| w[0] != w[1]).count() + usize::from(!values.is_empty())
}

proptest! {
    #[test]
    fn one_event_per_distinct_run(values in prop::collection::vec(0u8..3, 1..40)) {
        let texts: Vec<String> = values.iter().map(|v| format!("clip-{v}")).collect();
        let mut watcher = ClipboardWatcher::new(ScriptedClipboard::new(
            texts.iter().map(|t| Step::Present(Snapshot::text(t))),
        ));

        let changed = (0..values.len())
            .filter(|_| matches!(watcher.poll_once(), PollOutcome::Changed(_)))
            .count();
        prop_assert_eq!(changed, runs(&values));
    }

    #[test]
    fn busy_polls_never_emit(busy in prop::collection::vec(any::<bool>(), 1..30)) {
        let steps = std::iter::once(Step::Present(Snapshot::text("same")))
            .chain(busy.iter().map(|&b| if b {
                Step::Busy
            } else {
                Step::Present(Snapshot::text("same"))
            }));
        let mut watcher = ClipboardWatcher::new(ScriptedClipboard::new(steps));
        prop_assert!(matches!(watcher.poll_once(), PollOutcome::Changed(_)));
        for _ in 0..busy.len() {
            prop_assert!(!matches!(watcher.poll_once(), PollOutcome::Changed(_)));
        }
    }
}
