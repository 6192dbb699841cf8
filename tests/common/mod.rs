// Shared fixtures for the integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use copy_toast::clipboard::{ClipboardAccess, ClipboardEvent, ClipboardHandle, ContentKind, Fingerprint, FormatId};
use copy_toast::config::ToastConfig;
use copy_toast::error::ClipboardError;
use copy_toast::toast::{NotificationController, Point, Size, Surface, ToastView};

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// ============================================================================
// Surface
// ============================================================================

/// What a single rendered frame contained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawn {
    Text,
    Dots,
    Checkmark,
    DotsAndCheckmark,
    Blank,
}

/// Surface that records every call instead of drawing
#[derive(Debug)]
pub struct RecordingSurface {
    pub bounds: Size,
    pub visible: bool,
    pub shows: usize,
    pub hides: usize,
    pub size: Size,
    pub position: Point,
    pub opacity: f64,
    pub drawn: Vec<Drawn>,
    pub pumps: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            bounds: Size::new(1920, 1080),
            visible: false,
            shows: 0,
            hides: 0,
            size: Size::default(),
            position: Point::default(),
            opacity: 0.0,
            drawn: Vec::new(),
            pumps: 0,
        }
    }
}

impl Surface for RecordingSurface {
    fn primary_display_bounds(&self) -> Size {
        self.bounds
    }

    fn text_extent(&self, text: &str) -> Size {
        Size::new(text.chars().count() as u32 * 10, 20)
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn set_opacity(&mut self, opacity: f64) {
        assert!((0.0..=1.0).contains(&opacity), "opacity out of range: {opacity}");
        self.opacity = opacity;
    }

    fn show(&mut self) {
        self.visible = true;
        self.shows += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hides += 1;
    }

    fn render(&mut self, view: &ToastView<'_>) {
        let drawn = match view {
            ToastView::Hidden => panic!("hidden toast should not be rendered"),
            ToastView::Text(_) => Drawn::Text,
            ToastView::Indicator(v) => match (v.dot_offsets.is_some(), v.show_checkmark) {
                (true, true) => Drawn::DotsAndCheckmark,
                (true, false) => Drawn::Dots,
                (false, true) => Drawn::Checkmark,
                (false, false) => Drawn::Blank,
            },
        };
        self.drawn.push(drawn);
    }

    fn pump(&mut self) {
        self.pumps += 1;
    }
}

pub fn controller() -> NotificationController<RecordingSurface> {
    NotificationController::new(RecordingSurface::new(), ToastConfig::default())
}

pub fn copy_event(text: &str) -> ClipboardEvent {
    ClipboardEvent {
        fingerprint: Fingerprint::of_bytes(text.as_bytes()),
        kind: ContentKind::UnicodeText,
    }
}

// ============================================================================
// Clipboard
// ============================================================================

/// Formats present on the clipboard for one poll
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub files: Option<Vec<String>>,
    pub text: Option<String>,
    pub legacy: Option<Vec<u8>>,
    /// Format that is advertised but fails to read
    pub broken: Option<FormatId>,
}

impl Snapshot {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn files(paths: &[&str]) -> Self {
        Self {
            files: Some(paths.iter().map(|p| p.to_string()).collect()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum Step {
    Busy,
    Present(Snapshot),
}

/// Clipboard that replays a script; the last step repeats forever
pub struct ScriptedClipboard {
    steps: VecDeque<Step>,
}

impl ScriptedClipboard {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Step::Present(Snapshot::text(t))))
    }
}

impl ClipboardAccess for ScriptedClipboard {
    type Handle<'a> = ScriptedHandle;

    fn acquire(&mut self) -> Result<Self::Handle<'_>, ClipboardError> {
        let step = if self.steps.len() > 1 {
            self.steps.pop_front()
        } else {
            self.steps.front().cloned()
        };
        match step {
            Some(Step::Present(snapshot)) => Ok(ScriptedHandle { snapshot }),
            Some(Step::Busy) => Err(ClipboardError::Busy("scripted".to_string())),
            None => Ok(ScriptedHandle {
                snapshot: Snapshot::default(),
            }),
        }
    }
}

pub struct ScriptedHandle {
    snapshot: Snapshot,
}

impl ScriptedHandle {
    fn check(&self, format: FormatId) -> Result<(), ClipboardError> {
        if self.snapshot.broken == Some(format) {
            return Err(ClipboardError::Read {
                format: format.name(),
                message: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

impl ClipboardHandle for ScriptedHandle {
    fn has_format(&self, format: FormatId) -> bool {
        self.snapshot.broken == Some(format)
            || match format {
                FormatId::FileList => self.snapshot.files.is_some(),
                FormatId::UnicodeText => self.snapshot.text.is_some(),
                FormatId::LegacyText => self.snapshot.legacy.is_some(),
            }
    }

    fn read_file_list(&mut self) -> Result<Vec<String>, ClipboardError> {
        self.check(FormatId::FileList)?;
        Ok(self.snapshot.files.clone().unwrap_or_default())
    }

    fn read_unicode_text(&mut self) -> Result<String, ClipboardError> {
        self.check(FormatId::UnicodeText)?;
        Ok(self.snapshot.text.clone().unwrap_or_default())
    }

    fn read_legacy_text(&mut self) -> Result<Vec<u8>, ClipboardError> {
        self.check(FormatId::LegacyText)?;
        Ok(self.snapshot.legacy.clone().unwrap_or_default())
    }
}
