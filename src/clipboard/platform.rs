//! 系统剪贴板适配层
//!
//! # 设计思路
//!
//! - **Windows**：直接使用 Win32 API。`OpenClipboard` 提供真正的独占访问，
//!   `ClipboardGuard` 在 `Drop` 中调用 `CloseClipboard`，读取中途出错也能释放；
//!   同时支持 CF_HDROP / CF_UNICODETEXT / CF_TEXT 三种格式。
//! - **其他平台**：使用 `arboard`。它没有"格式查询"接口，因此 `acquire()`
//!   时一次性读取文件列表与文本，句柄只回放快照。旧式文本格式不存在。
//!
//! 上层只依赖 `ClipboardAccess` / `ClipboardHandle`，不感知平台差异。

#[cfg(target_os = "windows")]
pub use win32::{ClipboardGuard, Win32Clipboard as SystemClipboard};

#[cfg(not(target_os = "windows"))]
pub use portable::{ArboardClipboard as SystemClipboard, ClipboardSnapshot};

/// 创建当前平台的剪贴板资源（不会立即打开剪贴板）
pub fn system_clipboard() -> SystemClipboard {
    SystemClipboard::default()
}

#[cfg(target_os = "windows")]
mod win32 {
    use windows::Win32::Foundation::{HANDLE, HGLOBAL};
    use windows::Win32::System::DataExchange::{
        CloseClipboard, GetClipboardData, IsClipboardFormatAvailable, OpenClipboard,
    };
    use windows::Win32::System::Memory::{GlobalLock, GlobalSize, GlobalUnlock};
    use windows::Win32::System::Ole::{CF_HDROP, CF_TEXT, CF_UNICODETEXT};
    use windows::Win32::UI::Shell::{DragQueryFileW, HDROP};

    use crate::clipboard::{ClipboardAccess, ClipboardHandle, FormatId};
    use crate::error::ClipboardError;

    fn format_code(format: FormatId) -> u32 {
        match format {
            FormatId::FileList => CF_HDROP.0 as u32,
            FormatId::UnicodeText => CF_UNICODETEXT.0 as u32,
            FormatId::LegacyText => CF_TEXT.0 as u32,
        }
    }

    /// Win32 系统剪贴板
    #[derive(Debug, Default)]
    pub struct Win32Clipboard;

    impl ClipboardAccess for Win32Clipboard {
        type Handle<'a> = ClipboardGuard;

        fn acquire(&mut self) -> Result<Self::Handle<'_>, ClipboardError> {
            unsafe {
                OpenClipboard(None).map_err(|e| ClipboardError::Busy(e.to_string()))?;
            }
            Ok(ClipboardGuard { _private: () })
        }
    }

    /// 打开期间独占剪贴板，`Drop` 时关闭
    pub struct ClipboardGuard {
        _private: (),
    }

    impl ClipboardGuard {
        /// 锁定某格式的全局内存，把内容交给 `read` 后解锁
        fn with_locked<T>(
            &self,
            format: FormatId,
            read: impl FnOnce(*const u8, usize) -> T,
        ) -> Result<T, ClipboardError> {
            let name = format.name();
            unsafe {
                let handle: HANDLE = GetClipboardData(format_code(format)).map_err(|e| {
                    ClipboardError::Read {
                        format: name,
                        message: e.to_string(),
                    }
                })?;

                let hglobal = HGLOBAL(handle.0);
                let ptr = GlobalLock(hglobal) as *const u8;
                if ptr.is_null() {
                    return Err(ClipboardError::Read {
                        format: name,
                        message: "GlobalLock 返回空指针".to_string(),
                    });
                }

                let size = GlobalSize(hglobal);
                let value = read(ptr, size);
                let _ = GlobalUnlock(hglobal);
                Ok(value)
            }
        }
    }

    impl ClipboardHandle for ClipboardGuard {
        fn has_format(&self, format: FormatId) -> bool {
            unsafe { IsClipboardFormatAvailable(format_code(format)).is_ok() }
        }

        fn read_file_list(&mut self) -> Result<Vec<String>, ClipboardError> {
            unsafe {
                let handle: HANDLE = GetClipboardData(format_code(FormatId::FileList)).map_err(
                    |e| ClipboardError::Read {
                        format: FormatId::FileList.name(),
                        message: e.to_string(),
                    },
                )?;

                let hdrop = HDROP(handle.0);
                let count = DragQueryFileW(hdrop, u32::MAX, None);

                let mut paths = Vec::with_capacity(count as usize);
                for i in 0..count {
                    let len = DragQueryFileW(hdrop, i, None);
                    if len == 0 {
                        continue;
                    }
                    let mut buf = vec![0u16; (len + 1) as usize];
                    DragQueryFileW(hdrop, i, Some(&mut buf));
                    paths.push(String::from_utf16_lossy(&buf[..len as usize]));
                }
                Ok(paths)
            }
        }

        fn read_unicode_text(&mut self) -> Result<String, ClipboardError> {
            self.with_locked(FormatId::UnicodeText, |ptr, size| {
                let units = unsafe { std::slice::from_raw_parts(ptr as *const u16, size / 2) };
                let len = units.iter().position(|&c| c == 0).unwrap_or(units.len());
                String::from_utf16_lossy(&units[..len])
            })
        }

        fn read_legacy_text(&mut self) -> Result<Vec<u8>, ClipboardError> {
            self.with_locked(FormatId::LegacyText, |ptr, size| {
                unsafe { std::slice::from_raw_parts(ptr, size) }.to_vec()
            })
        }
    }

    impl Drop for ClipboardGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseClipboard();
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
mod portable {
    use arboard::{Clipboard, Error};

    use crate::clipboard::{ClipboardAccess, ClipboardHandle, FormatId};
    use crate::error::ClipboardError;

    /// 基于 `arboard` 的剪贴板，连接在第一次 `acquire()` 时惰性建立
    #[derive(Default)]
    pub struct ArboardClipboard {
        inner: Option<Clipboard>,
    }

    impl ClipboardAccess for ArboardClipboard {
        type Handle<'a> = ClipboardSnapshot;

        fn acquire(&mut self) -> Result<Self::Handle<'_>, ClipboardError> {
            if self.inner.is_none() {
                let clipboard = Clipboard::new().map_err(|e| ClipboardError::Busy(e.to_string()))?;
                self.inner = Some(clipboard);
            }
            let clipboard = self
                .inner
                .as_mut()
                .ok_or_else(|| ClipboardError::Busy("剪贴板连接不可用".to_string()))?;

            let files = match clipboard.get().file_list() {
                Ok(paths) if !paths.is_empty() => Some(
                    paths
                        .iter()
                        .map(|p| p.to_string_lossy().into_owned())
                        .collect(),
                ),
                Ok(_) | Err(Error::ContentNotAvailable) => None,
                Err(e) => return Err(read_error(FormatId::FileList, e)),
            };

            let text = match clipboard.get_text() {
                Ok(text) => Some(text),
                Err(Error::ContentNotAvailable) => None,
                Err(e) => return Err(read_error(FormatId::UnicodeText, e)),
            };

            Ok(ClipboardSnapshot { files, text })
        }
    }

    fn read_error(format: FormatId, err: Error) -> ClipboardError {
        ClipboardError::Read {
            format: format.name(),
            message: err.to_string(),
        }
    }

    /// 一次 `acquire()` 读到的内容
    pub struct ClipboardSnapshot {
        files: Option<Vec<String>>,
        text: Option<String>,
    }

    impl ClipboardHandle for ClipboardSnapshot {
        fn has_format(&self, format: FormatId) -> bool {
            match format {
                FormatId::FileList => self.files.is_some(),
                FormatId::UnicodeText => self.text.is_some(),
                FormatId::LegacyText => false,
            }
        }

        fn read_file_list(&mut self) -> Result<Vec<String>, ClipboardError> {
            self.files
                .take()
                .ok_or(ClipboardError::Unsupported(FormatId::FileList.name()))
        }

        fn read_unicode_text(&mut self) -> Result<String, ClipboardError> {
            self.text
                .take()
                .ok_or(ClipboardError::Unsupported(FormatId::UnicodeText.name()))
        }

        fn read_legacy_text(&mut self) -> Result<Vec<u8>, ClipboardError> {
            Err(ClipboardError::Unsupported(FormatId::LegacyText.name()))
        }
    }
}
