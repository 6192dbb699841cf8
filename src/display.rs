//! 主显示器尺寸查询
//!
//! 只关心主显示器，不做多屏处理。坐标统一为左上角原点；
//! 查询失败时回退到 1920×1080，浮窗仍能以合理位置显示。

use crate::toast::geometry::Size;

/// 查询失败时使用的显示器尺寸
pub const FALLBACK_BOUNDS: Size = Size::new(1920, 1080);

#[cfg_attr(not(any(target_os = "windows", target_os = "macos")), allow(dead_code))]
fn or_fallback(width: i64, height: i64) -> Size {
    if width <= 0 || height <= 0 {
        log::warn!("无法获取主显示器尺寸，使用默认值 {}x{}", FALLBACK_BOUNDS.width, FALLBACK_BOUNDS.height);
        return FALLBACK_BOUNDS;
    }
    Size::new(width as u32, height as u32)
}

/// 在 Windows 上获取主显示器尺寸
#[cfg(target_os = "windows")]
pub fn primary_display_bounds() -> Size {
    use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    or_fallback(width as i64, height as i64)
}

/// 在 macOS 上获取主显示器尺寸
#[cfg(target_os = "macos")]
pub fn primary_display_bounds() -> Size {
    use cocoa::appkit::NSScreen;
    use cocoa::base::nil;

    unsafe {
        let main_screen = NSScreen::mainScreen(nil);
        if main_screen.is_null() {
            return or_fallback(0, 0);
        }
        let frame = NSScreen::frame(main_screen);
        or_fallback(frame.size.width as i64, frame.size.height as i64)
    }
}

/// 其他平台没有可靠的无依赖查询方式，直接使用默认尺寸
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn primary_display_bounds() -> Size {
    log::trace!("当前平台不查询显示器，使用默认尺寸");
    FALLBACK_BOUNDS
}
