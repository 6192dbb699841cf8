//! Windows 浮窗绘制层
//!
//! # 实现思路
//!
//! - 窗口：`WS_POPUP` + `WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TOPMOST | WS_EX_NOACTIVATE`，
//!   无边框、不进任务栏、不抢焦点；整窗透明度由 `SetLayeredWindowAttributes` 控制。
//! - 圆角：`SetWindowRgn` 把窗口裁成圆角矩形，区域外完全透明。
//! - 绘制：每帧通过 `GetDC` 直接用 GDI 画背景、文字、加载点与对勾。
//!   GDI 不支持逐图元透明度，加载点与对勾的透明度通过与背景色混合来近似；
//!   背景的 230/255 透明度并入整窗透明度。
//! - 消息：运行循环每帧调用 `pump()`，用 `PeekMessageW` 非阻塞地处理窗口消息。

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;

use once_cell::sync::OnceCell;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, SIZE, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateFontW, CreatePen, CreateRoundRectRgn, CreateSolidBrush, DeleteObject, DrawTextW,
    Ellipse, FillRect, GetDC, GetTextExtentPoint32W, HDC, HFONT, LineTo, MoveToEx, PS_SOLID,
    ReleaseDC, SelectObject, SetBkMode, SetTextColor, SetWindowRgn, TRANSPARENT, CLIP_DEFAULT_PRECIS, DEFAULT_CHARSET,
    DT_CENTER, DT_SINGLELINE, DT_VCENTER, FW_BOLD, OUT_DEFAULT_PRECIS, CLEARTYPE_QUALITY,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, PeekMessageW,
    RegisterClassExW, SetLayeredWindowAttributes, SetWindowPos, ShowWindow, TranslateMessage,
    HWND_TOPMOST, LWA_ALPHA, MSG, PM_REMOVE, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SW_HIDE,
    SW_SHOWNOACTIVATE, WNDCLASSEXW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
    WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::PCWSTR;

use super::geometry::{Point, Size};
use super::surface::Surface;
use super::view::{IndicatorView, ToastView, checkmark_stroke};
use crate::display;
use crate::error::AppError;

const CLASS_NAME: &str = "CopyToastWindow";

/// 黑色背景（COLORREF 为 0x00BBGGRR）
const BACKGROUND: (u8, u8, u8) = (0, 0, 0);
/// 背景透明度
const BACKGROUND_ALPHA: f64 = 230.0;
const FOREGROUND: (u8, u8, u8) = (0xFF, 0xFF, 0xFF);
const CHECKMARK: (u8, u8, u8) = (0, 0xFF, 0);

const CORNER_RADIUS: i32 = 10;
/// 14pt 在 96 DPI 下的字符高度（负值表示按字符高度匹配）
const FONT_HEIGHT: i32 = -19;
const DOT_RADIUS: i32 = 4;
const DOT_SPACING: i32 = 12;
const CHECKMARK_WIDTH: i32 = 5;

static WINDOW_CLASS: OnceCell<u16> = OnceCell::new();

fn wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}

fn rgb((r, g, b): (u8, u8, u8)) -> COLORREF {
    COLORREF(r as u32 | (g as u32) << 8 | (b as u32) << 16)
}

/// 按透明度把前景色混入背景色
fn blend(fg: (u8, u8, u8), opacity: f64) -> COLORREF {
    let a = opacity.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * a).round() as u8;
    rgb((
        mix(fg.0, BACKGROUND.0),
        mix(fg.1, BACKGROUND.1),
        mix(fg.2, BACKGROUND.2),
    ))
}

/// 整窗透明度：动画透明度乘以背景透明度
fn window_alpha(opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * BACKGROUND_ALPHA).round() as u8
}

unsafe extern "system" fn window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

fn register_class() -> Result<u16, AppError> {
    WINDOW_CLASS
        .get_or_try_init(|| unsafe {
            let instance = GetModuleHandleW(None).map_err(|e| AppError::Window(e.to_string()))?;
            let class_name = wide(CLASS_NAME);
            let class = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                lpfnWndProc: Some(window_proc),
                hInstance: instance.into(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                ..Default::default()
            };
            match RegisterClassExW(&class) {
                0 => Err(AppError::Window("RegisterClassExW 失败".to_string())),
                atom => Ok(atom),
            }
        })
        .copied()
}

/// 分层置顶的 Win32 浮窗
pub struct Win32Surface {
    hwnd: HWND,
    font: HFONT,
    size: Size,
    visible: bool,
}

impl Win32Surface {
    pub fn new() -> Result<Self, AppError> {
        register_class()?;

        let class_name = wide(CLASS_NAME);
        let title = wide("Copied");
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TOPMOST | WS_EX_NOACTIVATE,
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_POPUP,
                0,
                0,
                1,
                1,
                None,
                None,
                None,
                None,
            )
        }
        .map_err(|e| AppError::Window(format!("创建浮窗失败: {}", e)))?;

        let face = wide("Segoe UI");
        let font = unsafe {
            CreateFontW(
                FONT_HEIGHT,
                0,
                0,
                0,
                FW_BOLD.0 as i32,
                0,
                0,
                0,
                DEFAULT_CHARSET,
                OUT_DEFAULT_PRECIS,
                CLIP_DEFAULT_PRECIS,
                CLEARTYPE_QUALITY,
                0,
                PCWSTR(face.as_ptr()),
            )
        };

        log::info!("✅ Win32 浮窗已创建");
        Ok(Self {
            hwnd,
            font,
            size: Size::default(),
            visible: false,
        })
    }

    fn paint(&self, hdc: HDC, view: &ToastView<'_>) {
        let w = self.size.width as i32;
        let h = self.size.height as i32;
        let rect = RECT {
            left: 0,
            top: 0,
            right: w,
            bottom: h,
        };

        unsafe {
            // 窗口区域已裁成圆角，整块填充即可
            let clear = CreateSolidBrush(rgb(BACKGROUND));
            FillRect(hdc, &rect, clear);
            let _ = DeleteObject(clear.into());

            match view {
                ToastView::Hidden => {}
                ToastView::Text(text) => self.paint_text(hdc, rect, text),
                ToastView::Indicator(indicator) => self.paint_indicator(hdc, indicator),
            }
        }
    }

    unsafe fn paint_text(&self, hdc: HDC, mut rect: RECT, text: &str) {
        let mut buf: Vec<u16> = OsStr::new(text).encode_wide().collect();
        unsafe {
            let old_font = SelectObject(hdc, self.font.into());
            SetBkMode(hdc, TRANSPARENT);
            SetTextColor(hdc, rgb(FOREGROUND));
            DrawTextW(hdc, &mut buf, &mut rect, DT_CENTER | DT_VCENTER | DT_SINGLELINE);
            SelectObject(hdc, old_font);
        }
    }

    unsafe fn paint_indicator(&self, hdc: HDC, view: &IndicatorView) {
        let cx = self.size.width as i32 / 2;
        let cy = self.size.height as i32 / 2;

        unsafe {
            if let Some(offsets) = view.dot_offsets {
                let brush = CreateSolidBrush(blend(FOREGROUND, view.dots_opacity));
                let pen = CreatePen(PS_SOLID, 0, blend(FOREGROUND, view.dots_opacity));
                let old_brush = SelectObject(hdc, brush.into());
                let old_pen = SelectObject(hdc, pen.into());
                for (i, offset) in offsets.iter().enumerate() {
                    let x = cx + (i as i32 - 1) * DOT_SPACING;
                    let y = cy - offset.round() as i32;
                    let _ = Ellipse(hdc, x - DOT_RADIUS, y - DOT_RADIUS, x + DOT_RADIUS, y + DOT_RADIUS);
                }
                SelectObject(hdc, old_pen);
                SelectObject(hdc, old_brush);
                let _ = DeleteObject(pen.into());
                let _ = DeleteObject(brush.into());
            }

            if view.show_checkmark {
                let stroke = checkmark_stroke((cx as f64, cy as f64), view.checkmark_progress);
                let pen = CreatePen(PS_SOLID, CHECKMARK_WIDTH, blend(CHECKMARK, view.checkmark_opacity));
                let old_pen = SelectObject(hdc, pen.into());
                if let Some((&(x0, y0), rest)) = stroke.split_first() {
                    let _ = MoveToEx(hdc, x0.round() as i32, y0.round() as i32, None);
                    for &(x, y) in rest {
                        let _ = LineTo(hdc, x.round() as i32, y.round() as i32);
                    }
                }
                SelectObject(hdc, old_pen);
                let _ = DeleteObject(pen.into());
            }
        }
    }
}

impl Surface for Win32Surface {
    fn primary_display_bounds(&self) -> Size {
        display::primary_display_bounds()
    }

    fn text_extent(&self, text: &str) -> Size {
        let buf: Vec<u16> = OsStr::new(text).encode_wide().collect();
        let mut extent = SIZE::default();
        unsafe {
            let hdc = GetDC(Some(self.hwnd));
            let old_font = SelectObject(hdc, self.font.into());
            let ok = GetTextExtentPoint32W(hdc, &buf, &mut extent).as_bool();
            SelectObject(hdc, old_font);
            ReleaseDC(Some(self.hwnd), hdc);
            if !ok {
                log::warn!("⚠️ 文本测量失败，使用估算尺寸");
                return Size::new(text.chars().count() as u32 * 11, 25);
            }
        }
        Size::new(extent.cx.max(0) as u32, extent.cy.max(0) as u32)
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        unsafe {
            if let Err(e) = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                0,
                0,
                size.width as i32,
                size.height as i32,
                SWP_NOMOVE | SWP_NOACTIVATE,
            ) {
                log::warn!("⚠️ 调整浮窗尺寸失败: {}", e);
            }

            // 区域坐标为右下角开区间，宽高各加 1
            let region = CreateRoundRectRgn(
                0,
                0,
                size.width as i32 + 1,
                size.height as i32 + 1,
                CORNER_RADIUS * 2,
                CORNER_RADIUS * 2,
            );
            // 成功后区域归系统所有，不能再删除
            if SetWindowRgn(self.hwnd, Some(region), true) == 0 {
                log::warn!("⚠️ 设置浮窗圆角区域失败");
                let _ = DeleteObject(region.into());
            }
        }
    }

    fn set_position(&mut self, position: Point) {
        unsafe {
            if let Err(e) = SetWindowPos(
                self.hwnd,
                Some(HWND_TOPMOST),
                position.x,
                position.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOACTIVATE,
            ) {
                log::warn!("⚠️ 移动浮窗失败: {}", e);
            }
        }
    }

    fn set_opacity(&mut self, opacity: f64) {
        let alpha = window_alpha(opacity);
        unsafe {
            if let Err(e) = SetLayeredWindowAttributes(self.hwnd, COLORREF(0), alpha, LWA_ALPHA) {
                log::warn!("⚠️ 设置浮窗透明度失败: {}", e);
            }
        }
    }

    fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            unsafe {
                let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
            }
        }
    }

    fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            unsafe {
                let _ = ShowWindow(self.hwnd, SW_HIDE);
            }
        }
    }

    fn render(&mut self, view: &ToastView<'_>) {
        if !self.visible || self.size.width == 0 || self.size.height == 0 {
            return;
        }
        unsafe {
            let hdc = GetDC(Some(self.hwnd));
            if hdc.is_invalid() {
                log::debug!("GetDC 失败，跳过本帧");
                return;
            }
            self.paint(hdc, view);
            ReleaseDC(Some(self.hwnd), hdc);
        }
    }

    fn pump(&mut self) {
        let mut msg = MSG::default();
        unsafe {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}

impl Drop for Win32Surface {
    fn drop(&mut self) {
        unsafe {
            let _ = DeleteObject(self.font.into());
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
