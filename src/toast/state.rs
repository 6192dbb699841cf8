/// 浮窗生命周期状态
///
/// 两条路径都从 `Hidden` 出发并回到 `Hidden`：
/// - 复制提示：`Showing → Visible → Hiding`
/// - 启动序列：`Loading → Transitioning → CheckmarkShown → Closing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationState {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding,
    Loading,
    Transitioning,
    CheckmarkShown,
    Closing,
}

impl NotificationState {
    /// 是否处于启动序列（加载点 / 对勾）
    pub fn is_indicator(self) -> bool {
        matches!(
            self,
            Self::Loading | Self::Transitioning | Self::CheckmarkShown | Self::Closing
        )
    }

    /// 逐帧驱动是否需要运行
    pub fn drives_frames(self) -> bool {
        matches!(self, Self::Loading | Self::Transitioning)
    }

    /// 是否绘制加载点
    pub fn shows_dots(self) -> bool {
        matches!(self, Self::Loading | Self::Transitioning)
    }

    /// 是否绘制对勾
    pub fn shows_checkmark(self) -> bool {
        matches!(self, Self::Transitioning | Self::CheckmarkShown | Self::Closing)
    }
}
