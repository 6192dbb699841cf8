use std::time::Duration;

use super::animation::{Easing, Tween};
use super::geometry::{Placement, Point, Size};
use super::progress::AnimationProgress;
use super::state::NotificationState;
use super::surface::Surface;
use super::timer::{FrameDriver, Timer, TimerKind, TimerQueue};
use super::view::ToastView;
use crate::config::ToastConfig;

/// 推进时钟时需要处理的离散事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    PositionDone,
    OpacityDone,
    SizeDone,
    Timer,
    Frame,
}

/// 浮窗生命周期控制器
///
/// 独占浮窗状态、子动画进度、属性动画与定时器，只在运行循环线程上被调用。
/// 时间由调用方通过 `advance_to()` 以单调时间戳推进，控制器自身从不阻塞。
///
/// 每个定时器都记录排期时的序列号 `epoch`；触发时状态或序列号不匹配即视为过期，
/// 直接丢弃，过期回调永远不会强行驱动状态机。
pub struct NotificationController<S: Surface> {
    surface: S,
    config: ToastConfig,
    state: NotificationState,
    progress: AnimationProgress,
    epoch: u64,
    now: Duration,
    size: Size,
    placement: Placement,
    position: Point,
    opacity: f64,
    position_anim: Option<Tween<Point>>,
    opacity_anim: Option<Tween<f64>>,
    size_anim: Option<Tween<Size>>,
    timers: TimerQueue,
    frames: Option<FrameDriver>,
}

impl<S: Surface> NotificationController<S> {
    /// 创建控制器，浮窗初始隐藏在屏幕底边以下
    pub fn new(mut surface: S, config: ToastConfig) -> Self {
        let size = config.dots_box;
        let placement = Placement::compute(
            surface.primary_display_bounds(),
            size,
            config.offscreen_margin,
            config.bottom_margin,
        );
        let position = placement.offscreen();

        surface.set_size(size);
        surface.set_position(position);
        surface.set_opacity(0.0);

        Self {
            surface,
            config,
            state: NotificationState::Hidden,
            progress: AnimationProgress::default(),
            epoch: 0,
            now: Duration::ZERO,
            size,
            placement,
            position,
            opacity: 0.0,
            position_anim: None,
            opacity_anim: None,
            size_anim: None,
            timers: TimerQueue::default(),
            frames: None,
        }
    }

    pub fn state(&self) -> NotificationState {
        self.state
    }

    pub fn progress(&self) -> &AnimationProgress {
        &self.progress
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_frame_driver_running(&self) -> bool {
        self.frames.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.position_anim.is_some() || self.opacity_anim.is_some() || self.size_anim.is_some()
    }

    /// 隐藏且没有任何待处理的动画、定时器或逐帧驱动
    pub fn is_idle(&self) -> bool {
        self.state == NotificationState::Hidden
            && self.timers.is_empty()
            && self.frames.is_none()
            && !self.is_animating()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// 当前帧的绘制内容
    pub fn view(&self) -> ToastView<'_> {
        ToastView::from_parts(self.state, &self.progress, &self.config.text)
    }

    // ========================================================================
    // 外部触发
    // ========================================================================

    /// 处理"新复制"事件
    ///
    /// 仅在 `Hidden` 时接受，其余状态直接丢弃：不排队、不叠加。
    /// 返回是否启动了新的浮窗。
    pub fn on_new_copy(&mut self) -> bool {
        if self.state != NotificationState::Hidden {
            log::debug!("⏭️ 浮窗正在显示（{:?}），忽略本次复制", self.state);
            return false;
        }

        self.begin_sequence(NotificationState::Showing);
        let text = self.surface.text_extent(&self.config.text);
        self.layout(text.padded(self.config.text_padding));
        self.slide_in();
        self.surface.show();
        self.render();
        true
    }

    /// 启动序列：加载点 → 对勾 → 收起
    ///
    /// 同样只在 `Hidden` 时生效，返回是否启动。
    pub fn start_loading(&mut self) -> bool {
        if self.state != NotificationState::Hidden {
            log::debug!("⏭️ 浮窗正在显示（{:?}），不启动加载动画", self.state);
            return false;
        }

        self.begin_sequence(NotificationState::Loading);
        self.progress.reset();
        self.layout(self.config.dots_box);
        self.slide_in();
        self.frames = Some(FrameDriver::start(self.now, self.config.frame_interval));
        self.timers.schedule(
            TimerKind::LoadingDelay,
            self.now + self.config.loading_delay,
            self.epoch,
        );
        self.surface.show();
        self.render();
        true
    }

    /// 强制提前结束当前序列并隐藏
    ///
    /// 已排期的定时器保留在队列中，触发时由守卫丢弃。
    pub fn dismiss(&mut self) {
        if self.state == NotificationState::Hidden {
            return;
        }
        log::debug!("🛑 强制关闭浮窗（{:?}）", self.state);
        self.epoch += 1;
        self.cancel_animations();
        self.finish_hidden();
    }

    /// 拆除全部定时器与动画，不执行它们的完成逻辑
    pub fn shutdown(&mut self) {
        let cancelled = self.timers.cancel_all();
        self.epoch += 1;
        self.cancel_animations();
        if self.state != NotificationState::Hidden {
            self.finish_hidden();
        }
        log::info!("🧹 通知控制器已停止，取消 {} 个定时器", cancelled);
    }

    // ========================================================================
    // 时钟推进
    // ========================================================================

    /// 把内部时钟推进到 `target`
    ///
    /// 期间到期的动画完成、定时器与逐帧驱动严格按时间先后处理；
    /// 同一时刻内依次为：位置动画、透明度动画、尺寸动画、定时器、逐帧驱动。
    /// 早于当前时钟的 `target` 被忽略。
    pub fn advance_to(&mut self, target: Duration) {
        if target < self.now {
            return;
        }

        while let Some((at, due)) = self.next_due(target) {
            self.now = at;
            self.apply_animations();
            self.dispatch(due);
        }

        self.now = target;
        self.apply_animations();
        self.render();
    }

    fn next_due(&self, limit: Duration) -> Option<(Duration, Due)> {
        [
            self.position_anim.map(|a| (a.ends_at(), Due::PositionDone)),
            self.opacity_anim.map(|a| (a.ends_at(), Due::OpacityDone)),
            self.size_anim.map(|a| (a.ends_at(), Due::SizeDone)),
            self.timers.next_due().map(|at| (at, Due::Timer)),
            self.frames.map(|f| (f.next_tick(), Due::Frame)),
        ]
        .into_iter()
        .flatten()
        .filter(|(at, _)| *at <= limit)
        .min_by_key(|(at, _)| *at)
    }

    fn dispatch(&mut self, due: Due) {
        match due {
            Due::PositionDone => {
                self.position_anim = None;
                self.on_position_finished();
            }
            Due::OpacityDone => self.opacity_anim = None,
            Due::SizeDone => self.size_anim = None,
            Due::Timer => {
                if let Some(timer) = self.timers.pop_due(self.now) {
                    self.on_timer(timer);
                }
            }
            Due::Frame => {
                if let Some(frames) = self.frames.as_mut() {
                    frames.advance();
                }
                self.on_frame();
            }
        }
    }

    /// 把所有进行中的属性动画应用到当前时刻
    fn apply_animations(&mut self) {
        if let Some(anim) = self.size_anim {
            self.resize(anim.value_at(self.now));
        }
        if let Some(anim) = self.position_anim {
            self.move_to(anim.value_at(self.now));
        }
        if let Some(anim) = self.opacity_anim {
            self.fade_to(anim.value_at(self.now));
        }
    }

    // ========================================================================
    // 状态转移
    // ========================================================================

    fn on_position_finished(&mut self) {
        match self.state {
            NotificationState::Showing => {
                self.set_state(NotificationState::Visible);
                self.timers
                    .schedule(TimerKind::Dwell, self.now + self.config.dwell, self.epoch);
            }
            NotificationState::Hiding | NotificationState::Closing => self.finish_hidden(),
            state => log::trace!("位置动画完成，状态 {:?} 无需处理", state),
        }
    }

    fn on_timer(&mut self, timer: Timer) {
        if timer.epoch != self.epoch {
            log::trace!("⏭️ 丢弃过期定时器 {:?}（序列 {} ≠ {}）", timer.kind, timer.epoch, self.epoch);
            return;
        }

        match (timer.kind, self.state) {
            (TimerKind::Dwell, NotificationState::Visible) => {
                self.set_state(NotificationState::Hiding);
                self.slide_out();
            }
            (TimerKind::LoadingDelay, NotificationState::Loading) => {
                self.set_state(NotificationState::Transitioning);
                self.size_anim = Some(Tween::new(
                    self.size,
                    self.config.checkmark_box,
                    self.now,
                    self.config.morph_duration,
                    Easing::InOutQuad,
                ));
            }
            (TimerKind::CheckmarkHold, NotificationState::CheckmarkShown) => {
                self.set_state(NotificationState::Closing);
                self.slide_out();
            }
            (kind, state) => {
                log::trace!("⏭️ 丢弃过期定时器 {:?}（当前状态 {:?}）", kind, state);
            }
        }
    }

    fn on_frame(&mut self) {
        if !self.state.drives_frames() {
            self.frames = None;
            return;
        }

        self.progress.advance_dots(self.config.dot_phase_step);
        if self.state != NotificationState::Transitioning {
            return;
        }

        self.progress
            .advance_transition(self.config.fade_step, self.config.stroke_step);
        if self.progress.transition_complete() {
            self.frames = None;
            self.set_state(NotificationState::CheckmarkShown);
            self.timers.schedule(
                TimerKind::CheckmarkHold,
                self.now + self.config.checkmark_hold,
                self.epoch,
            );
        }
    }

    fn begin_sequence(&mut self, state: NotificationState) {
        self.epoch += 1;
        self.set_state(state);
    }

    fn set_state(&mut self, next: NotificationState) {
        log::debug!("🔁 浮窗状态 {:?} → {:?}", self.state, next);
        self.state = next;
    }

    fn finish_hidden(&mut self) {
        self.frames = None;
        self.set_state(NotificationState::Hidden);
        self.fade_to(0.0);
        self.surface.hide();
    }

    // ========================================================================
    // 属性动画
    // ========================================================================

    fn slide_in(&mut self) {
        let from = self.placement.offscreen();
        let to = self.placement.onscreen();
        self.move_to(from);
        self.fade_to(0.0);
        self.start_slide(from, to, 0.0, 1.0);
    }

    fn slide_out(&mut self) {
        let from = self.placement.onscreen();
        let to = self.placement.offscreen();
        self.start_slide(from, to, 1.0, 0.0);
    }

    fn start_slide(&mut self, from: Point, to: Point, opacity_from: f64, opacity_to: f64) {
        let duration = self.config.slide_duration;
        self.position_anim = Some(Tween::new(from, to, self.now, duration, Easing::InOutQuad));
        self.opacity_anim = Some(Tween::new(
            opacity_from,
            opacity_to,
            self.now,
            duration,
            Easing::InOutQuad,
        ));
    }

    fn cancel_animations(&mut self) {
        self.position_anim = None;
        self.opacity_anim = None;
        self.size_anim = None;
        self.frames = None;
    }

    /// 修改尺寸并重新计算摆放参数
    ///
    /// 没有位置动画时水平重新居中，保证同一时刻只有一个动画作用于 X 轴。
    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.placement = self.compute_placement(size);
        self.surface.set_size(size);
        if self.position_anim.is_none() {
            self.move_to(Point::new(self.placement.center_x, self.position.y));
        }
    }

    /// 新序列开始时设置尺寸，并按当前主显示器重新计算摆放参数
    ///
    /// 尺寸不变时同样重新计算：两次显示之间分辨率或主显示器可能已经变化。
    fn layout(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.surface.set_size(size);
        }
        self.placement = self.compute_placement(size);
    }

    fn compute_placement(&self, size: Size) -> Placement {
        Placement::compute(
            self.surface.primary_display_bounds(),
            size,
            self.config.offscreen_margin,
            self.config.bottom_margin,
        )
    }

    fn move_to(&mut self, position: Point) {
        if position != self.position {
            self.position = position;
            self.surface.set_position(position);
        }
    }

    fn fade_to(&mut self, opacity: f64) {
        if opacity != self.opacity {
            self.opacity = opacity;
            self.surface.set_opacity(opacity);
        }
    }

    fn render(&mut self) {
        if self.state == NotificationState::Hidden {
            return;
        }
        let view = ToastView::from_parts(self.state, &self.progress, &self.config.text);
        self.surface.render(&view);
    }
}
