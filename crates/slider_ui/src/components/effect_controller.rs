//! Slide effect controller: mode switching, navigation and auto-advance

use crate::renderer::{RenderOp, Renderer, Surface};
use slider_core::{
    coverflow_tags, CardStack, Command, CommandId, CurrentSlide, EffectMode, FiredTimer,
    MediaStatus, Scheduler, SlideItem, SliderConfig, SliderError, SliderSettings, SliderState,
    TimerHandle, TimerQueue, TimerTask,
};
use std::time::Duration;

/// Fullscreen overlay lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Overlay {
    Absent,
    Shown,
    /// Fading out; removed when the timer fires
    Fading(TimerHandle),
}

/// How a shown overlay is disposed of during teardown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OverlayExit {
    Immediate,
    Fade,
}

/// Owns the slider state and drives a [`Renderer`] and a [`Scheduler`].
///
/// All timer-driven work arrives through [`advance`](Self::advance); every
/// public operation absorbs its own failures.
pub struct SlideEffectController<R: Renderer, S: Scheduler = TimerQueue> {
    state: SliderState,
    settings: SliderSettings,
    renderer: R,
    scheduler: S,

    /// The single repeating timer (slide advance or card rotation)
    advance_timer: Option<TimerHandle>,
    entry_animation: Option<(TimerHandle, usize)>,
    card_swap: Option<(TimerHandle, usize)>,
    overlay: Overlay,
    fullscreen_surface: bool,
    stack_click_listener: bool,
}

impl<R: Renderer> SlideEffectController<R, TimerQueue> {
    /// Controller on a fresh [`TimerQueue`], seeded from configuration
    pub fn from_config(config: &SliderConfig, renderer: R) -> Self {
        Self::new(config.slides.clone(), config.slider.clone(), renderer, TimerQueue::new())
    }
}

impl<R: Renderer, S: Scheduler> SlideEffectController<R, S> {
    pub fn new(items: Vec<SlideItem>, settings: SliderSettings, renderer: R, scheduler: S) -> Self {
        let state = SliderState::new(items, settings.auto_advance());
        let initial_mode = settings.initial_mode;

        let mut controller = Self {
            state,
            settings,
            renderer,
            scheduler,
            advance_timer: None,
            entry_animation: None,
            card_swap: None,
            overlay: Overlay::Absent,
            fullscreen_surface: false,
            stack_click_listener: false,
        };

        controller.render(RenderOp::BuildSlides(controller.state.items().to_vec()));
        controller.render(RenderOp::SetSpeedLabel {
            interval: controller.state.auto_advance_interval,
        });
        controller.switch_mode(initial_mode, OverlayExit::Immediate);

        tracing::info!(
            slides = controller.state.len(),
            mode = %initial_mode,
            "Slider initialized"
        );
        controller
    }

    // ===== Queries =====

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn mode(&self) -> EffectMode {
        self.state.mode
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_slide(&self) -> Option<CurrentSlide<'_>> {
        self.state.current()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state.is_fullscreen
    }

    pub fn interval(&self) -> Duration {
        self.state.auto_advance_interval
    }

    /// Is the repeating advance timer armed?
    pub fn is_advance_armed(&self) -> bool {
        self.advance_timer.is_some_and(|h| self.scheduler.is_live(h))
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Fraction of the current advance period elapsed (0.0 - 1.0), for a progress bar
    pub fn auto_advance_progress(&self) -> f32 {
        let Some(handle) = self.advance_timer else {
            return 0.0;
        };
        match (self.scheduler.remaining(handle), self.scheduler.period(handle)) {
            (Some(remaining), Some(period)) if !period.is_zero() => {
                (1.0 - remaining.as_secs_f32() / period.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Get status text
    pub fn status_text(&self) -> String {
        let Some(current) = self.state.current() else {
            return format!("{} (no slides)", self.state.mode.status_text());
        };
        let position = format!("{}/{}", current.index + 1, current.total);
        if self.state.is_playing {
            format!(
                "{} {} {:.1}s",
                self.state.mode.status_text(),
                position,
                self.state.auto_advance_interval.as_secs_f32()
            )
        } else {
            format!("{} {} (Paused)", self.state.mode.status_text(), position)
        }
    }

    // ===== Mode switching =====

    /// Switch effect. Any mode may follow any mode; switching to the active
    /// mode is a full reset.
    pub fn set_mode(&mut self, mode: EffectMode) {
        self.switch_mode(mode, OverlayExit::Immediate);
    }

    pub fn enter_fullscreen(&mut self) {
        if self.state.is_fullscreen {
            tracing::debug!("Already in fullscreen");
            return;
        }
        self.set_mode(EffectMode::Fullscreen);
    }

    /// Leave fullscreen and return to the sliding effect. No-op outside fullscreen.
    pub fn exit_fullscreen(&mut self) {
        if !self.state.is_fullscreen && self.overlay != Overlay::Shown {
            tracing::debug!("Not in fullscreen; exit ignored");
            return;
        }
        tracing::info!("Leaving fullscreen");
        self.switch_mode(EffectMode::AutoSlide, OverlayExit::Fade);
    }

    fn switch_mode(&mut self, mode: EffectMode, overlay_exit: OverlayExit) {
        tracing::info!(from = %self.state.mode, to = %mode, "Switching effect");

        self.teardown_effects(overlay_exit);
        self.state.mode = mode;
        self.enter_mode(mode);
        self.render(RenderOp::HighlightEffect(mode));
        self.show(0);
    }

    /// Release every mode-specific resource, whichever mode owns it
    fn teardown_effects(&mut self, overlay_exit: OverlayExit) {
        self.disarm_advance();

        if let Some((handle, slide)) = self.entry_animation.take() {
            self.scheduler.cancel(handle);
            self.render(RenderOp::SetEntryAnimation { slide, active: false });
        }
        if let Some((handle, slide)) = self.card_swap.take() {
            self.scheduler.cancel(handle);
            self.render(RenderOp::SetCardSwapping { slide, swapping: false });
        }
        if self.stack_click_listener {
            self.stack_click_listener = false;
            tracing::debug!("Stacked-card click handler removed");
        }
        self.state.card_stack = CardStack::default();

        match std::mem::replace(&mut self.overlay, Overlay::Absent) {
            Overlay::Shown if overlay_exit == OverlayExit::Fade => {
                self.render(RenderOp::FadeOutOverlay);
                let handle = self
                    .scheduler
                    .schedule(TimerTask::RemoveOverlay, self.settings.overlay_fade());
                self.overlay = Overlay::Fading(handle);
            }
            Overlay::Fading(handle) => {
                self.scheduler.cancel(handle);
                self.render(RenderOp::RemoveOverlay);
            }
            // Untracked or shown: remove whatever may be there
            Overlay::Shown | Overlay::Absent => self.render_cleanup(RenderOp::RemoveOverlay),
        }

        self.render_cleanup(RenderOp::RemoveFullscreenSurface);
        self.fullscreen_surface = false;
        self.render_cleanup(RenderOp::SetOriginalHidden(false));
        self.state.is_fullscreen = false;

        for mode in EffectMode::ALL {
            if let Some(class) = mode.container_class() {
                self.render_cleanup(RenderOp::RemoveContainerClass(class));
            }
        }
        self.render_cleanup(RenderOp::ResetSlideStyles);
    }

    fn enter_mode(&mut self, mode: EffectMode) {
        if let Some(class) = mode.container_class() {
            self.render(RenderOp::AddContainerClass(class));
        }

        match mode {
            EffectMode::AutoSlide | EffectMode::Fade | EffectMode::Coverflow => {}
            EffectMode::StackedCards => {
                self.state.card_stack = CardStack::reversed(self.state.len());
                self.render(RenderOp::SetStackOrder(self.state.card_stack.order().to_vec()));
                self.stack_click_listener = true;
            }
            EffectMode::Fullscreen => {
                self.render(RenderOp::CreateOverlay);
                self.overlay = Overlay::Shown;
                self.render(RenderOp::SetOriginalHidden(true));
                self.render(RenderOp::CreateFullscreenSurface);
                self.fullscreen_surface = true;
                self.state.is_fullscreen = true;
            }
        }

        if mode.advances_on_entry() {
            self.start_auto_advance();
        } else {
            self.stop_auto_advance();
        }
    }

    // ===== Navigation =====

    pub fn next(&mut self) {
        if self.state.is_empty() {
            tracing::debug!("No slides; next ignored");
            return;
        }
        if self.state.mode.rotates_stack() {
            self.rotate_stack(true);
        } else {
            self.show(self.state.current_index as i64 + 1);
        }
    }

    pub fn previous(&mut self) {
        if self.state.is_empty() {
            tracing::debug!("No slides; previous ignored");
            return;
        }
        if self.state.mode.rotates_stack() {
            self.rotate_stack(false);
        } else {
            self.show(self.state.current_index as i64 - 1);
        }
    }

    /// Show slide `index`, wrapped into range
    pub fn go_to(&mut self, index: i64) {
        self.show(index);
    }

    pub fn first(&mut self) {
        self.show(0);
    }

    pub fn last(&mut self) {
        self.show(self.state.len() as i64 - 1);
    }

    fn show(&mut self, index: i64) {
        let Some(index) = self.state.set_index(index) else {
            tracing::debug!("No slides; nothing to show");
            return;
        };
        let total = self.state.len();

        match self.state.mode {
            EffectMode::AutoSlide => {
                self.render(RenderOp::TranslateTo { surface: Surface::Main, index });
            }
            EffectMode::Fade => self.render(RenderOp::FocusSlide { index }),
            EffectMode::Coverflow => self.render(RenderOp::TagSlides(coverflow_tags(index, total))),
            EffectMode::StackedCards => {
                if self.state.card_stack.bring_to_top(index) > 0 {
                    self.render(RenderOp::SetStackOrder(self.state.card_stack.order().to_vec()));
                }
            }
            EffectMode::Fullscreen => {
                let surface = if self.fullscreen_surface {
                    Surface::Fullscreen
                } else {
                    Surface::Main
                };
                self.render(RenderOp::TranslateTo { surface, index });
            }
        }

        self.render(RenderOp::UpdateIndicators { active: index, total });

        if self.state.mode.animates_entry() {
            self.animate_entry(index);
        }
    }

    fn animate_entry(&mut self, slide: usize) {
        if let Some((handle, previous)) = self.entry_animation.take() {
            self.scheduler.cancel(handle);
            self.render(RenderOp::SetEntryAnimation { slide: previous, active: false });
        }
        self.render(RenderOp::SetEntryAnimation { slide, active: true });
        let handle = self
            .scheduler
            .schedule(TimerTask::EndEntryAnimation { slide }, self.settings.entry_animation());
        self.entry_animation = Some((handle, slide));
    }

    /// Stacked cards: forward moves the top card to the bottom, backward the reverse.
    /// The current index is unaffected.
    fn rotate_stack(&mut self, forward: bool) {
        let moved = if forward {
            self.state.card_stack.rotate_forward()
        } else {
            self.state.card_stack.rotate_backward()
        };
        let Some(moved) = moved else {
            return;
        };

        if let Some((handle, slide)) = self.card_swap.take() {
            self.scheduler.cancel(handle);
            self.render(RenderOp::SetCardSwapping { slide, swapping: false });
        }

        self.render(RenderOp::SetCardSwapping { slide: moved, swapping: true });
        self.render(RenderOp::SetStackOrder(self.state.card_stack.order().to_vec()));
        let handle = self
            .scheduler
            .schedule(TimerTask::EndCardSwap { slide: moved }, self.settings.card_swap());
        self.card_swap = Some((handle, moved));
    }

    /// A slide was clicked; rotates the stack while stacked cards are shown
    pub fn stack_card_clicked(&mut self) {
        if self.stack_click_listener {
            self.next();
        }
    }

    // ===== Auto-advance =====

    fn advance_task(&self) -> TimerTask {
        if self.state.mode.rotates_stack() {
            TimerTask::RotateStack
        } else {
            TimerTask::AutoAdvance
        }
    }

    /// Arm the repeating timer unless already armed or suspended by hover
    fn arm_advance(&mut self) {
        if self.advance_timer.is_some() {
            return;
        }
        if self.state.hover_paused {
            tracing::debug!("Hover pause active; timer stays disarmed");
            return;
        }
        let handle = self
            .scheduler
            .schedule(self.advance_task(), self.state.auto_advance_interval);
        self.advance_timer = Some(handle);
    }

    fn disarm_advance(&mut self) {
        if let Some(handle) = self.advance_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn start_auto_advance(&mut self) {
        self.state.is_playing = true;
        self.arm_advance();
        self.render(RenderOp::SetPlayState { playing: true });
    }

    pub fn stop_auto_advance(&mut self) {
        self.state.is_playing = false;
        self.disarm_advance();
        self.render(RenderOp::SetPlayState { playing: false });
    }

    pub fn toggle_auto_advance(&mut self) {
        if self.state.is_playing {
            self.stop_auto_advance();
        } else {
            self.start_auto_advance();
        }
    }

    /// Change the advance period. An armed timer restarts with the new period at once.
    pub fn set_auto_advance_speed(&mut self, ms: i64) {
        let interval = self.settings.clamp_interval(ms);
        self.state.auto_advance_interval = interval;
        self.render(RenderOp::SetSpeedLabel { interval });

        if self.advance_timer.is_some() {
            self.disarm_advance();
            self.arm_advance();
        }
        tracing::debug!("Auto-advance interval set to {:?}", interval);
    }

    pub fn faster(&mut self) {
        let next = self
            .state
            .auto_advance_interval
            .saturating_sub(self.settings.interval_step());
        self.set_auto_advance_speed(next.as_millis() as i64);
    }

    pub fn slower(&mut self) {
        let next = self.state.auto_advance_interval + self.settings.interval_step();
        self.set_auto_advance_speed(next.as_millis() as i64);
    }

    /// Suspend the timer while the pointer is over the slides
    pub fn pause_on_hover(&mut self) {
        if !self.settings.pause_on_hover {
            return;
        }
        self.state.hover_paused = true;
        self.disarm_advance();
    }

    /// Re-arm after hover, unless the user paused in the meantime
    pub fn resume_on_hover(&mut self) {
        self.state.hover_paused = false;
        if self.state.is_playing {
            self.arm_advance();
        }
    }

    // ===== Timers =====

    /// Move time forward, handling every task that comes due in order
    pub fn advance(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(fired) = self.scheduler.fire_next(deadline) {
            self.handle_timer(fired);
        }
        self.scheduler.settle(deadline);
    }

    fn handle_timer(&mut self, fired: FiredTimer) {
        match fired.task {
            TimerTask::AutoAdvance | TimerTask::RotateStack => {
                if self.advance_timer != Some(fired.handle) {
                    tracing::debug!(task = ?fired.task, "Stale tick ignored");
                    return;
                }
                self.next();
            }
            // The task's own slide index may predate a removal; trust the tracked one
            TimerTask::EndEntryAnimation { .. } => {
                let Some((handle, slide)) = self.entry_animation else {
                    return;
                };
                if handle != fired.handle {
                    return;
                }
                self.entry_animation = None;
                if slide < self.state.len() {
                    self.render(RenderOp::SetEntryAnimation { slide, active: false });
                }
            }
            TimerTask::EndCardSwap { .. } => {
                let Some((handle, slide)) = self.card_swap else {
                    return;
                };
                if handle != fired.handle {
                    return;
                }
                self.card_swap = None;
                if self.state.mode.rotates_stack() && slide < self.state.len() {
                    self.render(RenderOp::SetCardSwapping { slide, swapping: false });
                }
            }
            TimerTask::RemoveOverlay => {
                if self.overlay != Overlay::Fading(fired.handle) {
                    tracing::debug!("Overlay removal no longer applies");
                    return;
                }
                self.overlay = Overlay::Absent;
                self.render(RenderOp::RemoveOverlay);
            }
        }
    }

    // ===== Slides =====

    pub fn add_item(&mut self, item: SlideItem) -> usize {
        let index = self.state.push(item);
        self.rebuild();
        index
    }

    /// Remove slide `index`; out-of-range indices are ignored
    pub fn remove_item(&mut self, index: usize) -> Option<SlideItem> {
        let Some(item) = self.state.remove(index) else {
            tracing::debug!("Remove ignored: no slide {}", index);
            return None;
        };
        self.entry_animation = self.reindex_tracked(self.entry_animation, index);
        self.card_swap = self.reindex_tracked(self.card_swap, index);
        self.rebuild();
        Some(item)
    }

    /// Follow a tracked animation through the removal of slide `removed`.
    /// The animation of the removed slide itself is cancelled.
    fn reindex_tracked(
        &mut self,
        tracked: Option<(TimerHandle, usize)>,
        removed: usize,
    ) -> Option<(TimerHandle, usize)> {
        let (handle, slide) = tracked?;
        if slide == removed {
            self.scheduler.cancel(handle);
            return None;
        }
        let slide = if slide > removed { slide - 1 } else { slide };
        Some((handle, slide))
    }

    fn rebuild(&mut self) {
        self.render(RenderOp::BuildSlides(self.state.items().to_vec()));

        if self.state.is_empty() {
            self.render(RenderOp::UpdateIndicators { active: 0, total: 0 });
            return;
        }
        if self.state.mode.rotates_stack() {
            self.render(RenderOp::SetStackOrder(self.state.card_stack.order().to_vec()));
            self.render(RenderOp::UpdateIndicators {
                active: self.state.current_index,
                total: self.state.len(),
            });
        } else {
            self.show(self.state.current_index as i64);
        }
    }

    pub fn report_media_loaded(&mut self, index: usize) {
        if !self.state.set_media(index, MediaStatus::Loaded) {
            tracing::debug!("Load report for unknown slide {}", index);
        }
    }

    /// A slide's media failed to load; a placeholder takes its place
    pub fn report_media_failed(&mut self, index: usize, reason: &str) {
        let err = SliderError::MediaLoad {
            index,
            reason: reason.to_string(),
        };
        tracing::warn!("{}", err);

        if self.state.set_media(index, MediaStatus::Placeholder) {
            self.render(RenderOp::ShowPlaceholder { slide: index });
        }
    }

    /// Stop everything and clear the slide strip
    pub fn destroy(&mut self) {
        self.teardown_effects(OverlayExit::Immediate);
        self.state.is_playing = false;
        self.state.hover_paused = false;
        self.render(RenderOp::Clear);
        tracing::info!("Slider destroyed");
    }

    // ===== Commands =====

    /// Run a command. Returns `false` if it was not understood.
    pub fn execute(&mut self, cmd: &Command) -> bool {
        match self.try_execute(cmd) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Command {} ignored: {}", cmd.id.as_str(), e);
                false
            }
        }
    }

    fn try_execute(&mut self, cmd: &Command) -> Result<(), SliderError> {
        match cmd.id.as_str() {
            CommandId::SLIDE_NEXT => self.next(),
            CommandId::SLIDE_PREV => self.previous(),
            CommandId::SLIDE_FIRST => self.first(),
            CommandId::SLIDE_LAST => self.last(),
            CommandId::SLIDE_GOTO => self.go_to(cmd.int()?),
            CommandId::EFFECT_SET => self.set_mode(cmd.effect()?),
            CommandId::EFFECT_CYCLE => self.set_mode(self.state.mode.cycle()),
            CommandId::PLAY_TOGGLE => self.toggle_auto_advance(),
            CommandId::PLAY_FASTER => self.faster(),
            CommandId::PLAY_SLOWER => self.slower(),
            CommandId::PLAY_SPEED => self.set_auto_advance_speed(cmd.int()?),
            CommandId::VIEW_ENTER_FULLSCREEN => self.enter_fullscreen(),
            CommandId::VIEW_EXIT_FULLSCREEN => self.exit_fullscreen(),
            CommandId::POINTER_ENTER => self.pause_on_hover(),
            CommandId::POINTER_LEAVE => self.resume_on_hover(),
            CommandId::STACK_CARD_CLICK => self.stack_card_clicked(),
            other => return Err(SliderError::UnknownCommand(other.to_string())),
        }
        Ok(())
    }

    // ===== Rendering =====

    fn render(&mut self, op: RenderOp) {
        if let Err(e) = self.renderer.apply(&op) {
            tracing::warn!(target_element = op.target(), "Render instruction skipped: {}", e);
        }
    }

    /// Teardown instruction; the element is often legitimately absent
    fn render_cleanup(&mut self, op: RenderOp) {
        if let Err(e) = self.renderer.apply(&op) {
            tracing::debug!(target_element = op.target(), "Cleanup skipped: {}", e);
        }
    }
}
