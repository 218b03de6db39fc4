use flow_core::error::positive;
use flow_core::{Action, ActionContext, SetupError};

use super::{BlendFunc, Lerp};

type TickFn<T> = Box<dyn FnMut(T, f32)>;
type CompleteFn<T> = Box<dyn FnOnce(T, f32, bool)>;

/// Blends a value from `start` to `stop` over `time` seconds.
///
/// `tick` receives `(value, time)` on every gated tick; the last call always
/// carries `stop` exactly. The optional completion callback receives
/// `(value, time, stopped)`.
///
/// Scalars use [`Timeline::new`]; vectors and colours go through
/// [`Timeline::between`] with any [`Lerp`] value.
pub struct Timeline<T = f32> {
    start: T,
    stop: T,
    time: f32,
    blend: BlendFunc,
    current_time: f32,
    current_value: T,
    tick: TickFn<T>,
    on_complete: Option<CompleteFn<T>>,
}

impl Timeline {
    pub fn new(start: f32, stop: f32, time: f32, tick: impl FnMut(f32, f32) + 'static) -> Self {
        Self::between(start, stop, time, tick)
    }
}

impl<T: Lerp> Timeline<T> {
    pub fn between(start: T, stop: T, time: f32, tick: impl FnMut(T, f32) + 'static) -> Self {
        Self {
            start,
            stop,
            time,
            blend: BlendFunc::Linear,
            current_time: 0.0,
            current_value: start,
            tick: Box::new(tick),
            on_complete: None,
        }
    }

    pub fn with_blend(mut self, blend: BlendFunc) -> Self {
        self.blend = blend;
        self
    }

    pub fn on_complete(mut self, on_complete: impl FnOnce(T, f32, bool) + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    fn rewind(&mut self) {
        self.current_time = 0.0;
        self.current_value = self.start;
    }
}

impl<T: Lerp> Action for Timeline<T> {
    fn setup(&mut self, ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        self.time = positive("timeline time", self.time)?;
        self.blend = self.blend.validate()?;
        if self.start == self.stop {
            return Err(SetupError::EmptyRange);
        }
        ctx.set_max_action_time(self.time);
        self.rewind();
        Ok(())
    }

    fn tick(&mut self, delta: f32, ctx: &ActionContext<'_>) {
        self.current_time = (self.current_time + delta).clamp(0.0, self.time);
        let alpha = self.current_time / self.time;
        self.current_value = if alpha >= 1.0 {
            self.stop
        } else {
            self.blend.interpolate(self.start, self.stop, alpha)
        };

        (self.tick)(self.current_value, self.current_time);

        if alpha >= 1.0 && !ctx.is_finished() {
            ctx.mark_as_finished();
            self.complete(false, ctx);
        }
    }

    fn complete(&mut self, stopped: bool, _ctx: &ActionContext<'_>) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(self.current_value, self.current_time, stopped);
        }
    }

    fn reset(&mut self, call_update: bool, ctx: &ActionContext<'_>) {
        self.rewind();
        if call_update && ctx.is_valid() {
            (self.tick)(self.current_value, self.current_time);
        }
    }
}
