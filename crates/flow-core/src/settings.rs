//! Per-action scheduling settings.

/// Time policy snapshot attached to an action when it is launched.
///
/// The driver copies the settings into the action at creation; afterwards only
/// the pause flag changes, through [`Driver::pause_action`](crate::Driver::pause_action)
/// and [`Driver::resume_action`](crate::Driver::resume_action).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionSettings {
    /// Minimum simulated time between ticks. `0` ticks every frame.
    pub tick_interval: f32,

    /// Seconds to wait before the first tick.
    pub first_delay: f32,

    /// Keep ticking while the host simulation is paused.
    pub ignore_pause: bool,

    /// Use the raw frame delta instead of the dilated one.
    pub ignore_time_dilation: bool,

    /// Begin in the paused state.
    pub start_paused: bool,

    /// Diagnostic label, shown in logs.
    pub label: Option<String>,
}

impl ActionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings that batch ticks every `interval` seconds.
    pub fn tick_interval(interval: f32) -> Self {
        Self::new().with_tick_interval(interval)
    }

    /// Settings that defer the first tick by `delay` seconds.
    pub fn delay_first(delay: f32) -> Self {
        Self::new().with_first_delay(delay)
    }

    pub fn ignore_pause() -> Self {
        Self::new().ignoring_pause()
    }

    pub fn ignore_time_dilation() -> Self {
        Self::new().ignoring_time_dilation()
    }

    pub fn ignore_pause_and_dilation() -> Self {
        Self::new().ignoring_pause().ignoring_time_dilation()
    }

    pub fn with_tick_interval(mut self, interval: f32) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_first_delay(mut self, delay: f32) -> Self {
        self.first_delay = delay;
        self
    }

    pub fn ignoring_pause(mut self) -> Self {
        self.ignore_pause = true;
        self
    }

    pub fn ignoring_time_dilation(mut self) -> Self {
        self.ignore_time_dilation = true;
        self
    }

    pub fn paused(mut self) -> Self {
        self.start_paused = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether tick-interval batching is configured.
    #[inline]
    pub fn has_tick_interval(&self) -> bool {
        self.tick_interval > 0.0
    }
}
