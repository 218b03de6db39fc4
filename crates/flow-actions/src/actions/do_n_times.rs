use flow_core::{Action, ActionContext, SetupError};

/// Runs a function on launch and on each retrigger, at most `times` times.
///
/// The function receives the 1-based run counter. Retriggers past the limit
/// are ignored; the action stays alive until stopped.
pub struct DoNTimes {
    times: u32,
    counter: u32,
    exec: Box<dyn FnMut(u32)>,
}

impl DoNTimes {
    pub fn new(times: u32, exec: impl FnMut(u32) + 'static) -> Self {
        Self {
            times,
            counter: 0,
            exec: Box::new(exec),
        }
    }

    fn run(&mut self) {
        self.counter = self.counter.saturating_add(1);
        if self.counter <= self.times {
            (self.exec)(self.counter);
        }
    }
}

impl Action for DoNTimes {
    fn setup(&mut self, _ctx: &ActionContext<'_>) -> Result<(), SetupError> {
        if self.times == 0 {
            return Err(SetupError::ZeroCount { what: "times" });
        }
        Ok(())
    }

    fn init(&mut self, _ctx: &ActionContext<'_>) {
        self.counter = 0;
        self.run();
    }

    fn retriggered(&mut self, _ctx: &ActionContext<'_>) {
        self.run();
    }

    fn reset(&mut self, _call_update: bool, _ctx: &ActionContext<'_>) {
        self.counter = 0;
    }
}
