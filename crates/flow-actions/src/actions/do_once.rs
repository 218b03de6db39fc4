use flow_core::{Action, ActionContext};

/// Runs a function once, on launch.
///
/// The action then stays alive without doing anything, so launching it again
/// with the same instance id is a no-op until it is stopped or its owner dies.
pub struct DoOnce {
    exec: Option<Box<dyn FnOnce()>>,
}

impl DoOnce {
    pub fn new(exec: impl FnOnce() + 'static) -> Self {
        Self {
            exec: Some(Box::new(exec)),
        }
    }
}

impl Action for DoOnce {
    fn init(&mut self, _ctx: &ActionContext<'_>) {
        if let Some(exec) = self.exec.take() {
            exec();
        }
    }
}
