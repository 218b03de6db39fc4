//! Demo host configuration loaded from the environment.
use std::time::Duration;

use flow_core::DriverConfig;
use flow_core::config::read_env;

#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Number of frames to run before exiting.
    pub frames: u32,
    /// Host frame rate.
    pub fps: u32,
    pub driver: DriverConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 180,
            fps: 60,
            driver: DriverConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Environment variables:
    /// - `FLOW_DEMO_FRAMES` - Frames to run (default: 180)
    /// - `FLOW_DEMO_FPS` - Frame rate (default: 60)
    /// - plus everything [`DriverConfig::from_env`] reads
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(frames) = read_env::<u32>("FLOW_DEMO_FRAMES") {
            config.frames = frames;
        }
        if let Some(fps) = read_env::<u32>("FLOW_DEMO_FPS") {
            config.fps = fps.max(1);
        }
        config.driver = DriverConfig::from_env();

        config
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }
}
