//! Demo host for the flow action scheduler.
//!
//! Runs a fixed number of frames at a fixed rate and launches one of each
//! common action kind, logging their callbacks. Prints the driver stats as JSON
//! on exit.
//!
//! ```bash
//! RUST_LOG=debug FLOW_DEMO_FRAMES=240 cargo run -p flow-demo
//! ```

mod config;

use std::time::Duration;

use anyhow::Result;
use flow_actions::{ActionSettings, AsOwner, BlendFunc, Flow, InstanceId, Owner, Timeline};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::DemoConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let config = DemoConfig::from_env();
    info!(frames = config.frames, fps = config.fps, "starting demo host");

    let flow = Flow::new(config.driver.clone());
    let owner = Owner::new("demo");
    launch_scenarios(&flow, &owner);

    let frame = config.frame_duration();
    let delta = frame.as_secs_f32();
    let mut interval = tokio::time::interval(frame);
    for _ in 0..config.frames {
        interval.tick().await;
        flow.tick(delta);
    }

    let stats = flow.stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);

    flow.stop_all(None, true);
    Ok(())
}

fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn launch_scenarios(flow: &Flow, owner: &Owner) {
    flow.on(owner)
        .delay(1.0, |stopped| info!(stopped, "delay fired"));

    flow.on(owner)
        .settings(ActionSettings::tick_interval(0.5).with_label("heartbeat"))
        .ticker(|dt, handle| info!(%handle, dt, "heartbeat"));

    // Rate-limited action: three requests in one frame, at most one per second.
    let spam = InstanceId::new();
    for _ in 0..3 {
        flow.on(owner)
            .instance(spam)
            .do_no_more_than(1.0, 2, || info!("rate limited run"));
    }

    let fade = Timeline::new(1.0, 0.0, 1.5, |value, time| {
        tracing::debug!(value, time, "fade");
    })
    .with_blend(BlendFunc::EaseInOut(2.0))
    .on_complete(|value, time, stopped| info!(value, time, stopped, "fade finished"));
    flow.on(owner).launch(fade);

    let script = flow.downgrade();
    let weak = owner.as_owner();
    flow.spawn(async move {
        info!("script started");
        script.on(&weak).wait_seconds(0.5).await;
        info!("script: half a second later");

        let timed_out = script
            .on(&weak)
            .run_async_and_wait(|| std::thread::sleep(Duration::from_millis(100)), 2.0)
            .await;
        info!(timed_out, "script: background work finished");

        script.on(&weak).wait_ticks(10).await;
        info!("script done");
    });
}
