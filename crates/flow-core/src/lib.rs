//! Frame-tick driven scheduler for deferred, timed and conditional actions.
//!
//! A host application owns one [`Driver`] per session and calls
//! [`Driver::tick`] once per frame with the frame's delta time. Everything else
//! hangs off that call: actions registered with [`Driver::add_action`] advance
//! through tick gating, complete, and resume any coroutine suspended on them.
//!
//! - **Single-threaded**: the driver and every action live on the frame thread
//!   (`Driver` is `!Send`)
//! - **Weak ownership**: an action dies silently with its [`Owner`]
//! - **Pending list**: actions added during a pass never tick in that pass
//!
//! # Architecture
//!
//! - [`driver`]: the registry and its tick pass
//! - [`action`]: the [`Action`] lifecycle contract variants implement
//! - [`settings`]: per-action tick policy ([`ActionSettings`])
//! - [`handle`] and [`instance`]: action identifiers and deduplication keys
//! - [`coroutine`]: suspending `async` code on actions
//! - [`config`]: driver configuration loaded from the environment

pub mod action;
pub mod config;
pub mod coroutine;
pub mod driver;
pub mod error;
pub mod handle;
pub mod instance;
pub mod owner;
pub mod settings;

mod entry;
mod timing;

pub use action::{Action, ActionContext};
pub use config::DriverConfig;
pub use coroutine::{Continuation, Suspend};
pub use driver::{Driver, DriverStats, WeakDriver};
pub use error::SetupError;
pub use handle::Handle;
pub use instance::{InstanceId, InstanceKind};
pub use owner::{AsOwner, Owner, WeakOwner};
pub use settings::ActionSettings;
