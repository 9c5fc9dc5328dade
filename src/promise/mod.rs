//! # Promise Module
//!
//! Single-use asynchronous result channel with context-affine delivery.
//!
//! ## Overview
//!
//! A dispatch's outcome is produced on whatever thread performed the
//! work, but consumers are usually bound to one context (the host
//! application's main loop). The [`Promise`] pairs at most one resolve
//! and one reject callback with an injected [`ExecutionContext`]; when
//! the producer settles, delivery happens inline if the settling thread
//! already is the designated context and is posted to the context's task
//! queue otherwise. The producer never blocks waiting for delivery.
//!
//! ## State machine
//!
//! `Idle → Armed → Settled`, terminal once settled: the first settlement
//! wins and later ones are silent no-ops, which tolerates the late
//! callbacks inherent in cross-thread races.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! use mirror_router::promise::{MainLoop, Promise};
//!
//! let (ctx, pump) = MainLoop::bind();
//! let promise = Promise::new(ctx, Box::new(|completer| {
//!     std::thread::spawn(move || {
//!         // ... perform the dispatch ...
//!         completer.resolve(serde_json::json!({"ok": true}));
//!     });
//! }));
//! promise.arm(Some(Box::new(|v| println!("resolved: {v}"))), None);
//! pump.drain();
//! ```
//!
//! No cancellation or timeout is provided; layer a racing rejection on
//! top when needed - the settle-once rule makes that composition safe.

mod context;
mod core;

pub use context::{run_on, ExecutionContext, MainLoop, Task, TaskPump};
pub use core::{Asker, Completer, Promise, RejectFn, ResolveFn};
