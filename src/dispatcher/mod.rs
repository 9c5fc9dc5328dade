//! # Dispatcher Module
//!
//! Runtime invocation contract shared by every generated mirror.
//!
//! ## Overview
//!
//! A generated dispatcher holds its handler instance and an immutable
//! mapping from suffixed path keys to [`Slot`] values, populated once in
//! its constructor. `invoke` resolves the call thunk and the serialized
//! parameter-name string, marshals named values from the caller's
//! [`ParamSource`] in declared order and performs exactly one handler
//! invocation.
//!
//! The mapping is read-only after construction, so concurrent reads from
//! multiple contexts need no synchronization; the handler instance's own
//! thread-safety is the handler author's responsibility.
//!
//! ## Failure modes
//!
//! - [`DispatchError::RouteNotFound`] - the path has no table entry
//! - [`DispatchError::Invocation`] - the entry resolved but argument
//!   binding failed or the handler method rejected the call
//!
//! Both are fatal to the single call only; the dispatcher stays usable.

mod core;

pub use core::{
    arg, invoke_mapped, ArgVec, DispatchError, MethodThunk, Mirror, ParamSource, Slot,
    MAX_INLINE_ARGS,
};
