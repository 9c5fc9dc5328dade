use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::error;

use super::context::{run_on, ExecutionContext};
use crate::dispatcher::DispatchError;

/// Callback invoked with the settled value.
pub type ResolveFn = Box<dyn FnOnce(Value) + Send + 'static>;
/// Callback invoked with the settlement error.
pub type RejectFn = Box<dyn FnOnce(DispatchError) + Send + 'static>;

/// Request source fired when the channel is armed. Receives the
/// producer-side [`Completer`] it will settle when the work is done.
pub type Asker = Box<dyn FnOnce(Completer) + Send + 'static>;

enum ChannelState {
    Idle,
    Armed {
        on_resolve: Option<ResolveFn>,
        on_reject: Option<RejectFn>,
    },
    Settled,
}

struct Shared {
    state: Mutex<ChannelState>,
    ctx: Arc<dyn ExecutionContext>,
}

/// Single-use asynchronous result channel.
///
/// Arm it with at most one resolve and one reject callback; the opaque
/// request source then runs and settles the channel exactly once through
/// its [`Completer`]. Whichever callback fires is delivered on the
/// designated execution context regardless of which thread produced the
/// settlement, so a context-bound consumer never needs to re-dispatch.
///
/// A channel must not be reused across two calls: one channel per call.
pub struct Promise {
    shared: Arc<Shared>,
    asker: Asker,
}

impl Promise {
    /// Create a channel bound to its delivery context and request source.
    pub fn new(ctx: Arc<dyn ExecutionContext>, asker: Asker) -> Self {
        Promise {
            shared: Arc::new(Shared {
                state: Mutex::new(ChannelState::Idle),
                ctx,
            }),
            asker,
        }
    }

    /// Store the callbacks and trigger the underlying request.
    ///
    /// Either callback may be omitted; a missing callback turns the
    /// matching settlement into a no-op (rejections are still logged).
    pub fn arm(self, on_resolve: Option<ResolveFn>, on_reject: Option<RejectFn>) {
        {
            let mut state = match self.shared.state.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            *state = ChannelState::Armed {
                on_resolve,
                on_reject,
            };
        }
        let completer = Completer {
            shared: Arc::clone(&self.shared),
        };
        (self.asker)(completer);
    }

    /// Arm with no callbacks: fire-and-forget.
    pub fn call(self) {
        self.arm(None, None);
    }
}

/// Producer half of a [`Promise`], handed to the request source.
pub struct Completer {
    shared: Arc<Shared>,
}

impl Completer {
    /// Settle the channel with a value.
    ///
    /// First settlement wins; later settlements of either kind are silent
    /// no-ops, which makes racing an external timeout against the real
    /// result safe to compose.
    pub fn resolve(&self, value: Value) {
        let Some((on_resolve, _)) = self.take_callbacks() else {
            return;
        };
        let Some(cb) = on_resolve else {
            return;
        };
        run_on(self.shared.ctx.as_ref(), Box::new(move || cb(value)));
    }

    /// Settle the channel with an error.
    ///
    /// A missing error is replaced by [`DispatchError::UnknownRejection`].
    /// The rejection is logged before delivery so the failure stays
    /// observable even when no reject callback was armed.
    pub fn reject(&self, err: Option<DispatchError>) {
        let Some((_, on_reject)) = self.take_callbacks() else {
            return;
        };
        let err = err.unwrap_or(DispatchError::UnknownRejection);
        error!(error = %err, "dispatch rejected");
        let Some(cb) = on_reject else {
            return;
        };
        run_on(self.shared.ctx.as_ref(), Box::new(move || cb(err)));
    }

    /// True once the channel has been settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        let state = match self.shared.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        matches!(*state, ChannelState::Settled)
    }

    /// Transition to Settled, returning the armed callbacks exactly once.
    fn take_callbacks(&self) -> Option<(Option<ResolveFn>, Option<RejectFn>)> {
        let mut state = match self.shared.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match std::mem::replace(&mut *state, ChannelState::Settled) {
            ChannelState::Armed {
                on_resolve,
                on_reject,
            } => Some((on_resolve, on_reject)),
            // Settled before arm should be unreachable (the Completer is
            // created by arm), treated as an unarmed settlement.
            ChannelState::Idle => Some((None, None)),
            ChannelState::Settled => None,
        }
    }
}
