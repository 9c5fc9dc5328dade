//! Dispatcher core module - hot path for route invocation.

use std::collections::HashMap;

use anyhow::anyhow;
use serde::de::DeserializeOwned;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::debug;

use crate::keys::{join_key, normalize_key, KEY_ARGS, KEY_METHOD};

/// Maximum inline arguments before heap allocation.
/// Route methods rarely declare more than a handful of parameters.
pub const MAX_INLINE_ARGS: usize = 4;

/// Stack-allocated argument storage for the dispatch hot path.
pub type ArgVec = SmallVec<[Value; MAX_INLINE_ARGS]>;

/// Call thunk bound to one handler method.
///
/// The thunk converts the ordered raw values into the method's declared
/// parameter types and performs the actual call. Resolved once when the
/// mirror is constructed; invoked without any further lookup.
pub type MethodThunk<H> = fn(&H, &ArgVec) -> anyhow::Result<()>;

/// One route-table mapping value.
///
/// The table stores two entries per route under suffixed keys: the call
/// thunk under `<key>_METHOD` and the serialized parameter-name string
/// under `<key>_ARGS`.
pub enum Slot<H> {
    Method(MethodThunk<H>),
    Args(&'static str),
}

/// Named argument lookup a dispatch call resolves parameters from.
///
/// This is the only capability the runtime requires of its collaborator:
/// a name→value lookup with [`Value`] as the unconstrained value type.
pub trait ParamSource {
    fn get(&self, name: &str) -> Option<Value>;
}

impl ParamSource for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name).cloned()
    }
}

impl ParamSource for serde_json::Map<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        serde_json::Map::get(self, name).cloned()
    }
}

impl ParamSource for Value {
    fn get(&self, name: &str) -> Option<Value> {
        self.as_object().and_then(|m| m.get(name)).cloned()
    }
}

/// Runtime dispatch failures, distinguishable by the caller.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The requested path has no table entry. Fatal to the single call;
    /// the dispatcher instance stays usable for other paths.
    #[error("path `{0}` not found")]
    RouteNotFound(String),
    /// The table entry resolved, but binding the arguments failed or the
    /// handler method itself rejected the call.
    #[error("invoking `{path}` failed: {source}")]
    Invocation {
        path: String,
        #[source]
        source: anyhow::Error,
    },
    /// A rejection was signaled without a specific error.
    #[error("unknown rejection")]
    UnknownRejection,
}

/// Invocation surface implemented by every generated dispatcher.
pub trait Mirror {
    /// Resolve `path` against the route table and invoke the bound
    /// handler method with arguments drawn from `params`.
    fn invoke(&self, path: &str, params: &dyn ParamSource) -> Result<(), DispatchError>;
}

/// Shared `invoke` body delegated to by every generated mirror.
///
/// Looks up the call thunk and the arg-name string, marshals the named
/// values in declared order and performs exactly one handler invocation.
/// The incoming path goes through the same [`normalize_key`] the compiler
/// used when it emitted the table keys.
pub fn invoke_mapped<H>(
    original: &H,
    mapping: &HashMap<String, Slot<H>>,
    path: &str,
    params: &dyn ParamSource,
) -> Result<(), DispatchError> {
    let key = normalize_key(path);

    let thunk = match mapping.get(&join_key(&key, KEY_METHOD)) {
        Some(Slot::Method(f)) => *f,
        _ => {
            debug!(path = %path, "no route entry for path");
            return Err(DispatchError::RouteNotFound(path.to_string()));
        }
    };
    let arg_names = match mapping.get(&join_key(&key, KEY_ARGS)) {
        Some(Slot::Args(names)) => *names,
        _ => "",
    };

    let mut args = ArgVec::new();
    if !arg_names.is_empty() {
        if arg_names.contains(',') {
            for name in arg_names.split(',') {
                args.push(params.get(name).unwrap_or(Value::Null));
            }
        } else {
            // Single name, no separator needed.
            args.push(params.get(arg_names).unwrap_or(Value::Null));
        }
    }

    thunk(original, &args).map_err(|source| DispatchError::Invocation {
        path: path.to_string(),
        source,
    })
}

/// Bind one marshalled argument to its declared type.
///
/// Used by generated call thunks; a missing slot or a value of the wrong
/// shape surfaces as an `Invocation` failure at the dispatch layer.
pub fn arg<T: DeserializeOwned>(args: &ArgVec, index: usize) -> anyhow::Result<T> {
    let value = args
        .get(index)
        .cloned()
        .ok_or_else(|| anyhow!("argument {index} missing from call"))?;
    serde_json::from_value(value).map_err(|e| anyhow!("argument {index} has the wrong type: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Default)]
    struct Probe {
        calls: Cell<u32>,
    }

    impl Probe {
        fn ping(&self) -> anyhow::Result<()> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    fn table() -> HashMap<String, Slot<Probe>> {
        let mut mapping = HashMap::new();
        mapping.insert(
            join_key("/ping", KEY_METHOD),
            Slot::Method((|h: &Probe, _args: &ArgVec| -> anyhow::Result<()> { h.ping() })
                as MethodThunk<Probe>),
        );
        mapping.insert(join_key("/ping", KEY_ARGS), Slot::Args(""));
        mapping
    }

    #[test]
    fn test_unknown_path_is_route_not_found() {
        let probe = Probe::default();
        let mapping = table();
        let params: HashMap<String, Value> = HashMap::new();
        let err = invoke_mapped(&probe, &mapping, "/missing", &params).unwrap_err();
        assert!(matches!(err, DispatchError::RouteNotFound(_)));
        assert_eq!(probe.calls.get(), 0);
    }

    #[test]
    fn test_lookup_folds_path_case() {
        let probe = Probe::default();
        let mapping = table();
        let params: HashMap<String, Value> = HashMap::new();
        invoke_mapped(&probe, &mapping, "/Ping", &params).unwrap();
        assert_eq!(probe.calls.get(), 1);
    }

    #[test]
    fn test_arg_binds_declared_type() {
        let mut args = ArgVec::new();
        args.push(json!("hello"));
        args.push(json!(7));
        let s: String = arg(&args, 0).unwrap();
        let n: i64 = arg(&args, 1).unwrap();
        assert_eq!(s, "hello");
        assert_eq!(n, 7);
        assert!(arg::<String>(&args, 1).is_err());
        assert!(arg::<String>(&args, 2).is_err());
    }
}
