//! Tests for the runtime invocation contract
//!
//! # Test Coverage
//!
//! Validates the generated dispatcher's behavior through a mirror built
//! exactly the way the templates emit one:
//! - Zero/single/multi parameter marshalling
//! - Argument ordering against the ParamSource
//! - RouteNotFound vs Invocation failure distinction
//! - Case folding between emitted keys and runtime lookups
//! - Alias forwarding

use std::collections::HashMap;
use std::sync::Mutex;

use mirror_router::dispatcher::{
    arg, invoke_mapped, ArgVec, DispatchError, Mirror, ParamSource, Slot,
};
use mirror_router::keys::{join_key, KEY_ARGS, KEY_METHOD};
use serde_json::{json, Value};

/// Handler module used by the mirrors below; records every call so the
/// tests can assert on argument order.
#[derive(Default)]
struct MediaHandlers {
    calls: Mutex<Vec<String>>,
}

impl MediaHandlers {
    fn open_viewer(&self, url: String, page: i64) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("open_viewer({url}, {page})"));
        Ok(())
    }

    fn share(&self, url: String) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(format!("share({url})"));
        Ok(())
    }

    fn close(&self) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push("close()".to_string());
        Ok(())
    }

    fn eject(&self) -> anyhow::Result<()> {
        anyhow::bail!("tray is locked")
    }
}

/// Mirrors the source `mirror.rs.txt` emits for the module above.
#[allow(non_camel_case_types)]
struct Mirror_app_media {
    original: MediaHandlers,
    mapping: HashMap<String, Slot<MediaHandlers>>,
}

impl Mirror_app_media {
    fn new() -> Self {
        let original = MediaHandlers::default();
        let mut mapping: HashMap<String, Slot<MediaHandlers>> = HashMap::new();

        mapping.insert(
            join_key("/openviewer", KEY_METHOD),
            Slot::Method(|original: &MediaHandlers, args: &ArgVec| -> anyhow::Result<()> {
                let url: String = arg(args, 0)?;
                let page: i64 = arg(args, 1)?;
                original.open_viewer(url, page)
            }),
        );
        mapping.insert(join_key("/openviewer", KEY_ARGS), Slot::Args("url,page"));

        mapping.insert(
            join_key("/share", KEY_METHOD),
            Slot::Method(|original: &MediaHandlers, args: &ArgVec| -> anyhow::Result<()> {
                let url: String = arg(args, 0)?;
                original.share(url)
            }),
        );
        mapping.insert(join_key("/share", KEY_ARGS), Slot::Args("url"));

        mapping.insert(
            join_key("/close", KEY_METHOD),
            Slot::Method(|original: &MediaHandlers, _args: &ArgVec| -> anyhow::Result<()> {
                original.close()
            }),
        );
        mapping.insert(join_key("/close", KEY_ARGS), Slot::Args(""));

        mapping.insert(
            join_key("/eject", KEY_METHOD),
            Slot::Method(|original: &MediaHandlers, _args: &ArgVec| -> anyhow::Result<()> {
                original.eject()
            }),
        );
        mapping.insert(join_key("/eject", KEY_ARGS), Slot::Args(""));

        Self { original, mapping }
    }

    fn calls(&self) -> Vec<String> {
        self.original.calls.lock().unwrap().clone()
    }
}

impl Mirror for Mirror_app_media {
    fn invoke(&self, path: &str, params: &dyn ParamSource) -> Result<(), DispatchError> {
        invoke_mapped(&self.original, &self.mapping, path, params)
    }
}

/// Mirrors the source `alias.rs.txt` emits for a secondary scheme.
#[allow(non_camel_case_types)]
struct Mirror_web_media {
    main: Mirror_app_media,
}

impl Mirror_web_media {
    fn new() -> Self {
        Self {
            main: Mirror_app_media::new(),
        }
    }
}

impl Mirror for Mirror_web_media {
    fn invoke(&self, path: &str, params: &dyn ParamSource) -> Result<(), DispatchError> {
        self.main.invoke(path, params)
    }
}

fn params(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

#[test]
fn test_zero_param_route_ignores_params_contents() {
    let mirror = Mirror_app_media::new();
    let noise = params(&[("url", json!("ignored")), ("page", json!(9))]);
    mirror.invoke("/close", &noise).expect("invoke");
    assert_eq!(mirror.calls(), ["close()"]);
}

#[test]
fn test_multi_param_route_resolves_names_in_order() {
    let mirror = Mirror_app_media::new();
    let p = params(&[
        ("page", json!(3)),
        ("url", json!("app://media/a.png")),
        ("unused", json!(true)),
    ]);
    mirror.invoke("/openViewer", &p).expect("invoke");
    assert_eq!(mirror.calls(), ["open_viewer(app://media/a.png, 3)"]);
}

#[test]
fn test_single_param_route_needs_no_separator() {
    let mirror = Mirror_app_media::new();
    let p = params(&[("url", json!("app://media/b.png"))]);
    mirror.invoke("/share", &p).expect("invoke");
    assert_eq!(mirror.calls(), ["share(app://media/b.png)"]);
}

#[test]
fn test_unknown_path_is_route_not_found() {
    let mirror = Mirror_app_media::new();
    let err = mirror
        .invoke("/unknown/path", &params(&[]))
        .expect_err("should fail");
    match err {
        DispatchError::RouteNotFound(path) => assert_eq!(path, "/unknown/path"),
        other => panic!("expected RouteNotFound, got {other:?}"),
    }
    // The dispatcher stays usable after a missed lookup.
    mirror.invoke("/close", &params(&[])).expect("invoke");
}

#[test]
fn test_wrong_argument_type_is_invocation_failure() {
    let mirror = Mirror_app_media::new();
    let p = params(&[("url", json!("x")), ("page", json!("not a number"))]);
    let err = mirror.invoke("/openviewer", &p).expect_err("should fail");
    assert!(matches!(err, DispatchError::Invocation { .. }));
    assert!(mirror.calls().is_empty());
}

#[test]
fn test_missing_argument_is_invocation_failure() {
    let mirror = Mirror_app_media::new();
    // `url` resolves to null, which cannot bind to String.
    let p = params(&[("page", json!(1))]);
    let err = mirror.invoke("/openviewer", &p).expect_err("should fail");
    assert!(matches!(err, DispatchError::Invocation { .. }));
}

#[test]
fn test_handler_error_propagates_as_invocation_failure() {
    let mirror = Mirror_app_media::new();
    let err = mirror.invoke("/eject", &params(&[])).expect_err("should fail");
    match err {
        DispatchError::Invocation { path, source } => {
            assert_eq!(path, "/eject");
            assert!(source.to_string().contains("tray is locked"));
        }
        other => panic!("expected Invocation, got {other:?}"),
    }
}

#[test]
fn test_lookup_is_case_insensitive() {
    let mirror = Mirror_app_media::new();
    mirror.invoke("/Close", &params(&[])).expect("invoke");
    mirror.invoke("/CLOSE", &params(&[])).expect("invoke");
    assert_eq!(mirror.calls(), ["close()", "close()"]);
}

#[test]
fn test_alias_forwards_unchanged() {
    let alias = Mirror_web_media::new();
    let p = params(&[("url", json!("web://media/c.png"))]);
    alias.invoke("/share", &p).expect("invoke");
    assert_eq!(alias.main.calls(), ["share(web://media/c.png)"]);

    let err = alias
        .invoke("/unknown", &params(&[]))
        .expect_err("should fail");
    assert!(matches!(err, DispatchError::RouteNotFound(_)));
}

#[test]
fn test_duplicate_key_later_insert_wins() {
    // Two declarations sharing a path key produce two insert statements;
    // the later one fully replaces the earlier in the built mapping.
    let original = MediaHandlers::default();
    let mut mapping: HashMap<String, Slot<MediaHandlers>> = HashMap::new();

    mapping.insert(
        join_key("/open", KEY_METHOD),
        Slot::Method(|original: &MediaHandlers, args: &ArgVec| -> anyhow::Result<()> {
            let url: String = arg(args, 0)?;
            let page: i64 = arg(args, 1)?;
            original.open_viewer(url, page)
        }),
    );
    mapping.insert(join_key("/open", KEY_ARGS), Slot::Args("url,page"));

    mapping.insert(
        join_key("/open", KEY_METHOD),
        Slot::Method(|original: &MediaHandlers, args: &ArgVec| -> anyhow::Result<()> {
            let url: String = arg(args, 0)?;
            original.share(url)
        }),
    );
    mapping.insert(join_key("/open", KEY_ARGS), Slot::Args("url"));

    let p = params(&[("url", json!("later-wins"))]);
    invoke_mapped(&original, &mapping, "/open", &p).expect("invoke");
    assert_eq!(
        original.calls.lock().unwrap().clone(),
        ["share(later-wins)"]
    );
}

#[test]
fn test_json_object_works_as_param_source() {
    let mirror = Mirror_app_media::new();
    let body = json!({"url": "app://media/d.png", "page": 7});
    mirror.invoke("/openviewer", &body).expect("invoke");
    assert_eq!(mirror.calls(), ["open_viewer(app://media/d.png, 7)"]);
}
