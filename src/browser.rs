//! Browser capability implementations and page wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches `web_sys` lives here so the resolver itself stays
//! testable natively. Each adapter degrades to a no-op (with a log line) when
//! the browser withholds the API it needs; none of them panic.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Document, Element, MediaQueryList, MediaQueryListEvent, Storage};

use crate::capability::{Capabilities, PreferenceStore, SystemPreferenceSignal, ThemeTarget, TransitionTimer};
use crate::config::ResolverConfig;
use crate::control::ControlState;
use crate::error::ThemeError;
use crate::mode::{EffectiveTheme, ThemeChange};
use crate::resolver::{SubscriptionId, ThemeResolver};

/// Root element attribute holding optional JSON resolver config.
const CONFIG_ATTRIBUTE: &str = "data-theme-config";

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn root_element() -> Option<Element> {
    document().and_then(|d| d.document_element())
}

// =============================================================================
// CAPABILITIES
// =============================================================================

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<Storage, ThemeError> {
        let window = web_sys::window().ok_or_else(|| ThemeError::StorageUnavailable("no window".to_owned()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(ThemeError::StorageUnavailable("localStorage disabled".to_owned())),
            Err(e) => Err(ThemeError::StorageUnavailable(js_error(&e))),
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ThemeError::StorageUnavailable(js_error(&e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ThemeError::StorageUnavailable(js_error(&e)))
    }
}

/// `matchMedia` for the configured color-scheme query.
#[derive(Debug)]
pub struct MediaQuerySignal {
    query: Option<MediaQueryList>,
}

impl MediaQuerySignal {
    #[must_use]
    pub fn new(media_query: &str) -> Self {
        let query = web_sys::window().and_then(|w| match w.match_media(media_query) {
            Ok(query) => query,
            Err(e) => {
                log::debug!("matchMedia({media_query}) failed: {}", js_error(&e));
                None
            }
        });
        Self { query }
    }
}

impl SystemPreferenceSignal for MediaQuerySignal {
    fn prefers_dark(&self) -> Option<bool> {
        self.query.as_ref().map(MediaQueryList::matches)
    }

    fn watch(&self, on_change: Box<dyn Fn(bool)>) -> bool {
        let Some(query) = self.query.as_ref() else {
            return false;
        };
        let listener =
            Closure::<dyn Fn(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| on_change(event.matches()));
        match query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref()) {
            Ok(()) => {
                // Lives for the page.
                listener.forget();
                true
            }
            Err(e) => {
                log::debug!("color-scheme change listener rejected: {}", js_error(&e));
                false
            }
        }
    }
}

/// The `<html>` element.
#[derive(Debug)]
pub struct DocumentTarget {
    root: Option<Element>,
    attribute: String,
    transition_class: String,
}

impl DocumentTarget {
    #[must_use]
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            root: root_element(),
            attribute: config.attribute.clone(),
            transition_class: config.transition_class.clone(),
        }
    }
}

impl ThemeTarget for DocumentTarget {
    fn attribute(&self) -> Option<String> {
        self.root.as_ref()?.get_attribute(&self.attribute)
    }

    fn set_attribute(&self, theme: EffectiveTheme) {
        let Some(root) = self.root.as_ref() else {
            return;
        };
        if let Err(e) = root.set_attribute(&self.attribute, theme.as_str()) {
            log::warn!("failed to set {}: {}", self.attribute, js_error(&e));
        }
    }

    fn set_transition_marker(&self, active: bool) {
        let Some(root) = self.root.as_ref() else {
            return;
        };
        let classes = root.class_list();
        let result = if active {
            classes.add_1(&self.transition_class)
        } else {
            classes.remove_1(&self.transition_class)
        };
        if let Err(e) = result {
            log::debug!("transition class update failed: {}", js_error(&e));
        }
    }
}

/// `setTimeout` via `gloo-timers`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutTimer;

impl TransitionTimer for TimeoutTimer {
    fn schedule(&self, after: Duration, callback: Box<dyn FnOnce()>) {
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback).forget();
    }
}

/// Capabilities backed by the live page.
#[must_use]
pub fn browser_capabilities(config: &ResolverConfig) -> Capabilities {
    use std::rc::Rc;

    Capabilities {
        store: Rc::new(LocalStorageStore),
        signal: Rc::new(MediaQuerySignal::new(&config.media_query)),
        target: Rc::new(DocumentTarget::new(config)),
        timer: Some(Rc::new(TimeoutTimer)),
    }
}

// =============================================================================
// PAGE WIRING
// =============================================================================

/// Wire every toggle control on the page to `resolver`.
///
/// Controls are `#<control_id>` and any element carrying `<control_marker>`.
/// Their ARIA state follows every change. Returns how many were bound; zero
/// is fine, the resolver works headlessly.
pub fn bind_toggle_controls(resolver: &ThemeResolver) -> usize {
    let Some(document) = document() else {
        return 0;
    };
    let selector = resolver.config().control_selector();
    let nodes = match document.query_selector_all(&selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::warn!("theme control lookup failed for {selector:?}: {}", js_error(&e));
            return 0;
        }
    };

    let mut controls = Vec::new();
    for index in 0..nodes.length() {
        let Some(control) = nodes.get(index).and_then(|node| node.dyn_ref::<Element>().cloned()) else {
            continue;
        };
        let handle = resolver.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            // Controls may be links or submit buttons.
            event.prevent_default();
            handle.toggle_theme();
        });
        if let Err(e) = control.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
            log::warn!("theme control click binding failed: {}", js_error(&e));
            continue;
        }
        on_click.forget();
        controls.push(control);
    }

    if controls.is_empty() {
        log::debug!("no theme toggle controls found");
        return 0;
    }

    sync_controls(&controls, resolver.effective_theme());
    let count = controls.len();
    resolver.subscribe(move |change| sync_controls(&controls, change.effective));
    count
}

fn sync_controls(controls: &[Element], effective: EffectiveTheme) {
    let state = ControlState::for_theme(effective);
    let attributes = [("aria-pressed", state.aria_pressed()), ("aria-label", state.label), ("title", state.title)];
    for control in controls {
        for (name, value) in attributes {
            if let Err(e) = control.set_attribute(name, value) {
                log::debug!("failed to set {name} on theme control: {}", js_error(&e));
            }
        }
    }
}

/// Re-dispatch every change as a DOM `CustomEvent` on `document` so other
/// scripts on the page can listen without holding the resolver.
pub fn forward_change_events(resolver: &ThemeResolver) -> Option<SubscriptionId> {
    let document = document()?;
    let event_name = resolver.config().event_name.clone();
    Some(resolver.subscribe(move |change| dispatch_change(&document, &event_name, change)))
}

fn dispatch_change(document: &Document, event_name: &str, change: &ThemeChange) {
    let json = match serde_json::to_string(change) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("theme change not serializable: {e}");
            return;
        }
    };
    let detail = match js_sys::JSON::parse(&json) {
        Ok(detail) => detail,
        Err(e) => {
            log::warn!("theme change detail rejected: {}", js_error(&e));
            return;
        }
    };

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(event_name, &init) {
        Ok(event) => {
            if let Err(e) = document.dispatch_event(&event) {
                log::warn!("{event_name} dispatch failed: {}", js_error(&e));
            }
        }
        Err(e) => log::warn!("{event_name} event construction failed: {}", js_error(&e)),
    }
}

fn load_config() -> ResolverConfig {
    let Some(raw) = root_element().and_then(|root| root.get_attribute(CONFIG_ATTRIBUTE)) else {
        return ResolverConfig::default();
    };
    ResolverConfig::from_json(&raw).unwrap_or_else(|e| {
        log::warn!("{e}; using default theme config");
        ResolverConfig::default()
    })
}

/// WASM entry point: build the page's resolver and wire it up.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // Another logger owns the `log` facade; say so on the console directly.
        web_sys::console::debug_1(&JsValue::from_str(&format!("theme resolver: console logger not installed: {e}")));
    }

    let config = load_config();
    let resolver = ThemeResolver::new(config.clone(), browser_capabilities(&config));
    forward_change_events(&resolver);
    let change = resolver.initialize();
    let controls = bind_toggle_controls(&resolver);
    log::info!(
        "theme resolver started: requested={} effective={} controls={controls}",
        change.requested,
        change.effective
    );

    // Page-lifetime component; installed listeners only hold weak references.
    std::mem::forget(resolver);
}
