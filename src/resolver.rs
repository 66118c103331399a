//! The theme resolver: preference in, rendered theme out.
//!
//! DESIGN
//! ======
//! `ThemeResolver` is a cheap-clone handle over shared single-threaded state.
//! The page constructs exactly one and hands clones to whatever UI code needs
//! it. Callbacks it installs on the OS signal and the timer hold a `Weak`
//! reference, so dropping every handle tears the resolver down. A transition
//! window still open at that point is closed by its pending timer.
//!
//! Observers and capability calls always run with the internal `RefCell`
//! released, so an observer may call straight back into the resolver.
//!
//! TRADE-OFFS
//! ==========
//! When storage is unavailable the last explicit choice is kept in memory for
//! the rest of the page load. A reload forgets it.

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::capability::{Capabilities, ThemeTarget};
use crate::config::ResolverConfig;
use crate::error::ThemeError;
use crate::mode::{EffectiveTheme, ThemeChange, ThemeMode};

/// Whether an applied change animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Transition {
    /// Open the transition window so CSS can cross-fade.
    #[default]
    Animate,
    /// Swap immediately.
    Instant,
}

/// Handle returned by [`ThemeResolver::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&ThemeChange)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WatchState {
    Idle,
    Active,
    Unsupported,
}

struct State {
    /// Mode resolved by `initialize`.
    initial: ThemeMode,
    /// Last explicit choice this page load.
    session: Option<ThemeMode>,
    watch: WatchState,
    transition_generation: u64,
    transitioning: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

struct Inner {
    config: ResolverConfig,
    caps: Capabilities,
    state: RefCell<State>,
}

/// Resolves, applies, and tracks the page theme.
#[derive(Clone)]
pub struct ThemeResolver {
    inner: Rc<Inner>,
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("ThemeResolver")
            .field("initial", &state.initial)
            .field("session", &state.session)
            .field("watch", &state.watch)
            .field("transitioning", &state.transitioning)
            .field("observers", &state.observers.len())
            .finish_non_exhaustive()
    }
}

impl ThemeResolver {
    /// Build a resolver. Nothing touches the page until [`Self::initialize`].
    #[must_use]
    pub fn new(config: ResolverConfig, caps: Capabilities) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                caps,
                state: RefCell::new(State {
                    initial: ThemeMode::System,
                    session: None,
                    watch: WatchState::Idle,
                    transition_generation: 0,
                    transitioning: false,
                    observers: Vec::new(),
                    next_subscription: 0,
                }),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.inner.config
    }

    // --- Lifecycle ---

    /// Resolve the starting mode and render it without a transition.
    ///
    /// Order: stored preference, then the hint already on the root element,
    /// then `system` (which renders from the OS signal). Starts following OS
    /// changes when the result is `system`.
    pub fn initialize(&self) -> ThemeChange {
        let stored = self.stored_preference();
        let hint = ThemeMode::parse_lenient(self.inner.caps.target.attribute().as_deref());
        let mode = stored.or(hint).unwrap_or(ThemeMode::System);
        log::debug!("theme initialize: stored={stored:?} hint={hint:?} mode={mode}");

        self.inner.state.borrow_mut().initial = mode;
        let change = self.apply(mode, self.inner.caps.signal.prefers_dark(), Transition::Instant);
        if mode == ThemeMode::System {
            self.ensure_watching();
        }
        change
    }

    // --- Commands ---

    /// Persist `mode` as the preference and render it.
    ///
    /// Persistence failures are logged and otherwise ignored; the choice still
    /// applies for this page load.
    pub fn set_theme(&self, mode: ThemeMode, transition: Transition) -> ThemeChange {
        if let Err(e) = self.inner.caps.store.save(&self.inner.config.storage_key, mode.as_str()) {
            log::warn!("theme preference not persisted: {e}");
        }
        self.inner.state.borrow_mut().session = Some(mode);

        let change = self.apply(mode, self.inner.caps.signal.prefers_dark(), transition);
        if mode == ThemeMode::System {
            self.ensure_watching();
        }
        change
    }

    /// Parse `raw` and [`set_theme`](Self::set_theme) it.
    ///
    /// # Errors
    ///
    /// [`ThemeError::InvalidArgument`] if `raw` is not `light`, `dark` or
    /// `system`. Nothing is persisted or rendered in that case.
    pub fn set_theme_named(&self, raw: &str, transition: Transition) -> Result<ThemeChange, ThemeError> {
        let mode = raw.parse::<ThemeMode>()?;
        Ok(self.set_theme(mode, transition))
    }

    /// Flip between light and dark, pinning the result as an explicit choice.
    pub fn toggle_theme(&self) -> ThemeChange {
        let next = self.effective_theme().opposite();
        self.set_theme(next.as_mode(), Transition::Animate)
    }

    // --- Queries ---

    /// The theme on the root element, or the OS signal if the attribute is
    /// missing or malformed.
    #[must_use]
    pub fn effective_theme(&self) -> EffectiveTheme {
        self.inner
            .caps
            .target
            .attribute()
            .as_deref()
            .map(str::parse::<EffectiveTheme>)
            .and_then(Result::ok)
            .unwrap_or_else(|| EffectiveTheme::from_prefers_dark(self.inner.caps.signal.prefers_dark()))
    }

    /// The persisted preference, `None` if unset, invalid, or unreadable.
    #[must_use]
    pub fn stored_preference(&self) -> Option<ThemeMode> {
        match self.inner.caps.store.load(&self.inner.config.storage_key) {
            Ok(raw) => ThemeMode::parse_lenient(raw.as_deref()),
            Err(e) => {
                log::debug!("theme preference unreadable: {e}");
                None
            }
        }
    }

    /// The preference currently in force: stored, else this page's last
    /// choice, else what `initialize` resolved.
    #[must_use]
    pub fn requested_mode(&self) -> ThemeMode {
        let stored = self.stored_preference();
        let state = self.inner.state.borrow();
        stored.or(state.session).unwrap_or(state.initial)
    }

    /// Whether the transition marker is currently applied.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.inner.state.borrow().transitioning
    }

    // --- Observers ---

    /// Register `observer` for every applied change.
    pub fn subscribe(&self, observer: impl Fn(&ThemeChange) + 'static) -> SubscriptionId {
        let observer: Observer = Rc::new(observer);
        let mut state = self.inner.state.borrow_mut();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.inner.state.borrow_mut();
        let before = state.observers.len();
        state.observers.retain(|(sid, _)| *sid != id);
        state.observers.len() != before
    }

    // --- Internals ---

    fn apply(&self, mode: ThemeMode, prefers_dark: Option<bool>, transition: Transition) -> ThemeChange {
        let effective = mode.resolve(prefers_dark);
        if transition == Transition::Animate {
            self.begin_transition();
        }
        self.inner.caps.target.set_attribute(effective);

        let change = ThemeChange { requested: mode, effective };
        log::debug!("theme applied: requested={mode} effective={effective}");
        self.notify(&change);
        change
    }

    fn notify(&self, change: &ThemeChange) {
        let observers: Vec<Observer> = self
            .inner
            .state
            .borrow()
            .observers
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(change);
        }
    }

    fn begin_transition(&self) {
        let Some(timer) = self.inner.caps.timer.as_ref() else {
            return;
        };
        let generation = {
            let mut state = self.inner.state.borrow_mut();
            state.transition_generation += 1;
            state.transitioning = true;
            state.transition_generation
        };
        self.inner.caps.target.set_transition_marker(true);

        let weak = Rc::downgrade(&self.inner);
        let target = Rc::clone(&self.inner.caps.target);
        timer.schedule(
            self.inner.config.transition_duration(),
            Box::new(move || end_transition(&weak, &target, generation)),
        );
    }

    fn ensure_watching(&self) {
        if self.inner.state.borrow().watch != WatchState::Idle {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let installed = self
            .inner
            .caps
            .signal
            .watch(Box::new(move |prefers_dark| on_system_change(&weak, prefers_dark)));

        let watch = if installed {
            WatchState::Active
        } else {
            log::debug!("OS color-scheme notifications unavailable; auto-sync disabled");
            WatchState::Unsupported
        };
        self.inner.state.borrow_mut().watch = watch;
    }
}

fn end_transition(weak: &Weak<Inner>, target: &Rc<dyn ThemeTarget>, generation: u64) {
    // Resolver dropped mid-window: nothing can close it later.
    let Some(inner) = weak.upgrade() else {
        target.set_transition_marker(false);
        return;
    };
    {
        let mut state = inner.state.borrow_mut();
        // A newer transition restarted the window.
        if state.transition_generation != generation {
            return;
        }
        state.transitioning = false;
    }
    target.set_transition_marker(false);
}

fn on_system_change(weak: &Weak<Inner>, prefers_dark: bool) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let resolver = ThemeResolver { inner };
    if resolver.requested_mode() == ThemeMode::System {
        resolver.apply(ThemeMode::System, Some(prefers_dark), Transition::Animate);
    }
}
