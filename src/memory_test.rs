use super::*;

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn store_round_trips_values() {
    let store = MemoryStore::new();
    assert_eq!(store.load("k").expect("load"), None);
    store.save("k", "dark").expect("save");
    assert_eq!(store.load("k").expect("load"), Some("dark".to_owned()));
}

#[test]
fn unavailable_store_rejects_reads_and_writes() {
    let store = MemoryStore::unavailable();
    assert!(matches!(store.load("k"), Err(ThemeError::StorageUnavailable(_))));
    assert!(matches!(store.save("k", "dark"), Err(ThemeError::StorageUnavailable(_))));
    assert_eq!(store.get_raw("k"), None);
}

#[test]
fn store_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    other.save("k", "light").expect("save");
    assert_eq!(store.get_raw("k"), Some("light".to_owned()));
}

// =============================================================
// ManualSignal
// =============================================================

#[test]
fn signal_notifies_watchers_with_new_value() {
    let signal = ManualSignal::new(false);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    assert!(signal.watch(Box::new(move |dark| sink.borrow_mut().push(dark))));

    signal.set_prefers_dark(true);
    signal.set_prefers_dark(false);

    assert_eq!(*seen.borrow(), vec![true, false]);
    assert_eq!(signal.prefers_dark(), Some(false));
}

#[test]
fn unsupported_signal_refuses_watchers() {
    let signal = ManualSignal::unsupported();
    assert_eq!(signal.prefers_dark(), None);
    assert!(!signal.watch(Box::new(|_| {})));
    assert_eq!(signal.watcher_count(), 0);
}

// =============================================================
// MemoryTarget
// =============================================================

#[test]
fn target_records_writes_in_order() {
    let target = MemoryTarget::new();
    target.set_attribute(EffectiveTheme::Dark);
    target.set_attribute(EffectiveTheme::Light);
    assert_eq!(target.writes(), vec![EffectiveTheme::Dark, EffectiveTheme::Light]);
    assert_eq!(target.raw_attribute().as_deref(), Some("light"));
}

#[test]
fn target_tracks_transition_marker() {
    let target = MemoryTarget::new();
    target.set_transition_marker(true);
    assert!(target.transition_active());
    target.set_transition_marker(false);
    assert!(!target.transition_active());
}

// =============================================================
// ManualTimer
// =============================================================

#[test]
fn timer_fires_only_when_due() {
    let timer = ManualTimer::new();
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    timer.schedule(Duration::from_millis(100), Box::new(move || counter.set(counter.get() + 1)));

    timer.advance(Duration::from_millis(99));
    assert_eq!(fired.get(), 0);
    assert_eq!(timer.pending(), 1);

    timer.advance(Duration::from_millis(1));
    assert_eq!(fired.get(), 1);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn timer_runs_callbacks_in_due_order() {
    let timer = ManualTimer::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for (label, ms) in [("late", 300), ("early", 100)] {
        let sink = Rc::clone(&order);
        timer.schedule(Duration::from_millis(ms), Box::new(move || sink.borrow_mut().push(label)));
    }
    timer.advance(Duration::from_secs(1));
    assert_eq!(*order.borrow(), vec!["early", "late"]);
}

#[test]
fn timer_callback_may_schedule_more_work() {
    let timer = ManualTimer::new();
    let fired = Rc::new(Cell::new(false));
    let inner_timer = timer.clone();
    let flag = Rc::clone(&fired);
    timer.schedule(
        Duration::from_millis(10),
        Box::new(move || {
            inner_timer.schedule(Duration::ZERO, Box::new(move || flag.set(true)));
        }),
    );
    timer.advance(Duration::from_millis(10));
    assert!(fired.get());
}
