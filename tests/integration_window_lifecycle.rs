use std::cell::RefCell;
use std::rc::Rc;

use desk_wm::persistence::GeometryStore;
use desk_wm::surface::HeadlessHost;
use desk_wm::{Geometry, Size, WindowEvent, WindowManager, WindowState, WmConfig};

fn desktop() -> WindowManager<HeadlessHost> {
    WindowManager::new(
        HeadlessHost::new(Size::new(800, 600)),
        WmConfig::default(),
        GeometryStore::in_memory(),
    )
}

#[test]
fn maximize_round_trip_restores_geometry() {
    let mut wm = desktop();
    let id = wm.open("notepad", "Notepad");
    let before = wm.window(&id).unwrap().geometry();

    wm.toggle_maximize(&id);
    let record = wm.window(&id).unwrap();
    assert_eq!(record.state(), WindowState::Maximized);
    assert_eq!(record.geometry(), Geometry::new(0, 0, 800, 600));
    assert_eq!(record.pre_maximize_geometry(), Some(before));

    wm.toggle_maximize(&id);
    let record = wm.window(&id).unwrap();
    assert_eq!(record.state(), WindowState::Normal);
    assert_eq!(record.geometry(), before);
    assert_eq!(record.pre_maximize_geometry(), None);
}

#[test]
fn minimize_twice_changes_nothing() {
    let mut wm = desktop();
    let a = wm.open("notepad", "Notepad");
    wm.open("paint", "Paint");
    wm.minimize(&a);
    let snapshot = {
        let r = wm.window(&a).unwrap();
        (r.state(), r.geometry(), r.z_index())
    };
    let order = wm.stacking_order();

    wm.minimize(&a);
    let r = wm.window(&a).unwrap();
    assert_eq!((r.state(), r.geometry(), r.z_index()), snapshot);
    assert_eq!(wm.stacking_order(), order);
}

#[test]
fn double_close_is_harmless() {
    let mut wm = desktop();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    wm.subscribe(move |e: &WindowEvent| sink.borrow_mut().push(e.clone()));

    let id = wm.open("notepad", "Notepad");
    wm.close(&id);
    wm.close(&id);

    let closed = events
        .borrow()
        .iter()
        .filter(|e| matches!(e, WindowEvent::Closed(_)))
        .count();
    assert_eq!(closed, 1);
    assert!(wm.window(&id).is_none());
    assert!(wm.taskbar().is_empty());
    assert_eq!(wm.host().surfaces_released(), 1);
    assert!(wm.active().is_none());
}

#[test]
fn active_window_is_always_on_top() {
    let mut wm = desktop();
    let a = wm.open("notepad", "Notepad");
    let b = wm.open("paint", "Paint");
    let c = wm.open("calc", "Calculator");

    let check = |wm: &WindowManager<HeadlessHost>| {
        let active = wm.active().cloned().unwrap();
        let top = wm
            .windows()
            .max_by_key(|r| r.z_index())
            .map(|r| r.id().clone())
            .unwrap();
        assert_eq!(active, top);
        assert_eq!(wm.stacking_order().last(), Some(&active));
    };

    check(&wm);
    wm.focus(&a);
    check(&wm);
    wm.focus(&b);
    check(&wm);
    wm.close(&b);
    wm.focus(&c);
    check(&wm);
    wm.toggle_maximize(&a);
    check(&wm);
}

#[test]
fn reopen_uses_last_persisted_geometry() {
    let mut wm = desktop();
    wm.geometry_store_mut()
        .save("paint", Geometry::new(900, -40, 300, 200))
        .unwrap();

    let id = wm.open("paint", "Paint");
    assert_eq!(wm.window(&id).unwrap().geometry(), Geometry::new(500, 0, 300, 200));
    // Seeding does not rewrite the store.
    assert_eq!(
        wm.geometry_store().load("paint").unwrap(),
        Some(Geometry::new(900, -40, 300, 200))
    );
}

#[test]
fn restore_returns_minimized_maximized_window_full_screen() {
    let mut wm = desktop();
    let id = wm.open("notepad", "Notepad");
    wm.toggle_maximize(&id);
    wm.minimize(&id);
    assert!(wm.active().is_none());

    wm.restore(&id);
    let record = wm.window(&id).unwrap();
    assert_eq!(record.state(), WindowState::Maximized);
    assert_eq!(record.geometry(), Geometry::new(0, 0, 800, 600));
    assert_eq!(wm.active(), Some(&id));
}

#[test]
fn ids_are_unique_per_open() {
    let mut wm = desktop();
    let a = wm.open("notepad", "Notepad");
    let b = wm.open("notepad", "Notepad");
    assert_ne!(a, b);
    assert_eq!(wm.taskbar().len(), 2);
}
