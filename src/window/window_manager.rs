use std::time::Instant;

use tracing::{debug, trace, warn};

use super::{ClassId, WindowId, WindowRecord, WindowRegistry, WindowState};
use crate::chrome::{ControlButton, HitRegion};
use crate::config::WmConfig;
use crate::error::WmError;
use crate::events::{EventBus, SubscriptionId, WindowEvent, WindowObserver};
use crate::focus::FocusTracker;
use crate::geometry::{Geometry, Point, cascade_position, clamp_geometry, maximized};
use crate::interaction::{
    Gesture, GestureBounds, GestureKind, InteractionController, PointerButton, PointerEvent,
};
use crate::persistence::GeometryStore;
use crate::surface::{Host, Surface};
use crate::taskbar::{EntryId, Taskbar, TaskbarAction};

/// Owns every open window and the state around them: stacking order, the
/// active window, taskbar entries, persisted geometry and the pointer
/// gesture in flight.
///
/// All operations taking a [`WindowId`] are no-ops for ids that are unknown
/// or already closed.
pub struct WindowManager<H: Host> {
    host: H,
    config: WmConfig,
    registry: WindowRegistry<H::Surface>,
    focus: FocusTracker,
    taskbar: Taskbar,
    bus: EventBus,
    store: GeometryStore,
    interaction: InteractionController,
}

impl<H: Host> WindowManager<H> {
    pub fn new(host: H, config: WmConfig, store: GeometryStore) -> Self {
        let focus = FocusTracker::new(config.z_index_base);
        Self {
            host,
            config,
            registry: WindowRegistry::new(),
            focus,
            taskbar: Taskbar::new(),
            bus: EventBus::new(),
            store,
            interaction: InteractionController::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn registry(&self) -> &WindowRegistry<H::Surface> {
        &self.registry
    }

    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord<H::Surface>> {
        self.registry.get(id)
    }

    pub fn window_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord<H::Surface>> {
        self.registry.get_mut(id)
    }

    /// Windows in open order.
    pub fn windows(&self) -> impl Iterator<Item = &WindowRecord<H::Surface>> {
        self.registry.iter()
    }

    /// Visible windows from bottom to top.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        self.registry.stacking_order()
    }

    pub fn active(&self) -> Option<&WindowId> {
        self.focus.active()
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn geometry_store(&self) -> &GeometryStore {
        &self.store
    }

    pub fn geometry_store_mut(&mut self) -> &mut GeometryStore {
        &mut self.store
    }

    /// Gesture currently holding the pointer, if any.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.interaction.active()
    }

    pub fn subscribe(&mut self, observer: impl WindowObserver + 'static) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Open a window of `class_id` and focus it. Geometry is seeded from the
    /// store when one was saved for the class, otherwise from the cascade.
    pub fn open(&mut self, class_id: impl Into<ClassId>, title: impl Into<String>) -> WindowId {
        let class_id = class_id.into();
        let title = title.into();
        let id = self.registry.allocate_id(&class_id);
        let mut surface = self.host.create_surface(&class_id, &title);
        let viewport = self.host.viewport();

        let geometry = match self.stored_geometry(&class_id) {
            Some(stored) => clamp_geometry(stored, viewport),
            None => {
                let slot = self.registry.take_cascade_slot();
                let position = cascade_position(
                    slot,
                    self.config.cascade_origin,
                    self.config.cascade_step,
                    self.config.cascade_wrap,
                );
                let size = surface
                    .content_size()
                    .unwrap_or_else(|| self.config.default_size());
                clamp_geometry(
                    Geometry::new(position.left, position.top, size.width, size.height),
                    viewport,
                )
            }
        };
        surface.set_geometry(geometry);
        surface.set_visible(true);

        self.registry.insert(WindowRecord {
            id: id.clone(),
            class_id,
            title: title.clone(),
            surface,
            geometry,
            z_index: 0,
            state: WindowState::Normal,
            resume_state: WindowState::Normal,
            pre_maximize: None,
            taskbar_entry: None,
        });
        debug!(window_id = %id, ?geometry, "opened window");

        self.emit(WindowEvent::Opened {
            id: id.clone(),
            title,
        });
        let entry = self.taskbar.entry_for(&id).map(|e| e.id());
        if let Some(record) = self.registry.get_mut(&id) {
            record.taskbar_entry = entry;
        }
        recover(self.raise(&id));
        id
    }

    /// Bring `id` to the front and make it active, restoring it first when
    /// minimized.
    pub fn focus(&mut self, id: &WindowId) {
        recover(self.try_focus(id));
    }

    pub fn minimize(&mut self, id: &WindowId) {
        recover(self.try_minimize(id));
    }

    /// Return a minimized window to the state it had before minimizing.
    pub fn restore(&mut self, id: &WindowId) {
        recover(self.try_restore(id));
    }

    pub fn toggle_maximize(&mut self, id: &WindowId) {
        recover(self.try_toggle_maximize(id));
    }

    pub fn close(&mut self, id: &WindowId) {
        recover(self.try_close(id));
    }

    pub fn set_title(&mut self, id: &WindowId, title: impl Into<String>) {
        let title = title.into();
        recover(self.try_set_title(id, title));
    }

    /// Taskbar click: restore a minimized window, minimize the active one,
    /// focus anything else.
    pub fn click_taskbar_entry(&mut self, entry: EntryId) {
        let Some(id) = self.taskbar.entry(entry).map(|e| e.window().clone()) else {
            trace!(?entry, "click on stale taskbar entry ignored");
            return;
        };
        let Some(state) = self.registry.get(&id).map(|r| r.state) else {
            trace!(window_id = %id, "taskbar entry without window ignored");
            return;
        };
        match TaskbarAction::for_window(state, self.focus.is_active(&id)) {
            TaskbarAction::Restore => self.restore(&id),
            TaskbarAction::Minimize => self.minimize(&id),
            TaskbarAction::Focus => self.focus(&id),
        }
    }

    /// Focus the next (or previous) visible window in stacking order.
    pub fn cycle_focus(&mut self, forward: bool) {
        let order = self.registry.stacking_order();
        if let Some(target) = self.focus.cycle_target(&order, forward) {
            self.focus(&target);
        }
    }

    pub fn close_active(&mut self) {
        if let Some(id) = self.focus.active().cloned() {
            self.close(&id);
        }
    }

    /// Minimize every visible window, or restore them all when none is
    /// visible.
    pub fn toggle_show_desktop(&mut self) {
        let ids = self.registry.ids();
        let any_visible = self.registry.iter().any(|r| !r.is_minimized());
        debug!(minimize = any_visible, windows = ids.len(), "show desktop");
        for id in &ids {
            if any_visible {
                self.minimize(id);
            } else {
                self.restore(id);
            }
        }
    }

    /// Re-fit windows after the host viewport changed size. Maximized
    /// windows stretch to the new viewport and normal ones are clamped back
    /// inside it. Minimized windows are fitted when restored.
    pub fn viewport_changed(&mut self) {
        let viewport = self.host.viewport();
        debug!(?viewport, "viewport changed");
        for record in self.registry.iter_mut() {
            let fitted = match record.state {
                WindowState::Maximized => maximized(viewport),
                WindowState::Normal => clamp_geometry(record.geometry, viewport),
                WindowState::Minimized => continue,
            };
            if fitted != record.geometry {
                record.geometry = fitted;
                record.surface.set_geometry(fitted);
            }
        }
    }

    /// Feed one pointer event. Returns `true` when the event landed on a
    /// window or belonged to a gesture.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => {
                let Some(gesture) = self.interaction.active().cloned() else {
                    return false;
                };
                recover(self.apply_gesture(&gesture, position));
                true
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => match self.interaction.end() {
                Some(gesture) => {
                    self.finish_gesture(&gesture);
                    true
                }
                None => false,
            },
            PointerEvent::Leave => self.interaction.is_active(),
        }
    }

    fn pointer_down(&mut self, position: Point, button: PointerButton) -> bool {
        // A gesture still held here lost its up event.
        if let Some(stale) = self.interaction.end() {
            self.finish_gesture(&stale);
        }
        let Some(record) = self.registry.topmost_at(position) else {
            self.interaction.forget_title_press();
            return false;
        };
        let id = record.id.clone();
        let geometry = record.geometry;
        let is_maximized = record.is_maximized();
        let region = self
            .config
            .chrome
            .hit_test(geometry, position, !is_maximized);

        recover(self.raise(&id));
        if button != PointerButton::Primary {
            return true;
        }

        match region {
            Some(HitRegion::Button(button)) => {
                self.interaction.forget_title_press();
                match button {
                    ControlButton::Minimize => self.minimize(&id),
                    ControlButton::Maximize => self.toggle_maximize(&id),
                    ControlButton::Close => self.close(&id),
                }
            }
            Some(HitRegion::TitleBar) => {
                let double_click = self.config.double_click();
                if self.interaction.title_press(&id, Instant::now(), double_click) {
                    self.toggle_maximize(&id);
                } else if is_maximized {
                    trace!(window_id = %id, "maximized window does not drag");
                } else {
                    self.begin_gesture(id, GestureKind::Drag, position, geometry);
                }
            }
            Some(HitRegion::Resize(edge)) => {
                self.interaction.forget_title_press();
                self.begin_gesture(id, GestureKind::Resize(edge), position, geometry);
            }
            Some(HitRegion::Body) | None => self.interaction.forget_title_press(),
        }
        true
    }

    fn begin_gesture(
        &mut self,
        window: WindowId,
        kind: GestureKind,
        pointer_start: Point,
        start_geometry: Geometry,
    ) {
        let gesture = Gesture {
            window,
            kind,
            pointer_start,
            start_geometry,
        };
        if let Some(stale) = self.interaction.begin(gesture) {
            self.finish_gesture(&stale);
        }
    }

    fn apply_gesture(&mut self, gesture: &Gesture, pointer: Point) -> Result<(), WmError> {
        let bounds = GestureBounds {
            viewport: self.host.viewport(),
            min_size: self.config.min_size(),
            snap_threshold: self.config.snap_threshold,
        };
        let record = self.registry.require_mut(&gesture.window)?;
        if record.state != WindowState::Normal {
            return Err(WmError::InvalidTransition {
                id: gesture.window.clone(),
                op: match gesture.kind {
                    GestureKind::Drag => "drag",
                    GestureKind::Resize(_) => "resize",
                },
                state: record.state,
            });
        }
        let next = gesture.geometry_at(pointer, bounds);
        if next != record.geometry {
            record.geometry = next;
            record.surface.set_geometry(next);
        }
        Ok(())
    }

    /// Persist the geometry a released gesture left behind.
    fn finish_gesture(&mut self, gesture: &Gesture) {
        recover(self.persist_geometry(&gesture.window));
    }

    fn persist_geometry(&mut self, id: &WindowId) -> Result<(), WmError> {
        let record = self.registry.require(id)?;
        if record.state != WindowState::Normal {
            return Err(WmError::InvalidTransition {
                id: id.clone(),
                op: "persist",
                state: record.state,
            });
        }
        self.store.save(record.class_id.as_str(), record.geometry)?;
        debug!(window_id = %id, geometry = ?record.geometry, "persisted geometry");
        Ok(())
    }

    fn stored_geometry(&self, class_id: &ClassId) -> Option<Geometry> {
        match self.store.load(class_id.as_str()) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(class_id = %class_id, error = %err, "stored geometry unavailable, using defaults");
                None
            }
        }
    }

    fn try_focus(&mut self, id: &WindowId) -> Result<(), WmError> {
        if self.registry.require(id)?.is_minimized() {
            return self.try_restore(id);
        }
        self.raise(id)
    }

    /// Assign a fresh z-index and make `id` active, blurring the previous
    /// active window first.
    fn raise(&mut self, id: &WindowId) -> Result<(), WmError> {
        let record = self.registry.require_mut(id)?;
        let change = self.focus.bring_to_front(id, &mut record.z_index);
        record.surface.set_active(true);
        debug!(window_id = %id, z_index = change.z_index, "focused window");
        if let Some(previous) = change.blurred {
            if let Some(prev) = self.registry.get_mut(&previous) {
                prev.surface.set_active(false);
            }
            self.emit(WindowEvent::Blurred(previous));
        }
        self.emit(WindowEvent::Focused(change.focused));
        Ok(())
    }

    fn try_minimize(&mut self, id: &WindowId) -> Result<(), WmError> {
        let record = self.registry.require_mut(id)?;
        if record.is_minimized() {
            return Err(WmError::InvalidTransition {
                id: id.clone(),
                op: "minimize",
                state: record.state,
            });
        }
        record.resume_state = record.state;
        record.state = WindowState::Minimized;
        record.surface.set_visible(false);
        debug!(window_id = %id, "minimized window");

        self.interaction.end_for(id);
        self.emit(WindowEvent::StateChanged {
            id: id.clone(),
            state: WindowState::Minimized,
        });
        self.blur(id);
        Ok(())
    }

    fn try_restore(&mut self, id: &WindowId) -> Result<(), WmError> {
        let viewport = self.host.viewport();
        let record = self.registry.require_mut(id)?;
        if !record.is_minimized() {
            return Err(WmError::InvalidTransition {
                id: id.clone(),
                op: "restore",
                state: record.state,
            });
        }
        record.state = std::mem::take(&mut record.resume_state);
        let fitted = match record.state {
            WindowState::Maximized => maximized(viewport),
            _ => clamp_geometry(record.geometry, viewport),
        };
        record.geometry = fitted;
        record.surface.set_geometry(fitted);
        record.surface.set_visible(true);
        let state = record.state;
        debug!(window_id = %id, ?state, "restored window");

        self.emit(WindowEvent::StateChanged {
            id: id.clone(),
            state,
        });
        self.raise(id)
    }

    fn try_toggle_maximize(&mut self, id: &WindowId) -> Result<(), WmError> {
        let viewport = self.host.viewport();
        let record = self.registry.require_mut(id)?;
        match record.state {
            WindowState::Minimized => {
                return Err(WmError::InvalidTransition {
                    id: id.clone(),
                    op: "maximize",
                    state: record.state,
                });
            }
            WindowState::Normal => {
                record.pre_maximize = Some(record.geometry);
                record.geometry = maximized(viewport);
                record.state = WindowState::Maximized;
            }
            WindowState::Maximized => {
                let previous = record.pre_maximize.take().unwrap_or(record.geometry);
                record.geometry = clamp_geometry(previous, viewport);
                record.state = WindowState::Normal;
            }
        }
        record.surface.set_geometry(record.geometry);
        let state = record.state;
        debug!(window_id = %id, ?state, "toggled maximize");

        self.interaction.end_for(id);
        self.emit(WindowEvent::StateChanged {
            id: id.clone(),
            state,
        });
        self.raise(id)
    }

    fn try_close(&mut self, id: &WindowId) -> Result<(), WmError> {
        let mut record = self
            .registry
            .remove(id)
            .ok_or_else(|| WmError::UnknownWindow(id.clone()))?;
        debug!(window_id = %id, "closing window");
        self.interaction.end_for(id);
        record.surface.release();
        self.blur(id);
        self.emit(WindowEvent::Closed(id.clone()));
        Ok(())
    }

    fn try_set_title(&mut self, id: &WindowId, title: String) -> Result<(), WmError> {
        let record = self.registry.require_mut(id)?;
        record.surface.set_title(&title);
        record.title.clone_from(&title);
        self.emit(WindowEvent::Retitled {
            id: id.clone(),
            title,
        });
        Ok(())
    }

    fn blur(&mut self, id: &WindowId) {
        if let Some(blurred) = self.focus.blur(id) {
            if let Some(record) = self.registry.get_mut(&blurred) {
                record.surface.set_active(false);
            }
            debug!(window_id = %blurred, "blurred window");
            self.emit(WindowEvent::Blurred(blurred));
        }
    }

    /// The taskbar hears every notification before external observers.
    fn emit(&mut self, event: WindowEvent) {
        trace!(?event, "window event");
        self.taskbar.on_window_event(&event);
        self.bus.emit(&event);
    }
}

/// Single recovery point for the window manager's errors: nothing here is
/// worth failing the shell over.
fn recover(result: Result<(), WmError>) {
    match result {
        Ok(()) => {}
        Err(WmError::Storage(err)) => warn!(error = %err, "geometry storage failed"),
        Err(err) => trace!(error = %err, "ignored window operation"),
    }
}
