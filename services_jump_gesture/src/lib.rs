//! # Jump Gesture
//!
//! Hold-modifier gesture over the jump overlay, in the manner of
//! Alt+Tab: hold Ctrl, tap J to open and cycle, release Ctrl to jump.
//!
//! ## Philosophy
//!
//! - **Explicit context**: Every component the gesture drives is passed in
//!   through [`JumpContext`]; the interpreter owns only the held flag
//! - **Events in delivery order**: Each event is handled to completion
//!   before the next; nothing is queued or deferred
//! - **Abandon anywhere**: Blur and outside clicks end a gesture without
//!   jumping
//!
//! ## Non-Goals
//!
//! - Key repeat timing (repeats are treated as fresh presses)
//! - Text input while the overlay is open

pub mod settings;

pub use settings::{GestureKey, GestureSettings, HoldModifier};

use input_types::{InputEvent, KeyEvent, PointerEvent, PointerKind, WindowEvent};
use jump_types::{JumpHost, Point};
use services_jump_commands::CommandDispatcher;
use services_jump_overlay::{build_snapshot, OverlayController, OverlayHit};
use services_recency::RecencyTracker;
use tracing::{debug, instrument, trace};

/// Whether the host should still apply its default handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The gesture handled the event; suppress default handling
    Consumed,
    /// Not handled; let the host process it normally
    PassThrough,
}

impl EventDisposition {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Components a gesture event may touch
pub struct JumpContext<'a, H: JumpHost + ?Sized> {
    pub host: &'a mut H,
    pub recency: &'a mut RecencyTracker,
    pub overlay: &'a mut OverlayController,
    pub commands: &'a CommandDispatcher,
}

/// Hold-key gesture state machine
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    settings: GestureSettings,
    modifier_held: bool,
}

impl GestureInterpreter {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            modifier_held: false,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn is_modifier_held(&self) -> bool {
        self.modifier_held
    }

    /// Handles one host event
    #[instrument(level = "trace", skip(self, ctx))]
    pub fn handle_event<H: JumpHost + ?Sized>(
        &mut self,
        event: &InputEvent,
        ctx: &mut JumpContext<'_, H>,
    ) -> EventDisposition {
        match event {
            InputEvent::Key(key) => self.handle_key(key, ctx),
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer, ctx),
            InputEvent::Window(WindowEvent::Blur) => {
                if self.modifier_held {
                    debug!("window blurred, releasing hold");
                }
                self.modifier_held = false;
                EventDisposition::PassThrough
            }
            InputEvent::Window(WindowEvent::Focus) => EventDisposition::PassThrough,
        }
    }

    fn handle_key<H: JumpHost + ?Sized>(
        &mut self,
        key: &KeyEvent,
        ctx: &mut JumpContext<'_, H>,
    ) -> EventDisposition {
        if self.settings.hold.is_key(key.code) {
            return self.handle_hold_key(key, ctx);
        }
        if !self.modifier_held || !key.is_down() {
            return EventDisposition::PassThrough;
        }

        match self.settings.action_for(key) {
            Some(GestureKey::Trigger) => {
                if !ctx.overlay.show(&*ctx.host, ctx.recency) {
                    ctx.overlay.select_next();
                }
                EventDisposition::Consumed
            }
            Some(action) if ctx.overlay.is_open() => {
                match action {
                    GestureKey::Previous => ctx.overlay.select_prev(),
                    GestureKey::Next => ctx.overlay.select_next(),
                    _ => ctx.overlay.hide(),
                }
                EventDisposition::Consumed
            }
            _ => self.handle_command_key(key, ctx),
        }
    }

    fn handle_hold_key<H: JumpHost + ?Sized>(
        &mut self,
        key: &KeyEvent,
        ctx: &mut JumpContext<'_, H>,
    ) -> EventDisposition {
        if key.is_down() {
            self.modifier_held = true;
            return EventDisposition::PassThrough;
        }

        self.modifier_held = false;
        match ctx.overlay.commit_jump(&mut *ctx.host, ctx.recency) {
            Some(_) => EventDisposition::Consumed,
            None => EventDisposition::PassThrough,
        }
    }

    /// Runs a bound command on the selected document and re-renders
    ///
    /// The previous selection index is kept, clamped to the new last row.
    fn handle_command_key<H: JumpHost + ?Sized>(
        &mut self,
        key: &KeyEvent,
        ctx: &mut JumpContext<'_, H>,
    ) -> EventDisposition {
        if !ctx.overlay.is_open() {
            return EventDisposition::PassThrough;
        }
        let Some(command) = ctx.commands.command_for(key, self.settings.hold.flag()) else {
            trace!(key = %key.code, "unbound key during gesture");
            return EventDisposition::PassThrough;
        };
        let (Some(index), Some(document)) = (
            ctx.overlay.selected_index(),
            ctx.overlay.selected_document().map(|doc| doc.id.clone()),
        ) else {
            return EventDisposition::PassThrough;
        };

        ctx.commands.invoke(&mut *ctx.host, command, &document);

        let snapshot = build_snapshot(&*ctx.host, ctx.recency);
        ctx.recency.retain(|id| snapshot.contains(id));
        if snapshot.is_empty() {
            ctx.overlay.hide();
        } else {
            ctx.overlay.refresh(&*ctx.host, ctx.recency);
            ctx.overlay.select_by_index(index.min(snapshot.len() - 1));
        }
        EventDisposition::Consumed
    }

    fn handle_pointer<H: JumpHost + ?Sized>(
        &mut self,
        pointer: &PointerEvent,
        ctx: &mut JumpContext<'_, H>,
    ) -> EventDisposition {
        if pointer.kind != PointerKind::Down || !ctx.overlay.is_open() {
            return EventDisposition::PassThrough;
        }

        match ctx.overlay.hit_test(Point::new(pointer.x, pointer.y)) {
            OverlayHit::Row(index) => {
                ctx.overlay.select_by_index(index);
                ctx.overlay.commit_jump(&mut *ctx.host, ctx.recency);
                EventDisposition::Consumed
            }
            OverlayHit::Chrome => EventDisposition::Consumed,
            OverlayHit::Outside => {
                debug!("click outside overlay");
                ctx.overlay.hide();
                EventDisposition::PassThrough
            }
        }
    }
}
