// input.rs - Pointer and touch normalisation
//
// The host forwards raw mouse/touch events in page coordinates. The adapter
// keeps track of which event kinds are currently bound (mirroring the
// listeners a DOM element would have attached), converts page coordinates to
// surface pixels and reports start/move/end gestures to a `GestureSink`.
// Events of a kind that is not bound are dropped, so transient listeners can
// never outlive the gesture that attached them.

use tracing::trace;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raw event kinds delivered by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl EventKind {
    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// One raw pointer event. `touches` holds the active touch points, if any;
/// the first one takes precedence over `client`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub client: Point,
    pub touches: Vec<Point>,
}

impl PointerEvent {
    pub fn mouse(kind: EventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            client: Point::new(x, y),
            touches: Vec::new(),
        }
    }

    pub fn touch(kind: EventKind, touches: Vec<Point>) -> Self {
        Self {
            kind,
            client: Point::default(),
            touches,
        }
    }

    /// Page position of the event, first touch first
    pub fn position(&self) -> Point {
        self.touches.first().copied().unwrap_or(self.client)
    }
}

/// Where the surface sits on the page and how large it is
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Page position of the surface's top-left corner
    pub left: f32,
    pub top: f32,
    /// Displayed (CSS) width
    pub display_width: f32,
    /// Logical pixel size
    pub width: u32,
    pub height: u32,
}

impl Layout {
    /// A surface displayed at its logical size with its origin at the page origin
    pub fn unscaled(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: width as f32,
            width,
            height,
        }
    }

    /// Displayed width over logical width, 1 when either is degenerate
    pub fn scale(&self) -> f32 {
        if self.width == 0 || !(self.display_width > 0.0) {
            return 1.0;
        }
        self.display_width / self.width as f32
    }

    pub fn to_local(&self, p: Point) -> Point {
        let s = self.scale();
        Point::new((p.x - self.left) / s, (p.y - self.top) / s)
    }

    /// Strictly inside the logical bounds
    pub fn contains(&self, p: Point) -> bool {
        p.x > 0.0 && p.x < self.width as f32 && p.y > 0.0 && p.y < self.height as f32
    }
}

/// Per-move data, all in surface pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    pub position: Point,
    /// Current minus previous position
    pub delta: Point,
    pub midpoint: Point,
    pub distance: f32,
}

/// Receives normalised gestures
pub trait GestureSink {
    fn on_start(&mut self, _position: Point) {}
    fn on_move(&mut self, _movement: Movement) {}
    fn on_end(&mut self, _position: Point) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOptions {
    /// Leaving the surface while dragging counts as a release
    pub cancel_on_leave: bool,
    /// Track motion without a press
    pub auto_track: bool,
}

#[derive(Clone, Debug)]
pub struct InputAdapter {
    opts: InputOptions,
    layout: Layout,
    bound: u8,
    last: Point,
    active: bool,
}

impl InputAdapter {
    pub fn new(opts: InputOptions, layout: Layout) -> Self {
        Self {
            opts,
            layout,
            bound: 0,
            last: Point::default(),
            active: false,
        }
    }

    pub fn options(&self) -> InputOptions {
        self.opts
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_bound(&self, kind: EventKind) -> bool {
        self.bound & kind.bit() != 0
    }

    /// Bind the persistent listeners
    pub fn start(&mut self) {
        if self.opts.auto_track {
            self.bind(EventKind::MouseMove);
        } else {
            self.bind(EventKind::MouseDown);
        }
        self.bind(EventKind::TouchStart);
    }

    /// Unbind everything and forget any gesture in progress
    pub fn stop(&mut self) {
        self.bound = 0;
        self.active = false;
    }

    /// Route one raw event. Returns false when no listener is bound for it.
    pub fn dispatch(&mut self, event: &PointerEvent, sink: &mut impl GestureSink) -> bool {
        if !self.is_bound(event.kind) {
            return false;
        }
        let p = event.position();
        match event.kind {
            EventKind::MouseDown | EventKind::TouchStart => self.input_start(p, sink),
            EventKind::MouseMove | EventKind::TouchMove => self.input_moved(p, sink),
            EventKind::MouseUp | EventKind::MouseLeave | EventKind::TouchEnd => {
                self.input_end(p, sink)
            }
        }
        true
    }

    fn input_start(&mut self, p: Point, sink: &mut impl GestureSink) {
        self.last = p;
        self.active = true;

        let local = self.layout.to_local(p);
        if self.layout.contains(local) {
            sink.on_start(local);
        }

        self.bind(EventKind::TouchMove);
        self.bind(EventKind::TouchEnd);
        if !self.opts.auto_track {
            self.bind(EventKind::MouseMove);
            self.bind(EventKind::MouseUp);
            if self.opts.cancel_on_leave {
                self.bind(EventKind::MouseLeave);
            }
        }
    }

    fn input_moved(&mut self, p: Point, sink: &mut impl GestureSink) {
        let local = self.layout.to_local(p);
        let inside = self.layout.contains(local);

        if !self.active {
            // No press preceded this move; it starts the gesture where it is
            self.last = p;
            if inside {
                trace!(x = local.x, y = local.y, "synthetic gesture start");
                sink.on_start(local);
            }
        }

        if inside {
            let s = self.layout.scale();
            let (dx, dy) = (p.x - self.last.x, p.y - self.last.y);
            let mid = Point::new((p.x + self.last.x) / 2.0, (p.y + self.last.y) / 2.0);
            sink.on_move(Movement {
                position: local,
                delta: Point::new(dx / s, dy / s),
                midpoint: self.layout.to_local(mid),
                distance: (dx * dx + dy * dy).sqrt() / s,
            });
        }

        if self.opts.auto_track && self.opts.cancel_on_leave {
            self.bind(EventKind::MouseLeave);
        }

        self.last = p;
        self.active = true;
    }

    fn input_end(&mut self, p: Point, sink: &mut impl GestureSink) {
        let local = self.layout.to_local(p);
        if self.opts.cancel_on_leave || self.layout.contains(local) {
            sink.on_end(local);
        }

        self.unbind(EventKind::TouchMove);
        self.unbind(EventKind::TouchEnd);
        if !self.opts.auto_track {
            self.unbind(EventKind::MouseMove);
            self.unbind(EventKind::MouseUp);
        }
        if self.opts.cancel_on_leave {
            self.unbind(EventKind::MouseLeave);
        }

        self.last = p;
        self.active = false;
    }

    #[inline]
    fn bind(&mut self, kind: EventKind) {
        self.bound |= kind.bit();
    }

    #[inline]
    fn unbind(&mut self, kind: EventKind) {
        self.bound &= !kind.bit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        starts: Vec<Point>,
        moves: Vec<Movement>,
        ends: Vec<Point>,
    }

    impl GestureSink for Log {
        fn on_start(&mut self, p: Point) {
            self.starts.push(p);
        }
        fn on_move(&mut self, m: Movement) {
            self.moves.push(m);
        }
        fn on_end(&mut self, p: Point) {
            self.ends.push(p);
        }
    }

    fn drag_adapter(cancel_on_leave: bool) -> InputAdapter {
        let mut a = InputAdapter::new(
            InputOptions { cancel_on_leave, auto_track: false },
            Layout::unscaled(100, 50),
        );
        a.start();
        a
    }

    fn mouse(kind: EventKind, x: f32, y: f32) -> PointerEvent {
        PointerEvent::mouse(kind, x, y)
    }

    #[test]
    fn press_drag_release_emits_all_three() {
        let mut a = drag_adapter(false);
        let mut log = Log::default();

        assert!(!a.dispatch(&mouse(EventKind::MouseMove, 10.0, 10.0), &mut log));
        assert!(a.dispatch(&mouse(EventKind::MouseDown, 10.0, 10.0), &mut log));
        a.dispatch(&mouse(EventKind::MouseMove, 13.0, 14.0), &mut log);
        a.dispatch(&mouse(EventKind::MouseUp, 13.0, 14.0), &mut log);

        assert_eq!(log.starts, vec![Point::new(10.0, 10.0)]);
        assert_eq!(log.moves.len(), 1);
        let m = log.moves[0];
        assert_eq!(m.position, Point::new(13.0, 14.0));
        assert_eq!(m.delta, Point::new(3.0, 4.0));
        assert_eq!(m.midpoint, Point::new(11.5, 12.0));
        assert_eq!(m.distance, 5.0);
        assert_eq!(log.ends, vec![Point::new(13.0, 14.0)]);
    }

    #[test]
    fn transient_listeners_are_released_on_end() {
        let mut a = drag_adapter(true);
        let mut log = Log::default();

        a.dispatch(&mouse(EventKind::MouseDown, 5.0, 5.0), &mut log);
        assert!(a.is_bound(EventKind::MouseMove));
        assert!(a.is_bound(EventKind::MouseUp));
        assert!(a.is_bound(EventKind::MouseLeave));
        assert!(a.is_bound(EventKind::TouchMove));

        a.dispatch(&mouse(EventKind::MouseUp, 5.0, 5.0), &mut log);
        for kind in [
            EventKind::MouseMove,
            EventKind::MouseUp,
            EventKind::MouseLeave,
            EventKind::TouchMove,
            EventKind::TouchEnd,
        ] {
            assert!(!a.is_bound(kind), "{kind:?} still bound");
        }
        assert!(a.is_bound(EventKind::MouseDown));
        assert!(a.is_bound(EventKind::TouchStart));

        // Moves after release are ignored
        assert!(!a.dispatch(&mouse(EventKind::MouseMove, 6.0, 6.0), &mut log));
        assert!(log.moves.is_empty());
    }

    #[test]
    fn moves_outside_bounds_are_dropped() {
        let mut a = drag_adapter(false);
        let mut log = Log::default();

        a.dispatch(&mouse(EventKind::MouseDown, 50.0, 25.0), &mut log);
        for (x, y) in [(-1.0, 10.0), (100.0, 10.0), (150.0, 10.0), (10.0, 0.0), (10.0, 50.0)] {
            a.dispatch(&mouse(EventKind::MouseMove, x, y), &mut log);
        }
        assert!(log.moves.is_empty());
    }

    #[test]
    fn release_outside_only_reported_with_cancel_on_leave() {
        let mut log = Log::default();
        let mut a = drag_adapter(false);
        a.dispatch(&mouse(EventKind::MouseDown, 5.0, 5.0), &mut log);
        a.dispatch(&mouse(EventKind::MouseUp, 500.0, 5.0), &mut log);
        assert!(log.ends.is_empty());

        let mut a = drag_adapter(true);
        a.dispatch(&mouse(EventKind::MouseDown, 5.0, 5.0), &mut log);
        a.dispatch(&mouse(EventKind::MouseLeave, 500.0, 5.0), &mut log);
        assert_eq!(log.ends, vec![Point::new(500.0, 5.0)]);
    }

    #[test]
    fn press_outside_bounds_binds_but_does_not_report() {
        let mut a = drag_adapter(false);
        let mut log = Log::default();
        a.dispatch(&mouse(EventKind::MouseDown, 0.0, 5.0), &mut log);
        assert!(log.starts.is_empty());
        assert!(a.is_active());
        assert!(a.is_bound(EventKind::MouseUp));
    }

    #[test]
    fn auto_track_synthesises_start_on_first_move() {
        let mut a = InputAdapter::new(
            InputOptions { cancel_on_leave: true, auto_track: true },
            Layout::unscaled(100, 100),
        );
        a.start();
        let mut log = Log::default();

        a.dispatch(&mouse(EventKind::MouseMove, 20.0, 20.0), &mut log);
        assert_eq!(log.starts, vec![Point::new(20.0, 20.0)]);
        assert_eq!(log.moves.len(), 1);
        assert_eq!(log.moves[0].distance, 0.0);
        assert!(a.is_bound(EventKind::MouseLeave));

        a.dispatch(&mouse(EventKind::MouseMove, 30.0, 20.0), &mut log);
        assert_eq!(log.starts.len(), 1);
        assert_eq!(log.moves[1].distance, 10.0);

        a.dispatch(&mouse(EventKind::MouseLeave, 120.0, 20.0), &mut log);
        assert_eq!(log.ends.len(), 1);
        assert!(!a.is_active());
        // Move stays globally bound in auto-track mode
        assert!(a.is_bound(EventKind::MouseMove));

        a.dispatch(&mouse(EventKind::MouseMove, 40.0, 40.0), &mut log);
        assert_eq!(log.starts.len(), 2);
    }

    #[test]
    fn scaled_display_divides_by_scale() {
        let layout = Layout {
            left: 10.0,
            top: 20.0,
            display_width: 200.0,
            width: 100,
            height: 100,
        };
        let mut a = InputAdapter::new(InputOptions::default(), layout);
        a.start();
        let mut log = Log::default();

        a.dispatch(&mouse(EventKind::MouseDown, 30.0, 40.0), &mut log);
        a.dispatch(&mouse(EventKind::MouseMove, 36.0, 48.0), &mut log);

        assert_eq!(log.starts, vec![Point::new(10.0, 10.0)]);
        let m = log.moves[0];
        assert_eq!(m.position, Point::new(13.0, 14.0));
        assert_eq!(m.delta, Point::new(3.0, 4.0));
        assert_eq!(m.midpoint, Point::new(11.5, 12.0));
        assert_eq!(m.distance, 5.0);
    }

    #[test]
    fn first_touch_wins() {
        let mut a = drag_adapter(false);
        let mut log = Log::default();
        let touches = vec![Point::new(7.0, 8.0), Point::new(60.0, 30.0)];
        a.dispatch(&PointerEvent::touch(EventKind::TouchStart, touches), &mut log);
        assert_eq!(log.starts, vec![Point::new(7.0, 8.0)]);

        a.dispatch(
            &PointerEvent::touch(EventKind::TouchMove, vec![Point::new(10.0, 12.0)]),
            &mut log,
        );
        assert_eq!(log.moves[0].distance, 5.0);

        // touchend carries no touches; fall back to the client position
        let mut end = PointerEvent::touch(EventKind::TouchEnd, Vec::new());
        end.client = Point::new(10.0, 12.0);
        a.dispatch(&end, &mut log);
        assert_eq!(log.ends, vec![Point::new(10.0, 12.0)]);
        assert!(!a.is_bound(EventKind::TouchMove));
    }
}
