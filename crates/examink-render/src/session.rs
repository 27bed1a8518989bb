//! Drawing session: one canvas instance with its strokes, tools and surface.

use crate::engine;
use crate::surface::Surface;
use examink_core::{
    CanvasConfig, CanvasMetrics, CaptureUpdate, ContainerMetrics, DrawingData, Point,
    PointerInput, Stroke, SurfaceLayout, ToolKind, ToolManager, resolve_point,
};
use peniko::Color;

/// Receives the complete drawing after every commit, undo and clear.
pub type ChangeCallback = Box<dyn FnMut(&DrawingData)>;

/// Owns the authoritative stroke list and keeps a surface in sync with it.
///
/// The surface is a derived view: any method that reallocates or repaints it
/// replays the full stroke list.
pub struct DrawingSession<S: Surface> {
    surface: S,
    config: CanvasConfig,
    background: Color,
    data: DrawingData,
    tools: ToolManager,
    container: Option<ContainerMetrics>,
    layout: Option<SurfaceLayout>,
    on_change: Option<ChangeCallback>,
}

impl<S: Surface> DrawingSession<S> {
    /// Create a session seeded with `initial`. The surface is not sized until
    /// the first [`DrawingSession::resize`].
    pub fn new(surface: S, config: CanvasConfig, initial: Option<DrawingData>) -> Self {
        let tools = ToolManager::new(config.supports_shapes);
        let background = config.background_color();
        Self {
            surface,
            config,
            background,
            data: initial.unwrap_or_default(),
            tools,
            container: None,
            layout: None,
            on_change: None,
        }
    }

    /// Create a session and size its surface to `container`.
    pub fn mount(
        surface: S,
        config: CanvasConfig,
        container: ContainerMetrics,
        initial: Option<DrawingData>,
    ) -> Self {
        let mut session = Self::new(surface, config, initial);
        session.resize(container);
        session
    }

    /// Register the change callback.
    pub fn with_on_change(mut self, callback: impl FnMut(&DrawingData) + 'static) -> Self {
        self.set_on_change(callback);
        self
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&DrawingData) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.data.strokes()
    }

    pub fn drawing_data(&self) -> &DrawingData {
        &self.data
    }

    pub fn can_undo(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn is_capturing(&self) -> bool {
        self.tools.is_active()
    }

    /// Select the tool for the next stroke. Returns false if it is unavailable.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        self.tools.set_tool(tool)
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.tools.set_color(color);
    }

    pub fn set_width(&mut self, width: f64) {
        self.tools.set_width(width);
    }

    /// Placement and resolution of the surface for pointer mapping.
    ///
    /// `left` and `top` are the surface's bounding-box offset in client coordinates.
    pub fn canvas_metrics(&self, left: f64, top: f64) -> CanvasMetrics {
        let width = self.container.map(|c| c.width).unwrap_or(0.0);
        let (scale, bitmap_width, bitmap_height) = match self.layout {
            Some(layout) => (
                layout.scale,
                f64::from(layout.pixel_width),
                f64::from(layout.pixel_height),
            ),
            None => (1.0, width, self.config.height),
        };
        CanvasMetrics {
            left,
            top,
            display_width: bitmap_width / scale,
            display_height: bitmap_height / scale,
            bitmap_width,
            bitmap_height,
            device_pixel_ratio: scale,
        }
    }

    /// Map a pointer event to drawing coordinates for this surface.
    pub fn resolve(&self, input: &PointerInput, left: f64, top: f64) -> Point {
        resolve_point(input, &self.canvas_metrics(left, top))
    }

    /// Pointer pressed on the surface. A second press during a capture is ignored.
    pub fn pointer_down(&mut self, point: Point) {
        if self.tools.is_active() {
            log::trace!("Ignoring pointer down at {:?} during capture", point);
            return;
        }
        self.tools.begin(point);
    }

    /// Pointer moved. Ignored unless a stroke is being captured.
    pub fn pointer_move(&mut self, point: Point) {
        match self.tools.update(point) {
            CaptureUpdate::Ignored => {}
            CaptureUpdate::Segment(segment) => {
                engine::draw_stroke(&mut self.surface, &segment);
            }
            CaptureUpdate::Preview(preview) => {
                engine::render_with_preview(
                    &mut self.surface,
                    self.data.strokes(),
                    &preview,
                    self.background,
                );
            }
        }
    }

    /// Pointer released. Commits the captured stroke if it meets the threshold.
    pub fn pointer_up(&mut self) {
        if !self.tools.is_active() {
            return;
        }
        match self.tools.end() {
            Some(stroke) => {
                log::debug!(
                    "Committed {:?} stroke with {} points",
                    stroke.kind,
                    stroke.points.len()
                );
                self.data.push(stroke);
                self.redraw();
                self.notify();
            }
            None => self.redraw(),
        }
    }

    /// Pointer left the surface; treated as a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Discard the in-progress stroke without committing it.
    pub fn cancel(&mut self) {
        if self.tools.is_active() {
            self.tools.cancel();
            self.redraw();
        }
    }

    /// Remove the most recent stroke. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.data.pop().is_none() {
            return false;
        }
        log::debug!("Undo, {} strokes remain", self.data.len());
        self.redraw();
        self.notify();
        true
    }

    /// Remove every stroke and reinitialize the surface.
    pub fn clear(&mut self) {
        self.tools.cancel();
        self.data.clear();
        log::debug!("Canvas cleared");
        match self.container {
            Some(container) => self.resize(container),
            None => self.redraw(),
        }
        self.notify();
    }

    /// Resize the surface to follow its container and restore its content.
    pub fn resize(&mut self, container: ContainerMetrics) {
        let Some(layout) = SurfaceLayout::for_container(&self.config, container) else {
            log::debug!("Ignoring resize to unusable container {:?}", container);
            return;
        };
        log::debug!(
            "Resizing surface to {}x{} (scale {})",
            layout.pixel_width,
            layout.pixel_height,
            layout.scale
        );
        self.container = Some(container);
        self.layout = Some(layout);
        self.surface
            .resize(layout.pixel_width, layout.pixel_height, layout.scale);
        self.redraw();
    }

    /// Repaint the surface from the stroke list.
    pub fn redraw(&mut self) {
        engine::render(&mut self.surface, self.data.strokes(), self.background);
    }

    fn notify(&mut self) {
        if let Some(callback) = &mut self.on_change {
            callback(&self.data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingSurface, SurfaceOp};
    use examink_core::StrokeKind;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Emitted = Rc<RefCell<Vec<DrawingData>>>;

    fn session() -> (DrawingSession<RecordingSurface>, Emitted) {
        let emitted: Emitted = Rc::default();
        let sink = emitted.clone();
        let session = DrawingSession::mount(
            RecordingSurface::new(),
            CanvasConfig::default(),
            ContainerMetrics::new(400.0, 1.0),
            None,
        )
        .with_on_change(move |data| sink.borrow_mut().push(data.clone()));
        (session, emitted)
    }

    fn drag(session: &mut DrawingSession<RecordingSurface>, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        session.pointer_down(Point::new(first.0, first.1));
        for &(x, y) in rest {
            session.pointer_move(Point::new(x, y));
        }
        session.pointer_up();
    }

    #[test]
    fn test_mount_sizes_and_paints() {
        let (session, _) = session();
        let ops = session.surface().ops();
        assert!(matches!(
            ops[0],
            SurfaceOp::Resize {
                pixel_width: 400,
                pixel_height: 800,
                ..
            }
        ));
        assert!(ops.iter().any(|op| matches!(op, SurfaceOp::Clear(_))));
    }

    #[test]
    fn test_commit_emits_full_list() {
        let (mut session, emitted) = session();
        drag(&mut session, &[(0.0, 0.0), (5.0, 5.0), (10.0, 5.0)]);
        drag(&mut session, &[(20.0, 20.0), (25.0, 25.0)]);

        let emitted = emitted.borrow();
        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].len(), 1);
        assert_eq!(emitted[1].len(), 2);
        assert_eq!(&emitted[1], session.drawing_data());
    }

    #[test]
    fn test_click_without_move_not_committed() {
        let (mut session, emitted) = session();
        session.pointer_down(Point::new(5.0, 5.0));
        session.pointer_up();
        assert!(session.strokes().is_empty());
        assert!(emitted.borrow().is_empty());
    }

    #[test]
    fn test_zero_drag_shape_committed() {
        let (mut session, emitted) = session();
        session.set_tool(ToolKind::Rectangle);
        session.pointer_down(Point::new(5.0, 5.0));
        session.pointer_up();
        assert_eq!(session.strokes().len(), 1);
        assert_eq!(session.strokes()[0].kind, StrokeKind::Rectangle);
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn test_move_without_press_ignored() {
        let (mut session, _) = session();
        session.surface_mut().take_ops();
        session.pointer_move(Point::new(5.0, 5.0));
        session.pointer_up();
        assert!(session.surface().ops().is_empty());
    }

    #[test]
    fn test_pointer_leave_commits() {
        let (mut session, emitted) = session();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_move(Point::new(3.0, 3.0));
        session.pointer_leave();
        assert!(!session.is_capturing());
        assert_eq!(session.strokes().len(), 1);

        session.pointer_move(Point::new(9.0, 9.0));
        assert_eq!(session.strokes()[0].points.len(), 2);
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn test_freehand_move_draws_only_newest_segment() {
        let (mut session, _) = session();
        session.pointer_down(Point::new(0.0, 0.0));
        session.pointer_move(Point::new(1.0, 1.0));
        session.surface_mut().take_ops();
        session.pointer_move(Point::new(2.0, 3.0));

        let surface = session.surface();
        assert!(!surface.ops().iter().any(|op| matches!(op, SurfaceOp::Clear(_))));
        let paths = surface.stroked_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].0.elements().len(), 2);
    }

    #[test]
    fn test_shape_preview_repaints_without_committing() {
        let (mut session, emitted) = session();
        drag(&mut session, &[(0.0, 0.0), (5.0, 5.0)]);
        session.set_tool(ToolKind::Circle);
        session.pointer_down(Point::new(50.0, 50.0));
        session.pointer_move(Point::new(60.0, 50.0));
        session.pointer_move(Point::new(70.0, 50.0));

        assert_eq!(session.strokes().len(), 1);
        let frame = session.surface().since_last_clear();
        let strokes = frame
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Stroke { .. }))
            .count();
        assert_eq!(strokes, 2);

        session.pointer_up();
        assert_eq!(session.strokes().len(), 2);
        assert_eq!(
            session.strokes()[1].points,
            vec![Point::new(50.0, 50.0), Point::new(70.0, 50.0)]
        );
        assert_eq!(emitted.borrow().len(), 2);
    }

    #[test]
    fn test_undo_lifo() {
        let (mut session, emitted) = session();
        drag(&mut session, &[(0.0, 0.0), (1.0, 1.0)]);
        drag(&mut session, &[(5.0, 5.0), (6.0, 6.0)]);
        let first = session.strokes()[0].clone();

        assert!(session.undo());
        assert_eq!(session.strokes(), &[first]);
        assert!(session.undo());
        assert!(session.strokes().is_empty());
        assert!(!session.undo());
        assert!(session.strokes().is_empty());

        let emitted = emitted.borrow();
        assert_eq!(emitted.len(), 4);
        assert!(emitted[3].is_empty());
    }

    #[test]
    fn test_clear_emits_empty_and_reinitializes() {
        let (mut session, emitted) = session();
        drag(&mut session, &[(0.0, 0.0), (1.0, 1.0)]);
        session.surface_mut().take_ops();
        session.clear();

        assert!(session.strokes().is_empty());
        assert_eq!(emitted.borrow().last(), Some(&DrawingData::new()));
        assert!(matches!(session.surface().ops()[0], SurfaceOp::Resize { .. }));
        assert!(session.surface().stroked_paths().is_empty());
    }

    #[test]
    fn test_resize_replays_every_stroke() {
        let (mut session, _) = session();
        drag(&mut session, &[(0.0, 0.0), (1.0, 1.0)]);
        drag(&mut session, &[(5.0, 5.0), (6.0, 6.0)]);
        session.surface_mut().take_ops();

        session.resize(ContainerMetrics::new(300.0, 2.0));
        let surface = session.surface();
        assert!(matches!(
            surface.ops()[0],
            SurfaceOp::Resize {
                pixel_width: 600,
                pixel_height: 1600,
                ..
            }
        ));
        assert_eq!(surface.stroked_paths().len(), 2);
    }

    #[test]
    fn test_unusable_resize_ignored() {
        let (mut session, _) = session();
        session.surface_mut().take_ops();
        session.resize(ContainerMetrics::new(0.0, 1.0));
        assert!(session.surface().ops().is_empty());
    }

    #[test]
    fn test_initial_data_seeds_strokes() {
        let initial = DrawingData::from_strokes(vec![Stroke::freehand(
            vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)],
            "#000000",
            2.0,
        )]);
        let session = DrawingSession::mount(
            RecordingSurface::new(),
            CanvasConfig::default(),
            ContainerMetrics::new(100.0, 1.0),
            Some(initial.clone()),
        );
        assert_eq!(session.drawing_data(), &initial);
        assert_eq!(session.surface().stroked_paths().len(), 1);
    }

    #[test]
    fn test_basic_config_refuses_shapes() {
        let mut session = DrawingSession::mount(
            RecordingSurface::new(),
            CanvasConfig::basic(),
            ContainerMetrics::new(100.0, 2.0),
            None,
        );
        assert!(!session.set_tool(ToolKind::Line));
        assert_eq!(session.surface().scale(), 1.0);
    }

    #[test]
    fn test_canvas_metrics_follow_layout() {
        let mut session = DrawingSession::mount(
            RecordingSurface::new(),
            CanvasConfig::default(),
            ContainerMetrics::new(500.0, 2.0),
            None,
        );
        let point = session.resolve(&PointerInput::mouse(110.0, 70.0), 10.0, 20.0);
        assert_eq!(point, Point::new(100.0, 50.0));

        session.resize(ContainerMetrics::new(500.0, 1.0));
        let point = session.resolve(&PointerInput::mouse(110.0, 70.0), 10.0, 20.0);
        assert_eq!(point, Point::new(100.0, 50.0));
    }

    #[test]
    fn test_fractional_pixel_ratio_keeps_points() {
        let resolve_at = |device_pixel_ratio: f64| {
            let session = DrawingSession::mount(
                RecordingSurface::new(),
                CanvasConfig::default(),
                ContainerMetrics::new(333.0, device_pixel_ratio),
                None,
            );
            session.resolve(&PointerInput::mouse(333.0, 100.0), 0.0, 0.0)
        };

        let standard = resolve_at(1.0);
        assert_eq!(standard, Point::new(333.0, 100.0));
        for device_pixel_ratio in [1.25, 1.5, 1.75] {
            let point = resolve_at(device_pixel_ratio);
            assert!(
                (point - standard).hypot() < 1e-9,
                "dpr {device_pixel_ratio}: {point:?} != {standard:?}"
            );
        }
    }

    #[test]
    fn test_second_press_keeps_capture() {
        let (mut session, emitted) = session();
        session.pointer_down(Point::new(10.0, 10.0));
        session.pointer_move(Point::new(20.0, 20.0));
        session.pointer_down(Point::new(200.0, 200.0));
        session.pointer_move(Point::new(30.0, 30.0));
        session.pointer_up();

        assert_eq!(
            session.strokes()[0].points,
            vec![
                Point::new(10.0, 10.0),
                Point::new(20.0, 20.0),
                Point::new(30.0, 30.0)
            ]
        );
        assert_eq!(emitted.borrow().len(), 1);
    }

    #[test]
    fn test_config_builders_gate_tools_and_scale() {
        let config = CanvasConfig::default()
            .with_shapes(false)
            .with_device_pixels(false);
        let mut session = DrawingSession::mount(
            RecordingSurface::new(),
            config,
            ContainerMetrics::new(120.0, 2.0),
            None,
        );
        assert!(!session.set_tool(ToolKind::Rectangle));
        assert!(session.set_tool(ToolKind::Eraser));

        let surface = session.into_surface();
        assert_eq!(surface.scale(), 1.0);
        assert_eq!(surface.pixel_size(), (120, 800));
    }
}
