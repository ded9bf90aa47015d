use crate::color::Color;
use crate::layout::SceneLayout;
use crate::refraction::PhysicsSample;
use crate::surface::CanvasSurface;
use crate::arrow::draw_arrow;
use crate::consts::{ INTERFACE_STROKE, RAY_STROKE, ANGLE_ARC_RADIUS,
    ANGLE_ARC_STROKE, LABEL_FONT_SIZE, ANNOTATION_CUTOFF, HOLD_FRAMES,
    TRANSITION_FRAMES };

/// Renders the still frames and the animation for a `PhysicsSample`.
///
/// The sequencer keeps no state between calls; every render receives the
/// full sample. Frames are produced on any `CanvasSurface`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameSequencer {
    pub layout: SceneLayout,

    /// Copies of the initial (and final) frame at either end of the animation.
    pub hold: usize,

    /// Number of frames over which the refracted ray grows.
    pub transitions: usize,
}

impl FrameSequencer {
    /// Creates a sequencer with the default animation timing.
    pub fn new(width: usize, height: usize) -> FrameSequencer {
        FrameSequencer::with_timing(width, height, HOLD_FRAMES, TRANSITION_FRAMES)
    }

    pub fn with_timing(width: usize, height: usize, hold: usize,
        transitions: usize) -> FrameSequencer {
        FrameSequencer {
            layout: SceneLayout::new(width, height),
            hold,
            transitions,
        }
    }

    /// Number of frames `animation` produces.
    pub fn frame_count(&self) -> usize {
        2 * self.hold + self.transitions
    }

    /// Progress of transition frame `i`, from 0.0 on the first frame to 1.0
    /// on the last. A single transition frame is already complete.
    pub fn progress(&self, i: usize) -> f64 {
        if self.transitions > 1 {
            i as f64 / (self.transitions - 1) as f64
        } else {
            1.0
        }
    }

    /// Whether the incident angle annotation is drawn at `progress`.
    pub fn shows_annotation(progress: f64) -> bool {
        progress < ANNOTATION_CUTOFF
    }

    /// Draws the parts shared by every frame: interface, glass hatching and
    /// the normal.
    pub fn draw_static_scene<S: CanvasSurface>(&self, surface: &mut S) {
        let interface = self.layout.interface_line();
        surface.draw_line(interface.start, interface.end, Color::black(),
            INTERFACE_STROKE);

        for tick in self.layout.hatch_ticks() {
            surface.draw_line(tick.start, tick.end, Color::hatch_gray(), 1.0);
        }

        let normal = self.layout.normal_segment();
        surface.draw_line(normal.start, normal.end, Color::normal_gray(), 1.0);
    }

    fn draw_incident_ray<S: CanvasSurface>(&self, surface: &mut S,
        sample: &PhysicsSample) {
        let ray = self.layout.incident_ray(sample.theta_incident.radians);
        draw_arrow(surface, ray.start, ray.end, Color::blue(), RAY_STROKE);
    }

    /// Draws the refracted ray, grown to the fraction `progress` of its full
    /// boundary-clipped length. Nothing is drawn at zero progress.
    fn draw_refracted_ray<S: CanvasSurface>(&self, surface: &mut S,
        sample: &PhysicsSample, progress: f64) {
        if progress <= 0.0 {
            return;
        }

        let ray = self.layout.refracted_ray(sample.theta_refracted.radians)
            .truncate(progress);
        draw_arrow(surface, ray.start, ray.end, Color::red(), RAY_STROKE);
    }

    /// Draws the arc between the normal and the incident ray, and the label
    /// giving the incident angle in whole degrees.
    fn draw_annotation<S: CanvasSurface>(&self, surface: &mut S,
        sample: &PhysicsSample) {
        let (start, end) = self.layout.angle_arc(sample.theta_incident.degrees);
        surface.draw_arc(self.layout.center, ANGLE_ARC_RADIUS, start, end,
            Color::black(), ANGLE_ARC_STROKE);

        surface.draw_text(self.layout.label_position(),
            &angle_label(sample.theta_incident.degrees), Color::black(),
            LABEL_FONT_SIZE);
    }

    fn blank<S: CanvasSurface>(&self) -> S {
        S::blank(self.layout.width, self.layout.height, Color::white())
    }

    /// The "before" image: the incident ray and its angle annotation.
    pub fn render_initial<S: CanvasSurface>(&self, sample: &PhysicsSample) -> S {
        let mut surface = self.blank();
        self.draw_static_scene(&mut surface);
        self.draw_incident_ray(&mut surface, sample);
        self.draw_annotation(&mut surface, sample);

        surface
    }

    /// The "after" image: the incident ray and the full refracted ray.
    pub fn render_final<S: CanvasSurface>(&self, sample: &PhysicsSample) -> S {
        let mut surface = self.blank();
        self.draw_static_scene(&mut surface);
        self.draw_incident_ray(&mut surface, sample);
        self.draw_refracted_ray(&mut surface, sample, 1.0);

        surface
    }

    /// One transition frame. The refracted ray keeps its final angle and only
    /// its length follows `progress`.
    pub fn render_transition<S: CanvasSurface>(&self, sample: &PhysicsSample,
        progress: f64) -> S {
        let mut surface = self.blank();
        self.draw_static_scene(&mut surface);
        self.draw_incident_ray(&mut surface, sample);
        self.draw_refracted_ray(&mut surface, sample, progress);

        if FrameSequencer::shows_annotation(progress) {
            self.draw_annotation(&mut surface, sample);
        }

        surface
    }

    /// The full animation: `hold` initial frames, `transitions` frames of the
    /// refracted ray growing, then `hold` final frames.
    pub fn animation<S: CanvasSurface + Clone>(&self, sample: &PhysicsSample)
        -> Vec<S> {
        let mut frames = Vec::with_capacity(self.frame_count());

        let first: S = self.render_initial(sample);
        frames.extend(std::iter::repeat(first).take(self.hold));

        for i in 0..self.transitions {
            frames.push(self.render_transition(sample, self.progress(i)));
        }

        let last: S = self.render_final(sample);
        frames.extend(std::iter::repeat(last).take(self.hold));

        frames
    }
}

/// Text of the incident angle label, e.g. "θ = 30°".
pub fn angle_label(degrees: f64) -> String {
    format!("θ = {:.0}°", degrees)
}

#[cfg(test)]
use crate::point::Point2D;

/// A surface that records what was drawn on it.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
struct Recorder {
    width: usize,
    height: usize,
    lines: Vec<(Point2D, Point2D, Color, f64)>,
    arcs: Vec<(Point2D, f64, f64, f64)>,
    texts: Vec<(Point2D, String)>,
}

#[cfg(test)]
impl Recorder {
    fn has_line(&self, start: Point2D, end: Point2D, color: Color) -> bool {
        self.lines.iter().any(|(s, e, c, _)| *s == start && *e == end && *c == color)
    }

    fn lines_of(&self, color: Color) -> Vec<(Point2D, Point2D)> {
        self.lines.iter()
            .filter(|(_, _, c, _)| *c == color)
            .map(|(s, e, _, _)| (*s, *e))
            .collect()
    }

    fn annotated(&self) -> bool {
        !self.arcs.is_empty() || !self.texts.is_empty()
    }
}

#[cfg(test)]
impl CanvasSurface for Recorder {
    fn blank(width: usize, height: usize, _background: Color) -> Recorder {
        Recorder { width, height, ..Default::default() }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn draw_line(&mut self, start: Point2D, end: Point2D, color: Color,
        width: f64) {
        self.lines.push((start, end, color, width));
    }

    fn draw_arc(&mut self, center: Point2D, radius: f64, start_deg: f64,
        end_deg: f64, _color: Color, _width: f64) {
        self.arcs.push((center, radius, start_deg, end_deg));
    }

    fn draw_text(&mut self, position: Point2D, text: &str, _color: Color,
        _size: f64) {
        self.texts.push((position, text.to_string()));
    }
}

#[test]
fn initial_frame_shows_incident_ray_and_annotation() {
    let seq = FrameSequencer::new(512, 512);
    let sample = PhysicsSample::new(1.5, 1.0, 30.0);
    let frame: Recorder = seq.render_initial(&sample);

    let center = Point2D::new(256.0, 256.0);
    let blue = frame.lines_of(Color::blue());
    // Shaft ending at the canvas center, then two barbs leaving it
    assert_eq!(blue.len(), 3);
    assert_eq!(blue[0].1, center);
    assert_eq!(blue[1].0, center);
    assert_eq!(blue[2].0, center);

    assert!(frame.lines_of(Color::red()).is_empty());
    assert_eq!(frame.arcs, vec![(center, 40.0, -120.0, -90.0)]);
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].1, "θ = 30°");
}

#[test]
fn final_frame_shows_clipped_refracted_ray() {
    let seq = FrameSequencer::new(512, 512);
    let sample = PhysicsSample::new(1.5, 1.0, 30.0);
    let frame: Recorder = seq.render_final(&sample);

    let red = frame.lines_of(Color::red());
    assert_eq!(red.len(), 3);

    let (start, end) = red[0];
    assert_eq!(start, Point2D::new(256.0, 256.0));
    assert!(crate::feq(end.y, 512.0));
    let expected_x = 256.0 + 256.0 * sample.theta_refracted.radians.tan();
    assert!((end.x - expected_x).abs() < 1e-9);

    assert!(!frame.annotated());
}

#[test]
fn every_frame_has_static_scene() {
    let seq = FrameSequencer::with_timing(512, 512, 2, 4);
    let sample = PhysicsSample::new(1.7, 1.0, 55.0);
    let frames: Vec<Recorder> = seq.animation(&sample);

    for f in frames.iter() {
        assert!(f.has_line(Point2D::new(0.0, 256.0), Point2D::new(512.0, 256.0),
            Color::black()));
        assert!(f.has_line(Point2D::new(256.0, 226.0), Point2D::new(256.0, 286.0),
            Color::normal_gray()));
        assert_eq!(f.lines_of(Color::hatch_gray()).len(), 64);
        assert_eq!(f.lines_of(Color::blue()).len(), 3);
    }
}

#[test]
fn animation_length_is_two_holds_plus_transitions() {
    let sample = PhysicsSample::new(1.5, 1.0, 30.0);

    for hold in 0..4 {
        for transitions in 1..8 {
            let seq = FrameSequencer::with_timing(64, 64, hold, transitions);
            let frames: Vec<Recorder> = seq.animation(&sample);

            assert_eq!(frames.len(), 2 * hold + transitions);
            assert_eq!(frames.len(), seq.frame_count());
        }
    }

    let seq = FrameSequencer::new(64, 64);
    assert_eq!(seq.animation::<Recorder>(&sample).len(), 35);
}

#[test]
fn progress_spans_zero_to_one() {
    let seq = FrameSequencer::with_timing(64, 64, 5, 25);
    assert_eq!(seq.progress(0), 0.0);
    assert_eq!(seq.progress(24), 1.0);
    assert!(crate::feq(seq.progress(12), 0.5));

    let single = FrameSequencer::with_timing(64, 64, 5, 1);
    assert_eq!(single.progress(0), 1.0);
}

#[test]
fn annotation_cutoff_is_exact() {
    assert!(FrameSequencer::shows_annotation(0.0));
    assert!(FrameSequencer::shows_annotation(0.29999999));
    assert!(!FrameSequencer::shows_annotation(0.3));
    assert!(!FrameSequencer::shows_annotation(0.30000001));
    assert!(!FrameSequencer::shows_annotation(1.0));
}

#[test]
fn annotation_visible_only_before_cutoff() {
    let hold = 5;
    let seq = FrameSequencer::with_timing(512, 512, hold, 25);
    let sample = PhysicsSample::new(1.5, 1.0, 30.0);
    let frames: Vec<Recorder> = seq.animation(&sample);

    for i in 0..25 {
        let p = seq.progress(i);
        assert_eq!(frames[hold + i].annotated(), p < 0.3, "frame {} at {}", i, p);
    }

    // progress = i / 24, so frames 0..=7 are annotated and 8 onwards are not
    assert!(frames[hold + 7].annotated());
    assert!(!frames[hold + 8].annotated());

    // Holds mirror the still frames
    assert!(frames[..hold].iter().all(|f| f.annotated()));
    assert!(frames[hold + 25..].iter().all(|f| !f.annotated()));
}

#[test]
fn refracted_ray_grows_linearly_at_fixed_angle() {
    let seq = FrameSequencer::with_timing(512, 512, 0, 5);
    let sample = PhysicsSample::new(1.5, 1.0, 30.0);
    let full = seq.layout.refracted_ray(sample.theta_refracted.radians);

    let first: Recorder = seq.render_transition(&sample, 0.0);
    assert!(first.lines_of(Color::red()).is_empty());

    for &p in [0.25, 0.5, 1.0].iter() {
        let frame: Recorder = seq.render_transition(&sample, p);
        let (start, end) = frame.lines_of(Color::red())[0];

        assert_eq!(start, full.start);
        assert_eq!(end, full.position(p));
        assert!(crate::feq((end - start).magnitude(), full.length() * p));

        let d = end - start;
        assert!((d.x.atan2(d.y) - sample.theta_refracted.radians).abs() < 1e-9);
    }
}

#[test]
fn last_transition_matches_final_rays() {
    let seq = FrameSequencer::with_timing(512, 512, 0, 25);
    let sample = PhysicsSample::new(1.9, 1.0, 75.0);

    let transition: Recorder = seq.render_transition(&sample, 1.0);
    let last: Recorder = seq.render_final(&sample);

    assert_eq!(transition.lines, last.lines);
}

#[test]
fn raster_frames_show_scene() {
    use crate::canvas::Canvas;

    let seq = FrameSequencer::new(512, 512);
    let sample = PhysicsSample::new(1.5, 1.0, 30.0);

    let initial: Canvas = seq.render_initial(&sample);
    let last: Canvas = seq.render_final(&sample);

    for frame in [&initial, &last].iter() {
        // White background, black interface, blue ray into the center
        assert_eq!(frame.read_pixel(5, 5).unwrap(), Color::white());
        assert_eq!(frame.read_pixel(20, 256).unwrap(), Color::black());
        assert_eq!(frame.read_pixel(255, 253).unwrap(), Color::blue());
    }

    // The refracted ray only exists in the final frame
    let ray = seq.layout.refracted_ray(sample.theta_refracted.radians);
    let p = ray.position(0.75);
    assert_eq!(last.read_pixel(p.x as usize, p.y as usize).unwrap(), Color::red());
    assert_eq!(initial.read_pixel(p.x as usize, p.y as usize).unwrap(),
        Color::white());
}
