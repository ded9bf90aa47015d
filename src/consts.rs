// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Interface and glass hatching
pub const INTERFACE_STROKE: f64 = 3.0;
pub const HATCH_SPACING: usize = 8;
pub const HATCH_LENGTH: f64 = 15.0;
pub const HATCH_ANGLE_DEG: f64 = 45.0;
pub const HATCH_OFFSET: f64 = 5.0;

// Normal line, drawn this far above and below the point of incidence
pub const NORMAL_HALF_LENGTH: f64 = 30.0;

// Rays
pub const RAY_STROKE: f64 = 3.0;
pub const RAY_TOP_MARGIN: f64 = 50.0;
pub const ARROWHEAD_LENGTH: f64 = 15.0;
pub const ARROWHEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

// Incident angle annotation
pub const ANGLE_ARC_RADIUS: f64 = 40.0;
pub const ANGLE_ARC_STROKE: f64 = 2.0;
pub const LABEL_GAP: f64 = 10.0;
pub const LABEL_FONT_SIZE: f64 = 20.0;

// Fraction of the transition after which the annotation is no longer drawn
pub const ANNOTATION_CUTOFF: f64 = 0.3;

// Animation timing
pub const HOLD_FRAMES: usize = 5;
pub const TRANSITION_FRAMES: usize = 25;

// Refractive indices
pub const AIR_RI: f64 = 1.0;
pub const GLASS_RI_MIN: f64 = 1.3;
pub const GLASS_RI_MAX: f64 = 2.0;

// Incident angles, in degrees from the normal
pub const THETA_MIN_DEG: f64 = 5.0;
pub const THETA_MAX_DEG: f64 = 80.0;
