use glam::Vec3;

// Shared visual tuning constants for the tree and its particle groups.

// Tree geometry (35 degree apex angle: radius = height * tan(17.5deg))
pub const TREE_HEIGHT: f32 = 18.0;
pub const TREE_RADIUS_BASE: f32 = 5.7;
pub const SCATTER_RADIUS: f32 = 35.0;

// Spiral tightness: angle = t * total_count * SPIRAL_STEP (a tuned multiplier, not the golden angle)
pub const SPIRAL_STEP: f32 = 0.5;
// Full width of the uniform x/z jitter applied to tree points
pub const TREE_JITTER: f32 = 0.5;

// Transition smoothing rates (per second)
pub const ORNAMENT_SMOOTHING: f32 = 1.2;
pub const FAIRY_LIGHT_SMOOTHING: f32 = 1.5;
pub const FOLIAGE_SMOOTHING: f32 = 1.5;
pub const STAR_SMOOTHING: f32 = 1.2;

// Scale envelope during a transition: base * (FLOOR + SPAN * eased + pop)
pub const TRANSITION_SCALE_FLOOR: f32 = 0.3;
pub const TRANSITION_SCALE_SPAN: f32 = 0.7;
pub const TRANSITION_POP: f32 = 0.2;

// Ornament placement
pub const ORNAMENT_HEIGHT_NOISE: f32 = 0.1; // full width of the normalized height offset
pub const SHELL_INNER: f32 = 0.2; // innermost radius fraction of a thick shell
pub const GRADIENT_NOISE: f32 = 0.3; // fraction of the scale spread used as noise
pub const APEX_TIP_T: f32 = 0.92; // particles above this normalized height are tapered
pub const APEX_TIP_TAPER: f32 = 0.4;
pub const ACCENT_FRACTION: f32 = 0.15; // share of sphere particles drawn as translucent accents
pub const AXIS_SCALE_MIN: f32 = 0.5;
pub const AXIS_SCALE_MAX: f32 = 1.5;

// Ornament float bob amplitude (scattered -> assembled)
pub const FLOAT_AMP_SCATTERED: f32 = 4.0;
pub const FLOAT_AMP_ASSEMBLED: f32 = 0.05;

// Fairy lights
pub const FAIRY_LIGHT_COUNT: usize = 250;
pub const FAIRY_LIGHT_RADIUS_PUSH: f32 = 1.25;
pub const FAIRY_LIGHT_SCALE: f32 = 0.15;
pub const FAIRY_BLINK_GATE: f32 = 0.8; // raw progress above which lights blink
pub const FAIRY_BLINK_SPEED_MIN: f32 = 2.0;
pub const FAIRY_BLINK_SPEED_MAX: f32 = 5.0;
pub const FAIRY_FADE_FLOOR: f32 = 0.2;

// Foliage aura
pub const FOLIAGE_COUNT: usize = 2000;
pub const FOLIAGE_RADIUS_PULL: f32 = 0.9;
pub const FOLIAGE_DRIFT_ASSEMBLED: f32 = 0.1;
pub const FOLIAGE_ALPHA_BASE: f32 = 0.02;
pub const FOLIAGE_ALPHA_TWINKLE: f32 = 0.15;

// Star
pub const STAR_APEX_OFFSET: f32 = 0.8;
pub const STAR_OUTER_RADIUS: f32 = 1.056;
pub const STAR_INNER_RADIUS: f32 = 0.396;
pub const STAR_DEPTH: f32 = 0.1;
pub const STAR_FREE_SPIN: f32 = 0.5; // radians per second while scattered
pub const STAR_UPRIGHT_RATE: f32 = 2.0;
pub const STAR_BREATH_SPEED: f32 = 3.0;
pub const STAR_BREATH_AMOUNT: f32 = 0.1;

// Background sparkles
pub const SPARKLE_COUNT: usize = 1500;
pub const SPARKLE_EXTENT: f32 = 120.0;
pub const SPARKLE_SIZE: f32 = 3.0;
pub const SPARKLE_SPEED: f32 = 0.2;
pub const SPARKLE_OPACITY: f32 = 0.3;

// Whole-assembly rotation while assembled (radians per second)
pub const SCENE_ROTATION_SPEED: f32 = 0.15;

// Camera
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 4.0, 45.0);
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_MIN_DISTANCE: f32 = 20.0;
pub const CAMERA_MAX_DISTANCE: f32 = 70.0;

#[inline]
pub fn star_tree_position() -> Vec3 {
    Vec3::new(0.0, TREE_HEIGHT / 2.0 + STAR_APEX_OFFSET, 0.0)
}
