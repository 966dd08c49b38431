// Authored tuning for the story. The default `Timeline` is assembled from these.

// Progress domain: one unit per viewport height scrolled through the story
pub const MAX_PHASES: f32 = 3.5;

// Per-frame exponential smoothing applied to model poses (not the camera)
pub const SMOOTHING_FACTOR: f32 = 0.1;

// Camera
pub const CAMERA_START_EYE: [f32; 3] = [0.0, 0.0, 5.0];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.05;
pub const CAMERA_ZFAR: f32 = 100.0;

// Earth zoom toward Belgium
pub const BELGIUM_LAT_DEG: f32 = 50.5;
pub const BELGIUM_LON_DEG: f32 = 4.5;
pub const ZOOM_RADIUS: f32 = 2.2; // distance from Earth's centre at the end of the leg
pub const ZOOM_REACH: f32 = 0.8; // fraction of the leg covered when the zoom phase completes
pub const EARTH_ZOOM_SPIN: f32 = -0.3; // radians about Y once the zoom completes
pub const EARTH_EXIT_DRIFT: f32 = 0.1; // world units the globe rises while the camera leaves

// Telescopes
pub const HUBBLE_ANCHOR: [f32; 3] = [3.6, 2.4, 2.2];
pub const CHANDRA_ANCHOR: [f32; 3] = [-4.2, 4.0, 5.2];
pub const TELESCOPE_VIEW_OFFSET: [f32; 3] = [0.0, 0.12, 1.1]; // eye relative to the subject
pub const HUBBLE_SPIN_PER_FRAME: f32 = 0.002;
pub const CHANDRA_SPIN_PER_FRAME: f32 = 0.0015;

// Section windows feed their appear ramp at this rate (fully visible after a third)
pub const SECTION_ENTRY_RATE: f32 = 3.0;

// Text reveal
pub const REVEAL_DURATION_MS: f64 = 600.0;
pub const REVEAL_STAGGER_MS: f64 = 35.0;
pub const REVEAL_VIEW_THRESHOLD: f64 = 0.1;
pub const FADE_UP_OFFSET_PX: f32 = 40.0;
pub const TRAIL_OFFSET_PX: f32 = 20.0;
pub const SCALE_IN_FROM: f32 = 0.8;
