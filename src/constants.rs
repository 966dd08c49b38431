// DOM hooks the page markup provides.
pub const CANVAS_ID: &str = "scene-canvas";
pub const STORY_ID: &str = "story";
pub const MAX_PHASES_ATTR: &str = "data-max-phases";
pub const SMOOTHING_ATTR: &str = "data-smoothing";
pub const CAPTION_ATTR: &str = "data-caption";
pub const REVEAL_ATTR: &str = "data-reveal";
pub const REVEAL_DELAY_ATTR: &str = "data-reveal-delay";
pub const REVEAL_DURATION_ATTR: &str = "data-reveal-duration";
pub const REVEAL_TRIGGER_ATTR: &str = "data-reveal-trigger";

// Window events that change where the story container sits in the viewport.
pub const SCROLL_EVENTS: [&str; 2] = ["scroll", "resize"];
pub const CANVAS_RESIZE_EVENTS: [&str; 1] = ["resize"];

// Caption opacity changes smaller than this are not written to the DOM.
pub const OPACITY_EPSILON: f32 = 0.002;

// Renderer
pub const CLEAR_COLOR: [f64; 3] = [0.01, 0.012, 0.03];
pub const KEY_LIGHT_WORLD: [f32; 3] = [5.0, 3.0, 5.0]; // direction toward the key light
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches so the starfield doesn't jump
