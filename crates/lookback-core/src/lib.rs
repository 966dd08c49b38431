pub mod camera;
pub mod constants;
pub mod error;
pub mod interp;
pub mod model;
pub mod narrative;
pub mod phase;
pub mod pose;
pub mod reveal;
pub mod scroll;
pub mod timeline;
pub mod visual;

pub use camera::*;
pub use error::TimelineError;
pub use interp::*;
pub use model::*;
pub use narrative::Narrative;
pub use phase::*;
pub use pose::Pose;
pub use reveal::*;
pub use scroll::*;
pub use timeline::*;
pub use visual::*;

// Shaders bundled as string constants
pub static BODIES_WGSL: &str = include_str!("../shaders/bodies.wgsl");
pub static STARFIELD_WGSL: &str = include_str!("../shaders/starfield.wgsl");
