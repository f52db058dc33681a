pub mod double_tap;
pub mod input;
pub mod lifecycle;
pub mod touch;

pub use input::{KeyCommand, WheelOutcome, key_command, wheel_outcome};
pub use lifecycle::ViewerPhase;
pub use touch::{TouchPoint, TouchState};
