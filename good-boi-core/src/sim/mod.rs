//! In-process stand-ins for the camera and the model, used by tests and by
//! hosts without real hardware.

pub mod camera;
pub mod model;

pub use camera::{AccessResponse, SimulatedCamera};
pub use model::ScriptedModel;
