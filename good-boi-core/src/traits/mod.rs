pub mod camera_device;
pub mod inference_model;
pub mod session_delegate;
