pub mod dispatcher;
pub mod executor;
pub mod manual;
