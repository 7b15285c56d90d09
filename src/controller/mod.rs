pub mod controller;
pub mod dispatch;

pub use controller::Controller;
pub use controller::Unit;
