pub mod macros;
pub mod structs;

pub use structs::Command;
pub use structs::DispatchError;
pub use structs::Motion;
pub use structs::Request;
pub use structs::UnitSnapshot;
