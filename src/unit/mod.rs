pub mod fsm;
pub mod fsm_tests;
pub mod status;

pub use fsm::UnitFsm;
pub use status::StatusCell;
