pub mod backend;
pub mod codec;
pub mod gateway;
pub mod locator;

pub use gateway::EmployeeStore;
