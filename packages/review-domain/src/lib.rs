pub mod feedback_id;
pub mod importance;
pub mod role;
pub mod session;
pub mod tags;
