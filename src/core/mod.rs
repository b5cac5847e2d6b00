pub mod flow;
pub mod person;
