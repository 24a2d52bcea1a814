pub mod instance;
pub mod node;
pub mod representation;
