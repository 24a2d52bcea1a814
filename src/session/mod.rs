pub mod descriptor;
pub mod publish_session;
pub mod range;
