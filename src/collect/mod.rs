pub mod batch;
pub mod emit;
pub mod pipeline;
pub mod slate;
