pub mod matrix;
pub mod project;
pub mod transform;
