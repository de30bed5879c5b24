pub mod ballistics;
pub mod error;
pub mod window;
