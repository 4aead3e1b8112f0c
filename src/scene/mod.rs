pub mod model;
pub mod review;
