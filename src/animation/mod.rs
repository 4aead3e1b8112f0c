pub mod ease;
pub mod timing;
