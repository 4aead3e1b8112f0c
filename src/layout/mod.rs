pub mod anchor;
pub mod bounds;
pub mod parley_text;
pub mod text;
