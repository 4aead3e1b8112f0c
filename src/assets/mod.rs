pub mod blur;
pub mod color;
pub mod decode;
pub mod fonts;
pub mod palette;
