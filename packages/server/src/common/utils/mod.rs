pub mod seed;
pub mod text;

pub use seed::*;
pub use text::*;
