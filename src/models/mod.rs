mod document;
mod notice;

pub use document::*;
pub use notice::*;
