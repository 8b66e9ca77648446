pub mod availability;
pub mod documents;
pub mod editor;
pub mod slug;
pub mod status;
