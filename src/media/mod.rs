pub mod mime;
pub mod store;
pub mod thumbs;
