pub mod cache;
pub mod decode;
pub(crate) mod fonts;
pub mod store;
