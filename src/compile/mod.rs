pub mod compositor;
pub(crate) mod icons;
pub mod plan;
pub mod text;
