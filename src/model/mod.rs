pub(crate) mod element;
pub(crate) mod layer;
pub(crate) mod layout;
pub(crate) mod project;
