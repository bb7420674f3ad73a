pub(crate) mod builtin;
pub(crate) mod library;
pub(crate) mod template;
