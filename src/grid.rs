pub(crate) mod breathing;
pub(crate) mod cell;
pub(crate) mod layout;
pub(crate) mod reactive;
pub(crate) mod runtime;
