pub(crate) mod cpu;
pub(crate) mod pass;
pub(crate) mod surface;
