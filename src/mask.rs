pub(crate) mod handle;
pub(crate) mod raster;
pub(crate) mod state_machine;
pub(crate) mod weight_cache;
