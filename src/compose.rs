pub(crate) mod advisory;
pub(crate) mod bounds;
pub(crate) mod params;
pub(crate) mod placement;
