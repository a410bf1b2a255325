//! Admin

pub(crate) mod stats;
