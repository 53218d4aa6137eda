//! CLI subcommand implementations.

pub(crate) mod info;
pub(crate) mod resample;
