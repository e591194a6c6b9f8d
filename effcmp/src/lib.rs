//! `effcmp` compares measured curves against a reference curve.
//!
//! Two kinds of curves are supported: point-sampled curves with asymmetric uncertainties, as they
//! come out of efficiency calculations, and binned histograms or profiles. For both the crate
//! computes a ratio curve with propagated uncertainties, see [`ratio::compute_ratio`] and
//! [`binned::compute_binned_ratio`], and locates ratio values that fall outside of a visible range,
//! see [`outlier::find_outliers`].

mod convert;

pub mod align;
pub mod bin;
pub mod binned;
pub mod curve;
pub mod error;
pub mod outlier;
pub mod ratio;

pub use error::{Error, Result};
