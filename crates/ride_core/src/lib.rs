pub mod estimator;
pub mod logging;
pub mod pricing;
pub mod remote;
pub mod routing;
pub mod spatial;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
