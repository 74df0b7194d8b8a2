// File: botpanel-common/src/traits/mod.rs
pub mod transport_traits;

pub use transport_traits::HttpTransport;
#[cfg(any(test, feature = "mock"))]
pub use transport_traits::MockHttpTransport;
