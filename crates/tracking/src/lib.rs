pub mod collector;
pub mod reconcile;
pub mod registry;
pub mod signature;
pub mod view;

pub use reconcile::{reconcile, Reconciliation, Snapshot};
pub use signature::Signature;
