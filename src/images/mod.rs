//! Patient Images
//!
//! Loads a patient's image list for one image type at a time. Each load
//! takes a new request generation; a response that arrives after a newer
//! load started is discarded instead of overwriting the newer list.

mod loader;

pub use loader::{ImageListState, LoadOutcome, PatientImageLoader};
