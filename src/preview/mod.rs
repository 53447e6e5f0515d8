//! Preview Module
//!
//! The client half of the pipeline: a local PDF cache, a trailing-edge
//! debouncer in front of the compile endpoint, and ownership of the PDF
//! handles shown to the user.

mod debounce;
mod handles;
mod session;
mod transport;

pub use debounce::Debouncer;
pub use handles::{HandleTable, PdfHandle};
pub use session::{PreviewOrigin, PreviewSession, PreviewState};
pub use transport::{CompileTransport, EndpointClient};
