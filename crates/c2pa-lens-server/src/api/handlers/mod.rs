//! API request handlers

pub mod form;
pub mod sign;
pub mod verify;

use c2pa_lens_client::SharedProvenanceService;

use crate::config::ServerConfig;

pub use form::UploadForm;
pub use sign::sign_image;
pub use verify::verify_image;

/// Application state shared across handlers
pub struct AppState {
    /// Upstream verification and signing service
    pub service: SharedProvenanceService,
    /// Gateway configuration
    pub config: ServerConfig,
}
