// ABOUTME: Validated domain types for machines, images, and credentials.
// ABOUTME: Parsing happens once at the boundary so the core works with checked values.

mod api_key;
mod image_identifier;
mod system_id;
mod version;

pub use api_key::{ApiKey, ApiKeyError};
pub use image_identifier::{ImageIdentifier, ParseImageIdentifierError, VERSION_SEPARATOR};
pub use system_id::{SystemId, SystemIdError};
pub use version::{ImageVersion, ParseVersionError};
