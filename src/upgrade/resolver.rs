// ABOUTME: Picks the newest catalog image in the same family as a machine's current image.
// ABOUTME: Malformed names never abort resolution; they fall back to "no upgrade".

use crate::controller::ImageCatalogEntry;
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::ImageIdentifier;

/// Resolve the latest image name for `current_image` from `catalog`.
///
/// Returns `current_image` unchanged when it does not follow the
/// `<prefix>-v<version>` convention (recording a warning in `diag`) or when no
/// same-family entry has a strictly greater version. Catalog entries of other
/// families or with unparsable versions are skipped.
pub fn resolve_latest(
    current_image: &str,
    catalog: &[ImageCatalogEntry],
    diag: &mut Diagnostics,
) -> String {
    match parse_current(current_image, diag) {
        Some(current) => latest_in_family(&current, current_image, catalog),
        None => current_image.to_string(),
    }
}

/// Parse a machine's current image, recording a warning if it is malformed.
///
/// `None` means no upgrade is possible whatever the catalog holds.
pub fn parse_current(current_image: &str, diag: &mut Diagnostics) -> Option<ImageIdentifier> {
    match ImageIdentifier::parse(current_image) {
        Ok(id) => Some(id),
        Err(e) => {
            diag.warn(Warning::malformed_image_identifier(current_image, e));
            None
        }
    }
}

/// Pick the newest catalog entry in `current`'s family, or `current_name`.
pub fn latest_in_family(
    current: &ImageIdentifier,
    current_name: &str,
    catalog: &[ImageCatalogEntry],
) -> String {
    let mut best_name = current_name;
    let mut best_version = current.version().clone();

    for entry in catalog {
        let version = match current.sibling_version(&entry.name) {
            None => continue,
            Some(Err(e)) => {
                tracing::debug!("{} - skipping: {}", entry.name, e);
                continue;
            }
            Some(Ok(version)) => version,
        };

        // Ties keep the earlier candidate
        if version > best_version {
            tracing::debug!("{} - newer than {}", entry.name, best_name);
            best_name = &entry.name;
            best_version = version;
        }
    }

    best_name.to_string()
}
