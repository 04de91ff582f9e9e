// ABOUTME: Diagnostics accumulator for non-fatal warnings during an upgrade run.
// ABOUTME: Collects anomalies that shouldn't abort a workflow but should be shown to users.

/// Collects non-fatal warnings during upgrade operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if a warning of the given kind was collected.
    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during an upgrade run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The machine's current image does not follow `<prefix>-v<version>`.
    pub fn malformed_image_identifier(image: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            kind: WarningKind::MalformedImageIdentifier,
            message: format!("Unexpected image format {:?}: {}", image, reason),
        }
    }
}

/// Categories of warnings that can occur during an upgrade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Current image name could not be parsed; no upgrade attempted.
    MalformedImageIdentifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::malformed_image_identifier("jammy", "no version"));

        assert!(diag.has_warnings());
        assert!(diag.has(WarningKind::MalformedImageIdentifier));
        assert!(diag.warnings()[0].message.contains("jammy"));
    }
}
