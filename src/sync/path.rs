//! Canonical remote paths
//!
//! | raw path                    | supplier | canonical                     |
//! |-----------------------------|----------|-------------------------------|
//! | `outputs/ACME/orders.csv`   | any      | unchanged                     |
//! | `C:\exports\orders.csv`     | `ACME`   | `outputs/ACME/orders.csv`     |
//! | `exports/orders.csv`        | none     | `outputs/exports/orders.csv`  |
//!
//! Backslashes are normalized to `/` before the rule is applied.

use crate::error::TransportError;

/// Logical prefix of every remote output path
pub const OUTPUTS_PREFIX: &str = "outputs/";

/// Normalize a raw path into the identifier the transport addresses.
pub fn canonical_path(raw: &str, supplier: Option<&str>) -> Result<String, TransportError> {
    let normalized = raw.trim().replace('\\', "/");
    if normalized.is_empty() {
        return Err(TransportError::InvalidPath(raw.to_string()));
    }

    if normalized.starts_with(OUTPUTS_PREFIX) {
        return Ok(normalized);
    }

    match supplier.map(str::trim).filter(|s| !s.is_empty()) {
        Some(supplier) => {
            let name = basename(&normalized)
                .ok_or_else(|| TransportError::InvalidPath(raw.to_string()))?;
            Ok(format!("{}{}/{}", OUTPUTS_PREFIX, supplier, name))
        }
        None => Ok(format!("{}{}", OUTPUTS_PREFIX, normalized)),
    }
}

/// Last non-empty path segment of a `/`-separated path
pub fn basename(path: &str) -> Option<&str> {
    path.rsplit('/').find(|segment| !segment.is_empty())
}
