//! Input validation for CLI-facing parameters.

use crate::error::SpaceLaunchError;
use crate::thumbnail::ThumbnailSize;

pub const MAX_PAGE_SIZE: u32 = 50;
pub const MAX_THUMBNAIL_EDGE: u32 = 1024;

/// Validate page size (must be 1..=50).
pub fn validate_page_size(page_size: u32) -> Result<u32, SpaceLaunchError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(SpaceLaunchError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

/// Validate the number of rows visible at once (must be >= 1).
pub fn validate_viewport_rows(rows: u32) -> Result<u32, SpaceLaunchError> {
    if rows == 0 {
        return Err(SpaceLaunchError::InvalidInput(
            "viewport must show at least one row".to_string(),
        ));
    }
    Ok(rows)
}

/// Validate a square thumbnail edge length in pixels (1..=1024).
pub fn validate_thumbnail_edge(edge: u32) -> Result<ThumbnailSize, SpaceLaunchError> {
    if !(1..=MAX_THUMBNAIL_EDGE).contains(&edge) {
        return Err(SpaceLaunchError::InvalidInput(format!(
            "thumbnail size must be between 1 and {} pixels",
            MAX_THUMBNAIL_EDGE
        )));
    }
    Ok(ThumbnailSize {
        width: edge,
        height: edge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_bounds() {
        assert_eq!(validate_page_size(1).unwrap(), 1);
        assert_eq!(validate_page_size(50).unwrap(), 50);
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(51).is_err());
    }

    #[test]
    fn viewport_rows_nonzero() {
        assert!(validate_viewport_rows(0).is_err());
        assert_eq!(validate_viewport_rows(12).unwrap(), 12);
    }

    #[test]
    fn thumbnail_edge() {
        let size = validate_thumbnail_edge(40).unwrap();
        assert_eq!((size.width, size.height), (40, 40));
        assert!(validate_thumbnail_edge(0).is_err());
        assert!(validate_thumbnail_edge(4096).is_err());
    }
}
