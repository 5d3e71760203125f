//! Geometry hint extraction from CRS remarks.
//!
//! Stored Gaussian datasets sometimes carry only a free-form remark inside
//! their coordinate-reference-system description (e.g.
//! `"+proj=longlat +datum=WGS84 grid=o1280"`). The remark is treated as an
//! opaque bag of tokens; the only thing extracted is a known catalog key.

use grid_geometry::GaussianGridType;

/// Scan a free-form CRS remark for a known Gaussian grid type token.
///
/// Returns the first recognized catalog key, or `None` when the remark
/// names no supported grid.
pub fn gaussian_type_from_remark(remark: &str) -> Option<GaussianGridType> {
    remark
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .find_map(|token| GaussianGridType::parse(token).ok())
}
