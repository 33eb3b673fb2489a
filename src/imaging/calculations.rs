//! Pure calculation functions for fixed-size image variants.
//!
//! All functions here are pure and testable without any I/O or images.

/// Pixel densities generated for a fixed image.
pub const DEFAULT_DENSITIES: [f32; 3] = [1.0, 1.5, 2.0];

/// A single density variant of a fixed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSize {
    pub density: f32,
    /// Output pixel width.
    pub width: u32,
    /// Output pixel height.
    pub height: u32,
}

/// Calculate which density variants to generate for a fixed display size.
///
/// A variant at density `d` is `display * d` pixels. Variants larger than the
/// source in either dimension are skipped, except `1x`, which is always
/// produced (upscaled if the source is smaller than the display size).
///
/// # Arguments
/// * `source` - Source image dimensions (width, height)
/// * `display` - Display size in CSS pixels (width, height)
/// * `densities` - Requested densities, in output order
///
/// # Examples
/// ```
/// # use simple_bio::imaging::calculate_fixed_sizes;
/// // 120x120 source, 50x50 display: every density fits
/// let sizes = calculate_fixed_sizes((120, 120), (50, 50), &[1.0, 1.5, 2.0]);
/// assert_eq!(sizes.len(), 3);
/// ```
pub fn calculate_fixed_sizes(
    source: (u32, u32),
    display: (u32, u32),
    densities: &[f32],
) -> Vec<FixedSize> {
    let (src_w, src_h) = source;
    let (disp_w, disp_h) = display;

    let mut result: Vec<FixedSize> = densities
        .iter()
        .map(|&density| FixedSize {
            density,
            width: (disp_w as f64 * density as f64).round() as u32,
            height: (disp_h as f64 * density as f64).round() as u32,
        })
        .filter(|size| size.density <= 1.0 || (size.width <= src_w && size.height <= src_h))
        .collect();

    if !result.iter().any(|s| s.density == 1.0) {
        result.insert(
            0,
            FixedSize {
                density: 1.0,
                width: disp_w,
                height: disp_h,
            },
        );
    }

    result
}

/// `srcset` density descriptor, e.g. `1x`, `1.5x`, `2x`.
pub fn density_descriptor(density: f32) -> String {
    format!("{}x", density)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn densities(sizes: &[FixedSize]) -> Vec<f32> {
        sizes.iter().map(|s| s.density).collect()
    }

    #[test]
    fn large_source_gets_all_densities() {
        let sizes = calculate_fixed_sizes((400, 400), (50, 50), &DEFAULT_DENSITIES);
        assert_eq!(densities(&sizes), vec![1.0, 1.5, 2.0]);
        assert_eq!((sizes[1].width, sizes[1].height), (75, 75));
        assert_eq!((sizes[2].width, sizes[2].height), (100, 100));
    }

    #[test]
    fn medium_source_skips_oversized_densities() {
        // 80px source: 75px fits, 100px does not
        let sizes = calculate_fixed_sizes((80, 80), (50, 50), &DEFAULT_DENSITIES);
        assert_eq!(densities(&sizes), vec![1.0, 1.5]);
    }

    #[test]
    fn small_source_still_gets_1x() {
        let sizes = calculate_fixed_sizes((30, 30), (50, 50), &DEFAULT_DENSITIES);
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes[0], FixedSize { density: 1.0, width: 50, height: 50 });
    }

    #[test]
    fn limiting_dimension_is_the_smaller_edge() {
        // Wide source: height limits 2x (100px) even though width allows it
        let sizes = calculate_fixed_sizes((1000, 90), (50, 50), &DEFAULT_DENSITIES);
        assert_eq!(densities(&sizes), vec![1.0, 1.5]);
    }

    #[test]
    fn one_x_added_when_not_requested() {
        let sizes = calculate_fixed_sizes((400, 400), (50, 50), &[2.0]);
        assert_eq!(densities(&sizes), vec![1.0, 2.0]);
    }

    #[test]
    fn non_square_display_size() {
        let sizes = calculate_fixed_sizes((500, 500), (40, 60), &[1.5]);
        assert_eq!((sizes[1].width, sizes[1].height), (60, 90));
    }

    #[test]
    fn density_descriptors() {
        assert_eq!(density_descriptor(1.0), "1x");
        assert_eq!(density_descriptor(1.5), "1.5x");
        assert_eq!(density_descriptor(2.0), "2x");
    }
}
