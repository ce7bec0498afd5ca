//! Partition of sorted regions into fixed-height bands
//!
//! Band `i` covers document rows `[i * band_height, (i + 1) * band_height)`.
//! Regions are translated into band-local coordinates as they are placed, so
//! a cropping collaborator can slice the full-page raster with the same
//! `band_height` and draw each band's regions directly onto its slice.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::errors::{SegmentError, SegmentResult};
use super::region::{Region, RegionCollection};

/// Reject band heights that cannot tile the page
///
/// # Errors
///
/// Returns [`SegmentError::InvalidConfig`] unless `band_height` is finite
/// and positive.
pub fn check_band_height(band_height: f64) -> SegmentResult<()> {
    if band_height.is_finite() && band_height > 0.0 {
        Ok(())
    } else {
        Err(SegmentError::InvalidConfig(format!(
            "band height must be a positive number, got {band_height}"
        )))
    }
}

/// What to do with a region whose top lies below the currently open band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandOverflow {
    /// Close bands (empty ones included) until the region's band is open, then place it
    #[default]
    Reassign,
    /// Close the open band, advance one band, and discard the region that triggered it
    Drop,
}

/// Ordered bands of band-local regions
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGroups<N> {
    bands: Vec<RegionCollection<N>>,
    band_height: f64,
}

impl<N> SegmentGroups<N> {
    #[must_use]
    pub fn bands(&self) -> &[RegionCollection<N>] {
        &self.bands
    }

    #[must_use]
    pub fn band_height(&self) -> f64 {
        self.band_height
    }

    /// Document-space top edge of band `index`
    #[must_use]
    pub fn band_offset(&self, index: usize) -> f64 {
        index as f64 * self.band_height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Total regions across all bands
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.bands.iter().map(RegionCollection::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionCollection<N>> {
        self.bands.iter()
    }
}

fn into_band_local<N>(region: Region<N>, offset: f64) -> Region<N> {
    Region {
        bbox: region.bbox.translate_y(-offset),
        ..region
    }
}

/// Split `regions` (deduped and sorted by ascending y) into bands
///
/// The output always holds at least one band; the last band is appended even
/// when empty.
///
/// # Errors
///
/// Fails for a zero, negative or non-finite `band_height`.
pub fn partition<N>(
    regions: RegionCollection<N>,
    band_height: f64,
    overflow: BandOverflow,
) -> SegmentResult<SegmentGroups<N>> {
    check_band_height(band_height)?;

    let mut bands = Vec::new();
    let mut band = RegionCollection::new();
    let mut offset = 0.0;
    let mut dropped = 0usize;

    for region in regions {
        if !region.bbox.y.is_finite() {
            warn!("Discarding <{}> region with non-finite y", region.tag);
            continue;
        }

        match overflow {
            BandOverflow::Reassign => {
                while region.bbox.y >= offset + band_height {
                    bands.push(std::mem::take(&mut band));
                    offset += band_height;
                }
                band.push(into_band_local(region, offset));
            }
            BandOverflow::Drop => {
                if region.bbox.y < offset + band_height {
                    band.push(into_band_local(region, offset));
                } else {
                    bands.push(std::mem::take(&mut band));
                    offset += band_height;
                    dropped += 1;
                }
            }
        }
    }
    bands.push(band);

    if dropped > 0 {
        debug!("Band partition dropped {dropped} regions at band boundaries");
    }

    Ok(SegmentGroups { bands, band_height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::geometry::BoundingBox;
    use crate::segmenter::label::Label;

    fn sorted(ys: &[f64]) -> RegionCollection<usize> {
        ys.iter()
            .enumerate()
            .map(|(id, &y)| Region {
                node: id,
                bbox: BoundingBox::new(0.0, y, 10.0, 10.0),
                label: Label::Text,
                description: String::new(),
                tag: "p".to_string(),
            })
            .collect()
    }

    fn split(ys: &[f64], overflow: BandOverflow) -> SegmentGroups<usize> {
        partition(sorted(ys), 720.0, overflow).unwrap()
    }

    fn band_ys(groups: &SegmentGroups<usize>) -> Vec<Vec<f64>> {
        groups
            .iter()
            .map(|band| band.iter().map(|r| r.bbox.y).collect())
            .collect()
    }

    #[test]
    fn test_reassign_places_region_in_its_band() {
        let groups = split(&[100.0, 800.0, 1500.0], BandOverflow::Reassign);
        assert_eq!(band_ys(&groups), vec![vec![100.0], vec![80.0], vec![60.0]]);
        assert_eq!(groups.region_count(), 3);
    }

    #[test]
    fn test_drop_discards_the_boundary_region() {
        let groups = split(&[100.0, 800.0, 1500.0], BandOverflow::Drop);
        // 800 closes band 0 and is lost; 1500 closes band 1 and is lost too
        assert_eq!(band_ys(&groups), vec![vec![100.0], vec![], vec![]]);
        assert_eq!(groups.region_count(), 1);
    }

    #[test]
    fn test_drop_keeps_followers_in_new_band() {
        let groups = split(&[100.0, 800.0, 900.0], BandOverflow::Drop);
        assert_eq!(band_ys(&groups), vec![vec![100.0], vec![180.0]]);
    }

    #[test]
    fn test_reassign_emits_empty_gap_bands() {
        let groups = split(&[10.0, 2200.0], BandOverflow::Reassign);
        assert_eq!(band_ys(&groups), vec![vec![10.0], vec![], vec![], vec![40.0]]);
        assert_eq!(groups.band_offset(3), 2160.0);
    }

    #[test]
    fn test_empty_input_yields_one_empty_band() {
        let groups = split(&[], BandOverflow::Reassign);
        assert_eq!(groups.len(), 1);
        assert!(groups.bands()[0].is_empty());
    }

    #[test]
    fn test_band_edge_belongs_to_next_band() {
        let groups = split(&[719.5, 720.0], BandOverflow::Reassign);
        assert_eq!(band_ys(&groups), vec![vec![719.5], vec![0.0]]);
    }

    #[test]
    fn test_non_finite_y_is_discarded() {
        let groups = split(&[10.0, f64::NAN, 30.0, f64::INFINITY], BandOverflow::Reassign);
        assert_eq!(band_ys(&groups), vec![vec![10.0, 30.0]]);
        let kept: Vec<usize> = groups.bands()[0].iter().map(|r| r.node).collect();
        assert_eq!(kept, vec![0, 2]);
    }

    #[test]
    fn test_degenerate_band_height_is_rejected() {
        for band_height in [0.0, -720.0, f64::NAN, f64::INFINITY] {
            for overflow in [BandOverflow::Reassign, BandOverflow::Drop] {
                let result = partition(sorted(&[10.0, 800.0]), band_height, overflow);
                assert!(
                    matches!(result, Err(SegmentError::InvalidConfig(_))),
                    "band height {band_height} should be rejected"
                );
            }
        }
    }
}
