//! Labeled regions and the ordered collection they are gathered in

use std::collections::HashSet;

use super::classifier::Classifier;
use super::element::{ElementFacade, ElementTree, describe};
use super::errors::SegmentResult;
use super::geometry::BoundingBox;
use super::label::Label;

/// One classified content-bearing area of the page
///
/// `node` is a plain handle into the tree the region came from. The region
/// never owns the node and the handle is only meaningful during the run that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Region<N> {
    pub node: N,
    pub bbox: BoundingBox,
    pub label: Label,
    pub description: String,
    /// Lowercase tag name of the source element
    pub tag: String,
}

impl<N: Clone> Region<N> {
    /// Build a region for an element: inspect, classify, describe
    ///
    /// # Errors
    ///
    /// Fails when the element has no parent element.
    pub fn from_node<T>(tree: &T, node: &N, classifier: &Classifier) -> SegmentResult<Self>
    where
        T: ElementTree<Node = N>,
    {
        let facade = ElementFacade::inspect(tree, node)?;
        let label = classifier.classify(&facade);
        Ok(Self {
            node: node.clone(),
            bbox: facade.bbox,
            label,
            description: describe(tree, node),
            tag: facade.tag_name,
        })
    }

    /// Copy of this region with its box moved vertically by `dy`
    #[must_use]
    pub fn translated(&self, dy: f64) -> Self {
        Self {
            bbox: self.bbox.translate_y(dy),
            ..self.clone()
        }
    }
}

/// Ordered collection of regions for one segmentation run
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCollection<N> {
    regions: Vec<Region<N>>,
}

impl<N> Default for RegionCollection<N> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<N> RegionCollection<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, region: Region<N>) -> &mut Self {
        self.regions.push(region);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region<N>> {
        self.regions.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Region<N>> {
        self.regions.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Region<N>] {
        &self.regions
    }

    /// Remove regions whose box is identical to an earlier one; first seen wins
    #[must_use]
    pub fn dedup_by_bbox(self) -> Self {
        let mut seen = HashSet::with_capacity(self.regions.len());
        let regions = self
            .regions
            .into_iter()
            .filter(|region| seen.insert(region.bbox.key()))
            .collect();
        Self { regions }
    }

    /// Stable ascending sort on the top edge
    #[must_use]
    pub fn sort_by_y(mut self) -> Self {
        self.regions.sort_by(|a, b| a.bbox.y.total_cmp(&b.bbox.y));
        self
    }
}

impl<N> From<Vec<Region<N>>> for RegionCollection<N> {
    fn from(regions: Vec<Region<N>>) -> Self {
        Self { regions }
    }
}

impl<N> FromIterator<Region<N>> for RegionCollection<N> {
    fn from_iter<I: IntoIterator<Item = Region<N>>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().collect(),
        }
    }
}

impl<N> IntoIterator for RegionCollection<N> {
    type Item = Region<N>;
    type IntoIter = std::vec::IntoIter<Region<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a RegionCollection<N> {
    type Item = &'a Region<N>;
    type IntoIter = std::slice::Iter<'a, Region<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}
