//! Plain records handed to the rendering and cropping collaborators

use serde::{Deserialize, Serialize};

use super::bands::SegmentGroups;
use super::errors::SegmentResult;
use super::geometry::BoundingBox;
use super::label::Label;
use super::region::{Region, RegionCollection};

/// Serialized form of a single region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Integer label code
    pub label: u8,
    pub bbox: BoundingBox,
    pub description: String,
    /// Raw tag name, only for regions no rule recognized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl RegionRecord {
    #[must_use]
    pub fn label(&self) -> Option<Label> {
        Label::from_code(self.label)
    }
}

/// One band's records, top to bottom
pub type BandRecord = Vec<RegionRecord>;

impl<N> Region<N> {
    #[must_use]
    pub fn serialize(&self) -> RegionRecord {
        RegionRecord {
            label: self.label.code(),
            bbox: self.bbox,
            description: self.description.clone(),
            tag: (self.label == Label::Unknown).then(|| self.tag.clone()),
        }
    }
}

impl<N> RegionCollection<N> {
    #[must_use]
    pub fn serialize(&self) -> BandRecord {
        self.iter().map(Region::serialize).collect()
    }
}

impl<N> SegmentGroups<N> {
    #[must_use]
    pub fn serialize(&self) -> Vec<BandRecord> {
        self.iter().map(RegionCollection::serialize).collect()
    }

    /// Serialized bands as JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails.
    pub fn to_json(&self) -> SegmentResult<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }
}
