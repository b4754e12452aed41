//! Export jobs produced by the session state machine

use super::geometry::{Rect, Segment};

/// Which raster to build from the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Crop of the snapshot, no annotations
    Region { rect: Rect },
    /// Crop of the snapshot with the measurement drawn relative to the crop
    RegionWithMeasurement { rect: Rect, measure: Segment },
    /// Whole snapshot with the measurement drawn at its original position
    FullScreen { measure: Segment },
}

impl ExportKind {
    /// File name prefix for rasters produced by this kind
    pub fn file_prefix(&self) -> FilePrefix {
        match self {
            ExportKind::Region { .. } => FilePrefix::Region,
            ExportKind::RegionWithMeasurement { .. } | ExportKind::FullScreen { .. } => {
                FilePrefix::Plain
            }
        }
    }
}

/// Where an export goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportTarget {
    /// Clipboard and file according to the persisted preferences
    #[default]
    Preferences,
    /// Clipboard only, regardless of preferences (explicit copy)
    ClipboardOnly,
}

/// A single export request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportJob {
    pub kind: ExportKind,
    pub target: ExportTarget,
}

/// File name stem chosen by the export path that produced the raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePrefix {
    /// `MeasuringStick_<timestamp>`
    Plain,
    /// `MeasuringStick_Region_<timestamp>`
    Region,
}

impl FilePrefix {
    pub fn stem(self) -> &'static str {
        match self {
            FilePrefix::Plain => "MeasuringStick",
            FilePrefix::Region => "MeasuringStick_Region",
        }
    }
}
