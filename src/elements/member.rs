//! Structural members as entered by the user (columns, beams, bracings, ...)

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Axis, Vec3};

/// End releases for a member (components not transmitted across the end)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberReleases {
    /// Start releases [FX, FY, FZ, MX, MY, MZ]
    pub start: [bool; 6],
    /// End releases [FX, FY, FZ, MX, MY, MZ]
    pub end: [bool; 6],
}

impl MemberReleases {
    /// Create releases with no end releases
    pub fn none() -> Self {
        Self::default()
    }

    /// Moment releases at the start
    pub fn pin_start() -> Self {
        Self {
            start: [false, false, false, false, true, true],
            end: [false; 6],
        }
    }

    /// Moment releases at the end
    pub fn pin_end() -> Self {
        Self {
            start: [false; 6],
            end: [false, false, false, false, true, true],
        }
    }

    /// Moment releases at both ends
    pub fn pin_both() -> Self {
        Self {
            start: [false, false, false, false, true, true],
            end: [false, false, false, false, true, true],
        }
    }

    /// Keep only the ends selected by the flags; the rest become rigid
    pub fn restricted(&self, keep_start: bool, keep_end: bool) -> Self {
        Self {
            start: if keep_start { self.start } else { [false; 6] },
            end: if keep_end { self.end } else { [false; 6] },
        }
    }

    /// Combined releases as a 12-element array
    pub fn as_array(&self) -> [bool; 12] {
        let mut arr = [false; 12];
        arr[0..6].copy_from_slice(&self.start);
        arr[6..12].copy_from_slice(&self.end);
        arr
    }
}

/// Sub-type of a bracing member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracingKind {
    Vertical,
    Horizontal,
    Knee,
}

/// Type tag of a structural member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Column,
    Beam,
    Cantilever,
    Bracing(BracingKind),
    Staircase,
}

impl MemberKind {
    /// Position of this kind in the element emission order
    pub fn emission_rank(self) -> u8 {
        match self {
            MemberKind::Column => 0,
            MemberKind::Beam => 1,
            MemberKind::Cantilever => 2,
            MemberKind::Bracing(BracingKind::Vertical) => 3,
            MemberKind::Bracing(BracingKind::Horizontal) => 4,
            MemberKind::Bracing(BracingKind::Knee) => 5,
            MemberKind::Staircase => 6,
        }
    }

    /// Columns and staircases carry their load to the ground
    pub fn is_ground_bearing(self) -> bool {
        matches!(self, MemberKind::Column | MemberKind::Staircase)
    }

    /// Beams and cantilevers record load distances along their plan axis
    pub fn is_horizontal_framing(self) -> bool {
        matches!(self, MemberKind::Beam | MemberKind::Cantilever)
    }
}

/// A continuous structural member between two points (metres)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralMember {
    pub name: String,
    pub kind: MemberKind,
    pub start: Vec3,
    pub end: Vec3,
    /// Names of members whose endpoints touch this one
    #[serde(default)]
    pub connected: Vec<String>,
    #[serde(default)]
    pub releases: Option<MemberReleases>,
    /// Section designation
    pub section: String,
    /// Rotation about the member axis (degrees)
    #[serde(default)]
    pub orientation: f64,
    /// Owning frame/support
    #[serde(default)]
    pub frame: Option<String>,
}

impl StructuralMember {
    /// Create a new member
    pub fn new(name: &str, kind: MemberKind, start: Vec3, end: Vec3, section: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            start,
            end,
            connected: Vec::new(),
            releases: None,
            section: section.to_string(),
            orientation: 0.0,
            frame: None,
        }
    }

    /// Record members touching this one
    pub fn with_connections(mut self, names: &[&str]) -> Self {
        self.connected = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Set member end releases
    pub fn with_releases(mut self, releases: MemberReleases) -> Self {
        self.releases = Some(releases);
        self
    }

    /// Set rotation about the member axis
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = degrees;
        self
    }

    /// Attach the member to a frame
    pub fn in_frame(mut self, frame: &str) -> Self {
        self.frame = Some(frame.to_string());
        self
    }

    /// Length in metres
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn axis(&self, tol: f64) -> Axis {
        geometry::classify(&self.start, &self.end, tol)
    }
}
