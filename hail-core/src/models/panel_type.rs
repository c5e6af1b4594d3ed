use serde::{Deserialize, Serialize};

/// Pricing curve shared by a set of panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelGroup {
    /// Hood, roof and trunk lid.
    Flat,
    /// Fenders, doors, quarters and rails.
    Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PanelType {
    Hood,
    Roof,
    Trunk,
    /// Left front fender
    Lff,
    /// Left front door
    Lfd,
    /// Left rear door ("gate")
    Lg,
    /// Left quarter panel
    Lq,
    Lrail,
    /// Right front fender
    Rff,
    /// Right front door
    Rfd,
    /// Right rear door ("gate")
    Rg,
    /// Right quarter panel
    Rq,
    Rrail,
}

impl PanelType {
    pub const ALL: [PanelType; 13] = [
        Self::Hood,
        Self::Roof,
        Self::Trunk,
        Self::Lff,
        Self::Lfd,
        Self::Lg,
        Self::Lq,
        Self::Lrail,
        Self::Rff,
        Self::Rfd,
        Self::Rg,
        Self::Rq,
        Self::Rrail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hood => "HOOD",
            Self::Roof => "ROOF",
            Self::Trunk => "TRUNK",
            Self::Lff => "LFF",
            Self::Lfd => "LFD",
            Self::Lg => "LG",
            Self::Lq => "LQ",
            Self::Lrail => "LRAIL",
            Self::Rff => "RFF",
            Self::Rfd => "RFD",
            Self::Rg => "RG",
            Self::Rq => "RQ",
            Self::Rrail => "RRAIL",
        }
    }

    /// Parses a panel code. Matching is exact; callers normalize case first.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.as_str() == s)
    }

    pub fn group(&self) -> PanelGroup {
        match self {
            Self::Hood | Self::Roof | Self::Trunk => PanelGroup::Flat,
            _ => PanelGroup::Side,
        }
    }
}

impl std::fmt::Display for PanelType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
