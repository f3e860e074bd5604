//! Installation gallery.
//!
//! A fixed set of completed installations, split into residential and
//! commercial projects, shown on `/gallery`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallKind {
    Residential,
    Commercial,
}

impl InstallKind {
    /// Every kind, in tab order.
    pub const ALL: [Self; 2] = [Self::Residential, Self::Commercial];

    /// URL slug.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for InstallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Slug that names no installation kind.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown installation kind: {0}")]
pub struct UnknownInstallKind(pub String);

impl FromStr for InstallKind {
    type Err = UnknownInstallKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownInstallKind(s.to_string()))
    }
}

/// A completed installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub title: &'static str,
    pub kind: InstallKind,
    pub image: &'static str,
}

const fn install(title: &'static str, kind: InstallKind, image: &'static str) -> Installation {
    Installation { title, kind, image }
}

static INSTALLATIONS: [Installation; 8] = [
    install(
        "Mountain Residence",
        InstallKind::Residential,
        "https://images.unsplash.com/photo-1594818371393-324628bed359?auto=format&fit=crop&q=80&w=800",
    ),
    install(
        "Tech Hub Commercial",
        InstallKind::Commercial,
        "https://images.unsplash.com/photo-1559302995-f0a1bc1548de?auto=format&fit=crop&q=80&w=800",
    ),
    install(
        "Smart Home Hub",
        InstallKind::Residential,
        "https://images.unsplash.com/photo-1508514177221-188b1cf16e9d?auto=format&fit=crop&q=80&w=800",
    ),
    install(
        "Industrial Array",
        InstallKind::Commercial,
        "https://images.unsplash.com/photo-1466611653911-954ffea11271?auto=format&fit=crop&q=80&w=800",
    ),
    install(
        "Eco Cabin Kit",
        InstallKind::Residential,
        "https://images.unsplash.com/photo-1592833159057-6fdc2a5c317a?auto=format&fit=crop&q=80&w=800",
    ),
    install(
        "City Rooftop Install",
        InstallKind::Commercial,
        "https://images.unsplash.com/photo-1613665813446-82a78c44b8fe?auto=format&fit=crop&q=80&w=800",
    ),
    install(
        "Farmstead Off-Grid",
        InstallKind::Residential,
        "https://images.unsplash.com/photo-1611365892117-00ac5ef43759?auto=format&fit=crop&q=80&w=800",
    ),
    install(
        "Solar Farm Alpha",
        InstallKind::Commercial,
        "https://images.unsplash.com/photo-1548337138-e8df27224385?auto=format&fit=crop&q=80&w=800",
    ),
];

/// Installations of the given kind, or all of them.
#[must_use]
pub fn installations(kind: Option<InstallKind>) -> Vec<&'static Installation> {
    INSTALLATIONS
        .iter()
        .filter(|item| kind.is_none_or(|k| item.kind == k))
        .collect()
}
