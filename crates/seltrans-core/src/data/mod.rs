//! Domain enums shared by the settings and designer crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which bounding box of an item is used as the reference box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BBoxType {
    /// Extents including stroke width and markers
    #[default]
    Visual,
    /// Path/shape extents only
    Geometric,
}

impl fmt::Display for BBoxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visual => write!(f, "visual"),
            Self::Geometric => write!(f, "geometric"),
        }
    }
}

impl FromStr for BBoxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visual" => Ok(Self::Visual),
            "geometric" => Ok(Self::Geometric),
            _ => Err(format!("Unknown bounding box type: {}", s)),
        }
    }
}

/// How the live drag is previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShowMode {
    /// Items are transformed live
    #[default]
    Content,
    /// Only an outline rectangle follows the pointer
    Outline,
}

impl fmt::Display for ShowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => write!(f, "content"),
            Self::Outline => write!(f, "outline"),
        }
    }
}

impl FromStr for ShowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "content" => Ok(Self::Content),
            "outline" => Ok(Self::Outline),
            _ => Err(format!("Unknown show mode: {}", s)),
        }
    }
}
