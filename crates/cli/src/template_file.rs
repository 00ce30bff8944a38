use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slant::mesh::{AreaSpec, Bound, Direction, LayoutTemplate, LineSpec, Side};
use std::fs;
use std::path::Path;

/// JSON form of a layout template.
///
/// ```json
/// { "lines": [ { "direction": "horizontal", "start_ratio": 0.5, "end_ratio": 0.5 } ],
///   "areas": [ { "left": "left", "top": "top", "right": "right", "bottom": 0 } ] }
/// ```
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TemplateFile {
    pub lines: Vec<LineEntry>,
    pub areas: Vec<AreaEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LineEntry {
    pub direction: DirectionEntry,
    pub start_ratio: f64,
    pub end_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_end: Option<usize>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DirectionEntry {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SideEntry {
    Left,
    Top,
    Right,
    Bottom,
}

/// Interior line index or an outer side name.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BoundEntry {
    Line(usize),
    Outer(SideEntry),
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AreaEntry {
    pub left: BoundEntry,
    pub top: BoundEntry,
    pub right: BoundEntry,
    pub bottom: BoundEntry,
}

impl From<DirectionEntry> for Direction {
    fn from(d: DirectionEntry) -> Self {
        match d {
            DirectionEntry::Horizontal => Direction::Horizontal,
            DirectionEntry::Vertical => Direction::Vertical,
        }
    }
}

impl From<Direction> for DirectionEntry {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Horizontal => DirectionEntry::Horizontal,
            Direction::Vertical => DirectionEntry::Vertical,
        }
    }
}

impl From<BoundEntry> for Bound {
    fn from(b: BoundEntry) -> Self {
        match b {
            BoundEntry::Line(k) => Bound::Line(k),
            BoundEntry::Outer(SideEntry::Left) => Bound::Outer(Side::Left),
            BoundEntry::Outer(SideEntry::Top) => Bound::Outer(Side::Top),
            BoundEntry::Outer(SideEntry::Right) => Bound::Outer(Side::Right),
            BoundEntry::Outer(SideEntry::Bottom) => Bound::Outer(Side::Bottom),
        }
    }
}

impl From<Bound> for BoundEntry {
    fn from(b: Bound) -> Self {
        match b {
            Bound::Line(k) => BoundEntry::Line(k),
            Bound::Outer(Side::Left) => BoundEntry::Outer(SideEntry::Left),
            Bound::Outer(Side::Top) => BoundEntry::Outer(SideEntry::Top),
            Bound::Outer(Side::Right) => BoundEntry::Outer(SideEntry::Right),
            Bound::Outer(Side::Bottom) => BoundEntry::Outer(SideEntry::Bottom),
        }
    }
}

impl From<&TemplateFile> for LayoutTemplate {
    fn from(f: &TemplateFile) -> Self {
        LayoutTemplate {
            lines: f
                .lines
                .iter()
                .map(|l| LineSpec {
                    direction: l.direction.into(),
                    start_ratio: l.start_ratio,
                    end_ratio: l.end_ratio,
                    attach_start: l.attach_start,
                    attach_end: l.attach_end,
                })
                .collect(),
            areas: f
                .areas
                .iter()
                .map(|a| AreaSpec {
                    left: a.left.into(),
                    top: a.top.into(),
                    right: a.right.into(),
                    bottom: a.bottom.into(),
                })
                .collect(),
        }
    }
}

impl From<&LayoutTemplate> for TemplateFile {
    fn from(t: &LayoutTemplate) -> Self {
        TemplateFile {
            lines: t
                .lines
                .iter()
                .map(|l| LineEntry {
                    direction: l.direction.into(),
                    start_ratio: l.start_ratio,
                    end_ratio: l.end_ratio,
                    attach_start: l.attach_start,
                    attach_end: l.attach_end,
                })
                .collect(),
            areas: t
                .areas
                .iter()
                .map(|a| AreaEntry {
                    left: a.left.into(),
                    top: a.top.into(),
                    right: a.right.into(),
                    bottom: a.bottom.into(),
                })
                .collect(),
        }
    }
}

/// Read and validate a JSON template file.
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<LayoutTemplate> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file: TemplateFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    let template = LayoutTemplate::from(&file);
    template
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    Ok(template)
}
