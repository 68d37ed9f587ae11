//! Panels are titled text blocks; a report is the ordered list of panels for one run.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

pub const DEFAULT_INDENT: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    /// Pretty-printed with sorted keys.
    Json(Value),
    /// Printed verbatim.
    Text(String),
    /// One `- item` line per entry.
    List(Vec<String>),
    Missing(PathBuf),
    Unreadable { path: PathBuf, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub body: PanelBody,
}

impl Panel {
    pub fn json(title: impl Into<String>, value: Value) -> Self {
        Self {
            title: title.into(),
            body: PanelBody::Json(value),
        }
    }

    pub fn text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: PanelBody::Text(text.into()),
        }
    }

    /// `None` when there are no lines, so empty lists never produce a panel.
    pub fn list(title: impl Into<String>, lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        Some(Self {
            title: title.into(),
            body: PanelBody::List(lines),
        })
    }

    pub fn missing(title: impl Into<String>, path: PathBuf) -> Self {
        Self {
            title: title.into(),
            body: PanelBody::Missing(path),
        }
    }

    pub fn unreadable(title: impl Into<String>, path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: PanelBody::Unreadable {
                path,
                error: error.into(),
            },
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.body, PanelBody::Missing(_))
    }

    /// Blank line, `== title ==` header, then the body.
    pub fn write_to<W: Write>(&self, out: &mut W, indent: usize) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "== {} ==", self.title)?;
        match &self.body {
            PanelBody::Json(value) => writeln!(out, "{}", pretty_json(value, indent)?),
            PanelBody::Text(text) => writeln!(out, "{text}"),
            PanelBody::List(lines) => {
                for line in lines {
                    writeln!(out, "- {line}")?;
                }
                Ok(())
            }
            PanelBody::Missing(path) => writeln!(out, "(missing) {}", path.display()),
            PanelBody::Unreadable { path, error } => {
                writeln!(out, "(unreadable) {}: {error}", path.display())
            }
        }
    }
}

/// Deterministic pretty-printing: keys sorted, fixed indent width.
///
/// Documents keep their key order in memory; only the printed form is sorted.
pub fn pretty_json(value: &Value, indent: usize) -> io::Result<String> {
    let mut value = value.clone();
    value.sort_all_objects();
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(io::Error::other)?;
    String::from_utf8(buf).map_err(io::Error::other)
}

/// Ordered panels of one rendered run directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub panels: Vec<Panel>,
    pub indent: usize,
}

impl Report {
    pub fn new(indent: usize) -> Self {
        Self {
            panels: Vec::new(),
            indent,
        }
    }

    pub fn push(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    pub fn extend(&mut self, panels: impl IntoIterator<Item = Panel>) {
        self.panels.extend(panels);
    }

    pub fn titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title.as_str()).collect()
    }

    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for panel in &self.panels {
            panel.write_to(out, self.indent)?;
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        self.write_to(&mut buf).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}
