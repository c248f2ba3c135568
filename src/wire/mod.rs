use serde::{Deserialize, Serialize};
use std::fmt;

/// ========================================
/// Text protocol spoken with the model
/// ========================================

/// One of the three files the model is asked to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Markup,
    Styling,
    Scripting,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [SectionKind::Markup, SectionKind::Styling, SectionKind::Scripting];

    /// Literal token that both opens and closes the section in a completion.
    pub fn marker(self) -> &'static str {
        match self {
            SectionKind::Markup => "--html--",
            SectionKind::Styling => "--css--",
            SectionKind::Scripting => "--js--",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Markup => "markup",
            SectionKind::Styling => "styling",
            SectionKind::Scripting => "scripting",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.marker())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// Single-string form for transports without a separate system slot.
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system.trim_end(), self.user)
    }

    pub fn len(&self) -> usize {
        self.system.len() + self.user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.is_empty() && self.user.is_empty()
    }
}

/// File names the generated site is packaged under. The system prompt and the
/// link fixer both use these, so the inserted references always resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNames {
    pub markup: String,
    pub styling: String,
    pub scripting: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            markup: "index.html".into(),
            styling: "style.css".into(),
            scripting: "script.js".into(),
        }
    }
}

impl ArtifactNames {
    pub fn for_section(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Markup => &self.markup,
            SectionKind::Styling => &self.styling,
            SectionKind::Scripting => &self.scripting,
        }
    }
}

/// Raw sections as cut out of a completion, before link repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    pub markup: String,
    pub styling: String,
    pub scripting: String,
}

/// Which references the fixer had to add to the markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixReport {
    pub stylesheet_inserted: bool,
    pub script_inserted: bool,
}

/// The three final files of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub markup: String,
    pub styling: String,
    pub scripting: String,
    pub fixes: FixReport,
}

impl ArtifactSet {
    pub fn content(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Markup => &self.markup,
            SectionKind::Styling => &self.styling,
            SectionKind::Scripting => &self.scripting,
        }
    }

    /// (file name, content) pairs in markup, styling, scripting order.
    pub fn entries<'a>(&'a self, names: &'a ArtifactNames) -> [(&'a str, &'a str); 3] {
        SectionKind::ALL.map(|kind| (names.for_section(kind), self.content(kind)))
    }
}
