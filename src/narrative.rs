//! Structured-text rendering pipeline
//!
//! Turns the free-form, markdown-influenced analysis string produced by
//! the backend's language model into a tree of typed display blocks the
//! dashboard renders as nested cards. The input carries no format
//! guarantee, so rendering is best-effort and never fails: unexpected
//! content degrades to paragraphs or is dropped.
//!
//! # Format
//! - `## <icon> Title` opens a section; the lines that follow it, up to
//!   the next blank line, become its children
//! - `###` / `####` produce sub-section labels
//! - `**key**: value` produces a key/value row
//! - `- item` produces a bullet
//! - anything else non-blank is a paragraph

use serde::{Deserialize, Serialize};

/// Icons recognized at the start of a `##` header. Anything else falls
/// back to [`DEFAULT_ICON`].
pub const SECTION_ICONS: [&str; 9] =
    ["📊", "🕯️", "📈", "⚠️", "📋", "🎯", "🔴", "🟢", "🟡"];

/// Icon used when a section header carries no recognized icon
pub const DEFAULT_ICON: &str = "📋";

/// One node of the display tree.
///
/// Serialized with an internal `kind` tag so the dashboard script can walk
/// the tree without guessing at variant shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Top-level card produced from a `##` header line
    Section {
        icon: String,
        title: String,
        children: Vec<Block>,
    },
    /// `###` heading inside a section
    Subsection { label: String },
    /// `####` heading inside a section
    SubSubsection { label: String },
    /// `**key**: value` row
    KeyValue { key: String, value: String },
    /// `- item` list entry
    Bullet { text: String },
    /// Any other non-blank line
    Paragraph { text: String },
}

/// Tuning knobs for [`render_with`].
///
/// Defaults preserve the reference UI's behavior: raw blocks without a
/// `##` header are invisible at the top level.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderPolicy {
    /// Emit classified lines from headerless raw blocks at the root
    /// instead of discarding them
    pub keep_orphan_blocks: bool,
}

/// Render an analysis string into display blocks with the default policy.
///
/// Never fails; malformed input degrades to fewer or looser blocks.
pub fn render(text: &str) -> Vec<Block> {
    render_with(text, &RenderPolicy::default())
}

/// Render an analysis string under an explicit policy.
pub fn render_with(text: &str, policy: &RenderPolicy) -> Vec<Block> {
    let mut roots = Vec::new();

    for raw_block in text.split("\n\n") {
        let lines: Vec<&str> = raw_block
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        let Some((&first, rest)) = lines.split_first() else {
            continue;
        };

        if let Some((icon, title)) = parse_section_header(first) {
            let children = rest.iter().filter_map(|line| classify_line(line)).collect();
            roots.push(Block::Section {
                icon,
                title,
                children,
            });
        } else if policy.keep_orphan_blocks {
            // Headerless text is normally invisible; the policy surfaces it
            roots.extend(lines.iter().filter_map(|line| classify_line(line)));
        }
    }

    roots
}

/// Parse a `## Title` line into (icon, title), or None if the line does
/// not open a section. `###` and deeper markers are not sections.
fn parse_section_header(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix("##")?;
    if rest.starts_with('#') {
        return None;
    }

    let heading = strip_emphasis(rest.trim());

    for icon in SECTION_ICONS {
        if let Some(title) = heading.strip_prefix(icon) {
            return Some((icon.to_string(), title.trim().to_string()));
        }
    }

    // Unrecognized leading glyphs stay in the title
    Some((DEFAULT_ICON.to_string(), heading))
}

/// Ordered line classification; first match wins.
fn classify_line(line: &str) -> Option<Block> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(label) = trimmed.strip_prefix("####") {
        return Some(Block::SubSubsection {
            label: strip_emphasis(label.trim()),
        });
    }
    if let Some(label) = trimmed.strip_prefix("###") {
        return Some(Block::Subsection {
            label: strip_emphasis(label.trim()),
        });
    }
    if let Some((key, value)) = parse_key_value(trimmed) {
        return Some(Block::KeyValue { key, value });
    }
    if let Some(text) = trimmed.strip_prefix('-') {
        return Some(Block::Bullet {
            text: strip_emphasis(text.trim()),
        });
    }

    Some(Block::Paragraph {
        text: strip_emphasis(trimmed),
    })
}

/// Match the `**key**: value` pattern.
fn parse_key_value(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix("**")?;
    let (key, rest) = inner.split_once("**")?;
    let value = rest.trim_start().strip_prefix(':')?;
    Some((key.trim().to_string(), strip_emphasis(value.trim())))
}

/// Drop `**` emphasis markers; the dashboard styles blocks itself.
fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}
