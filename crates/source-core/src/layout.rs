//! Dictionary layouts a source may be paired with.
//!
//! The kind of a layout is derived from its name: names starting with
//! `complex` are complex-key layouts, names starting with `range` are ranged,
//! everything else is simple.

use std::fmt;

/// Layout names exercised by the dictionary test matrix.
pub const LAYOUT_NAMES: [&str; 10] = [
    "flat",
    "hashed",
    "cache",
    "complex_key_hashed",
    "complex_key_hashed_one_key",
    "complex_key_hashed_two_keys",
    "complex_key_cache",
    "range_hashed",
    "direct",
    "complex_key_direct",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Simple,
    Complex,
    Ranged,
}

impl LayoutKind {
    fn from_name(name: &str) -> Self {
        if name.starts_with("complex") {
            LayoutKind::Complex
        } else if name.starts_with("range") {
            LayoutKind::Ranged
        } else {
            LayoutKind::Simple
        }
    }
}

/// Descriptor of a target lookup structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub name: String,
    pub kind: LayoutKind,
}

impl Layout {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = LayoutKind::from_name(&name);
        Self { name, kind }
    }

    /// Every layout of the test matrix.
    pub fn catalog() -> Vec<Layout> {
        LAYOUT_NAMES.iter().map(|name| Layout::new(*name)).collect()
    }

    pub fn is_simple(&self) -> bool {
        self.kind == LayoutKind::Simple
    }

    pub fn is_complex(&self) -> bool {
        self.kind == LayoutKind::Complex
    }

    pub fn is_ranged(&self) -> bool {
        self.kind == LayoutKind::Ranged
    }

    /// Whether the layout queries its source on demand.
    pub fn is_cache(&self) -> bool {
        self.name.contains("cache")
    }

    /// Whether the layout reads its source directly on every lookup.
    pub fn is_direct(&self) -> bool {
        self.name.contains("direct")
    }

    /// XML element declaring this layout in a dictionary definition.
    ///
    /// The `*_one_key` / `*_two_keys` names are test-matrix aliases of
    /// `complex_key_hashed`.
    pub fn layout_str(&self) -> String {
        match self.name.as_str() {
            "cache" => "<cache><size_in_cells>128</size_in_cells></cache>".to_string(),
            "complex_key_cache" => {
                "<complex_key_cache><size_in_cells>128</size_in_cells></complex_key_cache>"
                    .to_string()
            }
            "complex_key_hashed_one_key" | "complex_key_hashed_two_keys" => {
                "<complex_key_hashed/>".to_string()
            }
            other => format!("<{other}/>"),
        }
    }

    /// Name of the key block in a dictionary structure definition.
    pub fn key_block_name(&self) -> &'static str {
        if self.is_complex() {
            "key"
        } else {
            "id"
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
