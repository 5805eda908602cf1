use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    LinkedIn,
    TikTok,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::LinkedIn, Platform::TikTok];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::LinkedIn => "linkedin",
            Platform::TikTok => "tiktok",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
            Platform::TikTok => "TikTok",
        }
    }

    pub fn style(&self) -> &'static str {
        match self {
            Platform::Instagram => "visual, trendy, hashtag-friendly",
            Platform::LinkedIn => "professional, results-oriented, business-focused",
            Platform::TikTok => "trendy, informal, entertainment-focused",
        }
    }

    pub fn tone(&self) -> &'static str {
        match self {
            Platform::Instagram => "casual, engaging, visual-focused",
            Platform::LinkedIn => "authoritative, professional, value-driven",
            Platform::TikTok => "playful, energetic, trend-aware",
        }
    }

    /// Position in `ALL`; also selects the palette variant.
    pub fn index(&self) -> usize {
        match self {
            Platform::Instagram => 0,
            Platform::LinkedIn => 1,
            Platform::TikTok => 2,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Copy for a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopy {
    pub headline: String,
    pub body: String,
    pub keywords: Vec<String>,
    pub cta: String,
    /// Three hex colors and a one-line rationale, e.g. `#1D3557, #457B9D, #A8DADC - ...`.
    pub color_palette: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdCopyVariations {
    pub instagram: AdCopy,
    pub linkedin: AdCopy,
    pub tiktok: AdCopy,
}

impl AdCopyVariations {
    /// Builds the set from a per-platform constructor, called in `Platform::ALL` order.
    pub fn from_fn<F>(mut build: F) -> Self
    where
        F: FnMut(Platform) -> AdCopy,
    {
        Self {
            instagram: build(Platform::Instagram),
            linkedin: build(Platform::LinkedIn),
            tiktok: build(Platform::TikTok),
        }
    }

    pub fn get(&self, platform: Platform) -> &AdCopy {
        match platform {
            Platform::Instagram => &self.instagram,
            Platform::LinkedIn => &self.linkedin,
            Platform::TikTok => &self.tiktok,
        }
    }
}
