// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout presets per target platform, served from a read-only registry.
//
// The registry is built once on first access and never mutated afterwards, so
// any number of threads may look presets up concurrently.

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::Result;
use crate::types::Platform;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

/// Layout parameters for one target platform. Sizes are in points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub platform: Platform,
    pub page_size: PageSize,
    pub font_name: &'static str,
    pub font_size: f32,
    /// Line height as a multiple of `font_size`.
    pub line_spacing: f32,
    pub paragraph_spacing: f32,
    pub first_line_indent: f32,
    pub chapter_title_size: f32,
    pub chapter_title_spacing: f32,
    pub margins: Margins,
    pub header_footer: bool,
    pub drop_cap: bool,
    pub smart_quotes: bool,
}

impl Preset {
    /// E-reader layout shared by Kindle and Google Books.
    fn ereader(platform: Platform) -> Self {
        Self {
            platform,
            page_size: PageSize::LETTER,
            font_name: "Times-Roman",
            font_size: 16.0,
            line_spacing: 1.5,
            paragraph_spacing: 12.0,
            first_line_indent: 32.0,
            chapter_title_size: 24.0,
            chapter_title_spacing: 30.0,
            margins: Margins::uniform(72.0),
            header_footer: false,
            drop_cap: true,
            smart_quotes: true,
        }
    }

    fn print() -> Self {
        Self {
            platform: Platform::Print,
            page_size: PageSize::LETTER,
            font_name: "Times-Roman",
            font_size: 12.0,
            line_spacing: 1.15,
            paragraph_spacing: 8.0,
            first_line_indent: 24.0,
            chapter_title_size: 20.0,
            chapter_title_spacing: 24.0,
            margins: Margins::uniform(72.0),
            header_footer: true,
            drop_cap: true,
            smart_quotes: true,
        }
    }

    /// Body line height in points.
    pub fn leading(&self) -> f32 {
        self.font_size * self.line_spacing
    }
}

/// Read-only mapping from platform to its [`Preset`].
#[derive(Debug)]
pub struct StylePresetRegistry {
    presets: [Preset; 3],
}

static REGISTRY: LazyLock<StylePresetRegistry> = LazyLock::new(|| StylePresetRegistry {
    presets: [
        Preset::ereader(Platform::Kindle),
        Preset::ereader(Platform::GoogleBooks),
        Preset::print(),
    ],
});

impl StylePresetRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static StylePresetRegistry {
        &REGISTRY
    }

    /// Preset for a known platform.
    pub fn get(&self, platform: Platform) -> &Preset {
        match platform {
            Platform::Kindle => &self.presets[0],
            Platform::GoogleBooks => &self.presets[1],
            Platform::Print => &self.presets[2],
        }
    }

    /// Resolve a platform identifier, failing with `UnknownPlatform` for
    /// anything outside the fixed set.
    pub fn lookup(&self, platform_id: &str) -> Result<&Preset> {
        let platform: Platform = platform_id.parse()?;
        Ok(self.get(platform))
    }

    /// Registered platforms, in registry order.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.presets.iter().map(|preset| preset.platform)
    }
}

/// Look up a preset in the global registry.
pub fn lookup(platform_id: &str) -> Result<&'static Preset> {
    StylePresetRegistry::global().lookup(platform_id)
}

/// Infallible lookup for an already-validated platform.
pub fn preset_for(platform: Platform) -> &'static Preset {
    StylePresetRegistry::global().get(platform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;

    #[test]
    fn lookup_known_platforms() {
        let kindle = lookup("Kindle").unwrap();
        assert_eq!(kindle.platform, Platform::Kindle);
        assert_eq!(kindle.font_size, 16.0);
        assert!(!kindle.header_footer);

        let print = lookup("Print").unwrap();
        assert_eq!(print.font_size, 12.0);
        assert_eq!(print.first_line_indent, 24.0);
        assert!(print.header_footer);

        let google = lookup("GoogleBooks").unwrap();
        assert_eq!(google.platform, Platform::GoogleBooks);
        assert_eq!(google.page_size, PageSize::LETTER);
    }

    #[test]
    fn lookup_unknown_platform_fails() {
        let err = lookup("Nook").unwrap_err();
        assert!(matches!(err, FolioError::UnknownPlatform(ref id) if id == "Nook"));
    }

    #[test]
    fn registry_covers_every_platform_in_order() {
        let platforms: Vec<_> = StylePresetRegistry::global().platforms().collect();
        assert_eq!(platforms, Platform::ALL.to_vec());
        for platform in Platform::ALL {
            assert_eq!(preset_for(platform).platform, platform);
        }
    }

    #[test]
    fn lookups_return_the_same_static_instance() {
        let a = lookup("Print").unwrap();
        let b = preset_for(Platform::Print);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn leading_scales_font_size() {
        assert_eq!(preset_for(Platform::Kindle).leading(), 24.0);
    }
}
