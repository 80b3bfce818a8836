//! SVG help card renderer

use std::fmt::Write;

use super::{HelpRenderer, RenderedImage};
use crate::catalog::{Catalog, CommandEntry, PermissionTier};
use crate::config::RenderConfig;
use crate::{Error, Result};

const PADDING: u32 = 24;
const TITLE_HEIGHT: u32 = 56;
const GROUP_HEADER_HEIGHT: u32 = 36;
const ROW_HEIGHT: u32 = 28;
const GROUP_GAP: u32 = 16;
const BADGE_WIDTH: u32 = 76;
/// Approximate advance of one narrow glyph at the body font size
const GLYPH_WIDTH: u32 = 8;

/// Renders the catalog as an SVG document
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    /// Create a renderer with the given settings
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn height(catalog: &Catalog) -> u32 {
        catalog.groups().fold(PADDING * 2 + TITLE_HEIGHT, |acc, (_, entries)| {
            let rows = u32::try_from(entries.len()).unwrap_or(u32::MAX);
            acc.saturating_add(GROUP_HEADER_HEIGHT)
                .saturating_add(rows.saturating_mul(ROW_HEIGHT))
                .saturating_add(GROUP_GAP)
        })
    }

    fn write_document(&self, catalog: &Catalog, out: &mut String) -> std::fmt::Result {
        let width = self.config.width;
        let height = Self::height(catalog);
        let inner = width - PADDING * 2;
        let command_col = inner * 3 / 10;
        let badge_space = if self.config.show_permission { BADGE_WIDTH + 8 } else { 0 };
        let desc_budget = width_units(inner.saturating_sub(command_col + badge_space + 16));
        let command_budget = width_units(command_col.saturating_sub(8));

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
        )?;
        writeln!(out, r##"<rect width="100%" height="100%" fill="#f5f6fa"/>"##)?;
        writeln!(
            out,
            r##"<text x="{PADDING}" y="{}" font-size="28" font-weight="bold" fill="#2f3640">{}</text>"##,
            PADDING + 32,
            escape(&self.config.title)
        )?;

        let mut y = PADDING + TITLE_HEIGHT;
        for (display_name, entries) in catalog.groups() {
            let rows = u32::try_from(entries.len()).unwrap_or(u32::MAX);
            let card_height = GROUP_HEADER_HEIGHT.saturating_add(rows.saturating_mul(ROW_HEIGHT));

            writeln!(
                out,
                r##"<rect x="{PADDING}" y="{y}" width="{inner}" height="{card_height}" rx="8" fill="#ffffff" stroke="#dcdde1"/>"##
            )?;
            writeln!(
                out,
                r##"<text x="{}" y="{}" font-size="18" font-weight="bold" fill="#273c75">{} ({})</text>"##,
                PADDING + 16,
                y.saturating_add(24),
                escape(display_name),
                entries.len()
            )?;

            let mut row_y = y.saturating_add(GROUP_HEADER_HEIGHT);
            for entry in entries {
                self.write_row(out, entry, row_y, command_col, command_budget, desc_budget)?;
                row_y = row_y.saturating_add(ROW_HEIGHT);
            }

            y = y.saturating_add(card_height).saturating_add(GROUP_GAP);
        }

        writeln!(out, "</svg>")
    }

    fn write_row(
        &self,
        out: &mut String,
        entry: &CommandEntry,
        y: u32,
        command_col: u32,
        command_budget: usize,
        desc_budget: usize,
    ) -> std::fmt::Result {
        let baseline = y.saturating_add(19);

        writeln!(
            out,
            r##"<text x="{}" y="{baseline}" font-size="14" font-family="monospace" font-weight="bold" fill="#192a56">{}</text>"##,
            PADDING + 16,
            escape(&truncate(&entry.command, command_budget))
        )?;

        if !entry.desc.is_empty() {
            writeln!(
                out,
                r##"<text x="{}" y="{baseline}" font-size="14" fill="#353b48">{}</text>"##,
                PADDING + 16 + command_col,
                escape(&truncate(&entry.desc, desc_budget))
            )?;
        }

        if self.config.show_permission {
            let x = self.config.width - PADDING - 8 - BADGE_WIDTH;
            writeln!(
                out,
                r##"<rect x="{x}" y="{}" width="{BADGE_WIDTH}" height="20" rx="10" fill="{}"/>"##,
                y.saturating_add(4),
                badge_color(entry.permission)
            )?;
            writeln!(
                out,
                r##"<text x="{}" y="{}" font-size="12" text-anchor="middle" fill="#ffffff">{}</text>"##,
                x + BADGE_WIDTH / 2,
                y.saturating_add(18),
                entry.permission
            )?;
        }

        Ok(())
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl HelpRenderer for SvgRenderer {
    fn render(&self, catalog: &Catalog) -> Result<RenderedImage> {
        if self.config.width < PADDING * 2 + BADGE_WIDTH * 2 {
            return Err(Error::Render(format!(
                "image width {} too small for layout",
                self.config.width
            )));
        }

        let mut svg = String::new();
        self.write_document(catalog, &mut svg)
            .map_err(|e| Error::Render(e.to_string()))?;

        tracing::debug!(
            groups = catalog.len(),
            bytes = svg.len(),
            "rendered help image"
        );

        Ok(RenderedImage {
            data: svg.into_bytes(),
            mime_type: "image/svg+xml".to_string(),
        })
    }
}

const fn badge_color(permission: PermissionTier) -> &'static str {
    match permission {
        PermissionTier::Admin => "#c23616",
        PermissionTier::Member => "#e1b12c",
        PermissionTier::Everyone => "#44bd32",
    }
}

/// Number of narrow glyphs that fit in `pixels`
fn width_units(pixels: u32) -> usize {
    usize::try_from(pixels / GLYPH_WIDTH).unwrap_or(usize::MAX)
}

/// Shorten text to `budget` narrow-glyph units, counting wide glyphs as two
fn truncate(text: &str, budget: usize) -> String {
    let glyph = |c: char| if c.is_ascii() { 1 } else { 2 };
    if text.chars().map(glyph).sum::<usize>() <= budget {
        return text.to_string();
    }

    let mut used = 1;
    let mut out = String::new();
    for c in text.chars() {
        used += glyph(c);
        if used > budget {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.push(
            "weather",
            CommandEntry {
                command: "today".to_string(),
                desc: "show today's <weather>".to_string(),
                permission: PermissionTier::Everyone,
            },
        );
        catalog.push(
            "admin & tools",
            CommandEntry {
                command: "reload".to_string(),
                desc: String::new(),
                permission: PermissionTier::Admin,
            },
        );
        catalog
    }

    fn render_text(renderer: &SvgRenderer, catalog: &Catalog) -> String {
        let image = renderer.render(catalog).unwrap();
        assert_eq!(image.mime_type, "image/svg+xml");
        String::from_utf8(image.data).unwrap()
    }

    #[test]
    fn renders_groups_in_order() {
        let svg = render_text(&SvgRenderer::default(), &catalog());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        let weather = svg.find("weather (1)").unwrap();
        let admin = svg.find("admin &amp; tools (1)").unwrap();
        assert!(weather < admin);
    }

    #[test]
    fn escapes_text() {
        let svg = render_text(&SvgRenderer::default(), &catalog());
        assert!(svg.contains("show today&apos;s &lt;weather&gt;"));
        assert!(!svg.contains("<weather>"));
    }

    #[test]
    fn permission_badges_optional() {
        let with = render_text(&SvgRenderer::default(), &catalog());
        assert!(with.contains(">admin</text>"));

        let renderer = SvgRenderer::new(RenderConfig {
            show_permission: false,
            ..RenderConfig::default()
        });
        let without = render_text(&renderer, &catalog());
        assert!(!without.contains(">admin</text>"));
        assert!(!without.contains(">everyone</text>"));
    }

    #[test]
    fn empty_catalog_renders_title_only() {
        let svg = render_text(&SvgRenderer::default(), &Catalog::new());
        assert!(svg.contains("Command Help"));
        assert!(!svg.contains("rx=\"8\""));
    }

    #[test]
    fn too_narrow_is_error() {
        let renderer = SvgRenderer::new(RenderConfig {
            width: 100,
            ..RenderConfig::default()
        });
        assert!(matches!(renderer.render(&catalog()), Err(Error::Render(_))));
    }

    #[test]
    fn rows_near_coordinate_limit_saturate() {
        let renderer = SvgRenderer::default();
        let catalog = catalog();
        let entry = &catalog.get("weather").unwrap()[0];
        let mut out = String::new();

        renderer
            .write_row(&mut out, entry, u32::MAX - 2, 200, 20, 40)
            .unwrap();

        assert!(out.contains(&format!("y=\"{}\"", u32::MAX)));
    }

    #[test]
    fn truncate_counts_wide_glyphs() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("天气预报服务", 6), "天气…");
    }
}
