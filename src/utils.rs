//! Utility functions

use crate::brand::Brand;

/// Clapperboard mark; `{a}`/`{b}` are replaced with the brand gradient stops.
const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 96 96"><defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{a}"/><stop offset="1" stop-color="{b}"/></linearGradient></defs><rect width="96" height="96" rx="24" fill="url(#g)"/><path fill="#fff" d="M22 40h52v30a4 4 0 0 1-4 4H26a4 4 0 0 1-4-4z"/><path fill="#fff" d="M21 30.5l49-9.5 1.9 9.8-49 9.5z"/><path fill="url(#g)" d="M31 28.6l6.6 8.2 7-1.4-6.6-8.2zM45 25.9l6.6 8.2 7-1.4-6.6-8.2z"/></svg>"##;

fn hex(c: egui::Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

fn logo_svg(brand: Brand) -> String {
    let (a, b) = brand.accent();
    LOGO_SVG.replace("{a}", &hex(a)).replace("{b}", &hex(b))
}

/// Rasterize the brand logo to a square RGBA image (straight alpha).
pub fn rasterize_logo(brand: Brand, size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let svg = logo_svg(brand);
    let tree = resvg::usvg::Tree::from_str(&svg, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_rasterizes_for_both_brands() {
        for brand in [Brand::CineAi, Brand::FlickFinder] {
            let (pixels, w, h) = rasterize_logo(brand, 64).expect("logo renders");
            assert_eq!((w, h), (64, 64));
            assert_eq!(pixels.len(), 64 * 64 * 4);
            // Rounded-corner background: the centre is opaque
            let centre = ((32 * 64 + 32) * 4 + 3) as usize;
            assert_eq!(pixels[centre], 255);
        }
    }

    #[test]
    fn brand_colors_are_substituted() {
        let svg = logo_svg(Brand::CineAi);
        assert!(svg.contains("#60a5fa"));
        assert!(!svg.contains("{a}"));
    }
}
