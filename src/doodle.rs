// 🎨 Doodle renderer - team record → SVG avatar
//
// Geometry is fixed; only the hair height, the colors and the shirt
// pattern vary. The skin tone (and the clip-path id) come from an RNG the
// caller supplies, so tests can seed it.

use crate::directory::{FALLBACK_ALT_COLOR, FALLBACK_SHIRT_COLOR};
use crate::record::{ShirtType, TeamRecord};
use html_escape::encode_double_quoted_attribute as attr;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Skin tones picked from uniformly, one per render
pub const SKIN_TONES: [&str; 5] = ["#F9D5B4", "#F1C27D", "#E0AC69", "#C68642", "#8D5524"];

pub const HAIR_COLOR: &str = "#2F1B0C";
const OUTLINE: &str = "#222";

// Body plan
const VIEW_WIDTH: f64 = 120.0;
const VIEW_HEIGHT: f64 = 200.0;
const HEAD_CX: f64 = 60.0;
const HEAD_CY: f64 = 40.0;
const HEAD_R: f64 = 22.0;
const SHIRT_X: f64 = 32.0;
const SHIRT_Y: f64 = 68.0;
const SHIRT_W: f64 = 56.0;
const SHIRT_H: f64 = 50.0;

// Hair
const HAIR_LEFT: f64 = 38.0;
const HAIR_RIGHT: f64 = 82.0;
const HAIR_STRANDS: usize = 12;
const MIN_HAIR_PX: i32 = 2;
/// Hair up to this height fits without growing the canvas
const NORMAL_HAIR_PX: i32 = 20;

/// Everything the renderer needs from a record
#[derive(Debug, Clone, PartialEq)]
pub struct DoodleSpec {
    pub color: String,
    pub alt_color: String,
    pub shirt_type: ShirtType,
    pub hair_px: i32,
}

impl DoodleSpec {
    pub fn new(color: impl Into<String>, alt_color: impl Into<String>, shirt_type: ShirtType, hair_px: i32) -> Self {
        DoodleSpec {
            color: color.into(),
            alt_color: alt_color.into(),
            shirt_type,
            hair_px,
        }
    }

    /// Spec for a record, given its resolved shirt color
    pub fn from_record(record: &TeamRecord, shirt_color: &str) -> Self {
        DoodleSpec::new(
            shirt_color,
            record.alt_color_hex.trim(),
            record.shirt_type,
            record.hair_px(),
        )
    }

    fn shirt(&self) -> &str {
        non_empty(&self.color, FALLBACK_SHIRT_COLOR)
    }

    fn alt(&self) -> &str {
        non_empty(&self.alt_color, FALLBACK_ALT_COLOR)
    }

    /// Drawn hair height, never below 2px
    pub fn hair_height(&self) -> i32 {
        self.hair_px.max(MIN_HAIR_PX)
    }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Pick a skin tone uniformly from the palette
pub fn pick_skin_tone<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SKIN_TONES.choose(rng).copied().unwrap_or(SKIN_TONES[0])
}

/// Render with a random skin tone and clip id drawn from `rng`
pub fn render_svg<R: Rng + ?Sized>(spec: &DoodleSpec, rng: &mut R) -> String {
    let skin = pick_skin_tone(rng);
    let clip_id = format!("shirtClip-{:08x}", rng.gen::<u32>());
    Doodle::new(spec, skin, clip_id).to_string()
}

/// Render with a fixed skin tone (deterministic)
pub fn render_svg_with_skin(spec: &DoodleSpec, skin: &str) -> String {
    Doodle::new(spec, skin, "shirtClip".to_string()).to_string()
}

/// One drawing: spec plus the per-render choices
pub struct Doodle<'a> {
    spec: &'a DoodleSpec,
    skin: &'a str,
    clip_id: String,
}

impl<'a> Doodle<'a> {
    pub fn new(spec: &'a DoodleSpec, skin: &'a str, clip_id: String) -> Self {
        Doodle { spec, skin, clip_id }
    }

    /// Extra canvas above y=0 for long hair
    pub fn extra_top(&self) -> i32 {
        (self.spec.hair_height() - NORMAL_HAIR_PX).max(0)
    }

    /// x positions of the hair strands
    pub fn strand_xs() -> Vec<f64> {
        let spacing = (HAIR_RIGHT - HAIR_LEFT) / (HAIR_STRANDS as f64 + 1.0);
        (1..=HAIR_STRANDS)
            .map(|i| round3(HAIR_LEFT + i as f64 * spacing))
            .collect()
    }

    fn write_hair(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spacing = (HAIR_RIGHT - HAIR_LEFT) / (HAIR_STRANDS as f64 + 1.0);
        // same stroke for every length so short hair isn't thinner
        let stroke = round3((spacing * 0.75).min(3.0));
        let head_top = HEAD_CY - HEAD_R;
        let top = head_top - self.spec.hair_height() as f64;

        for x in Self::strand_xs() {
            writeln!(
                f,
                r#"  <line x1="{x}" y1="{top}" x2="{x}" y2="{HEAD_CY}" stroke="{HAIR_COLOR}" stroke-width="{stroke}" stroke-linecap="round"/>"#
            )?;
        }
        Ok(())
    }

    fn write_pattern(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c1 = attr(self.spec.shirt());
        let c2 = attr(self.spec.alt());

        let rects: Vec<(f64, f64, f64, f64, &str)> = match self.spec.shirt_type {
            ShirtType::Striped => {
                let w = SHIRT_W / 5.0;
                (0..5)
                    .map(|i| {
                        let fill = if i % 2 == 0 { &*c1 } else { &*c2 };
                        (round3(SHIRT_X + i as f64 * w), SHIRT_Y, round3(w), SHIRT_H, fill)
                    })
                    .collect()
            }
            ShirtType::Hooped => {
                let h = SHIRT_H / 4.0;
                (0..4)
                    .map(|i| {
                        let fill = if i % 2 == 0 { &*c1 } else { &*c2 };
                        (SHIRT_X, SHIRT_Y + i as f64 * h, SHIRT_W, h, fill)
                    })
                    .collect()
            }
            ShirtType::Half => {
                let w = SHIRT_W / 2.0;
                vec![
                    (SHIRT_X, SHIRT_Y, w, SHIRT_H, &*c1),
                    (SHIRT_X + w, SHIRT_Y, w, SHIRT_H, &*c2),
                ]
            }
            ShirtType::Quarters => {
                let w = SHIRT_W / 2.0;
                let h = SHIRT_H / 2.0;
                vec![
                    (SHIRT_X, SHIRT_Y, w, h, &*c1),
                    (SHIRT_X + w, SHIRT_Y, w, h, &*c2),
                    (SHIRT_X, SHIRT_Y + h, w, h, &*c2),
                    (SHIRT_X + w, SHIRT_Y + h, w, h, &*c1),
                ]
            }
            ShirtType::Plain => vec![(SHIRT_X, SHIRT_Y, SHIRT_W, SHIRT_H, &*c1)],
        };

        for (x, y, w, h, fill) in rects {
            writeln!(
                f,
                r#"    <rect class="pattern" x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Doodle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extra = self.extra_top();
        let skin = attr(self.skin);
        let shirt = attr(self.spec.shirt());
        let alt = attr(self.spec.alt());
        let clip = attr(&self.clip_id);

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 {} {VIEW_WIDTH} {}" width="160" height="260">"#,
            -extra,
            VIEW_HEIGHT + extra as f64
        )?;

        self.write_hair(f)?;

        // head + neck
        writeln!(
            f,
            r#"  <circle cx="{HEAD_CX}" cy="{HEAD_CY}" r="{HEAD_R}" fill="{skin}" stroke="{OUTLINE}"/>"#
        )?;
        writeln!(f, r#"  <rect x="54" y="58" width="12" height="10" fill="{skin}"/>"#)?;

        // shirt pattern clipped to the rounded shirt shape
        writeln!(f, "  <defs>")?;
        writeln!(f, r#"    <clipPath id="{clip}">"#)?;
        writeln!(
            f,
            r#"      <rect x="{SHIRT_X}" y="{SHIRT_Y}" width="{SHIRT_W}" height="{SHIRT_H}" rx="10" ry="12"/>"#
        )?;
        writeln!(f, "    </clipPath>")?;
        writeln!(f, "  </defs>")?;
        writeln!(f, r#"  <g clip-path="url(#{clip})">"#)?;
        self.write_pattern(f)?;
        writeln!(f, "  </g>")?;
        writeln!(
            f,
            r#"  <rect x="{SHIRT_X}" y="{SHIRT_Y}" width="{SHIRT_W}" height="{SHIRT_H}" fill="none" stroke="{OUTLINE}" rx="10" ry="12"/>"#
        )?;

        // arms
        writeln!(f, r#"  <rect x="22" y="72" width="10" height="40" fill="{shirt}" rx="6"/>"#)?;
        writeln!(f, r#"  <rect x="88" y="72" width="10" height="40" fill="{shirt}" rx="6"/>"#)?;

        // shorts in the alt colour
        writeln!(
            f,
            r#"  <rect x="{SHIRT_X}" y="118" width="{SHIRT_W}" height="24" fill="{alt}" rx="6"/>"#
        )?;

        // legs, socks, boots
        for (y, h, fill) in [(142, 20, &*skin), (162, 20, &*shirt), (182, 10, "#000")] {
            writeln!(f, r#"  <rect x="40" y="{y}" width="14" height="{h}" fill="{fill}" rx="5"/>"#)?;
            writeln!(f, r#"  <rect x="66" y="{y}" width="14" height="{h}" fill="{fill}" rx="5"/>"#)?;
        }

        write!(f, "</svg>")
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
