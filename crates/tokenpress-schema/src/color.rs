use serde::de::{SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// An HSLA color: hue 0-360, saturation 0-100, lightness 0-100, alpha 0-1.
///
/// Serialized as the compact 4-tuple `[h, s, l, a]`. Whole-number channels
/// are written without a decimal point so the encoded form is stable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub const BLACK: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 1.0,
    };

    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    pub fn with_lightness(&self, l: f64) -> Self {
        Self { l, ..*self }
    }
}

fn compact(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Value::from(n)
    }
}

impl Serialize for Hsla {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(4))?;
        for channel in [self.h, self.s, self.l, self.a] {
            seq.serialize_element(&compact(channel))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Hsla {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HslaVisitor;

        impl<'de> Visitor<'de> for HslaVisitor {
            type Value = Hsla;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an [h, s, l, a] 4-tuple")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Hsla, A::Error> {
                let mut channels = [0.0f64; 4];
                for (i, slot) in channels.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(Hsla::new(channels[0], channels[1], channels[2], channels[3]))
            }
        }

        deserializer.deserialize_seq(HslaVisitor)
    }
}

/// The semantic color roles a theme defines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SemanticColor {
    Primary,
    Secondary,
    RedLike,
    YellowLike,
    GreenLike,
    Neutral,
}

impl SemanticColor {
    pub fn as_token(&self) -> &'static str {
        match self {
            SemanticColor::Primary => "primary",
            SemanticColor::Secondary => "secondary",
            SemanticColor::RedLike => "redLike",
            SemanticColor::YellowLike => "yellowLike",
            SemanticColor::GreenLike => "greenLike",
            SemanticColor::Neutral => "neutral",
        }
    }
}

/// Subtle (`soft`) versus strong (`solid`) rendition of a semantic color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EmphasisVariant {
    Soft,
    Solid,
}

impl EmphasisVariant {
    pub fn as_token(&self) -> &'static str {
        match self {
            EmphasisVariant::Soft => "soft",
            EmphasisVariant::Solid => "solid",
        }
    }
}

/// Tones of the soft track: 1% granularity up to 10, then 5% steps to 30.
pub const SOFT_TONES: [u8; 15] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 20, 25, 30];

/// Tones of the solid track: 5-or-10% steps from 40 to 100. Tone 50 is the
/// anchor and carries the source color's natural lightness.
pub const SOLID_TONES: [u8; 10] = [40, 45, 50, 55, 60, 65, 70, 80, 90, 100];

/// A tone-to-color mapping for one emphasis track of a semantic color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneTrack {
    tones: BTreeMap<u8, Hsla>,
}

impl ToneTrack {
    /// Derives the soft track from an anchor color: light washes whose
    /// lightness decreases from near-white as the tone grows.
    pub fn soft(anchor: Hsla) -> Self {
        let tones = SOFT_TONES
            .iter()
            .map(|&tone| (tone, anchor.with_lightness(100.0 - f64::from(tone))))
            .collect();
        Self { tones }
    }

    /// Derives the solid track from an anchor color. Tone 50 keeps the
    /// anchor's natural lightness; other tones shift lightness relative to
    /// it, darker as the tone grows.
    pub fn solid(anchor: Hsla) -> Self {
        let tones = SOLID_TONES
            .iter()
            .map(|&tone| {
                let l = (anchor.l - (f64::from(tone) - 50.0)).clamp(0.0, 100.0);
                (tone, anchor.with_lightness(l))
            })
            .collect();
        Self { tones }
    }

    pub fn resolve(&self, tone: u8) -> Option<&Hsla> {
        self.tones.get(&tone)
    }

    pub fn tones(&self) -> impl Iterator<Item = (u8, &Hsla)> {
        self.tones.iter().map(|(t, c)| (*t, c))
    }
}

/// Both emphasis tracks of one semantic color. Every semantic entry in a
/// theme must define both, which this struct enforces by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmphasisTracks {
    pub soft: ToneTrack,
    pub solid: ToneTrack,
}

impl EmphasisTracks {
    pub fn derive(anchor: Hsla) -> Self {
        Self {
            soft: ToneTrack::soft(anchor),
            solid: ToneTrack::solid(anchor),
        }
    }

    pub fn track(&self, variant: EmphasisVariant) -> &ToneTrack {
        match variant {
            EmphasisVariant::Soft => &self.soft,
            EmphasisVariant::Solid => &self.solid,
        }
    }
}

/// A theme's full color table: every semantic color with both tracks.
pub type ThemeColors = BTreeMap<SemanticColor, EmphasisTracks>;
