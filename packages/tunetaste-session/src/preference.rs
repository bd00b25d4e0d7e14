//! Preference vector returned by the analysis service, and its read-only
//! slider rendering.

use serde_json::Value;

/// Display labels for the high-level features the analysis service reports.
///
/// The service prefixes each positive class with a localized feature name
/// (`ダンサビリティ_danceable`); the plain Essentia names are accepted too.
const FEATURE_LABELS: &[(&str, &str)] = &[
    ("ダンサビリティ_danceable", "Danceable"),
    ("性別_female", "Female vocals"),
    ("アコースティック_acoustic", "Acoustic"),
    ("アグレッシブ_aggressive", "Aggressive"),
    ("エレクトロニック_electronic", "Electronic"),
    ("ハッピー_happy", "Happy"),
    ("パーティー_party", "Party"),
    ("リラックス_relaxed", "Relaxed"),
    ("サッド_sad", "Sad"),
    ("音色_bright", "Bright timbre"),
    ("調性_atonal", "Atonal"),
    ("ボーカル/インスト_instrumental", "Instrumental"),
    ("danceability_danceable", "Danceable"),
    ("gender_female", "Female vocals"),
    ("mood_acoustic_acoustic", "Acoustic"),
    ("mood_aggressive_aggressive", "Aggressive"),
    ("mood_electronic_electronic", "Electronic"),
    ("mood_happy_happy", "Happy"),
    ("mood_party_party", "Party"),
    ("mood_relaxed_relaxed", "Relaxed"),
    ("mood_sad_sad", "Sad"),
    ("timbre_bright", "Bright timbre"),
    ("tonal_atonal_atonal", "Atonal"),
    ("voice_instrumental_instrumental", "Instrumental"),
];

/// Human-readable label for a feature key, or the key itself when unknown.
pub fn display_label(key: &str) -> &str {
    FEATURE_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

/// Disabled slider showing one feature as a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub key: String,
    pub label: String,
    /// 0..=100
    pub percent: u8,
}

/// Feature name to normalized value, in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceVector {
    entries: Vec<(String, f64)>,
}

impl PreferenceVector {
    /// Extract the vector from an analysis payload.
    ///
    /// Accepts either `{ "preference_vector": { .. } }` or a flat feature map.
    /// Entries whose value is not a number (the service reports `null` for
    /// features it could not compute) are skipped. Returns `None` when the
    /// payload holds no object at all.
    pub fn from_analysis(analysis: &Value) -> Option<Self> {
        let map = match analysis.get("preference_vector") {
            Some(inner) => inner.as_object()?,
            None => analysis.as_object()?,
        };

        let entries = map
            .iter()
            .filter_map(|(key, value)| value.as_f64().map(|v| (key.clone(), v)))
            .collect();

        Some(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn sliders(&self) -> Vec<Slider> {
        self.iter()
            .map(|(key, value)| Slider {
                key: key.to_string(),
                label: display_label(key).to_string(),
                percent: to_percent(value),
            })
            .collect()
    }
}

fn to_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}
