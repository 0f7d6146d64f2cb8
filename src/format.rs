use regex::Regex;
use std::f64::consts::PI;
use std::sync::LazyLock;

static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)\b[a-z]").expect("word-start pattern is valid"));

/// Scores at or below 1 are fractions; anything above is already a percent.
#[inline]
pub fn normalize_score_to_percent(score: f64) -> f64 {
    if score <= 1.0 {
        score * 100.0
    } else {
        score
    }
}

/// Rounds halves toward positive infinity (2.5 -> 3, -2.5 -> -2).
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Whole percent as shown next to a ranked row.
pub fn display_percent(score: f64) -> i64 {
    round_half_up(normalize_score_to_percent(score)) as i64
}

pub fn format_percent(score: f64) -> String {
    format!("{}%", display_percent(score))
}

/// Rounds and clamps an already-normalized percent into `0..=100`.
pub fn clamp_percent(value: f64) -> u8 {
    round_half_up(value).clamp(0.0, 100.0) as u8
}

/// Uppercases the first ASCII letter of every word.
pub fn title_case(value: &str) -> String {
    WORD_START
        .replace_all(value, |caps: &regex::Captures| caps[0].to_ascii_uppercase())
        .into_owned()
}

/// `"20-29"` becomes `"20-29 y.o."`; labels without digits or already suffixed pass through.
pub fn age_display(age: &str) -> String {
    if age.is_empty() {
        return String::new();
    }
    if age.to_lowercase().contains("y.o") {
        return age.to_string();
    }
    if age.chars().any(|c| c.is_ascii_digit()) {
        return format!("{} y.o.", age);
    }
    age.to_string()
}

/// Case-insensitive comparison ignoring surrounding whitespace.
pub fn labels_equal(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// Geometry of the circular confidence indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub size: f64,
    pub stroke_width: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self {
            size: 384.0,
            stroke_width: 3.0,
        }
    }
}

impl RingGeometry {
    pub fn new(size: f64, stroke_width: f64) -> Self {
        Self { size, stroke_width }
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0 - self.stroke_width / 2.0
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius()
    }

    /// Stroke dash offset leaving `percent` of the ring filled.
    pub fn offset(&self, percent: u8) -> f64 {
        self.circumference() * (1.0 - f64::from(percent) / 100.0)
    }
}
