//! ANSI palette for the dashboard.
//!
//! Raw escape strings rather than a styling crate: the renderer emits
//! plain lines and the display driver only owns cursor and clear
//! sequences, so color stays a dumb string concern.

/// Immutable set of ANSI escape codes used by the renderer.
///
/// `Palette::plain()` produces an all-empty palette so tests can
/// assert on line content without escape noise.
#[derive(Debug, Clone)]
pub struct Palette {
    pub green: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
    pub cyan: &'static str,
    pub bold: &'static str,
    pub reset: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            green: "\x1b[32m",
            yellow: "\x1b[33m",
            red: "\x1b[31m",
            cyan: "\x1b[36m",
            bold: "\x1b[1m",
            reset: "\x1b[0m",
        }
    }
}

impl Palette {
    /// Creates a palette with no escape codes (for tests and dumb pipes).
    pub fn plain() -> Self {
        Self {
            green: "",
            yellow: "",
            red: "",
            cyan: "",
            bold: "",
            reset: "",
        }
    }

    /// Returns the color for a remaining-quota percentage.
    ///
    /// Three tiers, not a continuous scale:
    /// - above 50%: healthy (green)
    /// - above 20%: warning (yellow)
    /// - otherwise: critical (red)
    pub fn quota_color(&self, percent: f64) -> &'static str {
        if percent > 50.0 {
            self.green
        } else if percent > 20.0 {
            self.yellow
        } else {
            self.red
        }
    }

    /// Wraps `text` in a color code and the reset code.
    pub fn paint(&self, color: &str, text: &str) -> String {
        format!("{color}{text}{}", self.reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_color_healthy() {
        let p = Palette::default();
        assert_eq!(p.quota_color(100.0), p.green);
        assert_eq!(p.quota_color(50.1), p.green);
    }

    #[test]
    fn test_quota_color_warning() {
        let p = Palette::default();
        // Exactly 50 is not "> 50"
        assert_eq!(p.quota_color(50.0), p.yellow);
        assert_eq!(p.quota_color(20.1), p.yellow);
    }

    #[test]
    fn test_quota_color_critical() {
        let p = Palette::default();
        // Exactly 20 is not "> 20"
        assert_eq!(p.quota_color(20.0), p.red);
        assert_eq!(p.quota_color(0.0), p.red);
    }

    #[test]
    fn test_paint() {
        let p = Palette::default();
        assert_eq!(p.paint(p.cyan, "55052"), "\x1b[36m55052\x1b[0m");
    }

    #[test]
    fn test_plain_palette_has_no_escapes() {
        let p = Palette::plain();
        assert_eq!(p.paint(p.cyan, "text"), "text");
        assert_eq!(p.quota_color(80.0), "");
    }
}
