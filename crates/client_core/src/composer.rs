/// CSS custom property adjusted as the message box grows.
pub const COMPOSER_PADDING_PROPERTY: &str = "--composer-extra-padding";

const DEFAULT_COLUMNS: usize = 60;
const DEFAULT_LINE_HEIGHT_PX: u32 = 20;

/// Layout metrics of the message box used for auto-resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerMetrics {
    /// Characters that fit on one visual line before wrapping.
    pub columns: usize,
    pub line_height_px: u32,
}

impl Default for ComposerMetrics {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            line_height_px: DEFAULT_LINE_HEIGHT_PX,
        }
    }
}

impl ComposerMetrics {
    /// Number of visual lines `value` occupies; an empty box is one line.
    pub fn visual_lines(&self, value: &str) -> usize {
        let columns = self.columns.max(1);
        value
            .split('\n')
            .map(|line| line.chars().count().div_ceil(columns).max(1))
            .sum()
    }

    /// Value for [`COMPOSER_PADDING_PROPERTY`]; non-zero only from two lines up.
    pub fn extra_padding(&self, value: &str) -> String {
        let lines = self.visual_lines(value);
        if lines < 2 {
            return "0px".to_string();
        }
        let extra = (lines - 1) as u64 * u64::from(self.line_height_px);
        format!("{extra}px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ComposerMetrics {
        ComposerMetrics {
            columns: 10,
            line_height_px: 18,
        }
    }

    #[test]
    fn counts_explicit_and_wrapped_lines() {
        let m = metrics();
        assert_eq!(m.visual_lines(""), 1);
        assert_eq!(m.visual_lines("short"), 1);
        assert_eq!(m.visual_lines("exactly10!"), 1);
        assert_eq!(m.visual_lines("eleven chars"), 2);
        assert_eq!(m.visual_lines("a\nb"), 2);
        assert_eq!(m.visual_lines("a\n\nb"), 3);
    }

    #[test]
    fn padding_grows_only_past_one_line() {
        let m = metrics();
        assert_eq!(m.extra_padding("hi"), "0px");
        assert_eq!(m.extra_padding("hi\nthere"), "18px");
        assert_eq!(m.extra_padding("1\n2\n3"), "36px");
    }

    #[test]
    fn wraps_by_characters_not_bytes() {
        let m = metrics();
        assert_eq!(m.visual_lines("éééééééééé"), 1);
    }
}
