//! Count-up animation for statistic figures.
//!
//! The displayed figure climbs from zero to its target in a fixed number of
//! discrete steps. Step timing is owned by the caller; this module only knows
//! which text each step shows.

#[cfg(test)]
#[path = "counter_test.rs"]
mod counter_test;

/// Parsed statistic text: the integer to count to plus its trailing markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterTarget {
    pub value: u64,
    pub percent: bool,
    pub plus: bool,
}

impl CounterTarget {
    /// Extract the integer from text like `"1,234+"` or `"98%"`.
    ///
    /// Every non-digit is dropped before parsing, so separators vanish. Text
    /// without digits (or with more than fit a `u64`) yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        let value = match digits.parse::<u64>() {
            Ok(value) => value,
            Err(_) => return None,
        };
        Some(Self { value, percent: text.contains('%'), plus: text.contains('+') })
    }

    #[must_use]
    pub fn render(&self, value: u64) -> String {
        let mut out = value.to_string();
        if self.percent {
            out.push('%');
        }
        if self.plus {
            out.push('+');
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: CounterTarget,
    steps: u32,
    step: u32,
    shown: Option<u64>,
}

impl CounterAnimation {
    #[must_use]
    pub fn new(target: CounterTarget, steps: u32) -> Self {
        Self { target, steps: steps.max(1), step: 0, shown: None }
    }

    #[must_use]
    pub fn target(&self) -> CounterTarget {
        self.target
    }

    /// Move one step forward and return the text to display, or `None` once the
    /// target has been shown.
    pub fn advance(&mut self) -> Option<String> {
        if self.is_finished() {
            return None;
        }
        self.step += 1;
        let scaled = u128::from(self.target.value) * u128::from(self.step) / u128::from(self.steps);
        let value = u64::try_from(scaled).unwrap_or(self.target.value).min(self.target.value);
        self.shown = Some(value);
        Some(self.target.render(value))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.step >= self.steps || self.shown == Some(self.target.value)
    }
}
