/// Width measurement for a candidate line, in the same units as the wrap limit.
pub trait MeasureText {
    /// Rendered width of `text`.
    fn measure(&mut self, text: &str) -> f64;
}

impl<F> MeasureText for F
where
    F: FnMut(&str) -> f64,
{
    fn measure(&mut self, text: &str) -> f64 {
        self(text)
    }
}

/// Greedy word wrap.
///
/// Words (split on whitespace) are joined by single spaces until adding the next word would make
/// the line measure strictly wider than `max_width`; the current line is then committed and the
/// word starts a new one. A word that is too wide on its own still gets its own line. The result
/// is never empty: input without any words comes back as a single line holding the input.
pub fn wrap_text(text: &str, max_width: f64, measure: &mut impl MeasureText) -> Vec<String> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return vec![text.to_string()];
    };

    let mut lines = Vec::new();
    let mut line = first.to_string();
    for word in words {
        let candidate = format!("{line} {word}");
        if measure.measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
