use crate::config::PreviewConfig;

/// Inclusive range the preview size may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewBounds {
    pub min: usize,
    pub max: usize,
}

impl PreviewBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, requested: usize) -> usize {
        requested.clamp(self.min, self.max.max(self.min))
    }
}

impl Default for PreviewBounds {
    fn default() -> Self {
        Self { min: 5, max: 50 }
    }
}

impl From<&PreviewConfig> for PreviewBounds {
    fn from(config: &PreviewConfig) -> Self {
        Self::new(config.min, config.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a> {
    pub shown: &'a [String],
    pub remaining: usize,
}

impl<'a> Preview<'a> {
    pub fn new(usernames: &'a [String], requested: usize, bounds: PreviewBounds) -> Self {
        let count = bounds.clamp(requested).min(usernames.len());
        Self {
            shown: &usernames[..count],
            remaining: usernames.len() - count,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + 'a {
        self.shown.iter().map(|u| at_handle(u))
    }

    pub fn is_truncated(&self) -> bool {
        self.remaining > 0
    }
}

pub fn at_handle(username: &str) -> String {
    format!("@{}", username)
}

/// One `@username` per line, no trailing newline.
pub fn to_text(usernames: &[String]) -> String {
    usernames
        .iter()
        .map(|u| at_handle(u))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single-column CSV with a header row and `\n` row terminators.
pub fn to_csv(usernames: &[String], header: &str) -> String {
    let capacity = header.len() + 1 + usernames.iter().map(|u| u.len() + 1).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    out.push_str(&csv_field(header));
    out.push('\n');

    for username in usernames {
        out.push_str(&csv_field(username));
        out.push('\n');
    }

    out
}

fn csv_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
