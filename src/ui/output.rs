use crate::analysis::CategoryCounts;
use crate::error::{CheckerError, UserFriendlyError};
use crate::export::{AnalysisReport, Preview, PreviewBounds};
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static CAMERA: Emoji = Emoji("📸 ", "> ");
static BLOCKED: Emoji = Emoji("🚫 ", "- ");
static PARTY: Emoji = Emoji("🎉 ", "* ");

const CHART_WIDTH: usize = 40;

/// Everything needed to render the preview lists; passed explicitly per call.
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    pub count: usize,
    pub bounds: PreviewBounds,
}

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        self.print_message(MessageType::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.print_message(MessageType::Error, message);
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_message(MessageType::Warning, message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            self.print_message(MessageType::Info, message);
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            self.print_message(MessageType::Debug, message);
        }
    }

    pub fn print_user_friendly_error(&self, error: &CheckerError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            if self.mode == OutputMode::Human {
                eprintln!();
            }
            self.print_message(MessageType::Suggestion, &suggestion);
        }
    }

    /// Print the report to stdout. In JSON mode this is the only thing
    /// written to stdout, so the output parses as a single document.
    pub fn print_analysis_report(&self, report: &AnalysisReport, preview: PreviewOptions) {
        for line in self.render_report(report, preview) {
            println!("{}", line);
        }
    }

    pub fn render_report(&self, report: &AnalysisReport, preview: PreviewOptions) -> Vec<String> {
        match self.mode {
            OutputMode::Human => self.render_human_report(report, preview),
            OutputMode::Json => vec![
                serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
            ],
            OutputMode::Plain => self.render_plain_report(report, preview),
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn stream_for(&self, msg_type: MessageType) -> Stream {
        match (self.mode, msg_type) {
            // stdout is reserved for the report document
            (OutputMode::Json, _) => Stream::Stderr,
            (_, MessageType::Error | MessageType::Suggestion) => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    fn print_message(&self, msg_type: MessageType, message: &str) {
        let line = match self.mode {
            OutputMode::Human => self.format_human_message(msg_type, message),
            OutputMode::Json => format_json_message(msg_type, message),
            OutputMode::Plain => format!("{}: {}", msg_type.label().to_uppercase(), message),
        };

        match self.stream_for(msg_type) {
            Stream::Stdout => println!("{}", line),
            Stream::Stderr => eprintln!("{}", line),
        }
    }

    fn format_human_message(&self, msg_type: MessageType, message: &str) -> String {
        if !self.use_colors {
            return match msg_type {
                MessageType::Success => format!("✓ {}", message),
                MessageType::Error => format!("✗ {}", message),
                MessageType::Warning => format!("! {}", message),
                MessageType::Info => format!("i {}", message),
                MessageType::Debug => format!("  DEBUG: {}", message),
                MessageType::Suggestion => format!("Suggestion: {}", message),
            };
        }

        match msg_type {
            MessageType::Success => format!("{}{}", CHECKMARK, style(message).green().bold()),
            MessageType::Error => format!("{}{}", CROSS, style(message).red().bold()),
            MessageType::Warning => format!("{}{}", WARNING, style(message).yellow().bold()),
            MessageType::Info => format!("{}{}", INFO, style(message).cyan()),
            MessageType::Debug => format!("  {}", style(message).dim()),
            MessageType::Suggestion => format!(
                "{}{}",
                INFO,
                style(format!("Suggestion: {}", message)).cyan()
            ),
        }
    }

    fn render_header(&self, title: &str) -> Vec<String> {
        if self.quiet {
            return Vec::new();
        }

        let title = if self.use_colors {
            format!("{}{}", CAMERA, style(title).bold().cyan())
        } else {
            format!("=== {} ===", title)
        };
        vec![String::new(), title, String::new()]
    }

    fn render_separator(&self) -> Option<String> {
        if self.quiet {
            return None;
        }

        let rule = if self.use_colors {
            style("─".repeat(60)).dim().to_string()
        } else {
            "-".repeat(60)
        };
        Some(rule)
    }

    fn render_human_report(&self, report: &AnalysisReport, preview: PreviewOptions) -> Vec<String> {
        let result = &report.result;
        let mut lines = self.render_header("Instagram Follower Checker");

        if self.use_colors {
            lines.push(format!("{}{}", BLOCKED, style("People not following you back:").bold()));
        } else {
            lines.push("People not following you back:".to_string());
        }

        if result.not_following_back.is_empty() {
            lines.push(format!("{}Everyone you follow follows you back!", PARTY));
        } else {
            lines.extend(self.render_preview(Preview::new(
                &result.not_following_back,
                preview.count,
                preview.bounds,
            )));
        }
        lines.push(String::new());

        if !result.dont_follow_back.is_empty() {
            if self.use_colors {
                lines.push(style("People you don't follow back:").bold().to_string());
            } else {
                lines.push("People you don't follow back:".to_string());
            }
            lines.extend(self.render_preview(Preview::new(
                &result.dont_follow_back,
                preview.count,
                preview.bounds,
            )));
            lines.push(String::new());
        }

        lines.extend(self.render_separator());
        lines.push(format!(
            "  Followers: {}   Following: {}",
            self.highlight(report.followers.usernames),
            self.highlight(report.following.usernames)
        ));
        lines.push(String::new());
        lines.extend(self.render_chart(&report.counts));

        if !report.exported_files.is_empty() {
            lines.push(String::new());
            lines.push("Saved files:".to_string());
            lines.extend(report.exported_files.iter().map(|file| format!("  {}", file)));
        }
        lines.extend(self.render_separator());

        lines
    }

    fn render_preview(&self, preview: Preview<'_>) -> Vec<String> {
        let mut lines: Vec<String> = preview.lines().map(|line| format!("  {}", line)).collect();

        if preview.is_truncated() {
            let note = format!("...and {} more.", preview.remaining);
            if self.use_colors {
                lines.push(format!("  {}", style(note).dim()));
            } else {
                lines.push(format!("  {}", note));
            }
        }

        lines
    }

    fn render_chart(&self, counts: &CategoryCounts) -> Vec<String> {
        let largest = counts.largest();
        let label_width = counts
            .categories()
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);

        counts
            .categories()
            .into_iter()
            .map(|(label, count)| {
                let bar = "█".repeat(bar_length(count, largest, CHART_WIDTH));
                if self.use_colors {
                    format!(
                        "  {:<width$}  {} {}",
                        label,
                        style(bar).cyan(),
                        style(count).bold(),
                        width = label_width
                    )
                } else {
                    format!("  {:<width$}  {} {}", label, bar, count, width = label_width)
                }
            })
            .collect()
    }

    fn highlight(&self, value: usize) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }

    fn render_plain_report(&self, report: &AnalysisReport, preview: PreviewOptions) -> Vec<String> {
        let result = &report.result;
        let mut lines = vec![
            "REPORT: Follower comparison completed".to_string(),
            format!("Followers: {}", report.followers.usernames),
            format!("Following: {}", report.following.usernames),
            format!("Mutual: {}", report.counts.mutual),
            format!("Not following back: {}", report.counts.not_following_back),
            format!("You don't follow back: {}", report.counts.dont_follow_back),
        ];

        let lists = [
            ("NOT_FOLLOWING_BACK", &result.not_following_back),
            ("DONT_FOLLOW_BACK", &result.dont_follow_back),
        ];
        for (tag, usernames) in lists {
            let list = Preview::new(usernames, preview.count, preview.bounds);
            lines.extend(list.lines().map(|line| format!("{}: {}", tag, line)));
            if list.is_truncated() {
                lines.push(format!("{}_MORE: {}", tag, list.remaining));
            }
        }

        lines.extend(report.exported_files.iter().map(|file| format!("SAVED: {}", file)));
        lines
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
    Debug,
    Suggestion,
}

impl MessageType {
    fn label(&self) -> &'static str {
        match self {
            MessageType::Success => "success",
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::Info => "info",
            MessageType::Debug => "debug",
            MessageType::Suggestion => "suggestion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

fn format_json_message(msg_type: MessageType, message: &str) -> String {
    let obj = serde_json::json!({
        "type": "message",
        "level": msg_type.label(),
        "message": message,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });
    serde_json::to_string(&obj).unwrap_or_else(|_| "{}".to_string())
}

/// Bar length scaled against the largest category; non-zero counts always
/// get at least one cell.
fn bar_length(count: usize, largest: usize, width: usize) -> usize {
    if count == 0 || largest == 0 {
        return 0;
    }
    ((count * width) / largest).max(1)
}
