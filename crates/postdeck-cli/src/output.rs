// Output formatting and styling

use colored::Colorize;

/// Output styling configuration
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl OutputStyle {
    /// Style without colors, for piped output and tests
    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format success message
    pub fn success(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✓".green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format warning message
    pub fn warning(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "⚠".yellow(), msg)
        } else {
            format!("⚠ {}", msg)
        }
    }

    /// Format info message
    pub fn info(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "ℹ".blue(), msg)
        } else {
            format!("ℹ {}", msg)
        }
    }

    /// Format section header
    pub fn header(&self, title: &str) -> String {
        if self.use_colors {
            title.bold().underline().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format an entity id such as `#3`
    pub fn id(&self, id: impl std::fmt::Display) -> String {
        let id = format!("#{}", id);
        if self.use_colors {
            id.cyan().to_string()
        } else {
            id
        }
    }

    /// Format text that is meant to be copied verbatim
    pub fn code(&self, code: &str) -> String {
        if self.use_colors {
            code.cyan().to_string()
        } else {
            code.to_string()
        }
    }

    /// Format list item, marking the current one
    pub fn list_item(&self, item: &str, current: bool) -> String {
        match (current, self.use_colors) {
            (true, true) => format!("  {} {}", "▶".green(), item.bold()),
            (true, false) => format!("  ▶ {}", item),
            (false, _) => format!("    {}", item),
        }
    }
}

/// Print error message
pub fn print_error(msg: &str) {
    eprintln!("{}", OutputStyle::default().error(msg));
}
