// Status coloring: green for success, blue for warning, red for failure

use colored::Colorize;

use crate::domain::ExitClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.blue().to_string())
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    /// Color `text` according to the outcome class
    pub fn for_class(&self, class: ExitClass, text: &str) -> String {
        if class.is_success() {
            self.success(text)
        } else if class.is_warning() {
            self.warning(text)
        } else {
            self.failure(text)
        }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.enabled {
            style(text)
        } else {
            text.to_string()
        }
    }
}
