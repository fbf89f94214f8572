//! Progress bar display for reloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress over a known number of packages
pub struct ProgressDisplay {
    package_pb: ProgressBar,
    current: usize,
}

impl ProgressDisplay {
    /// Create a new progress display with total package count
    pub fn new(total_packages: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let package_pb = ProgressBar::new(total_packages);
        package_pb.set_style(style);

        Self {
            package_pb,
            current: 0,
        }
    }

    /// Show `package` as the one being processed
    ///
    /// The previous package, if any, counts as done.
    pub fn start_package(&mut self, package: &str) {
        if self.current > 0 {
            self.package_pb.inc(1);
        }
        self.current += 1;
        self.package_pb.set_message(truncate(package, 50));
    }

    pub fn finish(&self) {
        if self.current > 0 {
            self.package_pb.inc(1);
        }
        self.package_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.package_pb.abandon();
    }
}

// Keep long names from wrapping the bar
fn truncate(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count > max {
        let tail: String = text.chars().skip(count - (max - 3)).collect();
        format!("...{}", tail)
    } else {
        text.to_string()
    }
}
