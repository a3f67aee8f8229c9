use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} sources - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Messages go to stderr so stdout stays free for document output. While
/// sources are being fetched an indicatif bar tracks them; the bar is cleared
/// before any warning or completion line is printed.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.borrow_mut();
        match pb_option.as_ref() {
            Some(pb) => {
                pb.set_length(total as u64);
                pb.clone()
            }
            None => {
                let style = ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-");
                let pb = ProgressBar::new(total as u64).with_style(style);
                *pb_option = Some(pb.clone());
                pb
            }
        }
    }

    /// Clears and drops the bar so the next step starts a fresh one
    fn clear_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.println(message),
            None => eprintln!("{}", message),
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
        if total > 0 && current >= total {
            drop(pb);
            self.clear_progress_bar();
        }
    }

    fn report_error(&self, message: &str) {
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }

    fn report_completion(&self, message: &str) {
        self.clear_progress_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}
