/// ProgressReporter port for reporting progress during a run
///
/// This port abstracts progress reporting (e.g., to stderr) so that
/// stdout stays free for requested document output.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a known number of steps
    ///
    /// # Arguments
    /// * `current` - Steps completed so far
    /// * `total` - Total number of steps
    /// * `message` - Optional label of the current step
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
