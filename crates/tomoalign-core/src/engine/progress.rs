/// Events emitted by long-running workflows.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// A phase with `total` units of work has begun.
    Started { phase: &'static str, total: u64 },
    /// This many units of the current phase have completed.
    Advanced(u64),
    Finished,
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// A reporter without a callback swallows every event, so workflows can
/// report unconditionally.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn start(&self, phase: &'static str, total: u64) {
        self.report(Progress::Started { phase, total });
    }

    #[inline]
    pub fn advance(&self, steps: u64) {
        self.report(Progress::Advanced(steps));
    }

    pub fn finish(&self) {
        self.report(Progress::Finished);
    }
}
