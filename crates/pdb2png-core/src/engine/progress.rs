use std::fmt;

/// The stages of a single render, in the order the workflow runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Loading,
    Coloring,
    Framing,
    Styling,
    RayTracing,
    Saving,
}

impl RenderPhase {
    pub fn label(self) -> &'static str {
        match self {
            RenderPhase::Loading => "Loading structure",
            RenderPhase::Coloring => "Coloring chains",
            RenderPhase::Framing => "Framing scene",
            RenderPhase::Styling => "Applying style",
            RenderPhase::RayTracing => "Ray tracing",
            RenderPhase::Saving => "Saving image",
        }
    }
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart(RenderPhase),
    PhaseFinish(RenderPhase),
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards workflow progress to an optional front-end callback.
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

    pub fn start(&self, phase: RenderPhase) {
        self.report(Progress::PhaseStart(phase));
    }

    pub fn finish(&self, phase: RenderPhase) {
        self.report(Progress::PhaseFinish(phase));
    }

    pub fn message(&self, message: impl Into<String>) {
        self.report(Progress::Message(message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn silent_reporter_accepts_events() {
        let reporter = ProgressReporter::new();
        reporter.start(RenderPhase::Loading);
        reporter.finish(RenderPhase::Loading);
    }

    #[test]
    fn callback_receives_events_in_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |p: Progress| {
            sink.lock().unwrap().push(p);
        }));

        reporter.start(RenderPhase::RayTracing);
        reporter.message("1600x1600");
        reporter.finish(RenderPhase::RayTracing);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Progress::PhaseStart(RenderPhase::RayTracing),
                Progress::Message("1600x1600".to_string()),
                Progress::PhaseFinish(RenderPhase::RayTracing),
            ]
        );
    }
}
