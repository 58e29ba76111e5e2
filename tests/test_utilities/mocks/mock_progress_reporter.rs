use depgraph_navigator::prelude::*;
use std::sync::{Arc, Mutex};

/// One call received by [`MockProgressReporter`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Message(String),
    Progress {
        current: usize,
        total: usize,
        label: Option<String>,
    },
    Error(String),
    Completion(String),
}

/// Mock ProgressReporter that records every call in order
///
/// Clones share the same log, so a test can keep one handle after moving
/// another into the coordinator.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.collect(|event| match event {
            ProgressEvent::Message(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.collect(|event| match event {
            ProgressEvent::Error(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn completions(&self) -> Vec<String> {
        self.collect(|event| match event {
            ProgressEvent::Completion(text) => Some(text.clone()),
            _ => None,
        })
    }

    fn collect<F>(&self, pick: F) -> Vec<String>
    where
        F: Fn(&ProgressEvent) -> Option<String>,
    {
        self.events.lock().unwrap().iter().filter_map(pick).collect()
    }

    fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.push(ProgressEvent::Message(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.push(ProgressEvent::Progress {
            current,
            total,
            label: message.map(str::to_string),
        });
    }

    fn report_error(&self, message: &str) {
        self.push(ProgressEvent::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.push(ProgressEvent::Completion(message.to_string()));
    }
}
