//! Job lifecycle events.
//!
//! The job runner never talks to a presentation layer directly. It emits
//! [`JobEvent`]s through an [`EventDispatcher`]; handlers forward them to a
//! channel, a JSON stream, or anything else implementing [`EventHandler`].

use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::job::{JobId, JobResult, Task};

pub mod json_handler;

/// Which pipe of the child produced an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    // Lifecycle events
    Queued {
        id: JobId,
        task: Task,
        input: PathBuf,
        output: PathBuf,
    },
    Started {
        id: JobId,
        command_line: String,
    },
    OutputLine {
        id: JobId,
        stream: OutputStream,
        line: String,
    },
    Finished {
        id: JobId,
        task: Task,
        output: PathBuf,
        result: JobResult,
        exit_code: Option<i32>,
    },

    // Failure events
    ExecutableMissing {
        path: PathBuf,
    },

    /// Audible alert request (error, missing executable, nothing to reveal)
    Alert,
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &JobEvent);
}

#[derive(Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: JobEvent) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Forwards every event into an unbounded crossbeam channel.
///
/// Send failures (receiver dropped) are ignored.
pub struct ChannelEventHandler {
    sender: Sender<JobEvent>,
}

impl ChannelEventHandler {
    /// Creates the handler together with the receiving end.
    pub fn new() -> (Self, Receiver<JobEvent>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self { sender }, receiver)
    }
}

impl EventHandler for ChannelEventHandler {
    fn handle(&self, event: &JobEvent) {
        let _ = self.sender.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<JobEvent>>);

    impl EventHandler for Recorder {
        fn handle(&self, event: &JobEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_dispatcher_reaches_every_handler() {
        let first = Arc::new(Recorder(Mutex::new(Vec::new())));
        let second = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(first.clone());
        dispatcher.add_handler(second.clone());

        dispatcher.emit(JobEvent::Alert);

        assert_eq!(*first.0.lock().unwrap(), vec![JobEvent::Alert]);
        assert_eq!(*second.0.lock().unwrap(), vec![JobEvent::Alert]);
    }

    #[test]
    fn test_channel_handler_preserves_order() {
        let (handler, receiver) = ChannelEventHandler::new();
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(Arc::new(handler));

        dispatcher.emit(JobEvent::ExecutableMissing {
            path: PathBuf::from("/nope/ffmpeg"),
        });
        dispatcher.emit(JobEvent::Alert);

        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], JobEvent::ExecutableMissing { .. }));
        assert_eq!(events[1], JobEvent::Alert);
    }

    #[test]
    fn test_channel_handler_ignores_dropped_receiver() {
        let (handler, receiver) = ChannelEventHandler::new();
        drop(receiver);
        handler.handle(&JobEvent::Alert);
    }
}
