// ============================================================================
// vidextract-core/src/runner.rs
// ============================================================================
//
// JOB RUNNER: Executes Jobs as Transcoder Child Processes
//
// A job runs on its own worker thread (see `JobRunner::spawn`), or on the
// caller's thread with `JobRunner::run`. Each child gets one reader thread per
// pipe; every line goes to the event dispatcher and the job log.
//
// KEY COMPONENTS:
// - JobRunner: Cloneable handle owning config, events, log and the registry
// - Registry: In-flight children keyed by JobId, the only shared mutable state
// - JobHandle: Join handle for a job running in the background
// - Completion handling: reveal on success, cleanup on cancel/error
//
// CONCURRENCY:
// The worker polls `try_wait` while holding the child lock only for the
// duration of the call. `cancel` and `shutdown` take the same lock to kill
// the child, mark the entry cancelled, and let the worker classify the exit.
//
// AI-ASSISTANT-INFO: Job execution, cancellation and completion handling

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_wait_error};
use crate::events::{EventDispatcher, JobEvent, OutputStream};
use crate::external::{self, alert, remove_output, reveal_in_file_browser};
use crate::job::{Job, JobId, JobResult, Task};
use crate::joblog::JobLog;

// ---- External crate imports ----
use log::{debug, error, info, warn};

// ---- Standard library imports ----
use std::collections::HashMap;
use std::fs;
use std::io;
use std::process::{Child, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Interval between exit checks of a running child.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ============================================================================
// REGISTRY
// ============================================================================

struct RunningEntry {
    job: Job,
    child: Mutex<Child>,
    cancelled: AtomicBool,
}

impl RunningEntry {
    /// Kills the child unless it has already exited. Only a child that was
    /// still running when killed is marked cancelled.
    fn kill(&self) -> io::Result<()> {
        let mut child = self.child.lock().unwrap_or_else(|e| e.into_inner());
        if child.try_wait()?.is_some() {
            return Ok(());
        }
        self.cancelled.store(true, Ordering::SeqCst);
        child.kill()
    }
}

#[derive(Default)]
struct Registry {
    entries: Mutex<HashMap<JobId, Arc<RunningEntry>>>,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, HashMap<JobId, Arc<RunningEntry>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn insert(&self, entry: Arc<RunningEntry>) {
        self.lock().insert(entry.job.id(), entry);
    }

    fn remove(&self, id: JobId) {
        self.lock().remove(&id);
    }

    fn get(&self, id: JobId) -> Option<Arc<RunningEntry>> {
        self.lock().get(&id).cloned()
    }

    fn drain(&self) -> Vec<Arc<RunningEntry>> {
        self.lock().drain().map(|(_, entry)| entry).collect()
    }

    fn jobs(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.lock().values().map(|e| e.job.clone()).collect();
        jobs.sort_by_key(Job::id);
        jobs
    }
}

// ============================================================================
// JOB HANDLE
// ============================================================================

/// A job running on a background worker thread.
pub struct JobHandle {
    id: JobId,
    handle: JoinHandle<CoreResult<Job>>,
}

impl JobHandle {
    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the worker is done and returns the finished job.
    pub fn join(self) -> CoreResult<Job> {
        self.handle.join().map_err(|_| {
            CoreError::OperationFailed(format!("Worker thread for job {} panicked", self.id))
        })?
    }
}

// ============================================================================
// JOB RUNNER
// ============================================================================

struct RunnerInner {
    config: CoreConfig,
    events: EventDispatcher,
    log: JobLog,
    registry: Registry,
    // Set by `shutdown`; children registered afterwards are killed at once
    stopping: AtomicBool,
}

/// Runs jobs and tracks the ones in flight. Clones share the same registry.
#[derive(Clone)]
pub struct JobRunner {
    inner: Arc<RunnerInner>,
}

impl JobRunner {
    /// Creates a runner. The job log is built from `config`.
    pub fn new(config: CoreConfig, events: EventDispatcher) -> Self {
        let log = JobLog::from_config(&config);
        Self::with_log(config, events, log)
    }

    pub fn with_log(config: CoreConfig, events: EventDispatcher, log: JobLog) -> Self {
        Self {
            inner: Arc::new(RunnerInner {
                config,
                events,
                log,
                registry: Registry::default(),
                stopping: AtomicBool::new(false),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CoreConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn job_log(&self) -> &JobLog {
        &self.inner.log
    }

    fn emit(&self, event: JobEvent) {
        self.inner.events.emit(event);
    }

    fn ring(&self) {
        alert();
        self.emit(JobEvent::Alert);
    }

    /// Runs `job` on a new worker thread.
    pub fn spawn(&self, job: Job) -> CoreResult<JobHandle> {
        let id = job.id();
        let runner = self.clone();
        let handle = thread::Builder::new()
            .name(format!("job-{}", id.as_u64()))
            .spawn(move || runner.run(job))
            .map_err(|e| CoreError::OperationFailed(format!("Cannot start worker for job {id}: {e}")))?;
        Ok(JobHandle { id, handle })
    }

    /// Runs `job` to completion on the calling thread.
    ///
    /// Returns the job with its terminal result. Cancel and Error are normal
    /// outcomes and come back as `Ok`; `Err` means the child could not be
    /// started or waited for.
    pub fn run(&self, mut job: Job) -> CoreResult<Job> {
        self.emit(JobEvent::Queued {
            id: job.id(),
            task: job.task(),
            input: job.input().to_path_buf(),
            output: job.output().to_path_buf(),
        });

        let executable = match external::ensure_executable(&self.inner.config) {
            Ok(path) => path,
            Err(e) => {
                error!("{}", e);
                self.inner.log.write(&e.to_string());
                self.emit(JobEvent::ExecutableMissing {
                    path: self.inner.config.ffmpeg_path.clone(),
                });
                self.ring();
                return Err(e);
            }
        };

        let created_dir = job.task() == Task::ExtractImages && self.prepare_output_dir(&job)?;

        let command_line = external::command_line(&executable, job.arguments());
        self.inner.log.write(&command_line);
        info!("Starting job {} ({})", job.id(), job.task());
        debug!("{}", command_line);

        let mut child = match external::spawn_ffmpeg(&executable, job.arguments()) {
            Ok(child) => child,
            Err(e) => {
                error!("{}", e);
                self.inner.log.write(&e.to_string());
                if created_dir {
                    self.discard_output(&job);
                }
                self.ring();
                return Err(e);
            }
        };
        self.emit(JobEvent::Started {
            id: job.id(),
            command_line,
        });

        let readers: Vec<JoinHandle<()>> = [
            child.stdout.take().map(|p| self.forward_lines(job.id(), p, OutputStream::Stdout)),
            child.stderr.take().map(|p| self.forward_lines(job.id(), p, OutputStream::Stderr)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let entry = Arc::new(RunningEntry {
            job: job.clone(),
            child: Mutex::new(child),
            cancelled: AtomicBool::new(false),
        });
        self.inner.registry.insert(Arc::clone(&entry));
        if self.inner.stopping.load(Ordering::SeqCst) {
            debug!("Runner is shutting down, killing job {}", job.id());
            let _ = entry.kill();
        }

        let status = self.wait_for_exit(&entry);
        self.inner.registry.remove(job.id());
        for reader in readers {
            let _ = reader.join();
        }
        let status = match status {
            Ok(status) => status,
            Err(e) => {
                error!("{}", e);
                self.discard_output(&job);
                self.ring();
                return Err(e);
            }
        };

        let result = if entry.cancelled.load(Ordering::SeqCst) {
            JobResult::Cancel
        } else {
            JobResult::from_exit_code(status.code())
        };
        job.set_result(result)?;
        info!("Job {} finished: {:?} (exit code {:?})", job.id(), result, status.code());

        self.complete(&job);
        self.emit(JobEvent::Finished {
            id: job.id(),
            task: job.task(),
            output: job.output().to_path_buf(),
            result,
            exit_code: status.code(),
        });
        Ok(job)
    }

    /// Creates the image directory. Returns whether it had to be created.
    fn prepare_output_dir(&self, job: &Job) -> CoreResult<bool> {
        let dir = job.output();
        if dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(dir).map_err(|e| {
            CoreError::PathError(format!("Cannot create directory {}: {}", dir.display(), e))
        })?;
        let message = format!("Directory created: {}", dir.display());
        info!("{}", message);
        self.inner.log.write(&message);
        Ok(true)
    }

    fn forward_lines<R>(&self, id: JobId, pipe: R, stream: OutputStream) -> JoinHandle<()>
    where
        R: io::Read + Send + 'static,
    {
        let runner = self.clone();
        external::spawn_line_reader(pipe, stream, move |stream, line| {
            runner.inner.log.write(&line);
            runner.emit(JobEvent::OutputLine { id, stream, line });
        })
    }

    fn wait_for_exit(&self, entry: &RunningEntry) -> CoreResult<ExitStatus> {
        loop {
            let polled = {
                let mut child = entry.child.lock().unwrap_or_else(|e| e.into_inner());
                child.try_wait()
            };
            match polled {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = entry.kill();
                    return Err(command_wait_error(
                        self.inner.config.ffmpeg_path.display().to_string(),
                        e,
                    ));
                }
            }
        }
    }

    /// Post-exit side effects for a finished job.
    fn complete(&self, job: &Job) {
        match job.result() {
            JobResult::Success => {
                if self.inner.config.open_explorer && !reveal_in_file_browser(job.output()) {
                    self.ring();
                }
            }
            JobResult::Error => {
                self.ring();
                self.discard_output(job);
            }
            JobResult::Cancel => self.discard_output(job),
            JobResult::NotAvailable => {}
        }
    }

    fn discard_output(&self, job: &Job) {
        match remove_output(job.output()) {
            Ok(()) => debug!("Removed {}", job.output().display()),
            Err(e) => warn!("Could not remove {}: {}", job.output().display(), e),
        }
    }

    /// Force-kills one in-flight job. Its worker classifies it as `Cancel`.
    pub fn cancel(&self, id: JobId) -> CoreResult<()> {
        let entry = self.inner.registry.get(id).ok_or(CoreError::JobNotFound(id))?;
        info!("Cancelling job {}", id);
        entry.kill()?;
        Ok(())
    }

    /// Kills every in-flight job, ignoring failures. Jobs that register
    /// after this call are killed as soon as they start.
    pub fn shutdown(&self) {
        self.inner.stopping.store(true, Ordering::SeqCst);
        let entries = self.inner.registry.drain();
        if !entries.is_empty() {
            info!("Shutting down {} running job(s)", entries.len());
        }
        for entry in entries {
            if let Err(e) = entry.kill() {
                debug!("Kill of job {} failed: {}", entry.job.id(), e);
            }
        }
    }

    /// Snapshot of the in-flight jobs, oldest first.
    #[must_use]
    pub fn running(&self) -> Vec<Job> {
        self.inner.registry.jobs()
    }
}
