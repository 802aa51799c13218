use docpilot::domain::{
    ErrorKind, InputRef, Job, JobError, JobKind, JobResult, JobStatus, Payload, RunToken,
    TransitionError,
};

fn inline_pdf() -> InputRef {
    InputRef::Inline(Payload::new("application/pdf", b"%PDF-1.5".to_vec()))
}

#[test]
fn given_new_job_when_created_then_it_is_idle_with_no_input() {
    let job = Job::new(JobKind::Summarize);

    assert_eq!(job.status, JobStatus::Idle);
    assert_eq!(job.progress, 0);
    assert!(job.input.is_none());
    assert!(job.result.is_none());
    assert!(job.error.is_none());
}

#[test]
fn given_idle_job_when_full_lifecycle_runs_then_it_ends_succeeded() {
    let mut job = Job::new(JobKind::Summarize);

    job.begin_reading("report.pdf").unwrap();
    assert_eq!(job.status, JobStatus::ReadingInput);
    assert_eq!(job.filename.as_deref(), Some("report.pdf"));

    job.input_ready(inline_pdf()).unwrap();
    assert_eq!(job.status, JobStatus::ReadyToRun);
    assert_eq!(job.progress, 100);

    let token = RunToken::new();
    job.start(token).unwrap();
    assert_eq!(job.status, JobStatus::Running);

    job.succeed(JobResult::Summary {
        summary: "A document".to_string(),
        page_count: 3,
    })
    .unwrap();
    assert_eq!(job.status, JobStatus::Succeeded);
    assert!(job.run_token.is_none());
}

#[test]
fn given_idle_job_when_started_then_transition_is_rejected() {
    let mut job = Job::new(JobKind::Summarize);

    let result = job.start(RunToken::new());

    assert_eq!(
        result,
        Err(TransitionError::InvalidTransition {
            from: JobStatus::Idle,
            to: JobStatus::Running,
        })
    );
    assert_eq!(job.status, JobStatus::Idle);
}

#[test]
fn given_remote_input_when_attached_from_idle_then_job_is_ready_to_run() {
    let mut job = Job::new(JobKind::Narrate);

    job.input_ready(InputRef::Remote("https://example.com/doc.pdf".to_string()))
        .unwrap();

    assert_eq!(job.status, JobStatus::ReadyToRun);
}

#[test]
fn given_reading_job_when_progress_decreases_then_lower_value_is_ignored() {
    let mut job = Job::new(JobKind::Translate);
    job.begin_reading("a.pdf").unwrap();

    job.set_progress(40);
    job.set_progress(25);

    assert_eq!(job.progress, 40);
}

#[test]
fn given_progress_above_hundred_when_set_then_it_is_clamped() {
    let mut job = Job::new(JobKind::Translate);
    job.begin_reading("a.pdf").unwrap();

    job.set_progress(250);

    assert_eq!(job.progress, 100);
}

#[test]
fn given_job_not_reading_when_progress_set_then_it_is_ignored() {
    let mut job = Job::new(JobKind::Translate);

    job.set_progress(50);

    assert_eq!(job.progress, 0);
}

#[test]
fn given_reading_job_when_read_fails_then_job_is_failed_with_error() {
    let mut job = Job::new(JobKind::Summarize);
    job.begin_reading("broken.pdf").unwrap();

    job.fail(JobError::new(ErrorKind::ReadFailure, "stream interrupted"))
        .unwrap();

    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_ref().unwrap().kind, ErrorKind::ReadFailure);
}

#[test]
fn given_failed_job_when_reset_then_everything_is_cleared() {
    let mut job = Job::new(JobKind::Summarize);
    job.begin_reading("broken.pdf").unwrap();
    job.fail(JobError::new(ErrorKind::ReadFailure, "stream interrupted"))
        .unwrap();

    job.reset();

    assert_eq!(job.status, JobStatus::Idle);
    assert!(job.input.is_none());
    assert!(job.filename.is_none());
    assert!(job.error.is_none());
    assert!(job.result.is_none());
    assert_eq!(job.progress, 0);
}

#[test]
fn given_idle_job_when_reset_then_nothing_changes() {
    let mut job = Job::new(JobKind::Summarize);
    let updated_at = job.updated_at;

    job.reset();

    assert_eq!(job.status, JobStatus::Idle);
    assert_eq!(job.updated_at, updated_at);
}

#[test]
fn given_running_job_when_reset_then_original_token_is_stale() {
    let mut job = Job::new(JobKind::Summarize);
    job.input_ready(inline_pdf()).unwrap();
    let token = RunToken::new();
    job.start(token).unwrap();
    assert!(job.accepts_result_for(token));

    job.reset();

    assert!(!job.accepts_result_for(token));
}

#[test]
fn given_restarted_job_when_old_run_completes_then_old_token_is_rejected() {
    let mut job = Job::new(JobKind::Summarize);
    job.input_ready(inline_pdf()).unwrap();
    let first = RunToken::new();
    job.start(first).unwrap();

    // Reset and run again: only the second run may land its result.
    job.reset();
    job.input_ready(inline_pdf()).unwrap();
    let second = RunToken::new();
    job.start(second).unwrap();

    assert!(!job.accepts_result_for(first));
    assert!(job.accepts_result_for(second));
}

#[test]
fn given_succeeded_job_when_input_attached_then_transition_is_rejected() {
    let mut job = Job::new(JobKind::Summarize);
    job.input_ready(inline_pdf()).unwrap();
    let token = RunToken::new();
    job.start(token).unwrap();
    job.succeed(JobResult::Summary {
        summary: "done".to_string(),
        page_count: 1,
    })
    .unwrap();

    let result = job.input_ready(inline_pdf());

    assert!(result.is_err());
}
