mod intake_service;
mod job_service;
mod operation_gateway;
mod wav;

pub use intake_service::{IncomingFile, IntakeError, IntakeOutcome, IntakeService};
pub use job_service::{JobService, JobServiceError};
pub use operation_gateway::{
    NARRATION_TEXT_BUDGET, OperationError, OperationGateway, TRANSLATION_TEXT_BUDGET,
};
pub use wav::{WAV_BITS_PER_SAMPLE, WAV_CHANNELS, WAV_SAMPLE_RATE, wrap_pcm_in_wav};
