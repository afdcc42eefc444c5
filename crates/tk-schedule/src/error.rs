use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("tick list parse error: {0}")]
    Parse(String),

    #[error("tick list write error: {0}")]
    Write(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
