use thiserror::Error;

use crate::model::{AnswerError, ClientSettingsError, RegisterError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Register(#[from] RegisterError),
    #[error(transparent)]
    Settings(#[from] ClientSettingsError),
}
