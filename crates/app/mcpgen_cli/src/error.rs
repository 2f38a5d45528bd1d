use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Json::{:?}: {}", .0, .0)]
    Json(#[from] serde_json::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error(transparent)]
    Build(#[from] mcpgen_core::plan::BuildError),

    #[error(transparent)]
    Name(#[from] mcpgen_core::naming::NameError),

    #[error(transparent)]
    Write(#[from] mcpgen_core::writer::WriteError),
}
