use thiserror::Error;

#[derive(Error, Debug)]
pub enum EbotError {
    #[error("Connector error: {0}")]
    Connector(String),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in activity")]
    NoText,

    #[error("Activity did not originate in a team")]
    NotInTeam,

    #[error("Activity has no conversation")]
    NoConversation,

    #[error("Activity has no service URL")]
    NoServiceUrl,
}

pub type Result<T> = std::result::Result<T, EbotError>;
