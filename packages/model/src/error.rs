#[derive(thiserror::Error, Debug)]
pub enum ValueError {
    #[error("value serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("element carries no modelType tag")]
    MissingModelType,

    #[error("unknown modelType '{model_type}'")]
    UnknownModelType { model_type: String },

    #[error("element decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum InvocationError {
    #[error("request '{request_id}' already issued")]
    DuplicateRequest { request_id: String },

    #[error("unknown request '{request_id}'")]
    UnknownRequest { request_id: String },

    #[error("request '{request_id}' already reached a terminal state")]
    AlreadyTerminal { request_id: String },
}
