#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    #[error("no usable endpoint after filtering root addresses")]
    NoUsableEndpoints,

    #[error("invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("invalid descriptor id: {0}")]
    InvalidId(#[from] twinreg_tree::PathError),

    #[error("shell '{id}' is not registered")]
    NotFound { id: String },

    #[error("shell '{id}' is already registered")]
    Conflict { id: String },
}
