pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid layout configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Vertex `{id}` has no initial position in either the moving or the fixed partition")]
    MissingPoint { id: String },

    #[error("Vertex `{id}` appears in both the moving and the fixed partition")]
    OverlappingPartitions { id: String },

    #[error("A position was supplied for `{id}`, which is not a vertex of the graph")]
    UnknownVertex { id: String },
}
