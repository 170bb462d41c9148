use super::config::ConfigError;
use crate::core::io::parser::ParseError;
use crate::core::models::entity::CollectionError;
use crate::core::potentials::PotentialError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Failed to render section [ {section} ]: {source}")]
    Render {
        section: &'static str,
        source: PotentialError,
    },

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
