//! Error types and utilities for rankplot

use thiserror::Error;

/// Result type alias for rankplot operations
pub type Result<T> = std::result::Result<T, RankPlotError>;

/// Main error type for rankplot operations
#[derive(Error, Debug)]
pub enum RankPlotError {
    /// The rankings database could not be reached or opened
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The rankings query failed, typically because the expected schema is absent
    #[error("Query error: {message}")]
    Query {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No records were left to compute an axis range from
    #[error("Empty dataset: no rankings to plot")]
    EmptyDataset,

    /// Plot rendering or image export failed
    #[error("Render error: {message}")]
    Render {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RankPlotError {
    /// Create a new connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new connection error with source
    pub fn connection_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new query error
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new query error with source
    pub fn query_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Query {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new render error with source
    pub fn render_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Render {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convert from plotters drawing errors to RankPlotError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for RankPlotError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::render_with_source("Plot rendering failed", err)
    }
}
