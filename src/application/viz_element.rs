// Provider seam for SDK-built visualization elements
use crate::domain::embed::VizOptions;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConstructionError(pub String);

#[async_trait]
pub trait VizElement: Send + Sync {
    fn options(&self) -> &VizOptions;

    /// Provider-supplied ready callback, if the element offers one
    fn take_ready_signal(&mut self) -> Option<oneshot::Receiver<()>> {
        None
    }

    /// Status query used when there is no ready callback
    async fn has_rendered_frame(&self) -> bool;
}

pub trait VizElementFactory: Send + Sync {
    fn construct(&self, options: &VizOptions) -> Result<Box<dyn VizElement>, ConstructionError>;
}
