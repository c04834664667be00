// HTTP adapters for the embed providers
use crate::application::script_loader::{ScriptLoadError, ScriptLoader};
use crate::application::viz_element::{ConstructionError, VizElement, VizElementFactory};
use crate::domain::embed::VizOptions;
use async_trait::async_trait;
use std::time::Duration;

/// Confirms the SDK script is reachable before pages reference it
#[derive(Debug, Clone)]
pub struct HttpScriptLoader {
    client: reqwest::Client,
}

impl HttpScriptLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScriptLoader for HttpScriptLoader {
    async fn load(&self, url: &str) -> Result<(), ScriptLoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScriptLoadError::new(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScriptLoadError::new(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        tracing::debug!(url, "SDK script reachable");
        Ok(())
    }
}

/// Builds elements whose status query is a GET of the public view
#[derive(Debug, Clone)]
pub struct RemoteVizFactory {
    client: reqwest::Client,
}

impl RemoteVizFactory {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl VizElementFactory for RemoteVizFactory {
    fn construct(&self, options: &VizOptions) -> Result<Box<dyn VizElement>, ConstructionError> {
        let parsed = reqwest::Url::parse(&options.src)
            .map_err(|e| ConstructionError(format!("invalid view URL: {}", e)))?;

        Ok(Box::new(RemoteViz {
            options: options.clone(),
            url: parsed,
            client: self.client.clone(),
        }))
    }
}

pub struct RemoteViz {
    options: VizOptions,
    url: reqwest::Url,
    client: reqwest::Client,
}

#[async_trait]
impl VizElement for RemoteViz {
    fn options(&self) -> &VizOptions {
        &self.options
    }

    async fn has_rendered_frame(&self) -> bool {
        match self.client.get(self.url.clone()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(src = %self.options.src, error = %e, "View probe failed");
                false
            }
        }
    }
}

pub fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
