//! Startup sequence for ragshell
//!
//! Resolves credentials, opens the store, loads the tokenizer and prompt
//! template, then runs the startup loader. Any failure here is fatal.

use std::sync::Arc;
use tracing::info;

use crate::cli::Config;
use crate::errors::Result;
use crate::ingestion::{Chunker, LoadOutcome, PdfSource, StartupLoader, TokenChunker};
use crate::models::{ChatModel, EmbeddingModel, OpenAiClient};
use crate::rag::{PromptTemplate, QueryHandler};
use crate::store::{self, VectorStore};

/// Components shared by the shell and one-shot mode
pub struct Application {
    config: Config,
    store: Arc<dyn VectorStore>,
    handler: Arc<QueryHandler>,
    load_outcome: LoadOutcome,
}

impl Application {
    /// Build everything from configuration and populate the store if empty
    pub async fn bootstrap(config: Config) -> Result<Self> {
        config.validate()?;
        let api_key = config.api_key()?;

        let client = Arc::new(OpenAiClient::new(&config.openai, &config.store, api_key)?);
        info!(
            base_url = client.base_url(),
            chat_model = client.chat_model(),
            embedding_model = client.embedding_model(),
            "Model client ready"
        );

        let store = store::open(&config).await?;
        let chunker = Arc::new(TokenChunker::from_config(&config.ingest)?);
        let template = load_template(&config)?;

        Self::from_parts(config, store, client.clone(), client, chunker, template).await
    }

    /// Assemble from prebuilt components and run the startup loader
    pub async fn from_parts(
        config: Config,
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingModel>,
        chat: Arc<dyn ChatModel>,
        chunker: Arc<dyn Chunker>,
        template: PromptTemplate,
    ) -> Result<Self> {
        let pdf_source = config.pdf_path().map(PdfSource::File).unwrap_or(PdfSource::Builtin);
        let loader = StartupLoader::new(store.clone(), embedder.clone(), chunker, pdf_source)
            .with_batch_size(config.ingest.batch_size);
        let load_outcome = loader.run().await?;

        let handler = QueryHandler::new(store.clone(), embedder, chat, template)
            .with_search(&config.store);

        Ok(Self {
            config,
            store,
            handler: Arc::new(handler),
            load_outcome,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn VectorStore> {
        self.store.clone()
    }

    pub fn query_handler(&self) -> Arc<QueryHandler> {
        self.handler.clone()
    }

    /// What the startup loader did
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }
}

/// Configured template file, else the bundled one
pub fn load_template(config: &Config) -> Result<PromptTemplate> {
    match &config.prompt.template_path {
        Some(path) => PromptTemplate::from_file(&Config::expand_path(path)),
        None => PromptTemplate::builtin(),
    }
}
