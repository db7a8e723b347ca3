use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{Embedder, TextModel};
use crate::retrieval::chain::{ConversationalRetrievalChain, Retriever};
use crate::retrieval::vector_store::VectorStore;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Model clients and the store handle are built once at startup; chains are built per use.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn TextModel>,
    pub embedder: Arc<dyn Embedder>,
    pub vector_store: Arc<VectorStore>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// A fresh chain with an empty transcript buffer.
    pub fn chain(&self) -> ConversationalRetrievalChain {
        let retriever = Retriever::new(
            self.vector_store.clone(),
            self.embedder.clone(),
            self.config.retriever_k,
        );
        ConversationalRetrievalChain::new(self.llm.clone(), retriever)
    }
}
