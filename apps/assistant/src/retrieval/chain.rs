//! Conversational retrieval chain: condense (when there is history) → retrieve → answer → remember.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::llm_client::{Embedder, LlmError, TextModel};
use crate::retrieval::prompts::{answer_prompt, condense_prompt};
use crate::retrieval::vector_store::{ScoredDocument, VectorStore};

/// Read-only view over the vector store that embeds queries on demand.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<VectorStore>,
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl Retriever {
    pub fn new(store: Arc<VectorStore>, embedder: Arc<dyn Embedder>, k: usize) -> Self {
        Self { store, embedder, k }
    }

    /// Returns up to `k` documents. An empty collection short-circuits without an
    /// embedding call.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ScoredDocument>, LlmError> {
        if self.store.is_empty() || self.k == 0 {
            debug!(
                "Skipping retrieval: collection '{}' is empty",
                self.store.collection()
            );
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(query).await?;
        let docs = self.store.similarity_search(&embedding, self.k);
        debug!("Retrieved {} documents", docs.len());
        Ok(docs)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Turn {
    pub human: String,
    pub ai: String,
}

/// Running transcript buffer for one chain.
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Vec<Turn>,
}

impl ConversationMemory {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push(&mut self, human: impl Into<String>, ai: impl Into<String>) {
        self.turns.push(Turn {
            human: human.into(),
            ai: ai.into(),
        });
    }

    pub fn buffer_string(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("Human: {}\nAssistant: {}", t.human, t.ai))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct ConversationalRetrievalChain {
    llm: Arc<dyn TextModel>,
    retriever: Retriever,
    memory: ConversationMemory,
}

impl ConversationalRetrievalChain {
    pub fn new(llm: Arc<dyn TextModel>, retriever: Retriever) -> Self {
        Self {
            llm,
            retriever,
            memory: ConversationMemory::default(),
        }
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Answers one free-text question and records the turn in memory.
    pub async fn ask(&mut self, question: &str) -> Result<String, LlmError> {
        let standalone = if self.memory.is_empty() {
            question.to_string()
        } else {
            let prompt = condense_prompt(&self.memory.buffer_string(), question);
            self.llm.complete(&prompt).await?.trim().to_string()
        };

        let docs = self.retriever.retrieve(&standalone).await?;
        let context = docs
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let answer = self.llm.complete(&answer_prompt(&context, &standalone)).await?;
        self.memory.push(question, answer.clone());
        Ok(answer)
    }
}
