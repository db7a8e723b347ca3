// Retrieval: local vector collection, query retriever, and the conversational chain
// used to generate interview questions. All model calls go through llm_client.

pub mod chain;
pub mod prompts;
pub mod vector_store;
