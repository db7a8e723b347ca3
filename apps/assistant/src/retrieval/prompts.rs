// Prompt templates for the conversational retrieval chain.

/// Rewrites a follow-up into a standalone question.
/// Replace: {chat_history}, {question}
pub const CONDENSE_QUESTION_TEMPLATE: &str = "Given the following conversation and a follow up question, \
rephrase the follow up question to be a standalone question, in its original language.

Chat History:
{chat_history}
Follow Up Input: {question}
Standalone question:";

/// Answers a question using retrieved documents as context.
/// Replace: {context}, {question}
pub const ANSWER_TEMPLATE: &str = "Use the following pieces of context to answer the question at the end. \
If you don't know the answer, just say that you don't know, don't try to make up an answer.

{context}

Question: {question}
Helpful Answer:";

pub fn condense_prompt(chat_history: &str, question: &str) -> String {
    CONDENSE_QUESTION_TEMPLATE
        .replace("{chat_history}", chat_history)
        .replace("{question}", question)
}

pub fn answer_prompt(context: &str, question: &str) -> String {
    ANSWER_TEMPLATE
        .replace("{context}", context)
        .replace("{question}", question)
}
