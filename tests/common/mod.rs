//! Shared fakes for integration tests
//!
//! Nothing here talks to the network or a database.

#![allow(dead_code)]

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ragshell::models::{ChatModel, EmbeddingModel};
use ragshell::rag::{PromptTemplate, QueryHandler};
use ragshell::store::{EmbeddedChunk, InMemoryVectorStore, SearchHit, VectorStore};
use ragshell::Result;

pub const DIMENSIONS: usize = 256;

/// Deterministic bag-of-words embedder: each word bumps one hashed bucket
pub struct HashingEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn vector(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() % self.dimensions as u64) as usize] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingModel for HashingEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Chat model that records prompts and returns a fixed reply
pub struct RecordingChat {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingChat {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for RecordingChat {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// In-memory store that keeps a log of every `add` call
pub struct RecordingStore {
    inner: InMemoryVectorStore,
    added: Mutex<Vec<Vec<EmbeddedChunk>>>,
}

impl RecordingStore {
    pub fn new(dimensions: usize) -> Self {
        Self {
            inner: InMemoryVectorStore::new(dimensions),
            added: Mutex::new(Vec::new()),
        }
    }

    pub fn add_calls(&self) -> usize {
        self.added.lock().unwrap().len()
    }

    pub fn added_chunks(&self) -> Vec<EmbeddedChunk> {
        self.added.lock().unwrap().iter().flatten().cloned().collect()
    }
}

#[async_trait]
impl VectorStore for RecordingStore {
    async fn count(&self) -> Result<i64> {
        self.inner.count().await
    }

    async fn add(&self, chunks: &[EmbeddedChunk]) -> Result<()> {
        self.inner.add(chunks).await?;
        self.added.lock().unwrap().push(chunks.to_vec());
        Ok(())
    }

    async fn similarity_search(
        &self,
        embedding: &[f32],
        top_k: usize,
        threshold: f64,
    ) -> Result<Vec<SearchHit>> {
        self.inner.similarity_search(embedding, top_k, threshold).await
    }
}

/// Build a PDF with one page per entry; each line becomes its own text object
pub fn sample_pdf(pages: &[Vec<&str>]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 780 - 20 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![50.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Two-page reference document used across tests
pub fn reference_pages() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "Vector stores keep embeddings next to the source text.",
            "The HNSW index answers nearest neighbour queries quickly.",
        ],
        vec![
            "Prompt templates have a documents slot and an input slot.",
            "The chat model receives the filled template as one message.",
        ],
    ]
}

/// Write the reference PDF into `dir` and return its path
pub fn write_reference_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("reference.pdf");
    std::fs::write(&path, sample_pdf(&reference_pages())).unwrap();
    path
}

/// Seed `store` with one chunk per text using `embedder`
pub async fn seed(store: &dyn VectorStore, embedder: &HashingEmbedder, texts: &[&str]) {
    let chunks: Vec<EmbeddedChunk> = texts
        .iter()
        .map(|text| EmbeddedChunk {
            document: ragshell::store::Document::new(*text),
            embedding: embedder.vector(text),
        })
        .collect();
    store.add(&chunks).await.unwrap();
}

pub fn query_handler(
    store: Arc<dyn VectorStore>,
    embedder: Arc<HashingEmbedder>,
    chat: Arc<RecordingChat>,
) -> QueryHandler {
    let template = PromptTemplate::builtin().unwrap();
    QueryHandler::new(store, embedder, chat, template)
}
