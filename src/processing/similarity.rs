//! TF-IDF cosine similarity between a resume and a job description
//!
//! The vector space is fitted on exactly the two texts being compared, so the
//! score is stateless and needs no corpus. IDF uses the smoothed form
//! `ln((1 + n) / (1 + df)) + 1` and each vector is L2-normalized.

use crate::config::ScoringConfig;
use crate::error::{Result, ResumeBuilderError};
use crate::processing::text_processor::TextProcessor;
use log::debug;
use std::collections::{BTreeMap, HashMap};

pub struct SimilarityScorer {
    processor: TextProcessor,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Vocabulary and IDF weights fitted on a small set of documents.
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    pub fn with_processor(processor: TextProcessor) -> Self {
        Self { processor }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        if config.remove_stop_words {
            Self::with_processor(TextProcessor::with_stop_words())
        } else {
            Self::new()
        }
    }

    /// Similarity of two texts as a percentage in [0, 100], rounded to two
    /// decimals. Texts without any usable terms score 0.
    pub fn score(&self, resume_text: &str, job_text: &str) -> f64 {
        match self.similarity(resume_text, job_text) {
            Ok(similarity) => round_percentage(similarity),
            Err(e) => {
                debug!("Similarity defaults to 0: {}", e);
                0.0
            }
        }
    }

    /// Raw cosine similarity in [0, 1].
    pub fn similarity(&self, resume_text: &str, job_text: &str) -> Result<f64> {
        let resume_tokens = self.processor.tokenize(resume_text);
        let job_tokens = self.processor.tokenize(job_text);

        if resume_tokens.is_empty() || job_tokens.is_empty() {
            return Err(ResumeBuilderError::DegenerateVocabulary);
        }

        let model = TfIdfModel::fit(&[&resume_tokens, &job_tokens])?;
        let resume_vector = model.transform(&resume_tokens);
        let job_vector = model.transform(&job_tokens);

        debug!(
            "Fitted TF-IDF vocabulary of {} terms ({} resume tokens, {} job tokens)",
            model.vocabulary_size(),
            resume_tokens.len(),
            job_tokens.len()
        );

        Ok(cosine_similarity(&resume_vector, &job_vector))
    }
}

impl TfIdfModel {
    pub fn fit(documents: &[&Vec<String>]) -> Result<Self> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for tokens in documents {
            let mut seen: Vec<&String> = tokens.iter().collect();
            seen.sort();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(ResumeBuilderError::DegenerateVocabulary);
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());

        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self { vocabulary, idf })
    }

    /// L2-normalized TF-IDF vector; terms outside the vocabulary are ignored.
    pub fn transform(&self, tokens: &[String]) -> Vec<f64> {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut vector = vec![0.0; self.idf.len()];
        for (index, count) in counts {
            vector[index] = count as f64 * self.idf[index];
        }

        let norm = vector.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|w| *w /= norm);
        }
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }
}

/// Cosine similarity of two equal-length vectors; 0 when either is all zeros.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}

fn round_percentage(similarity: f64) -> f64 {
    ((similarity * 100.0 * 100.0).round() / 100.0).clamp(0.0, 100.0)
}
