use std::collections::{HashMap, HashSet};

use crate::TermId;

/// Distinct terms of one corpus, indexed in first-seen order, together with
/// the number of documents each term occurs in.
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
    df: Vec<u32>,
    num_docs: u32,
}

impl Vocabulary {
    /// Build over already tokenized documents, in corpus order.
    pub fn build<D, T>(docs: D) -> Self
    where
        D: IntoIterator<Item = T>,
        T: AsRef<[String]>,
    {
        let mut vocab = Vocabulary::default();
        for doc in docs {
            vocab.add_document(doc.as_ref());
        }
        vocab
    }

    fn add_document(&mut self, tokens: &[String]) {
        self.num_docs += 1;
        let mut seen_in_doc: HashSet<TermId> = HashSet::new();
        for term in tokens {
            let tid = match self.dictionary.get(term) {
                Some(&tid) => tid,
                None => {
                    let tid = self.terms.len() as TermId;
                    self.dictionary.insert(term.clone(), tid);
                    self.terms.push(term.clone());
                    self.df.push(0);
                    tid
                }
            };
            if seen_in_doc.insert(tid) {
                self.df[tid as usize] += 1;
            }
        }
    }

    pub fn get(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn term(&self, tid: TermId) -> Option<&str> { self.terms.get(tid as usize).map(String::as_str) }

    /// Number of documents containing `tid` at least once.
    pub fn df(&self, tid: TermId) -> u32 { self.df.get(tid as usize).copied().unwrap_or(0) }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> { s.split_whitespace().map(str::to_string).collect() }

    #[test]
    fn indices_follow_first_seen_order() {
        let vocab = Vocabulary::build([toks("b a b"), toks("c a")]);
        assert_eq!(vocab.get("b"), Some(0));
        assert_eq!(vocab.get("a"), Some(1));
        assert_eq!(vocab.get("c"), Some(2));
        assert_eq!(vocab.term(2), Some("c"));
    }

    #[test]
    fn df_counts_documents_not_occurrences() {
        let vocab = Vocabulary::build([toks("b a b"), toks("c a"), toks("")]);
        assert_eq!(vocab.num_docs(), 3);
        assert_eq!(vocab.df(vocab.get("a").unwrap()), 2);
        assert_eq!(vocab.df(vocab.get("b").unwrap()), 1);
    }

    #[test]
    fn empty_corpus_has_empty_vocabulary() {
        let vocab = Vocabulary::build([toks(""), toks("  ")]);
        assert!(vocab.is_empty());
        assert_eq!(vocab.num_docs(), 2);
    }
}
