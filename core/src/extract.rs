use crate::document::{Corpus, Document, IndexInfoMap, MetadataMap, Pid};
use crate::error::ExtractError;
use rayon::prelude::*;

/// What to do when a document fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first bad document (in pid order) and return no maps.
    #[default]
    AbortOnFirst,
    /// Skip bad documents, keep the rest, and report every failure.
    CollectAndContinue,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub policy: ErrorPolicy,
    /// Validate documents on the rayon pool. Results and errors are merged in
    /// pid order, so the outcome matches a sequential run.
    pub parallel: bool,
}

/// Output of [`extract`]. Both maps always share the same key set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub metadata: MetadataMap,
    pub info_index: IndexInfoMap,
    /// Documents skipped under [`ErrorPolicy::CollectAndContinue`].
    pub errors: Vec<ExtractError>,
}

/// Partition every document of the corpus into a metadata record and an
/// info-index record keyed by pid.
pub fn extract(corpus: &Corpus, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let extraction = if options.parallel {
        let outcomes: Vec<_> = corpus
            .par_iter()
            .map(|(pid, raw)| (pid, Document::from_raw(pid, raw)))
            .collect();
        assemble(outcomes, options.policy)?
    } else {
        assemble(
            corpus.iter().map(|(pid, raw)| (pid, Document::from_raw(pid, raw))),
            options.policy,
        )?
    };

    tracing::info!(
        documents = corpus.len(),
        extracted = extraction.metadata.len(),
        failed = extraction.errors.len(),
        "extracted document fields"
    );
    Ok(extraction)
}

fn assemble<'a, I>(outcomes: I, policy: ErrorPolicy) -> Result<Extraction, ExtractError>
where
    I: IntoIterator<Item = (&'a Pid, Result<Document, ExtractError>)>,
{
    let mut out = Extraction::default();
    for (pid, outcome) in outcomes {
        match outcome {
            Ok(doc) => {
                let (metadata, info) = doc.split();
                out.metadata.insert(pid.clone(), metadata);
                out.info_index.insert(pid.clone(), info);
            }
            Err(err) => match policy {
                ErrorPolicy::AbortOnFirst => return Err(err),
                ErrorPolicy::CollectAndContinue => {
                    tracing::warn!(pid = %err.pid(), field = err.field(), "skipping document: {err}");
                    out.errors.push(err);
                }
            },
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(pid: &str) -> Value {
        json!({
            "pid": pid,
            "title": "Shoe",
            "description": "Running shoe",
            "brand": "Acme",
            "category": "Footwear",
            "sub_category": "Sports",
            "product_details": [],
            "seller": "Acme Retail",
            "out_of_stock": true,
            "selling_price": "999",
            "discount": "10% off",
            "actual_price": "1,110",
            "average_rating": "",
            "url": "https://example.com/p"
        })
    }

    fn corpus(docs: Vec<Value>) -> Corpus {
        docs.into_iter()
            .map(|v| {
                let map = v.as_object().cloned().unwrap();
                (map["pid"].as_str().unwrap().to_string(), map)
            })
            .collect()
    }

    fn without(mut v: Value, field: &str) -> Value {
        v.as_object_mut().unwrap().remove(field);
        v
    }

    #[test]
    fn empty_corpus_yields_empty_maps() {
        let out = extract(&Corpus::new(), &ExtractOptions::default()).unwrap();
        assert!(out.metadata.is_empty());
        assert!(out.info_index.is_empty());
        assert!(out.errors.is_empty());
    }

    #[test]
    fn sequential_abort_stops_at_first_pid() {
        let c = corpus(vec![doc("A"), without(doc("B"), "brand"), without(doc("C"), "url")]);
        let err = extract(&c, &ExtractOptions::default()).unwrap_err();
        assert_eq!(err, ExtractError::MissingField { pid: "B".into(), field: "brand" });
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut docs: Vec<Value> = (0..200).map(|i| doc(&format!("P{i:03}"))).collect();
        docs[57] = without(doc("P057"), "discount");
        docs[143] = without(doc("P143"), "title");
        let c = corpus(docs);

        for policy in [ErrorPolicy::AbortOnFirst, ErrorPolicy::CollectAndContinue] {
            let seq = extract(&c, &ExtractOptions { policy, parallel: false });
            let par = extract(&c, &ExtractOptions { policy, parallel: true });
            assert_eq!(seq, par);
        }

        let err = extract(&c, &ExtractOptions { policy: ErrorPolicy::AbortOnFirst, parallel: true })
            .unwrap_err();
        assert_eq!(err.pid(), "P057");
    }
}
