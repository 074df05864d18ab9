//! Built-in example signatures
//!
//! The worked examples the course material walks through, expressed as
//! ready-made signatures: question answering at three quality tiers, a
//! binary email classifier, a multi-output article extractor, and the
//! three-stage sentiment-analysis refinement sequence. The walkthrough, the
//! CLI, and the integration tests all draw from this set.

use std::fmt;

use crate::signature::{FieldSpec, Signature};

/// Quality tier a catalog entry illustrates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Bare names only; implicit free-text types, no guidance
    Minimal,
    /// Named, typed fields with descriptive guidance
    Descriptive,
    /// Guidance plus enumerated values and length bounds
    Production,
}

impl Tier {
    /// Get the tier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Minimal => "minimal",
            Tier::Descriptive => "descriptive",
            Tier::Production => "production",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One built-in signature with its CLI lookup slug and tier
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Lookup key used on the command line
    pub slug: &'static str,
    /// Quality tier the entry illustrates
    pub tier: Tier,
    /// The signature itself
    pub signature: Signature,
}

/// All built-in signatures, in course order
pub fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            slug: "basic-qa",
            tier: Tier::Minimal,
            signature: basic_qa(),
        },
        CatalogEntry {
            slug: "descriptive-qa",
            tier: Tier::Descriptive,
            signature: descriptive_qa(),
        },
        CatalogEntry {
            slug: "production-qa",
            tier: Tier::Production,
            signature: production_qa(),
        },
        CatalogEntry {
            slug: "email-classifier",
            tier: Tier::Production,
            signature: email_classifier(),
        },
        CatalogEntry {
            slug: "article-extractor",
            tier: Tier::Production,
            signature: article_extractor(),
        },
        CatalogEntry {
            slug: "sentiment-v1",
            tier: Tier::Minimal,
            signature: sentiment_v1(),
        },
        CatalogEntry {
            slug: "sentiment-v2",
            tier: Tier::Descriptive,
            signature: sentiment_v2(),
        },
        CatalogEntry {
            slug: "sentiment-v3",
            tier: Tier::Production,
            signature: sentiment_v3(),
        },
    ]
}

/// Look up an entry by slug, or by signature name ignoring case
pub fn find(key: &str) -> Option<CatalogEntry> {
    entries()
        .into_iter()
        .find(|entry| entry.slug == key || entry.signature.name().eq_ignore_ascii_case(key))
}

/// Minimal question answering: names only
pub fn basic_qa() -> Signature {
    Signature::builder("BasicQA")
        .description("Answer questions with short factoid answers.")
        .field(FieldSpec::input("question"))
        .field(FieldSpec::output("answer"))
        .define()
        .expect("built-in signature is well formed")
}

/// Context-grounded question answering with field guidance
pub fn descriptive_qa() -> Signature {
    Signature::builder("DescriptiveQA")
        .description(
            "Answer questions using provided context. Focus on factual accuracy. \
             Cite the context when possible. If the answer isn't in the context, \
             say so clearly.",
        )
        .field(FieldSpec::input("question").with_description("The user's question to be answered"))
        .field(
            FieldSpec::input("context")
                .with_description("Relevant background information retrieved for this question"),
        )
        .field(
            FieldSpec::output("answer").with_description(
                "A concise, factual answer (1-3 sentences) based on the context",
            ),
        )
        .define()
        .expect("built-in signature is well formed")
}

/// High-reliability question answering: enforced lengths, constrained
/// confidence, audit evidence
pub fn production_qa() -> Signature {
    Signature::builder("ProductionQA")
        .description(
            "Answer questions with confidence assessment. Use only provided context \
             for answers, quote exact text from context to support the answer, and \
             explicitly state \"Insufficient information\" if the context is \
             insufficient.",
        )
        .field(
            FieldSpec::input("question")
                .with_description("User's question (10-500 characters, well-formed)")
                .min_chars(10)
                .max_chars(500),
        )
        .field(
            FieldSpec::input("context").with_description(
                "Retrieved context passages (1-5 paragraphs of relevant information)",
            ),
        )
        .field(
            FieldSpec::output("answer").with_description(
                "Direct answer (20-150 words). Must be based on context. \
                 Use 'Insufficient information' if context doesn't support an answer.",
            ),
        )
        .field(
            FieldSpec::output("confidence")
                .with_enumeration(["high", "medium", "low"])
                .with_description(
                    "Confidence level: high = direct evidence in context; \
                     medium = inferential from context; low = speculative or weak evidence",
                ),
        )
        .field(
            FieldSpec::output("evidence").with_description(
                "Direct quote from context supporting the answer (exact substring match)",
            ),
        )
        .define()
        .expect("built-in signature is well formed")
}

/// Binary spam classification with an explanation output
pub fn email_classifier() -> Signature {
    Signature::builder("EmailClassifier")
        .description(
            "Classify emails as spam or legitimate. Consider: suspicious links, \
             urgent language, grammar quality, sender reputation indicators, \
             promotional content.",
        )
        .field(FieldSpec::input("email_subject").with_description("Email subject line"))
        .field(
            FieldSpec::input("email_body")
                .with_description("Email body content (up to 1000 chars)")
                .max_chars(1000),
        )
        .field(
            FieldSpec::output("classification")
                .with_enumeration(["spam", "legitimate"])
                .with_description("Classification: spam or legitimate"),
        )
        .field(
            FieldSpec::output("reasoning").with_description(
                "Brief explanation of classification decision (1-2 sentences)",
            ),
        )
        .define()
        .expect("built-in signature is well formed")
}

/// Multi-output structured extraction from news articles
pub fn article_extractor() -> Signature {
    Signature::builder("ArticleExtractor")
        .description(
            "Extract structured information from news articles. Parse article text \
             and identify key components. Be precise - only extract what's \
             explicitly stated.",
        )
        .field(FieldSpec::input("article_text").with_description("Full article text"))
        .field(
            FieldSpec::output("title").with_description("Article title or headline (5-15 words)"),
        )
        .field(
            FieldSpec::output("author")
                .with_description("Author name, or 'Unknown' if not mentioned"),
        )
        .field(
            FieldSpec::output("publication_date")
                .with_description("Publication date in YYYY-MM-DD format, or 'Unknown'")
                .with_format("YYYY-MM-DD"),
        )
        .field(FieldSpec::output("summary").with_description("Three-sentence summary of main points"))
        .field(
            FieldSpec::output("category")
                .with_enumeration(["politics", "technology", "sports", "business", "other"])
                .with_description("Primary article category"),
        )
        .field(
            FieldSpec::output("sentiment")
                .with_enumeration(["positive", "negative", "neutral"])
                .with_description("Overall article sentiment/tone"),
        )
        .define()
        .expect("built-in signature is well formed")
}

/// Sentiment analysis, first cut: names only
pub fn sentiment_v1() -> Signature {
    Signature::builder("SentimentV1")
        .description("Analyze sentiment.")
        .field(FieldSpec::input("text"))
        .field(FieldSpec::output("sentiment"))
        .define()
        .expect("built-in signature is well formed")
}

/// Sentiment analysis with guidance, values still unconstrained
pub fn sentiment_v2() -> Signature {
    Signature::builder("SentimentV2")
        .description("Classify text sentiment as positive, negative, or neutral.")
        .field(FieldSpec::input("text").with_description("Text to analyze for sentiment"))
        .field(
            FieldSpec::output("sentiment")
                .with_description("Sentiment: positive, negative, or neutral"),
        )
        .define()
        .expect("built-in signature is well formed")
}

/// Sentiment analysis hardened: constrained values, confidence,
/// explainability
pub fn sentiment_v3() -> Signature {
    Signature::builder("SentimentV3")
        .description(
            "Classify sentiment with confidence assessment. Analyze emotional tone. \
             Return neutral for ambiguous text. Consider word choice, punctuation, \
             context.",
        )
        .field(
            FieldSpec::input("text")
                .with_description("Input text for sentiment analysis (10-1000 characters)")
                .min_chars(10)
                .max_chars(1000),
        )
        .field(
            FieldSpec::output("sentiment")
                .with_enumeration(["positive", "negative", "neutral"])
                .with_description("Overall emotional tone classification"),
        )
        .field(
            FieldSpec::output("confidence")
                .with_enumeration(["high", "medium", "low"])
                .with_description(
                    "Classification confidence: high = clear indicators, \
                     medium = mixed signals, low = ambiguous",
                ),
        )
        .field(
            FieldSpec::output("key_phrases").with_description(
                "Comma-separated phrases that influenced classification (3-5 phrases)",
            ),
        )
        .define()
        .expect("built-in signature is well formed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ValueType;

    #[test]
    fn test_every_entry_defines_and_renders() {
        let all = entries();
        assert_eq!(all.len(), 8);
        for entry in &all {
            assert!(!entry.signature.render_guidance().is_empty());
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let all = entries();
        let mut slugs: Vec<&str> = all.iter().map(|e| e.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), all.len());
    }

    #[test]
    fn test_find_by_slug_and_name() {
        assert_eq!(find("basic-qa").unwrap().signature.name(), "BasicQA");
        assert_eq!(find("BasicQA").unwrap().slug, "basic-qa");
        assert_eq!(find("basicqa").unwrap().slug, "basic-qa");
        assert!(find("nonexistent").is_none());
    }

    #[test]
    fn test_production_qa_shape() {
        let sig = production_qa();
        assert_eq!(
            sig.field_names(),
            vec!["question", "context", "answer", "confidence", "evidence"]
        );

        let confidence = sig.field("confidence").unwrap();
        assert_eq!(
            confidence.value_type,
            ValueType::enumeration(["high", "medium", "low"])
        );

        let question = sig.field("question").unwrap();
        let bounds = question.length_bounds();
        assert_eq!((bounds.min, bounds.max), (Some(10), Some(500)));
    }

    #[test]
    fn test_article_extractor_format_hint() {
        let sig = article_extractor();
        let date = sig.field("publication_date").unwrap();
        assert_eq!(date.format_hints(), vec!["YYYY-MM-DD"]);
        assert!(date.length_bounds().is_unbounded());
    }

    #[test]
    fn test_sentiment_refinement_keeps_field_names() {
        let v1 = sentiment_v1();
        let v2 = sentiment_v2();
        let v3 = sentiment_v3();

        assert_eq!(v1.field_names(), v2.field_names());
        assert_eq!(
            &v3.field_names()[..2],
            v1.field_names().as_slice(),
            "later tiers extend, never rename or reorder"
        );
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(find("sentiment-v1").unwrap().tier, Tier::Minimal);
        assert_eq!(find("sentiment-v2").unwrap().tier, Tier::Descriptive);
        assert_eq!(find("sentiment-v3").unwrap().tier, Tier::Production);
        assert_eq!(Tier::Production.to_string(), "production");
    }
}
