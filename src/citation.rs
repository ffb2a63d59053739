//! Citation extraction
//!
//! Turns a retrieve-and-generate response into an explicit outcome instead
//! of letting citation-shape surprises escape to the user. Extraction is a
//! total function: every response shape maps to one of the three variants.

use crate::services::knowledge_base::RetrieveAndGenerateResponse;

/// Outcome of extracting a citation from a query response
///
/// Only the first retrieved reference of the first citation is considered;
/// later citations are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationOutcome {
    /// A source document was found
    Found {
        /// URI of the source document
        uri: String,
        /// Excerpt of the source content, when the service returned one.
        /// Not displayed to the user; surfaced in debug logs only.
        excerpt: Option<String>,
    },
    /// The response carried no retrieved references
    Empty,
    /// A reference was present but its location could not be read
    Malformed,
}

impl CitationOutcome {
    /// Compute the citation outcome for a query response
    ///
    /// # Examples
    ///
    /// ```
    /// use kbchat::citation::CitationOutcome;
    /// use kbchat::services::knowledge_base::RetrieveAndGenerateResponse;
    ///
    /// let response: RetrieveAndGenerateResponse =
    ///     serde_json::from_str(r#"{"output": {"text": "S3 is object storage."}}"#).unwrap();
    /// assert_eq!(
    ///     CitationOutcome::from_response(&response),
    ///     CitationOutcome::Empty
    /// );
    /// ```
    pub fn from_response(response: &RetrieveAndGenerateResponse) -> Self {
        let Some(citation) = response.citations.first() else {
            return Self::Empty;
        };

        let Some(reference) = citation.retrieved_references.first() else {
            return Self::Empty;
        };

        let Some(uri) = reference
            .location
            .as_ref()
            .and_then(|location| location.uri.as_deref())
        else {
            tracing::debug!("Citation reference is missing its source location");
            return Self::Malformed;
        };

        let excerpt = reference
            .content
            .as_ref()
            .and_then(|content| content.text.clone());

        if let Some(text) = &excerpt {
            tracing::debug!("Citation context: {}", text);
        }

        Self::Found {
            uri: uri.to_string(),
            excerpt,
        }
    }

    /// URI of the source document, when one was found
    pub fn source_uri(&self) -> Option<&str> {
        match self {
            Self::Found { uri, .. } => Some(uri),
            Self::Empty | Self::Malformed => None,
        }
    }
}
