//! Query assembly for step-by-step guides.
//!
//! A guide is an entity with a title, a description and indexed steps. The
//! generated SELECT yields one `Title` row followed by `Step <index>` rows,
//! each with `key`, `value` and `description` bindings, ordered by index.

use crate::error::{Result, StepsError};

const PREFIXES: &str = "\
prefix sbg: <http://www.openlinksw.com/ontology/stepbyguide#>
prefix sof: <http://www.openlinksw.com/ontology/software#>
prefix dcterms: <http://purl.org/dc/terms/>
prefix xsd: <http://www.w3.org/2001/XMLSchema#>
prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#>";

/// Characters that may not appear inside an IRI reference.
const FORBIDDEN: &[char] = &['<', '>', '"', '{', '}', '|', '\\', '^', '`'];

/// Builds the guide query for an entity IRI, with or without angle brackets.
pub fn step_guide_query(entity: &str) -> Result<String> {
    let iri = iri_ref(entity)?;
    Ok(format!(
        "{PREFIXES}
SELECT ?key ?value ?description WHERE {{
  {{
    {iri} dcterms:title ?value ; dcterms:description ?description .
    BIND(\"Title\" AS ?key)
    BIND(\"-1\"^^xsd:integer AS ?index)
  }}
  UNION
  {{
    {iri} sbg:hasStep ?step .
    ?step dcterms:title ?value ; sbg:hasIndex ?index ; dcterms:description ?description .
    BIND(CONCAT(\"Step \", STR(?index)) AS ?key)
  }}
}}
ORDER BY ?index"
    ))
}

/// Wraps an entity in `<…>` after checking it is a plausible IRI.
fn iri_ref(entity: &str) -> Result<String> {
    let trimmed = entity.trim();
    let bare = trimmed
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(trimmed);

    if bare.is_empty() {
        return Err(StepsError::config("Entity IRI must not be empty"));
    }
    if bare.chars().any(|c| c.is_whitespace() || FORBIDDEN.contains(&c)) {
        return Err(StepsError::config(format!("Invalid entity IRI: {entity}")));
    }

    Ok(format!("<{bare}>"))
}
