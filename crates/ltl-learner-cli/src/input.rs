//! JSON ingestion for the §6 external interfaces: the sample file and the optional
//! operator-subset file. Conversion into the typed `Sample`/`OperatorSet` the core crate
//! understands — including the `InvalidInput`/`UnsupportedOperator` rejections — lives
//! here, since the core library never touches JSON or file paths.

use std::collections::HashMap;
use std::path::Path;

use ltl_learner_core::{LearnerError, OperatorSet, Result, Sample, Trace};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawTrace {
    traces: Vec<Vec<String>>,
    repeat: usize,
}

#[derive(Debug, Deserialize)]
struct RawSampleFile {
    variables: Vec<String>,
    positives: Vec<RawTrace>,
    negatives: Vec<RawTrace>,
    #[serde(default)]
    #[allow(dead_code)] // only used for comparison by the external experiment harness
    expected: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOperatorFile {
    operators: Vec<String>,
}

/// The fully parsed and validated contents of an input JSON file.
pub struct ParsedInput {
    pub atom_names: Vec<String>,
    pub positives: Sample,
    pub negatives: Sample,
}

fn atom_index_map(variables: &[String]) -> Result<HashMap<&str, usize>> {
    if variables.is_empty() {
        return Err(LearnerError::EmptyAtomicPropositions);
    }
    let mut map = HashMap::with_capacity(variables.len());
    for (i, name) in variables.iter().enumerate() {
        if map.insert(name.as_str(), i).is_some() {
            return Err(LearnerError::DuplicateAtomicProposition { name: name.clone() });
        }
    }
    Ok(map)
}

fn convert_trace(raw: RawTrace, atoms: &HashMap<&str, usize>, num_atoms: usize) -> Result<Trace> {
    let mut path = Vec::with_capacity(raw.traces.len());
    for letter in &raw.traces {
        let mut bits = vec![false; num_atoms];
        for name in letter {
            let &id = atoms.get(name.as_str()).ok_or_else(|| LearnerError::UnknownAtomicProposition { name: name.clone() })?;
            bits[id] = true;
        }
        path.push(bits);
    }
    Trace::new(path, raw.repeat)
}

/// Parses and validates the §6 input JSON at `path`. Malformed JSON (parse failure,
/// missing fields) surfaces through the generic `std::io`/`serde_json` error paths the
/// caller wraps in `color_eyre`; sample-level validity (empty AP set, duplicate AP names,
/// out-of-range `repeat`, unknown AP references) is rejected here as `InvalidInput`.
pub fn read_sample_file(path: &Path) -> color_eyre::Result<ParsedInput> {
    let text = std::fs::read_to_string(path)?;
    let raw: RawSampleFile = serde_json::from_str(&text)?;

    let atoms = atom_index_map(&raw.variables)?;
    let num_atoms = raw.variables.len();

    let positives = raw
        .positives
        .into_iter()
        .map(|t| convert_trace(t, &atoms, num_atoms))
        .collect::<Result<Vec<_>>>()?;
    let negatives = raw
        .negatives
        .into_iter()
        .map(|t| convert_trace(t, &atoms, num_atoms))
        .collect::<Result<Vec<_>>>()?;

    if positives.is_empty() && negatives.is_empty() {
        return Err(LearnerError::EmptySample.into());
    }

    Ok(ParsedInput {
        atom_names: raw.variables,
        positives: Sample::new(positives),
        negatives: Sample::new(negatives),
    })
}

/// Parses the optional `-o` operator-subset file; absent path means "all operators".
pub fn read_operator_set(path: Option<&Path>) -> color_eyre::Result<OperatorSet> {
    let Some(path) = path else {
        return Ok(OperatorSet::all());
    };
    let text = std::fs::read_to_string(path)?;
    let raw: RawOperatorFile = serde_json::from_str(&text)?;
    Ok(OperatorSet::from_tokens(raw.operators)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_index_map_rejects_empty() {
        let err = atom_index_map(&[]).unwrap_err();
        assert!(matches!(err, LearnerError::EmptyAtomicPropositions));
    }

    #[test]
    fn test_atom_index_map_rejects_duplicates() {
        let err = atom_index_map(&["a".to_string(), "a".to_string()]).unwrap_err();
        assert!(matches!(err, LearnerError::DuplicateAtomicProposition { .. }));
    }

    #[test]
    fn test_convert_trace_rejects_unknown_atom() {
        let atoms = atom_index_map(&["a".to_string()]).unwrap();
        let raw = RawTrace {
            traces: vec![vec!["b".to_string()]],
            repeat: 0,
        };
        let err = convert_trace(raw, &atoms, 1).unwrap_err();
        assert!(matches!(err, LearnerError::UnknownAtomicProposition { .. }));
    }

    #[test]
    fn test_convert_trace_builds_letter_bitmap() {
        let atoms = atom_index_map(&["a".to_string(), "b".to_string()]).unwrap();
        let raw = RawTrace {
            traces: vec![vec!["b".to_string()], vec![]],
            repeat: 0,
        };
        let trace = convert_trace(raw, &atoms, 2).unwrap();
        assert!(!trace.holds(0, 0));
        assert!(trace.holds(1, 0));
        assert!(!trace.holds(0, 1));
        assert!(!trace.holds(1, 1));
    }
}
