use snafu::Snafu;

/// The error taxonomy from the component design's error handling section.
///
/// `CutoffReached` is deliberately absent here: exhausting the cutoff without a separating
/// formula is not an error (see [`crate::enumerate::LearnResult`]), it is folded into the
/// driver's ordinary `Ok` result so the CLI can exit `0` and print the "unable to determine"
/// message per the external interface contract.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LearnerError {
    #[snafu(display("no atomic propositions were declared"))]
    EmptyAtomicPropositions,

    #[snafu(display("duplicate atomic proposition name: {name}"))]
    DuplicateAtomicProposition { name: String },

    #[snafu(display("sample has no positive and no negative traces"))]
    EmptySample,

    #[snafu(display("trace repeat index {repeat} out of range for path of length {len}"))]
    RepeatOutOfRange { repeat: usize, len: usize },

    #[snafu(display("trace has an empty path"))]
    EmptyPath,

    #[snafu(display("letter references unknown atomic proposition: {name}"))]
    UnknownAtomicProposition { name: String },

    #[snafu(display("unsupported operator token: {token}"))]
    UnsupportedOperator { token: String },

    #[snafu(display("SAT backend reported an internal error or UNKNOWN: {message}"))]
    BackendError { message: String },

    #[snafu(display("learning run was cancelled while searching length {n}"))]
    Cancelled { n: usize },
}

pub type Result<T, E = LearnerError> = std::result::Result<T, E>;
