pub mod candidate;
pub mod response;

pub use candidate::{
    AgeInput, Candidate, CandidateUpdate, Gender, NewCandidate, TextInput, ValidCandidate,
    ValidCandidateUpdate,
};
pub use response::{ApiResponse, ResponseStatus};
